use crate::{
    error::Error,
    generate::{FullGenerate, Generate},
    shrink::Shrink,
    state::{State, Weight},
    utility::tuples,
};
use ref_cast::RefCast;

/// Chooses uniformly between generators.
///
/// Tuples of generators produce an `orn::Or*` value; slices, arrays and vectors
/// of generators produce an `Option` that is `None` only when the collection is
/// empty. See [`Weight`] for non-uniform choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, RefCast)]
#[repr(transparent)]
pub struct Any<G: ?Sized>(pub G);

impl<G: FullGenerate> FullGenerate for Any<G>
where
    Any<G::Generator>: Generate,
{
    type Item = <Any<G::Generator> as Generate>::Item;
    type Generator = Any<G::Generator>;

    fn generator() -> Self::Generator {
        Any(G::generator())
    }
}

impl<G: ?Sized> AsRef<G> for Any<G> {
    fn as_ref(&self) -> &G {
        &self.0
    }
}

impl<G: Generate + ?Sized> Generate for Any<&G>
where
    Any<G>: Generate,
{
    type Item = <Any<G> as Generate>::Item;
    type Shrink = <Any<G> as Generate>::Shrink;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        Any::ref_cast(self.0).generate(state)
    }
}

macro_rules! collection {
    ($type: ty, $choose: ident, [$($field: tt)?] $(, $constant: ident)?) => {
        impl<G: Generate $(, const $constant: usize)?> Generate for $type {
            type Item = Option<G::Item>;
            type Shrink = Option<G::Shrink>;

            fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
                match state.$choose(&self$(.$field)?[..]) {
                    Some(generator) => Ok(Some(generator.generate(state)?)),
                    None => Ok(None),
                }
            }
        }
    };
}

collection!(Any<[G]>, any_indexed, [0]);
collection!(Any<[G; N]>, any_indexed, [0], N);
collection!(Any<Vec<G>>, any_indexed, [0]);
collection!(Any<Box<[G]>>, any_indexed, [0]);
collection!([Weight<G>], any_weighted, []);
collection!([Weight<G>; N], any_weighted, [], N);
collection!(Vec<Weight<G>>, any_weighted, []);
collection!(Box<[Weight<G>]>, any_weighted, []);

impl<S: Shrink> Shrink for Option<S> {
    type Item = Option<S::Item>;

    fn item(&self) -> Self::Item {
        Some(self.as_ref()?.item())
    }

    fn shrink(&mut self) -> Option<Self> {
        Some(Some(self.as_mut()?.shrink()?))
    }
}

macro_rules! tuple {
    ($n: ident, $c: tt) => {};
    ($n: ident, $c: tt $(, $p: ident, $t: ident, $i: tt)+) => {
        impl<$($t: Generate,)*> Generate for orn::$n::Or<$($t,)*> {
            type Item = orn::$n::Or<$($t::Item,)*>;
            type Shrink = orn::$n::Or<$($t::Shrink,)*>;

            fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
                Ok(match self {
                    $(Self::$t(generator) => orn::$n::Or::$t(generator.generate(state)?),)*
                })
            }
        }

        impl<$($t: Shrink,)*> Shrink for orn::$n::Or<$($t,)*> {
            type Item = orn::$n::Or<$($t::Item,)*>;

            fn item(&self) -> Self::Item {
                match self {
                    $(Self::$t(shrinker) => orn::$n::Or::$t(shrinker.item()),)*
                }
            }

            fn shrink(&mut self) -> Option<Self> {
                match self {
                    $(Self::$t(shrinker) => Some(Self::$t(shrinker.shrink()?)),)*
                }
            }
        }

        impl<$($t: Generate,)*> Generate for Any<($($t,)*)> {
            type Item = orn::$n::Or<$($t::Item,)*>;
            type Shrink = orn::$n::Or<$($t::Shrink,)*>;

            fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
                let index = state.with().size(1.0).u8(..$c as u8);
                match index {
                    $($i => Ok(orn::$n::Or::$t(self.0.$i.generate(state)?)),)*
                    _ => unreachable!(),
                }
            }
        }

        impl<$($t: Generate,)*> Generate for ($(Weight<$t>,)*) {
            type Item = orn::$n::Or<$($t::Item,)*>;
            type Shrink = orn::$n::Or<$($t::Shrink,)*>;

            fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
                let weights = [$(self.$i.weight(),)*];
                let total = weights.iter().sum::<f64>();
                debug_assert!(total > 0.0 && total.is_finite());
                let mut random = state.with().size(1.0).f64(0.0..=total);
                let index = weights
                    .iter()
                    .position(|&weight| {
                        if random < weight {
                            true
                        } else {
                            random -= weight;
                            false
                        }
                    })
                    // Rounding can leave a sliver above the last weight.
                    .unwrap_or($c - 1);
                match index {
                    $($i => Ok(orn::$n::Or::$t(self.$i.value().generate(state)?)),)*
                    _ => unreachable!(),
                }
            }
        }
    };
}

tuples!(tuple);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Sizes;

    #[test]
    fn tuples_choose_every_branch() {
        let generator = Any((1u8, 2u8, 3u8));
        let mut seen = [false; 3];
        for index in 0..100 {
            let mut state = State::random(index, 100, Sizes::DEFAULT, 11);
            let item = generator.generate(&mut state).unwrap().item();
            let value: u8 = item.into();
            seen[value as usize - 1] = true;
        }
        assert!(seen.iter().all(|&seen| seen));
    }

    #[test]
    fn empty_collection_yields_none() {
        let mut state = State::random(0, 1, Sizes::DEFAULT, 0);
        let generator = Any(Vec::<u8>::new());
        assert_eq!(generator.generate(&mut state).unwrap().item(), None);
    }

    #[test]
    fn weights_favor_heavier_branches() {
        let generator = [Weight::new(1.0, 'a'), Weight::new(99.0, 'b')];
        let count = Iterator::map(0..1000, |index| {
            let mut state = State::random(index, 1000, Sizes::DEFAULT, 5);
            generator.generate(&mut state).unwrap().item()
        })
        .filter(|&item| item == Some('b'))
        .count();
        assert!(count > 900);
    }
}
