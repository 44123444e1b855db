//! Tuples, arrays and vectors of generators are themselves generators.
//!
//! Their values shrink element by element, from left to right.
use crate::{
    error::Error,
    generate::{FullGenerate, Generate},
    shrink::Shrink,
    state::State,
    utility::tuples,
};

#[derive(Clone, Debug)]
pub struct Shrinker<S: ?Sized> {
    pub(crate) index: usize,
    pub(crate) shrinkers: S,
}

/// Proposes the next candidate of the element at `index`, moving on to the
/// following element once it has none left.
pub(crate) fn shrink<S: Shrink, I: AsMut<[S]> + Clone>(
    shrinkers: &mut I,
    index: &mut usize,
) -> Option<I> {
    loop {
        let old = shrinkers.as_mut().get_mut(*index)?;
        if let Some(new) = old.shrink() {
            let mut shrinkers = shrinkers.clone();
            shrinkers.as_mut()[*index] = new;
            break Some(shrinkers);
        } else {
            *index += 1;
        }
    }
}

pub(crate) fn generate<'a, G: Generate + 'a>(
    generators: impl IntoIterator<Item = &'a G>,
    state: &mut State,
) -> Result<Vec<G::Shrink>, Error> {
    generators
        .into_iter()
        .map(|generator| generator.generate(state))
        .collect()
}

pub mod array {
    use super::*;
    use crate::array;
    use core::array::from_fn;

    impl<G: FullGenerate, const N: usize> FullGenerate for [G; N] {
        type Item = [G::Item; N];
        type Generator = [G::Generator; N];

        fn generator() -> Self::Generator {
            from_fn(|_| G::generator())
        }
    }

    impl<G: Generate, const N: usize> Generate for [G; N] {
        type Item = [G::Item; N];
        type Shrink = array::Shrinker<G::Shrink, N>;

        fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
            Ok(array::Shrinker::new(generate(self, state)?))
        }
    }
}

pub mod vector {
    use super::*;

    impl<G: Generate> Generate for Vec<G> {
        type Item = Vec<G::Item>;
        type Shrink = Shrinker<Vec<G::Shrink>>;

        fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
            Ok(Shrinker {
                index: 0,
                shrinkers: generate(self, state)?,
            })
        }
    }

    impl<S: Shrink> Shrink for Shrinker<Vec<S>> {
        type Item = Vec<S::Item>;

        fn item(&self) -> Self::Item {
            self.shrinkers.iter().map(S::item).collect()
        }

        fn shrink(&mut self) -> Option<Self> {
            let shrinkers = shrink(&mut self.shrinkers, &mut self.index)?;
            Some(Self {
                shrinkers,
                index: self.index,
            })
        }
    }
}

macro_rules! tuple {
    ($n: ident, $c: tt $(, $p: ident, $t: ident, $i: tt)*) => {
        impl<$($t: FullGenerate,)*> FullGenerate for ($($t,)*) {
            type Item = ($($t::Item,)*);
            type Generator = ($($t::Generator,)*);

            #[allow(clippy::unused_unit)]
            fn generator() -> Self::Generator {
                ($($t::generator(),)*)
            }
        }

        impl<$($t: Generate,)*> Generate for ($($t,)*) {
            type Item = ($($t::Item,)*);
            type Shrink = Shrinker<($($t::Shrink,)*)>;

            fn generate(&self, _state: &mut State) -> Result<Self::Shrink, Error> {
                Ok(Shrinker {
                    index: 0,
                    shrinkers: ($($t::generate(&self.$i, _state)?,)*),
                })
            }
        }

        impl<$($t: Shrink,)*> Shrink for Shrinker<($($t,)*)> {
            type Item = ($($t::Item,)*);

            #[allow(clippy::unused_unit)]
            fn item(&self) -> Self::Item {
                ($(self.shrinkers.$i.item(),)*)
            }

            fn shrink(&mut self) -> Option<Self> {
                loop {
                    match self.index {
                        $($i => {
                            if let Some(shrinker) = self.shrinkers.$i.shrink() {
                                let mut shrinkers = self.shrinkers.clone();
                                shrinkers.$i = shrinker;
                                break Some(Self { shrinkers, index: self.index });
                            } else {
                                self.index += 1;
                            }
                        })*
                        _ => break None,
                    }
                }
            }
        }
    };
}

tuples!(tuple);
