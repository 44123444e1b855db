use crate::{
    error::Error,
    generate::Generate,
    shrink::Shrink,
    state::{Sizes, State},
};

/// Only produces values that satisfy a predicate.
///
/// Generation re-draws from the advancing state, at progressively larger sizes,
/// until the predicate holds and fails with [`Error::Exhausted`] once `retries`
/// draws were rejected. Shrink candidates that break the predicate are skipped.
///
/// The predicate reads each drawn value once. That read counts as a read of the
/// node, so values with a clone hook may be replicated by it.
#[derive(Clone, Debug)]
pub struct Filter<G: ?Sized, F> {
    pub(crate) filter: F,
    pub(crate) retries: usize,
    pub(crate) generator: G,
}

#[derive(Clone, Debug)]
pub struct Shrinker<S, F> {
    shrinker: S,
    filter: F,
}

impl<G: Generate + ?Sized, F: Fn(&G::Item) -> bool + Clone> Generate for Filter<G, F> {
    type Item = G::Item;
    type Shrink = Shrinker<G::Shrink, F>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        let sizes = state.sizes();
        for index in 0..self.retries {
            // Retries grow from the current size toward its end, such that a
            // predicate that rejects small values can still be satisfied.
            let mut state = state
                .with()
                .sizes(Sizes::from_ratio(index, self.retries, sizes))
                .scale(sizes.scale());
            let shrinker = self.generator.generate(&mut state)?;
            if (self.filter)(&shrinker.item()) {
                return Ok(Shrinker {
                    shrinker,
                    filter: self.filter.clone(),
                });
            }
        }
        Err(Error::Exhausted {
            retries: self.retries,
        })
    }
}

impl<S: Shrink, F: Fn(&S::Item) -> bool + Clone> Shrink for Shrinker<S, F> {
    type Item = S::Item;

    fn item(&self) -> Self::Item {
        self.shrinker.item()
    }

    fn shrink(&mut self) -> Option<Self> {
        loop {
            let shrinker = self.shrinker.shrink()?;
            if (self.filter)(&shrinker.item()) {
                break Some(Self {
                    shrinker,
                    filter: self.filter.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{prelude, state::Sizes};

    #[test]
    fn rejects_until_predicate_holds() {
        let generator = prelude::filter(0u8..=100, |&value| value % 2 == 1, 256);
        for index in 1..100 {
            let mut state = State::random(index, 100, Sizes::DEFAULT, 7);
            let shrinker = generator.generate(&mut state).unwrap();
            assert_eq!(shrinker.item() % 2, 1);
        }
    }

    #[test]
    fn exhaustion_is_an_error() {
        let generator = prelude::filter(0u8..=100, |_| false, 16);
        let mut state = State::random(0, 1, Sizes::DEFAULT, 7);
        let error = generator.generate(&mut state).err();
        assert_eq!(error, Some(Error::Exhausted { retries: 16 }));
        assert_eq!(state.consumed(), 16);
    }

    #[test]
    fn minimum_is_rejected_at_size_zero() {
        let generator = prelude::filter(0u32..1000, |&value| value % 2 == 1, 256);
        let mut state = State::random(0, 100, Sizes::DEFAULT, 3);
        assert_eq!(state.size(), 0.0);
        let shrinker = generator.generate(&mut state).unwrap();
        assert_eq!(shrinker.item() % 2, 1);
        assert_eq!(state.size(), 0.0);
    }

    #[test]
    fn candidates_satisfy_predicate() {
        let generator = prelude::filter(0u32..=1000, |&value| value % 3 == 0, 256);
        let mut state = State::random(0, 1, Sizes::DEFAULT, 1);
        let mut shrinker = generator.generate(&mut state).unwrap();
        while let Some(candidate) = shrinker.shrink() {
            assert_eq!(candidate.item() % 3, 0);
        }
    }
}
