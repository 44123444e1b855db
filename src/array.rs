use crate::{all, error::Error, generate::Generate, shrink::Shrink, state::State};
use core::array::from_fn;

/// Draws `N` values from the same generator.
#[derive(Clone, Debug)]
pub struct Array<G: ?Sized, const N: usize>(pub(crate) G);

/// Shrinks the elements of a fixed-size array from left to right.
#[derive(Clone, Debug)]
pub struct Shrinker<S, const N: usize> {
    index: usize,
    shrinkers: Vec<S>,
}

impl<S, const N: usize> Shrinker<S, N> {
    pub(crate) fn new(shrinkers: Vec<S>) -> Self {
        debug_assert_eq!(shrinkers.len(), N);
        Self {
            index: 0,
            shrinkers,
        }
    }
}

impl<G: Generate + ?Sized, const N: usize> Generate for Array<G, N> {
    type Item = [G::Item; N];
    type Shrink = Shrinker<G::Shrink, N>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        let shrinkers = Iterator::map(0..N, |_| self.0.generate(state)).collect::<Result<_, _>>()?;
        Ok(Shrinker::new(shrinkers))
    }
}

impl<S: Shrink, const N: usize> Shrink for Shrinker<S, N> {
    type Item = [S::Item; N];

    fn item(&self) -> Self::Item {
        from_fn(|index| self.shrinkers[index].item())
    }

    fn shrink(&mut self) -> Option<Self> {
        let shrinkers = all::shrink(&mut self.shrinkers, &mut self.index)?;
        Some(Self {
            shrinkers,
            index: self.index,
        })
    }
}
