use crate::{
    error::Error,
    generate::{FullGenerate, Generate},
    primitive::{Full, Range},
    shrink::Shrink,
    state::State,
};
use core::{iter::FromIterator, marker::PhantomData, ops};

/// Describes how many elements a collection holds.
pub trait Count {
    fn count(&self) -> Range<usize>;
}

/// Draws a length from its [`Count`], then that many elements.
#[derive(Debug)]
pub struct Collect<G: ?Sized, C, F: ?Sized> {
    pub(crate) _marker: PhantomData<F>,
    pub(crate) count: C,
    pub(crate) generator: G,
}

/// Shrinks a collection by removing elements, then by shrinking the remaining ones.
///
/// Removals never go below the minimum length of the collection.
#[derive(Debug)]
pub struct Shrinker<S, F: ?Sized> {
    shrinkers: Vec<S>,
    minimum: usize,
    remove: usize,
    index: usize,
    _marker: PhantomData<F>,
}

impl<G: Clone, C: Clone, F: ?Sized> Clone for Collect<G, C, F> {
    fn clone(&self) -> Self {
        Self {
            _marker: PhantomData,
            count: self.count.clone(),
            generator: self.generator.clone(),
        }
    }
}

impl<S: Clone, F: ?Sized> Clone for Shrinker<S, F> {
    fn clone(&self) -> Self {
        Self {
            shrinkers: self.shrinkers.clone(),
            minimum: self.minimum,
            remove: self.remove,
            index: self.index,
            _marker: PhantomData,
        }
    }
}

impl<S, F: ?Sized> Shrinker<S, F> {
    pub(crate) const fn new(shrinkers: Vec<S>, minimum: usize) -> Self {
        Self {
            shrinkers,
            minimum,
            remove: 0,
            index: 0,
            _marker: PhantomData,
        }
    }
}

impl<G: Generate + ?Sized, C: Count, F: FromIterator<G::Item>> Generate for Collect<G, C, F> {
    type Item = F;
    type Shrink = Shrinker<G::Shrink, F>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        let range = self.count.count();
        let count = state.usize(range);
        let shrinkers = Iterator::map(0..count, |_| self.generator.generate(state))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Shrinker::new(shrinkers, range.start()))
    }
}

impl<S: Shrink, F: FromIterator<S::Item>> Shrink for Shrinker<S, F> {
    type Item = F;

    fn item(&self) -> Self::Item {
        self.shrinkers.iter().map(S::item).collect()
    }

    fn shrink(&mut self) -> Option<Self> {
        // Try to remove irrelevant elements.
        if self.shrinkers.len() > self.minimum && self.remove < self.shrinkers.len() {
            let mut shrinkers = self.shrinkers.clone();
            shrinkers.remove(self.remove);
            self.remove += 1;
            return Some(Self::new(shrinkers, self.minimum));
        }

        // Then try to shrink the remaining elements one at a time.
        let shrinkers = crate::all::shrink(&mut self.shrinkers, &mut self.index)?;
        Some(Self::new(shrinkers, self.minimum))
    }
}

impl Count for usize {
    fn count(&self) -> Range<usize> {
        Range(*self, *self)
    }
}

impl Count for Range<usize> {
    fn count(&self) -> Range<usize> {
        *self
    }
}

macro_rules! count {
    ($range: ty) => {
        impl Count for $range {
            fn count(&self) -> Range<usize> {
                Range::from(self.clone())
            }
        }
    };
}

count!(ops::Range<usize>);
count!(ops::RangeInclusive<usize>);
count!(ops::RangeTo<usize>);
count!(ops::RangeToInclusive<usize>);

impl<G: FullGenerate> FullGenerate for Vec<G> {
    type Item = Vec<G::Item>;
    type Generator = Collect<G::Generator, Range<usize>, Self::Item>;

    fn generator() -> Self::Generator {
        G::generator().collect()
    }
}

impl FullGenerate for String {
    type Item = Self;
    type Generator = Collect<Full<char>, Range<usize>, Self::Item>;

    fn generator() -> Self::Generator {
        char::generator().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Sizes;

    #[test]
    fn length_stays_within_count() {
        let generator = (0u8..10).collect_with::<_, Vec<_>>(3..=7usize);
        for index in 0..100 {
            let mut state = State::random(index, 100, Sizes::DEFAULT, 2);
            let items = generator.generate(&mut state).unwrap().item();
            assert!((3..=7).contains(&items.len()));
        }
    }

    #[test]
    fn removes_before_shrinking() {
        let generator = (1u8..=100).collect_with::<_, Vec<_>>(4usize);
        let mut state = State::random(0, 1, Sizes::DEFAULT, 2);
        let mut shrinker = generator.generate(&mut state).unwrap();
        let items = shrinker.item();
        assert_eq!(items.len(), 4);
        // A fixed count forbids removals.
        let candidate = shrinker.shrink().map(|shrinker| shrinker.item());
        if let Some(candidate) = candidate {
            assert_eq!(candidate.len(), 4);
        }

        let generator = (1u8..=100).collect_with::<_, Vec<_>>(0..=4usize);
        let mut state = State::random(0, 1, Sizes::DEFAULT, 2);
        let mut shrinker = generator.generate(&mut state).unwrap();
        let items = shrinker.item();
        for index in 0..items.len() {
            let mut expected = items.clone();
            expected.remove(index);
            assert_eq!(shrinker.shrink().map(|shrinker| shrinker.item()), Some(expected));
        }
    }
}
