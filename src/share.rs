use crate::{error::Error, generate::Generate, shrink::Shrink, state::State};
use core::cell::OnceCell;

/// Shares the value of a node between all of its reads.
///
/// The first read of a node builds its value; later reads of the same node get
/// clones of it. Values whose clones share their internal state (such as a
/// [`Function`](crate::function::Function) memo or a
/// [`Scheduler`](crate::scheduler::Scheduler) log) thus show, when reported,
/// what happened to them while they were checked. Shrink candidates and clones
/// of a node start with a value of their own.
#[derive(Clone, Debug)]
pub struct Share<G: ?Sized>(pub(crate) G);

pub struct Shrinker<S: Shrink> {
    shrinker: S,
    item: OnceCell<S::Item>,
}

impl<S: Shrink> Shrinker<S> {
    const fn new(shrinker: S) -> Self {
        Self {
            shrinker,
            item: OnceCell::new(),
        }
    }
}

impl<S: Shrink> Clone for Shrinker<S> {
    fn clone(&self) -> Self {
        // A cloned node is read afresh.
        Self::new(self.shrinker.clone())
    }
}

impl<G: Generate<Item: Clone> + ?Sized> Generate for Share<G> {
    type Item = G::Item;
    type Shrink = Shrinker<G::Shrink>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        Ok(Shrinker::new(self.0.generate(state)?))
    }
}

impl<S: Shrink<Item: Clone>> Shrink for Shrinker<S> {
    type Item = S::Item;

    fn item(&self) -> Self::Item {
        self.item.get_or_init(|| self.shrinker.item()).clone()
    }

    fn shrink(&mut self) -> Option<Self> {
        Some(Self::new(self.shrinker.shrink()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Sizes;
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn reads_of_a_node_share_its_value() {
        let generator = Share(crate::prelude::map(0u8..100, |value| (value, Rc::new(Cell::new(0)))));
        let mut state = State::random(0, 1, Sizes::DEFAULT, 4);
        let mut shrinker = generator.generate(&mut state).unwrap();
        let (value, count) = shrinker.item();
        count.set(3);
        assert_eq!(shrinker.item().0, value);
        assert_eq!(shrinker.item().1.get(), 3);
        while let Some(candidate) = shrinker.shrink() {
            assert_eq!(candidate.item().1.get(), 0);
        }
    }
}
