use crate::{error::Error, generate::Generate, shrink::Shrink, state::State};

/// A type-erased generator.
pub struct Boxed<I> {
    generator: Box<dyn Dynamic<I>>,
}

/// A type-erased shrink node.
pub struct Shrinker<I> {
    shrinker: Box<dyn DynamicShrink<I>>,
}

trait Dynamic<I> {
    fn generate(&self, state: &mut State) -> Result<Shrinker<I>, Error>;
}

trait DynamicShrink<I> {
    fn item(&self) -> I;
    fn shrink(&mut self) -> Option<Box<dyn DynamicShrink<I>>>;
    fn duplicate(&self) -> Box<dyn DynamicShrink<I>>;
}

impl<G: Generate<Shrink: 'static>> Dynamic<G::Item> for G {
    fn generate(&self, state: &mut State) -> Result<Shrinker<G::Item>, Error> {
        Ok(Shrinker::new(Generate::generate(self, state)?))
    }
}

impl<S: Shrink + 'static> DynamicShrink<S::Item> for S {
    fn item(&self) -> S::Item {
        Shrink::item(self)
    }

    fn shrink(&mut self) -> Option<Box<dyn DynamicShrink<S::Item>>> {
        Some(Box::new(Shrink::shrink(self)?))
    }

    fn duplicate(&self) -> Box<dyn DynamicShrink<S::Item>> {
        Box::new(Clone::clone(self))
    }
}

impl<I> Boxed<I> {
    pub(crate) fn new<G: Generate<Item = I, Shrink: 'static> + 'static>(generator: Box<G>) -> Self {
        Self { generator }
    }
}

impl<I> Shrinker<I> {
    pub(crate) fn new<S: Shrink<Item = I> + 'static>(shrinker: S) -> Self {
        Self {
            shrinker: Box::new(shrinker),
        }
    }
}

impl<I> Generate for Boxed<I> {
    type Item = I;
    type Shrink = Shrinker<I>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        self.generator.generate(state)
    }
}

impl<I> Clone for Shrinker<I> {
    fn clone(&self) -> Self {
        Self {
            shrinker: self.shrinker.duplicate(),
        }
    }
}

impl<I> Shrink for Shrinker<I> {
    type Item = I;

    fn item(&self) -> Self::Item {
        self.shrinker.item()
    }

    fn shrink(&mut self) -> Option<Self> {
        Some(Self {
            shrinker: self.shrinker.shrink()?,
        })
    }
}
