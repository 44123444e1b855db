use crate::{error::Error, generate::Generate, shrink::Shrink, state::State};

/// Keeps generated values as they are; they are never shrunk.
#[derive(Clone, Debug)]
pub struct Keep<G: ?Sized>(pub(crate) G);

impl<G: Generate + ?Sized> Generate for Keep<G> {
    type Item = G::Item;
    type Shrink = Keep<G::Shrink>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        Ok(Keep(self.0.generate(state)?))
    }
}

impl<S: Shrink> Shrink for Keep<S> {
    type Item = S::Item;

    fn item(&self) -> Self::Item {
        self.0.item()
    }

    fn shrink(&mut self) -> Option<Self> {
        None
    }
}
