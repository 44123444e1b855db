use crate::{error::Error, generate::Generate, shrink::Shrink, state::State};

/// Transforms the values of a generator.
///
/// The mapping is applied when a node is read, so it runs again for every
/// shrink candidate and never draws from the random source.
#[derive(Debug, Clone)]
pub struct Map<G: ?Sized, F>(pub(crate) F, pub(crate) G);

impl<G: Generate + ?Sized, T, F: Fn(G::Item) -> T + Clone> Generate for Map<G, F> {
    type Item = T;
    type Shrink = Map<G::Shrink, F>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        Ok(Map(self.0.clone(), self.1.generate(state)?))
    }
}

impl<S: Shrink, T, F: Fn(S::Item) -> T + Clone> Shrink for Map<S, F> {
    type Item = T;

    fn item(&self) -> Self::Item {
        self.0(self.1.item())
    }

    fn shrink(&mut self) -> Option<Self> {
        Some(Self(self.0.clone(), self.1.shrink()?))
    }
}
