use crate::{error::Error, generate::Generate, state::State};

/// Reduces the size of generation as the recursion depth grows.
#[derive(Clone, Debug)]
pub struct Dampen<G: ?Sized> {
    pub(crate) pressure: f64,
    pub(crate) deepest: usize,
    pub(crate) limit: usize,
    pub(crate) generator: G,
}

impl<G: Generate + ?Sized> Generate for Dampen<G> {
    type Item = G::Item;
    type Shrink = G::Shrink;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        self.generator.generate(
            state
                .dampen(self.deepest, self.limit, self.pressure)
                .as_mut(),
        )
    }
}
