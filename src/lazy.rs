use crate::{error::Error, generate::Generate, state::State};
use std::sync::{LazyLock, OnceLock};

/// Defers the construction of a generator until its first use, then memoizes it.
///
/// Recursive generators refer to themselves through a [`Lazy`] and are bounded
/// with [`Generate::dampen`]. Each use of a [`Lazy`] generates one recursion
/// level deeper.
pub struct Lazy<G, F>(OnceLock<G>, F);

impl<G: Generate, F: Fn() -> G> Lazy<G, F> {
    pub const fn new(generator: F) -> Self {
        Self(OnceLock::new(), generator)
    }
}

impl<G: Generate, F: Fn() -> G> Generate for Lazy<G, F> {
    type Item = G::Item;
    type Shrink = G::Shrink;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        self.0
            .get_or_init(|| self.1())
            .generate(state.descend().as_mut())
    }
}

impl<G: Generate, F: FnOnce() -> G> Generate for LazyLock<G, F> {
    type Item = G::Item;
    type Shrink = G::Shrink;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        LazyLock::force(self).generate(state)
    }
}
