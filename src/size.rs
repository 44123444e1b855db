use crate::{
    error::Error,
    generate::Generate,
    state::{Sizes, State},
};

/// Overrides the sizes used to generate the inner values.
#[derive(Debug, Clone)]
pub struct Size<G, F>(pub(crate) G, pub(crate) F);

impl<G: Generate, S: Into<Sizes>, F: Fn(Sizes) -> S> Generate for Size<G, F> {
    type Item = G::Item;
    type Shrink = G::Shrink;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        let sizes = self.1(state.sizes()).into();
        self.0.generate(state.with().sizes(sizes).as_mut())
    }
}
