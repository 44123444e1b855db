use crate::{error::Error, generate::Generate, shrink::Shrink, state::State};

/// Generates a value, builds a generator out of it, then generates from that.
///
/// The inner generator draws from the same advancing state, one recursion
/// level deeper. Shrinking exhausts the inner candidates before it shrinks the
/// outer value, which then re-derives the inner value from the state as it was
/// right after the outer draw.
#[derive(Clone, Debug)]
pub struct Flatten<G: ?Sized>(pub(crate) G);

#[derive(Clone, Debug)]
pub struct Shrinker<I, O> {
    state: State,
    inner: I,
    outer: O,
}

impl<G: Generate<Item: Generate> + ?Sized> Generate for Flatten<G> {
    type Item = <G::Item as Generate>::Item;
    type Shrink = Shrinker<<G::Item as Generate>::Shrink, G::Shrink>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        let outer = self.0.generate(state)?;
        let snapshot = state.clone();
        let inner = outer.item().generate(state.descend().as_mut())?;
        Ok(Shrinker {
            state: snapshot,
            inner,
            outer,
        })
    }
}

impl<I: Shrink, O: Shrink<Item: Generate<Shrink = I>>> Shrink for Shrinker<I, O> {
    type Item = I::Item;

    fn item(&self) -> Self::Item {
        self.inner.item()
    }

    fn shrink(&mut self) -> Option<Self> {
        if let Some(inner) = self.inner.shrink() {
            return Some(Self {
                state: self.state.clone(),
                outer: self.outer.clone(),
                inner,
            });
        }

        loop {
            let outer = self.outer.shrink()?;
            let mut snapshot = self.state.clone();
            let mut state = snapshot.descend();
            // An outer candidate whose inner generator cannot produce a value is skipped.
            if let Ok(inner) = outer.item().generate(&mut state) {
                break Some(Self {
                    state: self.state.clone(),
                    outer,
                    inner,
                });
            }
        }
    }
}
