use crate::{
    collect::Count,
    error::Error,
    generate::Generate,
    primitive::Range,
    replicate::Replicate,
    shrink::Shrink,
    state::State,
};
use std::rc::Rc;

/// Always produces the same value.
#[derive(Clone, Debug)]
pub struct Same<T: ?Sized>(pub(crate) T);

/// Always produces a replica of the same value.
///
/// Reading a node yields [`Replicate::replicate`] of the stored value, so values
/// with internal state never leak it from one read to the next. The stored value
/// itself is never handed out; generating only shares it.
#[derive(Debug)]
pub struct Cloned<T: ?Sized>(pub(crate) Rc<T>);

impl<T: Clone> Generate for Same<T> {
    type Item = T;
    type Shrink = Self;

    fn generate(&self, _: &mut State) -> Result<Self::Shrink, Error> {
        Ok(self.clone())
    }
}

impl<T: Clone> Shrink for Same<T> {
    type Item = T;

    fn item(&self) -> Self::Item {
        self.0.clone()
    }

    fn shrink(&mut self) -> Option<Self> {
        None
    }
}

impl Count for Same<usize> {
    fn count(&self) -> Range<usize> {
        Range(self.0, self.0)
    }
}

impl<T: ?Sized> Clone for Cloned<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Replicate> Generate for Cloned<T> {
    type Item = T;
    type Shrink = Self;

    fn generate(&self, _: &mut State) -> Result<Self::Shrink, Error> {
        Ok(self.clone())
    }
}

impl<T: Replicate> Shrink for Cloned<T> {
    type Item = T;

    fn item(&self) -> Self::Item {
        T::replicate(&self.0)
    }

    fn shrink(&mut self) -> Option<Self> {
        None
    }
}
