use crate::error::Error;
use core::{any::Any, convert::Infallible};

/// The outcome of a checked property.
///
/// A property holds when [`Prove::prove`] returns `Ok`. Failures shrink, unless
/// [`Prove::fatal`] recognizes them as a fatal engine [`Error`], in which case
/// the run is aborted as-is.
pub trait Prove {
    type Proof;
    type Error;
    fn prove(self) -> Result<Self::Proof, Self::Error>;

    fn fatal(_error: &Self::Error) -> Option<Error> {
        None
    }
}

impl Prove for () {
    type Error = Infallible;
    type Proof = ();

    fn prove(self) -> Result<Self::Proof, Self::Error> {
        Ok(())
    }
}

impl Prove for bool {
    type Error = ();
    type Proof = ();

    fn prove(self) -> Result<Self::Proof, Self::Error> {
        if self { Ok(()) } else { Err(()) }
    }
}

impl<T, E: 'static> Prove for Result<T, E> {
    type Error = E;
    type Proof = T;

    fn prove(self) -> Self {
        self
    }

    fn fatal(error: &Self::Error) -> Option<Error> {
        let error = (error as &dyn Any).downcast_ref::<Error>()?;
        error.is_fatal().then(|| error.clone())
    }
}
