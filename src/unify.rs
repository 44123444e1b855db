use crate::{error::Error, generate::Generate, shrink::Shrink, state::State, utility::tuples};
use core::marker::PhantomData;

/// Collapses a choice between generators of convertible types into a single type.
#[derive(Debug)]
pub struct Unify<G: ?Sized, I: ?Sized>(pub(crate) PhantomData<I>, pub(crate) G);

impl<G: Clone, I: ?Sized> Clone for Unify<G, I> {
    fn clone(&self) -> Self {
        Self(PhantomData, self.1.clone())
    }
}

impl<G: Generate + ?Sized, I> Generate for Unify<G, I>
where
    Unify<G::Shrink, I>: Shrink<Item = I>,
{
    type Item = I;
    type Shrink = Unify<G::Shrink, I>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        Ok(Unify(PhantomData, self.1.generate(state)?))
    }
}

macro_rules! tuple {
    ($n: ident, $c: tt) => {};
    ($n: ident, $c: tt $(, $p: ident, $t: ident, $i: tt)+) => {
        impl<I, $($t: Shrink,)*> Shrink for Unify<orn::$n::Or<$($t,)*>, I> where $($t::Item: Into<I>,)* {
            type Item = I;

            fn item(&self) -> Self::Item {
                match self.1.item() {
                    $(orn::$n::Or::$t(item) => item.into(),)*
                }
            }

            fn shrink(&mut self) -> Option<Self> {
                Some(Unify(PhantomData, self.1.shrink()?))
            }
        }
    };
}

tuples!(tuple);
