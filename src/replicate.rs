//! Values that carry internal mutable state must not be shared between the
//! reads of a generated value. [`Replicate`] is the explicit copy used wherever
//! the engine hands out the same value more than once.
pub use crate::prelude::cloned;
use crate::utility::tuples;
use std::{borrow::Cow, rc::Rc};

/// Produces a behaviorally independent copy of a value.
///
/// Values that hold internal mutable state (a memo, a log) set `HOOK` to
/// `true` and reset that state in [`Replicate::replicate`]. For every other
/// value, `replicate` is a plain structural copy.
///
/// ```
/// # use falsify::replicate::*;
/// assert!(!has_clone_hook(&vec![1u8, 2, 3]));
/// assert_eq!(clone_hook(&(1, 'a')), (1, 'a'));
/// ```
pub trait Replicate: Sized {
    /// Whether values of this type hold internal mutable state.
    const HOOK: bool;
    fn replicate(&self) -> Self;
}

/// Returns whether `value` holds internal mutable state that replication resets.
pub const fn has_clone_hook<T: Replicate>(_: &T) -> bool {
    T::HOOK
}

/// Replicates `value`.
pub fn clone_hook<T: Replicate>(value: &T) -> T {
    value.replicate()
}

macro_rules! plain {
    ($($type: ty),*) => {
        $(
            impl Replicate for $type {
                const HOOK: bool = false;

                #[inline]
                fn replicate(&self) -> Self {
                    self.clone()
                }
            }
        )*
    };
}

plain!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String, Box<str>, &'static str, Cow<'static, str>
);

impl<T: Replicate> Replicate for Box<T> {
    const HOOK: bool = T::HOOK;

    fn replicate(&self) -> Self {
        Box::new(self.as_ref().replicate())
    }
}

impl<T: Replicate> Replicate for Rc<T> {
    const HOOK: bool = T::HOOK;

    fn replicate(&self) -> Self {
        if T::HOOK {
            Rc::new(self.as_ref().replicate())
        } else {
            self.clone()
        }
    }
}

impl<T: Replicate> Replicate for Option<T> {
    const HOOK: bool = T::HOOK;

    fn replicate(&self) -> Self {
        self.as_ref().map(T::replicate)
    }
}

impl<T: Replicate, E: Replicate> Replicate for Result<T, E> {
    const HOOK: bool = T::HOOK || E::HOOK;

    fn replicate(&self) -> Self {
        match self {
            Ok(value) => Ok(value.replicate()),
            Err(error) => Err(error.replicate()),
        }
    }
}

impl<T: Replicate> Replicate for Vec<T> {
    const HOOK: bool = T::HOOK;

    fn replicate(&self) -> Self {
        self.iter().map(T::replicate).collect()
    }
}

impl<T: Replicate, const N: usize> Replicate for [T; N] {
    const HOOK: bool = T::HOOK;

    fn replicate(&self) -> Self {
        core::array::from_fn(|index| self[index].replicate())
    }
}

macro_rules! tuple {
    ($n: ident, $c: tt) => {};
    ($n: ident, $c: tt $(, $p: ident, $t: ident, $i: tt)+) => {
        impl<$($t: Replicate,)*> Replicate for ($($t,)*) {
            const HOOK: bool = false $(|| $t::HOOK)*;

            fn replicate(&self) -> Self {
                ($(self.$i.replicate(),)*)
            }
        }
    };
}

tuples!(tuple);
