use core::any::Any;
use std::borrow::Cow;

/// Extracts the message of a panic payload, if it has one.
pub(crate) fn cast(
    error: Box<dyn Any + Send + 'static>,
) -> Result<Cow<'static, str>, Box<dyn Any + Send + 'static>> {
    let error = match error.downcast::<&'static str>() {
        Ok(error) => return Ok(Cow::Borrowed(*error)),
        Err(error) => error,
    };
    let error = match error.downcast::<String>() {
        Ok(error) => return Ok(Cow::Owned(*error)),
        Err(error) => error,
    };
    let error = match error.downcast::<Box<str>>() {
        Ok(error) => return Ok(Cow::Owned(error.to_string())),
        Err(error) => error,
    };
    let error = match error.downcast::<Cow<'static, str>>() {
        Ok(error) => return Ok(*error),
        Err(error) => error,
    };
    Err(error)
}

/// Maps characters to a dense index space without the surrogate range, such
/// that every index up to `index(char::MAX)` is a valid character.
pub(crate) mod character {
    const LOW: u32 = 0xD800;
    const GAP: u32 = 0xE000 - LOW;

    #[inline]
    pub const fn index(value: char) -> u32 {
        let value = value as u32;
        if value >= LOW {
            value - GAP
        } else {
            value
        }
    }

    #[inline]
    pub const fn character(index: u32) -> char {
        let value = if index >= LOW { index + GAP } else { index };
        match char::from_u32(value) {
            Some(value) => value,
            None => char::MAX,
        }
    }
}

macro_rules! floating {
    ($type: ident, $bits: ident, $sign: expr) => {
        pub(crate) mod $type {
            const SIGN_MASK: $bits = $sign;
            const TINY_BITS: $bits = 0x1;
            const NEG_TINY_BITS: $bits = TINY_BITS | SIGN_MASK;

            #[inline]
            #[allow(dead_code)]
            pub const fn clamp(value: $type, low: $type, high: $type) -> $type {
                if value < low {
                    low
                } else if value > high {
                    high
                } else {
                    value
                }
            }

            #[inline]
            #[allow(dead_code)]
            pub const fn max(left: $type, right: $type) -> $type {
                if left >= right { left } else { right }
            }

            #[inline]
            pub const fn next_up(value: $type) -> $type {
                let bits = value.to_bits();
                if value.is_nan() || bits == $type::INFINITY.to_bits() {
                    return value;
                }

                let abs = bits & !SIGN_MASK;
                let next = if abs == 0 {
                    TINY_BITS
                } else if bits == abs {
                    bits + 1
                } else {
                    bits - 1
                };
                $type::from_bits(next)
            }

            #[inline]
            pub const fn next_down(value: $type) -> $type {
                let bits = value.to_bits();
                if value.is_nan() || bits == $type::NEG_INFINITY.to_bits() {
                    return value;
                }

                let abs = bits & !SIGN_MASK;
                let next = if abs == 0 {
                    NEG_TINY_BITS
                } else if bits == abs {
                    bits - 1
                } else {
                    bits + 1
                };
                $type::from_bits(next)
            }
        }
    };
}

floating!(f32, u32, 0x8000_0000);
floating!(f64, u64, 0x8000_0000_0000_0000);

macro_rules! tuples {
    ($m:ident) => {
        $m!(or0, 0);
        $m!(or1, 1, p0, T0, 0);
        $m!(or2, 2, p0, T0, 0, p1, T1, 1);
        $m!(or3, 3, p0, T0, 0, p1, T1, 1, p2, T2, 2);
        $m!(or4, 4, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3);
        $m!(
            or5, 5, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4
        );
        $m!(
            or6, 6, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5
        );
        $m!(
            or7, 7, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5, p6, T6, 6
        );
        $m!(
            or8, 8, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5, p6, T6, 6,
            p7, T7, 7
        );
        $m!(
            or9, 9, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5, p6, T6, 6,
            p7, T7, 7, p8, T8, 8
        );
        $m!(
            or10, 10, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5, p6, T6, 6,
            p7, T7, 7, p8, T8, 8, p9, T9, 9
        );
        $m!(
            or11, 11, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5, p6, T6, 6,
            p7, T7, 7, p8, T8, 8, p9, T9, 9, p10, T10, 10
        );
        $m!(
            or12, 12, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5, p6, T6, 6,
            p7, T7, 7, p8, T8, 8, p9, T9, 9, p10, T10, 10, p11, T11, 11
        );
        $m!(
            or13, 13, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5, p6, T6, 6,
            p7, T7, 7, p8, T8, 8, p9, T9, 9, p10, T10, 10, p11, T11, 11, p12, T12, 12
        );
        $m!(
            or14, 14, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5, p6, T6, 6,
            p7, T7, 7, p8, T8, 8, p9, T9, 9, p10, T10, 10, p11, T11, 11, p12, T12, 12, p13, T13,
            13
        );
        $m!(
            or15, 15, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5, p6, T6, 6,
            p7, T7, 7, p8, T8, 8, p9, T9, 9, p10, T10, 10, p11, T11, 11, p12, T12, 12, p13, T13,
            13, p14, T14, 14
        );
        $m!(
            or16, 16, p0, T0, 0, p1, T1, 1, p2, T2, 2, p3, T3, 3, p4, T4, 4, p5, T5, 5, p6, T6, 6,
            p7, T7, 7, p8, T8, 8, p9, T9, 9, p10, T10, 10, p11, T11, 11, p12, T12, 12, p13, T13,
            13, p14, T14, 14, p15, T15, 15
        );
    };
}

pub(crate) use tuples;
