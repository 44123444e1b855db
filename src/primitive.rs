use crate::{
    error::Error,
    generate::{FullGenerate, Generate},
    shrink::Shrink,
    state::State,
};
use core::{marker::PhantomData, ops};

/// A normalized, inclusive range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range<T>(pub(crate) T, pub(crate) T);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    None,
    Low,
    High,
}

/// The default generator of a primitive type, covering its whole domain.
#[derive(Debug)]
pub struct Full<T: ?Sized>(PhantomData<T>);

/// Shrinks a number toward zero (or the bound nearest to it) by bisection.
///
/// The first candidate is the target itself. Subsequent siblings bisect the
/// interval between the last rejected candidate and the current item.
#[derive(Clone, Debug)]
pub struct Shrinker<T> {
    pub(crate) start: T,
    pub(crate) end: T,
    pub(crate) item: T,
    pub(crate) direction: Direction,
}

impl<T> Range<T> {
    pub const fn start(&self) -> T
    where
        T: Copy,
    {
        self.0
    }

    pub const fn end(&self) -> T
    where
        T: Copy,
    {
        self.1
    }
}

impl<T: ?Sized> Full<T> {
    pub(crate) const NEW: Self = Self(PhantomData);
}

impl<T: ?Sized> Clone for Full<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Full<T> {}

impl<T> Shrinker<T> {
    pub(crate) const fn new(start: T, end: T, item: T) -> Self {
        Self {
            start,
            end,
            item,
            direction: Direction::None,
        }
    }
}

macro_rules! full {
    ($type: ty) => {
        impl FullGenerate for $type {
            type Item = $type;
            type Generator = Full<$type>;

            fn generator() -> Self::Generator {
                Full::<$type>::NEW
            }
        }
    };
}

macro_rules! same {
    ($type: ty) => {
        impl Generate for $type {
            type Item = Self;
            type Shrink = Self;

            fn generate(&self, _: &mut State) -> Result<Self::Shrink, Error> {
                Ok(<$type as Clone>::clone(self))
            }
        }

        impl Shrink for $type {
            type Item = Self;

            fn item(&self) -> Self::Item {
                <$type as Clone>::clone(self)
            }

            fn shrink(&mut self) -> Option<Self> {
                None
            }
        }
    };
}

macro_rules! ranges {
    ($type: ident, $shrink: ty, $generate: expr) => {
        impl Generate for Range<$type> {
            type Item = $type;
            type Shrink = $shrink;

            fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
                Ok($generate(state, *self))
            }
        }

        ranges!(@range $type, ops::Range<$type>);
        ranges!(@range $type, ops::RangeInclusive<$type>);
        ranges!(@range $type, ops::RangeFrom<$type>);
        ranges!(@range $type, ops::RangeTo<$type>);
        ranges!(@range $type, ops::RangeToInclusive<$type>);
    };
    (@range $type: ident, $range: ty) => {
        impl Generate for $range {
            type Item = $type;
            type Shrink = <Range<$type> as Generate>::Shrink;

            fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
                Range::<$type>::from(self.clone()).generate(state)
            }
        }
    };
}

macro_rules! shrink {
    ($shrinker: expr, $type: ident) => {{
        // `$shrinker.item` never changes so that `item()` stays coherent between calls.
        match $shrinker.direction {
            Direction::None if $shrinker.item >= 0 as $type => {
                $shrinker.start = if $shrinker.start >= 0 as $type { $shrinker.start } else { 0 as $type };
                if $shrinker.start == $shrinker.item {
                    None
                } else {
                    $shrinker.direction = Direction::High;
                    $shrinker.end = $shrinker.item;
                    Some(Shrinker {
                        direction: Direction::High,
                        start: $shrinker.start,
                        end: $shrinker.start,
                        item: $shrinker.start,
                    })
                }
            }
            Direction::None => {
                $shrinker.end = if $shrinker.end <= 0 as $type { $shrinker.end } else { 0 as $type };
                if $shrinker.end == $shrinker.item {
                    None
                } else {
                    $shrinker.direction = Direction::Low;
                    $shrinker.start = $shrinker.item;
                    Some(Shrinker {
                        direction: Direction::Low,
                        start: $shrinker.end,
                        end: $shrinker.end,
                        item: $shrinker.end,
                    })
                }
            }
            Direction::Low => {
                let delta = $shrinker.end / 2 as $type - $shrinker.start / 2 as $type;
                let middle = $shrinker.start + delta;
                if middle == $shrinker.start || middle == $shrinker.end {
                    None
                } else {
                    let mut shrinker = $shrinker.clone();
                    shrinker.start = middle;
                    shrinker.item = middle;
                    $shrinker.end = middle;
                    Some(shrinker)
                }
            }
            Direction::High => {
                let delta = $shrinker.end / 2 as $type - $shrinker.start / 2 as $type;
                let middle = $shrinker.start + delta;
                if middle == $shrinker.start || middle == $shrinker.end {
                    None
                } else {
                    let mut shrinker = $shrinker.clone();
                    shrinker.end = middle;
                    shrinker.item = middle;
                    $shrinker.start = middle;
                    Some(shrinker)
                }
            }
        }
    }};
}

pub mod boolean {
    use super::*;
    use core::mem::take;

    #[derive(Copy, Clone, Debug)]
    pub struct Shrinker(bool, bool);

    impl Generate for Full<bool> {
        type Item = bool;
        type Shrink = Shrinker;

        fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
            Ok(Shrinker(true, state.bool()))
        }
    }

    impl Shrink for Shrinker {
        type Item = bool;

        fn item(&self) -> Self::Item {
            self.1
        }

        fn shrink(&mut self) -> Option<Self> {
            // The first flag marks whether `false` was already proposed.
            if self.1 && take(&mut self.0) {
                Some(Shrinker(false, false))
            } else {
                None
            }
        }
    }

    full!(bool);
    same!(bool);
}

pub mod character {
    use super::*;
    use crate::utility::character::{character, index};

    /// Shrinks characters in code point order, skipping over surrogates.
    #[derive(Clone, Debug)]
    pub struct Shrinker(pub(crate) super::Shrinker<u32>);

    impl Generate for Full<char> {
        type Item = char;
        type Shrink = Shrinker;

        fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
            Range(0 as char, char::MAX).generate(state)
        }
    }

    impl Shrink for Shrinker {
        type Item = char;

        fn item(&self) -> Self::Item {
            character(self.0.item)
        }

        fn shrink(&mut self) -> Option<Self> {
            Some(Self(self.0.shrink()?))
        }
    }

    full!(char);
    same!(char);
    ranges!(char, Shrinker, |state: &mut State, range: Range<char>| {
        let item = state.char(range);
        Shrinker(super::Shrinker::new(index(range.0), index(range.1), index(item)))
    });
}

pub mod string {
    use super::*;

    same!(&'static str);
    same!(Box<str>);
    same!(String);
}

pub mod number {
    use super::*;

    /// A numeric type with well-known generators for its domain.
    pub trait Number: Sized + Copy {
        type Full: Generate<Item = Self>;
        type Positive: Generate<Item = Self>;
        type Negative: Generate<Item = Self>;

        const ZERO: Self;
        const ONE: Self;
        const MIN: Self;
        const MAX: Self;
        const FULL: Self::Full;
        const POSITIVE: Self::Positive;
        const NEGATIVE: Self::Negative;
    }

    macro_rules! number {
        ($type: ident) => {
            impl Number for $type {
                type Full = Range<Self>;
                type Negative = Range<Self>;
                type Positive = Range<Self>;

                const FULL: Self::Full = Range(Self::MIN, Self::MAX);
                const MAX: Self = $type::MAX;
                const MIN: Self = $type::MIN;
                const NEGATIVE: Self::Negative = Range(Self::MIN, Self::ZERO);
                const ONE: Self = 1 as $type;
                const POSITIVE: Self::Positive = Range(Self::ZERO, Self::MAX);
                const ZERO: Self = 0 as $type;
            }

            impl Generate for Full<$type> {
                type Item = $type;
                type Shrink = Shrinker<$type>;

                fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
                    <$type as Number>::FULL.generate(state)
                }
            }

            full!($type);
            same!($type);
        };
    }

    macro_rules! integer {
        ($type: ident) => {
            impl Shrink for Shrinker<$type> {
                type Item = $type;

                fn item(&self) -> Self::Item {
                    self.item
                }

                fn shrink(&mut self) -> Option<Self> {
                    shrink!(self, $type)
                }
            }

            ranges!($type, Shrinker<$type>, |state: &mut State, range: Range<$type>| {
                Shrinker::new(range.0, range.1, state.$type(range))
            });
            number!($type);
        };
        ($($types: ident),*) => { $(integer!($types);)* };
    }

    macro_rules! floating {
        ($type: ident) => {
            impl Shrink for Shrinker<$type> {
                type Item = $type;

                fn item(&self) -> Self::Item {
                    self.item
                }

                fn shrink(&mut self) -> Option<Self> {
                    if self.item.is_finite() {
                        shrink!(self, $type)
                    } else {
                        None
                    }
                }
            }

            ranges!($type, Shrinker<$type>, |state: &mut State, range: Range<$type>| {
                Shrinker::new(range.0, range.1, state.$type(range))
            });
            number!($type);
        };
        ($($types: ident),*) => { $(floating!($types);)* };
    }

    integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
    floating!(f32, f64);
}

pub use number::Number;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Sizes;

    fn candidates<S: Shrink>(mut shrinker: S) -> Vec<S::Item> {
        let mut items = Vec::new();
        while let Some(candidate) = shrinker.shrink() {
            items.push(candidate.item());
        }
        items
    }

    #[test]
    fn first_candidate_is_zero() {
        let shrinker = Shrinker::new(0i32, 100, 73);
        assert_eq!(candidates(shrinker)[0], 0);
        let shrinker = Shrinker::new(-100i32, 100, -73);
        assert_eq!(candidates(shrinker)[0], 0);
    }

    #[test]
    fn first_candidate_is_nearest_bound() {
        let shrinker = Shrinker::new(10u8, 100, 73);
        assert_eq!(candidates(shrinker)[0], 10);
        let shrinker = Shrinker::new(-100i8, -10, -73);
        assert_eq!(candidates(shrinker)[0], -10);
    }

    #[test]
    fn candidates_approach_item() {
        let items = candidates(Shrinker::new(0u64, 1000, 73));
        assert_eq!(items, vec![0, 36, 54, 63, 68, 70, 71, 72]);
        assert!(items.iter().all(|&item| item < 73));
    }

    #[test]
    fn minimum_has_no_candidates() {
        assert!(candidates(Shrinker::new(0i16, 10, 0)).is_empty());
        assert!(candidates(Shrinker::new(5u16, 10, 5)).is_empty());
    }

    #[test]
    fn bool_shrinks_to_false() {
        let mut state = State::random(0, 1, Sizes::DEFAULT, 0);
        let mut shrinker = Full::<bool>::NEW.generate(&mut state).unwrap();
        while !shrinker.item() {
            shrinker = Full::<bool>::NEW.generate(&mut state).unwrap();
        }
        assert_eq!(candidates(shrinker), vec![false]);
    }

    #[test]
    fn characters_shrink_across_surrogates() {
        use crate::utility::character::index;

        let item = '\u{E298}';
        let shrinker = character::Shrinker(Shrinker::new(0, index(char::MAX), index(item)));
        let items = candidates(shrinker);
        assert!(items.iter().all(|&candidate| candidate < item));
        assert!(items.iter().any(|&candidate| candidate > '\u{D7FF}'));
    }

    #[test]
    fn ranges_are_respected() {
        for index in 0..100 {
            let mut state = State::random(index, 100, Sizes::DEFAULT, 1);
            let item = (-5i32..5).generate(&mut state).unwrap().item();
            assert!((-5..5).contains(&item));
            let item = ('a'..='f').generate(&mut state).unwrap().item();
            assert!(('a'..='f').contains(&item));
            let item = (1.5f64..=2.5).generate(&mut state).unwrap().item();
            assert!((1.5..=2.5).contains(&item));
        }
    }
}
