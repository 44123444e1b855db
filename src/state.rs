use crate::{generate::Generate, primitive::Range, random::Random, utility, GENERATES};
use core::{
    iter::FusedIterator,
    ops::{self, Bound, RangeBounds},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sizes {
    range: Range<f64>,
    scale: f64,
}

/// The generation state threaded through every call to [`Generate::generate`].
///
/// It owns the [`Random`] source of the current trial along with the sizing and
/// recursion parameters that guide generators toward small or large values.
#[derive(Clone, Debug)]
pub struct State {
    random: Random,
    sizes: Sizes,
    index: usize,
    count: usize,
    limit: usize,
    depth: usize,
    seed: u64,
}

/// Iterates over the states of the trials of a run.
#[derive(Clone, Debug)]
pub struct States {
    indices: ops::Range<usize>,
    count: usize,
    sizes: Sizes,
    seed: u64,
}

#[derive(Clone, Debug)]
pub struct Weight<T: ?Sized> {
    weight: f64,
    generator: T,
}

impl<T> Weight<T> {
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    pub const fn value(&self) -> &T {
        &self.generator
    }
}

impl<G: Generate> Weight<G> {
    pub fn new(weight: f64, generator: G) -> Self {
        assert!(weight.is_finite());
        assert!(weight >= f64::EPSILON);
        Self { weight, generator }
    }
}

/// Restores the size and depth of a [`State`] when dropped.
pub struct With<'a> {
    state: &'a mut State,
    sizes: Sizes,
    depth: usize,
}

impl State {
    /// Creates the state of trial `index` out of `count` for a run seeded with `seed`.
    pub fn random(index: usize, count: usize, sizes: Sizes, seed: u64) -> Self {
        Self {
            random: Random::new(seed.wrapping_add(index as u64)),
            sizes: Sizes::from_ratio(index, count, sizes),
            index,
            count,
            limit: 0,
            depth: 0,
            seed,
        }
    }

    #[inline]
    pub const fn size(&self) -> f64 {
        self.sizes.start()
    }

    #[inline]
    pub const fn scale(&self) -> f64 {
        self.sizes.scale
    }

    #[inline]
    pub const fn sizes(&self) -> Sizes {
        self.sizes
    }

    #[inline]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// The number of 64-bit words drawn from the random source of this state.
    #[inline]
    pub const fn consumed(&self) -> u64 {
        self.random.consumed()
    }

    #[inline]
    pub fn with(&mut self) -> With<'_> {
        With::new(self)
    }

    #[inline]
    pub fn descend(&mut self) -> With<'_> {
        let with = self.with();
        with.state.depth += 1;
        with.state.limit += 1;
        with
    }

    #[inline]
    pub fn dampen(&mut self, deepest: usize, limit: usize, pressure: f64) -> With<'_> {
        let with = self.with();
        let old = with.state.sizes();
        let new = if with.state.depth >= deepest || with.state.limit >= limit {
            0.0
        } else {
            old.start() / utility::f64::max(with.state.depth as f64 * pressure, 1.0)
        };
        with.state.sizes = Sizes::new(new, old.end(), old.scale());
        with
    }

    #[inline]
    pub fn bool(&mut self) -> bool {
        self.u8(Range(0, 1)) == 1
    }

    #[inline]
    pub fn char<R: Into<Range<char>>>(&mut self, range: R) -> char {
        let Range(start, end) = range.into();
        let value = self.u32(Range(
            utility::character::index(start),
            utility::character::index(end),
        ));
        utility::character::character(value)
    }

    pub(crate) fn any_indexed<'a, G>(&mut self, generators: &'a [G]) -> Option<&'a G> {
        let end = generators.len().checked_sub(1)?;
        let index = self.with().size(1.0).usize(Range(0, end));
        generators.get(index)
    }

    pub(crate) fn any_weighted<'a, G>(&mut self, generators: &'a [Weight<G>]) -> Option<&'a G> {
        if generators.is_empty() {
            return None;
        }

        let total = generators
            .iter()
            .map(|Weight { weight, .. }| weight)
            .sum::<f64>()
            .min(f64::MAX);
        debug_assert!(total > 0.0 && total.is_finite());
        let mut random = self.with().size(1.0).f64(0.0..=total);
        debug_assert!(random.is_finite());
        for Weight { weight, generator } in generators {
            if random < *weight {
                return Some(generator);
            } else {
                random -= weight;
            }
        }
        // Rounding can leave a sliver above the last weight.
        generators.last().map(Weight::value)
    }
}

impl<'a> With<'a> {
    pub(crate) fn new(state: &'a mut State) -> Self {
        Self {
            sizes: state.sizes(),
            depth: state.depth(),
            state,
        }
    }

    #[inline]
    pub fn size(self, size: f64) -> Self {
        let scale = self.sizes.scale();
        self.sizes(Sizes::new(size, size, scale))
    }

    #[inline]
    pub fn sizes(self, sizes: Sizes) -> Self {
        self.state.sizes = sizes;
        self
    }

    #[inline]
    pub fn scale(self, scale: f64) -> Self {
        self.state.sizes.scale = scale;
        self
    }

    #[inline]
    pub fn depth(self, depth: usize) -> Self {
        self.state.depth = depth;
        self
    }
}

impl ops::Deref for With<'_> {
    type Target = State;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl ops::DerefMut for With<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl AsRef<State> for With<'_> {
    #[inline]
    fn as_ref(&self) -> &State {
        self.state
    }
}

impl AsMut<State> for With<'_> {
    #[inline]
    fn as_mut(&mut self) -> &mut State {
        self.state
    }
}

impl Drop for With<'_> {
    #[inline]
    fn drop(&mut self) {
        self.state.depth = self.depth;
        self.state.sizes = self.sizes;
    }
}

pub(crate) fn seed() -> u64 {
    fastrand::u64(..)
}

macro_rules! range {
    ($name: ident, $range: ty, $up: expr, $down: expr) => {
        impl From<$range> for Range<$name> {
            fn from(value: $range) -> Self {
                let mut start = match value.start_bound() {
                    Bound::Included(&bound) => (bound, false),
                    Bound::Excluded(&bound) => (bound, true),
                    Bound::Unbounded => ($name::MIN, false),
                };
                let mut end = match value.end_bound() {
                    Bound::Included(&bound) => (bound, false),
                    Bound::Excluded(&bound) => (bound, true),
                    Bound::Unbounded => ($name::MAX, false),
                };
                if start.0 > end.0 {
                    (start, end) = (end, start);
                }
                if start.1 {
                    start.0 = $up(start.0);
                }
                if end.1 {
                    end.0 = $down(end.0);
                }
                Self(
                    start.0.clamp($name::MIN, end.0),
                    end.0.clamp(start.0, $name::MAX),
                )
            }
        }
    };
}

macro_rules! ranges {
    ($name: ident, $up: expr, $down: expr) => {
        impl From<$name> for Range<$name> {
            fn from(value: $name) -> Self {
                Self(value, value)
            }
        }

        range!($name, ops::Range<$name>, $up, $down);
        range!($name, ops::RangeTo<$name>, $up, $down);
        range!($name, ops::RangeInclusive<$name>, $up, $down);
        range!($name, ops::RangeToInclusive<$name>, $up, $down);
        range!($name, ops::RangeFrom<$name>, $up, $down);
        range!($name, ops::RangeFull, $up, $down);
    };
}

macro_rules! integer {
    ($integer: ident, $positive: ident) => {
        ranges!($integer, |value| $integer::saturating_add(value, 1), |value| $integer::saturating_sub(value, 1));

        impl State {
            /// Draws a sized value from `range`, consuming exactly one word.
            #[inline]
            pub fn $integer<R: Into<Range<$integer>>>(&mut self, range: R) -> $integer {
                #[inline]
                const fn divide(left: $positive, right: $positive) -> $positive {
                    let value = left / right;
                    let remain = left % right;
                    if remain > 0 {
                        value + 1
                    } else {
                        value
                    }
                }

                #[inline]
                fn shrink(range: $positive, size: f64, scale: f64) -> $positive {
                    if range == 0 || size <= 0.0 {
                        0
                    } else if size >= 1.0 {
                        range
                    } else {
                        // Keeps wide ranges (such as `u64`) from rushing into huge values as
                        // soon as `size > 0`.
                        let log = $positive::BITS - 1 - range.leading_zeros();
                        let power = size.powf(log as f64 / scale).recip();
                        divide(range, power as _)
                    }
                }

                fn generate(state: &mut State, Range(start, end): Range<$integer>) -> $integer {
                    let size = state.size();
                    let scale = state.scale();
                    let range = shrink($positive::wrapping_sub(end as _, start as _), size, scale);
                    let value = state.random.next_int(0, range as u64) as $integer;
                    #[allow(unused_comparisons)]
                    if start == end {
                        start
                    } else if start >= 0 {
                        start.wrapping_add(value)
                    } else if end <= 0 {
                        end.wrapping_sub(value)
                    } else {
                        // Centers the range around zero as much as possible.
                        let center = (range / 2) as $integer;
                        let remain = (range % 2) as $integer;
                        let shift = (start + center).max(0) + (end - center - remain).min(0);
                        let wrap = value.wrapping_add(shift).wrapping_sub(center);
                        debug_assert!(wrap >= start && wrap <= end);
                        wrap
                    }
                }
                generate(self, range.into())
            }
        }
    };
    ($([$integer: ident, $positive: ident]),*) => {
        $(integer!($integer, $positive);)*
    }
}

macro_rules! floating {
    ($number: ident) => {
        ranges!($number, utility::$number::next_up, utility::$number::next_down);

        impl State {
            /// Draws a sized value from `range`, consuming exactly one word.
            #[inline]
            pub fn $number<R: Into<Range<$number>>>(&mut self, range: R) -> $number {
                #[inline]
                fn shrink(range: $number, size: f64, scale: f64) -> $number {
                    if range == 0.0 || size <= 0.0 {
                        0.0
                    } else if size >= 1.0 {
                        range
                    } else {
                        let log = range.abs().log2();
                        let power = (log as f64 / scale).max(1.0);
                        let pow = size.powf(power);
                        range * pow as $number
                    }
                }

                fn generate(state: &mut State, Range(start, end): Range<$number>) -> $number {
                    assert!(start.is_finite() && end.is_finite());

                    let size = state.size();
                    let scale = state.scale();
                    let random = state.random.next_f64() as $number;
                    let value = if start == end {
                        start
                    } else if start >= 0.0 {
                        start + random * shrink(end - start, size, scale)
                    } else if end <= 0.0 {
                        end - random * shrink(end - start, size, scale)
                    } else {
                        // Chooses either the positive or negative side based on the ratio between the 2.
                        let (small, big) = if -start < end { (start, end) } else { (end, start) };
                        let ratio = (small / big).abs().clamp(1e-3, 1e3);
                        let random = random * (1.0 + ratio);
                        if random <= 1.0 {
                            random * shrink(big, size, scale)
                        } else {
                            (random - 1.0) / ratio * shrink(small, size, scale)
                        }
                    };
                    value.clamp(start, end)
                }
                generate(self, range.into())
            }
        }
    };
    ($($number: ident),*) => {
        $(floating!($number);)*
    }
}

ranges!(
    char,
    |value: char| utility::character::character(utility::character::index(value).saturating_add(1)),
    |value: char| utility::character::character(utility::character::index(value).saturating_sub(1))
);
integer!(
    [u8, u8],
    [u16, u16],
    [u32, u32],
    [u64, u64],
    [usize, usize],
    [i8, u8],
    [i16, u16],
    [i32, u32],
    [i64, u64],
    [isize, usize]
);
floating!(f32, f64);

impl States {
    pub(crate) fn new(count: usize, sizes: Sizes, seed: u64) -> Self {
        Self {
            indices: 0..count,
            count,
            sizes,
            seed,
        }
    }

    /// Restricts iteration to the single trial at `index`.
    pub(crate) fn only(mut self, index: usize) -> Self {
        self.indices = if index < self.count {
            index..index + 1
        } else {
            0..0
        };
        self
    }

    fn state(&self, index: usize) -> State {
        State::random(index, self.count, self.sizes, self.seed)
    }
}

impl Default for States {
    fn default() -> Self {
        States::new(GENERATES, Sizes::DEFAULT, seed())
    }
}

impl Iterator for States {
    type Item = State;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        Some(self.state(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }

    fn count(self) -> usize {
        self.indices.count()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let index = self.indices.nth(n)?;
        Some(self.state(index))
    }
}

impl ExactSizeIterator for States {
    fn len(&self) -> usize {
        self.indices.len()
    }
}

impl DoubleEndedIterator for States {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.indices.next_back()?;
        Some(self.state(index))
    }
}

impl FusedIterator for States {}

impl Sizes {
    pub const DEFAULT: Self = Self::new(0.0, 1.0, Self::SCALE);
    pub(crate) const SCALE: f64 = 6.0;

    #[inline]
    pub const fn new(start: f64, end: f64, scale: f64) -> Self {
        assert!(start.is_finite() && end.is_finite() && start <= end);
        assert!(scale.is_finite() && scale >= 1.0);

        Self {
            range: Range(
                utility::f64::clamp(start, 0.0, 1.0),
                utility::f64::clamp(end, 0.0, 1.0),
            ),
            scale: utility::f64::clamp(scale, 1.0, f64::MAX),
        }
    }

    #[inline]
    pub(crate) const fn from_ratio(index: usize, count: usize, size: Self) -> Self {
        let (start, end) = (size.start(), size.end());
        if count <= 1 {
            Self::new(end, end, Self::SCALE)
        } else {
            let range = end - start;
            // Ensures that 25% of the trials are fully sized.
            let ratio = index as f64 / count as f64 * 1.25;
            let size = utility::f64::clamp(start + ratio * range, 0.0, end);
            Self::new(size, end, Self::SCALE)
        }
    }

    #[inline]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub const fn start(&self) -> f64 {
        self.range.0
    }

    #[inline]
    pub const fn end(&self) -> f64 {
        self.range.1
    }
}

impl Default for Sizes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<R: Into<Range<f64>>> From<R> for Sizes {
    fn from(value: R) -> Self {
        let range = value.into();
        Self::new(range.start(), range.end(), Self::SCALE)
    }
}
