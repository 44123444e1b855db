use crate::{
    any::Any,
    array::Array,
    boxed::Boxed,
    collect::{Collect, Count},
    dampen::Dampen,
    dedup::Dedup,
    error::Error,
    filter::Filter,
    flatten::Flatten,
    keep::Keep,
    map::Map,
    prelude,
    primitive::Range,
    shrink::Shrink,
    size::Size,
    state::{Sizes, State},
    unify::Unify,
    COLLECTS, RETRIES,
};
use core::iter::FromIterator;

/// Provides a default, parameterless generator for a type.
pub trait FullGenerate {
    /// The type of the value that the generator produces.
    type Item;
    /// The concrete [`Generate`] type returned by `generator()`.
    type Generator: Generate<Item = Self::Item>;
    /// Creates a default generator for the type.
    fn generator() -> Self::Generator;
}

/// The core trait for all value generators.
///
/// A generator is an immutable description of a distribution. Calling
/// [`Generate::generate`] draws from the [`State`] and produces a [`Shrink`]
/// node: the generated value along with the lazy sequence of its smaller
/// candidates. Generation is a pure function of the state; two identical
/// states always produce identical nodes.
///
/// Generation can fail, for example when a [`Generate::filter`] cannot find a
/// conforming value within its retry budget. Such failures are returned as an
/// [`Error`] and are never papered over with a non-conforming value.
#[must_use = "generators do nothing until used"]
pub trait Generate {
    /// The type of the value that this generator produces.
    type Item;
    /// The [`Shrink`] implementation that corresponds to this generator.
    type Shrink: Shrink<Item = Self::Item>;

    /// Generates a value and its associated [`Shrink`] node.
    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error>;

    /// Wraps `self` in a boxed [`Generate`] to erase its concrete type.
    ///
    /// This is required for recursive generators and for returning different
    /// generator types from the same function.
    fn boxed(self) -> Boxed<Self::Item>
    where
        Self: Sized + 'static,
        Self::Shrink: 'static,
    {
        prelude::boxed(Box::new(self))
    }

    /// Creates a new generator that transforms the output of `self`.
    ///
    /// The transformation is applied lazily to every node of the shrink tree and
    /// never touches the random source.
    ///
    /// ```
    /// # use falsify::*;
    /// let evens = number::<u8>().map(|x| u16::from(x) * 2);
    /// evens.check(|x| x % 2 == 0).assert();
    /// ```
    fn map<T, F: Fn(Self::Item) -> T + Clone>(self, map: F) -> Map<Self, F>
    where
        Self: Sized,
    {
        prelude::map(self, map)
    }

    /// Creates a new generator that only produces values satisfying `filter`.
    ///
    /// Rejected values are re-drawn from the same state. If no value is accepted
    /// within the default number of retries, generation fails with
    /// [`Error::Exhausted`].
    fn filter<F: Fn(&Self::Item) -> bool + Clone>(self, filter: F) -> Filter<Self, F>
    where
        Self: Sized,
    {
        prelude::filter(self, filter, RETRIES)
    }

    /// Same as [`Generate::filter`] with a configurable number of retries.
    fn filter_with<F: Fn(&Self::Item) -> bool + Clone>(
        self,
        retries: usize,
        filter: F,
    ) -> Filter<Self, F>
    where
        Self: Sized,
    {
        prelude::filter(self, filter, retries)
    }

    /// Creates a new generator by building a second generator out of the value of
    /// `self` and then generating from it.
    ///
    /// When shrinking, the value of the second generator is shrunk first. Only
    /// then is the value of `self` shrunk, which re-derives the second generator.
    fn flat_map<G: Generate, F: Fn(Self::Item) -> G + Clone>(self, map: F) -> Flatten<Map<Self, F>>
    where
        Self: Sized,
    {
        prelude::flat_map(self, map)
    }

    /// Flattens a generator of generators.
    ///
    /// The inner generator runs one recursion level deeper, which is what
    /// [`Generate::dampen`] uses to bound recursive structures.
    fn flatten(self) -> Flatten<Self>
    where
        Self: Sized,
        Self::Item: Generate,
    {
        prelude::flatten(self)
    }

    /// Creates a new generator that randomly chooses one of a set of generators.
    ///
    /// Applies to tuples, slices and vectors of generators. Tuples produce an
    /// `orn::Or` value which can be simplified with [`Generate::unify`]. For
    /// weighted choices, see [`Weight`](crate::state::Weight).
    fn any(self) -> Any<Self>
    where
        Self: Sized,
    {
        prelude::any(self)
    }

    /// Creates a generator that produces a fixed-size array of `N` draws.
    fn array<const N: usize>(self) -> Array<Self, N>
    where
        Self: Sized,
    {
        prelude::array(self)
    }

    /// Creates a generator that produces a collection of a default size.
    fn collect<F: FromIterator<Self::Item>>(self) -> Collect<Self, Range<usize>, F>
    where
        Self: Sized,
    {
        prelude::collect(self, Range(0, COLLECTS))
    }

    /// Creates a generator that produces a collection whose length is drawn from `count`.
    fn collect_with<C: Count, F: FromIterator<Self::Item>>(self, count: C) -> Collect<Self, C, F>
    where
        Self: Sized,
    {
        prelude::collect(self, count)
    }

    /// Creates a generator that produces `count` equal values out of a single draw.
    ///
    /// The first value is the canonical one; the others are replicas obtained
    /// through [`Replicate`](crate::replicate::Replicate).
    fn dedup(self, count: usize) -> Dedup<Self>
    where
        Self: Sized,
    {
        prelude::dedup(self, count)
    }

    /// Creates a generator that modifies the `size` for the generation of `self`.
    fn size<S: Into<Sizes>, F: Fn(Sizes) -> S>(self, map: F) -> Size<Self, F>
    where
        Self: Sized,
    {
        prelude::size(self, map)
    }

    /// Dampens the `size` of generation as the recursion depth increases.
    fn dampen(self) -> Dampen<Self>
    where
        Self: Sized,
    {
        prelude::dampen(self, 1.0, 8, 8192)
    }

    /// Dampens the `size` with configurable parameters.
    /// - `pressure`: How fast the `size` is reduced as `depth` increases.
    /// - `deepest`: The `depth` at which `size` becomes `0`.
    /// - `limit`: The total number of `depth` increases before `size` becomes `0`.
    fn dampen_with(self, pressure: f64, deepest: usize, limit: usize) -> Dampen<Self>
    where
        Self: Sized,
    {
        prelude::dampen(self, pressure, deepest, limit)
    }

    /// Creates a generator whose values are never shrunk.
    fn keep(self) -> Keep<Self>
    where
        Self: Sized,
    {
        prelude::keep(self)
    }

    /// Unifies a generator of a choice type (such as `orn::Or`) into a single type.
    fn unify<T>(self) -> Unify<Self, T>
    where
        Self: Sized,
    {
        prelude::unify(self)
    }
}

impl<G: Generate + ?Sized> Generate for &G {
    type Item = G::Item;
    type Shrink = G::Shrink;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        G::generate(self, state)
    }
}

impl<G: Generate + ?Sized> Generate for &mut G {
    type Item = G::Item;
    type Shrink = G::Shrink;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        G::generate(self, state)
    }
}
