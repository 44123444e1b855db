//! A prelude of commonly used items, brought into scope automatically
//! by `use falsify::*`.
use crate::{
    any::Any,
    array::Array,
    boxed::Boxed,
    collect::{Collect, Count},
    dampen::Dampen,
    dedup::Dedup,
    filter::Filter,
    flatten::Flatten,
    generate::Generate,
    keep::Keep,
    lazy::Lazy,
    map::Map,
    primitive::Number,
    replicate::Replicate,
    same::{Cloned, Same},
    size::Size,
    state::Sizes,
    unify::Unify,
};
use core::{iter::FromIterator, marker::PhantomData};
use std::rc::Rc;

/// Creates a generator that always produces the same value.
#[inline]
pub const fn same<T: Clone>(value: T) -> Same<T> {
    Same(value)
}

/// Creates a generator that always produces a replica of `value`.
///
/// Prefer it over [`same`] for values that hold internal mutable state.
#[inline]
pub fn cloned<T: Replicate>(value: T) -> Cloned<T> {
    Cloned(Rc::new(value))
}

/// Creates a generator that randomly chooses one of a set of generators.
#[inline]
pub const fn any<G: Generate>(generators: G) -> Any<G> {
    Any(generators)
}

/// Unifies a generator of a choice type into a single type.
#[inline]
pub const fn unify<G: Generate, T>(generator: G) -> Unify<G, T> {
    Unify(PhantomData, generator)
}

/// Creates a new generator that transforms the output of another.
///
/// See [`Map`] for more details.
#[inline]
pub const fn map<G: Generate, T, F: Fn(G::Item) -> T + Clone>(generator: G, map: F) -> Map<G, F> {
    Map(map, generator)
}

/// Creates a new generator by applying a function to the output of another,
/// and then flattening the result.
#[inline]
pub const fn flat_map<G: Generate, T: Generate, F: Fn(G::Item) -> T + Clone>(
    generator: G,
    map: F,
) -> Flatten<Map<G, F>> {
    flatten(self::map(generator, map))
}

/// Flattens a generator of generators.
///
/// See [`Flatten`] for more details.
#[inline]
pub const fn flatten<G: Generate>(generator: G) -> Flatten<G>
where
    G::Item: Generate,
{
    Flatten(generator)
}

/// Creates a new generator that discards values that don't match a predicate.
///
/// See [`Filter`] for more details.
#[inline]
pub const fn filter<G: Generate, F: Fn(&G::Item) -> bool + Clone>(
    generator: G,
    filter: F,
    retries: usize,
) -> Filter<G, F> {
    Filter {
        generator,
        filter,
        retries,
    }
}

/// Wraps a generator in a [`Boxed`] to erase its concrete type.
#[inline]
pub fn boxed<G: Generate<Shrink: 'static> + 'static>(generator: Box<G>) -> Boxed<G::Item> {
    Boxed::new(generator)
}

/// Creates a generator that produces a fixed-size array.
#[inline]
pub const fn array<G: Generate, const N: usize>(generator: G) -> Array<G, N> {
    Array(generator)
}

/// Creates a generator that produces a collection of items.
///
/// See [`Collect`] for more details.
#[inline]
pub const fn collect<G: Generate, C: Count, F: FromIterator<G::Item>>(
    generator: G,
    count: C,
) -> Collect<G, C, F> {
    Collect {
        _marker: PhantomData,
        count,
        generator,
    }
}

/// Creates a generator that produces `count` equal values out of one draw.
///
/// See [`Dedup`] for more details.
#[inline]
pub const fn dedup<G: Generate>(generator: G, count: usize) -> Dedup<G> {
    Dedup { count, generator }
}

/// Creates a generator that modifies the `size` parameter for subsequent generation.
#[inline]
pub const fn size<G: Generate, S: Into<Sizes>, F: Fn(Sizes) -> S>(
    generator: G,
    map: F,
) -> Size<G, F> {
    Size(generator, map)
}

/// Dampens the `size` of generation, typically for recursive structures.
#[inline]
pub const fn dampen<G: Generate>(
    generator: G,
    pressure: f64,
    deepest: usize,
    limit: usize,
) -> Dampen<G> {
    Dampen {
        pressure,
        deepest,
        limit,
        generator,
    }
}

/// Creates a generator whose values are not shrunk.
#[inline]
pub const fn keep<G: Generate>(generator: G) -> Keep<G> {
    Keep(generator)
}

/// A generator for the full range of any [`Number`] type.
#[inline]
pub const fn number<T: Number>() -> impl Generate<Item = T> {
    T::FULL
}

/// A generator for any non-negative [`Number`] type.
#[inline]
pub const fn positive<T: Number>() -> impl Generate<Item = T> {
    T::POSITIVE
}

/// A generator for any non-positive [`Number`] type.
#[inline]
pub const fn negative<T: Number>() -> impl Generate<Item = T> {
    T::NEGATIVE
}

/// A generator for ASCII letters (`a-z`, `A-Z`).
#[inline]
pub const fn letter() -> impl Generate<Item = char> {
    let generator = unify(any(('a'..='z', 'A'..='Z')));
    #[allow(clippy::let_and_return)]
    generator
}

/// A generator for ASCII digits (`0-9`).
#[inline]
pub const fn digit() -> impl Generate<Item = char> {
    let generator = '0'..='9';
    #[allow(clippy::let_and_return)]
    generator
}

/// A generator for all ASCII characters (0-127).
#[inline]
pub const fn ascii() -> impl Generate<Item = char> {
    let generator = 0 as char..=127 as char;
    #[allow(clippy::let_and_return)]
    generator
}

/// Creates a generator from a closure that produces a value.
///
/// ```
/// # use falsify::*;
/// struct Token(u32);
///
/// let generator = with(|| Token(42));
/// ```
#[inline]
pub const fn with<T, F: Fn() -> T + Clone>(generator: F) -> impl Generate<Item = T> {
    let generator = map((), move |_| generator());
    #[allow(clippy::let_and_return)]
    generator
}

/// Defers the construction of a generator until it is used.
///
/// This is essential for creating recursive generators. See [`Lazy`] for details.
#[inline]
pub const fn lazy<G: Generate, F: Fn() -> G>(generator: F) -> Lazy<G, F> {
    Lazy::new(generator)
}
