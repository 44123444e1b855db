//! Generators of pure functions and of comparators.
//!
//! A generated function picks its output out of a generated pool by hashing
//! its arguments, so it is deterministic for a given seed. It records every
//! call in a memo that shows up in its textual representation, which is what
//! makes a counterexample involving a function readable.
use crate::{
    generate::Generate,
    prelude::{keep, number},
    replicate::Replicate,
    share::Share,
};
use core::{
    cell::RefCell,
    cmp::Ordering,
    fmt::{self, Debug, Display},
};
use std::{collections::BTreeMap, rc::Rc};

type Memo<V> = Rc<RefCell<BTreeMap<String, V>>>;

/// A deterministic function with a memo of the calls made to it.
///
/// Clones share the memo; replicas start with an empty one.
#[derive(Clone)]
pub struct Function<O> {
    seed: u32,
    pool: Vec<O>,
    memo: Memo<O>,
}

/// A deterministic comparison function.
///
/// Every value is hashed to a number in `0..modulus` and values are compared
/// through their hashes. The result is antisymmetric (`compare(a, b) ==
/// -compare(b, a)`) and consistent between calls. It is *not* guaranteed to be
/// transitive over the `Debug` representations of arbitrary values: two
/// distinct values may collide on the same hash and compare as equal.
#[derive(Clone)]
pub struct Comparator {
    seed: u32,
    modulus: u32,
    memo: Memo<String>,
}

fn hash(seed: u32, representation: &str) -> u32 {
    crc32fast::hash(format!("{seed}{representation}").as_bytes())
}

impl<O: Replicate> Function<O> {
    /// Builds a function that chooses among the values of `pool`.
    ///
    /// # Panics
    /// If `pool` is empty.
    pub fn new(seed: u32, pool: Vec<O>) -> Self {
        assert!(!pool.is_empty(), "the output pool of a function must not be empty");
        Self {
            seed,
            pool,
            memo: Rc::default(),
        }
    }

    /// Calls the function. Equal arguments (by their `Debug` representation)
    /// always produce equal outputs.
    pub fn call<A: Debug>(&self, arguments: A) -> O {
        let key = format!("{arguments:?}");
        let index = hash(self.seed, &key) as usize % self.pool.len();
        let output = &self.pool[index];
        self.memo.borrow_mut().insert(key, output.replicate());
        output.replicate()
    }

    /// The number of distinct arguments that the function was called with.
    pub fn calls(&self) -> usize {
        self.memo.borrow().len()
    }
}

impl<O: Replicate> Replicate for Function<O> {
    const HOOK: bool = true;

    fn replicate(&self) -> Self {
        Self {
            seed: self.seed,
            pool: self.pool.replicate(),
            memo: Rc::default(),
        }
    }
}

impl<O: Debug> Display for Function<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<function :: ")?;
        for (index, (key, value)) in self.memo.borrow().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key} => {value:?}")?;
        }
        f.write_str(">")
    }
}

impl<O: Debug> Debug for Function<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Comparator {
    /// # Panics
    /// If `modulus` is `0`.
    pub fn new(seed: u32, modulus: u32) -> Self {
        assert!(modulus > 0);
        Self {
            seed,
            modulus,
            memo: Rc::default(),
        }
    }

    fn hashes<T: Debug + ?Sized>(&self, left: &T, right: &T) -> (String, i64, i64) {
        let left = format!("{left:?}");
        let right = format!("{right:?}");
        let left_hash = hash(self.seed, &left) % self.modulus;
        let right_hash = hash(self.seed, &right) % self.modulus;
        (format!("[{left},{right}]"), left_hash as i64, right_hash as i64)
    }

    /// Returns a negative number if `left < right`, a positive one if
    /// `left > right` and `0` if they are equivalent.
    pub fn compare<T: Debug + ?Sized>(&self, left: &T, right: &T) -> i64 {
        let (key, left, right) = self.hashes(left, right);
        let value = left - right;
        self.memo.borrow_mut().insert(key, value.to_string());
        value
    }

    /// Returns `true` if `left` is strictly less than `right`.
    pub fn less<T: Debug + ?Sized>(&self, left: &T, right: &T) -> bool {
        let (key, left, right) = self.hashes(left, right);
        let value = left < right;
        self.memo.borrow_mut().insert(key, value.to_string());
        value
    }

    pub fn ordering<T: Debug + ?Sized>(&self, left: &T, right: &T) -> Ordering {
        self.compare(left, right).cmp(&0)
    }
}

impl Replicate for Comparator {
    const HOOK: bool = true;

    fn replicate(&self) -> Self {
        Self::new(self.seed, self.modulus)
    }
}

impl Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<function :: ")?;
        for (index, (key, value)) in self.memo.borrow().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key} => {value}")?;
        }
        f.write_str(">")
    }
}

impl Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Generates pure functions whose outputs are drawn from `output`.
///
/// The pool of outputs shrinks like any collection; the hashing seed never
/// shrinks. A function reported as a counterexample shows the calls that the
/// failing check made to it.
///
/// ```
/// # use falsify::*;
/// function::function(0u8..10)
///     .check(|function| function.call((1, "a")) == function.call((1, "a")))
///     .assert();
/// ```
pub fn function<G: Generate<Item: Replicate + Clone>>(
    output: G,
) -> impl Generate<Item = Function<G::Item>> {
    Share(
        (
            output.collect_with::<_, Vec<_>>(1..=10usize),
            keep(number::<u32>()),
        )
            .map(|(pool, seed)| Function::new(seed, pool)),
    )
}

/// Generates comparison functions. Neither the seed nor the modulus shrinks.
pub fn comparator() -> impl Generate<Item = Comparator> {
    Share((keep(number::<u32>()), keep(1..=u32::MAX)).map(|(seed, modulus)| Comparator::new(seed, modulus)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calls_are_memoized_in_order() {
        let function = Function::new(7, vec!['x']);
        assert_eq!(function.call(2), 'x');
        assert_eq!(function.call(1), 'x');
        assert_eq!(function.to_string(), "<function :: 1 => 'x', 2 => 'x'>");
    }

    #[test]
    fn clones_share_calls_and_replicas_do_not() {
        let function = Function::new(1, vec![0u8, 1, 2]);
        let clone = function.clone();
        let output = clone.call("a");
        assert_eq!(function.to_string(), format!("<function :: \"a\" => {output}>"));
        assert_eq!(function.replicate().calls(), 0);
    }

    #[test]
    fn comparator_renders_its_calls() {
        let comparator = Comparator::new(3, 1);
        assert_eq!(comparator.compare(&1, &2), 0);
        assert!(!comparator.less(&"a", &"b"));
        assert_eq!(
            comparator.to_string(),
            "<function :: [\"a\",\"b\"] => false, [1,2] => 0>"
        );
    }
}
