use crate::{
    error::Error,
    generate::Generate,
    state::{State, States},
};
use core::iter;

/// A node of a shrink tree: a generated value along with the lazy sequence of
/// its smaller candidates.
///
/// When a property fails, the runner walks the candidates of the failing node
/// to find a smaller value that still fails. Each call to [`Shrink::shrink`]
/// produces the next sibling candidate and advances `self` past it; `None` ends
/// the sequence. Cloning a node restarts the walk from the clone's position.
///
/// Candidates must be strictly smaller than their parent under the order of the
/// generator, which guarantees that the search terminates.
///
/// # Examples
///
/// A shrinker for a `Point` that halves `x`, then `y`:
///
/// ```
/// # use falsify::*;
/// #[derive(Clone, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Shrink for Point {
///     type Item = Self;
///
///     fn item(&self) -> Self::Item {
///         self.clone()
///     }
///
///     fn shrink(&mut self) -> Option<Self> {
///         if self.x != 0 {
///             self.x /= 2;
///             return Some(self.clone());
///         }
///         if self.y != 0 {
///             self.y /= 2;
///             return Some(self.clone());
///         }
///         None
///     }
/// }
/// ```
pub trait Shrink: Clone {
    /// The type of the value that this shrinker produces.
    type Item;
    /// Builds a fresh value out of the current node.
    fn item(&self) -> Self::Item;
    /// Produces the next, smaller sibling candidate.
    fn shrink(&mut self) -> Option<Self>;
}

/// Generates the shrink nodes of every trial of a run.
#[derive(Debug, Clone)]
pub struct Shrinkers<G: ?Sized> {
    states: States,
    generator: G,
}

impl<G: Generate> Shrinkers<G> {
    pub(crate) fn new(generator: G, states: States) -> Self {
        Shrinkers { generator, states }
    }
}

impl<G: Generate + ?Sized> Shrinkers<G> {
    fn generate(&self, mut state: State) -> (State, Result<G::Shrink, Error>) {
        let shrinker = self.generator.generate(&mut state);
        (state, shrinker)
    }
}

impl<G: Generate + ?Sized> Iterator for Shrinkers<G> {
    type Item = (State, Result<G::Shrink, Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.states.next()?;
        Some(self.generate(state))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.states.size_hint()
    }

    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.states.count()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let state = self.states.nth(n)?;
        Some(self.generate(state))
    }
}

impl<G: Generate + ?Sized> DoubleEndedIterator for Shrinkers<G> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let state = self.states.next_back()?;
        Some(self.generate(state))
    }
}

impl<G: Generate + ?Sized> ExactSizeIterator for Shrinkers<G> {
    fn len(&self) -> usize {
        self.states.len()
    }
}

impl<G: Generate + ?Sized> iter::FusedIterator for Shrinkers<G> {}
