//! Generates values without checking anything and without shrinking.
use crate::{
    config::{self, Configuration},
    error::Error,
    generate::Generate,
    shrink::Shrink,
    state::{self, Sizes, State, States},
    SAMPLES,
};

/// Draws values from the same trial states that a [`Checker`](crate::check::Checker)
/// with the same seed and sizes would go through.
#[derive(Debug, Clone)]
pub struct Sampler<G: ?Sized> {
    pub seed: u64,
    pub sizes: Sizes,
    /// Defaults to [`SAMPLES`].
    pub count: usize,
    pub generator: G,
}

/// An iterator over sampled values.
///
/// A sample is an `Err` when the generator could not produce a value, for
/// example when a [`Generate::filter`] ran out of retries.
#[derive(Debug, Clone)]
pub struct Samples<G> {
    generator: G,
    states: States,
}

pub trait Sample: Generate {
    /// A [`Sampler`] seeded and sized by the global [`Configuration`] and its
    /// environment variables, like [`Check::checker`](crate::check::Check::checker).
    fn sampler(self) -> Sampler<Self>
    where
        Self: Sized,
    {
        Sampler::with(self, &config::read_global().environment())
    }

    /// Generates `count` values of progressively larger sizes.
    fn samples(self, count: usize) -> Samples<Self>
    where
        Self: Sized,
    {
        let mut sampler = self.sampler();
        sampler.count = count;
        sampler.samples()
    }

    /// Generates a single value of a specific `size` in `0.0..=1.0`.
    fn sample(&self, size: f64) -> Result<Self::Item, Error> {
        self.sampler().sample(size)
    }
}

impl<G: Generate + ?Sized> Sample for G {}

impl<G> Sampler<G> {
    pub fn with(generator: G, configuration: &Configuration) -> Self {
        Self {
            seed: configuration.seed.unwrap_or_else(state::seed),
            sizes: configuration.sizes,
            count: SAMPLES,
            generator,
        }
    }
}

impl<G: Generate + ?Sized> Sampler<G> {
    pub fn sample(&self, size: f64) -> Result<G::Item, Error> {
        let mut state = State::random(0, 1, size.into(), self.seed);
        Ok(self.generator.generate(&mut state)?.item())
    }
}

impl<G: Generate> Sampler<G> {
    pub fn samples(self) -> Samples<G> {
        Samples {
            states: States::new(self.count, self.sizes, self.seed),
            generator: self.generator,
        }
    }
}

impl<G: Generate> Iterator for Samples<G> {
    type Item = Result<G::Item, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut state = self.states.next()?;
        Some(self.generator.generate(&mut state).map(|shrinker| shrinker.item()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.states.size_hint()
    }
}
