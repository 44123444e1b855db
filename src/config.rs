//! Run parameters, along with a process-wide default and its environment overrides.
//!
//! A [`Configuration`] is consumed once when a [`Checker`](crate::check::Checker)
//! is built. The global default is only read at that boundary.
use crate::{state::Sizes, GENERATES, SHRINKS};
use core::{str::FromStr, time::Duration};
use std::{
    env,
    sync::{PoisonError, RwLock},
};
use thiserror::Error;

/// How much of the search is kept in a [`Report`](crate::check::Report).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verbosity {
    /// Only the outcome.
    #[default]
    Quiet,
    /// The failing values met while shrinking.
    Verbose,
    /// Every value that was checked.
    VeryVerbose,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Number of trials of a run.
    ///
    /// Defaults to [`GENERATES`].
    pub count: usize,
    /// Seed of a run. `None` draws a fresh one for every run.
    pub seed: Option<u64>,
    /// Range of sizes that will be gradually traversed across trials.
    pub sizes: Sizes,
    /// Maximum number of shrink candidates evaluated after a failure.
    ///
    /// Setting this to `0` disables shrinking.
    pub shrinks: usize,
    /// A trial whose predicate takes longer than this fails with
    /// [`Cause::Timeout`](crate::check::Cause::Timeout).
    pub timeout: Option<Duration>,
    pub verbosity: Verbosity,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid verbosity `{0}`")]
pub struct ParseVerbosityError(String);

static GLOBAL: RwLock<Configuration> = RwLock::new(Configuration::DEFAULT);

impl Configuration {
    pub const DEFAULT: Self = Self {
        count: GENERATES,
        seed: None,
        sizes: Sizes::DEFAULT,
        shrinks: SHRINKS,
        timeout: None,
        verbosity: Verbosity::Quiet,
    };

    /// Applies the `FALSIFY_*` environment variables on top of `self`.
    ///
    /// Unset or unparsable variables leave their field untouched.
    pub fn environment(mut self) -> Self {
        if let Some(value) = parse("FALSIFY_GENERATE_COUNT") {
            self.count = value;
        }
        if let Some(value) = parse("FALSIFY_GENERATE_SEED") {
            self.seed = Some(value);
        }
        if let Some(value) = parse::<f64>("FALSIFY_GENERATE_SIZE").filter(|value| value.is_finite()) {
            let value = value.clamp(0.0, 1.0);
            self.sizes = (value..=value).into();
        }
        if let Some(value) = parse("FALSIFY_SHRINK_COUNT") {
            self.shrinks = value;
        }
        if let Some(value) = parse("FALSIFY_VERBOSITY") {
            self.verbosity = value;
        }
        if let Some(value) = parse("FALSIFY_TIMEOUT_MS") {
            self.timeout = Some(Duration::from_millis(value));
        }
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Verbosity {
    type Err = ParseVerbosityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "0" | "quiet" => Ok(Verbosity::Quiet),
            "1" | "verbose" => Ok(Verbosity::Verbose),
            "2" | "very-verbose" | "very_verbose" => Ok(Verbosity::VeryVerbose),
            _ => Err(ParseVerbosityError(value.into())),
        }
    }
}

/// Replaces the process-wide default configuration.
pub fn configure_global(configuration: Configuration) {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = configuration;
}

/// Reads the process-wide default configuration.
pub fn read_global() -> Configuration {
    GLOBAL.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Restores the process-wide default configuration to [`Configuration::DEFAULT`].
pub fn reset_global() {
    configure_global(Configuration::DEFAULT);
}

fn parse<T: FromStr>(key: &str) -> Option<T> {
    match env::var(key) {
        Ok(value) => value.parse().ok(),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_parses_names_and_levels() {
        assert_eq!("2".parse(), Ok(Verbosity::VeryVerbose));
        assert_eq!(" Verbose ".parse(), Ok(Verbosity::Verbose));
        assert_eq!("quiet".parse(), Ok(Verbosity::Quiet));
        assert!("loud".parse::<Verbosity>().is_err());
    }
}
