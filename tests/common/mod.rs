#![allow(dead_code)]

pub use falsify::{check::Cause, *};
use std::{error, result};

pub type Result = result::Result<(), Box<dyn error::Error>>;
pub const COUNT: usize = 1000;

/// A checker with a fixed seed and trial count, independent of the environment.
pub fn checker<G: Generate>(generator: G, seed: u64) -> check::Checker<G> {
    let configuration = config::Configuration {
        count: COUNT,
        seed: Some(seed),
        ..config::Configuration::DEFAULT
    };
    check::Checker::with(generator, &configuration)
}

/// Prints the events of the engine, filtered by `RUST_LOG`.
pub fn trace() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
