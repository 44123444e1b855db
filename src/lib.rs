#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod all;
pub mod any;
pub mod array;
pub mod boxed;
pub mod check;
pub mod collect;
pub mod config;
pub mod dampen;
pub mod dedup;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod function;
pub mod generate;
pub mod host;
pub mod keep;
pub mod lazy;
pub mod map;
pub mod model;
mod prelude;
pub mod primitive;
pub mod prove;
pub mod random;
pub mod replicate;
pub mod same;
pub mod sample;
#[cfg(feature = "asynchronous")]
pub mod scheduler;
pub mod share;
pub mod shrink;
pub mod size;
pub mod state;
pub mod unify;
mod utility;

pub use crate::{
    check::Check,
    error::Error,
    generate::{FullGenerate, Generate},
    prelude::*,
    prove::Prove,
    replicate::Replicate,
    sample::Sample,
    shrink::Shrink,
};

/// Default number of trials of a run.
pub const GENERATES: usize = 1024;
/// Default maximum number of shrink candidates evaluated after a failure.
pub const SHRINKS: usize = 1 << 20;
/// Default number of values produced by [`Sample::samples`].
pub const SAMPLES: usize = 128;
/// Default maximum length of a collection.
pub const COLLECTS: usize = 1024;
/// Default number of rejections tolerated by constrained generators.
pub const RETRIES: usize = 256;
