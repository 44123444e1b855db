use thiserror::Error;

/// Errors raised by the engine itself, as opposed to failures of a checked property.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A constrained generator could not produce a conforming value.
    #[error("generation exhausted after {retries} retries")]
    Exhausted { retries: usize },
    /// Completion was demanded while work could never be released.
    #[error("scheduler deadlocked with {} blocked task(s): {pending:?}", pending.len())]
    Deadlock { pending: Vec<String> },
    /// The real system and its model disagreed.
    #[error("model diverged at step {step} on `{command}`: expected {expected}, found {actual}")]
    Mismatch {
        step: usize,
        command: String,
        expected: String,
        actual: String,
    },
    #[error("invalid replay path `{0}`")]
    Path(String),
}

impl Error {
    /// Fatal errors abort a run as-is. They are reported but never shrunk.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Error::Exhausted { .. } | Error::Deadlock { .. })
    }
}
