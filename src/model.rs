//! Checks a system against a simpler model of it.
//!
//! A [`Model`] describes a reference state, the real system under test, and
//! commands that can be applied to both. Command sequences are generated such
//! that every command's precondition holds against the model at generation
//! time. Running a sequence replays it against a fresh system and a fresh
//! model and compares their outcomes after every step.
//!
//! ```
//! # use falsify::*;
//! use falsify::model::{self, Model};
//!
//! struct Stack;
//!
//! #[derive(Clone, Debug)]
//! enum Command {
//!     Push(u8),
//!     Pop,
//! }
//!
//! impl Model for Stack {
//!     type State = Vec<u8>;
//!     type System = Vec<u8>;
//!     type Command = Command;
//!     type Outcome = Option<u8>;
//!
//!     fn state(&self) -> Self::State {
//!         Vec::new()
//!     }
//!
//!     fn system(&self) -> Self::System {
//!         Vec::new()
//!     }
//!
//!     fn apply(&self, state: &mut Self::State, command: &Command) -> Self::Outcome {
//!         match command {
//!             Command::Push(value) => { state.push(*value); None }
//!             Command::Pop => state.pop(),
//!         }
//!     }
//!
//!     fn run(&self, system: &mut Self::System, command: &Command) -> Self::Outcome {
//!         self.apply(system, command)
//!     }
//! }
//!
//! let pool = unify::<_, Command>(any((
//!     Generate::map(0u8..10, Command::Push),
//!     same(Command::Pop),
//! )));
//! model::commands(Stack, pool, ..=20usize)
//!     .check(|commands| model::run(&Stack, &commands))
//!     .assert();
//! ```
use crate::{
    collect::{Count, Shrinker},
    error::Error,
    generate::Generate,
    shrink::Shrink,
    state::State,
    RETRIES,
};
use core::fmt::Debug;
use tracing::trace;
#[cfg(feature = "asynchronous")]
use crate::scheduler::Scheduler;
#[cfg(feature = "asynchronous")]
use core::{future::Future, pin::Pin};

pub trait Model {
    type State: Clone;
    type System;
    type Command: Clone + Debug;
    type Outcome: PartialEq + Debug;

    /// The initial model state.
    fn state(&self) -> Self::State;
    /// A fresh system to run commands against.
    fn system(&self) -> Self::System;

    /// The precondition of `command` in `state`. Commands whose precondition
    /// does not hold are never generated and are skipped when running.
    fn check(&self, _state: &Self::State, _command: &Self::Command) -> bool {
        true
    }

    /// Applies `command` to the model and returns the expected outcome.
    fn apply(&self, state: &mut Self::State, command: &Self::Command) -> Self::Outcome;
    /// Runs `command` against the system and returns its actual outcome.
    fn run(&self, system: &mut Self::System, command: &Self::Command) -> Self::Outcome;
}

/// A non-`Send` boxed future that may borrow from its environment.
#[cfg(feature = "asynchronous")]
pub type BoxedLocal<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A [`Model`] whose system runs commands asynchronously.
#[cfg(feature = "asynchronous")]
pub trait Asynchronous: Model {
    /// Runs `command` against the system. The future may suspend on work
    /// scheduled with `scheduler`.
    fn run_asynchronous<'a>(
        &'a self,
        system: &'a Self::System,
        command: &'a Self::Command,
        scheduler: &'a Scheduler,
    ) -> BoxedLocal<'a, Self::Outcome>;
}

/// Generates sequences of commands whose preconditions hold in order.
#[derive(Clone, Debug)]
pub struct Commands<M, G, C> {
    model: M,
    pool: G,
    count: C,
}

/// Generates command sequences for `model`, drawing each command from `pool`.
///
/// Candidates whose precondition does not hold are discarded; generation fails
/// with [`Error::Exhausted`] after [`RETRIES`] discards. Checking a precondition
/// reads the candidate once, like [`Generate::filter`] does. Sequences shrink
/// like collections: first by removing commands, then by shrinking the
/// remaining ones.
pub const fn commands<M: Model, G: Generate<Item = M::Command>, C: Count>(
    model: M,
    pool: G,
    count: C,
) -> Commands<M, G, C> {
    Commands { model, pool, count }
}

impl<M: Model, G: Generate<Item = M::Command>, C: Count> Generate for Commands<M, G, C> {
    type Item = Vec<M::Command>;
    type Shrink = Shrinker<G::Shrink, Vec<M::Command>>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        let range = self.count.count();
        let count = state.usize(range);
        let mut model = self.model.state();
        let mut shrinkers = Vec::with_capacity(count);
        let mut discards = 0;
        while shrinkers.len() < count {
            let shrinker = self.pool.generate(state)?;
            let command = shrinker.item();
            if self.model.check(&model, &command) {
                self.model.apply(&mut model, &command);
                shrinkers.push(shrinker);
            } else if discards < RETRIES {
                discards += 1;
            } else {
                return Err(Error::Exhausted { retries: RETRIES });
            }
        }
        Ok(Shrinker::new(shrinkers, range.start()))
    }
}

/// Runs `commands` against a fresh system and a fresh model, in order.
///
/// Commands whose precondition no longer holds (which happens once a sequence
/// was shrunk) are skipped. Fails with [`Error::Mismatch`] on the first step
/// where the outcomes differ.
pub fn run<M: Model>(model: &M, commands: &[M::Command]) -> Result<(), Error> {
    let mut state = model.state();
    let mut system = model.system();
    for (step, command) in commands.iter().enumerate() {
        if !model.check(&state, command) {
            trace!(step, ?command, "command skipped");
            continue;
        }
        let expected = model.apply(&mut state, command);
        let actual = model.run(&mut system, command);
        compare(step, command, expected, actual)?;
    }
    Ok(())
}

/// Runs `commands` like [`run`], through `scheduler`.
///
/// Each command starts as a scheduled task, such that the interleaving chosen
/// by `scheduler` is part of the checked value. Fails with
/// [`Error::Deadlock`] if a command can never complete.
#[cfg(feature = "asynchronous")]
pub fn run_asynchronous<M: Asynchronous>(
    model: &M,
    commands: &[M::Command],
    scheduler: &Scheduler,
) -> Result<(), Error> {
    let mut state = model.state();
    let system = model.system();
    for (step, command) in commands.iter().enumerate() {
        if !model.check(&state, command) {
            trace!(step, ?command, "command skipped");
            continue;
        }
        let expected = model.apply(&mut state, command);
        let running = model.run_asynchronous(&system, command, scheduler);
        let actual = scheduler.wait_for(scheduler.schedule_labeled(format!("{command:?}"), running))?;
        compare(step, command, expected, actual)?;
    }
    Ok(())
}

fn compare<C: Debug, O: PartialEq + Debug>(
    step: usize,
    command: &C,
    expected: O,
    actual: O,
) -> Result<(), Error> {
    trace!(step, ?command, ?expected, ?actual, "model step");
    if expected == actual {
        Ok(())
    } else {
        Err(Error::Mismatch {
            step,
            command: format!("{command:?}"),
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Sizes;

    struct Even;

    impl Model for Even {
        type State = u32;
        type System = u32;
        type Command = u32;
        type Outcome = u32;

        fn state(&self) -> Self::State {
            0
        }

        fn system(&self) -> Self::System {
            0
        }

        fn check(&self, state: &Self::State, command: &Self::Command) -> bool {
            (state + command) % 2 == 0
        }

        fn apply(&self, state: &mut Self::State, command: &Self::Command) -> Self::Outcome {
            *state += command;
            *state
        }

        fn run(&self, system: &mut Self::System, command: &Self::Command) -> Self::Outcome {
            self.apply(system, command)
        }
    }

    #[test]
    fn generated_commands_hold_their_preconditions() {
        let generator = commands(Even, 0u32..100, 5usize);
        for index in 0..50 {
            let mut state = State::random(index, 50, Sizes::DEFAULT, 6);
            let commands = generator.generate(&mut state).unwrap().item();
            assert_eq!(commands.len(), 5);
            let mut total = 0;
            for command in commands {
                assert!(Even.check(&total, &command));
                total += command;
            }
        }
    }

    #[test]
    fn impossible_preconditions_exhaust() {
        let generator = commands(Even, 1u32..=1, 1usize);
        let mut state = State::random(0, 1, Sizes::DEFAULT, 6);
        assert_eq!(
            generator.generate(&mut state).err(),
            Some(Error::Exhausted { retries: RETRIES })
        );
    }

    #[test]
    fn invalid_commands_are_skipped() {
        assert_eq!(run(&Even, &[2, 1, 4]), Ok(()));
    }
}
