use crate::{
    config::{self, Configuration, Verbosity},
    error::Error,
    generate::Generate,
    prove::Prove,
    shrink::{Shrink, Shrinkers},
    state::{self, Sizes, State, States},
    utility,
};
use core::{
    fmt,
    mem::replace,
    ops::{self, Deref, DerefMut},
    panic::AssertUnwindSafe,
    str::FromStr,
    time::Duration,
};
use machine::Machine;
use std::{borrow::Cow, error, panic::catch_unwind, result, time::Instant};
use tracing::{debug, trace};

/// Bounds the generation process.
#[derive(Clone, Debug)]
pub struct Generates {
    /// Seed for the random number generator used to generate random primitives.
    ///
    /// Defaults to a random value.
    pub seed: u64,
    /// Range of sizes that will be gradually traversed while generating values.
    ///
    /// Defaults to `0.0..=1.0`.
    pub sizes: Sizes,
    /// Maximum number of items that will be generated.
    ///
    /// Setting this to `0` will cause the [`Checks`] to do nothing.
    pub count: usize,
    /// Whether or not the [`Checks`] iterator will yield generation items.
    pub items: bool,
    /// When set, only the trial at `path.index` runs, and its value is walked
    /// down the recorded shrink positions before it is checked.
    pub path: Option<Path>,
}

/// Bounds the shrinking process.
#[derive(Clone, Debug)]
pub struct Shrinks {
    /// Maximum number of shrink candidates evaluated after a check has failed.
    ///
    /// Setting this to `0` will disable shrinking.
    pub count: usize,
    /// Whether or not the [`Checks`] iterator will yield candidates that passed.
    pub items: bool,
    /// Whether or not the [`Checks`] iterator will yield candidates that failed.
    pub errors: bool,
}

/// Holds a generator along with the parameters of a run.
#[derive(Clone, Debug)]
pub struct Checker<G: ?Sized> {
    /// Bounds the generation process.
    pub generate: Generates,
    /// Bounds the shrinking process.
    pub shrink: Shrinks,
    /// Checks that run longer than this fail with [`Cause::Timeout`].
    pub timeout: Option<Duration>,
    /// Controls the history kept by [`Checker::check`].
    pub verbosity: Verbosity,
    pub generator: G,
}

/// Iterates over the results of a run.
/// - The iterator starts in a generate phase where it generates items and
///   runs the check against them.
/// - If a check passes, a [`Result::Pass`] is produced.
/// - If a check fails, the iterator enters the shrinking phase.
/// - When shrinking, the iterator pulls the candidates of the current failing
///   item one by one, from the first to the last.
/// - If a candidate passes, a [`Result::Shrink`] is produced and the next
///   candidate is tried.
/// - If a candidate fails, a [`Result::Shrunk`] is produced with the item that
///   it replaces, and the candidate becomes the current item.
/// - When the candidates or the shrink budget run out, the iterator produces a
///   [`Result::Fail`] with the final item in it.
/// - A generation error or a fatal check failure produces a [`Result::Abort`]
///   right away, without shrinking.
pub struct Checks<F, M> {
    yields: (bool, bool, bool),
    timeout: Option<Duration>,
    check: F,
    machine: M,
}

pub trait Check: Generate {
    /// Creates a [`Checker`] configured with the global
    /// [`Configuration`](crate::config::Configuration) and its environment
    /// overrides.
    fn checker(self) -> Checker<Self>
    where
        Self: Sized,
    {
        Checker::with(self, &config::read_global().environment())
    }

    fn checks<P: Prove, F: FnMut(Self::Item) -> P>(self, check: F) -> Checks<F, Machine<Self, P>>
    where
        Self: Sized,
    {
        self.checker().checks(check)
    }

    fn check<P: Prove, F: FnMut(Self::Item) -> P>(&self, check: F) -> Report<Self::Item, P::Error>
    where
        Self::Item: fmt::Debug,
        P::Error: fmt::Debug,
    {
        self.checker().check(check)
    }

    /// Checks the property and panics with the rendered [`Report`] if it fails.
    #[track_caller]
    fn assert<P: Prove, F: FnMut(Self::Item) -> P>(&self, check: F)
    where
        Self::Item: fmt::Debug,
        P::Error: fmt::Debug,
    {
        self.check(check).assert();
    }
}

/// The trial index and the shrink positions leading to a value.
///
/// Each position is the zero-based index, among the candidates of the current
/// value, of the candidate that replaced it. Along with the seed of a run, a
/// path fully reconstructs a value. It renders as `index:i:j:...`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    pub index: usize,
    pub shrinks: Vec<usize>,
}

#[derive(Clone, Debug)]
pub enum Result<T, P: Prove> {
    /// An item was generated and passed the check.
    Pass(Pass<T, P::Proof>),
    /// An item was shrunk and passed the check, thus the shrinking is rejected.
    Shrink(Pass<T, P::Proof>),
    /// An item was shrunk and failed the check, thus the shrinking is accepted.
    /// Holds the item that was replaced.
    Shrunk(Fail<T, P::Error>),
    /// The last generated or shrunk item that failed the check.
    Fail(Fail<T, P::Error>),
    /// The run stopped on a fatal error.
    Abort(Abort),
}

#[derive(Clone, Debug)]
/// A structure that represents a passed check.
pub struct Pass<T, P> {
    pub item: T,
    pub proof: P,
    pub generates: usize,
    pub shrinks: usize,
    /// The generator state that produced the item.
    pub state: State,
}

#[derive(Clone, Debug)]
/// A structure that represents a failed check.
pub struct Fail<T, E> {
    pub item: T,
    pub cause: Cause<E>,
    pub path: Path,
    pub generates: usize,
    pub shrinks: usize,
    /// The generator state that caused the error.
    pub state: State,
}

/// A run stopped by a fatal [`Error`]. Aborted runs are never shrunk.
#[derive(Clone, Debug)]
pub struct Abort {
    pub error: Error,
    pub path: Path,
    pub generates: usize,
    pub shrinks: usize,
    pub state: State,
}

/// The cause of a check failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cause<E> {
    /// The check returned a value that does not satisfy the property.
    Disprove(E),
    /// The check panicked. The message associated with the panic is included if
    /// it can be casted to a string.
    Panic(Option<Cow<'static, str>>),
    /// The check took longer than the timeout. Checks are not interrupted; the
    /// duration is measured once they return.
    Timeout(Duration),
}

/// The summary of a run, as returned by [`Checker::check`].
#[derive(Clone, Debug)]
pub struct Report<T, E> {
    pub seed: u64,
    pub runs: usize,
    pub shrinks: usize,
    pub verbosity: Verbosity,
    pub outcome: Outcome<T, E>,
    /// The items met during the run, as selected by the verbosity.
    pub history: Vec<String>,
}

#[derive(Clone, Debug)]
pub enum Outcome<T, E> {
    Pass,
    Fail(Fail<T, E>),
    Abort(Abort),
}

enum Failure<E> {
    Cause(Cause<E>),
    Fatal(Error),
}

impl<G: Generate + ?Sized> Check for G {}

impl<G: Generate> Checker<G> {
    /// Creates a checker out of a configuration. A configuration without a seed
    /// gets a fresh random one.
    pub fn with(generator: G, configuration: &Configuration) -> Self {
        Self {
            generator,
            generate: Generates {
                items: true,
                count: configuration.count,
                seed: configuration.seed.unwrap_or_else(state::seed),
                sizes: configuration.sizes,
                path: None,
            },
            shrink: Shrinks {
                count: configuration.shrinks,
                items: true,
                errors: true,
            },
            timeout: configuration.timeout,
            verbosity: configuration.verbosity,
        }
    }

    /// Replays the value reached by `path` in the run seeded with `seed`, then
    /// keeps shrinking from there.
    pub fn replay(mut self, seed: u64, path: Path) -> Self {
        self.generate.seed = seed;
        self.generate.path = Some(path);
        self
    }

    pub fn checks<P: Prove, F: FnMut(G::Item) -> P>(self, check: F) -> Checks<F, Machine<G, P>> {
        let Generates {
            seed, sizes, count, ..
        } = self.generate;
        let states = States::new(count, sizes, seed);
        let machine = match self.generate.path {
            Some(path) if path.index >= count => Machine::Invalid {
                state: State::random(path.index, count, sizes, seed),
                path,
            },
            Some(Path { index, shrinks }) => Machine::Generate {
                shrinkers: Shrinkers::new(self.generator, states.only(index)),
                replay: Some(shrinks),
                shrinks: 0..self.shrink.count,
            },
            None => Machine::Generate {
                shrinkers: Shrinkers::new(self.generator, states),
                replay: None,
                shrinks: 0..self.shrink.count,
            },
        };
        Checks {
            yields: (self.generate.items, self.shrink.items, self.shrink.errors),
            timeout: self.timeout,
            machine,
            check,
        }
    }

    /// Runs the checks to completion and summarizes them in a [`Report`].
    ///
    /// Panics raised by `check` are caught and silenced while the run lasts.
    pub fn check<P: Prove, F: FnMut(G::Item) -> P>(mut self, check: F) -> Report<G::Item, P::Error>
    where
        G::Item: fmt::Debug,
        P::Error: fmt::Debug,
    {
        let verbosity = self.verbosity;
        self.generate.items = verbosity >= Verbosity::VeryVerbose;
        self.shrink.items = verbosity >= Verbosity::VeryVerbose;
        self.shrink.errors = verbosity >= Verbosity::Verbose;

        let mut report = Report {
            seed: self.generate.seed,
            runs: match &self.generate.path {
                Some(_) => 1,
                None => self.generate.count,
            },
            shrinks: 0,
            verbosity,
            outcome: Outcome::Pass,
            history: Vec::new(),
        };
        for result in self.checks(hook::silent(check)) {
            match result {
                Result::Pass(pass) => report
                    .history
                    .push(format!("PASS({}) {:?}", pass.generates, pass.item)),
                Result::Shrink(pass) => report
                    .history
                    .push(format!("SHRINK({}, PASS) {:?}", pass.shrinks, pass.item)),
                Result::Shrunk(fail) => report
                    .history
                    .push(format!("SHRUNK({}, FAIL) {:?}", fail.shrinks, fail.item)),
                Result::Fail(fail) => {
                    report.runs = fail.generates;
                    report.shrinks = fail.shrinks;
                    report.outcome = Outcome::Fail(fail);
                }
                Result::Abort(abort) => {
                    report.runs = abort.generates;
                    report.shrinks = abort.shrinks;
                    report.outcome = Outcome::Abort(abort);
                }
            }
        }
        report
    }
}

impl Path {
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            shrinks: Vec::new(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.index)?;
        for shrink in &self.shrinks {
            write!(f, ":{shrink}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(value: &str) -> result::Result<Self, Self::Err> {
        let invalid = || Error::Path(value.into());
        let mut parts = value.trim().split(':');
        let index = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid)?;
        let shrinks = parts
            .map(|part| part.parse().map_err(|_| invalid()))
            .collect::<result::Result<_, _>>()?;
        Ok(Self { index, shrinks })
    }
}

impl<T, P: Prove> Result<T, P> {
    pub const fn seed(&self) -> u64 {
        self.state().seed()
    }

    pub const fn generates(&self) -> usize {
        match self {
            Result::Pass(pass) | Result::Shrink(pass) => pass.generates,
            Result::Fail(fail) | Result::Shrunk(fail) => fail.generates,
            Result::Abort(abort) => abort.generates,
        }
    }

    pub const fn shrinks(&self) -> usize {
        match self {
            Result::Pass(pass) | Result::Shrink(pass) => pass.shrinks,
            Result::Fail(fail) | Result::Shrunk(fail) => fail.shrinks,
            Result::Abort(abort) => abort.shrinks,
        }
    }

    pub const fn state(&self) -> &State {
        match self {
            Result::Pass(pass) | Result::Shrink(pass) => &pass.state,
            Result::Fail(fail) | Result::Shrunk(fail) => &fail.state,
            Result::Abort(abort) => &abort.state,
        }
    }

    pub fn pass(self, shrink: bool) -> Option<Pass<T, P::Proof>> {
        match self {
            Result::Pass(pass) => Some(pass),
            Result::Shrink(pass) if shrink => Some(pass),
            _ => None,
        }
    }

    pub fn fail(self, shrunk: bool) -> Option<Fail<T, P::Error>> {
        match self {
            Result::Fail(fail) => Some(fail),
            Result::Shrunk(fail) if shrunk => Some(fail),
            _ => None,
        }
    }

    pub fn abort(self) -> Option<Abort> {
        match self {
            Result::Abort(abort) => Some(abort),
            _ => None,
        }
    }

    pub fn item(self) -> Option<T> {
        match self {
            Result::Pass(pass) | Result::Shrink(pass) => Some(pass.item),
            Result::Fail(fail) | Result::Shrunk(fail) => Some(fail.item),
            Result::Abort(_) => None,
        }
    }
}

impl<T, P> Pass<T, P> {
    pub const fn seed(&self) -> u64 {
        self.state.seed()
    }

    pub const fn size(&self) -> f64 {
        self.state.size()
    }
}

impl<T, E> Fail<T, E> {
    pub const fn seed(&self) -> u64 {
        self.state.seed()
    }

    pub const fn size(&self) -> f64 {
        self.state.size()
    }

    pub fn message(&self) -> Cow<'static, str>
    where
        E: fmt::Debug,
    {
        match &self.cause {
            Cause::Panic(Some(message)) => message.clone(),
            Cause::Panic(None) => "panicked".into(),
            Cause::Disprove(error) => format!("{error:?}").into(),
            Cause::Timeout(elapsed) => format!("timed out after {elapsed:?}").into(),
        }
    }
}

impl Abort {
    pub const fn seed(&self) -> u64 {
        self.state.seed()
    }
}

impl<T, E> Report<T, E> {
    /// Whether the run failed or aborted.
    pub const fn failed(&self) -> bool {
        !matches!(self.outcome, Outcome::Pass)
    }

    pub const fn fail(&self) -> Option<&Fail<T, E>> {
        match &self.outcome {
            Outcome::Fail(fail) => Some(fail),
            _ => None,
        }
    }

    pub const fn abort(&self) -> Option<&Abort> {
        match &self.outcome {
            Outcome::Abort(abort) => Some(abort),
            _ => None,
        }
    }

    /// The final, shrunk value that failed the check.
    pub fn counterexample(&self) -> Option<&T> {
        Some(&self.fail()?.item)
    }

    /// The path that reconstructs the failing value (or the value that aborted
    /// the run) along with [`Report::seed`].
    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::Pass => None,
            Outcome::Fail(fail) => Some(&fail.path),
            Outcome::Abort(abort) => Some(&abort.path),
        }
    }

    /// The fatal error that aborted the run.
    pub fn error(&self) -> Option<&Error> {
        Some(&self.abort()?.error)
    }
}

impl<T: fmt::Debug, E: fmt::Debug> Report<T, E> {
    /// Panics with the rendered report if the run failed or aborted.
    #[track_caller]
    pub fn assert(self) {
        if self.failed() {
            panic!("{self}");
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Display for Report<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self { seed, runs, shrinks, .. } = self;
        match &self.outcome {
            Outcome::Pass => write!(f, "PASS {{ seed: {seed}, runs: {runs} }}")?,
            Outcome::Fail(fail) => {
                writeln!(f, "FAIL {{ seed: {seed}, runs: {runs}, shrinks: {shrinks} }}")?;
                writeln!(f, "path: {}", fail.path)?;
                writeln!(f, "counterexample: {:?}", fail.item)?;
                write!(f, "cause: {}", fail.message())?;
            }
            Outcome::Abort(abort) => {
                writeln!(f, "ABORT {{ seed: {seed}, runs: {runs}, shrinks: {shrinks} }}")?;
                writeln!(f, "path: {}", abort.path)?;
                write!(f, "error: {}", abort.error)?;
            }
        }
        if !self.history.is_empty() {
            f.write_str("\nhistory:")?;
            for line in &self.history {
                write!(f, "\n  {line}")?;
            }
        }
        Ok(())
    }
}

impl<T, P> Deref for Pass<T, P> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.item
    }
}

impl<T, P> DerefMut for Pass<T, P> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.item
    }
}

impl<T, E> Deref for Fail<T, E> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.item
    }
}

impl<T, E> DerefMut for Fail<T, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.item
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Display for Fail<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<T: fmt::Debug, E: fmt::Debug> error::Error for Fail<T, E> {}

const fn pass<T, P: Prove>(item: T, state: State, proof: P::Proof) -> Result<T, P> {
    Result::Pass(Pass {
        item,
        generates: state.index() + 1,
        shrinks: 0,
        proof,
        state,
    })
}

const fn shrink<T, P: Prove>(item: T, shrinks: usize, state: State, proof: P::Proof) -> Result<T, P> {
    Result::Shrink(Pass {
        item,
        generates: state.index() + 1,
        shrinks,
        proof,
        state,
    })
}

const fn shrunk<T, P: Prove>(
    item: T,
    cause: Cause<P::Error>,
    path: Path,
    shrinks: usize,
    state: State,
) -> Result<T, P> {
    Result::Shrunk(Fail {
        item,
        generates: state.index() + 1,
        shrinks,
        path,
        state,
        cause,
    })
}

const fn fail<T, P: Prove>(
    item: T,
    cause: Cause<P::Error>,
    path: Path,
    shrinks: usize,
    state: State,
) -> Result<T, P> {
    Result::Fail(Fail {
        item,
        generates: state.index() + 1,
        shrinks,
        path,
        state,
        cause,
    })
}

const fn abort<T, P: Prove>(error: Error, path: Path, shrinks: usize, state: State) -> Result<T, P> {
    Result::Abort(Abort {
        error,
        generates: state.index() + 1,
        shrinks,
        path,
        state,
    })
}

/// Follows recorded shrink positions from `shrinker`.
fn walk<S: Shrink>(mut shrinker: S, path: &[usize]) -> Option<S> {
    for &position in path {
        let mut candidate = shrinker.shrink()?;
        for _ in 0..position {
            candidate = shrinker.shrink()?;
        }
        shrinker = candidate;
    }
    Some(shrinker)
}

fn handle<T, P: Prove, F: FnMut(T) -> P>(
    item: T,
    check: &mut F,
    timeout: Option<Duration>,
) -> result::Result<P::Proof, Failure<P::Error>> {
    let start = Instant::now();
    let result = catch_unwind(AssertUnwindSafe(move || check(item)));
    let elapsed = start.elapsed();
    match result {
        Ok(prove) => match prove.prove() {
            Ok(proof) => match timeout {
                Some(timeout) if elapsed > timeout => Err(Failure::Cause(Cause::Timeout(elapsed))),
                _ => Ok(proof),
            },
            Err(error) => match P::fatal(&error) {
                Some(error) => Err(Failure::Fatal(error)),
                None => Err(Failure::Cause(Cause::Disprove(error))),
            },
        },
        Err(payload) => match payload.downcast::<Error>() {
            Ok(error) if error.is_fatal() => Err(Failure::Fatal(*error)),
            Ok(error) => Err(Failure::Cause(Cause::Panic(Some(error.to_string().into())))),
            Err(payload) => Err(Failure::Cause(Cause::Panic(utility::cast(payload).ok()))),
        },
    }
}

pub(crate) mod machine {
    use super::*;

    pub enum Machine<G: Generate, P: Prove> {
        Generate {
            shrinkers: Shrinkers<G>,
            replay: Option<Vec<usize>>,
            shrinks: ops::Range<usize>,
        },
        Shrink {
            shrinker: G::Shrink,
            /// The number of candidates of `shrinker` already pulled.
            position: usize,
            path: Path,
            state: State,
            shrinks: ops::Range<usize>,
            cause: Cause<P::Error>,
        },
        /// A replay whose trial index is not part of the run.
        Invalid {
            path: Path,
            state: State,
        },
        Done,
    }

    impl<G: Generate, P: Prove, F: FnMut(G::Item) -> P> Iterator for Checks<F, Machine<G, P>> {
        type Item = Result<G::Item, P>;

        fn next(&mut self) -> Option<Self::Item> {
            loop {
                match replace(&mut self.machine, Machine::Done) {
                    Machine::Generate {
                        mut shrinkers,
                        replay,
                        shrinks,
                    } => {
                        let (state, shrinker) = shrinkers.next()?;
                        let mut path = Path::new(state.index());
                        let mut shrinker = match shrinker {
                            Ok(shrinker) => shrinker,
                            Err(error) => {
                                debug!(index = state.index(), %error, "generation aborted");
                                break Some(abort(error, path, 0, state));
                            }
                        };
                        if let Some(positions) = replay {
                            let node = walk(shrinker, &positions);
                            path.shrinks = positions;
                            shrinker = match node {
                                Some(node) => node,
                                None => {
                                    let error = Error::Path(path.to_string());
                                    debug!(%error, "replay aborted");
                                    break Some(abort(error, path, 0, state));
                                }
                            };
                        }
                        match handle(shrinker.item(), &mut self.check, self.timeout) {
                            Ok(proof) => {
                                self.machine = Machine::Generate {
                                    shrinkers,
                                    replay: None,
                                    shrinks,
                                };
                                if self.yields.0 {
                                    break Some(pass(shrinker.item(), state, proof));
                                }
                            }
                            Err(Failure::Cause(cause)) => {
                                debug!(index = state.index(), seed = state.seed(), "check failed");
                                self.machine = Machine::Shrink {
                                    shrinker,
                                    position: 0,
                                    path,
                                    state,
                                    shrinks,
                                    cause,
                                };
                            }
                            Err(Failure::Fatal(error)) => {
                                debug!(index = state.index(), %error, "check aborted");
                                break Some(abort(error, path, 0, state));
                            }
                        }
                    }
                    Machine::Shrink {
                        mut shrinker,
                        position,
                        mut path,
                        state,
                        mut shrinks,
                        cause,
                    } => {
                        let done = shrinks.start;
                        let Some(candidate) = shrinks.next().and_then(|_| shrinker.shrink()) else {
                            debug!(shrinks = done, %path, "shrinking ended");
                            break Some(fail(shrinker.item(), cause, path, done, state));
                        };
                        let count = shrinks.start;
                        trace!(shrinks = count, position, "shrink candidate");
                        match handle(candidate.item(), &mut self.check, self.timeout) {
                            Ok(proof) => {
                                self.machine = Machine::Shrink {
                                    shrinker,
                                    position: position + 1,
                                    path,
                                    state: state.clone(),
                                    shrinks,
                                    cause,
                                };
                                if self.yields.1 {
                                    break Some(shrink(candidate.item(), count, state, proof));
                                }
                            }
                            Err(Failure::Cause(new)) => {
                                let old = path.clone();
                                path.shrinks.push(position);
                                self.machine = Machine::Shrink {
                                    shrinker: candidate,
                                    position: 0,
                                    path,
                                    state: state.clone(),
                                    shrinks,
                                    cause: new,
                                };
                                if self.yields.2 {
                                    break Some(shrunk(shrinker.item(), cause, old, count, state));
                                }
                            }
                            Err(Failure::Fatal(error)) => {
                                path.shrinks.push(position);
                                debug!(%error, %path, "check aborted while shrinking");
                                break Some(abort(error, path, count, state));
                            }
                        }
                    }
                    Machine::Invalid { path, state } => {
                        let error = Error::Path(path.to_string());
                        debug!(%error, "replay aborted");
                        break Some(abort(error, path, 0, state));
                    }
                    Machine::Done => break None,
                }
            }
        }
    }
}

mod hook {
    use core::cell::Cell;
    use std::{panic, sync::Once};

    thread_local! { static SILENT: Cell<bool> = const { Cell::new(false) }; }
    static INSTALL: Once = Once::new();

    /// Restores the silence of the current thread, even when unwinding.
    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            SILENT.set(self.0);
        }
    }

    /// Chains a hook in front of the panic hook in place at the first check of
    /// the process. It is never removed, such that concurrent checks on other
    /// threads keep reporting their own panics.
    fn install() {
        INSTALL.call_once(|| {
            let hook = panic::take_hook();
            panic::set_hook(Box::new(move |panic| {
                if !SILENT.try_with(Cell::get).unwrap_or(false) {
                    hook(panic);
                }
            }));
        });
    }

    /// Wraps `function` such that the panics it raises on the calling thread are
    /// not reported. A hook set after the first check replaces this one.
    pub fn silent<I, O>(mut function: impl FnMut(I) -> O) -> impl FnMut(I) -> O {
        install();
        move |input| {
            let _restore = Restore(SILENT.replace(true));
            function(input)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::{panic::AssertUnwindSafe, thread};

        #[test]
        fn silence_is_restored_after_a_panic() {
            let mut silent = silent(|()| panic!("silenced"));
            assert!(panic::catch_unwind(AssertUnwindSafe(|| silent(()))).is_err());
            assert!(!SILENT.get());
        }

        #[test]
        fn silence_does_not_cross_threads() {
            let mut silent = silent(|()| {
                assert!(SILENT.get());
                thread::spawn(|| SILENT.get()).join()
            });
            assert_eq!(silent(()).ok(), Some(false));
            assert!(!SILENT.get());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_render_and_parse() {
        let path = Path {
            index: 12,
            shrinks: vec![0, 3, 1],
        };
        assert_eq!(path.to_string(), "12:0:3:1");
        assert_eq!("12:0:3:1".parse::<Path>(), Ok(path));
        assert_eq!("7".parse::<Path>(), Ok(Path::new(7)));
    }

    #[test]
    fn malformed_paths_are_rejected() {
        for path in ["", "a", "1:b", "1::2", "-1:0"] {
            assert_eq!(path.parse::<Path>(), Err(Error::Path(path.into())));
        }
    }

    #[test]
    fn walk_follows_positions() {
        let shrinker = crate::primitive::Shrinker::new(0u32, 1000, 73);
        // Candidates of 73 are [0, 36, 54, 63, 68, 70, 71, 72]; those of 54 start with [45, 50].
        let node = walk(shrinker.clone(), &[2, 1]).unwrap();
        assert_eq!(node.item(), 50);
        assert!(walk(shrinker, &[8]).is_none());
    }
}
