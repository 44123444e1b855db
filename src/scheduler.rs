//! A cooperative scheduler whose release order is itself a generated value.
//!
//! Work registered with [`Scheduler::schedule`] stays suspended until the
//! scheduler releases it. At each release, the next generated choice picks a
//! task among the pending ones, such that a property involving concurrent
//! futures explores (and shrinks) their interleavings.
//!
//! ```
//! # use falsify::*;
//! use core::cell::Cell;
//! use futures_lite::future::zip;
//!
//! let report = scheduler::scheduler().check(|scheduler| {
//!     let counter = Cell::new(0);
//!     let (scheduler, counter) = (&scheduler, &counter);
//!     let increment = move || async move {
//!         let value = scheduler.schedule(async move { counter.get() }).await;
//!         scheduler.schedule(async {}).await;
//!         counter.set(value + 1);
//!     };
//!     scheduler.wait_for(zip(increment(), increment())).unwrap();
//!     counter.get() == 2
//! });
//! assert!(report.failed());
//! ```
use crate::{
    error::Error, generate::Generate, prelude::positive, replicate::Replicate, share::Share,
};
use core::{
    cell::RefCell,
    fmt,
    future::Future,
    mem::take,
    pin::{pin, Pin},
    task::{Context, Poll, Waker},
};
use futures_lite::future::{block_on, poll_once};
use std::{
    collections::BTreeSet,
    rc::{Rc, Weak},
};
use tracing::trace;

type Root = (String, Pin<Box<dyn Future<Output = ()>>>);

/// A handle to a scheduler.
///
/// Clones share the same scheduler. Use [`Replicate::replicate`] to get an
/// independent one with the same choices.
#[derive(Clone)]
pub struct Scheduler(Rc<RefCell<Inner>>);

/// A future that stays pending until its [`Scheduler`] releases it, after
/// which it completes its inner future.
#[must_use = "futures do nothing unless polled"]
pub struct Scheduled<F> {
    scheduler: Weak<RefCell<Inner>>,
    id: usize,
    future: Pin<Box<F>>,
}

#[derive(Debug)]
struct Task {
    id: usize,
    label: String,
    waker: Option<Waker>,
}

struct Inner {
    choices: Vec<usize>,
    step: usize,
    next: usize,
    pending: Vec<Task>,
    released: BTreeSet<usize>,
    resolved: Vec<String>,
    roots: Vec<Root>,
}

impl Scheduler {
    pub fn new(choices: Vec<usize>) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            choices,
            step: 0,
            next: 0,
            pending: Vec::new(),
            released: BTreeSet::new(),
            resolved: Vec::new(),
            roots: Vec::new(),
        })))
    }

    pub fn choices(&self) -> Vec<usize> {
        self.0.borrow().choices.clone()
    }

    /// Registers `future` as a pending task labeled by its registration order.
    pub fn schedule<F: Future>(&self, future: F) -> Scheduled<F> {
        let label = format!("task {}", self.0.borrow().next);
        self.schedule_labeled(label, future)
    }

    pub fn schedule_labeled<F: Future>(&self, label: impl Into<String>, future: F) -> Scheduled<F> {
        let mut inner = self.0.borrow_mut();
        let id = inner.next;
        inner.next += 1;
        inner.pending.push(Task {
            id,
            label: label.into(),
            waker: None,
        });
        Scheduled {
            scheduler: Rc::downgrade(&self.0),
            id,
            future: Box::pin(future),
        }
    }

    /// Registers a root future that the scheduler drives whenever it waits.
    pub fn spawn(&self, future: impl Future<Output = ()> + 'static) {
        let mut inner = self.0.borrow_mut();
        let label = format!("root {}", inner.next);
        inner.next += 1;
        inner.roots.push((label, Box::pin(future)));
    }

    /// Drives the roots until they are all blocked, then releases one pending
    /// task.
    ///
    /// At step `k`, the task at `choices[k] % pending.len()` is chosen. Once the
    /// choices run out, the oldest pending task is chosen. Returns the label of
    /// the released task or `None` if nothing was pending.
    pub fn wait_one(&self) -> Option<String> {
        self.drive();
        let task = {
            let mut inner = self.0.borrow_mut();
            if inner.pending.is_empty() {
                return None;
            }
            let choice = inner.choices.get(inner.step).copied().unwrap_or(0);
            let index = choice % inner.pending.len();
            inner.step += 1;
            let task = inner.pending.remove(index);
            inner.released.insert(task.id);
            inner.resolved.push(task.label.clone());
            task
        };
        trace!(label = %task.label, "task released");
        if let Some(waker) = task.waker {
            waker.wake();
        }
        self.drive();
        Some(task.label)
    }

    /// Releases pending tasks until none remain.
    ///
    /// Fails with [`Error::Deadlock`] if some roots are still blocked when
    /// nothing is left to release.
    pub fn wait_all(&self) -> Result<(), Error> {
        while self.wait_one().is_some() {}
        if self.0.borrow().roots.is_empty() {
            Ok(())
        } else {
            Err(self.deadlock(None))
        }
    }

    /// Drives `future` to completion, releasing pending tasks whenever it is
    /// blocked.
    ///
    /// Fails with [`Error::Deadlock`] if `future` is still blocked when
    /// nothing is left to release.
    pub fn wait_for<F: Future>(&self, future: F) -> Result<F::Output, Error> {
        let mut future = pin!(future);
        loop {
            self.drive();
            if let Some(output) = block_on(poll_once(future.as_mut())) {
                return Ok(output);
            }
            if self.wait_one().is_none() {
                return match block_on(poll_once(future.as_mut())) {
                    Some(output) => Ok(output),
                    None => Err(self.deadlock(Some("main"))),
                };
            }
        }
    }

    /// The labels of the released tasks, in release order.
    pub fn resolved(&self) -> Vec<String> {
        self.0.borrow().resolved.clone()
    }

    /// The labels of the tasks still waiting for release, oldest first.
    pub fn pending(&self) -> Vec<String> {
        let inner = self.0.borrow();
        inner.pending.iter().map(|task| task.label.clone()).collect()
    }

    fn drive(&self) {
        loop {
            let mut roots = take(&mut self.0.borrow_mut().roots);
            if roots.is_empty() {
                return;
            }
            roots.retain_mut(|(_, root)| block_on(poll_once(root.as_mut())).is_none());
            let mut inner = self.0.borrow_mut();
            let spawned = !inner.roots.is_empty();
            roots.append(&mut inner.roots);
            inner.roots = roots;
            if !spawned {
                return;
            }
        }
    }

    fn deadlock(&self, blocked: Option<&str>) -> Error {
        let (roots, mut pending) = {
            let mut inner = self.0.borrow_mut();
            let roots = take(&mut inner.roots);
            let pending = inner
                .pending
                .iter()
                .map(|task| task.label.clone())
                .collect::<Vec<_>>();
            (roots, pending)
        };
        pending.extend(roots.iter().map(|(label, _)| label.clone()));
        pending.extend(blocked.map(String::from));
        // Blocked roots may hold handles to the scheduler; dropping them outside
        // of the borrow releases those.
        drop(roots);
        Error::Deadlock { pending }
    }
}

impl<F: Future> Future for Scheduled<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        {
            let Some(scheduler) = this.scheduler.upgrade() else {
                return Poll::Pending;
            };
            let mut inner = scheduler.borrow_mut();
            if !inner.released.contains(&this.id) {
                if let Some(task) = inner.pending.iter_mut().find(|task| task.id == this.id) {
                    task.waker = Some(context.waker().clone());
                }
                return Poll::Pending;
            }
        }
        this.future.as_mut().poll(context)
    }
}

impl<F> Drop for Scheduled<F> {
    fn drop(&mut self) {
        if let Some(scheduler) = self.scheduler.upgrade() {
            if let Ok(mut inner) = scheduler.try_borrow_mut() {
                inner.pending.retain(|task| task.id != self.id);
                inner.released.remove(&self.id);
            }
        }
    }
}

impl Replicate for Scheduler {
    const HOOK: bool = true;

    fn replicate(&self) -> Self {
        Self::new(self.choices())
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        write!(f, "<scheduler :: {:?} => {:?}>", inner.choices, inner.resolved)
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Generates schedulers. Their choices shrink toward fewer and smaller ones,
/// which moves the release order toward first-in first-out.
///
/// A scheduler reported as a counterexample shows the releases that the failing
/// check went through.
pub fn scheduler() -> impl Generate<Item = Scheduler> {
    Share(
        positive::<usize>()
            .collect_with::<_, Vec<_>>(0..=64usize)
            .map(Scheduler::new),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn releases_follow_choices() {
        let scheduler = Scheduler::new(vec![1, 5]);
        let _a = scheduler.schedule_labeled("a", async {});
        let _b = scheduler.schedule_labeled("b", async {});
        let _c = scheduler.schedule_labeled("c", async {});
        assert_eq!(scheduler.wait_one().as_deref(), Some("b"));
        // 5 % 2 == 1
        assert_eq!(scheduler.wait_one().as_deref(), Some("c"));
        assert_eq!(scheduler.wait_one().as_deref(), Some("a"));
        assert_eq!(scheduler.wait_one(), None);
        assert_eq!(scheduler.resolved(), ["b", "c", "a"]);
    }

    #[test]
    fn spawned_roots_run_to_completion() {
        let scheduler = Scheduler::new(vec![]);
        let done = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let (handle, done) = (scheduler.clone(), done.clone());
            scheduler.spawn(async move {
                handle.schedule(async {}).await;
                done.set(done.get() + 1);
            });
        }
        assert_eq!(scheduler.wait_all(), Ok(()));
        assert_eq!(done.get(), 3);
        assert_eq!(scheduler.resolved(), ["task 3", "task 4", "task 5"]);
    }

    #[test]
    fn blocked_roots_deadlock() {
        let scheduler = Scheduler::new(vec![]);
        scheduler.spawn(futures_lite::future::pending());
        assert_eq!(
            scheduler.wait_all(),
            Err(Error::Deadlock {
                pending: vec!["root 0".into()]
            })
        );
        let blocked = scheduler.wait_for(futures_lite::future::pending::<()>());
        assert_eq!(
            blocked,
            Err(Error::Deadlock {
                pending: vec!["main".into()]
            })
        );
    }

    #[test]
    fn replicas_start_fresh() {
        let scheduler = Scheduler::new(vec![2, 0]);
        let _ = scheduler.wait_for(scheduler.schedule_labeled("a", async {}));
        assert_eq!(scheduler.resolved(), ["a"]);
        let replica = scheduler.replicate();
        assert_eq!(replica.choices(), [2, 0]);
        assert!(replica.resolved().is_empty());
        assert_eq!(scheduler.to_string(), "<scheduler :: [2, 0] => [\"a\"]>");
    }
}
