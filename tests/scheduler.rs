#![cfg(feature = "asynchronous")]

pub mod common;
use common::*;
use core::cell::Cell;
use falsify::scheduler::{self, Scheduler};
use futures_lite::future::zip;

/// Two unsynchronized increments of a shared counter.
fn increments(scheduler: &Scheduler) -> bool {
    let counter = &Cell::new(0);
    let increment = move || async move {
        let value = scheduler.schedule(async move { counter.get() }).await;
        scheduler.schedule(async {}).await;
        counter.set(value + 1);
    };
    let _ = scheduler.wait_for(zip(increment(), increment()));
    counter.get() == 2
}

#[test]
fn finds_lost_update() {
    trace();
    let report = checker(scheduler::scheduler(), 17).check(|scheduler| increments(&scheduler));
    assert!(report.failed());
    let counterexample = report.counterexample().unwrap();
    let choices = counterexample.choices();
    assert_eq!(counterexample.resolved().len(), 4);
    assert!(report.to_string().contains("task 0"));
    let path = report.path().cloned().unwrap();

    let replay = checker(scheduler::scheduler(), 17)
        .replay(report.seed, path)
        .check(|scheduler| increments(&scheduler));
    assert!(replay.failed());
    assert_eq!(replay.counterexample().unwrap().choices(), choices);
}

#[test]
fn some_interleavings_are_safe() {
    assert!(increments(&Scheduler::new(vec![0, 1])));
    assert!(!increments(&Scheduler::new(vec![])));
}

#[test]
fn release_order_is_reproducible() {
    checker(scheduler::scheduler(), 5)
        .check(|scheduler| {
            let replica = scheduler.replicate();
            let run = |scheduler: &Scheduler| {
                let tasks = Iterator::map(0..4, |index| {
                    scheduler.schedule_labeled(index.to_string(), async {})
                })
                .collect::<Vec<_>>();
                scheduler.wait_all().unwrap();
                drop(tasks);
                scheduler.resolved()
            };
            run(&scheduler) == run(&replica)
        })
        .assert();
}

#[test]
fn every_task_is_released_once() {
    checker(scheduler::scheduler(), 6)
        .check(|scheduler| {
            let tasks = Iterator::map(0..5, |index| {
                scheduler.schedule_labeled(index.to_string(), async {})
            })
            .collect::<Vec<_>>();
            scheduler.wait_all().unwrap();
            let mut resolved = scheduler.resolved();
            resolved.sort();
            drop(tasks);
            resolved == ["0", "1", "2", "3", "4"]
        })
        .assert();
}
