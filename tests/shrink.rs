pub mod common;
use common::*;

#[test]
fn shrinks_to_the_failing_boundary() {
    trace();
    let mut checker = checker(0u32..1000, 42);
    checker.generate.count = 100;
    let report = checker.clone().check(|x| x <= 50);
    assert!(report.failed());
    assert_eq!(report.counterexample(), Some(&51));

    let path = report.path().cloned().unwrap();
    let replay = checker.replay(report.seed, path.clone()).check(|x| x <= 50);
    assert_eq!(replay.counterexample(), Some(&51));
    assert_eq!(replay.path(), Some(&path));
}

#[test]
fn finds_minimum_pair() {
    let report = checker((..1000usize, ..1000usize), 7).check(|(left, right)| left >= right);
    assert_eq!(report.counterexample(), Some(&(0, 1)));
}

#[test]
fn vec_removes_irrelevant_then_shrinks() {
    let report = checker((..100usize).collect::<Vec<_>>(), 11)
        .check(|items| items.len() < 10 || items.iter().all(|&item| item < 10));
    let shrunk = report.counterexample().unwrap();
    assert_eq!(shrunk.len(), 10);
    assert_eq!(shrunk.iter().filter(|&&item| item == 10).count(), 1);
}

#[test]
fn characters_shrink_across_surrogates() {
    let items = checker(char::generator(), 3)
        .checks(|item| (item as u32) < 0xE000)
        .filter_map(|result| result.fail(true))
        .map(|fail| fail.item)
        .collect::<Vec<_>>();
    assert!(items.windows(2).all(|pair| pair[1] < pair[0]));
    assert_eq!(items.last(), Some(&'\u{E000}'));
}

#[test]
fn panics_are_failures() {
    let report = checker(..=1000i32, 3).check(|x| assert!(x < 100));
    let fail = report.fail().unwrap();
    assert_eq!(fail.item, 100);
    assert!(matches!(&fail.cause, Cause::Panic(Some(message)) if message.contains("x < 100")));
}

#[test]
fn shrink_budget_is_respected() {
    let mut checker = checker(..1_000_000u64, 5);
    checker.shrink.count = 3;
    let fail = checker.checks(|x| x < 10).find_map(|result| result.fail(false)).unwrap();
    assert!(fail.shrinks <= 3);
}

#[test]
fn disabled_shrinking_reports_the_original() {
    let mut checker = checker(..1_000_000u64, 5);
    checker.shrink.count = 0;
    let report = checker.check(|x| x < 10);
    let fail = report.fail().unwrap();
    assert_eq!(fail.shrinks, 0);
    assert!(fail.path.shrinks.is_empty());
}

#[test]
fn results_carry_shrunk_items() {
    let fails = checker(..1000u16, 9)
        .checks(|x| x < 500)
        .filter_map(|result| result.fail(true))
        .map(|fail| fail.item)
        .collect::<Vec<_>>();
    assert!(fails.windows(2).all(|pair| pair[1] < pair[0]));
    assert_eq!(fails.last(), Some(&500));
}
