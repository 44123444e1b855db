pub mod common;
use common::*;
use core::time::Duration;
use falsify::{
    check::{Outcome, Path},
    config::Verbosity,
};
use std::panic::panic_any;

#[test]
fn passing_properties_report_every_run() {
    let report = checker(0u8..=10, 1).check(|x| x <= 10);
    assert!(!report.failed());
    assert!(matches!(report.outcome, Outcome::Pass));
    assert_eq!(report.runs, COUNT);
    assert_eq!(report.to_string(), "PASS { seed: 1, runs: 1000 }");
}

#[test]
fn results_disprove_with_their_error() {
    let report = checker(0u16..1000, 2).check(|x| if x < 10 { Ok(x) } else { Err(format!("{x} is too large")) });
    let fail = report.fail().unwrap();
    assert_eq!(fail.item, 10);
    assert_eq!(fail.cause, Cause::Disprove("10 is too large".to_string()));
    assert_eq!(fail.message(), "\"10 is too large\"");
}

#[test]
fn fatal_errors_abort_without_shrinking() {
    let report = checker(0u32..1000, 3).check(|x| {
        if x > 100 {
            Err(Error::Exhausted { retries: 1 })
        } else {
            Ok(())
        }
    });
    let abort = report.abort().unwrap();
    assert_eq!(abort.error, Error::Exhausted { retries: 1 });
    assert_eq!(abort.shrinks, 0);
    assert!(abort.path.shrinks.is_empty());
}

#[test]
fn non_fatal_errors_shrink() {
    let report = checker(0u32..1000, 4).check(|x| {
        if x > 100 {
            Err(Error::Path(x.to_string()))
        } else {
            Ok(())
        }
    });
    assert_eq!(report.counterexample(), Some(&101));
}

#[test]
fn fatal_panics_abort() {
    let report = checker(0u32..1000, 5).check(|x| {
        if x > 100 {
            panic_any(Error::Deadlock { pending: vec![] });
        }
    });
    assert_eq!(report.error(), Some(&Error::Deadlock { pending: vec![] }));
}

#[test]
fn slow_checks_time_out() {
    let mut checker = checker(0u32..1000, 6);
    checker.timeout = Some(Duration::from_millis(20));
    let report = checker.check(|x| {
        if x > 500 {
            std::thread::sleep(Duration::from_millis(40));
        }
    });
    let fail = report.fail().unwrap();
    assert_eq!(fail.item, 501);
    assert!(matches!(fail.cause, Cause::Timeout(elapsed) if elapsed >= Duration::from_millis(40)));
}

#[test]
fn history_follows_verbosity() {
    let mut quiet = checker(0u32..1_000_000, 7);
    quiet.verbosity = Verbosity::Quiet;
    let report = quiet.clone().check(|x| x < 100);
    assert!(report.history.is_empty());

    let mut verbose = quiet.clone();
    verbose.verbosity = Verbosity::Verbose;
    let report = verbose.check(|x| x < 100);
    assert!(!report.history.is_empty());
    assert!(report.history.iter().all(|line| line.starts_with("SHRUNK(")));

    let mut very = quiet;
    very.verbosity = Verbosity::VeryVerbose;
    let report = very.check(|x| x < 100);
    assert!(report.history.iter().any(|line| line.starts_with("PASS(")));
    assert!(report.history.iter().any(|line| line.starts_with("SHRINK(")));
    assert!(report.to_string().contains("\nhistory:\n  "));
}

#[test]
fn reports_render_the_failure() {
    let report = checker(0u32..1000, 8).check(|x| x < 100);
    let path = report.path().unwrap().clone();
    let rendered = report.to_string();
    assert!(rendered.starts_with("FAIL { seed: 8, "));
    assert!(rendered.contains(&format!("path: {path}")));
    assert!(rendered.contains("counterexample: 100"));
    assert!(rendered.contains("cause: ()"));
    assert_eq!(path.to_string().parse::<Path>(), Ok(path));
}

#[test]
#[should_panic(expected = "counterexample: 100")]
fn assert_panics_with_the_report() {
    checker(0u32..1000, 9).check(|x| x < 100).assert();
}

#[test]
fn out_of_range_replay_aborts() {
    let path = Path {
        index: 0,
        shrinks: vec![usize::MAX],
    };
    let report = checker(0u32..1000, 10).replay(10, path).check(|_| false);
    assert_eq!(report.error(), Some(&Error::Path("0:18446744073709551615".into())));
}

#[test]
fn replays_outside_of_the_run_abort() {
    let report = checker(0u32..1000, 1).replay(1, Path::new(5000)).check(|_| false);
    assert!(report.failed());
    assert!(report.counterexample().is_none());
    assert_eq!(report.error(), Some(&Error::Path("5000".into())));
    assert_eq!(report.path(), Some(&Path::new(5000)));

    let report = checker(0u32..1000, 1).replay(1, Path::new(COUNT)).check(|_| true);
    assert_eq!(report.error(), Some(&Error::Path(COUNT.to_string())));
}

#[test]
fn checks_yield_passes_then_a_failure() {
    let results = checker(0u32..1000, 11).checks(|x| x < 100).collect::<Vec<_>>();
    let (last, rest) = results.split_last().unwrap();
    assert!(rest.iter().any(|result| matches!(result, check::Result::Pass(_))));
    assert!(rest.iter().all(|result| !matches!(result, check::Result::Fail(_))));
    assert!(matches!(last, check::Result::Fail(fail) if fail.item == 100));
}

#[test]
fn samples_are_reproducible() {
    let configuration = config::Configuration {
        seed: Some(12),
        ..config::Configuration::DEFAULT
    };
    let sampler = sample::Sampler::with(0u64..1_000_000, &configuration);
    assert_eq!(sampler.seed, 12);
    let left = sampler.clone().samples().collect::<std::result::Result<Vec<_>, _>>().unwrap();
    let right = sampler.samples().collect::<std::result::Result<Vec<_>, _>>().unwrap();
    assert_eq!(left, right);
    assert_eq!(left.len(), SAMPLES);
}

#[test]
fn samples_follow_the_trials_of_a_check() {
    let configuration = config::Configuration {
        seed: Some(13),
        ..config::Configuration::DEFAULT
    };
    let mut sampler = sample::Sampler::with(0u64..1_000_000, &configuration);
    sampler.count = COUNT;
    let samples = sampler.samples().map(|sample| sample.unwrap());
    let passes = checker(0u64..1_000_000, 13).checks(|_| true).map(|result| match result {
        check::Result::Pass(pass) => pass.item,
        _ => unreachable!(),
    });
    assert!(samples.eq(passes));
}

#[test]
fn failed_samples_are_errors() {
    let samples = Generate::filter_with(0u8..10, 4, |_: &u8| false).samples(3).collect::<Vec<_>>();
    assert_eq!(samples, vec![Err(Error::Exhausted { retries: 4 }); 3]);
}
