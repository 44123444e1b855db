pub mod common;
use common::*;
use config::{Configuration, Verbosity};
use core::time::Duration;
use std::env;

#[test]
fn environment_and_global_configuration() {
    let variables = [
        ("FALSIFY_GENERATE_COUNT", "17"),
        ("FALSIFY_GENERATE_SEED", "99"),
        ("FALSIFY_GENERATE_SIZE", "2.5"),
        ("FALSIFY_SHRINK_COUNT", "3"),
        ("FALSIFY_VERBOSITY", "very-verbose"),
        ("FALSIFY_TIMEOUT_MS", "250"),
    ];
    for (key, value) in variables {
        env::set_var(key, value);
    }
    let configuration = Configuration::DEFAULT.environment();
    assert_eq!(configuration.count, 17);
    assert_eq!(configuration.seed, Some(99));
    assert_eq!(configuration.sizes.start(), 1.0);
    assert_eq!(configuration.sizes.end(), 1.0);
    assert_eq!(configuration.shrinks, 3);
    assert_eq!(configuration.verbosity, Verbosity::VeryVerbose);
    assert_eq!(configuration.timeout, Some(Duration::from_millis(250)));

    env::set_var("FALSIFY_GENERATE_COUNT", "many");
    env::set_var("FALSIFY_GENERATE_SIZE", "NaN");
    let configuration = Configuration::DEFAULT.environment();
    assert_eq!(configuration.count, GENERATES);
    assert_eq!(configuration.sizes, Configuration::DEFAULT.sizes);
    for (key, _) in variables {
        env::remove_var(key);
    }

    config::configure_global(Configuration {
        count: 5,
        seed: Some(3),
        ..Configuration::DEFAULT
    });
    let checker = (0u8..10).checker();
    assert_eq!(checker.generate.count, 5);
    assert_eq!(checker.generate.seed, 3);
    let report = (0u8..10).check(|_| true);
    assert_eq!((report.seed, report.runs), (3, 5));
    let sampler = (0u8..10).sampler();
    assert_eq!((sampler.seed, sampler.count), (3, SAMPLES));

    config::reset_global();
    assert_eq!(config::read_global(), Configuration::DEFAULT);
}

#[test]
fn checkers_draw_a_seed_when_none_is_configured() {
    let configuration = Configuration {
        seed: None,
        ..Configuration::DEFAULT
    };
    let checker = check::Checker::with(0u8..10, &configuration);
    assert_eq!(checker.generate.count, GENERATES);
    assert_eq!(checker.shrink.count, SHRINKS);
    assert_eq!(checker.timeout, None);
}
