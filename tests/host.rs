pub mod common;
use common::*;

#[test]
fn domains_are_well_formed() {
    checker(host::domain(), 1)
        .check(|domain| {
            let (subdomains, extension) = domain.rsplit_once('.').unwrap();
            domain.len() <= 255
                && (2..=10).contains(&extension.len())
                && extension.chars().all(|c| c.is_ascii_lowercase())
                && subdomains.split('.').all(|label| {
                    !label.is_empty()
                        && label.len() <= 63
                        && !label.starts_with('-')
                        && !label.ends_with('-')
                })
        })
        .assert();
}

#[test]
fn user_information_is_percent_encoded() {
    checker(host::user_information(), 2)
        .check(|information| {
            let bytes = information.as_bytes();
            bytes.iter().enumerate().all(|(index, &byte)| {
                byte != b'%'
                    || (index + 2 < bytes.len()
                        && bytes[index + 1].is_ascii_hexdigit()
                        && bytes[index + 2].is_ascii_hexdigit())
            })
        })
        .assert();
}

#[test]
fn shrunk_domains_stay_well_formed() {
    let report = checker(host::domain(), 3).check(|domain| domain.len() < 12);
    let domain = report.counterexample().unwrap();
    assert!(domain.len() >= 12);
    assert!(domain.split('.').count() >= 2);
    assert!(domain.split('.').all(|label| !label.is_empty()));
}
