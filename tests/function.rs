pub mod common;
use common::*;

#[test]
fn functions_are_deterministic() {
    checker(function::function(0u16..1000), 1)
        .check(|function| {
            (0..20).all(|argument| function.call(argument) == function.call(argument))
        })
        .assert();
}

#[test]
fn function_counterexamples_show_their_calls() {
    let report = checker(function::function(0u8..100), 2).check(|function| function.call("a") < 50);
    let fail = report.fail().unwrap();
    let output = fail.item.call("a");
    assert!(output >= 50);
    assert_eq!(fail.item.calls(), 1);
    assert_eq!(format!("{:?}", fail.item), format!("<function :: \"a\" => {output}>"));
    assert!(report.to_string().contains(&format!("counterexample: <function :: \"a\" => {output}>")));
}

#[test]
fn replicas_are_independent() {
    checker(cloned(function::Function::new(0, vec!['x', 'y'])), 3)
        .check(|function| {
            let calls = function.calls();
            function.call(calls);
            calls == 0 && function.calls() == 1
        })
        .assert();
}

#[test]
fn comparators_are_antisymmetric() {
    checker((function::comparator(), 0i32..100, 0i32..100), 4)
        .check(|(comparator, left, right)| {
            comparator.compare(&left, &right) == -comparator.compare(&right, &left)
        })
        .assert();
}
