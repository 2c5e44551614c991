use warden_analysis::{implied_by_rest, implies_bounded};
use warden_exec::{parse_spec, EvalError, InputDomain};
use warden_parse::parse_predicate;

fn domain(name: &str, min: i64, max: i64) -> InputDomain {
    InputDomain::new([(name.to_string(), (min, max))]).unwrap()
}

#[test]
fn stronger_bound_implies_weaker_bound() {
    let d = domain("N", -5, 10);
    let antecedent = vec![parse_predicate("N >= 0").unwrap()];
    let consequent = parse_predicate("N >= -5").unwrap();
    assert!(implies_bounded(&antecedent, &consequent, &d).unwrap());
}

#[test]
fn weaker_bound_does_not_imply_stronger_bound() {
    let d = domain("N", -5, 10);
    let antecedent = vec![parse_predicate("N >= -5").unwrap()];
    let consequent = parse_predicate("N >= 0").unwrap();
    // The first counterexample in ascending order is N = -5.
    assert!(!implies_bounded(&antecedent, &consequent, &d).unwrap());
}

#[test]
fn vacuous_antecedent_requires_consequent_everywhere() {
    let d = domain("N", -5, 10);
    let everywhere = parse_predicate("N >= -5").unwrap();
    let not_everywhere = parse_predicate("N >= -4").unwrap();
    assert!(implies_bounded(&[], &everywhere, &d).unwrap());
    assert!(!implies_bounded(&[], &not_everywhere, &d).unwrap());
}

#[test]
fn false_antecedent_implies_anything() {
    let d = domain("N", 0, 5);
    let antecedent = vec![parse_predicate("N < 0").unwrap()];
    let consequent = parse_predicate("N == 99").unwrap();
    assert!(implies_bounded(&antecedent, &consequent, &d).unwrap());
}

#[test]
fn conjunction_of_antecedents_is_used() {
    let d = domain("N", -10, 10);
    let antecedent = vec![
        parse_predicate("N >= -2").unwrap(),
        parse_predicate("N <= 2").unwrap(),
    ];
    assert!(implies_bounded(
        &antecedent,
        &parse_predicate("N * N <= 4").unwrap(),
        &d
    )
    .unwrap());
    assert!(!implies_bounded(
        &antecedent,
        &parse_predicate("N * N <= 1").unwrap(),
        &d
    )
    .unwrap());
}

#[test]
fn unbound_name_propagates_as_an_error() {
    let d = domain("N", 0, 2);
    let err = implies_bounded(&[], &parse_predicate("ghost >= 0").unwrap(), &d).unwrap_err();
    assert!(matches!(err, EvalError::UnknownVariable { ref name, .. } if name == "ghost"));
}

#[test]
fn implied_by_rest_flags_the_covered_precondition() {
    let c = parse_spec(
        r#"{
            "inputs": { "N": { "min": -5, "max": 10 } },
            "pre": ["N >= 0", "N >= -5"],
            "post": ["y == 0"],
            "program": [ { "assign": { "y": "0" } } ]
        }"#,
    )
    .unwrap()
    .contract;
    // "N >= 0" is not implied by "N >= -5"; "N >= -5" is implied by
    // "N >= 0".
    assert_eq!(implied_by_rest(&c).unwrap(), vec![false, true]);
}
