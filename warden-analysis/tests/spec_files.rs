//! The shipped sample specs stay honest: they load, their base contracts
//! hold, and their redundancy stories match what the files claim.

use warden_analysis::analyze_redundancy;
use warden_exec::{parse_spec, ContractSpec};

fn load(name: &str) -> ContractSpec {
    let path = format!(
        "{}/../specs/{name}",
        env!("CARGO_MANIFEST_DIR")
    );
    let text = std::fs::read_to_string(&path).expect("sample spec should exist");
    parse_spec(&text).expect("sample spec should load")
}

#[test]
fn countdown_spec_holds_and_has_one_redundant_precondition() {
    let loaded = load("countdown.json");
    let base = loaded.contract.run();
    assert_eq!(base.violations, 0);
    assert_eq!(base.nontermination, 0);

    let report = analyze_redundancy(&loaded.contract);
    assert_eq!(report.single_redundant, vec![1]);
    assert!(report.all_single_jointly_redundant);
}

#[test]
fn clamp_spec_needs_no_preconditions_at_all() {
    let loaded = load("clamp_temperature.json");
    let base = loaded.contract.run();
    assert_eq!(base.violations, 0);
    assert_eq!(base.nontermination, 0);

    // The clamp is total: every bound is redundant, singly and jointly.
    let report = analyze_redundancy(&loaded.contract);
    assert_eq!(report.single_redundant, vec![0, 1, 2, 3]);
    assert_eq!(report.greedy_group, vec![0, 1, 2, 3]);
    assert!(report.all_single_jointly_redundant);
    assert_eq!(report.counterexample, None);
}
