#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use warden_exec::{Contract, Predicate, RunResult};

pub fn fmt_pct(n: u64, d: u64) -> String {
    if d == 0 {
        return "n/a".to_string();
    }
    format!("{:.2}%", 100.0 * n as f64 / d as f64)
}

pub fn render_base_run(contract: &Contract, result: &RunResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Inputs considered: {}\n",
        result.considered_inputs
    ));
    out.push_str(&format!(
        "Inputs satisfying pre: {} ({})\n",
        result.satisfying_pre,
        fmt_pct(result.satisfying_pre, result.considered_inputs)
    ));
    out.push_str(&format!("Violations (bounded): {}\n", result.violations));
    out.push_str(&format!(
        "Nontermination (step_limit={}): {}\n",
        contract.step_limit, result.nontermination
    ));
    if result.violations > 0 {
        out.push('\n');
        out.push_str("NOTE: Base contract has violations under this bounded domain.\n");
    }
    out
}

pub fn render_single_redundancy(pre: &[Predicate], redundant: &[usize]) -> String {
    let mut out = String::new();
    out.push_str("Single precondition redundancy (bounded verifier-based check):\n");
    for (index, predicate) in pre.iter().enumerate() {
        let status = if redundant.contains(&index) {
            "REDUNDANT"
        } else {
            "NEEDED"
        };
        out.push_str(&format!(
            "- pre{}: {} | {}\n",
            index + 1,
            status,
            predicate.text
        ));
    }
    if pre.is_empty() {
        out.push_str("- none\n");
    }
    out
}

pub fn render_implication(pre: &[Predicate], implied: &[bool]) -> String {
    let mut out = String::new();
    out.push_str("Implication checking (bounded, IC-like):\n");
    for (index, predicate) in pre.iter().enumerate() {
        let status = if implied[index] {
            "IMPLIED"
        } else {
            "NOT implied"
        };
        out.push_str(&format!(
            "- pre{}: {} | {}\n",
            index + 1,
            status,
            predicate.text
        ));
    }
    out
}

pub fn render_variable_usage(contract: &Contract) -> String {
    let pre_vars = union_vars(&contract.pre);
    let post_vars = union_vars(&contract.post);
    let mut out = String::new();
    out.push_str("Variable usage (syntactic):\n");
    out.push_str(&format!("- vars(pre): [{}]\n", join_names(&pre_vars)));
    out.push_str(&format!("- vars(post): [{}]\n", join_names(&post_vars)));
    out
}

fn union_vars(predicates: &[Predicate]) -> BTreeSet<String> {
    predicates
        .iter()
        .flat_map(|p| p.expr.variables())
        .collect()
}

fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().cloned().collect::<Vec<_>>().join(", ")
}
