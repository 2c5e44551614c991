#![forbid(unsafe_code)]

use serde::Serialize;
use warden_exec::{Contract, Input, Predicate};

/// Results of the single- and group-redundancy analyses for one contract.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RedundancyReport {
    /// Indices whose individual removal introduces no violation.
    pub single_redundant: Vec<usize>,
    /// A maximal set removable together, found greedily.
    pub greedy_group: Vec<usize>,
    /// Whether removing every singly-redundant index at once still holds.
    pub all_single_jointly_redundant: bool,
    /// A witness against the jointly-reduced contract, when it does not.
    pub counterexample: Option<Input>,
}

fn without_index(pre: &[Predicate], index: usize) -> Vec<Predicate> {
    pre.iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(_, p)| p.clone())
        .collect()
}

/// The reduced contract "holds": no violation and no nontermination
/// anywhere in the bounded domain.
fn holds(contract: &Contract, pre: &[Predicate]) -> bool {
    let result = contract.run_with_pre(pre);
    result.violations == 0 && result.nontermination == 0
}

/// Indices of preconditions that are individually removable.
///
/// Redundancy here means the reduced run has zero violations;
/// nontermination under the reduced set is tolerated. The group analysis
/// below uses the stricter `holds` test.
pub fn single_redundant(contract: &Contract) -> Vec<usize> {
    (0..contract.pre.len())
        .filter(|&index| {
            let reduced = without_index(&contract.pre, index);
            contract.run_with_pre(&reduced).violations == 0
        })
        .collect()
}

/// Computes single redundancy, a greedy maximal removable group, and the
/// single-vs-group divergence witness.
pub fn analyze_redundancy(contract: &Contract) -> RedundancyReport {
    let single = single_redundant(contract);

    // Greedy maximal removable group: full passes over the remaining
    // indices, removing one at a time. A later pass can remove an index an
    // earlier pass could not, once other removals have changed the trial
    // set (cooperative redundancy).
    let mut remaining: Vec<usize> = (0..contract.pre.len()).collect();
    let mut removed: Vec<usize> = Vec::new();
    let mut changed = true;
    while changed {
        changed = false;
        for index in remaining.clone() {
            let trial: Vec<Predicate> = remaining
                .iter()
                .filter(|&&j| j != index)
                .map(|&j| contract.pre[j].clone())
                .collect();
            if holds(contract, &trial) {
                remaining.retain(|&j| j != index);
                removed.push(index);
                changed = true;
            }
        }
    }
    removed.sort_unstable();

    // Remove every singly-redundant index in one combined edit.
    let kept: Vec<Predicate> = contract
        .pre
        .iter()
        .enumerate()
        .filter(|(index, _)| !single.contains(index))
        .map(|(_, p)| p.clone())
        .collect();
    let all_single_jointly_redundant = holds(contract, &kept);

    let counterexample = if !single.is_empty() && !all_single_jointly_redundant {
        contract.find_counterexample_with_pre(&kept)
    } else {
        None
    };

    RedundancyReport {
        single_redundant: single,
        greedy_group: removed,
        all_single_jointly_redundant,
        counterexample,
    }
}
