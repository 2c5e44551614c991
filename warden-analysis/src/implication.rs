#![forbid(unsafe_code)]

use warden_ast::Expr;
use warden_exec::{eval, Contract, Env, EvalError, InputDomain, Value};

/// Bounded semantic entailment: does the conjunction of `antecedent` imply
/// `consequent` on every input in `domain`?
///
/// Short-circuits on the first counterexample in enumeration order. An
/// empty antecedent means the consequent must hold for every input. Unlike
/// a contract sweep, evaluation errors propagate: the inputs come straight
/// from the domain, so an unbound name is a caller mistake, not a
/// per-input contract failure.
pub fn implies_bounded(
    antecedent: &[Expr],
    consequent: &Expr,
    domain: &InputDomain,
) -> Result<bool, EvalError> {
    for input in domain.inputs() {
        let env: Env = input
            .iter()
            .map(|(name, value)| (name.clone(), Value::Int(*value)))
            .collect();

        let mut antecedent_holds = true;
        for expr in antecedent {
            if !eval(expr, &env)?.is_truthy() {
                antecedent_holds = false;
                break;
            }
        }
        if !antecedent_holds {
            continue;
        }

        if !eval(consequent, &env)?.is_truthy() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// For each precondition, whether the conjunction of the others already
/// implies it over the contract's domain.
pub fn implied_by_rest(contract: &Contract) -> Result<Vec<bool>, EvalError> {
    contract
        .pre
        .iter()
        .enumerate()
        .map(|(index, predicate)| {
            let others: Vec<Expr> = contract
                .pre
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != index)
                .map(|(_, p)| p.expr.clone())
                .collect();
            implies_bounded(&others, &predicate.expr, &contract.domain)
        })
        .collect()
}
