#![forbid(unsafe_code)]

use warden_ast::Stmt;

use crate::eval::{eval, EvalError};
use crate::value::Env;

/// Result of one bounded execution. `exceeded` is the nontermination
/// signal: the step budget ran out and the program was abandoned
/// mid-statement. Expected outcome, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecOutcome {
    pub steps_used: u64,
    pub exceeded: bool,
}

struct Fuel {
    used: u64,
    limit: u64,
}

impl Fuel {
    /// Charges one step; true once the running total exceeds the budget.
    fn charge(&mut self) -> bool {
        self.used += 1;
        self.used > self.limit
    }
}

/// Executes `program` against `env`, mutating it in place.
///
/// Step accounting: one step per assignment target applied, one per branch
/// test, one per loop-guard evaluation (including the false test that
/// exits the loop). The budget is checked after every charge, so an
/// infinite loop stops as soon as the total exceeds `step_limit`.
pub fn execute(program: &[Stmt], env: &mut Env, step_limit: u64) -> Result<ExecOutcome, EvalError> {
    let mut fuel = Fuel {
        used: 0,
        limit: step_limit,
    };
    let exceeded = exec_block(program, env, &mut fuel)?;
    Ok(ExecOutcome {
        steps_used: fuel.used,
        exceeded,
    })
}

fn exec_block(block: &[Stmt], env: &mut Env, fuel: &mut Fuel) -> Result<bool, EvalError> {
    for stmt in block {
        match stmt {
            Stmt::Assign(assign) => {
                for (name, expr) in &assign.targets {
                    let value = eval(expr, env)?;
                    env.insert(name.clone(), value);
                    if fuel.charge() {
                        return Ok(true);
                    }
                }
            }
            Stmt::If(branch) => {
                if fuel.charge() {
                    return Ok(true);
                }
                let taken = if eval(&branch.cond, env)?.is_truthy() {
                    &branch.then_block
                } else {
                    &branch.else_block
                };
                if exec_block(taken, env, fuel)? {
                    return Ok(true);
                }
            }
            Stmt::While(repeat) => loop {
                if fuel.charge() {
                    return Ok(true);
                }
                if !eval(&repeat.cond, env)?.is_truthy() {
                    break;
                }
                if exec_block(&repeat.body, env, fuel)? {
                    return Ok(true);
                }
            },
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use warden_ast::{AssignStmt, IfStmt, Program, WhileStmt};
    use warden_parse::parse_predicate;

    use crate::value::Value;

    use super::*;

    fn assign(name: &str, expr: &str) -> Stmt {
        Stmt::Assign(AssignStmt {
            targets: vec![(name.to_string(), parse_predicate(expr).unwrap())],
        })
    }

    fn countdown() -> Program {
        // x := 0; y := n; while x < n: x := x + 1; y := y - 1
        Program {
            stmts: vec![
                assign("x", "0"),
                assign("y", "n"),
                Stmt::While(WhileStmt {
                    cond: parse_predicate("x < n").unwrap(),
                    body: vec![assign("x", "x + 1"), assign("y", "y - 1")],
                }),
            ],
        }
    }

    #[test]
    fn execute_counts_assignments_and_guard_tests() {
        let mut env = Env::from([("n".to_string(), Value::Int(3))]);
        let outcome = execute(&countdown().stmts, &mut env, 10_000).unwrap();
        assert!(!outcome.exceeded);
        // 2 initial assignments, 4 guard tests (3 true + final false),
        // 2 assignments per iteration.
        assert_eq!(outcome.steps_used, 2 + 4 + 3 * 2);
        assert_eq!(env.get("y"), Some(&Value::Int(0)));
        assert_eq!(env.get("x"), Some(&Value::Int(3)));
    }

    #[test]
    fn execute_charges_branch_tests() {
        let program = vec![Stmt::If(IfStmt {
            cond: parse_predicate("n > 0").unwrap(),
            then_block: vec![assign("r", "1")],
            else_block: vec![assign("r", "0"), assign("s", "0")],
        })];

        let mut env = Env::from([("n".to_string(), Value::Int(1))]);
        let outcome = execute(&program, &mut env, 10_000).unwrap();
        assert_eq!(outcome.steps_used, 2);
        assert_eq!(env.get("r"), Some(&Value::Int(1)));

        let mut env = Env::from([("n".to_string(), Value::Int(-1))]);
        let outcome = execute(&program, &mut env, 10_000).unwrap();
        assert_eq!(outcome.steps_used, 3);
        assert_eq!(env.get("s"), Some(&Value::Int(0)));
    }

    #[test]
    fn execute_stops_infinite_loop_at_budget() {
        let program = vec![Stmt::While(WhileStmt {
            cond: parse_predicate("true").unwrap(),
            body: vec![assign("x", "0")],
        })];
        let mut env = Env::new();
        let outcome = execute(&program, &mut env, 17).unwrap();
        assert!(outcome.exceeded);
        assert_eq!(outcome.steps_used, 18);
    }

    #[test]
    fn execute_abandons_multi_target_assignment_mid_statement() {
        let program = vec![Stmt::Assign(AssignStmt {
            targets: vec![
                ("a".to_string(), parse_predicate("1").unwrap()),
                ("b".to_string(), parse_predicate("2").unwrap()),
                ("c".to_string(), parse_predicate("3").unwrap()),
            ],
        })];
        let mut env = Env::new();
        let outcome = execute(&program, &mut env, 1).unwrap();
        assert!(outcome.exceeded);
        assert_eq!(outcome.steps_used, 2);
        // The second target was applied before the budget check fired; the
        // third was never reached.
        assert_eq!(env.get("b"), Some(&Value::Int(2)));
        assert_eq!(env.get("c"), None);
    }

    #[test]
    fn execute_budget_check_reaches_nested_blocks() {
        // while true: if true: x := 0
        let program = vec![Stmt::While(WhileStmt {
            cond: parse_predicate("true").unwrap(),
            body: vec![Stmt::If(IfStmt {
                cond: parse_predicate("true").unwrap(),
                then_block: vec![assign("x", "0")],
                else_block: vec![],
            })],
        })];
        let mut env = Env::new();
        let outcome = execute(&program, &mut env, 100).unwrap();
        assert!(outcome.exceeded);
        assert_eq!(outcome.steps_used, 101);
    }

    #[test]
    fn execute_propagates_eval_errors() {
        let program = vec![assign("x", "ghost + 1")];
        let mut env = Env::new();
        assert!(matches!(
            execute(&program, &mut env, 10).unwrap_err(),
            EvalError::UnknownVariable { .. }
        ));
    }

    #[test]
    fn execute_assignment_order_is_left_to_right() {
        let program = vec![Stmt::Assign(AssignStmt {
            targets: vec![
                ("a".to_string(), parse_predicate("1").unwrap()),
                ("b".to_string(), parse_predicate("a + 1").unwrap()),
            ],
        })];
        let mut env = Env::new();
        execute(&program, &mut env, 10).unwrap();
        assert_eq!(env.get("b"), Some(&Value::Int(2)));
    }
}
