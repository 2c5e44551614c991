#![forbid(unsafe_code)]

use serde::Serialize;
use warden_ast::Program;
use warden_parse::{parse_predicate, UnsafeExpression};

use crate::domain::{Input, InputDomain};
use crate::eval::{eval, EvalError};
use crate::exec::execute;
use crate::value::{Env, Value};

/// A precondition or postcondition: the parsed tree plus the source text
/// it came from, kept for reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    pub text: String,
    pub expr: warden_ast::Expr,
}

impl Predicate {
    pub fn parse(text: &str) -> Result<Self, UnsafeExpression> {
        Ok(Self {
            text: text.to_string(),
            expr: parse_predicate(text)?,
        })
    }
}

/// The full bounded contract: program, ANDed predicate lists, input
/// domain, step budget. Read-only once built.
#[derive(Clone, Debug)]
pub struct Contract {
    pub program: Program,
    pub pre: Vec<Predicate>,
    pub post: Vec<Predicate>,
    pub domain: InputDomain,
    pub step_limit: u64,
}

/// Aggregate counts for one bounded sweep over the whole domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub considered_inputs: u64,
    pub satisfying_pre: u64,
    pub violations: u64,
    pub nontermination: u64,
}

/// What happened for a single enumerated input.
enum Verdict {
    /// Preconditions evaluated false: skipped, counted nowhere else.
    PreFailed,
    /// A precondition errored: a violation, but not a satisfying input.
    PreError,
    /// Passed preconditions and the contract held.
    Holds,
    /// Passed preconditions, then exceeded the step budget.
    Nonterminating,
    /// Passed preconditions, then failed a postcondition or errored.
    Violated,
}

fn eval_all(predicates: &[Predicate], env: &Env) -> Result<bool, EvalError> {
    for predicate in predicates {
        if !eval(&predicate.expr, env)?.is_truthy() {
            return Ok(false);
        }
    }
    Ok(true)
}

impl Contract {
    /// Runs the contract over every input in the bounded domain.
    pub fn run(&self) -> RunResult {
        self.run_with_pre(&self.pre)
    }

    /// Same sweep with a substituted precondition list; this is how the
    /// redundancy analyses rerun the contract with predicates removed.
    pub fn run_with_pre(&self, pre: &[Predicate]) -> RunResult {
        let mut result = RunResult::default();
        for input in self.domain.inputs() {
            result.considered_inputs += 1;
            match self.check_input(pre, &input) {
                Verdict::PreFailed => {}
                Verdict::PreError => result.violations += 1,
                Verdict::Holds => result.satisfying_pre += 1,
                Verdict::Nonterminating => {
                    result.satisfying_pre += 1;
                    result.nontermination += 1;
                }
                Verdict::Violated => {
                    result.satisfying_pre += 1;
                    result.violations += 1;
                }
            }
        }
        result
    }

    /// First input, in enumeration order, that passes the preconditions
    /// and then times out, violates a postcondition, or errors.
    pub fn find_counterexample(&self) -> Option<Input> {
        self.find_counterexample_with_pre(&self.pre)
    }

    pub fn find_counterexample_with_pre(&self, pre: &[Predicate]) -> Option<Input> {
        self.domain.inputs().find(|input| {
            matches!(
                self.check_input(pre, input),
                Verdict::PreError | Verdict::Nonterminating | Verdict::Violated
            )
        })
    }

    /// Per-input logic shared by the sweep and the counterexample search.
    /// Evaluator/executor errors are a verdict, never a panic and never
    /// fatal to the sweep.
    fn check_input(&self, pre: &[Predicate], input: &Input) -> Verdict {
        let mut env: Env = input
            .iter()
            .map(|(name, value)| (name.clone(), Value::Int(*value)))
            .collect();

        match eval_all(pre, &env) {
            Err(_) => return Verdict::PreError,
            Ok(false) => return Verdict::PreFailed,
            Ok(true) => {}
        }

        let outcome = match execute(&self.program.stmts, &mut env, self.step_limit) {
            Err(_) => return Verdict::Violated,
            Ok(outcome) => outcome,
        };
        if outcome.exceeded {
            return Verdict::Nonterminating;
        }

        match eval_all(&self.post, &env) {
            Ok(true) => Verdict::Holds,
            Ok(false) | Err(_) => Verdict::Violated,
        }
    }
}
