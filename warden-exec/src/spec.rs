#![forbid(unsafe_code)]

use miette::Diagnostic;
use serde_json::Value as Json;
use thiserror::Error;
use warden_ast::{AssignStmt, IfStmt, Program, Stmt, WhileStmt};
use warden_parse::{parse_predicate, UnsafeExpression};

use crate::contract::{Contract, Predicate};
use crate::domain::{InputDomain, InvalidRange};

pub const DEFAULT_STEP_LIMIT: u64 = 10_000;

#[derive(Debug, Error, Diagnostic)]
pub enum SpecError {
    #[error("spec is not valid JSON: {0}")]
    #[diagnostic(code(warden::spec::json))]
    Json(#[from] serde_json::Error),

    #[error("unknown statement at {at}: expected one of \"assign\", \"if\", \"while\"")]
    #[diagnostic(code(warden::spec::unknown_stmt))]
    UnknownStatement { at: String },

    #[error("malformed program: {message}")]
    #[diagnostic(code(warden::spec::malformed))]
    MalformedProgram { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnsafeExpression(#[from] UnsafeExpression),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidRange(#[from] InvalidRange),
}

fn malformed(message: impl Into<String>) -> SpecError {
    SpecError::MalformedProgram {
        message: message.into(),
    }
}

/// A loaded specification: the contract plus the file's descriptive title,
/// when present.
#[derive(Clone, Debug)]
pub struct ContractSpec {
    pub title: Option<String>,
    pub contract: Contract,
}

/// Parses a JSON specification into a typed contract.
///
/// This is the single validation point for untrusted input: statement
/// shapes, expression text, bounds, and the step limit are all checked
/// here, before any enumeration begins. Every error is fatal to the whole
/// analysis.
pub fn parse_spec(text: &str) -> Result<ContractSpec, SpecError> {
    parse_spec_with_limit(text, None)
}

/// Same, with a caller-supplied override for the file's `step_limit`.
pub fn parse_spec_with_limit(
    text: &str,
    step_limit_override: Option<u64>,
) -> Result<ContractSpec, SpecError> {
    let root: Json = serde_json::from_str(text)?;
    let root = root
        .as_object()
        .ok_or_else(|| malformed("spec must be a JSON object"))?;

    let title = root
        .get("title")
        .and_then(Json::as_str)
        .map(str::to_string);

    let program = Program {
        stmts: convert_block(
            root.get("program")
                .ok_or_else(|| malformed("spec is missing \"program\""))?,
            "program",
        )?,
    };

    let pre = convert_predicates(root.get("pre"), "pre")?;
    let post = convert_predicates(root.get("post"), "post")?;

    let domain = convert_inputs(
        root.get("inputs")
            .ok_or_else(|| malformed("spec is missing \"inputs\""))?,
    )?;

    let step_limit = match step_limit_override {
        Some(limit) => limit,
        None => match root.get("step_limit") {
            None => DEFAULT_STEP_LIMIT,
            Some(value) => value
                .as_u64()
                .ok_or_else(|| malformed("step_limit must be a positive integer"))?,
        },
    };
    if step_limit == 0 {
        return Err(malformed("step_limit must be a positive integer"));
    }

    Ok(ContractSpec {
        title,
        contract: Contract {
            program,
            pre,
            post,
            domain,
            step_limit,
        },
    })
}

fn convert_predicates(value: Option<&Json>, field: &str) -> Result<Vec<Predicate>, SpecError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let items = value
        .as_array()
        .ok_or_else(|| malformed(format!("{field} must be a list of expression strings")))?;
    items
        .iter()
        .map(|item| {
            let text = item
                .as_str()
                .ok_or_else(|| malformed(format!("{field} entries must be strings")))?;
            Ok(Predicate::parse(text)?)
        })
        .collect()
}

fn convert_inputs(value: &Json) -> Result<InputDomain, SpecError> {
    let entries = value
        .as_object()
        .ok_or_else(|| malformed("inputs must be an object of {min, max} bounds"))?;
    let mut ranges = Vec::with_capacity(entries.len());
    for (name, bounds) in entries {
        let bounds = bounds
            .as_object()
            .ok_or_else(|| malformed(format!("inputs.{name} must be an object")))?;
        let min = bound_int(bounds.get("min"), name, "min")?;
        let max = bound_int(bounds.get("max"), name, "max")?;
        ranges.push((name.clone(), (min, max)));
    }
    Ok(InputDomain::new(ranges)?)
}

fn bound_int(value: Option<&Json>, name: &str, which: &str) -> Result<i64, SpecError> {
    value
        .and_then(Json::as_i64)
        .ok_or_else(|| malformed(format!("inputs.{name}.{which} must be an integer")))
}

fn convert_block(value: &Json, at: &str) -> Result<Vec<Stmt>, SpecError> {
    let items = value
        .as_array()
        .ok_or_else(|| malformed(format!("{at} must be a list of statements")))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| convert_stmt(item, &format!("{at}[{index}]")))
        .collect()
}

fn convert_stmt(value: &Json, at: &str) -> Result<Stmt, SpecError> {
    let record = value
        .as_object()
        .ok_or_else(|| malformed(format!("{at} must be an object")))?;

    if let Some(assign) = record.get("assign") {
        let targets = assign
            .as_object()
            .ok_or_else(|| malformed(format!("{at}.assign must be an object")))?;
        // Spec-file object order is the application order.
        let targets = targets
            .iter()
            .map(|(name, expr)| Ok((name.clone(), parse_expr_field(expr, at)?)))
            .collect::<Result<Vec<_>, SpecError>>()?;
        return Ok(Stmt::Assign(AssignStmt { targets }));
    }

    if let Some(branch) = record.get("if") {
        let branch = branch
            .as_object()
            .ok_or_else(|| malformed(format!("{at}.if must be an object")))?;
        let cond = branch
            .get("cond")
            .ok_or_else(|| malformed(format!("{at}.if is missing \"cond\"")))?;
        return Ok(Stmt::If(IfStmt {
            cond: parse_expr_field(cond, at)?,
            then_block: optional_block(branch.get("then"), &format!("{at}.if.then"))?,
            else_block: optional_block(branch.get("else"), &format!("{at}.if.else"))?,
        }));
    }

    if let Some(repeat) = record.get("while") {
        let repeat = repeat
            .as_object()
            .ok_or_else(|| malformed(format!("{at}.while must be an object")))?;
        let cond = repeat
            .get("cond")
            .ok_or_else(|| malformed(format!("{at}.while is missing \"cond\"")))?;
        return Ok(Stmt::While(WhileStmt {
            cond: parse_expr_field(cond, at)?,
            body: optional_block(repeat.get("body"), &format!("{at}.while.body"))?,
        }));
    }

    Err(SpecError::UnknownStatement { at: at.to_string() })
}

fn optional_block(value: Option<&Json>, at: &str) -> Result<Vec<Stmt>, SpecError> {
    match value {
        None => Ok(Vec::new()),
        Some(value) => convert_block(value, at),
    }
}

fn parse_expr_field(value: &Json, at: &str) -> Result<warden_ast::Expr, SpecError> {
    // Bare integer literals are accepted where expression text is
    // expected, so `{"assign": {"x": 0}}` works like `{"assign": {"x": "0"}}`.
    let owned;
    let text = match value {
        Json::String(text) => text.as_str(),
        Json::Number(n) if n.is_i64() => {
            owned = n.to_string();
            owned.as_str()
        }
        _ => {
            return Err(malformed(format!(
                "{at}: expression must be a string"
            )));
        }
    };
    Ok(parse_predicate(text)?)
}
