#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;
use warden_ast::{BinOp, CmpOp, Expr, ExprKind, Span, UnaryOp};

use crate::value::{Env, Value};

#[derive(Debug, Error, Diagnostic)]
pub enum EvalError {
    #[error("unknown variable: {name}")]
    #[diagnostic(code(warden::unknown_var))]
    UnknownVariable {
        name: String,
        #[label]
        span: Span,
    },

    #[error("modulo by zero")]
    #[diagnostic(code(warden::mod_zero))]
    ModuloByZero {
        #[label]
        span: Span,
    },

    #[error("integer overflow")]
    #[diagnostic(code(warden::overflow))]
    Overflow {
        #[label]
        span: Span,
    },
}

/// Evaluates an expression over `env`.
///
/// `and`/`or` short-circuit on truthiness; comparison chains stop at the
/// first failing pair without evaluating the remaining comparands.
pub fn eval(expr: &Expr, env: &Env) -> Result<Value, EvalError> {
    match &expr.kind {
        ExprKind::IntLit(n) => Ok(Value::Int(*n)),
        ExprKind::BoolLit(b) => Ok(Value::Bool(*b)),
        ExprKind::Var(name) => env.get(name).copied().ok_or_else(|| {
            EvalError::UnknownVariable {
                name: name.clone(),
                span: expr.span,
            }
        }),
        ExprKind::Unary { op, expr: operand } => {
            let value = eval(operand, env)?;
            match op {
                UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                UnaryOp::Neg => value
                    .as_int()
                    .checked_neg()
                    .map(Value::Int)
                    .ok_or(EvalError::Overflow { span: expr.span }),
                UnaryOp::Pos => Ok(Value::Int(value.as_int())),
            }
        }
        ExprKind::Binary { left, op, right } => match op {
            BinOp::And => {
                let lhs = eval(left, env)?;
                if !lhs.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(eval(right, env)?.is_truthy()))
            }
            BinOp::Or => {
                let lhs = eval(left, env)?;
                if lhs.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(eval(right, env)?.is_truthy()))
            }
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Mod => {
                let a = eval(left, env)?.as_int();
                let b = eval(right, env)?.as_int();
                let result = match op {
                    BinOp::Add => a.checked_add(b),
                    BinOp::Sub => a.checked_sub(b),
                    BinOp::Mul => a.checked_mul(b),
                    BinOp::Mod => {
                        if b == 0 {
                            return Err(EvalError::ModuloByZero { span: expr.span });
                        }
                        checked_mod_floor(a, b)
                    }
                    BinOp::And | BinOp::Or => unreachable!(),
                };
                result
                    .map(Value::Int)
                    .ok_or(EvalError::Overflow { span: expr.span })
            }
        },
        ExprKind::Compare { first, rest } => {
            let mut current = eval(first, env)?;
            for (op, node) in rest {
                let rhs = eval(node, env)?;
                if !compare(*op, current, rhs) {
                    return Ok(Value::Bool(false));
                }
                current = rhs;
            }
            Ok(Value::Bool(true))
        }
    }
}

fn compare(op: CmpOp, lhs: Value, rhs: Value) -> bool {
    let (a, b) = (lhs.as_int(), rhs.as_int());
    match op {
        CmpOp::Eq => a == b,
        CmpOp::Ne => a != b,
        CmpOp::Lt => a < b,
        CmpOp::Le => a <= b,
        CmpOp::Gt => a > b,
        CmpOp::Ge => a >= b,
    }
}

/// `%` with the remainder taking the divisor's sign: `-7 % 3 == 2`,
/// `7 % -3 == -2`. The only overflowing case is `i64::MIN % -1`.
fn checked_mod_floor(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && (r < 0) != (b < 0) {
        Some(r + b)
    } else {
        Some(r)
    }
}
