#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::fmt;

/// Runtime value of the tiny language: integers and booleans only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    /// Truthiness: a nonzero integer is true.
    pub fn is_truthy(self) -> bool {
        match self {
            Value::Int(n) => n != 0,
            Value::Bool(b) => b,
        }
    }

    /// Numeric view: booleans coerce to 0/1 in arithmetic and comparisons.
    pub fn as_int(self) -> i64 {
        match self {
            Value::Int(n) => n,
            Value::Bool(b) => b as i64,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Mutable execution state for one enumerated input. Created fresh per
/// input, extended (never reset) as assignments execute, discarded after
/// the input's run completes.
pub type Env = HashMap<String, Value>;
