#![forbid(unsafe_code)]

mod contract;
mod domain;
mod eval;
mod exec;
mod spec;
mod value;

pub use contract::{Contract, Predicate, RunResult};
pub use domain::{Input, InputDomain, InputIter, InvalidRange};
pub use eval::{eval, EvalError};
pub use exec::{execute, ExecOutcome};
pub use spec::{parse_spec, parse_spec_with_limit, ContractSpec, SpecError, DEFAULT_STEP_LIMIT};
pub use value::{Env, Value};
