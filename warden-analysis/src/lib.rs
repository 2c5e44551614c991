#![forbid(unsafe_code)]

mod implication;
mod redundancy;

pub use implication::{implied_by_rest, implies_bounded};
pub use redundancy::{analyze_redundancy, single_redundant, RedundancyReport};
