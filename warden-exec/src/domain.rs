#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use miette::Diagnostic;
use thiserror::Error;

/// One enumerated input assignment. Ordered by name, so it prints and
/// serializes deterministically; this is the counterexample surface type.
pub type Input = BTreeMap<String, i64>;

#[derive(Debug, Error, Diagnostic)]
#[error("invalid range for {name}: min {min} > max {max}")]
#[diagnostic(code(warden::invalid_range))]
pub struct InvalidRange {
    pub name: String,
    pub min: i64,
    pub max: i64,
}

/// Finite input domain: each variable ranges over an inclusive integer
/// interval. `min <= max` holds for every variable by construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputDomain {
    ranges: BTreeMap<String, (i64, i64)>,
}

impl InputDomain {
    pub fn new(
        ranges: impl IntoIterator<Item = (String, (i64, i64))>,
    ) -> Result<Self, InvalidRange> {
        let ranges: BTreeMap<String, (i64, i64)> = ranges.into_iter().collect();
        for (name, (min, max)) in &ranges {
            if min > max {
                return Err(InvalidRange {
                    name: name.clone(),
                    min: *min,
                    max: *max,
                });
            }
        }
        Ok(Self { ranges })
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }

    /// Number of inputs in the Cartesian product, saturating at `u64::MAX`.
    /// The empty domain has exactly one input: the empty assignment.
    pub fn len(&self) -> u64 {
        let mut total: u128 = 1;
        for (min, max) in self.ranges.values() {
            let width = (*max as i128 - *min as i128 + 1) as u128;
            total = total.saturating_mul(width);
            if total > u64::MAX as u128 {
                return u64::MAX;
            }
        }
        total as u64
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Enumerates every input, in a fixed deterministic order: variables
    /// sorted by name, each range iterated `min..=max`, the last-sorted
    /// variable varying fastest. Restartable: each call yields the same
    /// sequence.
    pub fn inputs(&self) -> InputIter<'_> {
        let vars: Vec<(&str, i64, i64)> = self
            .ranges
            .iter()
            .map(|(name, (min, max))| (name.as_str(), *min, *max))
            .collect();
        let current = vars.iter().map(|(_, min, _)| *min).collect();
        InputIter {
            vars,
            current,
            done: false,
        }
    }
}

pub struct InputIter<'a> {
    vars: Vec<(&'a str, i64, i64)>,
    current: Vec<i64>,
    done: bool,
}

impl Iterator for InputIter<'_> {
    type Item = Input;

    fn next(&mut self) -> Option<Input> {
        if self.done {
            return None;
        }

        let item: Input = self
            .vars
            .iter()
            .zip(&self.current)
            .map(|((name, _, _), value)| (name.to_string(), *value))
            .collect();

        // Odometer advance, least-significant position last.
        let mut pos = self.vars.len();
        loop {
            if pos == 0 {
                self.done = true;
                break;
            }
            pos -= 1;
            if self.current[pos] < self.vars[pos].2 {
                self.current[pos] += 1;
                for reset in pos + 1..self.vars.len() {
                    self.current[reset] = self.vars[reset].1;
                }
                break;
            }
        }

        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(ranges: &[(&str, i64, i64)]) -> InputDomain {
        InputDomain::new(
            ranges
                .iter()
                .map(|(name, min, max)| (name.to_string(), (*min, *max))),
        )
        .unwrap()
    }

    #[test]
    fn inputs_enumerate_cartesian_product_in_order() {
        let d = domain(&[("b", 0, 1), ("a", 0, 2)]);
        let all: Vec<Input> = d.inputs().collect();
        assert_eq!(all.len() as u64, d.len());
        assert_eq!(d.len(), 6);
        // Sorted by name: "a" is most significant, "b" varies fastest.
        let pairs: Vec<(i64, i64)> = all.iter().map(|i| (i["a"], i["b"])).collect();
        assert_eq!(
            pairs,
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn inputs_are_restartable() {
        let d = domain(&[("n", -2, 2)]);
        let first: Vec<Input> = d.inputs().collect();
        let second: Vec<Input> = d.inputs().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_domain_has_one_empty_input() {
        let d = InputDomain::default();
        let all: Vec<Input> = d.inputs().collect();
        assert_eq!(all, vec![Input::new()]);
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn invalid_range_is_rejected_at_construction() {
        let err = InputDomain::new([("n".to_string(), (3, -3))]).unwrap_err();
        assert_eq!(err.name, "n");
        assert_eq!((err.min, err.max), (3, -3));
    }

    #[test]
    fn singleton_range_is_fine() {
        let d = domain(&[("n", 5, 5)]);
        let all: Vec<Input> = d.inputs().collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["n"], 5);
    }
}
