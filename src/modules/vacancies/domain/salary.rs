//! Salary bounds as published by the vacancy source and the single
//! representative figure derived from them.
//!
//! A bound of `0` is a real value. Only an absent bound counts as missing,
//! so `{from: 0, to: None}` has a representative salary of `0.0`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional lower/upper salary bounds. `from <= to` is not enforced; source
/// data is stored exactly as received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl SalaryRange {
    pub fn new(from: Option<i32>, to: Option<i32>) -> Self {
        Self { from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Mean of both bounds, the single bound when only one is present, or
    /// `None` when the vacancy must stay out of salary aggregates.
    pub fn representative(&self) -> Option<f64> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((f64::from(from) + f64::from(to)) / 2.0),
            (Some(value), None) | (None, Some(value)) => Some(f64::from(value)),
            (None, None) => None,
        }
    }
}

/// Renders one bound, falling back to the placeholder text.
pub struct SalaryBound(pub Option<i32>);

impl fmt::Display for SalaryBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => f.write_str(super::entities::NOT_SPECIFIED),
        }
    }
}

impl fmt::Display for SalaryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "from {} to {}",
            SalaryBound(self.from),
            SalaryBound(self.to)
        )
    }
}
