//! Ternary node state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The state of a single node: -1, 0 or +1.
///
/// `Neutral` is the blank state every node starts in. Stored memories are
/// expected to use only `Low` and `High`, but storage does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Activation {
    Low,
    #[default]
    Neutral,
    High,
}

impl Activation {
    /// Apply the sign rule to a weighted input sum.
    pub fn from_sum(sum: f64) -> Self {
        if sum > 0.0 {
            Activation::High
        } else if sum < 0.0 {
            Activation::Low
        } else {
            Activation::Neutral
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Activation::Low => -1,
            Activation::Neutral => 0,
            Activation::High => 1,
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.as_i8())
    }

    /// The value a pointer click produces: `High` flips to `Low`, anything
    /// else becomes `High`.
    pub fn toggled(self) -> Self {
        match self {
            Activation::High => Activation::Low,
            _ => Activation::High,
        }
    }

    pub fn is_high(self) -> bool {
        self == Activation::High
    }
}

impl From<Activation> for i8 {
    fn from(a: Activation) -> Self {
        a.as_i8()
    }
}

impl TryFrom<i8> for Activation {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            -1 => Ok(Activation::Low),
            0 => Ok(Activation::Neutral),
            1 => Ok(Activation::High),
            other => Err(format!("activation must be -1, 0 or 1, got {}", other)),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// Convert a slice of integers into activations.
///
/// Handy for tests and for callers that think of patterns as `[1, -1, ...]`.
pub fn pattern_from_ints(values: &[i8]) -> std::result::Result<Vec<Activation>, String> {
    values.iter().map(|&v| Activation::try_from(v)).collect()
}

/// Number of positions where two patterns disagree.
pub fn hamming_distance(a: &[Activation], b: &[Activation]) -> usize {
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count() + a.len().abs_diff(b.len())
}
