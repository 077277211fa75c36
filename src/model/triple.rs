//! Delay values

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single delay value as written in a delval list.
///
/// The source shape is preserved: `(5)` is a [`Triple::Scalar`], `(1:2:3)`
/// and `(1::3)` are [`Triple::MinTypMax`] with omitted positions as `None`,
/// and `()` is [`Triple::Absent`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Triple {
    /// No value annotated.
    #[default]
    Absent,
    /// One number standing for all three operating conditions.
    Scalar(f64),
    /// Separate minimum, typical and maximum values.
    MinTypMax {
        min: Option<f64>,
        avg: Option<f64>,
        max: Option<f64>,
    },
}

impl Triple {
    pub fn scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    pub fn min_typ_max(min: Option<f64>, avg: Option<f64>, max: Option<f64>) -> Self {
        Self::MinTypMax { min, avg, max }
    }

    /// True when no number is present at all.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Scalar(_) => false,
            Self::MinTypMax { min, avg, max } => min.is_none() && avg.is_none() && max.is_none(),
        }
    }

    /// True when every present number is finite
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Scalar(v) => v.is_finite(),
            Self::MinTypMax { min, avg, max } => {
                [min, avg, max].into_iter().flatten().all(|v| v.is_finite())
            }
        }
    }

    /// The single value of a scalar triple
    pub fn all(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn min(&self) -> Option<f64> {
        match self {
            Self::MinTypMax { min, .. } => *min,
            _ => None,
        }
    }

    pub fn avg(&self) -> Option<f64> {
        match self {
            Self::MinTypMax { avg, .. } => *avg,
            _ => None,
        }
    }

    pub fn max(&self) -> Option<f64> {
        match self {
            Self::MinTypMax { max, .. } => *max,
            _ => None,
        }
    }

    /// Render without the surrounding parentheses, as header clauses use it
    /// (`5.5:5:4.5`). Returns `None` when nothing could be re-read.
    pub fn to_bare_string(&self) -> Option<String> {
        if self.is_absent() {
            return None;
        }
        Some(match self {
            Self::Scalar(v) => v.to_string(),
            Self::MinTypMax { min, avg, max } => {
                format!("{}:{}:{}", component(*min), component(*avg), component(*max))
            }
            Self::Absent => String::new(),
        })
    }
}

fn component(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Parenthesized form used inside delval lists.
impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_bare_string() {
            Some(bare) => write!(f, "({bare})"),
            None => f.write_str("()"),
        }
    }
}
