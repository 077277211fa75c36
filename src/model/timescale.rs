//! The `TIMESCALE` header value

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time unit of a timescale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeUnit {
    Fs,
    Ps,
    Ns,
    Us,
    Ms,
    S,
}

impl TimeUnit {
    const ALL: [TimeUnit; 6] = [
        TimeUnit::Fs,
        TimeUnit::Ps,
        TimeUnit::Ns,
        TimeUnit::Us,
        TimeUnit::Ms,
        TimeUnit::S,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Fs => "fs",
            TimeUnit::Ps => "ps",
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "us",
            TimeUnit::Ms => "ms",
            TimeUnit::S => "s",
        }
    }

    /// Length of one unit in femtoseconds
    pub fn femtoseconds(self) -> u64 {
        match self {
            TimeUnit::Fs => 1,
            TimeUnit::Ps => 1_000,
            TimeUnit::Ns => 1_000_000,
            TimeUnit::Us => 1_000_000_000,
            TimeUnit::Ms => 1_000_000_000_000,
            TimeUnit::S => 1_000_000_000_000_000,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.as_str() == name)
    }
}

/// A `(magnitude, unit)` pair such as `100 ps`.
///
/// Only the magnitudes 1, 10 and 100 exist in SDF, so a `Timescale` can only
/// be built through [`Timescale::new`] or [`str::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Timescale {
    magnitude: u32,
    unit: TimeUnit,
}

impl Timescale {
    pub fn new(magnitude: u32, unit: TimeUnit) -> Result<Self> {
        if !matches!(magnitude, 1 | 10 | 100) {
            return Err(Error::semantic(
                "malformed timescale",
                format!("magnitude {magnitude} is not 1, 10 or 100"),
            ));
        }
        Ok(Self { magnitude, unit })
    }

    pub fn magnitude(&self) -> u32 {
        self.magnitude
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn to_femtoseconds(&self) -> u64 {
        u64::from(self.magnitude) * self.unit.femtoseconds()
    }
}

/// One picosecond.
impl Default for Timescale {
    fn default() -> Self {
        Self {
            magnitude: 1,
            unit: TimeUnit::Ps,
        }
    }
}

impl FromStr for Timescale {
    type Err = Error;

    /// Accepts `1ps`, `10 ns`, `1.0 us` and the like.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::semantic("malformed timescale", format!("'{s}'"));

        let text = s.trim();
        let split = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(text.len());
        let (number, unit) = text.split_at(split);

        let value: f64 = number.parse().map_err(|_| malformed())?;
        let magnitude = [1u32, 10, 100]
            .into_iter()
            .find(|m| f64::from(*m) == value)
            .ok_or_else(malformed)?;
        let unit = TimeUnit::from_name(unit.trim()).ok_or_else(malformed)?;

        Ok(Self { magnitude, unit })
    }
}

impl fmt::Display for Timescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit.as_str())
    }
}

impl TryFrom<String> for Timescale {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Timescale> for String {
    fn from(value: Timescale) -> Self {
        value.to_string()
    }
}
