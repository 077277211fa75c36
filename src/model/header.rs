//! `DELAYFILE` header fields

use std::fmt;

use super::{Timescale, Triple};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hierarchy separator declared by `(DIVIDER ...)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Divider {
    #[cfg_attr(feature = "serde", serde(rename = "."))]
    Dot,
    #[cfg_attr(feature = "serde", serde(rename = "/"))]
    Slash,
}

impl Divider {
    pub fn as_char(self) -> char {
        match self {
            Divider::Dot => '.',
            Divider::Slash => '/',
        }
    }
}

impl fmt::Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Header of an SDF file. Every field is optional; a clause that was not
/// present (or was present with no value) is `None`.
///
/// Fields are declared in emission order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Header {
    pub sdfversion: Option<String>,
    pub design: Option<String>,
    pub date: Option<String>,
    pub vendor: Option<String>,
    pub program: Option<String>,
    pub version: Option<String>,
    pub divider: Option<Divider>,
    pub voltage: Option<Triple>,
    pub process: Option<String>,
    pub temperature: Option<Triple>,
    pub timescale: Option<Timescale>,
}

impl Header {
    /// True when no clause carries a value
    pub fn is_empty(&self) -> bool {
        *self == Header::default()
    }

    /// Quoted string fields paired with their keywords, in emission order
    pub(crate) fn quoted_fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("SDFVERSION", self.sdfversion.as_deref()),
            ("DESIGN", self.design.as_deref()),
            ("DATE", self.date.as_deref()),
            ("VENDOR", self.vendor.as_deref()),
            ("PROGRAM", self.program.as_deref()),
            ("VERSION", self.version.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header_is_empty() {
        assert!(Header::default().is_empty());
        let header = Header {
            sdfversion: Some("3.0".into()),
            ..Header::default()
        };
        assert!(!header.is_empty());
    }

    #[test]
    fn test_quoted_fields_order() {
        let header = Header {
            design: Some("BIGCHIP".into()),
            ..Header::default()
        };
        let keys: Vec<_> = header.quoted_fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["SDFVERSION", "DESIGN", "DATE", "VENDOR", "PROGRAM", "VERSION"]);
        assert_eq!(header.quoted_fields()[1].1, Some("BIGCHIP"));
    }

    #[test]
    fn test_divider_char() {
        assert_eq!(Divider::Dot.to_string(), ".");
        assert_eq!(Divider::Slash.as_char(), '/');
    }
}
