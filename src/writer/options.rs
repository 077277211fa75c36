//! Emission options

use crate::model::Timescale;

/// Options controlling how a [`Model`](crate::model::Model) is written out
#[derive(Debug, Clone, PartialEq)]
pub struct EmitOptions {
    /// Written as the `TIMESCALE` clause in place of the header's own value
    pub timescale_override: Option<Timescale>,
    /// Uppercase every `CELLTYPE` name
    pub uppercase_celltype: bool,
    /// One level of indentation
    pub indent_unit: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            timescale_override: None,
            uppercase_celltype: false,
            indent_unit: "  ".to_string(),
        }
    }
}

impl EmitOptions {
    pub fn with_timescale(mut self, timescale: Timescale) -> Self {
        self.timescale_override = Some(timescale);
        self
    }

    pub fn with_uppercase_celltype(mut self, uppercase: bool) -> Self {
        self.uppercase_celltype = uppercase;
        self
    }

    pub fn with_indent_unit(mut self, indent_unit: impl Into<String>) -> Self {
        self.indent_unit = indent_unit.into();
        self
    }

    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        self.indent_unit.repeat(level)
    }
}
