//! Foundation types for the SDF toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`] - 1-based line/column positions for diagnostics
//! - [`TextSize`] - Byte offsets into the source text
//!
//! This module has NO dependencies on other sdf_timing modules.

mod position;

pub use position::Position;

// Re-export text-size types for convenience
pub use text_size::{self, TextSize};
