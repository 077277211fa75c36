//! # sdf-timing
//!
//! Reader and writer for Standard Delay Format (SDF) timing annotation files.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! writer    → Model back to SDF text (EmitOptions)
//!   ↓
//! parser    → Logos lexer, recursive-descent grammar, parse_batch
//!   ↓
//! model     → Header, Cell, TimingEntry, Triple, Builder
//!   ↓
//! error     → Lex / Parse / Semantic errors
//!   ↓
//! base      → Primitives (Position, TextSize)
//! ```
//!
//! ```
//! use sdf_timing::{EmitOptions, emit, parse};
//!
//! let model = parse(r#"(DELAYFILE (SDFVERSION "3.0"))"#).unwrap();
//! assert_eq!(model.header.sdfversion.as_deref(), Some("3.0"));
//!
//! let text = emit(&model, &EmitOptions::default()).unwrap();
//! assert_eq!(parse(&text).unwrap(), model);
//! ```

// ============================================================================
// MODULES (dependency order: base → error → model → parser → writer)
// ============================================================================

/// Foundation types: Position, TextSize
pub mod base;

/// Crate-wide error type
pub mod error;

/// Timing model and the builder that assembles it
pub mod model;

/// Parser: Logos lexer, recursive-descent grammar
pub mod parser;

/// Writer: model to SDF text
pub mod writer;

pub use error::{Error, Result};
pub use model::{
    Cell, CellId, CondEquation, CondScope, Condition, DelayMode, DelayPathSet, Divider, Edge,
    EntryKind, Header, Model, PortSpec, Slot, TimeUnit, Timescale, TimingEntry, Triple,
};
pub use parser::{parse, parse_batch};
pub use writer::{EmitOptions, emit};
