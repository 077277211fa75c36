//! SDF parser
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind, trivia dropped
//!     ↓
//! Parser → cursor over the token buffer
//!     ↓
//! grammar → productions feeding a Builder
//!     ↓
//! Model
//! ```
//!
//! Every call to [`parse`] owns its lexer, parser and builder, so separate
//! inputs can be parsed on separate threads. [`parse_batch`] does exactly
//! that over a rayon pool.

#[allow(clippy::module_inception)]
mod parser;

pub mod grammar;
mod lexer;
mod syntax_kind;

use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::model::Model;

pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parser, parse};
pub use syntax_kind::SyntaxKind;

/// Parse independent SDF texts in parallel.
///
/// Results keep the order of `inputs`; one failing input does not affect the
/// others.
pub fn parse_batch<S: AsRef<str> + Sync>(inputs: &[S]) -> Vec<Result<Model>> {
    debug!("[PARSE] batch of {} inputs", inputs.len());
    inputs
        .par_iter()
        .map(|input| parse(input.as_ref()))
        .collect()
}
