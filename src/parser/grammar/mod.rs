//! Grammar for SDF delay files
//!
//! Each production is a free function over a [`Parser`] cursor. Productions
//! that produce timing entries push them straight into the [`Builder`], so a
//! successful parse ends with a finished model and nothing else to walk.
//!
//! - `header` - header clauses (`SDFVERSION` .. `TIMESCALE`)
//! - `cell` - `CELL` blocks and `DELAY` entries
//! - `timing` - `TIMINGCHECK` and `TIMINGENV` entries
//! - `values` - triples, delval lists and port references
//! - `expressions` - `COND` equations
//!
//! ```text
//! delay_file = '(' DELAYFILE header cell* ')' EOF
//! ```

pub mod cell;
pub mod expressions;
pub mod header;
pub mod timing;
pub mod values;

use tracing::trace;

use crate::error::Result;
use crate::model::Builder;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Parse a whole delay file into `builder`
pub fn delay_file(p: &mut Parser<'_>, builder: &mut Builder) -> Result<()> {
    p.expect(SyntaxKind::L_PAREN)?;
    p.expect(SyntaxKind::DELAYFILE_KW)?;
    header::header(p, builder.header_mut())?;

    let mut cells = 0usize;
    while p.at(SyntaxKind::L_PAREN) && p.nth(1) == SyntaxKind::CELL_KW {
        cell::cell(p, builder)?;
        cells += 1;
    }
    trace!("[GRAMMAR] {} cell blocks", cells);

    p.expect(SyntaxKind::R_PAREN)?;
    if !p.at_eof() {
        return Err(p.error());
    }
    Ok(())
}
