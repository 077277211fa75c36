//! Header clauses
//!
//! ```text
//! header        = header_clause*
//! header_clause = '(' header_kw value? ')'
//! ```
//!
//! Quoted fields take a QSTRING or QFLOAT, `DIVIDER` takes `.` or `/`,
//! `VOLTAGE` and `TEMPERATURE` take a bare triple, and `TIMESCALE` takes a
//! number followed by a unit.

use tracing::trace;

use super::values::bare_triple;
use crate::error::{Error, Result};
use crate::model::{Divider, Header, Timescale};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// True for keywords that open a header clause
pub fn is_header_keyword(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::SDFVERSION_KW
            | SyntaxKind::DESIGN_KW
            | SyntaxKind::DATE_KW
            | SyntaxKind::VENDOR_KW
            | SyntaxKind::PROGRAM_KW
            | SyntaxKind::VERSION_KW
            | SyntaxKind::DIVIDER_KW
            | SyntaxKind::VOLTAGE_KW
            | SyntaxKind::PROCESS_KW
            | SyntaxKind::TEMPERATURE_KW
            | SyntaxKind::TIMESCALE_KW
    )
}

/// Parse every header clause at the cursor into `header`
pub fn header(p: &mut Parser<'_>, out: &mut Header) -> Result<()> {
    while p.at(SyntaxKind::L_PAREN) && is_header_keyword(p.nth(1)) {
        header_clause(p, out)?;
    }
    Ok(())
}

fn header_clause(p: &mut Parser<'_>, header: &mut Header) -> Result<()> {
    p.expect(SyntaxKind::L_PAREN)?;
    let keyword = p.current_kind();
    trace!("[HEADER] {}", p.current_text());
    p.bump();

    // A clause without a value leaves the field as it was
    if p.eat(SyntaxKind::R_PAREN) {
        return Ok(());
    }

    match keyword {
        SyntaxKind::SDFVERSION_KW => header.sdfversion = Some(quoted(p)?),
        SyntaxKind::DESIGN_KW => header.design = Some(quoted(p)?),
        SyntaxKind::DATE_KW => header.date = Some(quoted(p)?),
        SyntaxKind::VENDOR_KW => header.vendor = Some(quoted(p)?),
        SyntaxKind::PROGRAM_KW => header.program = Some(quoted(p)?),
        SyntaxKind::VERSION_KW => header.version = Some(quoted(p)?),
        SyntaxKind::PROCESS_KW => header.process = Some(quoted(p)?),
        SyntaxKind::DIVIDER_KW => header.divider = Some(divider(p)?),
        SyntaxKind::VOLTAGE_KW => header.voltage = Some(bare_triple(p)?),
        SyntaxKind::TEMPERATURE_KW => header.temperature = Some(bare_triple(p)?),
        SyntaxKind::TIMESCALE_KW => header.timescale = Some(timescale(p)?),
        _ => return Err(p.error()),
    }

    p.expect(SyntaxKind::R_PAREN)?;
    Ok(())
}

/// Parse a QSTRING or QFLOAT and strip its quotes
pub fn quoted(p: &mut Parser<'_>) -> Result<String> {
    let text = p.expect_any(&[SyntaxKind::QSTRING, SyntaxKind::QFLOAT])?;
    Ok(unquote(text).to_string())
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

fn divider(p: &mut Parser<'_>) -> Result<Divider> {
    let divider = match p.current_kind() {
        SyntaxKind::DOT => Divider::Dot,
        SyntaxKind::SLASH => Divider::Slash,
        _ => return Err(p.error()),
    };
    p.bump();
    Ok(divider)
}

/// `100 ps` lexes as FLOAT then STRING, `1ps` as a single STRING
fn timescale(p: &mut Parser<'_>) -> Result<Timescale> {
    let line = p.line();
    let text = if p.at(SyntaxKind::FLOAT) {
        let number = p.bump();
        let unit = p.expect(SyntaxKind::STRING)?;
        format!("{number} {unit}")
    } else {
        p.expect(SyntaxKind::STRING)?.to_string()
    };
    text.parse().map_err(|err| match err {
        Error::Semantic { reason, context } => {
            Error::semantic(reason, format!("{context} at line {line}"))
        }
        other => other,
    })
}
