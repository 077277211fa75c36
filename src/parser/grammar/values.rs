//! Numbers, triples, delval lists and port references
//!
//! ```text
//! real_triple  = '(' ')' | '(' triple ')'
//! triple       = FLOAT | FLOAT? ':' FLOAT? ':' FLOAT?     (at least one FLOAT)
//! delval_list  = real_triple+
//! port_spec    = pin | '(' (posedge | negedge) pin ')'
//! pin          = STRING | FLOAT
//! ```

use crate::error::{Error, Result};
use crate::model::{DelayPathSet, Edge, PortSpec, Slot, Triple};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Parse a parenthesized triple: `(1:2:3)`, `(1::3)`, `(5)` or `()`
pub fn real_triple(p: &mut Parser<'_>) -> Result<Triple> {
    p.expect(SyntaxKind::L_PAREN)?;
    if p.eat(SyntaxKind::R_PAREN) {
        return Ok(Triple::Absent);
    }
    let triple = bare_triple(p)?;
    p.expect(SyntaxKind::R_PAREN)?;
    Ok(triple)
}

/// Parse a triple without parentheses, as in `(VOLTAGE 5.5:5.0:4.5)`.
///
/// A lone number is a scalar. With colons both must be present and at least
/// one of the three positions must hold a number.
pub fn bare_triple(p: &mut Parser<'_>) -> Result<Triple> {
    let min = number(p)?;
    if !p.at(SyntaxKind::COLON) {
        return min.map(Triple::Scalar).ok_or_else(|| p.error());
    }
    p.bump();
    let avg = number(p)?;
    p.expect(SyntaxKind::COLON)?;
    let max = number(p)?;

    if min.is_none() && avg.is_none() && max.is_none() {
        return Err(p.error());
    }
    Ok(Triple::min_typ_max(min, avg, max))
}

/// Consume a FLOAT if present
fn number(p: &mut Parser<'_>) -> Result<Option<f64>> {
    if !p.at(SyntaxKind::FLOAT) {
        return Ok(None);
    }
    let line = p.line();
    let text = p.bump();
    let value: f64 = text.parse().map_err(|_| Error::parse_at(text, line))?;
    if !value.is_finite() {
        return Err(Error::semantic(
            "number out of range",
            format!("'{text}' at line {line}"),
        ));
    }
    Ok(Some(value))
}

/// True when the cursor is on a `(` that opens a real triple
pub fn at_real_triple(p: &Parser<'_>) -> bool {
    p.at(SyntaxKind::L_PAREN)
        && matches!(
            p.nth(1),
            SyntaxKind::FLOAT | SyntaxKind::COLON | SyntaxKind::R_PAREN
        )
}

/// Parse consecutive real triples
pub fn delval_list(p: &mut Parser<'_>) -> Result<Vec<Triple>> {
    let mut values = Vec::new();
    while at_real_triple(p) {
        values.push(real_triple(p)?);
    }
    Ok(values)
}

/// Parse a delay-kind delval list and lay it out by length.
///
/// `context` locates the enclosing construct and becomes the arity error's
/// context unchanged.
pub fn delay_paths(p: &mut Parser<'_>, context: &str) -> Result<DelayPathSet> {
    let values = delval_list(p)?;
    let count = values.len();
    DelayPathSet::from_delval_list(values).ok_or_else(|| {
        Error::semantic(
            format!("delval list has {count} values, expected 1, 2, 3, 6 or 12"),
            context,
        )
    })
}

/// Parse exactly one triple per slot
pub fn fixed_values(p: &mut Parser<'_>, slots: &[Slot]) -> Result<DelayPathSet> {
    let values = slots
        .iter()
        .map(|_| real_triple(p))
        .collect::<Result<Vec<_>>>()?;
    Ok(DelayPathSet::from_slots(slots, values))
}

/// Parse a pin name
pub fn pin(p: &mut Parser<'_>) -> Result<String> {
    p.expect_any(&[SyntaxKind::STRING, SyntaxKind::FLOAT])
        .map(str::to_string)
}

/// Parse a pin, optionally wrapped as `(posedge pin)` / `(negedge pin)`
pub fn port_spec(p: &mut Parser<'_>) -> Result<PortSpec> {
    if !p.at(SyntaxKind::L_PAREN) {
        return Ok(PortSpec::new(pin(p)?, None));
    }
    p.bump();
    let edge = match p.current_kind() {
        SyntaxKind::POSEDGE_KW => Edge::Posedge,
        SyntaxKind::NEGEDGE_KW => Edge::Negedge,
        _ => return Err(p.error()),
    };
    p.bump();
    let name = pin(p)?;
    p.expect(SyntaxKind::R_PAREN)?;
    Ok(PortSpec::new(name, Some(edge)))
}
