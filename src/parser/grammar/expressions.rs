//! Conditional equations (`COND`)
//!
//! ```text
//! expression = operand (binary_op operand)*
//! operand    = unary_op* primary
//! primary    = STRING | FLOAT | SCALAR_CONSTANT | '(' expression ')'
//! ```
//!
//! No precedence is applied: the equation is kept as the flat token sequence
//! it was written in, parentheses included. The expression ends at the first
//! token that cannot continue it, which is how `(COND 1'b0 por)` separates the
//! equation `1'b0` from the port `por`.

use crate::error::Result;
use crate::model::CondEquation;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Parse a conditional equation into its token sequence
pub fn cond_equation(p: &mut Parser<'_>) -> Result<CondEquation> {
    let mut tokens = Vec::new();
    expression(p, &mut tokens)?;
    Ok(CondEquation::new(tokens))
}

fn expression(p: &mut Parser<'_>, out: &mut Vec<String>) -> Result<()> {
    operand(p, out)?;
    while p.current_kind().is_binary_operator() {
        out.push(p.bump().to_string());
        operand(p, out)?;
    }
    Ok(())
}

fn operand(p: &mut Parser<'_>, out: &mut Vec<String>) -> Result<()> {
    while p.current_kind().is_unary_operator() {
        out.push(p.bump().to_string());
    }
    primary(p, out)
}

fn primary(p: &mut Parser<'_>, out: &mut Vec<String>) -> Result<()> {
    match p.current_kind() {
        SyntaxKind::STRING | SyntaxKind::FLOAT | SyntaxKind::SCALAR_CONSTANT => {
            out.push(p.bump().to_string());
            Ok(())
        }
        // `(` before a keyword opens the wrapped entry or port, not a group
        SyntaxKind::L_PAREN if !p.nth(1).is_keyword() => {
            out.push(p.bump().to_string());
            expression(p, out)?;
            out.push(p.expect(SyntaxKind::R_PAREN)?.to_string());
            Ok(())
        }
        _ => Err(p.error()),
    }
}
