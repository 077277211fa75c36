//! Cells and delay blocks
//!
//! ```text
//! cell        = '(' CELL celltype instance timing_spec* ')'
//! celltype    = '(' CELLTYPE (QSTRING | QFLOAT) ')'
//! instance    = '(' INSTANCE (STRING | '*' | FLOAT)? ')'
//! timing_spec = delay | timing_check | timing_env
//! delay       = '(' DELAY deltype+ ')'
//! deltype     = '(' (ABSOLUTE | INCREMENT) del+ ')'
//! del         = '(' IOPATH port_spec port_spec retain? delval_list ')'
//!             | '(' INTERCONNECT port_spec port_spec delval_list ')'
//!             | '(' (PORT | DEVICE) port_spec delval_list ')'
//!             | '(' COND equation del+ ')'
//! retain      = '(' RETAIN delval_list ')'
//! ```

use super::expressions::cond_equation;
use super::header::quoted;
use super::timing::{timing_check_block, timing_env_block};
use super::values::{delay_paths, port_spec};
use crate::error::Result;
use crate::model::{Builder, CondScope, Condition, DelayMode, EntryKind, TimingEntry};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

/// Parse one `CELL` block and add its entries to `builder`
pub fn cell(p: &mut Parser<'_>, builder: &mut Builder) -> Result<()> {
    p.expect(SyntaxKind::L_PAREN)?;
    p.expect(SyntaxKind::CELL_KW)?;
    let celltype = celltype(p)?;
    let instance = instance(p)?;
    builder.begin_cell(celltype, instance);

    while p.at(SyntaxKind::L_PAREN) {
        match p.nth(1) {
            SyntaxKind::DELAY_KW => delay_block(p, builder)?,
            SyntaxKind::TIMINGCHECK_KW => timing_check_block(p, builder)?,
            SyntaxKind::TIMINGENV_KW => timing_env_block(p, builder)?,
            _ => {
                p.bump();
                return Err(p.error());
            }
        }
    }

    p.expect(SyntaxKind::R_PAREN)?;
    Ok(())
}

fn celltype(p: &mut Parser<'_>) -> Result<String> {
    p.expect(SyntaxKind::L_PAREN)?;
    p.expect(SyntaxKind::CELLTYPE_KW)?;
    let name = quoted(p)?;
    p.expect(SyntaxKind::R_PAREN)?;
    Ok(name)
}

/// `(INSTANCE)` is `None`; `(INSTANCE *)` keeps the wildcard as `*`
fn instance(p: &mut Parser<'_>) -> Result<Option<String>> {
    p.expect(SyntaxKind::L_PAREN)?;
    p.expect(SyntaxKind::INSTANCE_KW)?;
    if p.eat(SyntaxKind::R_PAREN) {
        return Ok(None);
    }
    let name = p
        .expect_any(&[SyntaxKind::STRING, SyntaxKind::STAR, SyntaxKind::FLOAT])?
        .to_string();
    p.expect(SyntaxKind::R_PAREN)?;
    Ok(Some(name))
}

fn delay_block(p: &mut Parser<'_>, builder: &mut Builder) -> Result<()> {
    p.expect(SyntaxKind::L_PAREN)?;
    p.expect(SyntaxKind::DELAY_KW)?;
    if !p.at(SyntaxKind::L_PAREN) {
        return Err(p.error());
    }

    while p.at(SyntaxKind::L_PAREN) {
        p.bump();
        let mode = match p.current_kind() {
            SyntaxKind::ABSOLUTE_KW => DelayMode::Absolute,
            SyntaxKind::INCREMENT_KW => DelayMode::Increment,
            _ => return Err(p.error()),
        };
        p.bump();

        let mut entries = Vec::new();
        while p.at(SyntaxKind::L_PAREN) {
            del(p, &mut entries)?;
        }
        for entry in &mut entries {
            entry.mode = Some(mode);
        }
        builder.add_entries(entries)?;

        p.expect(SyntaxKind::R_PAREN)?;
    }

    p.expect(SyntaxKind::R_PAREN)?;
    Ok(())
}

/// Parse one `del` item, pushing the entries it produces onto `out`
fn del(p: &mut Parser<'_>, out: &mut Vec<TimingEntry>) -> Result<()> {
    p.expect(SyntaxKind::L_PAREN)?;
    let keyword = p.current_text();
    let line = p.line();
    let context = format!("{keyword} at line {line}");

    match p.current_kind() {
        SyntaxKind::IOPATH_KW => {
            p.bump();
            let from = port_spec(p)?;
            let to = port_spec(p)?;
            let retain = if p.at(SyntaxKind::L_PAREN) && p.nth(1) == SyntaxKind::RETAIN_KW {
                p.bump();
                p.bump();
                let paths = delay_paths(p, &format!("RETAIN at line {line}"))?;
                p.expect(SyntaxKind::R_PAREN)?;
                Some(paths)
            } else {
                None
            };
            let mut entry = TimingEntry::new(EntryKind::Iopath, from, to, delay_paths(p, &context)?);
            entry.retain_paths = retain;
            out.push(entry);
        }
        SyntaxKind::INTERCONNECT_KW => {
            p.bump();
            let from = port_spec(p)?;
            let to = port_spec(p)?;
            out.push(TimingEntry::new(
                EntryKind::Interconnect,
                from,
                to,
                delay_paths(p, &context)?,
            ));
        }
        SyntaxKind::PORT_KW | SyntaxKind::DEVICE_KW => {
            let kind = if p.at(SyntaxKind::PORT_KW) {
                EntryKind::Port
            } else {
                EntryKind::Device
            };
            p.bump();
            let port = port_spec(p)?;
            out.push(TimingEntry::single_port(kind, port, delay_paths(p, &context)?));
        }
        SyntaxKind::COND_KW => {
            p.bump();
            let equation = cond_equation(p)?;
            let mut inner = Vec::new();
            loop {
                del(p, &mut inner)?;
                if !p.at(SyntaxKind::L_PAREN) {
                    break;
                }
            }
            // The outermost COND wins over any nested one
            for entry in &mut inner {
                entry.condition = Some(Condition::new(equation.clone(), CondScope::Path));
            }
            out.extend(inner);
        }
        _ => return Err(p.error()),
    }

    p.expect(SyntaxKind::R_PAREN)?;
    Ok(())
}
