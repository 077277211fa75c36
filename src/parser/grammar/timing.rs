//! Timing checks and timing environment
//!
//! ```text
//! timing_check = '(' TIMINGCHECK tchk+ ')'
//! tchk         = '(' (SETUP | HOLD | RECOVERY | REMOVAL) check_port check_port value ')'
//!              | '(' (SETUPHOLD | NOCHANGE | RECREM) check_port check_port value value ')'
//!              | '(' (WIDTH | PERIOD) check_port value ')'
//! check_port   = port_spec | '(' COND equation port_spec ')'
//! timing_env   = '(' TIMINGENV path_constraint+ ')'
//! path_constraint = '(' PATHCONSTRAINT port_spec port_spec value value ')'
//! ```
//!
//! The first port of a two-port check is the data/reference port and is
//! stored as `to_pin`; the second is the `from_pin`.

use super::expressions::cond_equation;
use super::values::{fixed_values, port_spec};
use crate::error::{Error, Result};
use crate::model::{
    Builder, CondEquation, CondScope, Condition, DelayPathSet, EntryKind, PortSpec, TimingEntry,
};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::SyntaxKind;

pub fn timing_check_block(p: &mut Parser<'_>, builder: &mut Builder) -> Result<()> {
    p.expect(SyntaxKind::L_PAREN)?;
    p.expect(SyntaxKind::TIMINGCHECK_KW)?;
    if !p.at(SyntaxKind::L_PAREN) {
        return Err(p.error());
    }
    while p.at(SyntaxKind::L_PAREN) {
        let entry = timing_check(p)?;
        builder.add_entry(entry)?;
    }
    p.expect(SyntaxKind::R_PAREN)?;
    Ok(())
}

pub fn timing_env_block(p: &mut Parser<'_>, builder: &mut Builder) -> Result<()> {
    p.expect(SyntaxKind::L_PAREN)?;
    p.expect(SyntaxKind::TIMINGENV_KW)?;
    if !p.at(SyntaxKind::L_PAREN) {
        return Err(p.error());
    }
    while p.at(SyntaxKind::L_PAREN) {
        let entry = path_constraint(p)?;
        builder.add_entry(entry)?;
    }
    p.expect(SyntaxKind::R_PAREN)?;
    Ok(())
}

fn check_kind(kind: SyntaxKind) -> Option<EntryKind> {
    Some(match kind {
        SyntaxKind::SETUP_KW => EntryKind::Setup,
        SyntaxKind::HOLD_KW => EntryKind::Hold,
        SyntaxKind::RECOVERY_KW => EntryKind::Recovery,
        SyntaxKind::REMOVAL_KW => EntryKind::Removal,
        SyntaxKind::SETUPHOLD_KW => EntryKind::SetupHold,
        SyntaxKind::NOCHANGE_KW => EntryKind::NoChange,
        SyntaxKind::RECREM_KW => EntryKind::RecRem,
        SyntaxKind::WIDTH_KW => EntryKind::Width,
        SyntaxKind::PERIOD_KW => EntryKind::Period,
        _ => return None,
    })
}

/// A check port and the condition wrapped around it, if any
struct CheckPort {
    spec: PortSpec,
    cond: Option<CondEquation>,
}

fn check_port(p: &mut Parser<'_>) -> Result<CheckPort> {
    if !(p.at(SyntaxKind::L_PAREN) && p.nth(1) == SyntaxKind::COND_KW) {
        return Ok(CheckPort {
            spec: port_spec(p)?,
            cond: None,
        });
    }
    p.bump();
    p.bump();
    let cond = cond_equation(p)?;
    let spec = port_spec(p)?;
    p.expect(SyntaxKind::R_PAREN)?;
    Ok(CheckPort {
        spec,
        cond: Some(cond),
    })
}

fn values_for(p: &mut Parser<'_>, kind: EntryKind) -> Result<DelayPathSet> {
    let slots = kind
        .value_slots()
        .ok_or_else(|| Error::semantic("not a timing check", kind.keyword()))?;
    fixed_values(p, slots)
}

fn timing_check(p: &mut Parser<'_>) -> Result<TimingEntry> {
    p.expect(SyntaxKind::L_PAREN)?;
    let line = p.line();
    let kind = check_kind(p.current_kind()).ok_or_else(|| p.error())?;
    p.bump();

    let entry = if kind.is_single_port() {
        let port = check_port(p)?;
        let mut entry = TimingEntry::single_port(kind, port.spec, values_for(p, kind)?);
        entry.condition = port
            .cond
            .map(|equation| Condition::new(equation, CondScope::ToPin));
        entry
    } else {
        let to = check_port(p)?;
        let from = check_port(p)?;
        let condition = match (to.cond, from.cond) {
            (Some(_), Some(_)) => {
                return Err(Error::semantic(
                    "COND on both ports of a timing check",
                    format!("{} at line {}", kind.keyword(), line),
                ));
            }
            (Some(equation), None) => Some(Condition::new(equation, CondScope::ToPin)),
            (None, Some(equation)) => Some(Condition::new(equation, CondScope::FromPin)),
            (None, None) => None,
        };
        let mut entry = TimingEntry::new(kind, from.spec, to.spec, values_for(p, kind)?);
        entry.condition = condition;
        entry
    };

    p.expect(SyntaxKind::R_PAREN)?;
    Ok(entry)
}

fn path_constraint(p: &mut Parser<'_>) -> Result<TimingEntry> {
    p.expect(SyntaxKind::L_PAREN)?;
    p.expect(SyntaxKind::PATHCONSTRAINT_KW)?;
    let from = port_spec(p)?;
    let to = port_spec(p)?;
    let values = values_for(p, EntryKind::PathConstraint)?;
    p.expect(SyntaxKind::R_PAREN)?;
    Ok(TimingEntry::new(EntryKind::PathConstraint, from, to, values))
}
