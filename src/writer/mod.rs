//! SDF writer
//!
//! Serializes a [`Model`] back to SDF text. Output is deterministic: cells are
//! sorted by `(celltype, instance)` and entries by name within each block, so
//! the same model always produces the same bytes whatever order it was built
//! in.
//!
//! Each entity kind has its own emission function that formats absent values
//! directly (`()` for an absent triple, empty positions for `(1::3)`).

mod options;

#[cfg(test)]
mod tests;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::model::{
    Cell, CellId, CondScope, Condition, DelayMode, DelayPathSet, EntryGroup, EntryKind, Header,
    Model, PortSpec, TimingEntry, Triple,
};
pub use options::EmitOptions;

/// Write `model` as SDF text
pub fn emit(model: &Model, options: &EmitOptions) -> Result<String> {
    debug!("[EMIT] {} cells", model.cells.len());

    let mut writer = Writer::new(options);
    writer.line(0, "(DELAYFILE");
    writer.header(&model.header)?;

    let mut cells: Vec<(&CellId, &Cell)> = model.cells.iter().collect();
    cells.sort_by(|a, b| a.0.cmp(b.0));
    for (id, cell) in cells {
        trace!("[EMIT] cell '{}' with {} entries", id, cell.entries.len());
        writer.cell(cell)?;
    }

    writer.line(0, ")");
    debug!("[EMIT] {} bytes", writer.out.len());
    Ok(writer.out)
}

struct Writer<'a> {
    options: &'a EmitOptions,
    out: String,
}

impl<'a> Writer<'a> {
    fn new(options: &'a EmitOptions) -> Self {
        Self {
            options,
            out: String::new(),
        }
    }

    fn line(&mut self, level: usize, text: &str) {
        self.out.push_str(&self.options.indent(level));
        self.out.push_str(text);
        self.out.push('\n');
    }

    // =========================================================================
    // Header
    // =========================================================================

    fn header(&mut self, header: &Header) -> Result<()> {
        for (keyword, value) in header.quoted_fields() {
            if let Some(value) = value {
                let text = format!("({keyword} {})", quote(keyword, value)?);
                self.line(1, &text);
            }
        }
        if let Some(divider) = header.divider {
            self.line(1, &format!("(DIVIDER {divider})"));
        }
        if let Some(voltage) = &header.voltage {
            self.line(1, &format!("(VOLTAGE {})", bare("VOLTAGE", voltage)?));
        }
        if let Some(process) = &header.process {
            self.line(1, &format!("(PROCESS {})", quote("PROCESS", process)?));
        }
        if let Some(temperature) = &header.temperature {
            let text = format!("(TEMPERATURE {})", bare("TEMPERATURE", temperature)?);
            self.line(1, &text);
        }
        if let Some(timescale) = self.options.timescale_override.or(header.timescale) {
            self.line(1, &format!("(TIMESCALE {timescale})"));
        }
        Ok(())
    }

    // =========================================================================
    // Cells
    // =========================================================================

    fn cell(&mut self, cell: &Cell) -> Result<()> {
        self.line(1, "(CELL");
        let celltype = if self.options.uppercase_celltype {
            cell.celltype.to_uppercase()
        } else {
            cell.celltype.clone()
        };
        self.line(2, &format!("(CELLTYPE {})", quote("CELLTYPE", &celltype)?));
        match &cell.instance {
            Some(instance) => self.line(2, &format!("(INSTANCE {instance})")),
            None => self.line(2, "(INSTANCE)"),
        }

        let mut absolute = Vec::new();
        let mut increment = Vec::new();
        let mut checks = Vec::new();
        let mut env = Vec::new();
        for entry in cell.entries.values() {
            match (entry.kind.group(), entry.mode) {
                (EntryGroup::Delay, Some(DelayMode::Absolute)) => absolute.push(entry),
                (EntryGroup::Delay, Some(DelayMode::Increment)) => increment.push(entry),
                (EntryGroup::Delay, None) => {
                    return Err(invalid(entry, "delay entry without ABSOLUTE or INCREMENT"));
                }
                (EntryGroup::TimingCheck, _) => checks.push(entry),
                (EntryGroup::TimingEnv, _) => env.push(entry),
            }
        }

        if !absolute.is_empty() || !increment.is_empty() {
            self.line(2, "(DELAY");
            for (mode, entries) in [
                (DelayMode::Absolute, absolute),
                (DelayMode::Increment, increment),
            ] {
                self.block(3, mode.keyword(), entries, delay_entry)?;
            }
            self.line(2, ")");
        }
        self.block(2, "TIMINGCHECK", checks, timing_check)?;
        self.block(2, "TIMINGENV", env, path_constraint)?;

        self.line(1, ")");
        Ok(())
    }

    /// `(KEYWORD` + one line per entry + `)`, nothing when `entries` is empty
    fn block(
        &mut self,
        level: usize,
        keyword: &str,
        mut entries: Vec<&TimingEntry>,
        render: fn(&TimingEntry) -> Result<String>,
    ) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        entries.sort_by(|a, b| name_order(&a.name).cmp(&name_order(&b.name)));
        self.line(level, &format!("({keyword}"));
        for entry in entries {
            let text = render(entry)?;
            self.line(level + 1, &text);
        }
        self.line(level, ")");
        Ok(())
    }
}

// ============================================================================
// Entries
// ============================================================================

fn delay_entry(entry: &TimingEntry) -> Result<String> {
    if entry.retain_paths.is_some() && entry.kind != EntryKind::Iopath {
        return Err(invalid(entry, "RETAIN outside of IOPATH"));
    }
    let values = delval_list(entry, &entry.delay_paths)?;
    let text = match entry.kind {
        EntryKind::Iopath => {
            let retain = match &entry.retain_paths {
                Some(retain) => format!(" (RETAIN {})", delval_list(entry, retain)?),
                None => String::new(),
            };
            format!(
                "(IOPATH {} {}{retain} {values})",
                entry.from_port(),
                entry.to_port()
            )
        }
        EntryKind::Interconnect => format!(
            "(INTERCONNECT {} {} {values})",
            entry.from_port(),
            entry.to_port()
        ),
        EntryKind::Port | EntryKind::Device => {
            format!("({} {} {values})", entry.kind.keyword(), entry.to_port())
        }
        _ => return Err(invalid(entry, "not a delay entry")),
    };

    match &entry.condition {
        Some(condition) => Ok(format!("(COND {} {text})", equation(entry, condition)?)),
        None => Ok(text),
    }
}

/// Two-port checks print the `to_pin` first, matching the order they are read in
fn timing_check(entry: &TimingEntry) -> Result<String> {
    let values = fixed_values(entry)?;
    let (to_cond, from_cond) = match &entry.condition {
        None => (None, None),
        Some(condition) => {
            let equation = equation(entry, condition)?;
            match condition.scope {
                CondScope::ToPin => (Some(equation), None),
                CondScope::FromPin => (None, Some(equation)),
                CondScope::Path => {
                    return Err(invalid(entry, "timing check COND must wrap a port"));
                }
            }
        }
    };

    let keyword = entry.kind.keyword();
    if entry.kind.is_single_port() {
        let port = check_port(entry.to_port(), to_cond.or(from_cond));
        return Ok(format!("({keyword} {port} {values})"));
    }
    let to = check_port(entry.to_port(), to_cond);
    let from = check_port(entry.from_port(), from_cond);
    Ok(format!("({keyword} {to} {from} {values})"))
}

fn path_constraint(entry: &TimingEntry) -> Result<String> {
    if entry.condition.is_some() {
        return Err(invalid(entry, "PATHCONSTRAINT cannot be conditional"));
    }
    Ok(format!(
        "(PATHCONSTRAINT {} {} {})",
        entry.from_port(),
        entry.to_port(),
        fixed_values(entry)?
    ))
}

fn check_port(port: PortSpec, cond: Option<String>) -> String {
    match cond {
        Some(equation) => format!("(COND {equation} {port})"),
        None => port.to_string(),
    }
}

// ============================================================================
// Values
// ============================================================================

fn delval_list(entry: &TimingEntry, paths: &DelayPathSet) -> Result<String> {
    let values = paths
        .delval_list()
        .ok_or_else(|| invalid(entry, "delay slots do not form a delval list"))?;
    concat(entry, &values)
}

fn fixed_values(entry: &TimingEntry) -> Result<String> {
    let values = entry
        .kind
        .value_slots()
        .and_then(|slots| entry.delay_paths.values_for(slots))
        .ok_or_else(|| invalid(entry, "value slots do not match the entry kind"))?;
    concat(entry, &values)
}

fn concat(entry: &TimingEntry, values: &[Triple]) -> Result<String> {
    if !values.iter().all(Triple::is_finite) {
        return Err(invalid(entry, "value is not a finite number"));
    }
    Ok(values.iter().map(Triple::to_string).collect())
}

/// Header triples print without parentheses, so an absent one has no form
fn bare(keyword: &str, triple: &Triple) -> Result<String> {
    if !triple.is_finite() {
        return Err(Error::semantic("value is not a finite number", keyword));
    }
    triple
        .to_bare_string()
        .ok_or_else(|| Error::semantic("header value has no numbers", keyword))
}

fn quote(keyword: &str, value: &str) -> Result<String> {
    if value.contains('"') {
        return Err(Error::semantic("quoted value contains '\"'", keyword));
    }
    Ok(format!("\"{value}\""))
}

fn equation(entry: &TimingEntry, condition: &Condition) -> Result<String> {
    if condition.equation.is_empty() {
        return Err(invalid(entry, "empty COND equation"));
    }
    Ok(condition.equation.to_string())
}

fn invalid(entry: &TimingEntry, reason: &str) -> Error {
    Error::semantic(reason, format!("entry '{}'", entry.name))
}

/// Sort key for uniquified names: `x` < `x#1` < `x#2` < `x#10`
fn name_order(name: &str) -> (&str, usize) {
    name.rsplit_once('#')
        .and_then(|(base, n)| n.parse().ok().map(|n| (base, n)))
        .unwrap_or((name, 0))
}
