//! Folds parsed entries into a [`Model`]
//!
//! A [`Builder`] is created for one parse and consumed by [`Builder::finish`];
//! nothing it accumulates outlives that parse.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::{Cell, CellId, Header, Model, TimingEntry};
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct Builder {
    header: Header,
    cells: IndexMap<CellId, Cell>,
    /// Occurrences of each base name, per cell
    counters: FxHashMap<CellId, FxHashMap<String, usize>>,
    current: Option<CellId>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Make `(celltype, instance)` the cell receiving entries, merging with an
    /// earlier cell of the same identity.
    pub fn begin_cell(&mut self, celltype: String, instance: Option<String>) {
        let id = CellId::new(celltype, instance);
        trace!("[BUILDER] opening cell '{}'", id);
        self.cells
            .entry(id.clone())
            .or_insert_with(|| Cell::new(id.celltype.clone(), id.instance.clone()));
        self.current = Some(id);
    }

    /// Name `entry` and add it to the current cell.
    ///
    /// The name is `<kind>_<from>_<to>`; repeats get a `#<n>` suffix counting
    /// from 1.
    pub fn add_entry(&mut self, mut entry: TimingEntry) -> Result<()> {
        let Some(id) = self.current.clone() else {
            return Err(Error::semantic(
                "timing entry outside of a cell",
                entry.base_name(),
            ));
        };

        let base = entry.base_name();
        let seen = self
            .counters
            .entry(id.clone())
            .or_default()
            .entry(base.clone())
            .or_insert(0);
        let name = match *seen {
            0 => base,
            n => format!("{base}#{n}"),
        };
        *seen += 1;

        let cell = self
            .cells
            .get_mut(&id)
            .ok_or_else(|| Error::semantic("cell was never opened", id.to_string()))?;
        if cell.entries.contains_key(&name) {
            return Err(Error::semantic(
                "duplicate entry name",
                format!("{name} in cell {id}"),
            ));
        }

        trace!("[BUILDER] cell '{}' entry '{}'", id, name);
        entry.name = name.clone();
        cell.entries.insert(name, entry);
        Ok(())
    }

    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = TimingEntry>) -> Result<()> {
        entries.into_iter().try_for_each(|entry| self.add_entry(entry))
    }

    pub fn finish(self) -> Model {
        Model {
            header: self.header,
            cells: self.cells,
        }
    }
}
