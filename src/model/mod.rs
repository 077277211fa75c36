//! Canonical timing model
//!
//! ```text
//! Model
//!  ├── Header            (SDFVERSION, DESIGN, ..., TIMESCALE)
//!  └── Cell*             keyed by (celltype, instance)
//!       └── TimingEntry* keyed by unique name
//!            ├── DelayPathSet   Slot -> Triple
//!            ├── Condition?     COND equation and what it wrapped
//!            └── retain paths?  IOPATH only
//! ```
//!
//! A model is a plain value: built once by [`crate::parse`], read by
//! [`crate::emit`], and safe to share between threads.

mod builder;
mod entry;
mod header;
mod timescale;
mod triple;

use std::fmt;

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use builder::Builder;
pub use entry::{
    CondEquation, CondScope, Condition, DelayMode, DelayPathSet, Edge, EntryGroup, EntryKind,
    PortSpec, Slot, TimingEntry,
};
pub use header::{Divider, Header};
pub use timescale::{TimeUnit, Timescale};
pub use triple::Triple;

/// Identity of a cell. Orders by celltype, then instance (`None` first).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId {
    pub celltype: String,
    pub instance: Option<String>,
}

impl CellId {
    pub fn new(celltype: impl Into<String>, instance: Option<String>) -> Self {
        Self {
            celltype: celltype.into(),
            instance,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.instance {
            Some(instance) => write!(f, "{} {}", self.celltype, instance),
            None => f.write_str(&self.celltype),
        }
    }
}

/// Timing data of one `(CELLTYPE, INSTANCE)` pair
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub celltype: String,
    /// `None` for `(INSTANCE)`; the wildcard `(INSTANCE *)` is `Some("*")`
    pub instance: Option<String>,
    pub entries: IndexMap<String, TimingEntry>,
}

impl Cell {
    pub fn new(celltype: impl Into<String>, instance: Option<String>) -> Self {
        Self {
            celltype: celltype.into(),
            instance,
            entries: IndexMap::new(),
        }
    }

    pub fn id(&self) -> CellId {
        CellId::new(self.celltype.clone(), self.instance.clone())
    }

    pub fn entry(&self, name: &str) -> Option<&TimingEntry> {
        self.entries.get(name)
    }

    pub fn entries_of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &TimingEntry> {
        self.entries.values().filter(move |entry| entry.kind == kind)
    }
}

/// A parsed SDF file
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Model {
    pub header: Header,
    #[cfg_attr(feature = "serde", serde(with = "cell_list"))]
    pub cells: IndexMap<CellId, Cell>,
}

impl Model {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            cells: IndexMap::new(),
        }
    }

    pub fn cell(&self, celltype: &str, instance: Option<&str>) -> Option<&Cell> {
        self.cells
            .get(&CellId::new(celltype, instance.map(str::to_string)))
    }

    /// Insert `cell`, replacing any cell with the same identity
    pub fn insert_cell(&mut self, cell: Cell) -> Option<Cell> {
        self.cells.insert(cell.id(), cell)
    }

    pub fn entry_count(&self) -> usize {
        self.cells.values().map(|cell| cell.entries.len()).sum()
    }
}

/// Cells serialize as a list; the map key is recomputed from each cell.
#[cfg(feature = "serde")]
mod cell_list {
    use super::{Cell, CellId};
    use indexmap::IndexMap;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        cells: &IndexMap<CellId, Cell>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(cells.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<IndexMap<CellId, Cell>, D::Error> {
        let cells = Vec::<Cell>::deserialize(deserializer)?;
        Ok(cells.into_iter().map(|cell| (cell.id(), cell)).collect())
    }
}
