//! Timing entries and the values they carry
//!
//! Every `IOPATH`, `INTERCONNECT`, `PORT`, `DEVICE`, timing check and path
//! constraint becomes one [`TimingEntry`]. Its numbers live in a
//! [`DelayPathSet`] keyed by the closed [`Slot`] enumeration; which slots are
//! legal depends on the entry's [`EntryKind`].

use std::collections::BTreeMap;
use std::fmt;

use super::Triple;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Slots
// ============================================================================

/// Named position of a value inside a [`DelayPathSet`].
///
/// The derived ordering is the emission order of every legal layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Slot {
    Fast,
    Nominal,
    Slow,
    Rise,
    Fall,
    Setup,
    Hold,
    Recovery,
    Removal,
    #[cfg_attr(feature = "serde", serde(rename = "01"))]
    T01,
    #[cfg_attr(feature = "serde", serde(rename = "10"))]
    T10,
    #[cfg_attr(feature = "serde", serde(rename = "0Z"))]
    T0Z,
    #[cfg_attr(feature = "serde", serde(rename = "Z1"))]
    TZ1,
    #[cfg_attr(feature = "serde", serde(rename = "1Z"))]
    T1Z,
    #[cfg_attr(feature = "serde", serde(rename = "Z0"))]
    TZ0,
    #[cfg_attr(feature = "serde", serde(rename = "0X"))]
    T0X,
    #[cfg_attr(feature = "serde", serde(rename = "X1"))]
    TX1,
    #[cfg_attr(feature = "serde", serde(rename = "1X"))]
    T1X,
    #[cfg_attr(feature = "serde", serde(rename = "X0"))]
    TX0,
    #[cfg_attr(feature = "serde", serde(rename = "XZ"))]
    TXZ,
    #[cfg_attr(feature = "serde", serde(rename = "ZX"))]
    TZX,
}

impl Slot {
    /// The twelve transition codes in delval-list order.
    pub const TRANSITIONS: [Slot; 12] = [
        Slot::T01,
        Slot::T10,
        Slot::T0Z,
        Slot::TZ1,
        Slot::T1Z,
        Slot::TZ0,
        Slot::T0X,
        Slot::TX1,
        Slot::T1X,
        Slot::TX0,
        Slot::TXZ,
        Slot::TZX,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Fast => "fast",
            Slot::Nominal => "nominal",
            Slot::Slow => "slow",
            Slot::Rise => "rise",
            Slot::Fall => "fall",
            Slot::Setup => "setup",
            Slot::Hold => "hold",
            Slot::Recovery => "recovery",
            Slot::Removal => "removal",
            Slot::T01 => "01",
            Slot::T10 => "10",
            Slot::T0Z => "0Z",
            Slot::TZ1 => "Z1",
            Slot::T1Z => "1Z",
            Slot::TZ0 => "Z0",
            Slot::T0X => "0X",
            Slot::TX1 => "X1",
            Slot::T1X => "1X",
            Slot::TX0 => "X0",
            Slot::TXZ => "XZ",
            Slot::TZX => "ZX",
        }
    }

    pub fn is_transition(self) -> bool {
        self >= Slot::T01
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Delay-kind layouts keyed by delval-list length.
const DELVAL_LAYOUTS: [&[Slot]; 5] = [
    &[Slot::Nominal],
    &[Slot::Fast, Slot::Slow],
    &[Slot::Fast, Slot::Nominal, Slot::Slow],
    &[
        Slot::T01,
        Slot::T10,
        Slot::T0Z,
        Slot::TZ1,
        Slot::T1Z,
        Slot::TZ0,
    ],
    &Slot::TRANSITIONS,
];

// Which delval feeds each transition, per list length. `None` stays absent.
const EXPAND_1: [Option<usize>; 12] = [Some(0); 12];
const EXPAND_2: [Option<usize>; 12] = [
    Some(0),
    Some(1),
    Some(0),
    Some(0),
    Some(1),
    Some(1),
    Some(0),
    Some(0),
    Some(1),
    Some(1),
    None,
    None,
];
const EXPAND_3: [Option<usize>; 12] = [
    Some(0),
    Some(1),
    Some(2),
    Some(0),
    Some(2),
    Some(1),
    None,
    Some(0),
    None,
    Some(1),
    Some(2),
    None,
];
const EXPAND_6: [Option<usize>; 12] = [
    Some(0),
    Some(1),
    Some(2),
    Some(3),
    Some(4),
    Some(5),
    None,
    None,
    None,
    None,
    None,
    None,
];
const EXPAND_12: [Option<usize>; 12] = [
    Some(0),
    Some(1),
    Some(2),
    Some(3),
    Some(4),
    Some(5),
    Some(6),
    Some(7),
    Some(8),
    Some(9),
    Some(10),
    Some(11),
];

// ============================================================================
// DelayPathSet
// ============================================================================

/// Values of one entry, keyed by slot.
///
/// Iteration follows [`Slot`] ordering, which is also the order values are
/// written back out.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DelayPathSet(BTreeMap<Slot, Triple>);

impl DelayPathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out a delay-kind delval list: one value is `nominal`, two are
    /// `fast`/`slow`, three are `fast`/`nominal`/`slow`, and six or twelve
    /// fill the transition slots in order.
    ///
    /// Returns `None` for any other length.
    pub fn from_delval_list(values: Vec<Triple>) -> Option<Self> {
        let layout = DELVAL_LAYOUTS
            .iter()
            .find(|layout| layout.len() == values.len())?;
        Some(Self::from_slots(layout, values))
    }

    /// Pair `slots` with `values` positionally.
    pub fn from_slots(slots: &[Slot], values: Vec<Triple>) -> Self {
        Self(slots.iter().copied().zip(values).collect())
    }

    /// Recover the delval list this set was built from, if its slots form
    /// one of the delay-kind layouts.
    pub fn delval_list(&self) -> Option<Vec<Triple>> {
        let layout = DELVAL_LAYOUTS
            .iter()
            .find(|layout| self.has_exactly(layout))?;
        Some(layout.iter().map(|slot| self.0[slot]).collect())
    }

    /// Values of `slots` in that order, if the set holds exactly those slots.
    pub fn values_for(&self, slots: &[Slot]) -> Option<Vec<Triple>> {
        if !self.has_exactly(slots) {
            return None;
        }
        Some(slots.iter().map(|slot| self.0[slot]).collect())
    }

    fn has_exactly(&self, slots: &[Slot]) -> bool {
        self.0.len() == slots.len() && slots.iter().all(|slot| self.0.contains_key(slot))
    }

    /// Twelve-transition view of a delay-kind set.
    ///
    /// Transitions the delval list does not determine are left out rather
    /// than derived. Returns `None` if the set is not a delay-kind layout.
    pub fn expand_transitions(&self) -> Option<DelayPathSet> {
        let values = self.delval_list()?;
        let table = match values.len() {
            1 => &EXPAND_1,
            2 => &EXPAND_2,
            3 => &EXPAND_3,
            6 => &EXPAND_6,
            _ => &EXPAND_12,
        };
        Some(Self(
            Slot::TRANSITIONS
                .iter()
                .zip(table)
                .filter_map(|(slot, source)| source.map(|idx| (*slot, values[idx])))
                .collect(),
        ))
    }

    pub fn get(&self, slot: Slot) -> Option<&Triple> {
        self.0.get(&slot)
    }

    pub fn insert(&mut self, slot: Slot, value: Triple) -> Option<Triple> {
        self.0.insert(slot, value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Triple)> {
        self.0.iter().map(|(slot, value)| (*slot, value))
    }

    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Slot, Triple)> for DelayPathSet {
    fn from_iter<I: IntoIterator<Item = (Slot, Triple)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Entry kinds
// ============================================================================

/// Block an entry is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryGroup {
    Delay,
    TimingCheck,
    TimingEnv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    Port,
    Interconnect,
    Iopath,
    Device,
    Setup,
    Hold,
    Removal,
    Recovery,
    Width,
    Period,
    SetupHold,
    RecRem,
    NoChange,
    PathConstraint,
}

impl EntryKind {
    /// Lowercase name used as the entry-name prefix
    pub fn name(self) -> &'static str {
        match self {
            EntryKind::Port => "port",
            EntryKind::Interconnect => "interconnect",
            EntryKind::Iopath => "iopath",
            EntryKind::Device => "device",
            EntryKind::Setup => "setup",
            EntryKind::Hold => "hold",
            EntryKind::Removal => "removal",
            EntryKind::Recovery => "recovery",
            EntryKind::Width => "width",
            EntryKind::Period => "period",
            EntryKind::SetupHold => "setuphold",
            EntryKind::RecRem => "recrem",
            EntryKind::NoChange => "nochange",
            EntryKind::PathConstraint => "pathconstraint",
        }
    }

    /// SDF keyword introducing this entry
    pub fn keyword(self) -> &'static str {
        match self {
            EntryKind::Port => "PORT",
            EntryKind::Interconnect => "INTERCONNECT",
            EntryKind::Iopath => "IOPATH",
            EntryKind::Device => "DEVICE",
            EntryKind::Setup => "SETUP",
            EntryKind::Hold => "HOLD",
            EntryKind::Removal => "REMOVAL",
            EntryKind::Recovery => "RECOVERY",
            EntryKind::Width => "WIDTH",
            EntryKind::Period => "PERIOD",
            EntryKind::SetupHold => "SETUPHOLD",
            EntryKind::RecRem => "RECREM",
            EntryKind::NoChange => "NOCHANGE",
            EntryKind::PathConstraint => "PATHCONSTRAINT",
        }
    }

    pub fn group(self) -> EntryGroup {
        match self {
            EntryKind::Port | EntryKind::Interconnect | EntryKind::Iopath | EntryKind::Device => {
                EntryGroup::Delay
            }
            EntryKind::PathConstraint => EntryGroup::TimingEnv,
            _ => EntryGroup::TimingCheck,
        }
    }

    pub fn is_delay(self) -> bool {
        self.group() == EntryGroup::Delay
    }

    /// Kinds that name one pin, stored as both `from_pin` and `to_pin`
    pub fn is_single_port(self) -> bool {
        matches!(
            self,
            EntryKind::Port | EntryKind::Device | EntryKind::Width | EntryKind::Period
        )
    }

    /// Fixed value slots of check and environment kinds.
    ///
    /// Delay kinds return `None`: their layout follows the delval-list length.
    pub fn value_slots(self) -> Option<&'static [Slot]> {
        match self {
            EntryKind::Setup
            | EntryKind::Hold
            | EntryKind::Removal
            | EntryKind::Recovery
            | EntryKind::Width
            | EntryKind::Period => Some(&[Slot::Nominal]),
            EntryKind::SetupHold | EntryKind::NoChange => Some(&[Slot::Setup, Slot::Hold]),
            EntryKind::RecRem => Some(&[Slot::Recovery, Slot::Removal]),
            EntryKind::PathConstraint => Some(&[Slot::Rise, Slot::Fall]),
            EntryKind::Port | EntryKind::Interconnect | EntryKind::Iopath | EntryKind::Device => {
                None
            }
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Ports, modes and conditions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Edge {
    Posedge,
    Negedge,
}

impl Edge {
    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Posedge => "posedge",
            Edge::Negedge => "negedge",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pin reference, optionally qualified by an edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortSpec {
    pub pin: String,
    pub edge: Option<Edge>,
}

impl PortSpec {
    pub fn new(pin: impl Into<String>, edge: Option<Edge>) -> Self {
        Self {
            pin: pin.into(),
            edge,
        }
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.edge {
            Some(edge) => write!(f, "({} {})", edge, self.pin),
            None => f.write_str(&self.pin),
        }
    }
}

/// Whether a delay adds to or replaces the back-annotated value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DelayMode {
    Absolute,
    Increment,
}

impl DelayMode {
    pub fn keyword(self) -> &'static str {
        match self {
            DelayMode::Absolute => "ABSOLUTE",
            DelayMode::Increment => "INCREMENT",
        }
    }
}

/// Token sequence of a conditional expression, kept exactly as lexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CondEquation(Vec<String>);

impl CondEquation {
    pub fn new(tokens: Vec<String>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CondEquation {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Tokens joined by single spaces.
impl fmt::Display for CondEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// What a `COND` wrapped in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CondScope {
    /// The whole delay entry
    Path,
    /// The `from_pin` port of a timing check
    FromPin,
    /// The `to_pin` port of a timing check (or the only port of WIDTH/PERIOD)
    ToPin,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Condition {
    pub equation: CondEquation,
    pub scope: CondScope,
}

impl Condition {
    pub fn new(equation: CondEquation, scope: CondScope) -> Self {
        Self { equation, scope }
    }
}

// ============================================================================
// TimingEntry
// ============================================================================

/// One timing arc, check or constraint of a cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingEntry {
    /// Unique within the owning cell
    pub name: String,
    pub kind: EntryKind,
    pub from_pin: String,
    pub to_pin: String,
    pub from_edge: Option<Edge>,
    pub to_edge: Option<Edge>,
    pub delay_paths: DelayPathSet,
    /// `None` for timing checks and path constraints
    pub mode: Option<DelayMode>,
    pub condition: Option<Condition>,
    pub retain_paths: Option<DelayPathSet>,
}

impl TimingEntry {
    /// Build an unnamed entry. Single-port kinds take `to` as their only port.
    ///
    /// The name is assigned when the entry is added to a cell.
    pub fn new(kind: EntryKind, from: PortSpec, to: PortSpec, delay_paths: DelayPathSet) -> Self {
        Self {
            name: String::new(),
            kind,
            from_pin: from.pin,
            to_pin: to.pin,
            from_edge: from.edge,
            to_edge: to.edge,
            delay_paths,
            mode: None,
            condition: None,
            retain_paths: None,
        }
    }

    /// Entry with one port, recorded as both ends
    pub fn single_port(kind: EntryKind, port: PortSpec, delay_paths: DelayPathSet) -> Self {
        Self::new(kind, port.clone(), port, delay_paths)
    }

    /// `<kind>_<from_pin>_<to_pin>`, the name before uniquification
    pub fn base_name(&self) -> String {
        format!("{}_{}_{}", self.kind.name(), self.from_pin, self.to_pin)
    }

    pub fn from_port(&self) -> PortSpec {
        PortSpec::new(self.from_pin.clone(), self.from_edge)
    }

    pub fn to_port(&self) -> PortSpec {
        PortSpec::new(self.to_pin.clone(), self.to_edge)
    }

    pub fn is_absolute(&self) -> bool {
        self.mode == Some(DelayMode::Absolute)
    }

    pub fn is_incremental(&self) -> bool {
        self.mode == Some(DelayMode::Increment)
    }

    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    pub fn cond_equation(&self) -> Option<&CondEquation> {
        self.condition.as_ref().map(|c| &c.equation)
    }

    pub fn has_retain(&self) -> bool {
        self.retain_paths.is_some()
    }
}
