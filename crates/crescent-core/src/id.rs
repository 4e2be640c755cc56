//! Strongly-typed identifiers.

use std::fmt;

/// Global identity of an element in the store's registry.
///
/// IDs are assigned in first-registration order starting at 0.
/// `ElementId(n)` is the n-th distinct full path ever registered and
/// stays valid for the lifetime of the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl ElementId {
    /// The registry slot this ID addresses.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ElementId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index of a directory node in the store's directory arena.
///
/// `DirId::ROOT` is always the root directory. Like element IDs,
/// directory IDs are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirId(pub u32);

impl DirId {
    /// The root directory.
    pub const ROOT: DirId = DirId(0);

    /// The arena slot this ID addresses.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DirId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Discrete scheduler step.
///
/// An abstract counter; the simulation maps it to wall-clock time
/// through the configured tick period (100 Hz by default).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick after this one, or `None` at `u64::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
