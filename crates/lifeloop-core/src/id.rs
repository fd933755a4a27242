//! Strongly-typed counters and diagnostic values.

use std::fmt;

/// Number of steps the current engine instance has taken.
///
/// Starts at zero when an engine is constructed, advances by exactly one
/// per successful step, and is reset to zero when the engine is replaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation of a freshly constructed engine.
    pub const ZERO: Self = Self(0);

    /// The generation after one more step.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Generation {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Address of an engine's cell buffer, as reported by the engine.
///
/// Purely diagnostic. The value is never turned back into a pointer;
/// it exists so the address can be shown next to the other stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellsPtr(pub usize);

impl CellsPtr {
    /// Number of hex digits in the rendered address (two per byte).
    pub const HEX_WIDTH: usize = 2 * std::mem::size_of::<usize>();
}

impl fmt::Display for CellsPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:0width$x}", self.0, width = Self::HEX_WIDTH)
    }
}

impl From<usize> for CellsPtr {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
