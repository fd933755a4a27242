//! Per-step diagnostic metrics derived from an engine snapshot.
//!
//! [`derive_metrics`] turns the engine's raw counters, pointer, and
//! buffer sizes into a [`Metrics`] record. It is recomputed in full after
//! every step, initialize, and restart, so the displayed numbers always
//! describe the engine state they were read from.

use std::fmt;
use std::time::Duration;

use lifeloop_core::{CellsPtr, EngineView};

/// Diagnostic stats for one engine snapshot.
///
/// Immutable once derived; a new record replaces the old one on every
/// step rather than being patched in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    /// Number of live cells, as reported by the engine.
    pub alive: u32,
    /// Total number of cells (`width * height`).
    pub total_cells: u64,
    /// Share of live cells in percent, rounded to one decimal.
    /// Zero when the grid has no cells.
    pub density_percent: f64,
    /// Duration of the step that produced this snapshot, in microseconds.
    /// Zero for the initial snapshot of an engine.
    pub step_us: f64,
    /// Engine backing memory, in KiB, rounded to nearest.
    pub memory_kib: u64,
    /// Size of the cell storage in bytes, passed through from the engine.
    pub cell_bytes: usize,
    /// Address of the cell storage. Display only.
    pub cells_ptr: CellsPtr,
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
}

impl Metrics {
    /// Whether the engine reported a zero-area grid.
    pub fn is_degenerate(&self) -> bool {
        self.total_cells == 0
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "alive    {} / {} ({:.1}%)",
            self.alive, self.total_cells, self.density_percent
        )?;
        writeln!(f, "step     {:.1} µs", self.step_us)?;
        writeln!(f, "memory   {} KiB", self.memory_kib)?;
        writeln!(f, "cells    {} B @ {}", self.cell_bytes, self.cells_ptr)?;
        write!(f, "grid     {} × {}", self.width, self.height)
    }
}

/// Derive [`Metrics`] from the engine's current state.
///
/// `step` is the wall-clock duration of the step that led to this state
/// (`Duration::ZERO` for a freshly constructed engine). Pure: performs
/// no I/O and keeps nothing between calls.
pub fn derive_metrics<E: EngineView + ?Sized>(engine: &E, step: Duration) -> Metrics {
    let width = engine.width();
    let height = engine.height();
    let alive = engine.live_count();
    let total_cells = u64::from(width) * u64::from(height);

    Metrics {
        alive,
        total_cells,
        density_percent: density_percent(u64::from(alive), total_cells),
        step_us: step.as_secs_f64() * 1_000_000.0,
        memory_kib: round_kib(engine.buffer_byte_length()),
        cell_bytes: engine.cell_byte_size(),
        cells_ptr: CellsPtr(engine.cells_ptr()),
        width,
        height,
    }
}

/// `alive / total * 100`, rounded to one decimal, in `[0, 100]`.
///
/// A zero-cell grid has density 0. Engines that report more live cells
/// than the grid holds are clamped to 100.
fn density_percent(alive: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = alive.min(total) as f64 / total as f64;
    (ratio * 1000.0).round() / 10.0
}

fn round_kib(bytes: usize) -> u64 {
    (bytes as u64).saturating_add(512) / 1024
}
