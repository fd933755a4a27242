//! The engine contract consumed by the playback layer.
//!
//! The simulation itself is a black box. The playback layer only needs
//! to advance it, render it, and read a handful of counters, so the
//! contract is split the same way callers use it: [`EngineView`] for the
//! pure reads the stats pipeline performs, [`Engine`] for the single
//! mutating call, and [`EngineFactory`] for construction.

use crate::error::EngineError;

/// Read-only introspection of an engine's current state.
///
/// Every method is a pure read; calling any of them any number of times
/// between two steps must return the same values.
pub trait EngineView {
    /// Render the grid as text: one character per cell, rows separated
    /// by `'\n'`.
    fn render(&self) -> String;

    /// Grid width in cells.
    fn width(&self) -> u32;

    /// Grid height in cells.
    fn height(&self) -> u32;

    /// Number of live cells.
    fn live_count(&self) -> u32;

    /// Size in bytes of the engine's whole backing memory.
    fn buffer_byte_length(&self) -> usize;

    /// Address of the cell buffer. Diagnostic only; never dereferenced.
    fn cells_ptr(&self) -> usize;

    /// Size in bytes of the cell storage.
    fn cell_byte_size(&self) -> usize;
}

/// A steppable cellular-automaton engine.
///
/// `Send` so the owning session can move between the caller's thread
/// and the tick thread.
pub trait Engine: EngineView + Send {
    /// Advance the simulation by one generation.
    fn step(&mut self);
}

/// Produces engine instances.
///
/// Construction may be slow (loading, allocating, seeding) and may fail.
/// Implemented for any `Fn() -> Result<Box<dyn Engine>, EngineError>`.
pub trait EngineFactory: Send + Sync {
    /// Build a fresh engine in its initial state.
    fn construct(&self) -> Result<Box<dyn Engine>, EngineError>;
}

impl<F> EngineFactory for F
where
    F: Fn() -> Result<Box<dyn Engine>, EngineError> + Send + Sync,
{
    fn construct(&self) -> Result<Box<dyn Engine>, EngineError> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl EngineView for Blank {
        fn render(&self) -> String {
            String::new()
        }
        fn width(&self) -> u32 {
            0
        }
        fn height(&self) -> u32 {
            0
        }
        fn live_count(&self) -> u32 {
            0
        }
        fn buffer_byte_length(&self) -> usize {
            0
        }
        fn cells_ptr(&self) -> usize {
            0
        }
        fn cell_byte_size(&self) -> usize {
            0
        }
    }

    impl Engine for Blank {
        fn step(&mut self) {}
    }

    #[test]
    fn closures_are_factories() {
        let factory = || -> Result<Box<dyn Engine>, EngineError> { Ok(Box::new(Blank)) };
        let engine = factory.construct().unwrap();
        assert_eq!(engine.width(), 0);

        let failing = || -> Result<Box<dyn Engine>, EngineError> {
            Err(EngineError::ConstructionFailed {
                reason: "no memory".into(),
            })
        };
        assert!(failing.construct().is_err());
    }
}
