//! Lifeloop: playback and live stats for cellular-automaton engines.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Lifeloop sub-crates. For most users, adding `lifeloop` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use lifeloop::prelude::*;
//!
//! // A 4×4 engine where every cell is alive and stays alive.
//! struct Solid([u8; 16]);
//! impl EngineView for Solid {
//!     fn render(&self) -> String { "◼◼◼◼\n".repeat(4) }
//!     fn width(&self) -> u32 { 4 }
//!     fn height(&self) -> u32 { 4 }
//!     fn live_count(&self) -> u32 { 16 }
//!     fn buffer_byte_length(&self) -> usize { 2048 }
//!     fn cells_ptr(&self) -> usize { self.0.as_ptr() as usize }
//!     fn cell_byte_size(&self) -> usize { self.0.len() }
//! }
//! impl Engine for Solid {
//!     fn step(&mut self) {}
//! }
//!
//! let factory = || -> Result<Box<dyn Engine>, EngineError> { Ok(Box::new(Solid([1; 16]))) };
//! let controller =
//!     PlaybackController::new(std::sync::Arc::new(factory), PlaybackConfig::default()).unwrap();
//!
//! controller.initialize().unwrap();
//! let frame = controller.step_once().unwrap();
//! assert_eq!(frame.generation, Generation(1));
//!
//! let metrics = frame.metrics.unwrap();
//! assert_eq!(metrics.density_percent, 100.0);
//! assert_eq!(metrics.memory_kib, 2);
//! assert_eq!(controller.controls().toggle_label, "Play");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `lifeloop-core` | IDs, engine traits, grid parsing, engine errors |
//! | [`playback`] | `lifeloop-engine` | Controller, lifecycle guard, tick timer, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`lifeloop-core`).
///
/// Contains the [`types::Engine`] contract, [`types::Generation`],
/// [`types::CellsPtr`], and the [`types::CellMatrix`] grid parser.
pub use lifeloop_core as types;

/// Playback orchestration (`lifeloop-engine`).
///
/// [`playback::PlaybackController`] owns one engine, steps it on demand or
/// on a timer, and publishes [`playback::Frame`]s with derived
/// [`playback::Metrics`].
pub use lifeloop_engine as playback;

/// Common imports for typical Lifeloop usage.
///
/// ```rust
/// use lifeloop::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use lifeloop_core::{
        CellMatrix, CellsPtr, Engine, EngineError, EngineFactory, EngineView, Generation, Glyphs,
    };

    // Playback
    pub use lifeloop_engine::{
        derive_metrics, ControlError, Controls, Frame, Initialized, Metrics, PlaybackConfig,
        PlaybackController, PlaybackState,
    };
}
