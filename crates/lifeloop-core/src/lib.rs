//! Core types and traits for the lifeloop playback layer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the contract a cellular-automaton engine must satisfy to be driven
//! by the playback controller, the generation counter, the text grid
//! format, and the shared error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod id;
pub mod traits;

pub use error::{EngineError, GridError};
pub use grid::{CellMatrix, Glyphs};
pub use id::{CellsPtr, Generation};
pub use traits::{Engine, EngineFactory, EngineView};
