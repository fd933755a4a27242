//! Error types shared across the lifeloop workspace.

use std::error::Error;
use std::fmt;

/// Errors reported by an engine or its factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The factory could not build an engine instance.
    ConstructionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstructionFailed { reason } => {
                write!(f, "engine construction failed: {reason}")
            }
        }
    }
}

impl Error for EngineError {}

/// Errors from parsing a rendered text grid into a [`CellMatrix`](crate::CellMatrix).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A row's length differs from the first row's.
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character is neither the alive nor the dead glyph.
    UnknownGlyph {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index (in characters).
        column: usize,
        /// The unexpected character.
        glyph: char,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::UnknownGlyph { row, column, glyph } => {
                write!(f, "unknown glyph {glyph:?} at row {row}, column {column}")
            }
        }
    }
}

impl Error for GridError {}
