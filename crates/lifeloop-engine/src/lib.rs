//! Playback orchestration for cellular-automaton engines.
//!
//! Provides the [`PlaybackController`] that owns a single engine
//! instance, steps it on demand or on a fixed-interval timer, and
//! publishes a [`Frame`] (grid, generation, [`Metrics`]) after every
//! change. The engine itself is a black box behind
//! [`lifeloop_core::Engine`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod config;
pub mod controller;
pub mod error;
pub mod frame;
pub mod guard;
pub mod metrics;
mod session;
mod tick_thread;

pub use config::{ConfigError, PlaybackConfig};
pub use controller::{Controls, Initialized, PlaybackController, PlaybackState, ShutdownReport};
pub use error::ControlError;
pub use frame::Frame;
pub use guard::LifecycleGuard;
pub use metrics::{derive_metrics, Metrics};

/// Lock a mutex, recovering the data if a previous holder panicked.
///
/// Guarded values are only ever replaced whole, so a poisoned lock
/// still holds a consistent value.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
