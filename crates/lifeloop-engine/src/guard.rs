//! At-most-once engine construction.
//!
//! Setup code can run more than once, sometimes concurrently, and two
//! engine instances must never be alive at once. The guard makes every
//! call after the first a no-op. The claim is a single atomic compare-exchange taken
//! *before* the factory runs, so two overlapping callers can never both
//! pass the check. No lock is held while the factory runs.

use std::sync::atomic::{AtomicU8, Ordering};

use lifeloop_core::{Engine, EngineFactory};

use crate::error::ControlError;

const IDLE: u8 = 0;
const CLAIMED: u8 = 1;
const FAILED: u8 = 2;

/// Ensures the engine factory runs at most once per session.
#[derive(Debug)]
pub struct LifecycleGuard {
    state: AtomicU8,
    allow_retry: bool,
}

impl LifecycleGuard {
    /// Create an unclaimed guard.
    ///
    /// With `allow_retry`, a failed construction releases the claim so a
    /// later [`acquire`](Self::acquire) can try again; otherwise the
    /// session is marked failed for good.
    pub fn new(allow_retry: bool) -> Self {
        Self {
            state: AtomicU8::new(IDLE),
            allow_retry,
        }
    }

    /// Construct the engine if nobody has claimed the guard yet.
    ///
    /// Returns `Ok(None)` when construction is already in flight or has
    /// completed; the caller must not touch engine state in that case.
    pub fn acquire(
        &self,
        factory: &dyn EngineFactory,
    ) -> Result<Option<Box<dyn Engine>>, ControlError> {
        match self
            .state
            .compare_exchange(IDLE, CLAIMED, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => self.construct(factory).map(Some),
            Err(FAILED) => Err(ControlError::SessionFailed),
            Err(_) => Ok(None),
        }
    }

    /// Build a replacement engine for a new session under an existing
    /// claim. Used by restart; a failure follows the same retry policy
    /// as [`acquire`](Self::acquire).
    pub fn reconstruct(
        &self,
        factory: &dyn EngineFactory,
    ) -> Result<Box<dyn Engine>, ControlError> {
        self.construct(factory)
    }

    /// Whether the guard is currently claimed.
    pub fn is_claimed(&self) -> bool {
        self.state.load(Ordering::Acquire) == CLAIMED
    }

    /// Whether a construction failed and retry is not enabled.
    pub fn has_failed(&self) -> bool {
        self.state.load(Ordering::Acquire) == FAILED
    }

    fn construct(&self, factory: &dyn EngineFactory) -> Result<Box<dyn Engine>, ControlError> {
        match factory.construct() {
            Ok(engine) => Ok(engine),
            Err(e) => {
                let next = if self.allow_retry { IDLE } else { FAILED };
                self.state.store(next, Ordering::Release);
                log::error!("engine construction failed: {e}");
                Err(ControlError::InitFailed(e))
            }
        }
    }
}
