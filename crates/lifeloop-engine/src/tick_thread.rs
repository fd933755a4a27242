//! Fixed-interval tick timer for the Playing state.
//!
//! [`TickScheduler`] owns one background thread that fires every
//! `period` and performs exactly one step through `Shared::tick`, the
//! same stepping path a manual step takes. A firing runs to completion
//! (step, generation, metrics, publish) before the next deadline is
//! computed, so ticks never overlap.
//!
//! Stopping sets the stop flag, unparks the thread, and joins it. The
//! flag is re-checked after the session lock is taken, so a firing that
//! was already due when `stop()` began does not step the engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::ConfigError;
use crate::session::Shared;

/// Handle to a running tick thread.
///
/// Dropping the handle stops the thread.
pub(crate) struct TickScheduler {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<u64>>,
}

impl TickScheduler {
    /// Spawn the tick thread. The first firing happens one `period` from now.
    pub fn start(shared: Arc<Shared>, period: Duration, name: &str) -> Result<Self, ConfigError> {
        let stop = Arc::new(AtomicBool::new(false));
        let state = TickThreadState {
            shared,
            stop: Arc::clone(&stop),
            period,
        };
        let thread = thread::Builder::new()
            .name(name.into())
            .spawn(move || state.run())
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;
        Ok(Self {
            stop,
            thread: Some(thread),
        })
    }

    /// Stop the timer and wait for the thread to exit.
    ///
    /// Idempotent. Returns the number of steps the thread performed, or
    /// `None` if it was already stopped.
    pub fn stop(&mut self) -> Option<u64> {
        let handle = self.thread.take()?;
        self.stop.store(true, Ordering::Release);
        handle.thread().unpark();
        match handle.join() {
            Ok(fired) => Some(fired),
            Err(_) => {
                log::error!("tick thread panicked");
                Some(0)
            }
        }
    }

    /// Whether the thread is still owned by this handle.
    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// State moved into the tick thread.
struct TickThreadState {
    shared: Arc<Shared>,
    stop: Arc<AtomicBool>,
    period: Duration,
}

impl TickThreadState {
    /// Main loop. Runs until the stop flag is set or the session is gone.
    fn run(self) -> u64 {
        let mut fired = 0;
        let mut deadline = Instant::now() + self.period;

        loop {
            if !self.wait_until(deadline) {
                break;
            }

            if self.shared.tick(&self.stop).is_none() {
                break;
            }
            fired += 1;

            deadline += self.period;
            let now = Instant::now();
            if deadline <= now {
                // Overran one or more periods; don't burst to catch up.
                deadline = now + self.period;
            }
        }

        log::debug!("tick thread exiting after {fired} steps");
        fired
    }

    /// Park until `deadline`. Returns `false` if stop was requested.
    fn wait_until(&self, deadline: Instant) -> bool {
        loop {
            if self.stop.load(Ordering::Acquire) {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            // park_timeout can wake spuriously; the loop re-checks both.
            thread::park_timeout(deadline - now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use lifeloop_test_utils::MockEngine;

    fn shared_with_engine() -> Arc<Shared> {
        let shared = Arc::new(Shared::default());
        shared.replace(Some(Session::new(Box::new(MockEngine::new(8, 8, 0)))));
        shared
    }

    #[test]
    fn fires_at_fixed_period() {
        let shared = shared_with_engine();
        let mut timer =
            TickScheduler::start(Arc::clone(&shared), Duration::from_millis(20), "t").unwrap();
        thread::sleep(Duration::from_millis(110));
        let fired = timer.stop().unwrap();
        assert!((3..=6).contains(&fired), "fired {fired} times");
        assert_eq!(shared.generation().0, fired);
    }

    #[test]
    fn stop_is_idempotent_and_final() {
        let shared = shared_with_engine();
        let mut timer =
            TickScheduler::start(Arc::clone(&shared), Duration::from_millis(10), "t").unwrap();
        thread::sleep(Duration::from_millis(35));
        assert!(timer.stop().is_some());
        assert!(!timer.is_running());
        assert!(timer.stop().is_none());

        let frozen = shared.generation();
        thread::sleep(Duration::from_millis(40));
        assert_eq!(shared.generation(), frozen);
    }

    #[test]
    fn stop_is_prompt_with_long_period() {
        let shared = shared_with_engine();
        let mut timer =
            TickScheduler::start(Arc::clone(&shared), Duration::from_secs(5), "t").unwrap();
        let start = Instant::now();
        assert_eq!(timer.stop(), Some(0));
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn exits_when_session_cleared() {
        let shared = shared_with_engine();
        shared.replace(None);
        let mut timer =
            TickScheduler::start(Arc::clone(&shared), Duration::from_millis(5), "t").unwrap();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(timer.stop(), Some(0));
    }
}
