//! Test utilities and mock engines for lifeloop development.
//!
//! Provides a scripted [`MockEngine`], factories that count or fail
//! constructions ([`CountingFactory`], [`FailingFactory`]), and a small
//! reference [`Universe`] in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::Universe;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lifeloop_core::{Engine, EngineError, EngineFactory, EngineView};

/// Backing memory reported by mocks: 17 pages of 64 KiB.
pub const MOCK_BUFFER_BYTES: usize = 17 * 65_536;

/// Engine with scripted, predictable state.
///
/// Starts with `alive` live cells and gains one per step until the grid
/// is full. Live cells fill the grid in row-major order, so the rendered
/// text is easy to assert on.
pub struct MockEngine {
    width: u32,
    height: u32,
    alive: u32,
    cells: Vec<u8>,
    live_counter: Option<Arc<AtomicUsize>>,
}

impl MockEngine {
    pub fn new(width: u32, height: u32, alive: u32) -> Self {
        Self {
            width,
            height,
            alive,
            cells: vec![0; (width * height) as usize],
            live_counter: None,
        }
    }

    /// Decrement `counter` when this engine is dropped.
    pub fn tracked(mut self, counter: Arc<AtomicUsize>) -> Self {
        self.live_counter = Some(counter);
        self
    }
}

impl EngineView for MockEngine {
    fn render(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3 + self.height as usize);
        for row in 0..self.height {
            for col in 0..self.width {
                let idx = row * self.width + col;
                out.push(if idx < self.alive { '◼' } else { '◻' });
            }
            out.push('\n');
        }
        out
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn live_count(&self) -> u32 {
        self.alive
    }

    fn buffer_byte_length(&self) -> usize {
        MOCK_BUFFER_BYTES
    }

    fn cells_ptr(&self) -> usize {
        self.cells.as_ptr() as usize
    }

    fn cell_byte_size(&self) -> usize {
        self.cells.len()
    }
}

impl Engine for MockEngine {
    fn step(&mut self) {
        if self.alive < self.width * self.height {
            self.alive += 1;
        }
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        if let Some(counter) = &self.live_counter {
            counter.fetch_sub(1, Ordering::AcqRel);
        }
    }
}

/// Factory producing [`MockEngine`]s and counting what it built.
pub struct CountingFactory {
    width: u32,
    height: u32,
    alive: u32,
    delay: Option<Duration>,
    constructed: AtomicUsize,
    live: Arc<AtomicUsize>,
}

impl CountingFactory {
    pub fn new(width: u32, height: u32, alive: u32) -> Self {
        Self {
            width,
            height,
            alive,
            delay: None,
            constructed: AtomicUsize::new(0),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sleep for `delay` inside every construction, widening the window
    /// in which overlapping callers could race.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of engines built so far.
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::Acquire)
    }

    /// Number of built engines not yet dropped.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }
}

impl EngineFactory for CountingFactory {
    fn construct(&self) -> Result<Box<dyn Engine>, EngineError> {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.constructed.fetch_add(1, Ordering::AcqRel);
        self.live.fetch_add(1, Ordering::AcqRel);
        let engine =
            MockEngine::new(self.width, self.height, self.alive).tracked(Arc::clone(&self.live));
        Ok(Box::new(engine))
    }
}

/// Factory that fails its first `failures` constructions, then
/// delegates to an inner [`CountingFactory`].
pub struct FailingFactory {
    failures: AtomicUsize,
    attempts: AtomicUsize,
    inner: CountingFactory,
}

impl FailingFactory {
    pub fn new(failures: usize, inner: CountingFactory) -> Self {
        Self {
            failures: AtomicUsize::new(failures),
            attempts: AtomicUsize::new(0),
            inner,
        }
    }

    /// Number of construction attempts, failed or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Acquire)
    }

    /// Fail the next `n` constructions on top of any still pending.
    pub fn fail_next(&self, n: usize) {
        self.failures.fetch_add(n, Ordering::AcqRel);
    }

    pub fn inner(&self) -> &CountingFactory {
        &self.inner
    }
}

impl EngineFactory for FailingFactory {
    fn construct(&self) -> Result<Box<dyn Engine>, EngineError> {
        self.attempts.fetch_add(1, Ordering::AcqRel);
        let failed = self
            .failures
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(EngineError::ConstructionFailed {
                reason: "scripted failure".into(),
            });
        }
        self.inner.construct()
    }
}
