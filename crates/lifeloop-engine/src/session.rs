//! One engine instance together with its generation and latest frame.
//!
//! A [`Session`] is created when an engine is constructed and dropped
//! when the engine is discarded, so the handle and its counter always
//! live and die together. [`Session::advance`] is the single stepping
//! path shared by manual steps and the tick thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use lifeloop_core::{Engine, Generation};

use crate::frame::{Frame, FrameBus};
use crate::metrics::derive_metrics;

pub(crate) struct Session {
    engine: Box<dyn Engine>,
    generation: Generation,
    frame: Frame,
}

impl Session {
    /// Wrap a freshly constructed engine. Generation 0, zero step time.
    pub fn new(engine: Box<dyn Engine>) -> Self {
        let frame = snapshot(&*engine, Generation::ZERO, Duration::ZERO);
        Self {
            engine,
            generation: Generation::ZERO,
            frame,
        }
    }

    /// Step the engine once and rebuild the frame from the new state.
    ///
    /// Engine step, generation increment, metrics, and render happen in
    /// that order and all complete before this returns.
    pub fn advance(&mut self) -> &Frame {
        let start = Instant::now();
        self.engine.step();
        let elapsed = start.elapsed();

        self.generation = self.generation.next();
        self.frame = snapshot(&*self.engine, self.generation, elapsed);
        &self.frame
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}

fn snapshot(engine: &dyn Engine, generation: Generation, step: Duration) -> Frame {
    let metrics = derive_metrics(engine, step);
    if metrics.is_degenerate() {
        log::warn!(
            "engine reports a zero-area grid ({}x{}); density shown as 0",
            metrics.width,
            metrics.height
        );
    }
    Frame {
        grid: Arc::from(engine.render()),
        generation,
        metrics: Some(metrics),
    }
}

/// State shared between the controller and its tick thread.
///
/// `session` is `None` until initialization and after teardown. The tick
/// thread only ever takes this lock, never the controller's.
#[derive(Default)]
pub(crate) struct Shared {
    pub session: Mutex<Option<Session>>,
    pub bus: FrameBus,
}

impl Shared {
    /// Advance the current session and publish the result while still
    /// holding the session lock, so frames reach subscribers in
    /// generation order.
    pub fn step_and_publish(&self) -> Option<Frame> {
        let mut slot = crate::lock(&self.session);
        self.advance_locked(&mut slot)
    }

    /// Tick-thread variant of [`step_and_publish`](Self::step_and_publish).
    ///
    /// `stop` is re-checked after the lock is taken: a firing that was
    /// already due when the timer was stopped does not step the engine.
    pub fn tick(&self, stop: &AtomicBool) -> Option<Frame> {
        let mut slot = crate::lock(&self.session);
        if stop.load(Ordering::Acquire) {
            return None;
        }
        self.advance_locked(&mut slot)
    }

    fn advance_locked(&self, slot: &mut Option<Session>) -> Option<Frame> {
        let frame = slot.as_mut()?.advance().clone();
        self.bus.publish(&frame);
        Some(frame)
    }

    /// Install a new session (or clear it) and publish its frame.
    pub fn replace(&self, session: Option<Session>) -> Frame {
        let mut slot = crate::lock(&self.session);
        let frame = session
            .as_ref()
            .map_or_else(Frame::empty, |s| s.frame().clone());
        // Old engine is dropped here, before anyone can step the new one.
        *slot = session;
        self.bus.publish(&frame);
        frame
    }

    /// Take the current session out without publishing anything.
    pub fn clear(&self) -> Option<Session> {
        crate::lock(&self.session).take()
    }

    pub fn latest_frame(&self) -> Frame {
        crate::lock(&self.session)
            .as_ref()
            .map_or_else(Frame::empty, |s| s.frame().clone())
    }

    pub fn generation(&self) -> Generation {
        crate::lock(&self.session)
            .as_ref()
            .map_or(Generation::ZERO, Session::generation)
    }
}
