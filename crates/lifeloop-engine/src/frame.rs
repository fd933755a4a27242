//! Published playback output and its subscribers.
//!
//! Every step, initialize, and restart produces one [`Frame`]: the
//! rendered grid, the generation it belongs to, and the metrics derived
//! from the same engine state. Frames are built whole and then handed
//! out, so an observer never sees a grid from one step next to metrics
//! from another.

use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};
use lifeloop_core::Generation;

use crate::metrics::Metrics;

/// One published (grid, generation, metrics) triple.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Rendered grid text, forwarded from the engine unchanged.
    pub grid: Arc<str>,
    /// Generation of the engine state shown in `grid`.
    pub generation: Generation,
    /// Metrics for the same state. `None` before the first engine exists.
    pub metrics: Option<Metrics>,
}

impl Frame {
    /// The frame observers see before initialization: no grid, no metrics.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Fan-out of published frames to any number of subscribers.
///
/// Unbounded channels: publishing never blocks the stepping path.
/// Subscribers whose receiver has been dropped are pruned on the next
/// publish.
#[derive(Debug, Default)]
pub(crate) struct FrameBus {
    subscribers: Mutex<Vec<Sender<Frame>>>,
}

impl FrameBus {
    pub fn subscribe(&self) -> Receiver<Frame> {
        let (tx, rx) = crossbeam_channel::unbounded();
        crate::lock(&self.subscribers).push(tx);
        rx
    }

    pub fn publish(&self, frame: &Frame) {
        crate::lock(&self.subscribers).retain(|tx| tx.send(frame.clone()).is_ok());
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        crate::lock(&self.subscribers).len()
    }
}
