//! Benchmark profiles and utilities for the Lifeloop playback layer.
//!
//! - [`reference_factory`]: 64x64 reference universe (4K cells)
//! - [`stress_factory`]: 512x512 reference universe (~262K cells)
//! - [`manual_controller`]: an initialized controller whose timer never fires

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;
use std::time::Duration;

use lifeloop_core::{Engine, EngineError, EngineFactory};
use lifeloop_engine::{ControlError, PlaybackConfig, PlaybackController};
use lifeloop_test_utils::Universe;

/// Factory for a `width`x`height` reference universe.
pub fn universe_factory(width: u32, height: u32) -> Arc<dyn EngineFactory> {
    Arc::new(move || -> Result<Box<dyn Engine>, EngineError> {
        Ok(Box::new(Universe::with_size(width, height)))
    })
}

/// Factory for the 64x64 reference universe.
pub fn reference_factory() -> Arc<dyn EngineFactory> {
    universe_factory(64, 64)
}

/// Factory for a 512x512 universe.
///
/// Same seed pattern as [`reference_factory`] at 64x the cell count.
pub fn stress_factory() -> Arc<dyn EngineFactory> {
    universe_factory(512, 512)
}

/// Build and initialize a controller for manual stepping.
///
/// The tick period is an hour so toggling play never races the
/// measured calls.
pub fn manual_controller(
    factory: Arc<dyn EngineFactory>,
) -> Result<PlaybackController, ControlError> {
    let config = PlaybackConfig {
        tick_period: Duration::from_secs(3600),
        ..PlaybackConfig::default()
    };
    let controller = PlaybackController::new(factory, config)?;
    controller.initialize()?;
    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeloop_core::{EngineView, Generation};
    use lifeloop_engine::PlaybackState;

    #[test]
    fn reference_factory_builds_64x64() {
        let engine = reference_factory().construct().unwrap();
        assert_eq!((engine.width(), engine.height()), (64, 64));
    }

    #[test]
    fn manual_controller_is_ready() {
        let ctl = manual_controller(reference_factory()).unwrap();
        assert_eq!(ctl.state(), PlaybackState::Ready);
        assert_eq!(ctl.generation(), Generation::ZERO);
        assert_eq!(ctl.metrics().unwrap().total_cells, 4096);
    }
}
