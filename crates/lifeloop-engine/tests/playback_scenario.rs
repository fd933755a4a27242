//! End-to-end playback scenario.
//!
//! Fresh 8×8 session with 16 live cells: density 25.0, one manual step,
//! roughly three timed steps in 350 ms at a 100 ms period, pause, then
//! restart back to generation 0 with metrics from the new instance.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lifeloop_core::{EngineFactory, Generation};
use lifeloop_engine::{PlaybackConfig, PlaybackController, PlaybackState};
use lifeloop_test_utils::CountingFactory;

const TICK: Duration = Duration::from_millis(100);

#[test]
fn full_session() {
    let factory = Arc::new(CountingFactory::new(8, 8, 16));
    let config = PlaybackConfig {
        tick_period: TICK,
        ..PlaybackConfig::default()
    };
    let ctl =
        PlaybackController::new(Arc::clone(&factory) as Arc<dyn EngineFactory>, config).unwrap();

    ctl.initialize().unwrap();
    let metrics = ctl.metrics().unwrap();
    assert_eq!(metrics.total_cells, 64);
    assert_eq!(metrics.density_percent, 25.0);
    assert_eq!(ctl.generation(), Generation::ZERO);

    ctl.step_once().unwrap();
    assert_eq!(ctl.generation(), Generation(1));

    assert_eq!(ctl.toggle_play().unwrap(), PlaybackState::Playing);
    thread::sleep(Duration::from_millis(350));
    assert_eq!(ctl.toggle_play().unwrap(), PlaybackState::Ready);

    let after_play = ctl.generation().0;
    let timed = after_play - 1;
    assert!((2..=4).contains(&timed), "expected ~3 timed steps, got {timed}");

    thread::sleep(TICK * 2);
    assert_eq!(ctl.generation().0, after_play, "steps after pause");

    let frame = ctl.restart().unwrap();
    assert_eq!(frame.generation, Generation::ZERO);
    assert_eq!(ctl.generation(), Generation::ZERO);
    let fresh = frame.metrics.unwrap();
    assert_eq!(fresh.alive, 16);
    assert_eq!(fresh.density_percent, 25.0);
    assert_eq!(factory.constructed(), 2);
    assert_eq!(factory.live(), 1);

    ctl.shutdown();
    assert_eq!(factory.live(), 0);
}

#[test]
fn frames_arrive_in_generation_order() {
    let config = PlaybackConfig {
        tick_period: Duration::from_millis(5),
        ..PlaybackConfig::default()
    };
    let ctl = PlaybackController::new(Arc::new(CountingFactory::new(16, 16, 0)), config).unwrap();
    let rx = ctl.subscribe();

    ctl.initialize().unwrap();
    ctl.step_once().unwrap();
    ctl.toggle_play().unwrap();
    thread::sleep(Duration::from_millis(60));
    ctl.toggle_play().unwrap();

    let frames: Vec<_> = rx.try_iter().collect();
    assert!(frames.len() >= 3);
    for (expected, frame) in frames.iter().enumerate() {
        assert_eq!(frame.generation, Generation(expected as u64));
        let metrics = frame.metrics.as_ref().unwrap();
        // MockEngine gains one live cell per step, so metrics and
        // generation must agree in every frame.
        assert_eq!(u64::from(metrics.alive), frame.generation.0);
        assert_eq!(frame.grid.matches('◼').count() as u64, frame.generation.0);
    }
    assert_eq!(frames.last().unwrap(), &ctl.latest_frame());
}
