//! Duplicate and concurrent initialization.
//!
//! However many threads call `initialize()` at once, and however many
//! times setup runs, exactly one engine is constructed.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use lifeloop_core::EngineFactory;
use lifeloop_engine::{ControlError, Initialized, PlaybackConfig, PlaybackController, PlaybackState};
use lifeloop_test_utils::CountingFactory;

fn slow_controller(threads_hint: usize) -> (Arc<CountingFactory>, Arc<PlaybackController>) {
    let factory = Arc::new(
        CountingFactory::new(8, 8, 16).with_delay(Duration::from_millis(20 + threads_hint as u64)),
    );
    let ctl = PlaybackController::new(
        Arc::clone(&factory) as Arc<dyn EngineFactory>,
        PlaybackConfig::default(),
    )
    .unwrap();
    (factory, Arc::new(ctl))
}

#[test]
fn concurrent_initialize_constructs_once() {
    for threads in [2, 4, 16] {
        let (factory, ctl) = slow_controller(threads);
        let barrier = Arc::new(Barrier::new(threads));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let ctl = Arc::clone(&ctl);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    ctl.initialize().unwrap()
                })
            })
            .collect();
        let outcomes: Vec<Initialized> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let constructed = outcomes
            .iter()
            .filter(|&&o| o == Initialized::Constructed)
            .count();
        assert_eq!(constructed, 1, "{threads} threads");
        assert_eq!(factory.constructed(), 1, "{threads} threads");
        assert_eq!(ctl.state(), PlaybackState::Ready);
    }
}

#[test]
fn controls_during_initialize_are_rejected() {
    let factory = Arc::new(CountingFactory::new(8, 8, 16).with_delay(Duration::from_millis(150)));
    let ctl = Arc::new(
        PlaybackController::new(
            Arc::clone(&factory) as Arc<dyn EngineFactory>,
            PlaybackConfig::default(),
        )
        .unwrap(),
    );

    let init = {
        let ctl = Arc::clone(&ctl);
        thread::spawn(move || ctl.initialize())
    };
    thread::sleep(Duration::from_millis(40));

    // Construction is in flight: every control is refused with a signal.
    assert_eq!(ctl.step_once(), Err(ControlError::NotInitialized));
    assert_eq!(ctl.toggle_play(), Err(ControlError::NotInitialized));
    assert_eq!(ctl.restart(), Err(ControlError::NotInitialized));
    assert_eq!(ctl.initialize(), Ok(Initialized::AlreadyClaimed));

    assert_eq!(init.join().unwrap(), Ok(Initialized::Constructed));
    assert_eq!(ctl.step_once().unwrap().generation.0, 1);
    assert_eq!(factory.constructed(), 1);
}

#[test]
fn shutdown_during_initialize_discards_engine() {
    let factory = Arc::new(CountingFactory::new(8, 8, 16).with_delay(Duration::from_millis(100)));
    let ctl = Arc::new(
        PlaybackController::new(
            Arc::clone(&factory) as Arc<dyn EngineFactory>,
            PlaybackConfig::default(),
        )
        .unwrap(),
    );

    let init = {
        let ctl = Arc::clone(&ctl);
        thread::spawn(move || ctl.initialize())
    };
    thread::sleep(Duration::from_millis(20));
    ctl.shutdown();

    assert_eq!(init.join().unwrap(), Err(ControlError::ShutDown));
    assert_eq!(factory.constructed(), 1);
    assert_eq!(factory.live(), 0);
}
