//! Terminal playback of the reference universe.
//!
//! Demonstrates:
//!   1. Building a `PlaybackController` around an engine factory
//!   2. Duplicate `initialize()` calls being absorbed by the guard
//!   3. Manual stepping, then timed playback at 10 steps per second
//!   4. Consuming published frames from a subscription
//!   5. Restart back to generation 0, then shutdown
//!
//! Run with:
//!   RUST_LOG=info cargo run --example terminal_player

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lifeloop_core::{Engine, EngineError};
use lifeloop_engine::{Frame, PlaybackConfig, PlaybackController};
use lifeloop_test_utils::Universe;

// ─── Playback parameters ────────────────────────────────────────

const WIDTH: u32 = 32;
const HEIGHT: u32 = 16;
const PLAY_FOR: Duration = Duration::from_millis(1_050);

fn show(frame: &Frame) {
    // Clear screen, cursor home.
    print!("\x1b[2J\x1b[H");
    println!("generation {}", frame.generation);
    print!("{}", frame.grid);
    if let Some(metrics) = &frame.metrics {
        println!("{metrics}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let factory = || -> Result<Box<dyn Engine>, EngineError> {
        Ok(Box::new(Universe::with_size(WIDTH, HEIGHT)))
    };
    let controller = PlaybackController::new(Arc::new(factory), PlaybackConfig::default())?;
    let frames = controller.subscribe();

    // Setup code may run twice; only the first call builds the engine.
    controller.initialize()?;
    controller.initialize()?;
    show(&controller.latest_frame());

    for _ in 0..3 {
        show(&controller.step_once()?);
        thread::sleep(Duration::from_millis(300));
    }

    let controls = controller.controls();
    println!("[{}] step={} restart={}", controls.toggle_label, controls.step, controls.restart);
    // Skip the frames already shown above.
    frames.try_iter().for_each(drop);
    controller.toggle_play()?;
    let deadline = std::time::Instant::now() + PLAY_FOR;
    while let Ok(frame) = frames.recv_deadline(deadline) {
        show(&frame);
    }
    controller.toggle_play()?;

    let frame = controller.restart()?;
    show(&frame);

    let report = controller.shutdown();
    println!(
        "shut down at generation {}",
        report.final_generation.map_or(0, |g| g.0)
    );
    Ok(())
}
