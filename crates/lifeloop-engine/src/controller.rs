//! User-facing [`PlaybackController`] and its state machine.
//!
//! ```text
//!                initialize()            toggle_play()
//!  Uninitialized ────────────▶ Ready ◀────────────────▶ Playing
//!                               ▲  │ step_once()          │
//!                               │  └──────┘               │
//!                               └──────── restart() ──────┘
//! ```
//!
//! The controller owns the engine (through its session), the tick
//! timer, and the lifecycle guard. Controls take `&self` so a controller
//! can be shared between threads; every transition is serialized by an
//! internal lock. The tick thread never takes that lock, only the
//! session lock, which is always acquired second.

use std::sync::{Arc, Mutex};

use crossbeam_channel::Receiver;
use lifeloop_core::{EngineFactory, Generation};

use crate::config::PlaybackConfig;
use crate::error::ControlError;
use crate::frame::Frame;
use crate::guard::LifecycleGuard;
use crate::metrics::Metrics;
use crate::session::{Session, Shared};
use crate::tick_thread::TickScheduler;

// ── PlaybackState ────────────────────────────────────────────────

/// Where the controller is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No engine yet.
    Uninitialized,
    /// Engine present, tick timer stopped.
    Ready,
    /// Engine present, tick timer running.
    Playing,
}

impl PlaybackState {
    /// Which controls are enabled in this state.
    pub fn controls(self) -> Controls {
        match self {
            Self::Uninitialized => Controls {
                step: false,
                toggle: false,
                restart: false,
                toggle_label: "Play",
            },
            Self::Ready => Controls {
                step: true,
                toggle: true,
                restart: true,
                toggle_label: "Play",
            },
            Self::Playing => Controls {
                step: false,
                toggle: true,
                restart: false,
                toggle_label: "Pause",
            },
        }
    }
}

/// Enabled/disabled predicates for the user-facing controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Controls {
    /// Step is enabled.
    pub step: bool,
    /// Play/Pause is enabled.
    pub toggle: bool,
    /// Restart is enabled.
    pub restart: bool,
    /// Label for the Play/Pause control in this state.
    pub toggle_label: &'static str,
}

// ── Initialized / ShutdownReport ─────────────────────────────────

/// Outcome of a successful [`PlaybackController::initialize`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Initialized {
    /// This call built the engine.
    Constructed,
    /// Another call already built the engine or is building it now.
    /// Nothing was changed.
    AlreadyClaimed,
}

/// Report from [`PlaybackController::shutdown`].
#[derive(Debug, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Whether a running tick timer was stopped.
    pub timer_stopped: bool,
    /// Generation of the discarded engine, if there was one.
    pub final_generation: Option<Generation>,
}

// ── PlaybackController ───────────────────────────────────────────

struct Control {
    state: PlaybackState,
    timer: Option<TickScheduler>,
    shut_down: bool,
}

impl Control {
    /// Reject every control after shutdown.
    fn check_live(&self) -> Result<(), ControlError> {
        if self.shut_down {
            Err(ControlError::ShutDown)
        } else {
            Ok(())
        }
    }

    fn stop_timer(&mut self) -> bool {
        match self.timer.take() {
            Some(mut timer) => {
                let fired = timer.stop().unwrap_or(0);
                log::debug!("tick timer stopped after {fired} steps");
                true
            }
            None => false,
        }
    }
}

/// Playback controller for a single engine session.
///
/// Drives an engine produced by an [`EngineFactory`]: builds it once,
/// steps it on demand or on a fixed timer, rebuilds it on restart, and
/// publishes a [`Frame`] after every change.
pub struct PlaybackController {
    config: PlaybackConfig,
    factory: Arc<dyn EngineFactory>,
    guard: LifecycleGuard,
    shared: Arc<Shared>,
    control: Mutex<Control>,
}

impl PlaybackController {
    /// Create an uninitialized controller. No engine is built yet.
    pub fn new(
        factory: Arc<dyn EngineFactory>,
        config: PlaybackConfig,
    ) -> Result<Self, ControlError> {
        config.validate()?;
        Ok(Self {
            guard: LifecycleGuard::new(config.allow_init_retry),
            config,
            factory,
            shared: Arc::new(Shared::default()),
            control: Mutex::new(Control {
                state: PlaybackState::Uninitialized,
                timer: None,
                shut_down: false,
            }),
        })
    }

    /// Build the engine and publish generation 0.
    ///
    /// Safe to call any number of times, from any number of threads:
    /// only the first call constructs; the rest return
    /// [`Initialized::AlreadyClaimed`] without touching engine state.
    /// Construction runs without the controller lock held, so other
    /// controls called meanwhile are rejected with
    /// [`ControlError::NotInitialized`] rather than blocking.
    pub fn initialize(&self) -> Result<Initialized, ControlError> {
        {
            let control = crate::lock(&self.control);
            control.check_live()?;
            if control.state != PlaybackState::Uninitialized {
                return Ok(Initialized::AlreadyClaimed);
            }
        }

        let Some(engine) = self.guard.acquire(&*self.factory)? else {
            return Ok(Initialized::AlreadyClaimed);
        };

        let mut control = crate::lock(&self.control);
        // Shutdown may have happened while the factory was running.
        control.check_live()?;

        let frame = self.shared.replace(Some(Session::new(engine)));
        control.state = PlaybackState::Ready;
        log::info!(
            "engine initialized: {}",
            frame
                .metrics
                .as_ref()
                .map_or_else(String::new, |m| format!("{}x{}", m.width, m.height))
        );
        Ok(Initialized::Constructed)
    }

    /// Advance the engine by one generation.
    ///
    /// Only allowed in [`PlaybackState::Ready`]; while playing the tick
    /// timer owns stepping.
    pub fn step_once(&self) -> Result<Frame, ControlError> {
        let control = crate::lock(&self.control);
        control.check_live()?;
        match control.state {
            PlaybackState::Uninitialized => Err(ControlError::NotInitialized),
            PlaybackState::Playing => Err(ControlError::AlreadyPlaying),
            PlaybackState::Ready => self
                .shared
                .step_and_publish()
                .ok_or(ControlError::NotInitialized),
        }
    }

    /// Start the tick timer when ready, stop it when playing.
    ///
    /// Returns the new state.
    pub fn toggle_play(&self) -> Result<PlaybackState, ControlError> {
        let mut control = crate::lock(&self.control);
        control.check_live()?;
        match control.state {
            PlaybackState::Uninitialized => Err(ControlError::NotInitialized),
            PlaybackState::Ready => {
                if control.timer.is_some() {
                    return Err(ControlError::TimerActive);
                }
                let timer = TickScheduler::start(
                    Arc::clone(&self.shared),
                    self.config.tick_period,
                    &self.config.thread_name,
                )?;
                control.timer = Some(timer);
                control.state = PlaybackState::Playing;
                log::info!("playing every {:?}", self.config.tick_period);
                Ok(PlaybackState::Playing)
            }
            PlaybackState::Playing => {
                control.stop_timer();
                control.state = PlaybackState::Ready;
                log::info!("paused at generation {}", self.shared.generation());
                Ok(PlaybackState::Ready)
            }
        }
    }

    /// Replace the engine with a freshly constructed one at generation 0.
    ///
    /// Stops the tick timer first, then discards the old engine before
    /// building the new one. If construction fails the controller falls
    /// back to [`PlaybackState::Uninitialized`] and the lifecycle guard
    /// applies the configured retry policy.
    pub fn restart(&self) -> Result<Frame, ControlError> {
        let mut control = crate::lock(&self.control);
        control.check_live()?;
        if control.state == PlaybackState::Uninitialized {
            return Err(ControlError::NotInitialized);
        }

        control.stop_timer();
        control.state = PlaybackState::Ready;
        drop(self.shared.clear());

        match self.guard.reconstruct(&*self.factory) {
            Ok(engine) => {
                let frame = self.shared.replace(Some(Session::new(engine)));
                log::info!("engine restarted");
                Ok(frame)
            }
            Err(e) => {
                control.state = PlaybackState::Uninitialized;
                self.shared.replace(None);
                Err(e)
            }
        }
    }

    /// Tear down the session: stop the timer, then discard the engine.
    ///
    /// Idempotent. Every control called afterwards returns
    /// [`ControlError::ShutDown`]. Also run on drop.
    pub fn shutdown(&self) -> ShutdownReport {
        let mut control = crate::lock(&self.control);
        if control.shut_down {
            return ShutdownReport {
                timer_stopped: false,
                final_generation: None,
            };
        }
        control.shut_down = true;

        let timer_stopped = control.stop_timer();
        let final_generation = self.shared.clear().map(|session| session.generation());
        control.state = PlaybackState::Uninitialized;
        log::info!("playback shut down");

        ShutdownReport {
            timer_stopped,
            final_generation,
        }
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        crate::lock(&self.control).state
    }

    /// Enabled controls for the current state.
    pub fn controls(&self) -> Controls {
        self.state().controls()
    }

    /// Whether a tick timer is currently running.
    pub fn is_timer_active(&self) -> bool {
        crate::lock(&self.control)
            .timer
            .as_ref()
            .is_some_and(TickScheduler::is_running)
    }

    /// Generation of the current engine (0 if there is none).
    pub fn generation(&self) -> Generation {
        self.shared.generation()
    }

    /// The most recently published frame.
    pub fn latest_frame(&self) -> Frame {
        self.shared.latest_frame()
    }

    /// Metrics of the most recent frame, if an engine exists.
    pub fn metrics(&self) -> Option<Metrics> {
        self.latest_frame().metrics
    }

    /// Receive every frame published from now on.
    pub fn subscribe(&self) -> Receiver<Frame> {
        self.shared.bus.subscribe()
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
