//! Errors returned by playback controls.

use std::error::Error;
use std::fmt;

use lifeloop_core::EngineError;

use crate::config::ConfigError;

/// Why a playback control was rejected.
///
/// Every rejection leaves the controller exactly as it was, except
/// where a variant says otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlError {
    /// No engine yet: `initialize()` has not completed.
    NotInitialized,
    /// The control is unavailable while the tick scheduler owns stepping.
    AlreadyPlaying,
    /// A tick timer is already running for this controller.
    TimerActive,
    /// The engine factory failed. The controller is `Uninitialized`.
    InitFailed(EngineError),
    /// An earlier construction failed and retry is not enabled.
    SessionFailed,
    /// The controller has been shut down.
    ShutDown,
    /// Invalid configuration, or the tick thread could not start.
    Config(ConfigError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "engine not initialized"),
            Self::AlreadyPlaying => write!(f, "not allowed while playing"),
            Self::TimerActive => write!(f, "tick timer already active"),
            Self::InitFailed(e) => write!(f, "initialization failed: {e}"),
            Self::SessionFailed => write!(f, "session failed permanently"),
            Self::ShutDown => write!(f, "controller is shut down"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InitFailed(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ControlError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
