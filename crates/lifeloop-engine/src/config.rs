//! Playback configuration, validation, and error types.
//!
//! [`PlaybackConfig`] is the input for constructing a
//! [`PlaybackController`](crate::controller::PlaybackController).
//! [`validate()`](PlaybackConfig::validate) checks its invariants before
//! any engine is built.

use std::error::Error;
use std::fmt;
use std::time::Duration;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`PlaybackConfig::validate()`] or while
/// starting the tick thread.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The tick period is zero.
    InvalidTickPeriod {
        /// The configured period.
        period: Duration,
    },
    /// A steps-per-second rate is NaN, infinite, zero, or negative.
    InvalidTickRate {
        /// The invalid value.
        value: f64,
    },
    /// The tick thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the spawn failure.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTickPeriod { period } => {
                write!(f, "tick period must be positive, got {period:?}")
            }
            Self::InvalidTickRate { value } => {
                write!(f, "steps per second must be finite and positive, got {value}")
            }
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── PlaybackConfig ─────────────────────────────────────────────────

/// Configuration for a playback session.
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    /// Interval between automatic steps while playing. Default: 100 ms
    /// (10 steps per second). Shared by every tick of the session.
    pub tick_period: Duration,
    /// Whether `initialize()` may try again after the engine factory
    /// failed. When `false` a failed construction leaves the session
    /// permanently failed. Default: `false`.
    pub allow_init_retry: bool,
    /// Name given to the tick thread. Default: `"lifeloop-tick"`.
    pub thread_name: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(100),
            allow_init_retry: false,
            thread_name: "lifeloop-tick".into(),
        }
    }
}

impl PlaybackConfig {
    /// Build a config ticking `hz` times per second, other fields default.
    pub fn from_steps_per_second(hz: f64) -> Result<Self, ConfigError> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ConfigError::InvalidTickRate { value: hz });
        }
        let tick_period = Duration::try_from_secs_f64(1.0 / hz)
            .map_err(|_| ConfigError::InvalidTickRate { value: hz })?;
        let config = Self {
            tick_period,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Steps per second implied by the tick period.
    pub fn steps_per_second(&self) -> f64 {
        1.0 / self.tick_period.as_secs_f64()
    }

    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period.is_zero() {
            return Err(ConfigError::InvalidTickPeriod {
                period: self.tick_period,
            });
        }
        Ok(())
    }
}
