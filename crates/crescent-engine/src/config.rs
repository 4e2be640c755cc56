//! Scheduler and simulation configuration, validation, and error types.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use crescent_core::{StoreError, TickId};

// ── Verbosity ──────────────────────────────────────────────────────

/// How chatty the scheduler is about progress.
///
/// Ordered: `Quiet < Terse < Verbose < Debug`. This gates *what* the
/// scheduler chooses to report; the installed `tracing` subscriber still
/// decides what is actually emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verbosity {
    /// Report nothing.
    Quiet,
    /// Report progress only.
    #[default]
    Terse,
    /// Also report per-run summaries.
    Verbose,
    /// Also report every tick.
    Debug,
}

impl Verbosity {
    /// Map an integer level onto a verbosity, clamping out-of-range
    /// values to `Quiet` or `Debug`.
    pub fn from_level(level: i64) -> Self {
        match level {
            i64::MIN..=0 => Self::Quiet,
            1 => Self::Terse,
            2 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Integer level of this verbosity (`0..=3`).
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl From<i64> for Verbosity {
    fn from(level: i64) -> Self {
        Self::from_level(level)
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quiet => "quiet",
            Self::Terse => "terse",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
        })
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating configuration or applying overrides.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// tick_rate_hz is NaN, infinite, zero, or negative.
    InvalidTickRate {
        /// The invalid value.
        value: f64,
    },
    /// An override is not of the form `path=value`.
    MalformedOverride {
        /// The offending text.
        text: String,
    },
    /// An override could not be applied to the store.
    Override {
        /// Path named by the override.
        path: String,
        /// Why it failed.
        source: StoreError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTickRate { value } => {
                write!(f, "tick_rate_hz must be finite and positive, got {value}")
            }
            Self::MalformedOverride { text } => {
                write!(f, "override '{text}' is not of the form path=value")
            }
            Self::Override { path, source } => {
                write!(f, "override for '{path}' failed: {source}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Override { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ── SchedulerConfig ────────────────────────────────────────────────

/// Configuration for a [`Scheduler`](crate::Scheduler).
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Tick the counter starts at. Default: 0.
    pub start_tick: TickId,
    /// Ticks per simulated second. Default: 100.
    pub tick_rate_hz: f64,
    /// Sleep after each tick for whatever remains of the tick period.
    /// Default: false.
    pub realtime: bool,
    /// Progress reporting level. Default: [`Verbosity::Terse`].
    pub verbosity: Verbosity,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            start_tick: TickId(0),
            tick_rate_hz: 100.0,
            realtime: false,
            verbosity: Verbosity::default(),
        }
    }
}

impl SchedulerConfig {
    /// Check that the tick rate is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The period must fit a Duration, so tiny rates are out too.
        let hz = self.tick_rate_hz;
        if !hz.is_finite() || hz <= 0.0 || Duration::try_from_secs_f64(1.0 / hz).is_err() {
            return Err(ConfigError::InvalidTickRate { value: hz });
        }
        Ok(())
    }

    /// Simulated seconds per tick.
    pub fn tick_period(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }

    /// Wall-clock budget of one tick when pacing to real time.
    ///
    /// Saturates at [`Duration::MAX`] for a rate that
    /// [`validate`](Self::validate) would reject.
    pub fn tick_budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.tick_period()).unwrap_or(Duration::MAX)
    }
}

// ── SimulationConfig ───────────────────────────────────────────────

/// Configuration for a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, Default)]
pub struct SimulationConfig {
    /// Scheduler settings.
    pub scheduler: SchedulerConfig,
}

impl SimulationConfig {
    /// Validate all nested configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler.validate()
    }
}
