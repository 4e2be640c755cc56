//! Fixed-tick scheduler and simulation root for Crescent.
//!
//! [`Scheduler`] dispatches registered [`Task`](crescent_task::Task)s
//! against a [`Store`](crescent_store::Store) once per tick, strictly in
//! registration order, from the configured start tick to a stop tick
//! inclusive. The first task error halts the run.
//!
//! [`Simulation`] bundles one store with one scheduler and applies
//! `path=value` [`Override`]s from option tables or config files.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod overrides;
pub mod progress;
pub mod scheduler;
pub mod simulation;

pub use config::{ConfigError, SchedulerConfig, SimulationConfig, Verbosity};
pub use error::RunError;
pub use metrics::RunMetrics;
pub use overrides::Override;
pub use progress::Progress;
pub use scheduler::{HaltReason, Scheduler, SchedulerState};
pub use simulation::Simulation;
