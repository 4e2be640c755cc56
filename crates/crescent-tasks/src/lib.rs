//! Reference tasks for Crescent simulations.
//!
//! - [`TimeKeeper`] publishes simulated time.
//! - [`Orbital`] publishes the masses of the configured bodies.
//! - [`Telemetry`] samples elements into binary streams at fixed rates.
//!
//! Each task creates or resolves its elements at construction and
//! touches the store only by ID afterwards. Construction errors are
//! [`SetupError`]s; dispatch errors are
//! [`TaskError`](crescent_task::TaskError)s.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod orbital;
pub mod telemetry;
pub mod time_keeper;

pub use error::SetupError;
pub use orbital::Orbital;
pub use telemetry::{file_sinks, Flow, Telemetry, BASE_RATE_HZ};
pub use time_keeper::TimeKeeper;
