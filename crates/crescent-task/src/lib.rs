//! Task trait and dispatch context for Crescent simulations.
//!
//! A [`Task`] is a unit of work the scheduler dispatches once per tick.
//! Tasks share state only through the [`Store`](crescent_store::Store)
//! reachable from their [`TaskContext`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod task;

pub use context::TaskContext;
pub use error::TaskError;
pub use task::Task;
