//! Crescent: a discrete-time spacecraft simulation substrate.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Crescent sub-crates. Components share typed state through a
//! hierarchical [`Store`](store::Store) and are dispatched once per tick,
//! in registration order, by a [`Scheduler`](engine::Scheduler).
//!
//! # Quick start
//!
//! ```rust
//! use crescent::prelude::*;
//!
//! // A task that integrates a constant velocity.
//! struct Coast {
//!     position: ElementId,
//!     velocity: ElementId,
//! }
//!
//! impl Task for Coast {
//!     fn name(&self) -> &str { "Coast" }
//!
//!     fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
//!         let dt = ctx.tick_period();
//!         let v = *ctx.store_ref().read::<f64>(self.velocity);
//!         *ctx.store().load::<f64>(self.position) += v * dt;
//!         Ok(())
//!     }
//! }
//!
//! let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
//! let store = sim.store_mut();
//! let coast = Coast {
//!     position: store.create::<f64>("root/csm/position"),
//!     velocity: store.create::<f64>("root/csm/velocity"),
//! };
//! let position = coast.position;
//! sim.register(coast);
//! let velocity: Override = "root/csm/velocity=2.0".parse().unwrap();
//! sim.apply_overrides(&[velocity]).unwrap();
//!
//! // 100 ticks at 100 Hz is one simulated second.
//! sim.run(99).unwrap();
//! assert!((sim.store().read::<f64>(position) - 2.0).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `crescent-core` | IDs, type tags, values, paths, errors |
//! | [`store`] | `crescent-store` | Elements, registry, directory tree, store |
//! | [`task`] | `crescent-task` | Task trait and dispatch context |
//! | [`engine`] | `crescent-engine` | Scheduler, configuration, simulation root |
//! | [`tasks`] | `crescent-tasks` | Time keeping, orbital masses, telemetry |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs and errors (`crescent-core`).
pub use crescent_core as types;

/// The typed blackboard (`crescent-store`).
///
/// [`store::Store`] owns every element; [`store::Directory`] and
/// [`store::DirectoryMut`] are views over its tree.
pub use crescent_store as store;

/// Task trait and dispatch context (`crescent-task`).
pub use crescent_task as task;

/// Scheduler and simulation root (`crescent-engine`).
pub use crescent_engine as engine;

/// Reference tasks (`crescent-tasks`).
pub use crescent_tasks as tasks;

/// Common imports for typical Crescent usage.
///
/// ```rust
/// use crescent::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crescent_core::{DirId, ElementId, Primitive, TickId, TypeTag, Value};

    // Errors
    pub use crescent_core::{AccessError, StoreError};

    // Store
    pub use crescent_store::{Directory, DirectoryMut, Store};

    // Task
    pub use crescent_task::{Task, TaskContext, TaskError};

    // Engine
    pub use crescent_engine::{
        Override, RunError, RunMetrics, Scheduler, SchedulerConfig, Simulation, SimulationConfig,
        Verbosity,
    };
}
