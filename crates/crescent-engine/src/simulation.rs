//! The [`Simulation`] composition root.

use crescent_store::Store;
use crescent_task::Task;
use tracing::debug;

use crate::config::{ConfigError, SimulationConfig};
use crate::error::RunError;
use crate::metrics::RunMetrics;
use crate::overrides::Override;
use crate::scheduler::Scheduler;

/// One store plus one scheduler.
///
/// Tasks are usually built against the store first, since they create
/// their elements during construction, and then registered:
///
/// ```
/// use crescent_engine::{Override, Simulation, SimulationConfig};
///
/// let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
/// let mass = sim.store_mut().create::<f64>("root/orbital/sun/mass");
/// let sun: Override = "root/orbital/sun/mass=1.989e30".parse().unwrap();
/// sim.apply_overrides(&[sun]).unwrap();
/// assert_eq!(*sim.store().read::<f64>(mass), 1.989e30);
/// ```
#[derive(Debug)]
pub struct Simulation {
    store: Store,
    scheduler: Scheduler,
}

impl Simulation {
    /// Create a simulation with an empty store and no tasks.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: Store::new(),
            scheduler: Scheduler::new(config.scheduler)?,
        })
    }

    /// The shared store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Mutable access to the shared store.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Register a task with the scheduler.
    pub fn register<T: Task>(&mut self, task: T) -> usize {
        self.scheduler.register(task)
    }

    /// Build a task against the store, then register it.
    pub fn register_with<T, E, F>(&mut self, build: F) -> Result<usize, E>
    where
        T: Task,
        F: FnOnce(&mut Store) -> Result<T, E>,
    {
        let task = build(&mut self.store)?;
        Ok(self.scheduler.register(task))
    }

    /// Apply overrides in order, stopping at the first failure.
    ///
    /// Overrides applied before the failure stay applied.
    pub fn apply_overrides(&mut self, overrides: &[Override]) -> Result<(), ConfigError> {
        for o in overrides {
            o.apply(&mut self.store)?;
            debug!(path = %o.path, value = %o.value, "applied override");
        }
        Ok(())
    }

    /// Run the scheduler through `stop_tick` inclusive.
    pub fn run(&mut self, stop_tick: u64) -> Result<RunMetrics, RunError> {
        self.scheduler.run(&mut self.store, stop_tick)
    }
}
