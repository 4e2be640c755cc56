//! The fixed-tick [`Scheduler`].
//!
//! # State machine
//!
//! ```text
//!  Idle ──run──▶ Running ──stop tick reached, all finished──▶ Halted(Completed)
//!                   │
//!                   └──task or finish error──▶ Halted(TaskFailed)
//! ```
//!
//! Every run ends by calling [`Task::finish`] on each task, whether it
//! completed or failed.
//!
//! `Halted` is terminal: further calls to [`Scheduler::run`] return
//! [`RunError::Halted`] without dispatching anything.

use std::fmt;
use std::time::Instant;

use crescent_core::TickId;
use crescent_store::Store;
use crescent_task::{Task, TaskContext};
use tracing::{debug, error, info, trace, warn};

use crate::config::{ConfigError, SchedulerConfig, Verbosity};
use crate::error::RunError;
use crate::metrics::RunMetrics;
use crate::progress::Progress;

/// Why a scheduler stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// The stop tick was reached.
    Completed,
    /// A task returned an error.
    TaskFailed,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "completed",
            Self::TaskFailed => "task failed",
        })
    }
}

/// Lifecycle state of a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not yet run; the counter is at the configured start tick.
    Idle,
    /// Inside [`Scheduler::run`].
    Running,
    /// Terminal.
    Halted(HaltReason),
}

/// Dispatches registered tasks once per tick in registration order.
///
/// # Examples
///
/// ```
/// use crescent_core::ElementId;
/// use crescent_engine::{Scheduler, SchedulerConfig};
/// use crescent_store::Store;
/// use crescent_task::{Task, TaskContext, TaskError};
///
/// struct Count(ElementId);
///
/// impl Task for Count {
///     fn name(&self) -> &str { "Count" }
///     fn dispatch(&mut self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
///         *ctx.store().load::<u64>(self.0) += 1;
///         Ok(())
///     }
/// }
///
/// let mut store = Store::new();
/// let n = store.create::<u64>("root/n");
/// let mut scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
/// scheduler.register(Count(n));
///
/// let metrics = scheduler.run(&mut store, 9).unwrap();
/// assert_eq!(metrics.ticks_completed, 10);
/// assert_eq!(*store.read::<u64>(n), 10);
/// ```
pub struct Scheduler {
    config: SchedulerConfig,
    tasks: Vec<Box<dyn Task>>,
    tick: TickId,
    state: SchedulerState,
    progress: Progress,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("tasks", &self.task_names())
            .field("tick", &self.tick)
            .field("state", &self.state)
            .finish()
    }
}

impl Scheduler {
    /// Create an idle scheduler with no tasks.
    pub fn new(config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let tick = config.start_tick;
        Ok(Self {
            config,
            tasks: Vec::new(),
            tick,
            state: SchedulerState::Idle,
            progress: Progress::default(),
        })
    }

    /// Append a task. Returns its position, which is also its dispatch
    /// order within every tick.
    pub fn register<T: Task>(&mut self, task: T) -> usize {
        self.register_boxed(Box::new(task))
    }

    /// Append an already boxed task.
    pub fn register_boxed(&mut self, task: Box<dyn Task>) -> usize {
        let index = self.tasks.len();
        debug!(task = task.name(), index, "registered task");
        self.tasks.push(task);
        index
    }

    /// The configuration this scheduler was built with.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// The next tick to be dispatched.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Number of registered tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Task names in registration order.
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    /// Dispatch every task for every tick from the current tick through
    /// `stop_tick` inclusive, then call every task's
    /// [`finish`](Task::finish) in registration order.
    ///
    /// The first task error stops the run immediately: the remaining
    /// tasks of that tick and all later ticks are skipped, the scheduler
    /// halts, and the error is returned. Tasks are still finished in
    /// that case; their finish errors are logged and dropped. A
    /// `stop_tick` below the current tick dispatches nothing and
    /// completes.
    ///
    /// The counter moves to the tick after `stop_tick`, except at
    /// `u64::MAX`, where it stays.
    pub fn run(&mut self, store: &mut Store, stop_tick: u64) -> Result<RunMetrics, RunError> {
        if let SchedulerState::Halted(reason) = self.state {
            return Err(RunError::Halted { reason });
        }
        self.state = SchedulerState::Running;
        self.progress.reset(stop_tick);

        let verbosity = self.config.verbosity;
        let tick_period = self.config.tick_period();
        let budget = self.config.realtime.then(|| self.config.tick_budget());
        let mut metrics = RunMetrics::for_tasks(self.tasks.iter().map(|t| t.name()));
        let run_start = Instant::now();

        info!(
            start = %self.tick,
            stop = stop_tick,
            tasks = self.tasks.len(),
            realtime = budget.is_some(),
            "run started"
        );

        let mut pending = self.tick.0 <= stop_tick;
        while pending {
            let tick = self.tick;
            let tick_start = Instant::now();

            if verbosity >= Verbosity::Terse {
                if let Some(percent) = self.progress.update(tick.0) {
                    info!(percent, tick = %tick, "running");
                }
            }
            if verbosity >= Verbosity::Debug {
                trace!(tick = %tick, "tick");
            }

            let mut failure = None;
            for (index, task) in self.tasks.iter_mut().enumerate() {
                let dispatch_start = Instant::now();
                let mut ctx = TaskContext::new(store, tick, tick_period);
                let result = task.dispatch(&mut ctx);
                metrics.task_us[index].1 += dispatch_start.elapsed().as_micros() as u64;

                if let Err(source) = result {
                    failure = Some((task.name().to_string(), source));
                    break;
                }
                metrics.dispatches += 1;
            }

            if let Some((task, source)) = failure {
                self.state = SchedulerState::Halted(HaltReason::TaskFailed);
                metrics.total_us = run_start.elapsed().as_micros() as u64;
                error!(
                    task = %task,
                    tick = %tick,
                    error = %source,
                    ticks_completed = metrics.ticks_completed,
                    "task failed, halting"
                );
                if let Err(e) = self.finish_all(store) {
                    warn!(error = %e, "finish after failure also failed");
                }
                return Err(RunError::TaskFailed { task, tick, source });
            }

            metrics.ticks_completed += 1;
            pending = tick.0 < stop_tick;
            if let Some(next) = tick.next() {
                self.tick = next;
            }

            if let Some(budget) = budget {
                if let Some(remaining) = budget.checked_sub(tick_start.elapsed()) {
                    std::thread::sleep(remaining);
                    metrics.pacing_sleep_us += remaining.as_micros() as u64;
                }
            }
        }

        let finished = self.finish_all(store);
        metrics.total_us = run_start.elapsed().as_micros() as u64;
        if let Err(e) = finished {
            self.state = SchedulerState::Halted(HaltReason::TaskFailed);
            error!(error = %e, ticks_completed = metrics.ticks_completed, "finish failed");
            return Err(e);
        }
        self.state = SchedulerState::Halted(HaltReason::Completed);

        if verbosity >= Verbosity::Verbose {
            info!(
                ticks = metrics.ticks_completed,
                dispatches = metrics.dispatches,
                total_us = metrics.total_us,
                "run completed"
            );
        } else {
            debug!(ticks = metrics.ticks_completed, "run completed");
        }
        Ok(metrics)
    }

    /// Finish every task, even after one fails; returns the first error.
    fn finish_all(&mut self, store: &mut Store) -> Result<(), RunError> {
        let tick_period = self.config.tick_period();
        let mut first = None;
        for task in &mut self.tasks {
            let mut ctx = TaskContext::new(store, self.tick, tick_period);
            if let Err(source) = task.finish(&mut ctx) {
                let err = RunError::FinishFailed {
                    task: task.name().to_string(),
                    source,
                };
                match first {
                    None => first = Some(err),
                    Some(_) => warn!(error = %err, "finish failed"),
                }
            }
        }
        first.map_or(Ok(()), Err)
    }
}
