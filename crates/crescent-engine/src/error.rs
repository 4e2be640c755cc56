//! Errors returned by [`Scheduler::run`](crate::Scheduler::run).

use std::error::Error;
use std::fmt;

use crescent_core::TickId;
use crescent_task::TaskError;

use crate::scheduler::HaltReason;

/// Why a run ended without completing.
#[derive(Debug)]
pub enum RunError {
    /// A task returned an error. The scheduler is now halted.
    TaskFailed {
        /// Name of the failing task.
        task: String,
        /// Tick at which it failed.
        tick: TickId,
        /// The task's error.
        source: TaskError,
    },
    /// A task's end-of-run [`finish`](crescent_task::Task::finish)
    /// failed after every tick was dispatched. The scheduler is halted.
    FinishFailed {
        /// Name of the failing task.
        task: String,
        /// The task's error.
        source: TaskError,
    },
    /// The scheduler was already halted; nothing ran.
    Halted {
        /// How the earlier run ended.
        reason: HaltReason,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TaskFailed { task, tick, source } => {
                write!(f, "task '{task}' failed at tick {tick}: {source}")
            }
            Self::FinishFailed { task, source } => {
                write!(f, "task '{task}' failed to finish: {source}")
            }
            Self::Halted { reason } => write!(f, "scheduler is halted ({reason})"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TaskFailed { source, .. } | Self::FinishFailed { source, .. } => Some(source),
            Self::Halted { .. } => None,
        }
    }
}
