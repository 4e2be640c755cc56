//! Errors a task may return from dispatch.

use std::error::Error;
use std::fmt;
use std::io;

use crescent_core::{AccessError, StoreError};

/// A fatal task failure.
///
/// Returning any variant from [`Task::dispatch`](crate::Task::dispatch)
/// halts the scheduler; there is no retry.
#[derive(Debug)]
pub enum TaskError {
    /// The task's own logic failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A path-based store operation failed.
    Store(StoreError),
    /// Checked typed access to an element failed.
    Access(AccessError),
    /// Writing task output failed.
    Io(io::Error),
}

impl TaskError {
    /// Shorthand for [`TaskError::ExecutionFailed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Access(e) => write!(f, "access: {e}"),
            Self::Io(e) => write!(f, "i/o: {e}"),
        }
    }
}

impl Error for TaskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ExecutionFailed { .. } => None,
            Self::Store(e) => Some(e),
            Self::Access(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<StoreError> for TaskError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<AccessError> for TaskError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

impl From<io::Error> for TaskError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crescent_core::ElementId;

    #[test]
    fn display_includes_cause() {
        let err = TaskError::from(AccessError::UnknownElement { id: ElementId(2) });
        assert_eq!(err.to_string(), "access: no element with id 2");
        assert!(err.source().is_some());
    }

    #[test]
    fn failed_has_no_source() {
        let err = TaskError::failed("docking latch jammed");
        assert_eq!(err.to_string(), "execution failed: docking latch jammed");
        assert!(err.source().is_none());
    }
}
