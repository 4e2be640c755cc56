//! Errors raised while constructing a reference task.

use std::error::Error;
use std::fmt;
use std::io;

use crescent_core::{AccessError, StoreError, TypeTag};

/// A task could not be set up from its configuration.
#[derive(Debug)]
pub enum SetupError {
    /// A config line is missing a required field.
    MissingField {
        /// The offending line.
        line: String,
        /// The field that is missing.
        field: &'static str,
    },
    /// A numeric field did not parse.
    InvalidNumber {
        /// The offending line.
        line: String,
        /// The text that failed to parse.
        text: String,
    },
    /// The same body appears twice in a masses config.
    DuplicateBody {
        /// The repeated body name.
        name: String,
    },
    /// A telemetry rate is zero or above the base rate.
    RateOutOfRange {
        /// The configured rate.
        rate: u32,
        /// The largest allowed rate.
        max: u32,
    },
    /// A telemetry path does not name an element.
    Lookup(StoreError),
    /// A telemetry element has a kind that cannot be streamed.
    UnsupportedKind {
        /// Path of the element.
        path: String,
        /// Its kind.
        tag: TypeTag,
    },
    /// A path the task needs already holds an element of another kind.
    Access(AccessError),
    /// An output stream could not be opened.
    Io(io::Error),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { line, field } => write!(f, "'{line}': missing {field}"),
            Self::InvalidNumber { line, text } => {
                write!(f, "'{line}': '{text}' is not a valid number")
            }
            Self::DuplicateBody { name } => write!(f, "body '{name}' listed twice"),
            Self::RateOutOfRange { rate, max } => {
                write!(f, "rate {rate} Hz outside 1..={max}")
            }
            Self::Lookup(e) => write!(f, "lookup: {e}"),
            Self::UnsupportedKind { path, tag } => {
                write!(f, "'{path}' holds {tag}, which cannot be streamed")
            }
            Self::Access(e) => write!(f, "access: {e}"),
            Self::Io(e) => write!(f, "i/o: {e}"),
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lookup(e) => Some(e),
            Self::Access(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for SetupError {
    fn from(e: StoreError) -> Self {
        Self::Lookup(e)
    }
}

impl From<AccessError> for SetupError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

impl From<io::Error> for SetupError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
