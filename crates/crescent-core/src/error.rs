//! Error types for recoverable store failures.
//!
//! Invariant violations (empty names, typed loads of the wrong kind
//! through the infallible accessors, out-of-range IDs) panic at the
//! call site. Everything here is an expected outcome the caller must
//! check and propagate.

use std::error::Error;
use std::fmt;

use crate::id::ElementId;
use crate::tag::TypeTag;

/// Errors from checked typed access to an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// No element has this ID.
    UnknownElement {
        /// The ID that was requested.
        id: ElementId,
    },
    /// The element holds a different kind than the one requested.
    TypeMismatch {
        /// The element that was accessed.
        id: ElementId,
        /// The kind the caller asked for.
        expected: TypeTag,
        /// The kind the element actually holds.
        actual: TypeTag,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement { id } => write!(f, "no element with id {id}"),
            Self::TypeMismatch {
                id,
                expected,
                actual,
            } => write!(
                f,
                "element {id} holds {actual}, requested as {expected}"
            ),
        }
    }
}

impl Error for AccessError {}

/// Errors from parsing text into a [`TypeTag`] or a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseValueError {
    /// The text does not name a type tag.
    UnknownTag {
        /// The unrecognised name.
        name: String,
    },
    /// The text is not a valid value of the requested kind.
    Invalid {
        /// The kind being parsed.
        tag: TypeTag,
        /// The rejected text.
        text: String,
    },
}

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTag { name } => write!(f, "unknown type tag '{name}'"),
            Self::Invalid { tag, text } => write!(f, "'{text}' is not a valid {tag}"),
        }
    }
}

impl Error for ParseValueError {}

/// Errors from path-based operations on the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// A directory segment or the leaf element of the path does not exist.
    NotFound {
        /// The normalized path that failed to resolve.
        path: String,
    },
    /// The element exists but typed access failed.
    Access(AccessError),
    /// Text could not be parsed as the element's kind.
    Parse {
        /// The element being assigned.
        id: ElementId,
        /// The underlying parse failure.
        source: ParseValueError,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "'{path}' not found"),
            Self::Access(e) => write!(f, "access: {e}"),
            Self::Parse { id, source } => write!(f, "element {id}: {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(e) => Some(e),
            Self::Parse { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<AccessError> for StoreError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_both_kinds() {
        let e = AccessError::TypeMismatch {
            id: ElementId(3),
            expected: TypeTag::Float,
            actual: TypeTag::Double,
        };
        assert_eq!(e.to_string(), "element 3 holds double, requested as float");
    }

    #[test]
    fn store_error_chains_source() {
        let e = StoreError::from(AccessError::UnknownElement { id: ElementId(9) });
        assert!(e.source().is_some());
        let e = StoreError::NotFound {
            path: "root/missing".into(),
        };
        assert!(e.source().is_none());
        assert_eq!(e.to_string(), "'root/missing' not found");
    }
}
