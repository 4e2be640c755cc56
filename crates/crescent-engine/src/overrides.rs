//! `path=value` assignments from option tables and config files.

use std::fmt;
use std::str::FromStr;

use crescent_core::{config_lines, StoreError};
use crescent_store::Store;

use crate::config::ConfigError;

/// One `path=value` assignment to an existing element.
///
/// The value stays text until it is applied; it is then parsed as the
/// kind of the element the path names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Override {
    /// Full path of the target element.
    pub path: String,
    /// Unparsed value.
    pub value: String,
}

impl Override {
    /// Build an override from its parts.
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Parse one override per line of `text`.
    ///
    /// `#` starts a comment and blank lines are skipped.
    pub fn parse_lines(text: &str) -> Result<Vec<Self>, ConfigError> {
        config_lines(text).map(str::parse::<Self>).collect()
    }

    /// Resolve the path and assign the parsed value.
    pub fn apply(&self, store: &mut Store) -> Result<(), ConfigError> {
        let fail = |source: StoreError| ConfigError::Override {
            path: self.path.clone(),
            source,
        };
        let id = store.lookup(&self.path).map_err(fail)?;
        store.set_from_str(id, &self.value).map_err(fail)
    }
}

impl FromStr for Override {
    type Err = ConfigError;

    /// Split on the first `=`. The path is trimmed; the value is
    /// trimmed too, so string values cannot carry edge whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedOverride {
            text: s.to_string(),
        };
        let (path, value) = s.split_once('=').ok_or_else(malformed)?;
        let path = path.trim();
        if path.is_empty() {
            return Err(malformed());
        }
        Ok(Self::new(path, value.trim()))
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.path, self.value)
    }
}
