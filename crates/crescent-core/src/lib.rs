//! Core types for the Crescent simulation substrate.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the store, the scheduler and every task:
//! identifiers, the closed set of primitive type tags, the [`Value`]
//! enum, path normalization and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod id;
pub mod path;
pub mod tag;
pub mod value;

pub use config::config_lines;
pub use error::{AccessError, ParseValueError, StoreError};
pub use id::{DirId, ElementId, TickId};
pub use path::{join, normalize, segments, split_leaf, ROOT};
pub use tag::TypeTag;
pub use value::{Primitive, Value};
