//! Hierarchical typed blackboard for Crescent simulations.
//!
//! Tasks never talk to each other directly; they share state through a
//! [`Store`]. The store owns two arenas:
//!
//! ```text
//! Store
//! ├── Registry  (ElementId → (full path, Element), append-only)
//! └── Vec<DirNode>  (DirId → node; root is DirId::ROOT)
//!     ├── children: name → DirId
//!     └── elements: name → ElementId
//! ```
//!
//! Directory nodes and the registry hold indices, never references, so
//! ownership is single: the store owns every element for its whole
//! lifetime and nothing is ever removed.
//!
//! # Two-tier errors
//!
//! Non-creating lookups report absence through `Option` or
//! [`StoreError`](crescent_core::StoreError). Programming errors
//! (empty names, out-of-range IDs, typed loads of the wrong kind via
//! [`Store::load`]) panic. Use [`Store::try_load`] when the kind is not
//! statically known to match.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod directory;
pub mod dump;
pub mod element;
pub mod registry;
pub mod store;

pub use directory::{Directory, DirectoryMut};
pub use dump::TreeDump;
pub use element::Element;
pub use registry::Registry;
pub use store::Store;
