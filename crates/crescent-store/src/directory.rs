//! Directory nodes and the read/write views over them.
//!
//! Nodes live in the store's directory arena and are addressed by
//! [`DirId`]. Callers never hold a node directly; they borrow a
//! [`Directory`] (read-only) or [`DirectoryMut`] (may extend the tree)
//! view from the [`Store`].
//!
//! Names passed to [`DirectoryMut::subdir`] and
//! [`DirectoryMut::create_element`] are normalized like paths. A name
//! with several segments (`"earth/telemetry"`) walks, and if needed
//! creates, one directory per segment.

use indexmap::IndexMap;

use crescent_core::{path, DirId, ElementId, Primitive};

use crate::store::Store;

/// A node of the directory tree.
#[derive(Debug)]
pub(crate) struct DirNode {
    /// Canonical full path (`root`, `root/orbital`, ...).
    pub(crate) path: String,
    pub(crate) parent: Option<DirId>,
    /// Child directories by name, in creation order.
    pub(crate) children: IndexMap<String, DirId>,
    /// Elements created directly in this node, in creation order.
    pub(crate) elements: IndexMap<String, ElementId>,
}

impl DirNode {
    pub(crate) fn new(path: String, parent: Option<DirId>) -> Self {
        Self {
            path,
            parent,
            children: IndexMap::new(),
            elements: IndexMap::new(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

// ── Directory ──────────────────────────────────────────────────────

/// Read-only view of a directory node.
///
/// Lookups through this view never create anything.
#[derive(Clone, Copy, Debug)]
pub struct Directory<'s> {
    store: &'s Store,
    id: DirId,
}

impl<'s> Directory<'s> {
    pub(crate) fn new(store: &'s Store, id: DirId) -> Self {
        Self { store, id }
    }

    fn node(&self) -> &'s DirNode {
        self.store.node(self.id)
    }

    /// This node's arena ID.
    pub fn id(&self) -> DirId {
        self.id
    }

    /// Canonical full path, e.g. `root/orbital/earth`.
    pub fn path(&self) -> &'s str {
        &self.node().path
    }

    /// Last segment of the path.
    pub fn name(&self) -> &'s str {
        self.node().name()
    }

    /// The parent directory, or `None` for the root.
    pub fn parent(&self) -> Option<Directory<'s>> {
        self.node().parent.map(|p| Directory::new(self.store, p))
    }

    /// Resolve `path` relative to this directory.
    ///
    /// Descends one segment at a time through existing children only.
    /// Returns `None` as soon as a segment is missing. An empty path
    /// resolves to this directory.
    pub fn lookup(&self, path: &str) -> Option<Directory<'s>> {
        let mut id = self.id;
        for seg in path::segments(path) {
            id = *self.store.node(id).children.get(seg)?;
        }
        Some(Directory::new(self.store, id))
    }

    /// ID of the element `name` in this directory, via the registry.
    pub fn get_element_id(&self, name: &str) -> Option<ElementId> {
        self.store
            .registry()
            .lookup(&path::join(&self.node().path, name))
    }

    /// Names of the elements created directly here, in creation order.
    pub fn list_elements(&self) -> Vec<&'s str> {
        self.node().elements.keys().map(String::as_str).collect()
    }

    /// Names of the child directories, in creation order.
    pub fn list_subdirs(&self) -> Vec<&'s str> {
        self.node().children.keys().map(String::as_str).collect()
    }

    /// `(name, id)` of every element created here, in creation order.
    pub fn elements(&self) -> impl Iterator<Item = (&'s str, ElementId)> + 's {
        self.node().elements.iter().map(|(n, &id)| (n.as_str(), id))
    }

    /// Child directory views, in creation order.
    pub fn subdirs(&self) -> impl Iterator<Item = Directory<'s>> + 's {
        let store = self.store;
        self.node()
            .children
            .values()
            .map(move |&id| Directory::new(store, id))
    }
}

// ── DirectoryMut ───────────────────────────────────────────────────

/// View of a directory node that may extend the tree.
#[derive(Debug)]
pub struct DirectoryMut<'s> {
    store: &'s mut Store,
    id: DirId,
}

impl<'s> DirectoryMut<'s> {
    pub(crate) fn new(store: &'s mut Store, id: DirId) -> Self {
        Self { store, id }
    }

    /// This node's arena ID.
    pub fn id(&self) -> DirId {
        self.id
    }

    /// Borrow a read-only view of this node.
    pub fn as_dir(&self) -> Directory<'_> {
        Directory::new(&*self.store, self.id)
    }

    /// Canonical full path.
    pub fn path(&self) -> &str {
        &self.store.node(self.id).path
    }

    /// Get or create the child directory `name`, consuming this view.
    ///
    /// # Panics
    ///
    /// If `name` is empty after normalization.
    pub fn subdir(self, name: &str) -> DirectoryMut<'s> {
        let id = self.store.make_subdir(self.id, name);
        DirectoryMut::new(self.store, id)
    }

    /// Get or create the child directory `name` and return its ID.
    ///
    /// # Panics
    ///
    /// If `name` is empty after normalization.
    pub fn subdir_id(&mut self, name: &str) -> DirId {
        self.store.make_subdir(self.id, name)
    }

    /// Get or create an element of kind `T` named `name`.
    ///
    /// If the element already exists its ID is returned unchanged,
    /// whatever its kind.
    ///
    /// # Panics
    ///
    /// If `name` is empty after normalization.
    pub fn create_element<T: Primitive>(&mut self, name: &str) -> ElementId {
        self.store.make_element::<T>(self.id, name)
    }

    /// See [`Directory::lookup`].
    pub fn lookup(&self, path: &str) -> Option<Directory<'_>> {
        self.as_dir().lookup(path)
    }

    /// See [`Directory::get_element_id`].
    pub fn get_element_id(&self, name: &str) -> Option<ElementId> {
        self.as_dir().get_element_id(name)
    }

    /// See [`Directory::list_elements`].
    pub fn list_elements(&self) -> Vec<&str> {
        self.as_dir().list_elements()
    }

    /// See [`Directory::list_subdirs`].
    pub fn list_subdirs(&self) -> Vec<&str> {
        self.as_dir().list_subdirs()
    }
}
