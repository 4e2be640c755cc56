//! The [`Store`] facade.

use std::io;

use crescent_core::{
    path, AccessError, DirId, ElementId, Primitive, StoreError, TypeTag, Value,
};
use tracing::{trace, warn};

use crate::directory::{DirNode, Directory, DirectoryMut};
use crate::dump::TreeDump;
use crate::element::Element;
use crate::registry::Registry;

/// Shared typed state for one simulation.
///
/// Owns the element [`Registry`] and the directory arena. Components
/// obtain stable [`ElementId`]s during setup through the creating
/// operations ([`create`](Store::create), [`DirectoryMut::subdir`],
/// [`DirectoryMut::create_element`]) and then read and write values by
/// ID on every tick with [`load`](Store::load) / [`read`](Store::read).
///
/// Full paths given to the store resolve from the root. The leading
/// `root` segment is optional: `root/orbital/sun/mass` and
/// `orbital/sun/mass` name the same element.
///
/// # Examples
///
/// ```
/// use crescent_store::Store;
///
/// let mut store = Store::new();
/// let sun = store.create::<f64>("root/orbital/sun/mass");
/// *store.load::<f64>(sun) = 1.989e30;
///
/// assert_eq!(store.lookup("orbital/sun/mass"), Ok(sun));
/// assert_eq!(*store.read::<f64>(sun), 1.989e30);
/// ```
#[derive(Debug)]
pub struct Store {
    registry: Registry,
    dirs: Vec<DirNode>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

fn dir_at(index: usize) -> DirId {
    match u32::try_from(index) {
        Ok(i) => DirId(i),
        Err(_) => panic!("directory index {index} exceeds u32::MAX"),
    }
}

impl Store {
    /// Create a store holding only the empty root directory.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            dirs: vec![DirNode::new(path::ROOT.to_string(), None)],
        }
    }

    // ── Tree access ────────────────────────────────────────────────

    /// Read-only view of the root directory.
    pub fn root(&self) -> Directory<'_> {
        Directory::new(self, DirId::ROOT)
    }

    /// Tree-extending view of the root directory.
    pub fn root_mut(&mut self) -> DirectoryMut<'_> {
        DirectoryMut::new(self, DirId::ROOT)
    }

    /// Read-only view of directory `id`, if it exists.
    pub fn dir(&self, id: DirId) -> Option<Directory<'_>> {
        (id.index() < self.dirs.len()).then(|| Directory::new(self, id))
    }

    /// Tree-extending view of directory `id`, if it exists.
    pub fn dir_mut(&mut self, id: DirId) -> Option<DirectoryMut<'_>> {
        if id.index() < self.dirs.len() {
            Some(DirectoryMut::new(self, id))
        } else {
            None
        }
    }

    /// Resolve a directory path from the root without creating anything.
    pub fn get_dir(&self, dir_path: &str) -> Option<Directory<'_>> {
        let segs = path::segments(dir_path);
        let mut id = DirId::ROOT;
        for seg in path::strip_root(&segs) {
            id = *self.node(id).children.get(*seg)?;
        }
        Some(Directory::new(self, id))
    }

    /// The element registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of directories, including the root.
    pub fn dir_count(&self) -> usize {
        self.dirs.len()
    }

    // ── Creation ───────────────────────────────────────────────────

    /// Get or create the element at `full_path` with kind `T`.
    ///
    /// Missing directories along the path are created. If the element
    /// already exists its ID is returned unchanged.
    ///
    /// # Panics
    ///
    /// If the path has no leaf segment.
    pub fn create<T: Primitive>(&mut self, full_path: &str) -> ElementId {
        let Some((dirs, leaf)) = path::split_leaf(full_path) else {
            panic!("empty element name in path '{full_path}'");
        };
        let mut dir = DirId::ROOT;
        for seg in path::strip_root(&dirs) {
            dir = self.child_or_insert(dir, seg);
        }
        self.insert_element::<T>(dir, leaf)
    }

    pub(crate) fn make_subdir(&mut self, parent: DirId, name: &str) -> DirId {
        let segs = path::segments(name);
        if segs.is_empty() {
            panic!("empty directory name under '{}'", self.node(parent).path);
        }
        segs.iter()
            .fold(parent, |dir, seg| self.child_or_insert(dir, seg))
    }

    pub(crate) fn make_element<T: Primitive>(&mut self, dir: DirId, name: &str) -> ElementId {
        let Some((dirs, leaf)) = path::split_leaf(name) else {
            panic!("empty element name under '{}'", self.node(dir).path);
        };
        let dir = dirs
            .iter()
            .fold(dir, |dir, seg| self.child_or_insert(dir, seg));
        self.insert_element::<T>(dir, leaf)
    }

    /// `seg` must already be a trimmed, non-empty segment.
    fn child_or_insert(&mut self, parent: DirId, seg: &str) -> DirId {
        if let Some(&id) = self.node(parent).children.get(seg) {
            return id;
        }
        let id = dir_at(self.dirs.len());
        let full = path::join(&self.node(parent).path, seg);
        trace!(path = %full, dir = %id, "created directory");
        self.dirs.push(DirNode::new(full, Some(parent)));
        self.dirs[parent.index()]
            .children
            .insert(seg.to_string(), id);
        id
    }

    /// `name` must already be a trimmed, non-empty segment.
    fn insert_element<T: Primitive>(&mut self, dir: DirId, name: &str) -> ElementId {
        if let Some(&id) = self.node(dir).elements.get(name) {
            let tag = self.registry.fetch(id).tag();
            if tag != T::TAG {
                warn!(
                    path = %path::join(&self.node(dir).path, name),
                    existing = %tag,
                    requested = %T::TAG,
                    "element already exists with a different kind"
                );
            }
            return id;
        }
        let full = path::join(&self.node(dir).path, name);
        let id = self.registry.register(&full, Element::of::<T>(name));
        trace!(path = %full, id = %id, kind = %T::TAG, "created element");
        self.dirs[dir.index()]
            .elements
            .insert(name.to_string(), id);
        id
    }

    pub(crate) fn node(&self, id: DirId) -> &DirNode {
        match self.dirs.get(id.index()) {
            Some(node) => node,
            None => panic!("no directory with id {id}"),
        }
    }

    // ── Lookup ─────────────────────────────────────────────────────

    /// Resolve `full_path` to an element ID without creating anything.
    ///
    /// Fails with [`StoreError::NotFound`] if any directory along the
    /// path, or the element itself, does not exist.
    pub fn lookup(&self, full_path: &str) -> Result<ElementId, StoreError> {
        let not_found = || StoreError::NotFound {
            path: path::normalize(full_path),
        };
        let (dirs, leaf) = path::split_leaf(full_path).ok_or_else(not_found)?;
        let mut dir = self.root();
        let rel = path::strip_root(&dirs);
        if !rel.is_empty() {
            dir = dir.lookup(&rel.join("/")).ok_or_else(not_found)?;
        }
        dir.get_element_id(leaf).ok_or_else(not_found)
    }

    /// Kind of element `id`, or `None` if no such element exists.
    pub fn get_type(&self, id: ElementId) -> Option<TypeTag> {
        self.registry.get(id).map(Element::tag)
    }

    /// Untyped view of element `id`'s value.
    pub fn value(&self, id: ElementId) -> Option<&Value> {
        self.registry.get(id).map(Element::value)
    }

    // ── Typed access ───────────────────────────────────────────────

    /// Mutable access to element `id` as `T`.
    ///
    /// # Panics
    ///
    /// If `id` is unknown or the element is not of kind `T`. Both are
    /// programming errors: IDs come from this store and kinds are
    /// fixed at creation. Use [`try_load`](Store::try_load) to check.
    pub fn load<T: Primitive>(&mut self, id: ElementId) -> &mut T {
        match self.registry.fetch_typed_mut::<T>(id) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Shared access to element `id` as `T`.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`load`](Store::load).
    pub fn read<T: Primitive>(&self, id: ElementId) -> &T {
        match self.registry.fetch_typed::<T>(id) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Checked mutable access to element `id` as `T`.
    pub fn try_load<T: Primitive>(&mut self, id: ElementId) -> Result<&mut T, AccessError> {
        self.registry.fetch_typed_mut::<T>(id)
    }

    /// Checked shared access to element `id` as `T`.
    pub fn try_read<T: Primitive>(&self, id: ElementId) -> Result<&T, AccessError> {
        self.registry.fetch_typed::<T>(id)
    }

    /// Look up `full_path` and return mutable access to it as `T`.
    pub fn load_path<T: Primitive>(&mut self, full_path: &str) -> Result<&mut T, StoreError> {
        let id = self.lookup(full_path)?;
        Ok(self.registry.fetch_typed_mut::<T>(id)?)
    }

    /// Replace element `id`'s value with `value` of the same kind.
    pub fn set_value(&mut self, id: ElementId, value: Value) -> Result<(), AccessError> {
        let element = self
            .registry
            .get_mut(id)
            .ok_or(AccessError::UnknownElement { id })?;
        let actual = element.tag();
        let expected = value.tag();
        if element.assign(value) {
            Ok(())
        } else {
            Err(AccessError::TypeMismatch {
                id,
                expected,
                actual,
            })
        }
    }

    /// Parse `text` as element `id`'s kind and assign it.
    ///
    /// Used by collaborators holding configuration as strings (option
    /// tables, config files) that do not know the kind statically.
    pub fn set_from_str(&mut self, id: ElementId, text: &str) -> Result<(), StoreError> {
        let tag = self
            .get_type(id)
            .ok_or(AccessError::UnknownElement { id })?;
        let value = Value::parse(tag, text).map_err(|source| StoreError::Parse { id, source })?;
        self.set_value(id, value)?;
        Ok(())
    }

    // ── Introspection ──────────────────────────────────────────────

    /// A displayable dump of the whole tree.
    pub fn tree(&self) -> TreeDump<'_> {
        TreeDump::new(self)
    }

    /// Write the tree dump to `out`.
    pub fn write_tree<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.tree())?;
        out.flush()
    }

    /// Print the tree dump to standard output.
    pub fn print(&self) -> io::Result<()> {
        self.write_tree(&mut io::stdout().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_mut_extends_existing_directory() {
        let mut store = Store::new();
        let earth = store.root_mut().subdir_id("orbital/earth");

        let mass = store
            .dir_mut(earth)
            .unwrap()
            .create_element::<f64>("telemetry/mass");
        assert_eq!(store.lookup("root/orbital/earth/telemetry/mass"), Ok(mass));

        let past_end = DirId(store.dir_count() as u32);
        assert!(store.dir_mut(past_end).is_none());
        assert!(store.dir(past_end).is_none());
    }

    #[test]
    fn orbital_scenario() {
        let mut store = Store::new();
        let sun = store.create::<f64>("root/orbital/sun/mass");
        let earth = store.create::<f64>("root/orbital/earth/mass");
        assert_eq!((sun, earth), (ElementId(0), ElementId(1)));

        *store.load::<f64>(sun) = 1.989e30;
        *store.load::<f64>(earth) = 5.972e24;

        assert_eq!(store.lookup("root/orbital/earth/mass"), Ok(earth));
        assert_eq!(*store.read::<f64>(sun), 1.989e30);
        assert_eq!(
            store.root_mut().subdir("orbital").list_subdirs(),
            ["sun", "earth"]
        );
    }

    #[test]
    fn path_round_trip() {
        let mut store = Store::new();
        let id = store.create::<f64>("root/orbital/earth/mass");
        assert_eq!(store.lookup("root/orbital/earth/mass"), Ok(id));
        let earth = store.root().lookup("orbital/earth").unwrap();
        assert!(earth.list_elements().contains(&"mass"));
        assert_eq!(earth.get_element_id("mass"), Some(id));
    }

    #[test]
    fn root_prefix_is_optional() {
        let mut store = Store::new();
        let a = store.create::<u32>("orbital/count");
        let b = store.create::<u32>("/root/orbital/count/");
        assert_eq!(a, b);
        assert_eq!(store.lookup("orbital/count"), Ok(a));
        assert_eq!(store.get_dir("root/orbital").unwrap().path(), "root/orbital");
        assert_eq!(store.get_dir("root").unwrap().id(), DirId::ROOT);
    }

    #[test]
    fn element_at_root() {
        let mut store = Store::new();
        let id = store.create::<bool>("root/halted");
        assert_eq!(store.root().list_elements(), ["halted"]);
        assert_eq!(store.registry().path(id), Some("root/halted"));
    }

    #[test]
    fn lookup_missing_path_does_not_mutate() {
        let mut store = Store::new();
        store.create::<f64>("root/orbital/sun/mass");
        let dirs_before = store.dir_count();

        assert_eq!(
            store.lookup("root/missing/path"),
            Err(StoreError::NotFound {
                path: "root/missing/path".into()
            })
        );
        assert!(store.lookup("root/orbital/sun/radius").is_err());
        assert!(store.lookup("").is_err());

        assert_eq!(store.dir_count(), dirs_before);
        assert_eq!(store.root().list_subdirs(), ["orbital"]);
    }

    #[test]
    fn get_type_reports_creation_kind() {
        let mut store = Store::new();
        let id = store.create::<i16>("root/cm/attitude_mode");
        assert_eq!(store.get_type(id), Some(TypeTag::Int16));
        assert_eq!(store.get_type(ElementId(42)), None);
    }

    #[test]
    fn try_load_reports_mismatch() {
        let mut store = Store::new();
        let id = store.create::<f64>("root/t");
        assert_eq!(
            store.try_load::<f32>(id).unwrap_err(),
            AccessError::TypeMismatch {
                id,
                expected: TypeTag::Float,
                actual: TypeTag::Double,
            }
        );
        assert!(store.try_read::<f64>(id).is_ok());
    }

    #[test]
    #[should_panic(expected = "requested as int32")]
    fn load_wrong_kind_panics() {
        let mut store = Store::new();
        let id = store.create::<f64>("root/t");
        let _ = store.load::<i32>(id);
    }

    #[test]
    #[should_panic(expected = "no element with id 3")]
    fn load_unknown_id_panics() {
        let mut store = Store::new();
        let _ = store.load::<f64>(ElementId(3));
    }

    #[test]
    #[should_panic(expected = "empty element name")]
    fn create_empty_path_panics() {
        let mut store = Store::new();
        store.create::<f64>(" / ");
    }

    #[test]
    fn load_path_resolves_and_checks() {
        let mut store = Store::new();
        store.create::<u64>("root/cycle/count");
        *store.load_path::<u64>("cycle/count").unwrap() = 9;
        assert_eq!(*store.load_path::<u64>("root/cycle/count").unwrap(), 9);
        assert!(matches!(
            store.load_path::<u64>("root/cycle/missing"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.load_path::<bool>("root/cycle/count"),
            Err(StoreError::Access(AccessError::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn set_from_str_parses_by_kind() {
        let mut store = Store::new();
        let mass = store.create::<f64>("root/orbital/moon/mass");
        let docked = store.create::<bool>("root/lm/docked");
        let name = store.create::<String>("root/lm/callsign");

        store.set_from_str(mass, "7.342e22").unwrap();
        store.set_from_str(docked, "true").unwrap();
        store.set_from_str(name, "Eagle").unwrap();

        assert_eq!(*store.read::<f64>(mass), 7.342e22);
        assert!(*store.read::<bool>(docked));
        assert_eq!(store.read::<String>(name), "Eagle");

        assert!(matches!(
            store.set_from_str(docked, "maybe"),
            Err(StoreError::Parse { .. })
        ));
        assert!(matches!(
            store.set_from_str(ElementId(99), "1"),
            Err(StoreError::Access(AccessError::UnknownElement { .. }))
        ));
    }

    #[test]
    fn set_value_rejects_other_kind() {
        let mut store = Store::new();
        let id = store.create::<u8>("root/stage");
        assert!(store.set_value(id, Value::UChar(2)).is_ok());
        assert_eq!(
            store.set_value(id, Value::UInt16(2)),
            Err(AccessError::TypeMismatch {
                id,
                expected: TypeTag::UInt16,
                actual: TypeTag::UChar,
            })
        );
        assert_eq!(*store.read::<u8>(id), 2);
    }

    #[test]
    fn recreating_with_other_kind_returns_existing_id() {
        let mut store = Store::new();
        let id = store.create::<f64>("root/x");
        assert_eq!(store.create::<f32>("root/x"), id);
        assert_eq!(store.get_type(id), Some(TypeTag::Double));
    }
}
