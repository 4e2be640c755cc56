//! The flat, append-only element ledger.
//!
//! The registry maps each full path to a stable [`ElementId`] and owns
//! the [`Element`] stored there. The insertion index of a path *is* its
//! ID, so IDs start at 0, follow first-registration order and are never
//! reused. An ordered hash map gives O(1) lookup in both directions
//! while preserving that order.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crescent_core::{path, AccessError, ElementId, Primitive};

use crate::element::Element;

/// Ordered ledger of `(full path, Element)` pairs.
#[derive(Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, Element>,
}

fn id_at(index: usize) -> ElementId {
    match u32::try_from(index) {
        Ok(i) => ElementId(i),
        Err(_) => panic!("registry index {index} exceeds u32::MAX"),
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element` under `full_path`.
    ///
    /// If the normalized path is already registered the existing ID is
    /// returned and `element` is discarded; the stored element is not
    /// touched. Otherwise the pair is appended and receives the next ID.
    pub fn register(&mut self, full_path: &str, element: Element) -> ElementId {
        match self.entries.entry(path::normalize(full_path)) {
            Entry::Occupied(slot) => id_at(slot.index()),
            Entry::Vacant(slot) => {
                let id = id_at(slot.index());
                slot.insert(element);
                id
            }
        }
    }

    /// Find the ID registered for `full_path`, if any.
    pub fn lookup(&self, full_path: &str) -> Option<ElementId> {
        self.entries
            .get_index_of(path::normalize(full_path).as_str())
            .map(id_at)
    }

    /// Bounds-checked access by ID.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.entries.get_index(id.index()).map(|(_, e)| e)
    }

    /// Bounds-checked mutable access by ID.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.entries.get_index_mut(id.index()).map(|(_, e)| e)
    }

    /// Access by ID.
    ///
    /// # Panics
    ///
    /// If no element has this ID. IDs only come from this registry, so
    /// an unknown ID is a programming error in the caller.
    pub fn fetch(&self, id: ElementId) -> &Element {
        match self.get(id) {
            Some(e) => e,
            None => panic!("{}", AccessError::UnknownElement { id }),
        }
    }

    /// Typed access by ID.
    pub fn fetch_typed<T: Primitive>(&self, id: ElementId) -> Result<&T, AccessError> {
        let element = self.get(id).ok_or(AccessError::UnknownElement { id })?;
        let actual = element.tag();
        element.try_as::<T>().ok_or(AccessError::TypeMismatch {
            id,
            expected: T::TAG,
            actual,
        })
    }

    /// Mutable typed access by ID.
    pub fn fetch_typed_mut<T: Primitive>(&mut self, id: ElementId) -> Result<&mut T, AccessError> {
        let element = self
            .get_mut(id)
            .ok_or(AccessError::UnknownElement { id })?;
        let actual = element.tag();
        element.try_as_mut::<T>().ok_or(AccessError::TypeMismatch {
            id,
            expected: T::TAG,
            actual,
        })
    }

    /// The full path registered for `id`.
    pub fn path(&self, id: ElementId) -> Option<&str> {
        self.entries.get_index(id.index()).map(|(p, _)| p.as_str())
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &str, &Element)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (p, e))| (id_at(i), p.as_str(), e))
    }
}
