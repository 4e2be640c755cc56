//! The atomic unit of shared state.

use crescent_core::{Primitive, TypeTag, Value};

/// A named value of one fixed kind.
///
/// The kind is decided when the element is created and never changes:
/// [`assign`](Element::assign) rejects values of any other kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: String,
    value: Value,
}

impl Element {
    /// Create an element holding `value`.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Create an element of kind `T` holding `T::default()`.
    pub fn of<T: Primitive>(name: impl Into<String>) -> Self {
        Self::new(name, T::default().into_value())
    }

    /// The element's name within its directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element's kind.
    pub fn tag(&self) -> TypeTag {
        self.value.tag()
    }

    /// The current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Borrow the value as `T`, or `None` on a kind mismatch.
    pub fn try_as<T: Primitive>(&self) -> Option<&T> {
        self.value.try_as()
    }

    /// Mutably borrow the value as `T`, or `None` on a kind mismatch.
    pub fn try_as_mut<T: Primitive>(&mut self) -> Option<&mut T> {
        self.value.try_as_mut()
    }

    /// Replace the value if `value` has this element's kind.
    ///
    /// Returns `false`, leaving the element untouched, on a mismatch.
    pub fn assign(&mut self, value: Value) -> bool {
        if value.tag() != self.tag() {
            return false;
        }
        self.value = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_creates_default_value() {
        let e = Element::of::<u16>("count");
        assert_eq!(e.name(), "count");
        assert_eq!(e.tag(), TypeTag::UInt16);
        assert_eq!(e.try_as::<u16>(), Some(&0));
    }

    #[test]
    fn assign_keeps_kind_fixed() {
        let mut e = Element::of::<f64>("mass");
        assert!(e.assign(Value::Double(7.0)));
        assert!(!e.assign(Value::Float(1.0)));
        assert_eq!(e.value(), &Value::Double(7.0));
    }

    #[test]
    fn typed_mut_access_writes_through() {
        let mut e = Element::of::<String>("label");
        e.try_as_mut::<String>().unwrap().push_str("CSM");
        assert_eq!(e.try_as::<String>().map(String::as_str), Some("CSM"));
        assert!(e.try_as_mut::<bool>().is_none());
    }
}
