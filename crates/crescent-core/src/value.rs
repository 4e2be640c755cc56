//! Typed element values and the [`Primitive`] trait.
//!
//! A [`Value`] holds exactly one value of one of the twelve kinds named
//! by [`TypeTag`]. Typed access goes through [`Primitive`], which maps
//! each supported Rust type to its variant. Projection is checked: asking
//! for the wrong kind yields `None`, never a reinterpretation.

use std::fmt;
use std::io;

use crate::error::ParseValueError;
use crate::tag::TypeTag;

/// A value of one primitive kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// `bool`.
    Bool(bool),
    /// Signed 8-bit character.
    Char(i8),
    /// `i16`.
    Int16(i16),
    /// `i32`.
    Int32(i32),
    /// `i64`.
    Int64(i64),
    /// Unsigned 8-bit character.
    UChar(u8),
    /// `u16`.
    UInt16(u16),
    /// `u32`.
    UInt32(u32),
    /// `u64`.
    UInt64(u64),
    /// `f32`.
    Float(f32),
    /// `f64`.
    Double(f64),
    /// Owned text.
    String(String),
}

impl Value {
    /// The zero value of the given kind.
    pub fn default_for(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Bool => Self::Bool(false),
            TypeTag::Char => Self::Char(0),
            TypeTag::Int16 => Self::Int16(0),
            TypeTag::Int32 => Self::Int32(0),
            TypeTag::Int64 => Self::Int64(0),
            TypeTag::UChar => Self::UChar(0),
            TypeTag::UInt16 => Self::UInt16(0),
            TypeTag::UInt32 => Self::UInt32(0),
            TypeTag::UInt64 => Self::UInt64(0),
            TypeTag::Float => Self::Float(0.0),
            TypeTag::Double => Self::Double(0.0),
            TypeTag::String => Self::String(String::new()),
        }
    }

    /// The kind of this value.
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Bool(_) => TypeTag::Bool,
            Self::Char(_) => TypeTag::Char,
            Self::Int16(_) => TypeTag::Int16,
            Self::Int32(_) => TypeTag::Int32,
            Self::Int64(_) => TypeTag::Int64,
            Self::UChar(_) => TypeTag::UChar,
            Self::UInt16(_) => TypeTag::UInt16,
            Self::UInt32(_) => TypeTag::UInt32,
            Self::UInt64(_) => TypeTag::UInt64,
            Self::Float(_) => TypeTag::Float,
            Self::Double(_) => TypeTag::Double,
            Self::String(_) => TypeTag::String,
        }
    }

    /// Borrow the value as `T`, or `None` if it holds another kind.
    pub fn try_as<T: Primitive>(&self) -> Option<&T> {
        T::project(self)
    }

    /// Mutably borrow the value as `T`, or `None` if it holds another kind.
    pub fn try_as_mut<T: Primitive>(&mut self) -> Option<&mut T> {
        T::project_mut(self)
    }

    /// Parse `text` as a value of kind `tag`.
    ///
    /// Surrounding whitespace is ignored for every kind except
    /// `string`, which is taken verbatim. Booleans accept
    /// `true`/`false`/`1`/`0`; the character kinds parse as integers.
    pub fn parse(tag: TypeTag, text: &str) -> Result<Self, ParseValueError> {
        let invalid = || ParseValueError::Invalid {
            tag,
            text: text.to_string(),
        };
        let t = text.trim();
        let value = match tag {
            TypeTag::Bool => match t {
                "true" | "1" => Self::Bool(true),
                "false" | "0" => Self::Bool(false),
                _ => return Err(invalid()),
            },
            TypeTag::Char => Self::Char(t.parse().map_err(|_| invalid())?),
            TypeTag::Int16 => Self::Int16(t.parse().map_err(|_| invalid())?),
            TypeTag::Int32 => Self::Int32(t.parse().map_err(|_| invalid())?),
            TypeTag::Int64 => Self::Int64(t.parse().map_err(|_| invalid())?),
            TypeTag::UChar => Self::UChar(t.parse().map_err(|_| invalid())?),
            TypeTag::UInt16 => Self::UInt16(t.parse().map_err(|_| invalid())?),
            TypeTag::UInt32 => Self::UInt32(t.parse().map_err(|_| invalid())?),
            TypeTag::UInt64 => Self::UInt64(t.parse().map_err(|_| invalid())?),
            TypeTag::Float => Self::Float(t.parse().map_err(|_| invalid())?),
            TypeTag::Double => Self::Double(t.parse().map_err(|_| invalid())?),
            TypeTag::String => Self::String(text.to_string()),
        };
        Ok(value)
    }

    /// Write the little-endian binary form of this value.
    ///
    /// Fixed-width kinds write exactly [`TypeTag::fixed_width`] bytes
    /// (`bool` as a single `0`/`1` byte). Text is written as a `u32`
    /// byte length followed by its UTF-8 bytes.
    pub fn write_le<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Self::Bool(v) => out.write_all(&[u8::from(*v)]),
            Self::Char(v) => out.write_all(&v.to_le_bytes()),
            Self::Int16(v) => out.write_all(&v.to_le_bytes()),
            Self::Int32(v) => out.write_all(&v.to_le_bytes()),
            Self::Int64(v) => out.write_all(&v.to_le_bytes()),
            Self::UChar(v) => out.write_all(&v.to_le_bytes()),
            Self::UInt16(v) => out.write_all(&v.to_le_bytes()),
            Self::UInt32(v) => out.write_all(&v.to_le_bytes()),
            Self::UInt64(v) => out.write_all(&v.to_le_bytes()),
            Self::Float(v) => out.write_all(&v.to_le_bytes()),
            Self::Double(v) => out.write_all(&v.to_le_bytes()),
            Self::String(s) => {
                let len = u32::try_from(s.len()).map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, "string longer than u32::MAX")
                })?;
                out.write_all(&len.to_le_bytes())?;
                out.write_all(s.as_bytes())
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::UChar(v) => write!(f, "{v}"),
            Self::UInt16(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::UInt64(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A Rust type that can be stored in an element.
///
/// Sealed: implemented for exactly the twelve types listed in
/// [`TypeTag`]'s documentation, so `T::TAG` is always truthful.
pub trait Primitive: sealed::Sealed + Default + Clone + 'static {
    /// The kind tag for this type.
    const TAG: TypeTag;

    /// Wrap a value of this type.
    fn into_value(self) -> Value;

    /// Borrow the payload if `value` holds this kind.
    fn project(value: &Value) -> Option<&Self>;

    /// Mutably borrow the payload if `value` holds this kind.
    fn project_mut(value: &mut Value) -> Option<&mut Self>;
}

macro_rules! impl_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                const TAG: TypeTag = TypeTag::$variant;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn project(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn project_mut(value: &mut Value) -> Option<&mut Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool,
    i8 => Char,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UChar,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    String => String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_tag() {
        for tag in TypeTag::ALL {
            assert_eq!(Value::default_for(tag).tag(), tag);
        }
    }

    #[test]
    fn primitive_tags_match_wrapped_variant() {
        assert_eq!(true.into_value().tag(), bool::TAG);
        assert_eq!(1i8.into_value().tag(), TypeTag::Char);
        assert_eq!(1u8.into_value().tag(), TypeTag::UChar);
        assert_eq!(1i16.into_value().tag(), TypeTag::Int16);
        assert_eq!(1u64.into_value().tag(), TypeTag::UInt64);
        assert_eq!(1.0f32.into_value().tag(), TypeTag::Float);
        assert_eq!(1.0f64.into_value().tag(), TypeTag::Double);
        assert_eq!(String::from("x").into_value().tag(), TypeTag::String);
    }

    #[test]
    fn projection_rejects_other_kinds() {
        let mut v = Value::Double(5.972e24);
        assert_eq!(v.try_as::<f64>(), Some(&5.972e24));
        assert_eq!(v.try_as::<f32>(), None);
        assert_eq!(v.try_as::<u64>(), None);
        assert!(v.try_as_mut::<i64>().is_none());

        *v.try_as_mut::<f64>().unwrap() = 1.0;
        assert_eq!(v, Value::Double(1.0));
    }

    #[test]
    fn parse_numeric_kinds() {
        assert_eq!(Value::parse(TypeTag::Int16, " -12 ").unwrap(), Value::Int16(-12));
        assert_eq!(Value::parse(TypeTag::UChar, "255").unwrap(), Value::UChar(255));
        assert_eq!(Value::parse(TypeTag::Char, "-128").unwrap(), Value::Char(-128));
        assert_eq!(
            Value::parse(TypeTag::Double, "1.989e30").unwrap(),
            Value::Double(1.989e30)
        );
    }

    #[test]
    fn parse_bool_forms() {
        assert_eq!(Value::parse(TypeTag::Bool, "true").unwrap(), Value::Bool(true));
        assert_eq!(Value::parse(TypeTag::Bool, "0").unwrap(), Value::Bool(false));
        assert!(Value::parse(TypeTag::Bool, "yes").is_err());
    }

    #[test]
    fn parse_string_is_verbatim() {
        assert_eq!(
            Value::parse(TypeTag::String, "  padded ").unwrap(),
            Value::String("  padded ".into())
        );
    }

    #[test]
    fn parse_out_of_range_is_error() {
        let err = Value::parse(TypeTag::UChar, "256").unwrap_err();
        assert_eq!(
            err,
            ParseValueError::Invalid {
                tag: TypeTag::UChar,
                text: "256".into()
            }
        );
    }

    #[test]
    fn fixed_width_encoding_matches_tag_width() {
        let samples = [
            Value::Bool(true),
            Value::Char(-1),
            Value::Int16(-2),
            Value::Int32(-3),
            Value::Int64(-4),
            Value::UChar(1),
            Value::UInt16(2),
            Value::UInt32(3),
            Value::UInt64(4),
            Value::Float(0.5),
            Value::Double(0.25),
        ];
        for v in samples {
            let mut buf = Vec::new();
            v.write_le(&mut buf).unwrap();
            assert_eq!(Some(buf.len()), v.tag().fixed_width(), "{v:?}");
        }
    }

    #[test]
    fn encoding_is_little_endian() {
        let mut buf = Vec::new();
        Value::UInt32(0x0102_0304).write_le(&mut buf).unwrap();
        assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);

        buf.clear();
        Value::String("ab".into()).write_le(&mut buf).unwrap();
        assert_eq!(buf, [2, 0, 0, 0, b'a', b'b']);
    }
}
