//! The closed vocabulary of primitive element kinds.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseValueError;

/// Runtime type information for an element.
///
/// Collaborators that must handle values generically (telemetry
/// writers, option tables) use the tag to pick how to read or write
/// a value without binding to its Rust type at compile time. The set
/// is closed and its string forms are stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// `bool`.
    Bool,
    /// Signed 8-bit character (`i8`).
    Char,
    /// `i16`.
    Int16,
    /// `i32`.
    Int32,
    /// `i64`.
    Int64,
    /// Unsigned 8-bit character (`u8`).
    UChar,
    /// `u16`.
    UInt16,
    /// `u32`.
    UInt32,
    /// `u64`.
    UInt64,
    /// Single-precision float (`f32`).
    Float,
    /// Double-precision float (`f64`).
    Double,
    /// Owned UTF-8 text (`String`).
    String,
}

impl TypeTag {
    /// Every tag, in declaration order.
    pub const ALL: [TypeTag; 12] = [
        TypeTag::Bool,
        TypeTag::Char,
        TypeTag::Int16,
        TypeTag::Int32,
        TypeTag::Int64,
        TypeTag::UChar,
        TypeTag::UInt16,
        TypeTag::UInt32,
        TypeTag::UInt64,
        TypeTag::Float,
        TypeTag::Double,
        TypeTag::String,
    ];

    /// The stable string form of this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UChar => "uchar",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
        }
    }

    /// Encoded width in bytes, or `None` for variable-width text.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Char | Self::UChar => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float => Some(4),
            Self::Int64 | Self::UInt64 | Self::Double => Some(8),
            Self::String => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| ParseValueError::UnknownTag {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_forms_round_trip() {
        for tag in TypeTag::ALL {
            assert_eq!(tag.as_str().parse::<TypeTag>().unwrap(), tag);
        }
    }

    #[test]
    fn string_forms_are_distinct() {
        let mut names: Vec<_> = TypeTag::ALL.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = "quaternion".parse::<TypeTag>().unwrap_err();
        assert_eq!(
            err,
            ParseValueError::UnknownTag {
                name: "quaternion".into()
            }
        );
    }

    #[test]
    fn only_string_is_variable_width() {
        for tag in TypeTag::ALL {
            assert_eq!(tag.fixed_width().is_none(), tag == TypeTag::String);
        }
        assert_eq!(TypeTag::Double.fixed_width(), Some(8));
        assert_eq!(TypeTag::Char.fixed_width(), Some(1));
    }
}
