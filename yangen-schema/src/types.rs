//! Native type descriptors produced by type mapping.
//!
//! A leaf maps either to one [`NativeType`] or, for a union with more than
//! one distinct member, to an ordered list of them.

use std::borrow::Cow;

/// Native type of a leaf in the generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    /// `i8`.
    Int8,
    /// `i16`.
    Int16,
    /// `i32`.
    Int32,
    /// `i64`.
    Int64,
    /// `u8`.
    Uint8,
    /// `u16`.
    Uint16,
    /// `u32`.
    Uint32,
    /// `u64`.
    Uint64,
    /// `bool`.
    Bool,
    /// `bool` standing for the presence of an empty leaf.
    Empty,
    /// `String`.
    String,
    /// `f64` holding a decimal64 value.
    Float64,
    /// `Vec<u8>`.
    Binary,
    /// A generated enumeration, by type name.
    Enum(String),
}

impl NativeType {
    /// Returns the Rust type used in generated code.
    #[must_use]
    pub fn rust_type(&self) -> Cow<'_, str> {
        match self {
            Self::Int8 => Cow::Borrowed("i8"),
            Self::Int16 => Cow::Borrowed("i16"),
            Self::Int32 => Cow::Borrowed("i32"),
            Self::Int64 => Cow::Borrowed("i64"),
            Self::Uint8 => Cow::Borrowed("u8"),
            Self::Uint16 => Cow::Borrowed("u16"),
            Self::Uint32 => Cow::Borrowed("u32"),
            Self::Uint64 => Cow::Borrowed("u64"),
            Self::Bool | Self::Empty => Cow::Borrowed("bool"),
            Self::String => Cow::Borrowed("String"),
            Self::Float64 => Cow::Borrowed("f64"),
            Self::Binary => Cow::Borrowed("Vec<u8>"),
            Self::Enum(name) => Cow::Borrowed(name.as_str()),
        }
    }

    /// Returns the name of the type as reported in conversion errors.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Bool => "bool",
            Self::Empty => "empty",
            Self::String => "string",
            Self::Float64 => "float64",
            Self::Binary => "binary",
            Self::Enum(name) => name.as_str(),
        }
    }

    /// Returns the variant name used for this type inside a union.
    #[must_use]
    pub fn variant_name(&self) -> Cow<'_, str> {
        match self {
            Self::Int8 => Cow::Borrowed("Int8"),
            Self::Int16 => Cow::Borrowed("Int16"),
            Self::Int32 => Cow::Borrowed("Int32"),
            Self::Int64 => Cow::Borrowed("Int64"),
            Self::Uint8 => Cow::Borrowed("Uint8"),
            Self::Uint16 => Cow::Borrowed("Uint16"),
            Self::Uint32 => Cow::Borrowed("Uint32"),
            Self::Uint64 => Cow::Borrowed("Uint64"),
            Self::Bool => Cow::Borrowed("Bool"),
            Self::Empty => Cow::Borrowed("Empty"),
            Self::String => Cow::Borrowed("String"),
            Self::Float64 => Cow::Borrowed("Float64"),
            Self::Binary => Cow::Borrowed("Binary"),
            Self::Enum(name) => Cow::Borrowed(name.as_str()),
        }
    }

    /// Returns true if the Rust type is `Copy`.
    #[must_use]
    pub const fn is_copy(&self) -> bool {
        !matches!(self, Self::String | Self::Binary)
    }

    /// Returns true if the Rust type implements `Ord` and `Hash`.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        !matches!(self, Self::Float64)
    }
}

/// Result of mapping a leaf type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedType {
    /// A single native type.
    Native(NativeType),
    /// A union; distinct member types in declaration order.
    Union(Vec<NativeType>),
}

impl MappedType {
    /// Returns the native type if this is not a union.
    #[must_use]
    pub fn native(&self) -> Option<&NativeType> {
        match self {
            Self::Native(native) => Some(native),
            Self::Union(_) => None,
        }
    }

    /// Returns true if this is a union.
    #[must_use]
    pub const fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_type_mapping() {
        assert_eq!(NativeType::Int8.rust_type(), "i8");
        assert_eq!(NativeType::Uint64.rust_type(), "u64");
        assert_eq!(NativeType::Empty.rust_type(), "bool");
        assert_eq!(NativeType::Binary.rust_type(), "Vec<u8>");
        assert_eq!(NativeType::Enum("E_Speed".into()).rust_type(), "E_Speed");
    }

    #[test]
    fn test_labels_and_variants() {
        assert_eq!(NativeType::String.label(), "string");
        assert_eq!(NativeType::Int8.label(), "int8");
        assert_eq!(NativeType::Int8.variant_name(), "Int8");
        assert_eq!(NativeType::Float64.variant_name(), "Float64");
    }

    #[test]
    fn test_key_capabilities() {
        assert!(NativeType::Int32.is_copy());
        assert!(!NativeType::String.is_copy());
        assert!(NativeType::String.is_ordered());
        assert!(!NativeType::Float64.is_ordered());
    }

    #[test]
    fn test_mapped_type_accessors() {
        let native = MappedType::Native(NativeType::String);
        assert_eq!(native.native(), Some(&NativeType::String));
        assert!(!native.is_union());

        let union = MappedType::Union(vec![NativeType::String, NativeType::Int8]);
        assert!(union.native().is_none());
        assert!(union.is_union());
    }
}
