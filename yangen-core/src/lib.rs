//! # Yangen Core
//!
//! Runtime support for code generated by `yangen-codegen`.
//!
//! This crate provides:
//! - The [`SchemaRecord`] capability implemented by every generated struct
//! - The [`SchemaEnum`] capability and the [`EnumDefinition`] reverse-lookup entries
//! - Error types raised by generated list constructors and union converters
//! - The validation hook generated `validate` methods defer to

pub mod enums;
pub mod error;
pub mod record;
pub mod validate;

pub use enums::{EnumDefinition, EnumMap, EnumTable, SchemaEnum, UNSET_CODE, lookup_enum};
pub use error::{DuplicateKeyError, UnionConversionError, ValidationError};
pub use record::{FieldPath, SchemaRecord};
pub use validate::{Validator, install_validator, validate};
