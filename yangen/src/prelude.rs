//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use yangen::prelude::*;
//! ```

// Runtime types
pub use yangen_core::{
    DuplicateKeyError, EnumDefinition, EnumMap, FieldPath, SchemaEnum, SchemaRecord,
    UnionConversionError, ValidationError, Validator, install_validator, lookup_enum,
};

// Schema types
pub use yangen_schema::{
    Identity, IdentityBase, NamingRegistry, NodeId, NodeKind, SchemaIr, SchemaPath, SchemaTree,
    TypeKind, YangType,
};

// Codegen types
pub use yangen_codegen::{CodegenError, GeneratedCode, Generator, GeneratorConfig};
