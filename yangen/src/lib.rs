//! # Yangen
//!
//! Generates Rust types from resolved YANG schema trees.
//!
//! Yangen is the code generation backend of a YANG toolchain: it takes the
//! schema tree produced by a parser, together with the unique names assigned
//! to its directories and enumerations, and emits Rust structs, keyed list
//! constructors, union types and enumerations with stable codes.
//!
//! ## Features
//!
//! - **Path compression** - `config`/`state` wrappers elided from generated structs
//! - **Keyed lists** - ordered maps with composite keys and duplicate-key protection
//! - **Unions** - one enum per union field with an ordered `from_any` converter
//! - **Enumerations** - stable integer codes and a global reverse-lookup table
//!
//! ## Quick Start
//!
//! ```ignore
//! use yangen::prelude::*;
//!
//! let mut tree = SchemaTree::new();
//! let module = tree.add_module("example");
//! let system = tree.add_container(module, "system");
//! tree.add_leaf(system, "hostname", YangType::new(TypeKind::String));
//!
//! let names = NamingRegistry::builder()
//!     .directory("/example/system", "System")
//!     .build();
//!
//! let config = GeneratorConfig::new().compress_paths(true);
//! let code = Generator::with_config(&tree, &names, config).generate()?;
//! code.write_to_file(&out_dir.join("generated.rs"))?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime traits and errors referenced by generated code
//! - [`schema`] - Schema tree, type mapping and directory IR
//! - [`codegen`] - Rust code generation

pub mod prelude;

/// Runtime support for generated code.
pub mod core {
    pub use yangen_core::*;
}

/// Schema tree and intermediate representation.
pub mod schema {
    pub use yangen_schema::*;
}

/// Code generation from schema trees.
pub mod codegen {
    pub use yangen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use yangen_codegen::{CodegenError, GeneratedCode, Generator, GeneratorConfig};
pub use yangen_core::{
    DuplicateKeyError, EnumDefinition, EnumMap, SchemaEnum, SchemaRecord, UnionConversionError,
    lookup_enum,
};
pub use yangen_schema::{NamingRegistry, SchemaTree};

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_generate_through_facade() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let mut tree = SchemaTree::new();
        let module = tree.add_module("example");
        let system = tree.add_container(module, "system");
        tree.add_leaf(system, "hostname", YangType::new(TypeKind::String));
        let names = NamingRegistry::builder()
            .directory("/example/system", "System")
            .build();

        let code = Generator::with_config(&tree, &names, GeneratorConfig::new().compress_paths(true))
            .generate()
            .expect("generate");
        let output = code.render();
        assert!(output.contains("pub struct System {"));
        assert!(output.contains("pub hostname: Option<String>,"));
        assert!(output.contains("pub static ENUM_MAP: ::yangen_core::EnumMap = &[\n];"));
    }
}
