//! # Yangen Codegen
//!
//! Rust code generation from resolved YANG schema trees.
//!
//! This crate provides:
//! - Path resolution for field serialization tags
//! - Struct generation with keyed list constructors and union types
//! - Enumeration and identity generation with stable codes
//! - The global enumeration lookup table
//! - Build script integration

pub mod config;
pub mod error;
pub mod generator;
pub mod ident;
pub mod paths;
pub mod rust;

pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use generator::{GeneratedCode, Generator};

use yangen_schema::{NamingRegistry, SchemaTree};

/// Generates Rust code for a resolved schema tree.
///
/// # Arguments
/// * `tree` - Resolved schema tree
/// * `names` - Names assigned to its directories and enumerations
/// * `config` - Generation settings
///
/// # Returns
/// Generated Rust code as a string.
///
/// # Errors
/// Returns `CodegenError` if generation fails.
pub fn generate(
    tree: &SchemaTree,
    names: &NamingRegistry,
    config: GeneratorConfig,
) -> Result<String, CodegenError> {
    let code = Generator::with_config(tree, names, config).generate()?;
    Ok(code.render())
}

/// Generates Rust code for a resolved schema tree into `path`.
///
/// Intended for build scripts writing into `OUT_DIR`.
///
/// # Errors
/// Returns `CodegenError` if generation or writing fails.
pub fn generate_to_file(
    tree: &SchemaTree,
    names: &NamingRegistry,
    config: GeneratorConfig,
    path: &std::path::Path,
) -> Result<(), CodegenError> {
    Generator::with_config(tree, names, config)
        .generate()?
        .write_to_file(path)
}
