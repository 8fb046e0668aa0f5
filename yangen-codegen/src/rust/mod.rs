//! Rust code generation modules.

pub mod enums;
pub mod registry;
pub mod structs;
pub mod unions;

pub use enums::{EnumArtifact, EnumEntry, EnumGenerator};
pub use registry::RegistryGenerator;
pub use structs::{StructArtifact, StructGenerator};
pub use unions::UnionGenerator;
