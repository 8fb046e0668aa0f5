//! Naming registry snapshot.
//!
//! Unique names are assigned by a separate naming pass before generation
//! starts. The generator only performs point lookups on the frozen result;
//! [`NamingRegistry`] has no way to add names once built.

use crate::tree::SchemaPath;
use std::collections::HashMap;

/// Immutable map from schema path to assigned unique name.
#[derive(Debug, Clone, Default)]
pub struct NamingRegistry {
    directories: HashMap<SchemaPath, String>,
    enums: HashMap<SchemaPath, String>,
}

impl NamingRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> NamingRegistryBuilder {
        NamingRegistryBuilder::default()
    }

    /// Returns the name of the record generated for the directory at `path`.
    #[must_use]
    pub fn directory_name(&self, path: &SchemaPath) -> Option<&str> {
        self.directories.get(path).map(String::as_str)
    }

    /// Returns the name of the enumeration used by the leaf at `path`.
    #[must_use]
    pub fn enum_name(&self, path: &SchemaPath) -> Option<&str> {
        self.enums.get(path).map(String::as_str)
    }

    /// Returns the number of registered directory names.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    /// Returns the number of registered enumeration names.
    #[must_use]
    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }
}

/// Builder for [`NamingRegistry`].
#[derive(Debug, Default)]
pub struct NamingRegistryBuilder {
    directories: HashMap<SchemaPath, String>,
    enums: HashMap<SchemaPath, String>,
}

impl NamingRegistryBuilder {
    /// Assigns `name` to the directory at `path`.
    #[must_use]
    pub fn directory(mut self, path: impl Into<SchemaPath>, name: impl Into<String>) -> Self {
        self.directories.insert(path.into(), name.into());
        self
    }

    /// Assigns enumeration `name` to the leaf at `path`.
    #[must_use]
    pub fn enumeration(mut self, path: impl Into<SchemaPath>, name: impl Into<String>) -> Self {
        self.enums.insert(path.into(), name.into());
        self
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> NamingRegistry {
        NamingRegistry {
            directories: self.directories,
            enums: self.enums,
        }
    }
}
