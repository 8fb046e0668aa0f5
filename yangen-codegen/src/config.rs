//! Generator configuration.

/// Default path under which generated code references the runtime crate.
pub const DEFAULT_RUNTIME_CRATE: &str = "::yangen_core";

/// Default name of the global enumeration lookup table.
pub const DEFAULT_ENUM_MAP_NAME: &str = "ENUM_MAP";

/// Options controlling code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    compress_paths: bool,
    generate_schema_snapshot: bool,
    runtime_crate: String,
    enum_map_name: String,
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            compress_paths: false,
            generate_schema_snapshot: false,
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            enum_map_name: DEFAULT_ENUM_MAP_NAME.to_string(),
        }
    }

    /// Sets whether `config`/`state` wrapper containers are elided.
    #[must_use]
    pub fn compress_paths(mut self, compress: bool) -> Self {
        self.compress_paths = compress;
        self
    }

    /// Sets whether a schema snapshot is requested for each record.
    ///
    /// The generated items have the same shape either way.
    #[must_use]
    pub fn generate_schema_snapshot(mut self, snapshot: bool) -> Self {
        self.generate_schema_snapshot = snapshot;
        self
    }

    /// Sets the path of the runtime crate in generated code.
    #[must_use]
    pub fn runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Sets the name of the global enumeration lookup table.
    #[must_use]
    pub fn enum_map_name(mut self, name: impl Into<String>) -> Self {
        self.enum_map_name = name.into();
        self
    }

    /// Returns true if path compression is enabled.
    #[must_use]
    pub const fn is_compressed(&self) -> bool {
        self.compress_paths
    }

    /// Returns true if a schema snapshot was requested.
    #[must_use]
    pub const fn wants_schema_snapshot(&self) -> bool {
        self.generate_schema_snapshot
    }

    /// Returns the runtime crate path.
    #[must_use]
    pub fn runtime(&self) -> &str {
        &self.runtime_crate
    }

    /// Returns the name of the global enumeration lookup table.
    #[must_use]
    pub fn enum_map(&self) -> &str {
        &self.enum_map_name
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
