//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema tree or IR error.
    #[error("schema error: {0}")]
    Schema(#[from] yangen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field or directory whose ancestor chain does not reach a module.
    #[error("cannot resolve path of '{field}' in directory '{directory}': {reason}")]
    PathResolution {
        /// Directory name.
        directory: String,
        /// Field name.
        field: String,
        /// What went wrong.
        reason: String,
    },

    /// A container or list field whose directory was not generated.
    #[error("field '{field}' of '{directory}' references missing directory '{path}'")]
    MissingReference {
        /// Directory name.
        directory: String,
        /// Field name.
        field: String,
        /// Path of the missing directory.
        path: String,
    },

    /// A list key whose type cannot be used as a map key.
    #[error("key '{key}' of list '{list}' has unsupported type {key_type}")]
    UnsupportedKeyType {
        /// List field name.
        list: String,
        /// Key leaf name.
        key: String,
        /// Offending type.
        key_type: String,
    },

    /// Two fields of one directory map to the same identifier.
    #[error("fields '{first}' and '{second}' of '{directory}' both map to '{ident}'")]
    DuplicateField {
        /// Directory name.
        directory: String,
        /// First field name.
        first: String,
        /// Second field name.
        second: String,
        /// Shared identifier.
        ident: String,
    },

    /// Two values of one enumeration map to the same identifier.
    #[error("values '{first}' and '{second}' of {enum_name} both map to '{ident}'")]
    EnumValueCollision {
        /// Generated enumeration name.
        enum_name: String,
        /// First value.
        first: String,
        /// Second value.
        second: String,
        /// Shared identifier.
        ident: String,
    },

    /// The same enumeration type was emitted twice.
    #[error("enumeration {0} emitted more than once")]
    DuplicateEnum(String),

    /// Emission failed for one or more directories.
    #[error("{} directories failed to generate", .errors.len())]
    Directories {
        /// Per-directory failures, in path order.
        errors: Vec<CodegenError>,
    },
}

impl CodegenError {
    /// Creates a path resolution error.
    pub fn path_resolution(
        directory: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::PathResolution {
            directory: directory.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unsupported key type error.
    pub fn unsupported_key(
        list: impl Into<String>,
        key: impl Into<String>,
        key_type: impl Into<String>,
    ) -> Self {
        Self::UnsupportedKeyType {
            list: list.into(),
            key: key.into(),
            key_type: key_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CodegenError::path_resolution("CContainer", "f", "no module");
        assert_eq!(
            err.to_string(),
            "cannot resolve path of 'f' in directory 'CContainer': no module"
        );

        let err = CodegenError::Directories {
            errors: vec![CodegenError::DuplicateEnum("E_A".into())],
        };
        assert_eq!(err.to_string(), "1 directories failed to generate");
    }

    #[test]
    fn test_schema_error_conversion() {
        let err: CodegenError = yangen_schema::SchemaError::missing_name("directory", "/m/c").into();
        assert!(matches!(err, CodegenError::Schema(_)));
    }
}
