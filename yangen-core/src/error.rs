//! Error types raised by generated code at runtime.

use thiserror::Error;

/// Raised by a generated list constructor when the key is already present.
///
/// The existing entry is left untouched and nothing is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate key {key} for list {list}")]
pub struct DuplicateKeyError {
    /// Name of the list the insertion targeted.
    pub list: String,
    /// Debug rendering of the offending key.
    pub key: String,
}

impl DuplicateKeyError {
    /// Creates a duplicate key error.
    pub fn new(list: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            key: key.into(),
        }
    }
}

/// Raised by a generated union converter when no branch accepts the value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "cannot convert value to {union}, unknown union type, want any of [{}]",
    .accepted.join(", ")
)]
pub struct UnionConversionError {
    /// Generated name of the union type.
    pub union: String,
    /// Native types accepted by the union, in branch order.
    pub accepted: Vec<&'static str>,
}

impl UnionConversionError {
    /// Creates a union conversion error.
    pub fn new(union: impl Into<String>, accepted: &[&'static str]) -> Self {
        Self {
            union: union.into(),
            accepted: accepted.to_vec(),
        }
    }
}

/// Error type for record validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The installed validator rejected the record.
    #[error("validation of '{schema}' failed: {message}")]
    Invalid {
        /// Generated name the schema is indexed by.
        schema: String,
        /// Validator message.
        message: String,
    },

    /// A validator has already been installed for this process.
    #[error("a validator is already installed")]
    AlreadyInstalled,
}

impl ValidationError {
    /// Creates an invalid record error.
    pub fn invalid(schema: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            schema: schema.into(),
            message: message.into(),
        }
    }
}
