//! Validation hook.
//!
//! Generated `validate` methods call [`validate`] with the record's generated
//! name. The actual schema validation is provided by whichever [`Validator`]
//! the application installs; without one every record is accepted.

use crate::error::ValidationError;
use crate::record::SchemaRecord;
use std::sync::OnceLock;

/// Validates records against the schema indexed by their generated name.
pub trait Validator: Send + Sync {
    /// Validates `record` against the schema entry named `schema_name`.
    ///
    /// # Errors
    /// Returns `ValidationError` if the record violates the schema.
    fn validate(&self, schema_name: &str, record: &dyn SchemaRecord)
    -> Result<(), ValidationError>;
}

static VALIDATOR: OnceLock<Box<dyn Validator>> = OnceLock::new();

/// Installs the process-wide validator.
///
/// # Errors
/// Returns `ValidationError::AlreadyInstalled` if one is already installed.
pub fn install_validator(validator: impl Validator + 'static) -> Result<(), ValidationError> {
    VALIDATOR
        .set(Box::new(validator))
        .map_err(|_| ValidationError::AlreadyInstalled)
}

/// Validates `record` against the schema indexed by `schema_name`.
///
/// # Errors
/// Returns the installed validator's error.
pub fn validate<T: SchemaRecord>(schema_name: &str, record: &T) -> Result<(), ValidationError> {
    match VALIDATOR.get() {
        Some(validator) => validator.validate(schema_name, record),
        None => Ok(()),
    }
}
