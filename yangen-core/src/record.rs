//! Capability implemented by every generated schema record.

use std::any::Any;

/// Serialization paths of one field of a generated record.
///
/// The first entry is the primary path. Additional entries are alternative
/// representations the field may be matched under (e.g. a list key present
/// both under its `config` wrapper and directly under the list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    /// Name of the field in the schema.
    pub field: &'static str,
    /// Schema paths, primary first.
    pub paths: &'static [&'static str],
}

impl FieldPath {
    /// Creates a field path entry.
    #[must_use]
    pub const fn new(field: &'static str, paths: &'static [&'static str]) -> Self {
        Self { field, paths }
    }

    /// Returns the primary path of the field.
    #[must_use]
    pub fn primary(&self) -> Option<&'static str> {
        self.paths.first().copied()
    }
}

/// Marker capability of a generated schema record.
///
/// Generated structs implement this so that code handling arbitrary
/// generated records can identify them and reach their schema metadata.
pub trait SchemaRecord: Any {
    /// Generated name, used as the index into the schema snapshot.
    fn schema_name(&self) -> &'static str;

    /// Serialization paths of every field, sorted by field name.
    fn field_paths(&self) -> &'static [FieldPath];

    /// Finds the path entry of `field`.
    fn field_path(&self, field: &str) -> Option<&'static FieldPath> {
        self.field_paths().iter().find(|p| p.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Interface;

    impl SchemaRecord for Interface {
        fn schema_name(&self) -> &'static str {
            "Interface"
        }

        fn field_paths(&self) -> &'static [FieldPath] {
            const PATHS: &[FieldPath] = &[
                FieldPath::new("mtu", &["interface/mtu"]),
                FieldPath::new("name", &["interface/name", "interface/config/name"]),
            ];
            PATHS
        }
    }

    #[test]
    fn test_field_path_lookup() {
        let record = Interface;
        let name = record.field_path("name").expect("name path");
        assert_eq!(name.primary(), Some("interface/name"));
        assert_eq!(name.paths.len(), 2);
        assert!(record.field_path("missing").is_none());
    }

    #[test]
    fn test_primary_of_empty_paths() {
        assert_eq!(FieldPath::new("x", &[]).primary(), None);
    }
}
