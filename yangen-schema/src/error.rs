//! Error types for schema tree access, type mapping and IR construction.

use thiserror::Error;

/// Error type for schema operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A node id does not belong to the tree.
    #[error("node id {id} does not exist in the schema tree")]
    DanglingNode {
        /// Offending arena index.
        id: usize,
    },

    /// An ancestor chain exceeded the depth guard.
    #[error("ancestor chain of '{node}' exceeds the maximum schema depth, the tree is cyclic")]
    CyclicAncestry {
        /// Node the walk started from.
        node: String,
    },

    /// A leaf or leaf-list has no type.
    #[error("leaf '{node}' has no type")]
    MissingType {
        /// Leaf name.
        node: String,
    },

    /// A type that cannot be mapped to a native type.
    #[error("unsupported type {kind} on leaf '{node}'")]
    UnsupportedType {
        /// Leaf name.
        node: String,
        /// Type kind.
        kind: String,
    },

    /// A leafref whose target was not resolved by the parser.
    #[error("leafref '{node}' has no resolved target")]
    UnresolvedLeafref {
        /// Leaf name.
        node: String,
    },

    /// A declared list key that is not a child of the list.
    #[error("key '{key}' of list '{list}' is not a leaf of the list")]
    UnknownKey {
        /// List name.
        list: String,
        /// Key leaf name.
        key: String,
    },

    /// A path the naming registry has no entry for.
    #[error("no {kind} name registered for path '{path}'")]
    MissingName {
        /// Kind of name looked up (directory, enumeration).
        kind: String,
        /// Schema path.
        path: String,
    },
}

impl SchemaError {
    /// Creates a missing name error.
    pub fn missing_name(kind: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MissingName {
            kind: kind.into(),
            path: path.into(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported(node: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedType {
            node: node.into(),
            kind: kind.into(),
        }
    }
}
