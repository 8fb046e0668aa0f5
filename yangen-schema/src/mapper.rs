//! Mapping of modelling-language types to native types.
//!
//! Unions are flattened: nested unions contribute their members in place and
//! members that map to an already-present native type are dropped. The order
//! of the remaining members is declaration order and is never changed, since
//! generated converters try branches in that order.
//!
//! A leaf whose type holds more than one enumeration or identityref gets one
//! generated enumeration per such member, see [`member_enum_name`].

use crate::error::SchemaError;
use crate::naming::NamingRegistry;
use crate::tree::{MAX_SCHEMA_DEPTH, NodeId, SchemaTree, TypeKind, YangType};
use crate::types::{MappedType, NativeType};

/// Returns the generated type name of the enumeration named `name`.
#[must_use]
pub fn enum_type_name(name: &str) -> String {
    format!("E_{}", name)
}

/// Returns the name of the `ordinal`-th enumerated member of a leaf type.
///
/// `base` is the name the naming pass assigned to the leaf and `count` the
/// number of enumerated members of its type. A single member keeps `base`;
/// otherwise members are suffixed `_1`, `_2`, ... in declaration order.
#[must_use]
pub fn member_enum_name(base: &str, ordinal: usize, count: usize) -> String {
    if count <= 1 {
        base.to_string()
    } else {
        format!("{}_{}", base, ordinal + 1)
    }
}

/// Collects the enumeration and identityref members of `yang_type`.
///
/// Nested unions are flattened; members are in declaration order.
pub fn enumerated_members<'t>(yang_type: &'t YangType, out: &mut Vec<&'t YangType>) {
    match yang_type.kind {
        TypeKind::Enumeration | TypeKind::Identityref => out.push(yang_type),
        TypeKind::Union => {
            for member in &yang_type.union_types {
                enumerated_members(member, out);
            }
        }
        _ => {}
    }
}

/// Position of the next enumerated member while walking one leaf type.
#[derive(Debug, Clone, Copy)]
struct EnumCursor {
    next: usize,
    count: usize,
}

/// Resolves leaf types against a schema tree and a naming registry.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    tree: &'a SchemaTree,
    names: &'a NamingRegistry,
}

impl<'a> TypeMapper<'a> {
    /// Creates a type mapper.
    #[must_use]
    pub const fn new(tree: &'a SchemaTree, names: &'a NamingRegistry) -> Self {
        Self { tree, names }
    }

    /// Maps the type of the leaf or leaf-list `leaf`.
    ///
    /// # Errors
    /// Returns `SchemaError` if the leaf has no type, uses an unsupported
    /// type, or references an enumeration or leafref that cannot be resolved.
    pub fn map_leaf(&self, leaf: NodeId) -> Result<MappedType, SchemaError> {
        let branches = self.branches(leaf, 0)?;
        self.finish(leaf, branches)
    }

    fn finish(&self, leaf: NodeId, mut branches: Vec<NativeType>) -> Result<MappedType, SchemaError> {
        match branches.len() {
            0 => Err(SchemaError::unsupported(
                self.tree.node(leaf)?.name.clone(),
                "empty union",
            )),
            1 => Ok(MappedType::Native(branches.remove(0))),
            _ => Ok(MappedType::Union(branches)),
        }
    }

    fn branches(&self, leaf: NodeId, depth: usize) -> Result<Vec<NativeType>, SchemaError> {
        let node = self.tree.node(leaf)?;
        let yang_type = node
            .yang_type
            .as_ref()
            .ok_or_else(|| SchemaError::MissingType {
                node: node.name.clone(),
            })?;

        let mut members = Vec::new();
        enumerated_members(yang_type, &mut members);
        let mut cursor = EnumCursor {
            next: 0,
            count: members.len(),
        };

        let mut out = Vec::new();
        self.collect(leaf, yang_type, depth, &mut cursor, &mut out)?;
        Ok(out)
    }

    fn collect(
        &self,
        leaf: NodeId,
        yang_type: &YangType,
        depth: usize,
        cursor: &mut EnumCursor,
        out: &mut Vec<NativeType>,
    ) -> Result<(), SchemaError> {
        match yang_type.kind {
            TypeKind::Union => {
                for member in &yang_type.union_types {
                    self.collect(leaf, member, depth, cursor, out)?;
                }
            }
            TypeKind::Leafref => {
                let node = self.tree.node(leaf)?;
                if depth >= MAX_SCHEMA_DEPTH {
                    return Err(SchemaError::CyclicAncestry {
                        node: node.name.clone(),
                    });
                }
                let target =
                    yang_type
                        .leafref_target
                        .ok_or_else(|| SchemaError::UnresolvedLeafref {
                            node: node.name.clone(),
                        })?;
                for native in self.branches(target, depth + 1)? {
                    push_unique(out, native);
                }
            }
            _ => push_unique(out, self.native(leaf, yang_type, cursor)?),
        }
        Ok(())
    }

    fn native(
        &self,
        leaf: NodeId,
        yang_type: &YangType,
        cursor: &mut EnumCursor,
    ) -> Result<NativeType, SchemaError> {
        let native = match yang_type.kind {
            TypeKind::Int8 => NativeType::Int8,
            TypeKind::Int16 => NativeType::Int16,
            TypeKind::Int32 => NativeType::Int32,
            TypeKind::Int64 => NativeType::Int64,
            TypeKind::Uint8 => NativeType::Uint8,
            TypeKind::Uint16 => NativeType::Uint16,
            TypeKind::Uint32 => NativeType::Uint32,
            TypeKind::Uint64 => NativeType::Uint64,
            TypeKind::String => NativeType::String,
            TypeKind::Boolean => NativeType::Bool,
            TypeKind::Empty => NativeType::Empty,
            TypeKind::Decimal64 => NativeType::Float64,
            TypeKind::Binary => NativeType::Binary,
            TypeKind::Enumeration | TypeKind::Identityref => {
                let path = self.tree.data_path(leaf)?;
                let name = self
                    .names
                    .enum_name(&path)
                    .ok_or_else(|| SchemaError::missing_name("enumeration", path.to_string()))?;
                let member = member_enum_name(name, cursor.next, cursor.count);
                cursor.next += 1;
                NativeType::Enum(enum_type_name(&member))
            }
            kind @ (TypeKind::Bits | TypeKind::Union | TypeKind::Leafref) => {
                return Err(SchemaError::unsupported(
                    self.tree.node(leaf)?.name.clone(),
                    format!("{:?}", kind).to_lowercase(),
                ));
            }
        };
        Ok(native)
    }
}

fn push_unique(out: &mut Vec<NativeType>, native: NativeType) {
    if !out.iter().any(|t| t.rust_type() == native.rust_type()) {
        out.push(native);
    }
}
