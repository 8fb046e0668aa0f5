//! Intermediate representation for code generation.
//!
//! This module turns a resolved schema tree into the flattened form the
//! generator works on: one [`Directory`] per container or list that becomes
//! a generated record, and one [`EnumSource`] per enumerated type.

use crate::error::SchemaError;
use crate::mapper::{TypeMapper, enum_type_name, enumerated_members, member_enum_name};
use crate::naming::NamingRegistry;
use crate::tree::{Identity, NodeId, NodeKind, SchemaPath, SchemaTree, TypeKind, YangType};
use crate::types::MappedType;
use std::collections::BTreeMap;

/// Name of the wrapper container holding applied configuration.
pub const CONFIG_WRAPPER: &str = "config";

/// Name of the wrapper container holding operational state.
pub const STATE_WRAPPER: &str = "state";

/// Returns true if `name` is one of the wrappers elided by path compression.
#[must_use]
pub fn is_wrapper(name: &str) -> bool {
    name == CONFIG_WRAPPER || name == STATE_WRAPPER
}

/// A container or list that becomes one generated record.
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    /// Unique name assigned by the naming pass.
    pub name: String,
    /// Fields by schema name.
    pub fields: BTreeMap<String, NodeId>,
    /// Data path of the directory, starting with its module.
    pub path: SchemaPath,
    /// Key metadata, present iff the directory is a list element.
    pub list_attr: Option<ListAttr>,
}

impl Directory {
    /// Creates a directory with no fields.
    pub fn new(name: impl Into<String>, path: impl Into<SchemaPath>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
            path: path.into(),
            list_attr: None,
        }
    }

    /// Returns true if the directory is a list element.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        self.list_attr.is_some()
    }

    /// Returns the directory's own name in the schema.
    #[must_use]
    pub fn local_name(&self) -> Option<&str> {
        self.path.last()
    }
}

/// Key metadata of a list directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListAttr {
    /// Mapped type of each key leaf, by name.
    pub keys: BTreeMap<String, MappedType>,
    /// Key leaves in declared key order.
    pub key_elems: Vec<NodeId>,
}

/// Values of an enumerated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumValues {
    /// Enumeration values in declaration order.
    Ordered(Vec<String>),
    /// Identities derived from a base, in no meaningful order.
    Identities(Vec<Identity>),
}

/// One enumerated type to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSource {
    /// Name assigned by the naming pass.
    pub name: String,
    /// Values of the type.
    pub values: EnumValues,
}

impl EnumSource {
    /// Creates an enumeration source with values in declaration order.
    pub fn ordered(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: EnumValues::Ordered(values.iter().map(|v| (*v).to_string()).collect()),
        }
    }

    /// Creates an identity source.
    pub fn identities(name: impl Into<String>, values: Vec<Identity>) -> Self {
        Self {
            name: name.into(),
            values: EnumValues::Identities(values),
        }
    }

    /// Builds the source for `yang_type`, if it is enumerated.
    #[must_use]
    pub fn from_type(name: &str, yang_type: &YangType) -> Option<Self> {
        match yang_type.kind {
            TypeKind::Enumeration => Some(Self {
                name: name.to_string(),
                values: EnumValues::Ordered(yang_type.enum_values.clone()),
            }),
            TypeKind::Identityref => yang_type.identity_base.as_ref().map(|base| Self {
                name: name.to_string(),
                values: EnumValues::Identities(base.values.clone()),
            }),
            _ => None,
        }
    }

    /// Returns the generated type name.
    #[must_use]
    pub fn type_name(&self) -> String {
        enum_type_name(&self.name)
    }
}

/// Intermediate representation of a schema for code generation.
#[derive(Debug, Clone, Default)]
pub struct SchemaIr {
    /// Directories by data path.
    pub directories: BTreeMap<SchemaPath, Directory>,
    /// Enumerated types, sorted by name.
    pub enums: Vec<EnumSource>,
    /// Whether the directories were built with path compression.
    pub compressed: bool,
}

impl SchemaIr {
    /// Extracts directories and enumerated types from `tree`.
    ///
    /// Every container and list becomes a directory. A module becomes one
    /// only when the registry holds a name for it.
    ///
    /// Under compression, `config` and `state` wrapper containers do not
    /// become directories; their children are merged into the enclosing
    /// directory (configuration first, state only for names not already
    /// present). Nodes whose ancestor chain does not end at a module are
    /// skipped.
    ///
    /// # Errors
    /// Returns `SchemaError` if the tree is malformed, a key leaf is missing,
    /// a key type cannot be mapped, or the registry lacks a required name.
    pub fn build(
        tree: &SchemaTree,
        names: &NamingRegistry,
        compress: bool,
    ) -> Result<Self, SchemaError> {
        let mapper = TypeMapper::new(tree, names);
        let mut ir = Self {
            compressed: compress,
            ..Self::default()
        };
        let mut enums = BTreeMap::new();

        for id in tree.ids() {
            let node = tree.node(id)?;
            if tree.root_of(id)?.kind != NodeKind::Module {
                tracing::debug!("Skipping '{}', not attributable to a module", node.name);
                continue;
            }

            match node.kind {
                NodeKind::Module => {
                    // Only a module the naming pass assigned a root record to.
                    if names.directory_name(&tree.data_path(id)?).is_some() {
                        let directory = build_directory(tree, names, &mapper, id, compress)?;
                        ir.directories.insert(directory.path.clone(), directory);
                    }
                }
                NodeKind::Container | NodeKind::List => {
                    if compress && is_compressed_wrapper(tree, id)? {
                        continue;
                    }
                    let directory = build_directory(tree, names, &mapper, id, compress)?;
                    tracing::debug!("Built directory {} for {}", directory.name, directory.path);
                    ir.directories.insert(directory.path.clone(), directory);
                }
                NodeKind::Leaf | NodeKind::LeafList => {
                    collect_enums(tree, names, id, &mut enums)?;
                }
                _ => {}
            }
        }

        ir.enums = enums.into_values().collect();
        Ok(ir)
    }

    /// Gets a directory by data path.
    #[must_use]
    pub fn directory(&self, path: &SchemaPath) -> Option<&Directory> {
        self.directories.get(path)
    }
}

fn is_compressed_wrapper(tree: &SchemaTree, id: NodeId) -> Result<bool, SchemaError> {
    let node = tree.node(id)?;
    if node.kind != NodeKind::Container || !is_wrapper(&node.name) {
        return Ok(false);
    }
    let Some(parent) = node.parent else {
        return Ok(false);
    };
    Ok(tree.node(parent)?.kind.is_directory())
}

fn build_directory(
    tree: &SchemaTree,
    names: &NamingRegistry,
    mapper: &TypeMapper<'_>,
    id: NodeId,
    compress: bool,
) -> Result<Directory, SchemaError> {
    let node = tree.node(id)?;
    let path = tree.data_path(id)?;
    let name = names
        .directory_name(&path)
        .ok_or_else(|| SchemaError::missing_name("directory", path.to_string()))?;

    let mut fields = BTreeMap::new();
    let mut config = Vec::new();
    let mut state = Vec::new();
    let mut direct = Vec::new();

    for child in tree.data_children(id)? {
        if compress && is_compressed_wrapper(tree, child)? {
            let wrapper = tree.node(child)?;
            let members = tree.data_children(child)?;
            if wrapper.name == CONFIG_WRAPPER {
                config.extend(members);
            } else {
                state.extend(members);
            }
        } else {
            direct.push(child);
        }
    }

    for child in config.into_iter().chain(direct).chain(state) {
        fields
            .entry(tree.node(child)?.name.clone())
            .or_insert(child);
    }

    let list_attr = if node.kind == NodeKind::List {
        Some(build_list_attr(tree, mapper, id, compress)?)
    } else {
        None
    };

    Ok(Directory {
        name: name.to_string(),
        fields,
        path,
        list_attr,
    })
}

fn build_list_attr(
    tree: &SchemaTree,
    mapper: &TypeMapper<'_>,
    list: NodeId,
    compress: bool,
) -> Result<ListAttr, SchemaError> {
    let node = tree.node(list)?;
    let config = if compress {
        tree.data_child(list, CONFIG_WRAPPER)?
    } else {
        None
    };

    let mut attr = ListAttr::default();
    for key in &node.keys {
        let in_config = match config {
            Some(config) => tree.data_child(config, key)?,
            None => None,
        };
        let elem = match in_config {
            Some(elem) => elem,
            None => tree
                .data_child(list, key)?
                .ok_or_else(|| SchemaError::UnknownKey {
                    list: node.name.clone(),
                    key: key.clone(),
                })?,
        };
        attr.keys.insert(key.clone(), mapper.map_leaf(elem)?);
        attr.key_elems.push(elem);
    }

    Ok(attr)
}

fn collect_enums(
    tree: &SchemaTree,
    names: &NamingRegistry,
    leaf: NodeId,
    enums: &mut BTreeMap<String, EnumSource>,
) -> Result<(), SchemaError> {
    let Some(yang_type) = tree.node(leaf)?.yang_type.as_ref() else {
        return Ok(());
    };

    let mut enumerated = Vec::new();
    enumerated_members(yang_type, &mut enumerated);
    if enumerated.is_empty() {
        return Ok(());
    }

    let path = tree.data_path(leaf)?;
    let name = names
        .enum_name(&path)
        .ok_or_else(|| SchemaError::missing_name("enumeration", path.to_string()))?;

    let count = enumerated.len();
    for (ordinal, member) in enumerated.into_iter().enumerate() {
        let member_name = member_enum_name(name, ordinal, count);
        if enums.contains_key(&member_name) {
            continue;
        }
        if let Some(source) = EnumSource::from_type(&member_name, member) {
            enums.insert(member_name, source);
        }
    }

    Ok(())
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c == '-' || c == '.' {
            result.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 && !result.ends_with('_') {
            result.push('_');
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' || c == '.' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::IdentityBase;
    use crate::types::NativeType;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("hostname"), "hostname");
        assert_eq!(to_snake_case("oper-status"), "oper_status");
        assert_eq!(to_snake_case("ipv4.address"), "ipv4_address");
        assert_eq!(to_snake_case("keyLeafOne"), "key_leaf_one");
        assert_eq!(to_snake_case("a-list"), "a_list");
        assert_eq!(to_snake_case("listWithKey"), "list_with_key");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("oper-status"), "OperStatus");
        assert_eq!(to_pascal_case("next_hop"), "NextHop");
        assert_eq!(to_pascal_case("input-struct"), "InputStruct");
        assert_eq!(to_pascal_case("listWithKey"), "ListWithKey");
        assert_eq!(to_pascal_case("u1"), "U1");
    }

    /// module `m`: container `interfaces` / list `interface` keyed by `name`,
    /// with `config`/`state` wrappers and a list-level leafref key.
    fn interfaces_tree() -> (SchemaTree, NamingRegistry) {
        let mut tree = SchemaTree::new();
        let module = tree.add_module("m");
        let interfaces = tree.add_container(module, "interfaces");
        let interface = tree.add_list(interfaces, "interface", &["name"]);
        let config = tree.add_container(interface, "config");
        let name = tree.add_leaf(config, "name", YangType::new(TypeKind::String));
        tree.add_leaf(config, "mtu", YangType::new(TypeKind::Uint16));
        let state = tree.add_container(interface, "state");
        tree.add_leaf(state, "name", YangType::new(TypeKind::String));
        tree.add_leaf(
            state,
            "oper-status",
            YangType::enumeration(&["UP", "DOWN"]),
        );
        tree.add_leaf(interface, "name", YangType::leafref(name));

        let names = NamingRegistry::builder()
            .directory("/m/interfaces", "Interfaces")
            .directory("/m/interfaces/interface", "Interface")
            .directory("/m/interfaces/interface/config", "Interface_Config")
            .directory("/m/interfaces/interface/state", "Interface_State")
            .enumeration("/m/interfaces/interface/state/oper-status", "Interface_OperStatus")
            .build();
        (tree, names)
    }

    #[test]
    fn test_build_compressed_merges_wrappers() {
        let (tree, names) = interfaces_tree();
        let ir = SchemaIr::build(&tree, &names, true).expect("ir");

        assert_eq!(ir.directories.len(), 2);
        let interface = ir
            .directory(&SchemaPath::from("/m/interfaces/interface"))
            .expect("interface");
        let fields: Vec<&str> = interface.fields.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["mtu", "name", "oper-status"]);

        let name = interface.fields["name"];
        assert_eq!(
            tree.data_path(name).expect("path").to_string(),
            "/m/interfaces/interface/config/name"
        );

        let attr = interface.list_attr.as_ref().expect("list attr");
        assert_eq!(attr.key_elems, vec![name]);
        assert_eq!(
            attr.keys["name"],
            MappedType::Native(NativeType::String)
        );
    }

    #[test]
    fn test_build_uncompressed_keeps_wrappers() {
        let (tree, names) = interfaces_tree();
        let ir = SchemaIr::build(&tree, &names, false).expect("ir");

        assert_eq!(ir.directories.len(), 4);
        let interface = ir
            .directory(&SchemaPath::from("/m/interfaces/interface"))
            .expect("interface");
        let fields: Vec<&str> = interface.fields.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["config", "name", "state"]);

        let attr = interface.list_attr.as_ref().expect("list attr");
        assert_eq!(attr.key_elems, vec![interface.fields["name"]]);
    }

    #[test]
    fn test_build_collects_enums() {
        let (tree, names) = interfaces_tree();
        let ir = SchemaIr::build(&tree, &names, true).expect("ir");

        assert_eq!(ir.enums.len(), 1);
        assert_eq!(ir.enums[0].type_name(), "E_Interface_OperStatus");
        assert_eq!(
            ir.enums[0].values,
            EnumValues::Ordered(vec!["UP".into(), "DOWN".into()])
        );
    }

    #[test]
    fn test_build_union_of_enumerations() {
        let mut tree = SchemaTree::new();
        let module = tree.add_module("m");
        let c = tree.add_container(module, "c");
        tree.add_leaf(
            c,
            "u",
            YangType::union(vec![
                YangType::enumeration(&["A", "B"]),
                YangType::enumeration(&["C", "D"]),
            ]),
        );
        let names = NamingRegistry::builder()
            .directory("/m/c", "C")
            .enumeration("/m/c/u", "C_U")
            .build();

        let ir = SchemaIr::build(&tree, &names, false).expect("ir");
        let enums: Vec<(String, &EnumValues)> =
            ir.enums.iter().map(|e| (e.type_name(), &e.values)).collect();
        assert_eq!(
            enums,
            vec![
                (
                    "E_C_U_1".to_string(),
                    &EnumValues::Ordered(vec!["A".into(), "B".into()])
                ),
                (
                    "E_C_U_2".to_string(),
                    &EnumValues::Ordered(vec!["C".into(), "D".into()])
                ),
            ]
        );
    }

    #[test]
    fn test_build_missing_directory_name() {
        let (tree, _) = interfaces_tree();
        let names = NamingRegistry::default();
        let err = SchemaIr::build(&tree, &names, true).unwrap_err();
        assert!(matches!(err, SchemaError::MissingName { .. }));
    }

    #[test]
    fn test_build_unknown_key() {
        let mut tree = SchemaTree::new();
        let module = tree.add_module("m");
        tree.add_list(module, "l", &["missing"]);
        let names = NamingRegistry::builder().directory("/m/l", "L").build();

        let err = SchemaIr::build(&tree, &names, false).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownKey {
                list: "l".into(),
                key: "missing".into(),
            }
        );
    }

    #[test]
    fn test_key_order_is_declared_order() {
        let mut tree = SchemaTree::new();
        let module = tree.add_module("m");
        let list = tree.add_list(module, "l", &["zeta", "alpha"]);
        let alpha = tree.add_leaf(list, "alpha", YangType::new(TypeKind::Int8));
        let zeta = tree.add_leaf(list, "zeta", YangType::new(TypeKind::String));
        let names = NamingRegistry::builder().directory("/m/l", "L").build();

        let ir = SchemaIr::build(&tree, &names, false).expect("ir");
        let attr = ir.directories[&SchemaPath::from("/m/l")]
            .list_attr
            .clone()
            .expect("attr");
        assert_eq!(attr.key_elems, vec![zeta, alpha]);
    }

    #[test]
    fn test_orphans_are_skipped() {
        let mut tree = SchemaTree::new();
        tree.insert(crate::tree::SchemaNode::new("loose", NodeKind::Container));
        let ir = SchemaIr::build(&tree, &NamingRegistry::default(), false).expect("ir");
        assert!(ir.directories.is_empty());
    }

    #[test]
    fn test_enum_source_from_identityref() {
        let yang_type = YangType::identityref(IdentityBase {
            name: "base".into(),
            module: "m".into(),
            values: vec![Identity::new("B", "m2"), Identity::new("A", "m")],
        });
        let source = EnumSource::from_type("Base", &yang_type).expect("source");
        assert_eq!(source.type_name(), "E_Base");
        assert!(matches!(source.values, EnumValues::Identities(ref v) if v.len() == 2));
        assert!(EnumSource::from_type("X", &YangType::new(TypeKind::String)).is_none());
    }
}
