//! Resolved schema tree.
//!
//! The tree is produced by the upstream YANG parser and is only read by the
//! generator. Nodes live in an arena and refer to each other by [`NodeId`];
//! parent links form the ancestor chain that terminates at a module node.

use crate::error::SchemaError;
use std::fmt;

/// Upper bound on any upward walk through the tree.
///
/// A malformed tree whose parent links form a cycle is reported as
/// [`SchemaError::CyclicAncestry`] instead of looping forever.
pub const MAX_SCHEMA_DEPTH: usize = 256;

/// Index of a node in a [`SchemaTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Module, the root of an ancestor chain.
    Module,
    /// Container.
    Container,
    /// List.
    List,
    /// Leaf.
    Leaf,
    /// Leaf-list.
    LeafList,
    /// Choice, not part of the data tree.
    Choice,
    /// Case, not part of the data tree.
    Case,
}

impl NodeKind {
    /// Returns true for nodes that become generated records.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Container | Self::List)
    }

    /// Returns true for nodes that are skipped in data paths.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        matches!(self, Self::Choice | Self::Case)
    }
}

/// Built-in type kinds of the modelling language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit unsigned integer.
    Uint16,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// String.
    String,
    /// Boolean.
    Boolean,
    /// Empty (presence flag).
    Empty,
    /// Fixed-point decimal.
    Decimal64,
    /// Binary data.
    Binary,
    /// Bit set.
    Bits,
    /// Enumeration.
    Enumeration,
    /// Reference to an identity derived from a base.
    Identityref,
    /// Union of member types.
    Union,
    /// Reference to another leaf.
    Leafref,
}

/// A module-attributed identity value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Identity name.
    pub name: String,
    /// Module defining the identity.
    pub module: String,
}

impl Identity {
    /// Creates an identity.
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
        }
    }
}

/// An identity base and every identity derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityBase {
    /// Base identity name.
    pub name: String,
    /// Module defining the base.
    pub module: String,
    /// Derived identities, in no particular order.
    pub values: Vec<Identity>,
}

/// Resolved type of a leaf or leaf-list.
#[derive(Debug, Clone, PartialEq)]
pub struct YangType {
    /// Built-in kind.
    pub kind: TypeKind,
    /// Member types of a union, in declaration order.
    pub union_types: Vec<YangType>,
    /// Values of an enumeration, in declaration order.
    pub enum_values: Vec<String>,
    /// Base of an identityref.
    pub identity_base: Option<IdentityBase>,
    /// Leaf referenced by a leafref, as resolved by the parser.
    pub leafref_target: Option<NodeId>,
}

impl YangType {
    /// Creates a type of the given kind with no further detail.
    #[must_use]
    pub const fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            union_types: Vec::new(),
            enum_values: Vec::new(),
            identity_base: None,
            leafref_target: None,
        }
    }

    /// Creates a union of `types`.
    #[must_use]
    pub fn union(types: Vec<YangType>) -> Self {
        Self {
            union_types: types,
            ..Self::new(TypeKind::Union)
        }
    }

    /// Creates an enumeration with values in declaration order.
    #[must_use]
    pub fn enumeration(values: &[&str]) -> Self {
        Self {
            enum_values: values.iter().map(|v| (*v).to_string()).collect(),
            ..Self::new(TypeKind::Enumeration)
        }
    }

    /// Creates an identityref to `base`.
    #[must_use]
    pub fn identityref(base: IdentityBase) -> Self {
        Self {
            identity_base: Some(base),
            ..Self::new(TypeKind::Identityref)
        }
    }

    /// Creates a leafref resolved to `target`.
    #[must_use]
    pub fn leafref(target: NodeId) -> Self {
        Self {
            leafref_target: Some(target),
            ..Self::new(TypeKind::Leafref)
        }
    }
}

/// One node of the resolved schema tree.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    /// Node name.
    pub name: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Type of a leaf or leaf-list.
    pub yang_type: Option<YangType>,
    /// Key leaf names of a list, in declaration order.
    pub keys: Vec<String>,
    /// Children in declaration order.
    pub children: Vec<NodeId>,
    /// Parent node, `None` for a root.
    pub parent: Option<NodeId>,
    /// Module defining this node.
    pub module: Option<String>,
}

impl SchemaNode {
    /// Creates a detached node.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            yang_type: None,
            keys: Vec::new(),
            children: Vec::new(),
            parent: None,
            module: None,
        }
    }
}

/// Ordered sequence of data-tree names, starting with the module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaPath(Vec<String>);

impl SchemaPath {
    /// Creates a path from its segments.
    #[must_use]
    pub const fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Parses a `/`-separated path; empty segments are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self(
            path.split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Returns the segments of the path.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the last segment.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Returns true if `prefix` is a leading subsequence of this path.
    #[must_use]
    pub fn starts_with(&self, prefix: &SchemaPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl From<&str> for SchemaPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Arena holding every node of a resolved schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaTree {
    nodes: Vec<SchemaNode>,
}

impl SchemaTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node as-is, without linking it to its parent.
    pub fn insert(&mut self, node: SchemaNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Adds a module root.
    pub fn add_module(&mut self, name: &str) -> NodeId {
        let mut node = SchemaNode::new(name, NodeKind::Module);
        node.module = Some(name.to_string());
        self.insert(node)
    }

    /// Adds a container under `parent`.
    pub fn add_container(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add_child(parent, SchemaNode::new(name, NodeKind::Container))
    }

    /// Adds a list under `parent` keyed by `keys` in declaration order.
    pub fn add_list(&mut self, parent: NodeId, name: &str, keys: &[&str]) -> NodeId {
        let mut node = SchemaNode::new(name, NodeKind::List);
        node.keys = keys.iter().map(|k| (*k).to_string()).collect();
        self.add_child(parent, node)
    }

    /// Adds a leaf of type `yang_type` under `parent`.
    pub fn add_leaf(&mut self, parent: NodeId, name: &str, yang_type: YangType) -> NodeId {
        let mut node = SchemaNode::new(name, NodeKind::Leaf);
        node.yang_type = Some(yang_type);
        self.add_child(parent, node)
    }

    /// Adds a leaf-list of type `yang_type` under `parent`.
    pub fn add_leaf_list(&mut self, parent: NodeId, name: &str, yang_type: YangType) -> NodeId {
        let mut node = SchemaNode::new(name, NodeKind::LeafList);
        node.yang_type = Some(yang_type);
        self.add_child(parent, node)
    }

    /// Adds a choice under `parent`.
    pub fn add_choice(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add_child(parent, SchemaNode::new(name, NodeKind::Choice))
    }

    /// Adds a case under `parent`.
    pub fn add_case(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add_child(parent, SchemaNode::new(name, NodeKind::Case))
    }

    /// Overrides the defining module of `id`, e.g. for augmented nodes.
    pub fn set_module(&mut self, id: NodeId, module: &str) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.module = Some(module.to_string());
        }
    }

    fn add_child(&mut self, parent: NodeId, mut node: SchemaNode) -> NodeId {
        node.parent = Some(parent);
        if node.module.is_none() {
            node.module = self.nodes.get(parent.0).and_then(|p| p.module.clone());
        }
        let id = self.insert(node);
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    /// Returns the node `id`, if it exists.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SchemaNode> {
        self.nodes.get(id.0)
    }

    /// Returns the node `id` for in-place completion, e.g. when the parser
    /// resolves leafref targets after every node exists.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SchemaNode> {
        self.nodes.get_mut(id.0)
    }

    /// Returns the node `id`.
    ///
    /// # Errors
    /// Returns `SchemaError::DanglingNode` if `id` is not in this tree.
    pub fn node(&self, id: NodeId) -> Result<&SchemaNode, SchemaError> {
        self.get(id).ok_or(SchemaError::DanglingNode { id: id.0 })
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node id in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Returns the data children of `id`, looking through choices and cases.
    ///
    /// # Errors
    /// Returns `SchemaError` if a child id is dangling or the nesting of
    /// choices exceeds [`MAX_SCHEMA_DEPTH`].
    pub fn data_children(&self, id: NodeId) -> Result<Vec<NodeId>, SchemaError> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = self
            .node(id)?
            .children
            .iter()
            .rev()
            .map(|c| (*c, 0))
            .collect();

        while let Some((child, depth)) = stack.pop() {
            if depth > MAX_SCHEMA_DEPTH {
                return Err(SchemaError::CyclicAncestry {
                    node: self.node(id)?.name.clone(),
                });
            }
            let node = self.node(child)?;
            if node.kind.is_transparent() {
                stack.extend(node.children.iter().rev().map(|c| (*c, depth + 1)));
            } else {
                out.push(child);
            }
        }

        Ok(out)
    }

    /// Finds the data child of `id` named `name`.
    ///
    /// # Errors
    /// Returns `SchemaError` if the tree is malformed below `id`.
    pub fn data_child(&self, id: NodeId, name: &str) -> Result<Option<NodeId>, SchemaError> {
        for child in self.data_children(id)? {
            if self.node(child)?.name == name {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// Returns `id` followed by each of its ancestors, up to the root.
    ///
    /// # Errors
    /// Returns `SchemaError::CyclicAncestry` if the chain is longer than
    /// [`MAX_SCHEMA_DEPTH`], or `SchemaError::DanglingNode` on a broken link.
    pub fn ancestry(&self, id: NodeId) -> Result<Vec<NodeId>, SchemaError> {
        let mut chain = vec![id];
        let mut current = self.node(id)?;

        while let Some(parent) = current.parent {
            if chain.len() > MAX_SCHEMA_DEPTH {
                return Err(SchemaError::CyclicAncestry {
                    node: self.node(id)?.name.clone(),
                });
            }
            chain.push(parent);
            current = self.node(parent)?;
        }

        Ok(chain)
    }

    /// Returns the root node at the top of the ancestor chain of `id`.
    ///
    /// # Errors
    /// See [`SchemaTree::ancestry`].
    pub fn root_of(&self, id: NodeId) -> Result<&SchemaNode, SchemaError> {
        let chain = self.ancestry(id)?;
        match chain.last() {
            Some(root) => self.node(*root),
            None => self.node(id),
        }
    }

    /// Returns the data path of `id`, from its root down to the node itself.
    ///
    /// # Errors
    /// See [`SchemaTree::ancestry`].
    pub fn data_path(&self, id: NodeId) -> Result<SchemaPath, SchemaError> {
        let mut segments = Vec::new();
        for node_id in self.ancestry(id)?.into_iter().rev() {
            let node = self.node(node_id)?;
            if !node.kind.is_transparent() {
                segments.push(node.name.clone());
            }
        }
        Ok(SchemaPath::new(segments))
    }
}
