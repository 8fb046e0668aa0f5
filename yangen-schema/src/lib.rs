//! # Yangen Schema
//!
//! Resolved YANG schema tree and the intermediate representation built on it.
//!
//! This crate provides:
//! - The read-only schema tree handed over by the parser
//! - Native and mapped type descriptors
//! - Type mapping with union flattening
//! - The naming registry snapshot
//! - Intermediate representation for code generation

pub mod error;
pub mod ir;
pub mod mapper;
pub mod naming;
pub mod tree;
pub mod types;

pub use error::SchemaError;
pub use ir::{Directory, EnumSource, EnumValues, ListAttr, SchemaIr};
pub use mapper::{TypeMapper, enum_type_name, member_enum_name};
pub use naming::{NamingRegistry, NamingRegistryBuilder};
pub use tree::{
    Identity, IdentityBase, MAX_SCHEMA_DEPTH, NodeId, NodeKind, SchemaNode, SchemaPath,
    SchemaTree, TypeKind, YangType,
};
pub use types::{MappedType, NativeType};
