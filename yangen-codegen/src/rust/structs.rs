//! Struct code generation.
//!
//! One struct is generated per directory. List fields become ordered maps
//! when the list is keyed, with a composite key struct when it has more than
//! one key leaf, and a `new_<list>` constructor that refuses duplicate keys.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::ident::{field_ident, safe_ident, type_segment};
use crate::paths::{render_tag, resolve_paths};
use crate::rust::unions::{UnionGenerator, is_orderable, union_type_name};
use std::collections::BTreeMap;
use yangen_schema::ir::{Directory, to_snake_case};
use yangen_schema::{
    MappedType, NamingRegistry, NodeId, NodeKind, SchemaError, SchemaPath, SchemaTree, TypeMapper,
};

/// Code generated for one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructArtifact {
    /// Generated struct name.
    pub name: String,
    /// Struct definition and its `SchemaRecord` impl.
    pub definition: String,
    /// Composite key structs, one per multi-key list field.
    pub key_records: Vec<String>,
    /// Inherent impl with `validate` and the list constructors.
    pub accessors: String,
    /// Union variant families, one per union-typed field.
    pub unions: Vec<String>,
}

impl StructArtifact {
    /// Concatenates every generated item.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.definition);
        output.push_str(&self.accessors);
        for key in &self.key_records {
            output.push_str(key);
        }
        for union in &self.unions {
            output.push_str(union);
        }
        output
    }
}

/// One key leaf of a keyed list.
#[derive(Debug, Clone)]
struct KeyField {
    name: String,
    ident: String,
    rust_type: String,
    copy: bool,
}

/// One field of the generated struct.
#[derive(Debug, Clone)]
struct FieldDef {
    name: String,
    ident: String,
    rust_type: String,
    paths: Vec<String>,
}

/// Generator for directory structs.
pub struct StructGenerator<'a> {
    tree: &'a SchemaTree,
    names: &'a NamingRegistry,
    available: &'a BTreeMap<SchemaPath, Directory>,
    config: &'a GeneratorConfig,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator.
    ///
    /// `available` holds every directory a field may reference.
    #[must_use]
    pub fn new(
        tree: &'a SchemaTree,
        names: &'a NamingRegistry,
        available: &'a BTreeMap<SchemaPath, Directory>,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            tree,
            names,
            available,
            config,
        }
    }

    /// Generates the struct and associated items for `directory`.
    ///
    /// # Errors
    /// Returns `CodegenError` if a field path cannot be resolved, a
    /// referenced directory is missing, a key type is not orderable, two
    /// fields share an identifier, or a leaf type cannot be mapped. Nothing
    /// is produced for the directory in that case.
    pub fn generate(&self, directory: &Directory) -> Result<StructArtifact, CodegenError> {
        if directory.path.len() < 2 {
            return Err(CodegenError::path_resolution(
                &directory.name,
                directory.path.to_string(),
                "directory path has no segment below a module",
            ));
        }

        let mapper = TypeMapper::new(self.tree, self.names);
        let compress = self.config.is_compressed();
        let mut artifact = StructArtifact {
            name: directory.name.clone(),
            ..StructArtifact::default()
        };
        let mut fields = Vec::with_capacity(directory.fields.len());
        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        let mut constructors = String::new();

        for (name, &id) in &directory.fields {
            let ident = field_ident(name);
            if let Some(first) = seen.insert(ident.clone(), name) {
                return Err(CodegenError::DuplicateField {
                    directory: directory.name.clone(),
                    first: first.to_string(),
                    second: name.clone(),
                    ident,
                });
            }

            let paths = resolve_paths(self.tree, directory, id, compress)?;
            let node = self.tree.node(id)?;
            let rust_type = match node.kind {
                NodeKind::Leaf | NodeKind::LeafList => {
                    let inner = match mapper.map_leaf(id)? {
                        MappedType::Native(native) => native.rust_type().into_owned(),
                        MappedType::Union(branches) => {
                            let union_name = union_type_name(
                                &directory.name,
                                name,
                                &self.tree.data_path(id)?,
                                compress,
                            );
                            artifact.unions.push(
                                UnionGenerator::new(
                                    &union_name,
                                    name,
                                    &branches,
                                    self.config.runtime(),
                                )
                                .generate(),
                            );
                            union_name
                        }
                    };
                    if node.kind == NodeKind::Leaf {
                        format!("Option<{}>", inner)
                    } else {
                        format!("Vec<{}>", inner)
                    }
                }
                NodeKind::Container => {
                    let child = self.child_directory(directory, name, id)?;
                    format!("Option<Box<{}>>", child.name)
                }
                NodeKind::List => {
                    let child = self.child_directory(directory, name, id)?;
                    self.list_field(directory, name, &ident, child, &mut artifact, &mut constructors)?
                }
                other => {
                    return Err(
                        SchemaError::unsupported(name.clone(), format!("{:?} field", other)).into(),
                    );
                }
            };

            fields.push(FieldDef {
                name: name.clone(),
                ident,
                rust_type,
                paths: paths.iter().map(render_tag).collect(),
            });
        }

        artifact.definition = self.generate_definition(directory, &fields);
        artifact.accessors = self.generate_accessors(directory, &constructors);
        Ok(artifact)
    }

    fn child_directory(
        &self,
        directory: &Directory,
        field: &str,
        id: NodeId,
    ) -> Result<&'a Directory, CodegenError> {
        let path = self.tree.data_path(id)?;
        self.available
            .get(&path)
            .ok_or_else(|| CodegenError::MissingReference {
                directory: directory.name.clone(),
                field: field.to_string(),
                path: path.to_string(),
            })
    }

    fn list_field(
        &self,
        directory: &Directory,
        field: &str,
        ident: &str,
        elem: &Directory,
        artifact: &mut StructArtifact,
        constructors: &mut String,
    ) -> Result<String, CodegenError> {
        let Some(attr) = elem.list_attr.as_ref().filter(|a| !a.key_elems.is_empty()) else {
            return Ok(format!("Vec<{}>", elem.name));
        };

        let mut keys = Vec::with_capacity(attr.key_elems.len());
        for key_elem in &attr.key_elems {
            let key_name = self.tree.node(*key_elem)?.name.clone();
            let (rust_type, copy) = match attr.keys.get(&key_name) {
                Some(MappedType::Native(native)) if native.is_ordered() => {
                    (native.rust_type().into_owned(), native.is_copy())
                }
                Some(MappedType::Native(native)) => {
                    return Err(CodegenError::unsupported_key(field, key_name, native.label()));
                }
                // Same name the element's own struct gives the key leaf's union.
                Some(MappedType::Union(branches)) if is_orderable(branches) => {
                    let union_name = union_type_name(
                        &elem.name,
                        &key_name,
                        &self.tree.data_path(*key_elem)?,
                        self.config.is_compressed(),
                    );
                    (union_name, false)
                }
                Some(MappedType::Union(_)) => {
                    return Err(CodegenError::unsupported_key(field, key_name, "union"));
                }
                None => {
                    return Err(SchemaError::UnknownKey {
                        list: field.to_string(),
                        key: key_name,
                    }
                    .into());
                }
            };
            keys.push(KeyField {
                ident: field_ident(&key_name),
                name: key_name,
                rust_type,
                copy,
            });
        }

        let key_type = match keys.as_slice() {
            [single] => single.rust_type.clone(),
            _ => {
                let key_name = format!("{}_{}_Key", directory.name, type_segment(field));
                artifact
                    .key_records
                    .push(self.generate_key_record(&key_name, directory, field, &keys));
                key_name
            }
        };

        constructors.push_str(&self.generate_constructor(field, ident, &elem.name, &key_type, &keys));
        Ok(format!(
            "::std::collections::BTreeMap<{}, {}>",
            key_type, elem.name
        ))
    }

    /// Generates the struct definition and its `SchemaRecord` impl.
    fn generate_definition(&self, directory: &Directory, fields: &[FieldDef]) -> String {
        let mut output = String::new();
        let name = &directory.name;
        let runtime = self.config.runtime();

        output.push_str(&format!(
            "/// {} represents the {} directory.\n",
            name, directory.path
        ));
        output.push_str("#[allow(non_camel_case_types)]\n");
        output.push_str("#[derive(Debug, Clone, Default, PartialEq)]\n");
        output.push_str(&format!("pub struct {} {{\n", name));
        for field in fields {
            output.push_str(&format!("    /// Path: `{}`.\n", field.paths.join("`, `")));
            output.push_str(&format!("    pub {}: {},\n", field.ident, field.rust_type));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl {}::SchemaRecord for {} {{\n", runtime, name));
        output.push_str("    fn schema_name(&self) -> &'static str {\n");
        output.push_str(&format!("        {:?}\n", name));
        output.push_str("    }\n\n");
        output.push_str(&format!(
            "    fn field_paths(&self) -> &'static [{}::FieldPath] {{\n",
            runtime
        ));
        output.push_str(&format!("        const PATHS: &[{}::FieldPath] = &[\n", runtime));
        for field in fields {
            let tags: Vec<String> = field.paths.iter().map(|p| format!("{:?}", p)).collect();
            output.push_str(&format!(
                "            {}::FieldPath::new({:?}, &[{}]),\n",
                runtime,
                field.name,
                tags.join(", ")
            ));
        }
        output.push_str("        ];\n");
        output.push_str("        PATHS\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }

    /// Generates the inherent impl holding `validate` and the constructors.
    fn generate_accessors(&self, directory: &Directory, constructors: &str) -> String {
        let mut output = String::new();
        let name = &directory.name;
        let runtime = self.config.runtime();

        output.push_str(&format!("impl {} {{\n", name));
        output.push_str(&format!(
            "    /// Validates the record against the schema entry `{}`.\n",
            name
        ));
        output.push_str("    ///\n");
        output.push_str("    /// # Errors\n");
        output.push_str("    /// Returns the installed validator's error.\n");
        output.push_str(&format!(
            "    pub fn validate(&self) -> Result<(), {}::ValidationError> {{\n",
            runtime
        ));
        output.push_str(&format!("        {}::validate({:?}, self)\n", runtime, name));
        output.push_str("    }\n");
        output.push_str(constructors);
        output.push_str("}\n\n");

        output
    }

    /// Generates a composite key struct, fields in key declaration order.
    fn generate_key_record(
        &self,
        key_name: &str,
        directory: &Directory,
        field: &str,
        keys: &[KeyField],
    ) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "/// Key of the `{}` list of {}.\n",
            field, directory.name
        ));
        output.push_str("#[allow(non_camel_case_types)]\n");
        output.push_str("#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]\n");
        output.push_str(&format!("pub struct {} {{\n", key_name));
        for key in keys {
            output.push_str(&format!("    /// `{}` key leaf.\n", key.name));
            output.push_str(&format!("    pub {}: {},\n", key.ident, key.rust_type));
        }
        output.push_str("}\n\n");

        output
    }

    /// Generates `new_<list>`, parameters in key declaration order.
    fn generate_constructor(
        &self,
        field: &str,
        ident: &str,
        elem: &str,
        key_type: &str,
        keys: &[KeyField],
    ) -> String {
        let mut output = String::new();
        let runtime = self.config.runtime();
        let method = safe_ident(&format!("new_{}", to_snake_case(field)));
        let params: Vec<String> = keys
            .iter()
            .map(|k| format!("{}: {}", k.ident, k.rust_type))
            .collect();
        let copy_of = |key: &KeyField| {
            if key.copy {
                key.ident.clone()
            } else {
                format!("{}.clone()", key.ident)
            }
        };

        output.push('\n');
        output.push_str(&format!("    /// Creates a new entry in the `{}` list.\n", field));
        output.push_str("    ///\n");
        output.push_str(
            "    /// The key leaves of the entry are set from the arguments, every other\n",
        );
        output.push_str("    /// field is left at its default.\n");
        output.push_str("    ///\n");
        output.push_str("    /// # Errors\n");
        output.push_str("    /// Returns `DuplicateKeyError` if an entry with the same key exists.\n");
        output.push_str(&format!(
            "    pub fn {}(&mut self, {}) -> Result<&mut {}, {}::DuplicateKeyError> {{\n",
            method,
            params.join(", "),
            elem,
            runtime
        ));

        match keys {
            [single] => {
                output.push_str(&format!("        let __key = {};\n", copy_of(single)));
            }
            _ => {
                let members: Vec<String> = keys
                    .iter()
                    .map(|k| format!("{}: {}", k.ident, copy_of(k)))
                    .collect();
                output.push_str(&format!(
                    "        let __key = {} {{ {} }};\n",
                    key_type,
                    members.join(", ")
                ));
            }
        }

        output.push_str(&format!("        match self.{}.entry(__key) {{\n", ident));
        output.push_str("            ::std::collections::btree_map::Entry::Occupied(__slot) => Err(\n");
        output.push_str(&format!(
            "                {}::DuplicateKeyError::new({:?}, format!(\"{{:?}}\", __slot.key())),\n",
            runtime, field
        ));
        output.push_str("            ),\n");
        output.push_str("            ::std::collections::btree_map::Entry::Vacant(__slot) => {\n");
        output.push_str(&format!(
            "                let __element = __slot.insert({}::default());\n",
            elem
        ));
        for key in keys {
            output.push_str(&format!(
                "                __element.{} = Some({});\n",
                key.ident, key.ident
            ));
        }
        output.push_str("                Ok(__element)\n");
        output.push_str("            }\n");
        output.push_str("        }\n");
        output.push_str("    }\n");

        output
    }
}
