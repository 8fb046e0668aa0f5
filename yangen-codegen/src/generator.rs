//! Generation driver.
//!
//! Runs every struct emission, then every enumeration, then the global
//! lookup table, which needs all enumeration code tables to be complete.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::rust::{EnumArtifact, EnumGenerator, RegistryGenerator, StructArtifact, StructGenerator};
use std::path::Path;
use yangen_schema::{NamingRegistry, SchemaIr, SchemaTree};

/// Output of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCode {
    /// One artifact per directory, in path order.
    pub structs: Vec<StructArtifact>,
    /// One artifact per enumeration, sorted by name.
    pub enums: Vec<EnumArtifact>,
    /// Global enumeration lookup table.
    pub registry: String,
}

impl GeneratedCode {
    /// Concatenates every artifact: structs, enumerations, then the table.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();
        for artifact in &self.structs {
            output.push_str(&artifact.render());
        }
        for artifact in &self.enums {
            output.push_str(&artifact.definition);
        }
        output.push_str(&self.registry);
        output
    }

    /// Writes the rendered code to `path`.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), CodegenError> {
        std::fs::write(path, self.render())?;
        Ok(())
    }
}

/// Code generator for a resolved schema tree.
pub struct Generator<'a> {
    tree: &'a SchemaTree,
    names: &'a NamingRegistry,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default settings.
    #[must_use]
    pub fn new(tree: &'a SchemaTree, names: &'a NamingRegistry) -> Self {
        Self::with_config(tree, names, GeneratorConfig::default())
    }

    /// Creates a new generator with the given settings.
    #[must_use]
    pub fn with_config(
        tree: &'a SchemaTree,
        names: &'a NamingRegistry,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            tree,
            names,
            config,
        }
    }

    /// Returns the settings in use.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates code for every directory and enumeration of the tree.
    ///
    /// Every directory is attempted. Directories that fail produce nothing
    /// and are reported together.
    ///
    /// # Errors
    /// Returns `CodegenError::Directories` if any directory failed, or the
    /// first error of IR construction, enumeration or table generation.
    pub fn generate(&self) -> Result<GeneratedCode, CodegenError> {
        let ir = SchemaIr::build(self.tree, self.names, self.config.is_compressed())?;
        tracing::debug!(
            "Generating {} directories and {} enumerations (compressed: {}, schema snapshot: {})",
            ir.directories.len(),
            ir.enums.len(),
            self.config.is_compressed(),
            self.config.wants_schema_snapshot()
        );

        let structs = StructGenerator::new(self.tree, self.names, &ir.directories, &self.config);
        let mut code = GeneratedCode::default();
        let mut errors = Vec::new();

        for (path, directory) in &ir.directories {
            match structs.generate(directory) {
                Ok(artifact) => {
                    tracing::debug!("Generated struct {} for {}", artifact.name, path);
                    code.structs.push(artifact);
                }
                Err(e) => {
                    tracing::warn!("Failed to generate {} for {}: {}", directory.name, path, e);
                    errors.push(e);
                }
            }
        }

        if !errors.is_empty() {
            return Err(CodegenError::Directories { errors });
        }

        let enums = EnumGenerator::new(&self.config);
        for source in &ir.enums {
            let artifact = enums.generate(source)?;
            tracing::debug!(
                "Generated enumeration {} with {} values",
                artifact.type_name,
                artifact.table.len()
            );
            code.enums.push(artifact);
        }

        code.registry = RegistryGenerator::new(&self.config).generate(&code.enums)?;
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yangen_schema::{TypeKind, YangType};

    fn interfaces() -> (SchemaTree, NamingRegistry) {
        let mut tree = SchemaTree::new();
        let module = tree.add_module("m");
        let interfaces = tree.add_container(module, "interfaces");
        let interface = tree.add_list(interfaces, "interface", &["name"]);
        let config = tree.add_container(interface, "config");
        let name = tree.add_leaf(config, "name", YangType::new(TypeKind::String));
        let state = tree.add_container(interface, "state");
        tree.add_leaf(state, "oper-status", YangType::enumeration(&["UP", "DOWN"]));
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
    fn test_generate_compressed() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let (tree, names) = interfaces();
        let config = GeneratorConfig::new().compress_paths(true);
        let code = Generator::with_config(&tree, &names, config)
            .generate()
            .expect("generate");

        let structs: Vec<&str> = code.structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(structs, vec!["Interfaces", "Interface"]);
        assert_eq!(code.enums.len(), 1);

        let output = code.render();
        assert!(output.contains("pub oper_status: Option<E_Interface_OperStatus>,"));
        assert!(output.contains("pub fn new_interface(&mut self, name: String)"));
        assert!(output.contains("pub enum E_Interface_OperStatus {"));
        assert!(output.contains("pub static ENUM_MAP: ::yangen_core::EnumMap = &["));
    }

    #[test]
    fn test_generate_uncompressed_keeps_wrappers() {
        let (tree, names) = interfaces();
        let code = Generator::new(&tree, &names).generate().expect("generate");

        let structs: Vec<&str> = code.structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            structs,
            vec!["Interfaces", "Interface", "Interface_Config", "Interface_State"]
        );
        assert!(code.render().contains("pub config: Option<Box<Interface_Config>>,"));
    }

    #[test]
    fn test_snapshot_flag_does_not_change_output() {
        let (tree, names) = interfaces();
        let plain = Generator::new(&tree, &names).generate().expect("plain");
        let snapshot = Generator::with_config(
            &tree,
            &names,
            GeneratorConfig::new().generate_schema_snapshot(true),
        )
        .generate()
        .expect("snapshot");
        assert_eq!(plain, snapshot);
    }

    #[test]
    fn test_failed_directories_are_collected() {
        let mut tree = SchemaTree::new();
        let module = tree.add_module("m");
        let a = tree.add_container(module, "a");
        tree.add_leaf(a, "x", YangType::new(TypeKind::Bits));
        let b = tree.add_container(module, "b");
        tree.add_leaf(b, "y", YangType::new(TypeKind::Bits));
        let c = tree.add_container(module, "c");
        tree.add_leaf(c, "z", YangType::new(TypeKind::String));
        let names = NamingRegistry::builder()
            .directory("/m/a", "A")
            .directory("/m/b", "B")
            .directory("/m/c", "C")
            .build();

        let err = Generator::new(&tree, &names).generate().unwrap_err();
        match err {
            CodegenError::Directories { errors } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_union_of_enumerations_generates_each_member() {
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

        let code = Generator::with_config(&tree, &names, GeneratorConfig::new().compress_paths(true))
            .generate()
            .expect("generate");
        let enums: Vec<&str> = code.enums.iter().map(|e| e.type_name.as_str()).collect();
        assert_eq!(enums, vec!["E_C_U_1", "E_C_U_2"]);

        let output = code.render();
        assert!(output.contains("    E_C_U_1(E_C_U_1),\n"));
        assert!(output.contains("    E_C_U_2(E_C_U_2),\n"));
        assert!(output.contains("    A = 1,\n"));
        assert!(output.contains("    C = 1,\n"));
        assert!(output.contains("        \"E_C_U_2\",\n"));
        assert!(output.contains("(2, ::yangen_core::EnumDefinition::named(\"D\")),"));
    }

    #[test]
    fn test_union_keyed_list() {
        let mut tree = SchemaTree::new();
        let module = tree.add_module("m");
        let c = tree.add_container(module, "c");
        let list = tree.add_list(c, "l", &["k"]);
        tree.add_leaf(
            list,
            "k",
            YangType::union(vec![
                YangType::new(TypeKind::Uint32),
                YangType::new(TypeKind::String),
            ]),
        );
        let names = NamingRegistry::builder()
            .directory("/m/c", "C")
            .directory("/m/c/l", "C_L")
            .build();

        let code = Generator::with_config(&tree, &names, GeneratorConfig::new().compress_paths(true))
            .generate()
            .expect("generate");
        let output = code.render();
        assert!(output.contains("pub l: ::std::collections::BTreeMap<C_L_K_Union, C_L>,"));
        assert!(output.contains("pub enum C_L_K_Union {"));
    }

    #[test]
    fn test_write_to_file() {
        let (tree, names) = interfaces();
        let code = Generator::new(&tree, &names).generate().expect("generate");

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("generated.rs");
        code.write_to_file(&path).expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), code.render());
    }
}
