//! Global enumeration lookup table generation.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::rust::enums::EnumArtifact;
use std::collections::BTreeMap;

/// Generator for the table mapping every enumeration code to its metadata.
pub struct RegistryGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> RegistryGenerator<'a> {
    /// Creates a new registry generator.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generates the table from the code tables of `enums`.
    ///
    /// Entries are sorted by type name and then by code, whatever the order
    /// of `enums`, so the runtime can binary search both levels.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateEnum` if two artifacts share a type name.
    pub fn generate(&self, enums: &[EnumArtifact]) -> Result<String, CodegenError> {
        let mut sorted: BTreeMap<&str, &EnumArtifact> = BTreeMap::new();
        for artifact in enums {
            if sorted.insert(&artifact.type_name, artifact).is_some() {
                return Err(CodegenError::DuplicateEnum(artifact.type_name.clone()));
            }
        }

        let mut output = String::new();
        let runtime = self.config.runtime();

        output.push_str(&format!(
            "/// {} maps the name of every generated enumeration to its code table,\n",
            self.config.enum_map()
        ));
        output.push_str("/// which gives the schema name (and defining module, for identities)\n");
        output.push_str("/// of each code. Both levels are sorted for binary search.\n");
        output.push_str(&format!(
            "pub static {}: {}::EnumMap = &[\n",
            self.config.enum_map(),
            runtime
        ));
        for (type_name, artifact) in &sorted {
            let mut table = artifact.table.clone();
            table.sort_by_key(|e| e.code);

            output.push_str("    (\n");
            output.push_str(&format!("        {:?},\n", type_name));
            output.push_str("        &[\n");
            for entry in &table {
                let definition = match &entry.module {
                    Some(module) => format!(
                        "{}::EnumDefinition::with_module({:?}, {:?})",
                        runtime, entry.name, module
                    ),
                    None => format!("{}::EnumDefinition::named({:?})", runtime, entry.name),
                };
                output.push_str(&format!("            ({}, {}),\n", entry.code, definition));
            }
            output.push_str("        ],\n");
            output.push_str("    ),\n");
        }
        output.push_str("];\n");

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rust::enums::EnumEntry;

    fn artifact(type_name: &str, values: &[(i64, &str)]) -> EnumArtifact {
        EnumArtifact {
            type_name: type_name.to_string(),
            definition: String::new(),
            table: values
                .iter()
                .map(|(code, name)| EnumEntry {
                    code: *code,
                    name: (*name).to_string(),
                    module: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_simple_map() {
        let config = GeneratorConfig::new();
        let output = RegistryGenerator::new(&config)
            .generate(&[artifact("E_EnumOne", &[(1, "VAL1"), (2, "VAL2")])])
            .expect("registry");

        let expected = "pub static ENUM_MAP: ::yangen_core::EnumMap = &[
    (
        \"E_EnumOne\",
        &[
            (1, ::yangen_core::EnumDefinition::named(\"VAL1\")),
            (2, ::yangen_core::EnumDefinition::named(\"VAL2\")),
        ],
    ),
];
";
        assert!(output.ends_with(expected));
    }

    #[test]
    fn test_multiple_enums_sorted() {
        let config = GeneratorConfig::new();
        let generator = RegistryGenerator::new(&config);
        let one = artifact("E_EnumOne", &[(2, "VAL2"), (1, "VAL1")]);
        let two = artifact("E_EnumTwo", &[(1, "VAL42"), (2, "VAL43")]);

        let forward = generator
            .generate(&[one.clone(), two.clone()])
            .expect("registry");
        let backward = generator.generate(&[two, one]).expect("registry");
        assert_eq!(forward, backward);

        let first = forward.find("\"E_EnumOne\"").expect("one");
        let second = forward.find("\"E_EnumTwo\"").expect("two");
        assert!(first < second);
        let val1 = forward.find("\"VAL1\"").expect("val1");
        let val2 = forward.find("\"VAL2\"").expect("val2");
        assert!(val1 < val2);
    }

    #[test]
    fn test_identity_entries_carry_module() {
        let config = GeneratorConfig::new().enum_map_name("IDENTITIES");
        let mut identity = artifact("E_Base", &[(1, "VALUE_A")]);
        identity.table[0].module = Some("mod".into());

        let output = RegistryGenerator::new(&config)
            .generate(&[identity])
            .expect("registry");
        assert!(output.contains("pub static IDENTITIES: ::yangen_core::EnumMap = &["));
        assert!(output.contains(
            "(1, ::yangen_core::EnumDefinition::with_module(\"VALUE_A\", \"mod\")),"
        ));
    }

    #[test]
    fn test_duplicate_enum() {
        let config = GeneratorConfig::new();
        let err = RegistryGenerator::new(&config)
            .generate(&[artifact("E_A", &[]), artifact("E_A", &[])])
            .unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateEnum(ref name) if name == "E_A"));
    }
}
