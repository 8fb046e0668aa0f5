//! Enumeration code generation.
//!
//! Declared enumeration values keep their declaration order. Identity values
//! carry no order, so they are sorted by name (then module) before codes are
//! assigned, which keeps the output stable from one run to the next.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::ident::safe_ident;
use std::collections::{BTreeMap, BTreeSet};
use yangen_core::UNSET_CODE;
use yangen_schema::{EnumSource, EnumValues, Identity};

/// Identifier of the variant holding [`UNSET_CODE`].
pub const UNSET_VARIANT: &str = "UNSET";

/// One row of an enumeration's code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    /// Assigned code, starting at 1.
    pub code: i64,
    /// Name of the value in the schema, unsanitised.
    pub name: String,
    /// Module defining the value (identities only).
    pub module: Option<String>,
}

/// Code generated for one enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumArtifact {
    /// Generated type name.
    pub type_name: String,
    /// Enum definition and trait impls.
    pub definition: String,
    /// Code table, sorted by code.
    pub table: Vec<EnumEntry>,
}

/// Generator for enumerated types.
pub struct EnumGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generates the type and code table of `source`.
    ///
    /// # Errors
    /// Returns `CodegenError::EnumValueCollision` if two values, or a value
    /// and `UNSET`, map to the same identifier.
    pub fn generate(&self, source: &EnumSource) -> Result<EnumArtifact, CodegenError> {
        let type_name = source.type_name();
        let table = assign_codes(&source.values);

        let mut variants = Vec::with_capacity(table.len());
        let mut seen: BTreeMap<String, String> = BTreeMap::new();
        seen.insert(UNSET_VARIANT.to_string(), UNSET_VARIANT.to_string());
        let ambiguous = ambiguous_names(&table);

        for entry in &table {
            let ident = match &entry.module {
                Some(module) if ambiguous.contains(entry.name.as_str()) => {
                    safe_ident(&format!("{}_{}", module, entry.name))
                }
                _ => safe_ident(&entry.name),
            };
            if let Some(first) = seen.insert(ident.clone(), entry.name.clone()) {
                return Err(CodegenError::EnumValueCollision {
                    enum_name: type_name,
                    first,
                    second: entry.name.clone(),
                    ident,
                });
            }
            variants.push(ident);
        }

        let definition = self.generate_definition(&type_name, &source.name, &table, &variants);
        Ok(EnumArtifact {
            type_name,
            definition,
            table,
        })
    }

    fn generate_definition(
        &self,
        type_name: &str,
        source_name: &str,
        table: &[EnumEntry],
        variants: &[String],
    ) -> String {
        let mut output = String::new();
        let runtime = self.config.runtime();

        output.push_str(&format!(
            "/// {} represents the enumerated node {}.\n",
            type_name, source_name
        ));
        output.push_str("///\n");
        output.push_str(&format!(
            "/// `{}` is the default and means the value was never set.\n",
            UNSET_VARIANT
        ));
        output.push_str("#[allow(non_camel_case_types)]\n");
        output.push_str(
            "#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]\n",
        );
        output.push_str("#[repr(i64)]\n");
        output.push_str(&format!("pub enum {} {{\n", type_name));
        output.push_str("    /// Not explicitly set.\n");
        output.push_str("    #[default]\n");
        output.push_str(&format!("    {} = {},\n", UNSET_VARIANT, UNSET_CODE));
        for (entry, variant) in table.iter().zip(variants) {
            match &entry.module {
                Some(module) => output.push_str(&format!(
                    "    /// `{}` from module `{}`.\n",
                    entry.name, module
                )),
                None => output.push_str(&format!("    /// `{}`.\n", entry.name)),
            }
            output.push_str(&format!("    {} = {},\n", variant, entry.code));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl From<{}> for i64 {{\n", type_name));
        output.push_str(&format!("    fn from(value: {}) -> Self {{\n", type_name));
        output.push_str("        value as i64\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&format!("impl TryFrom<i64> for {} {{\n", type_name));
        output.push_str("    type Error = i64;\n\n");
        output.push_str("    fn try_from(code: i64) -> Result<Self, Self::Error> {\n");
        output.push_str("        match code {\n");
        output.push_str(&format!(
            "            {} => Ok(Self::{}),\n",
            UNSET_CODE, UNSET_VARIANT
        ));
        for (entry, variant) in table.iter().zip(variants) {
            output.push_str(&format!(
                "            {} => Ok(Self::{}),\n",
                entry.code, variant
            ));
        }
        output.push_str("            other => Err(other),\n");
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str(&format!(
            "impl {}::SchemaEnum for {} {{\n",
            runtime, type_name
        ));
        output.push_str(&format!(
            "    const TYPE_NAME: &'static str = {:?};\n\n",
            type_name
        ));
        output.push_str(&format!("    fn enum_map() -> {}::EnumMap {{\n", runtime));
        output.push_str(&format!("        {}\n", self.config.enum_map()));
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}

/// Assigns codes `1..=N` to the values of an enumerated type.
#[must_use]
pub fn assign_codes(values: &EnumValues) -> Vec<EnumEntry> {
    match values {
        EnumValues::Ordered(names) => names
            .iter()
            .zip(1..)
            .map(|(name, code)| EnumEntry {
                code,
                name: name.clone(),
                module: None,
            })
            .collect(),
        EnumValues::Identities(identities) => {
            let mut sorted: Vec<&Identity> = identities.iter().collect();
            sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.module.cmp(&b.module)));
            sorted
                .into_iter()
                .zip(1..)
                .map(|(identity, code)| EnumEntry {
                    code,
                    name: identity.name.clone(),
                    module: Some(identity.module.clone()),
                })
                .collect()
        }
    }
}

/// Names shared by identities of different modules.
fn ambiguous_names(table: &[EnumEntry]) -> BTreeSet<&str> {
    let mut seen = BTreeSet::new();
    let mut ambiguous = BTreeSet::new();
    for entry in table {
        if !seen.insert(entry.name.as_str()) {
            ambiguous.insert(entry.name.as_str());
        }
    }
    ambiguous
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identities(names: &[(&str, &str)]) -> EnumSource {
        EnumSource::identities(
            "EnumeratedValue",
            names.iter().map(|(n, m)| Identity::new(*n, *m)).collect(),
        )
    }

    #[test]
    fn test_enum_from_identityref() {
        let config = GeneratorConfig::new();
        let source = identities(&[("VALUE_A", "mod"), ("VALUE_C", "mod2"), ("VALUE_B", "mod3")]);
        let artifact = EnumGenerator::new(&config).generate(&source).expect("enum");

        assert_eq!(artifact.type_name, "E_EnumeratedValue");
        assert!(artifact.definition.contains(
            "    #[default]\n    UNSET = 0,\n    /// `VALUE_A` from module `mod`.\n    VALUE_A = 1,\n"
        ));
        assert!(artifact.definition.contains("    VALUE_B = 2,\n"));
        assert!(artifact.definition.contains("    VALUE_C = 3,\n"));
        assert_eq!(
            artifact.table,
            vec![
                EnumEntry {
                    code: 1,
                    name: "VALUE_A".into(),
                    module: Some("mod".into()),
                },
                EnumEntry {
                    code: 2,
                    name: "VALUE_B".into(),
                    module: Some("mod3".into()),
                },
                EnumEntry {
                    code: 3,
                    name: "VALUE_C".into(),
                    module: Some("mod2".into()),
                },
            ]
        );
    }

    #[test]
    fn test_identity_codes_ignore_input_order() {
        let a = identities(&[("VALUE_A", "m"), ("VALUE_C", "m"), ("VALUE_B", "m")]);
        let b = identities(&[("VALUE_B", "m"), ("VALUE_A", "m"), ("VALUE_C", "m")]);
        assert_eq!(assign_codes(&a.values), assign_codes(&b.values));

        let config = GeneratorConfig::new();
        let generator = EnumGenerator::new(&config);
        assert_eq!(
            generator.generate(&a).expect("a").definition,
            generator.generate(&b).expect("b").definition
        );
    }

    #[test]
    fn test_enum_from_enumeration_sanitises_values() {
        let config = GeneratorConfig::new();
        let source = EnumSource::ordered("EnumeratedValueTwo", &["SPEED_2.5G", "SPEED-40G"]);
        let artifact = EnumGenerator::new(&config).generate(&source).expect("enum");

        assert!(artifact.definition.contains("    /// `SPEED_2.5G`.\n    SPEED_2_5G = 1,\n"));
        assert!(artifact.definition.contains("    SPEED_40G = 2,\n"));
        assert_eq!(artifact.table[0].name, "SPEED_2.5G");
        assert_eq!(artifact.table[1].name, "SPEED-40G");
        assert_eq!(artifact.table[1].module, None);
    }

    #[test]
    fn test_enumeration_keeps_declaration_order() {
        let config = GeneratorConfig::new();
        let source = EnumSource::ordered("Order", &["B", "A"]);
        let artifact = EnumGenerator::new(&config).generate(&source).expect("enum");

        assert!(artifact.definition.contains("    B = 1,\n"));
        assert!(artifact.definition.contains("    A = 2,\n"));
        assert!(artifact.definition.contains("            0 => Ok(Self::UNSET),\n"));
        assert!(artifact.definition.contains("            2 => Ok(Self::A),\n"));
    }

    #[test]
    fn test_trait_impls_use_config() {
        let config = GeneratorConfig::new()
            .runtime_crate("crate::rt")
            .enum_map_name("ALL_ENUMS");
        let source = EnumSource::ordered("BaseModule_Enumeration", &["VALUE_1"]);
        let artifact = EnumGenerator::new(&config).generate(&source).expect("enum");

        assert!(artifact
            .definition
            .contains("impl crate::rt::SchemaEnum for E_BaseModule_Enumeration {"));
        assert!(artifact
            .definition
            .contains("const TYPE_NAME: &'static str = \"E_BaseModule_Enumeration\";"));
        assert!(artifact.definition.contains("        ALL_ENUMS\n"));
        assert!(artifact.definition.contains("impl From<E_BaseModule_Enumeration> for i64 {"));
    }

    #[test]
    fn test_value_collision() {
        let config = GeneratorConfig::new();
        let source = EnumSource::ordered("Speed", &["10.G", "10-G"]);
        let err = EnumGenerator::new(&config).generate(&source).unwrap_err();
        assert!(matches!(err, CodegenError::EnumValueCollision { ref ident, .. } if ident == "_10_G"));

        let source = EnumSource::ordered("Status", &["UNSET"]);
        let err = EnumGenerator::new(&config).generate(&source).unwrap_err();
        assert!(matches!(err, CodegenError::EnumValueCollision { .. }));
    }

    #[test]
    fn test_shared_identity_names_prefixed_by_module() {
        let config = GeneratorConfig::new();
        let source = identities(&[("VALUE_A", "mod2"), ("VALUE_A", "mod"), ("VALUE_B", "mod")]);
        let artifact = EnumGenerator::new(&config).generate(&source).expect("enum");

        assert!(artifact.definition.contains("    mod_VALUE_A = 1,\n"));
        assert!(artifact.definition.contains("    mod2_VALUE_A = 2,\n"));
        assert!(artifact.definition.contains("    VALUE_B = 3,\n"));
    }

    #[test]
    fn test_empty_enumeration() {
        let config = GeneratorConfig::new();
        let source = EnumSource::ordered("Nothing", &[]);
        let artifact = EnumGenerator::new(&config).generate(&source).expect("enum");
        assert!(artifact.table.is_empty());
        assert!(artifact.definition.contains("    UNSET = 0,\n}\n"));
    }
}
