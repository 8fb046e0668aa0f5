//! Union variant family code generation.
//!
//! Each union-typed field gets its own enum with one variant per distinct
//! branch type, in declaration order, and a `from_any` converter that tries
//! the branches in that same order.

use crate::ident::type_segment;
use yangen_schema::{NativeType, SchemaPath};

/// Returns the name of the union type of field `field` in `directory`.
///
/// With compression the name is scoped by the directory's generated name.
/// Without it every segment of the field's data path contributes, so that
/// the name stays unique across the wrappers kept in that mode.
#[must_use]
pub fn union_type_name(directory: &str, field: &str, data_path: &SchemaPath, compress: bool) -> String {
    if compress {
        return format!("{}_{}_Union", directory, type_segment(field));
    }
    let mut name: Vec<String> = data_path.segments().iter().map(|s| type_segment(s)).collect();
    name.push("Union".to_string());
    name.join("_")
}

/// Returns true if a union of `branches` can key an ordered map.
#[must_use]
pub fn is_orderable(branches: &[NativeType]) -> bool {
    branches.iter().all(NativeType::is_ordered)
}

/// Generator for one union variant family.
pub struct UnionGenerator<'a> {
    name: &'a str,
    field: &'a str,
    branches: &'a [NativeType],
    runtime: &'a str,
}

impl<'a> UnionGenerator<'a> {
    /// Creates a union generator.
    #[must_use]
    pub fn new(name: &'a str, field: &'a str, branches: &'a [NativeType], runtime: &'a str) -> Self {
        Self {
            name,
            field,
            branches,
            runtime,
        }
    }

    /// Generates the enum, its converter and the `From` impls.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let name = self.name;

        output.push_str(&format!("/// Union type of the `{}` leaf.\n", self.field));
        output.push_str("#[allow(non_camel_case_types)]\n");
        if is_orderable(self.branches) {
            output.push_str("#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]\n");
        } else {
            output.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        }
        output.push_str(&format!("pub enum {} {{\n", name));
        for branch in self.branches {
            output.push_str(&format!("    /// `{}` branch.\n", branch.label()));
            output.push_str(&format!(
                "    {}({}),\n",
                branch.variant_name(),
                branch.rust_type()
            ));
        }
        output.push_str("}\n\n");

        output.push_str(&format!("impl {} {{\n", name));
        output.push_str("    /// Branch types, in the order `from_any` tries them.\n");
        let accepted: Vec<String> = self
            .branches
            .iter()
            .map(|b| format!("{:?}", b.label()))
            .collect();
        output.push_str(&format!(
            "    pub const ACCEPTED: &'static [&'static str] = &[{}];\n\n",
            accepted.join(", ")
        ));

        output.push_str("    /// Converts a dynamically typed value, trying branches in order.\n");
        output.push_str("    ///\n");
        output.push_str("    /// # Errors\n");
        output.push_str("    /// Returns `UnionConversionError` if no branch accepts the value.\n");
        output.push_str(&format!(
            "    pub fn from_any(value: &dyn ::std::any::Any) -> Result<Self, {}::UnionConversionError> {{\n",
            self.runtime
        ));
        for branch in self.branches {
            output.push_str(&self.generate_branch_match(branch));
        }
        output.push_str(&format!(
            "        Err({}::UnionConversionError::new({:?}, Self::ACCEPTED))\n",
            self.runtime, name
        ));
        output.push_str("    }\n");
        output.push_str("}\n\n");

        for branch in self.branches {
            let rust_type = branch.rust_type();
            output.push_str(&format!("impl From<{}> for {} {{\n", rust_type, name));
            output.push_str(&format!("    fn from(value: {}) -> Self {{\n", rust_type));
            output.push_str(&format!("        Self::{}(value)\n", branch.variant_name()));
            output.push_str("    }\n");
            output.push_str("}\n\n");
        }

        output
    }

    fn generate_branch_match(&self, branch: &NativeType) -> String {
        let mut output = String::new();
        let variant = branch.variant_name();
        let value = if branch.is_copy() { "*v" } else { "v.clone()" };

        output.push_str(&format!(
            "        if let Some(v) = value.downcast_ref::<{}>() {{\n",
            branch.rust_type()
        ));
        output.push_str(&format!("            return Ok(Self::{}({}));\n", variant, value));
        output.push_str("        }\n");

        if *branch == NativeType::String {
            output.push_str("        if let Some(v) = value.downcast_ref::<&'static str>() {\n");
            output.push_str(&format!(
                "            return Ok(Self::{}((*v).to_string()));\n",
                variant
            ));
            output.push_str("        }\n");
        }

        output
    }
}
