//! Identifier helpers for generated code.

use yangen_schema::ir::{to_pascal_case, to_snake_case};

/// Makes `name` usable as a Rust identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_` and a leading digit gets a
/// `_` prefix. Keywords become raw identifiers, except those that cannot be
/// raw, which get a trailing `_`.
#[must_use]
pub fn safe_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if ident == "_" {
        ident.push('_');
    }

    match ident.as_str() {
        "self" | "Self" | "super" | "crate" => format!("{}_", ident),
        // Reserved since edition 2024 but still a plain identifier to syn.
        "gen" => format!("r#{}", ident),
        _ if syn::parse_str::<syn::Ident>(&ident).is_ok() => ident,
        _ => format!("r#{}", ident),
    }
}

/// Returns the field or parameter identifier for schema name `name`.
#[must_use]
pub fn field_ident(name: &str) -> String {
    safe_ident(&to_snake_case(name))
}

/// Returns the PascalCase form of `name` used in type names.
#[must_use]
pub fn type_segment(name: &str) -> String {
    safe_ident(&to_pascal_case(name))
}
