//! Path resolution for generated fields.
//!
//! A field's paths are relative to the directory that owns it: they start at
//! the directory's own name and end at the field. They annotate the generated
//! field and serve as its serialization tags, primary path first.

use crate::error::CodegenError;
use yangen_schema::ir::{Directory, is_wrapper};
use yangen_schema::{NodeId, NodeKind, SchemaPath, SchemaTree};

/// Resolves the paths of `field` inside `directory`.
///
/// Without compression exactly one path is returned, including every
/// intermediate container. With compression, `config` and `state` wrappers
/// are elided; if the field is a list key that also exists directly under
/// the list, the original nested path is returned as a second candidate.
///
/// # Errors
/// Returns `CodegenError::PathResolution` if the directory path has no
/// segment below its module, if the field's ancestor chain does not end at a
/// module, or if the field does not lie below the directory.
pub fn resolve_paths(
    tree: &SchemaTree,
    directory: &Directory,
    field: NodeId,
    compress: bool,
) -> Result<Vec<SchemaPath>, CodegenError> {
    let field_name = tree.node(field)?.name.clone();
    let fail = |reason: &str| CodegenError::path_resolution(&directory.name, &field_name, reason);

    if directory.path.len() < 2 {
        return Err(fail("directory path has no segment below a module"));
    }

    let chain = data_chain(tree, field)?;
    let root = chain.first().copied().unwrap_or(field);
    if tree.node(root)?.kind != NodeKind::Module {
        return Err(fail("ancestor chain does not reach a module"));
    }

    let names = chain
        .iter()
        .map(|id| tree.node(*id).map(|n| n.name.as_str()))
        .collect::<Result<Vec<_>, _>>()?;
    let depth = directory.path.len();
    if names.len() <= depth || !names.starts_with(&segments(&directory.path)) {
        return Err(fail("field does not belong to the directory"));
    }

    // From the directory's own name down to the field.
    let nested: Vec<String> = names[depth - 1..].iter().map(|s| (*s).to_string()).collect();
    if !compress {
        return Ok(vec![SchemaPath::new(nested)]);
    }

    let last = nested.len() - 1;
    let short: Vec<String> = nested
        .iter()
        .enumerate()
        .filter(|(i, s)| *i == 0 || *i == last || !is_wrapper(s))
        .map(|(_, s)| s.clone())
        .collect();

    let mut paths = vec![SchemaPath::new(short.clone())];
    if short != nested && is_duplicated_key(tree, directory, chain[depth - 1], field)? {
        paths.push(SchemaPath::new(nested));
    }
    Ok(paths)
}

/// Renders a resolved path as a `/`-separated tag.
#[must_use]
pub fn render_tag(path: &SchemaPath) -> String {
    path.segments().join("/")
}

fn segments(path: &SchemaPath) -> Vec<&str> {
    path.segments().iter().map(String::as_str).collect()
}

/// Non-transparent ancestors of `id`, root first, ending with `id`.
fn data_chain(tree: &SchemaTree, id: NodeId) -> Result<Vec<NodeId>, CodegenError> {
    let mut chain = Vec::new();
    for node_id in tree.ancestry(id)?.into_iter().rev() {
        if !tree.node(node_id)?.kind.is_transparent() {
            chain.push(node_id);
        }
    }
    Ok(chain)
}

fn is_duplicated_key(
    tree: &SchemaTree,
    directory: &Directory,
    list: NodeId,
    field: NodeId,
) -> Result<bool, CodegenError> {
    let Some(attr) = &directory.list_attr else {
        return Ok(false);
    };
    if !attr.key_elems.contains(&field) {
        return Ok(false);
    }
    let name = &tree.node(field)?.name;
    Ok(tree.data_child(list, name)?.is_some_and(|direct| direct != field))
}
