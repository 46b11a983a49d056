//! Catalog file input definitions

use std::path::{
    Path,
    PathBuf,
};

use super::language::{
    detect_language_from_path,
    normalize_language_code,
};
use crate::catalog::{
    Catalog,
    CatalogError,
};
use crate::types::SourceRange;

/// Source ranges of one context object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextRanges {
    /// Range of the `name` value.
    pub name: Option<SourceRange>,
    /// Range of each message object, in file order.
    pub messages: Vec<SourceRange>,
}

/// Source ranges of a catalog file, index-aligned with [`Catalog::contexts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRanges {
    pub contexts: Vec<ContextRanges>,
}

impl CatalogRanges {
    #[must_use]
    pub fn context_name(&self, context_index: usize) -> Option<SourceRange> {
        self.contexts.get(context_index).and_then(|context| context.name)
    }

    #[must_use]
    pub fn message(&self, context_index: usize, message_index: usize) -> Option<SourceRange> {
        self.contexts
            .get(context_index)
            .and_then(|context| context.messages.get(message_index))
            .copied()
    }
}

/// A catalog read from disk together with what diagnostics need to point back into it.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub path: PathBuf,
    /// Normalized language code, `unknown` when neither the catalog nor its path names one.
    pub language: String,
    pub text: String,
    pub catalog: Catalog,
    pub ranges: CatalogRanges,
}

impl LoadedCatalog {
    /// Parses catalog text that was read from `path`.
    ///
    /// # Errors
    /// Returns error if the text is not a valid catalog.
    pub fn from_text(path: impl Into<PathBuf>, text: String) -> Result<Self, CatalogError> {
        let path = path.into();
        let catalog = Catalog::from_json_str(&text)?;
        let ranges = extract_catalog_ranges(&text);
        let language = catalog.language.as_deref().map_or_else(
            || normalize_language_code(&detect_language_from_path(&path)),
            normalize_language_code,
        );

        Ok(Self { path, language, text, catalog, ranges })
    }
}

/// Load a catalog file.
///
/// # Errors
/// Returns error if file read or parse fails.
pub fn load_catalog_file(file_path: &Path) -> Result<LoadedCatalog, CatalogError> {
    tracing::debug!(path = %file_path.display(), "Loading catalog file");
    let text = std::fs::read_to_string(file_path)?;
    LoadedCatalog::from_text(file_path, text)
}

/// Extract context and message source ranges from catalog text using tree-sitter.
///
/// Malformed input yields whatever could be recovered; callers only use the
/// ranges to decorate diagnostics.
#[must_use]
pub fn extract_catalog_ranges(json_text: &str) -> CatalogRanges {
    let mut ranges = CatalogRanges::default();

    let mut parser = tree_sitter::Parser::new();
    let Ok(()) = parser.set_language(&tree_sitter_json::LANGUAGE.into()) else {
        tracing::warn!("Failed to set tree-sitter-json language");
        return ranges;
    };

    let Some(tree) = parser.parse(json_text, None) else {
        tracing::warn!("Failed to parse JSON with tree-sitter");
        return ranges;
    };

    let source = json_text.as_bytes();
    let root = tree.root_node();
    let mut cursor = root.walk();
    let Some(catalog_object) = root.named_children(&mut cursor).find(|n| n.kind() == "object")
    else {
        return ranges;
    };

    let Some(contexts) = object_value(catalog_object, source, "contexts") else {
        return ranges;
    };
    if contexts.kind() != "array" {
        return ranges;
    }

    let mut cursor = contexts.walk();
    for context in contexts.named_children(&mut cursor).filter(|n| n.kind() == "object") {
        let name = object_value(context, source, "name").map(|node| SourceRange::from_node(&node));
        let messages = object_value(context, source, "messages")
            .filter(|node| node.kind() == "array")
            .map(|array| {
                let mut cursor = array.walk();
                array
                    .named_children(&mut cursor)
                    .filter(|n| n.kind() == "object")
                    .map(|n| SourceRange::from_node(&n))
                    .collect()
            })
            .unwrap_or_default();
        ranges.contexts.push(ContextRanges { name, messages });
    }

    ranges
}

/// Returns the value node of the pair named `key` in a JSON object node.
fn object_value<'tree>(
    object: tree_sitter::Node<'tree>,
    source: &[u8],
    key: &str,
) -> Option<tree_sitter::Node<'tree>> {
    let mut cursor = object.walk();
    let pair = object.named_children(&mut cursor).filter(|n| n.kind() == "pair").find(|pair| {
        pair.child_by_field_name("key")
            .and_then(|key_node| key_node.utf8_text(source).ok())
            .is_some_and(|text| text.trim_matches('"') == key)
    })?;
    pair.child_by_field_name("value")
}
