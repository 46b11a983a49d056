//! Lookup across several translators in priority order.

use std::sync::Arc;

use super::Translator;
use crate::input::LoadedCatalog;
use crate::input::language::{
    normalize_language_code,
    primary_subtag,
};
use crate::markers::replace_count;

/// Ordered list of translators. The first one knowing a message answers.
#[derive(Debug, Clone, Default)]
pub struct TranslatorChain {
    /// Highest priority first
    translators: Vec<Arc<Translator>>,
}

impl TranslatorChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a translator with lower priority than the ones already present.
    pub fn push(&mut self, translator: Arc<Translator>) {
        self.translators.push(translator);
    }

    /// Inserts a translator with the highest priority.
    pub fn install(&mut self, translator: Arc<Translator>) {
        self.translators.insert(0, translator);
    }

    /// Builds a chain for `language` out of loaded catalogs.
    ///
    /// Catalogs of the exact language come first (`uk_UA`), then catalogs of the
    /// primary subtag (`uk`). Within a language the given order is kept.
    #[must_use]
    pub fn for_language(catalogs: &[LoadedCatalog], language: &str) -> Self {
        let exact = normalize_language_code(language);
        let primary = primary_subtag(&exact).to_string();
        let mut candidates = vec![exact];
        if !candidates.contains(&primary) {
            candidates.push(primary);
        }

        let mut chain = Self::new();
        for candidate in &candidates {
            for loaded in catalogs.iter().filter(|loaded| &loaded.language == candidate) {
                tracing::debug!(path = %loaded.path.display(), %candidate, "Adding catalog to chain");
                chain.push(Arc::new(Translator::from_loaded(loaded)));
            }
        }
        chain
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.translators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    #[must_use]
    pub fn translators(&self) -> &[Arc<Translator>] {
        &self.translators
    }

    #[must_use]
    pub fn find(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&str> {
        self.translators.iter().find_map(|translator| translator.find(context, source, comment))
    }

    #[must_use]
    pub fn tr<'a>(&'a self, context: &str, source: &'a str, comment: Option<&str>) -> &'a str {
        self.find(context, source, comment).unwrap_or(source)
    }

    /// Each translator applies its own plural rule.
    #[must_use]
    pub fn find_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        n: i64,
    ) -> Option<&str> {
        self.translators
            .iter()
            .find_map(|translator| translator.find_plural(context, source, comment, n))
    }

    #[must_use]
    pub fn tr_plural(&self, context: &str, source: &str, comment: Option<&str>, n: i64) -> String {
        replace_count(self.find_plural(context, source, comment, n).unwrap_or(source), n)
    }
}
