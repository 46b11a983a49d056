//! Runtime lookup over one catalog.

use std::collections::HashMap;

use super::plural::PluralRule;
use crate::catalog::{
    Catalog,
    Translation,
};
use crate::input::LoadedCatalog;
use crate::markers::replace_count;

/// One finished translation of a source text.
#[derive(Debug, Clone)]
struct Entry {
    /// Disambiguation comment
    comment: Option<String>,
    /// Finished text
    translation: Translation,
}

/// Read-only lookup index built from a catalog.
///
/// Only finished messages with complete text are indexed; everything else
/// falls back to the source string.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    /// Normalized catalog language
    language: Option<String>,
    /// Rule picking numerus forms
    plural_rule: PluralRule,
    /// context -> source -> entries differing by disambiguation
    contexts: HashMap<String, HashMap<String, Vec<Entry>>>,
    /// Number of indexed messages
    len: usize,
}

impl Translator {
    /// Builds a translator for the catalog's own `language` field.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self::build(catalog, catalog.language.as_deref())
    }

    /// Builds a translator for an explicitly known language.
    #[must_use]
    pub fn with_language(catalog: &Catalog, language: &str) -> Self {
        Self::build(catalog, Some(language))
    }

    /// Builds a translator for a loaded catalog file, using its detected language.
    #[must_use]
    pub fn from_loaded(loaded: &LoadedCatalog) -> Self {
        Self::with_language(&loaded.catalog, &loaded.language)
    }

    /// Indexes the finished messages of `catalog`.
    fn build(catalog: &Catalog, language: Option<&str>) -> Self {
        let mut translator = Self {
            language: language.map(str::to_string),
            plural_rule: language.map(PluralRule::for_language).unwrap_or_default(),
            ..Self::default()
        };

        for (context, message) in catalog.messages() {
            if !message.status.is_finished() || message.translation.has_empty_form() {
                continue;
            }

            let entries = translator
                .contexts
                .entry(context.name.clone())
                .or_default()
                .entry(message.source.clone())
                .or_default();

            // The first definition of a key wins.
            if entries.iter().any(|entry| entry.comment == message.comment) {
                continue;
            }
            entries.push(Entry {
                comment: message.comment.clone(),
                translation: message.translation.clone(),
            });
            translator.len += 1;
        }

        tracing::debug!(
            language = translator.language.as_deref().unwrap_or("unknown"),
            entries = translator.len,
            "Built translator"
        );
        translator
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[must_use]
    pub const fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    /// Number of usable translations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exact key first; a disambiguated lookup then retries without the comment.
    fn entry(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Translation> {
        let entries = self.contexts.get(context)?.get(source)?;
        entries
            .iter()
            .find(|entry| entry.comment.as_deref() == comment)
            .or_else(|| {
                comment.and_then(|_| entries.iter().find(|entry| entry.comment.is_none()))
            })
            .map(|entry| &entry.translation)
    }

    /// Returns the finished translation, if any.
    ///
    /// Numerus messages answer with their first form.
    #[must_use]
    pub fn find(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&str> {
        self.entry(context, source, comment).map(Translation::first)
    }

    /// Returns the finished translation or the source string itself.
    #[must_use]
    pub fn tr<'a>(&'a self, context: &str, source: &'a str, comment: Option<&str>) -> &'a str {
        self.find(context, source, comment).unwrap_or(source)
    }

    /// Returns the plural form for `n`, without replacing the count marker.
    ///
    /// Translations with fewer forms than the rule needs use their last form.
    #[must_use]
    pub fn find_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        n: i64,
    ) -> Option<&str> {
        let forms = self.entry(context, source, comment)?.forms();
        let index = self.plural_rule.form_index(n).min(forms.len().saturating_sub(1));
        forms.get(index).map(String::as_str)
    }

    /// Returns the plural form for `n` (or the source) with `%n` replaced by `n`.
    #[must_use]
    pub fn tr_plural(&self, context: &str, source: &str, comment: Option<&str>, n: i64) -> String {
        replace_count(self.find_plural(context, source, comment, n).unwrap_or(source), n)
    }
}
