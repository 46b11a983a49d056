//! Catalog data model and its JSON form.

use std::collections::HashSet;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use super::CatalogError;

/// Completion state of a message.
///
/// A message without an explicit status is finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    #[default]
    Finished,
    Unfinished,
    /// The source text disappeared from the application but a translation existed.
    Obsolete,
    /// The source text disappeared before it was ever translated.
    Vanished,
}

impl TranslationStatus {
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Returns true for messages the application can still ask for.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Finished | Self::Unfinished)
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Finished => "finished",
            Self::Unfinished => "unfinished",
            Self::Obsolete => "obsolete",
            Self::Vanished => "vanished",
        })
    }
}

/// Translated text of a message.
///
/// Numerus messages carry one string per plural form of the target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Translation {
    Single(String),
    Numerus(Vec<String>),
}

impl Default for Translation {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl Translation {
    /// Returns true for an empty single translation, which is omitted when serializing.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Single(text) if text.is_empty())
    }

    #[must_use]
    pub const fn is_numerus(&self) -> bool {
        matches!(self, Self::Numerus(_))
    }

    /// Returns true if there is no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms().iter().all(String::is_empty)
    }

    /// Returns true if the text, or any plural form, is missing.
    #[must_use]
    pub fn has_empty_form(&self) -> bool {
        let forms = self.forms();
        forms.is_empty() || forms.iter().any(String::is_empty)
    }

    /// All forms; a single translation is one form.
    #[must_use]
    pub fn forms(&self) -> &[String] {
        match self {
            Self::Single(text) => std::slice::from_ref(text),
            Self::Numerus(forms) => forms,
        }
    }

    /// The single text, or the first plural form.
    #[must_use]
    pub fn first(&self) -> &str {
        self.forms().first().map_or("", String::as_str)
    }
}

impl From<&str> for Translation {
    fn from(text: &str) -> Self {
        Self::Single(text.to_string())
    }
}

/// One translatable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Message {
    /// Original UI text, the lookup key within its context.
    pub source: String,

    /// Disambiguation, part of the lookup key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Note from the developer to the translator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,

    /// Note from the translator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,

    #[serde(default, skip_serializing_if = "Translation::is_default")]
    pub translation: Translation,

    #[serde(default, skip_serializing_if = "TranslationStatus::is_finished")]
    pub status: TranslationStatus,
}

impl Message {
    /// Creates a finished message with an empty translation.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_translation(mut self, translation: impl Into<Translation>) -> Self {
        self.translation = translation.into();
        self
    }

    #[must_use]
    pub fn with_forms<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.translation = Translation::Numerus(forms.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: TranslationStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the (source, disambiguation) pair identifying the message in its context.
    #[must_use]
    pub fn key(&self) -> (&str, Option<&str>) {
        (&self.source, self.comment.as_deref())
    }

    #[must_use]
    pub fn matches(&self, source: &str, comment: Option<&str>) -> bool {
        self.source == source && self.comment.as_deref() == comment
    }
}

/// Named grouping of messages, typically one dialog or widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Context {
    pub name: String,

    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Context {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), messages: Vec::new() }
    }

    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Finds the first message with exactly this key.
    #[must_use]
    pub fn find(&self, source: &str, comment: Option<&str>) -> Option<&Message> {
        self.messages.iter().find(|message| message.matches(source, comment))
    }
}

/// A translation catalog for one target language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Catalog {
    /// Target language, e.g. `uk_UA`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,

    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl Catalog {
    /// Parses and validates a catalog.
    ///
    /// # Errors
    /// - Malformed JSON or unknown fields
    /// - Duplicate or empty context names
    /// - Messages with an empty source text
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serializes to the canonical pretty-printed form with a trailing newline.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    /// Checks the structural invariants of the catalog.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut names = HashSet::new();
        for (index, context) in self.contexts.iter().enumerate() {
            if context.name.is_empty() {
                return Err(CatalogError::EmptyContextName { index });
            }
            if !names.insert(context.name.as_str()) {
                return Err(CatalogError::DuplicateContext { name: context.name.clone() });
            }
            if let Some(index) = context.messages.iter().position(|m| m.source.is_empty()) {
                return Err(CatalogError::EmptySource { context: context.name.clone(), index });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|context| context.name == name)
    }

    /// Iterates every message together with its owning context.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|context| context.messages.iter().map(move |message| (context, message)))
    }
}
