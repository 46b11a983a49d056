//! Settings read from `.tr-catalog.json`.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::input::language::{
    is_language_code,
    normalize_language_code,
    primary_subtag,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "catalogFiles.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list of validation errors, one per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How seriously a check result is reported. `Off` disables the check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Off => "off",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSettings {
    pub catalog_files: CatalogFilesConfig,

    /// Paths never scanned, relative to the workspace root.
    pub exclude_patterns: Vec<String>,

    /// Languages to check.
    ///
    /// - `None`: every discovered catalog (default)
    /// - `Some([...])`: only catalogs of these languages
    pub languages: Option<Vec<String>>,

    /// Completion percentage (0-100) a catalog must reach.
    pub minimum_completion: Option<u8>,

    pub checks: ChecksConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogFilesConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

/// Severity per QA check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecksConfig {
    pub empty_finished_translation: Severity,
    pub duplicate_message: Severity,
    pub place_marker_mismatch: Severity,
    pub accelerator_mismatch: Severity,
    pub punctuation_mismatch: Severity,
    pub whitespace_mismatch: Severity,
    pub numerus_form_count: Severity,
    pub unfinished_translation: Severity,
    pub low_completion: Severity,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            empty_finished_translation: Severity::Error,
            duplicate_message: Severity::Error,
            place_marker_mismatch: Severity::Warning,
            accelerator_mismatch: Severity::Warning,
            punctuation_mismatch: Severity::Info,
            whitespace_mismatch: Severity::Info,
            numerus_form_count: Severity::Warning,
            unfinished_translation: Severity::Off,
            low_completion: Severity::Error,
        }
    }
}

impl Default for CatalogFilesConfig {
    fn default() -> Self {
        Self { include_patterns: vec!["**/i18n/**/*.json".to_string()], exclude_patterns: vec![] }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            catalog_files: CatalogFilesConfig::default(),
            exclude_patterns: vec!["target/**".to_string(), "node_modules/**".to_string()],
            languages: None,
            minimum_completion: None,
            checks: ChecksConfig::default(),
        }
    }
}

impl CatalogSettings {
    /// # Errors
    /// - No catalog include pattern
    /// - Invalid glob pattern
    /// - Invalid language code
    /// - Completion threshold above 100
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.catalog_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "catalogFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/i18n/**/*.json\"]",
            ));
        }

        let pattern_groups = [
            ("catalogFiles.includePatterns", &self.catalog_files.include_patterns),
            ("catalogFiles.excludePatterns", &self.catalog_files.exclude_patterns),
            ("excludePatterns", &self.exclude_patterns),
        ];
        for (field, patterns) in pattern_groups {
            for (index, pattern) in patterns.iter().enumerate() {
                if let Err(e) = globset::Glob::new(pattern) {
                    errors.push(ValidationError::new(
                        format!("{field}[{index}]"),
                        format!("Invalid glob pattern '{pattern}': {e}"),
                    ));
                }
            }
        }

        if let Some(languages) = &self.languages {
            if languages.is_empty() {
                errors.push(ValidationError::new(
                    "languages",
                    "The list cannot be empty. Remove the field to check every language",
                ));
            }
            for (index, language) in languages.iter().enumerate() {
                if !is_language_code(language) {
                    errors.push(ValidationError::new(
                        format!("languages[{index}]"),
                        format!("'{language}' is not a language code. Example: \"uk\" or \"pt_BR\""),
                    ));
                }
            }
        }

        if let Some(minimum) = self.minimum_completion
            && minimum > 100
        {
            errors.push(ValidationError::new(
                "minimumCompletion",
                format!("Must be a percentage between 0 and 100, got {minimum}"),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Returns true if catalogs of `language` are subject to checks.
    #[must_use]
    pub fn is_language_checked(&self, language: &str) -> bool {
        let Some(languages) = &self.languages else {
            return true;
        };
        let language = normalize_language_code(language);
        languages.iter().map(|l| normalize_language_code(l)).any(|configured| {
            configured == language
                || (!configured.contains('_') && configured == primary_subtag(&language))
        })
    }
}
