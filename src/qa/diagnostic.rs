//! Diagnostic messages produced by catalog checks.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::{
    ChecksConfig,
    Severity,
};
use crate::types::SourceRange;

/// Identifies the check that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckCode {
    EmptyFinishedTranslation,
    DuplicateMessage,
    PlaceMarkerMismatch,
    AcceleratorMismatch,
    PunctuationMismatch,
    WhitespaceMismatch,
    NumerusFormCount,
    UnfinishedTranslation,
    LowCompletion,
}

impl CheckCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyFinishedTranslation => "empty-finished-translation",
            Self::DuplicateMessage => "duplicate-message",
            Self::PlaceMarkerMismatch => "place-marker-mismatch",
            Self::AcceleratorMismatch => "accelerator-mismatch",
            Self::PunctuationMismatch => "punctuation-mismatch",
            Self::WhitespaceMismatch => "whitespace-mismatch",
            Self::NumerusFormCount => "numerus-form-count",
            Self::UnfinishedTranslation => "unfinished-translation",
            Self::LowCompletion => "low-completion",
        }
    }

    /// Configured severity of this check.
    #[must_use]
    pub const fn severity(self, checks: &ChecksConfig) -> Severity {
        match self {
            Self::EmptyFinishedTranslation => checks.empty_finished_translation,
            Self::DuplicateMessage => checks.duplicate_message,
            Self::PlaceMarkerMismatch => checks.place_marker_mismatch,
            Self::AcceleratorMismatch => checks.accelerator_mismatch,
            Self::PunctuationMismatch => checks.punctuation_mismatch,
            Self::WhitespaceMismatch => checks.whitespace_mismatch,
            Self::NumerusFormCount => checks.numerus_form_count,
            Self::UnfinishedTranslation => checks.unfinished_translation,
            Self::LowCompletion => checks.low_completion,
        }
    }
}

impl fmt::Display for CheckCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub path: PathBuf,
    pub range: Option<SourceRange>,
    pub severity: Severity,
    pub code: CheckCode,
    pub message: String,
    /// Owning context, absent for catalog-wide findings.
    pub context: Option<String>,
    pub source: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

/// `path:line:column: severity[code]: message`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(range) = self.range {
            write!(f, ":{}", range.start)?;
        }
        write!(f, ": {}[{}]: {}", self.severity, self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::types::SourcePosition;

    fn diagnostic(range: Option<SourceRange>) -> Diagnostic {
        Diagnostic {
            path: PathBuf::from("i18n/app_uk.json"),
            range,
            severity: Severity::Warning,
            code: CheckCode::AcceleratorMismatch,
            message: "Source has an accelerator but the translation does not".to_string(),
            context: Some("MainForm".to_string()),
            source: Some("&Open".to_string()),
        }
    }

    #[googletest::test]
    fn test_display_with_range() {
        let start = SourcePosition { line: 9, character: 8 };
        let range = SourceRange { start, end: start };

        expect_that!(
            diagnostic(Some(range)).to_string(),
            eq("i18n/app_uk.json:10:9: warning[accelerator-mismatch]: \
                Source has an accelerator but the translation does not")
        );
    }

    #[googletest::test]
    fn test_display_without_range() {
        expect_that!(
            diagnostic(None).to_string(),
            starts_with("i18n/app_uk.json: warning[accelerator-mismatch]")
        );
    }

    #[googletest::test]
    fn test_serialize_code_as_kebab_case() {
        let json = serde_json::to_value(diagnostic(None)).unwrap_or_default();

        expect_that!(json.get("code").and_then(|c| c.as_str()), some(eq("accelerator-mismatch")));
        expect_that!(json.get("severity").and_then(|c| c.as_str()), some(eq("warning")));
    }

    #[googletest::test]
    fn test_severity_follows_config() {
        let checks = ChecksConfig::default();

        expect_that!(CheckCode::DuplicateMessage.severity(&checks), eq(Severity::Error));
        expect_that!(CheckCode::UnfinishedTranslation.severity(&checks), eq(Severity::Off));
    }
}
