//! Per-message translation checks.

use std::collections::HashSet;

use super::diagnostic::{
    CheckCode,
    Diagnostic,
};
use crate::catalog::{
    Message,
    TranslationStatus,
};
use crate::config::CatalogSettings;
use crate::input::LoadedCatalog;
use crate::lookup::PluralRule;
use crate::markers::{
    accelerator,
    ending_punctuation,
    place_markers,
    surrounding_whitespace,
};
use crate::stats::CatalogStats;
use crate::types::SourceRange;

/// Collects diagnostics for one catalog, dropping disabled checks.
struct Collector<'a> {
    /// Catalog being checked
    loaded: &'a LoadedCatalog,
    /// Severities and thresholds
    settings: &'a CatalogSettings,
    /// Findings so far
    diagnostics: Vec<Diagnostic>,
}

impl Collector<'_> {
    /// Records a finding unless its check is turned off.
    fn push(
        &mut self,
        code: CheckCode,
        range: Option<SourceRange>,
        location: Option<(&str, &Message)>,
        message: String,
    ) {
        let severity = code.severity(&self.settings.checks);
        if !severity.is_enabled() {
            return;
        }
        self.diagnostics.push(Diagnostic {
            path: self.loaded.path.clone(),
            range,
            severity,
            code,
            message,
            context: location.map(|(context, _)| context.to_string()),
            source: location.map(|(_, message)| message.source.clone()),
        });
    }
}

/// Runs every enabled check on a loaded catalog.
///
/// Obsolete and vanished messages are skipped. Unfinished messages without
/// text only trigger `unfinished-translation`.
#[must_use]
pub fn check_catalog(loaded: &LoadedCatalog, settings: &CatalogSettings) -> Vec<Diagnostic> {
    tracing::debug!(path = %loaded.path.display(), "Checking catalog");

    let rule = PluralRule::for_language(&loaded.language);
    let mut collector = Collector { loaded, settings, diagnostics: Vec::new() };

    for (context_index, context) in loaded.catalog.contexts.iter().enumerate() {
        let mut seen = HashSet::new();

        for (message_index, message) in context.messages.iter().enumerate() {
            if !message.status.is_active() {
                continue;
            }

            let range = loaded
                .ranges
                .message(context_index, message_index)
                .or_else(|| loaded.ranges.context_name(context_index));
            let location = Some((context.name.as_str(), message));

            if !seen.insert(message.key()) {
                collector.push(
                    CheckCode::DuplicateMessage,
                    range,
                    location,
                    format!(
                        "'{}' is defined more than once in context '{}'",
                        message.source, context.name
                    ),
                );
            }

            if message.status == TranslationStatus::Unfinished {
                collector.push(
                    CheckCode::UnfinishedTranslation,
                    range,
                    location,
                    format!("'{}' is not translated yet", message.source),
                );
                if message.translation.is_empty() {
                    continue;
                }
            } else if message.translation.has_empty_form() {
                collector.push(
                    CheckCode::EmptyFinishedTranslation,
                    range,
                    location,
                    format!(
                        "'{}' is marked finished but has an empty translation",
                        message.source
                    ),
                );
            }

            if message.translation.is_numerus() {
                let forms = message.translation.forms().len();
                if forms != rule.form_count() {
                    collector.push(
                        CheckCode::NumerusFormCount,
                        range,
                        location,
                        format!(
                            "Expected {} plural form(s) for '{}', found {forms}",
                            rule.form_count(),
                            loaded.language
                        ),
                    );
                }
            }

            for (code, text) in text_findings(message, rule) {
                collector.push(code, range, location, text);
            }
        }
    }

    let completion = CatalogStats::from_catalog(&loaded.catalog).completion_percent();
    if let Some(minimum) = settings.minimum_completion
        && completion < usize::from(minimum)
    {
        collector.push(
            CheckCode::LowCompletion,
            None,
            None,
            format!("Catalog is {completion}% complete, at least {minimum}% is required"),
        );
    }

    collector.diagnostics
}

/// Compares the source with every non-empty form. Reports each check once per message.
fn text_findings(message: &Message, rule: PluralRule) -> Vec<(CheckCode, String)> {
    let source = message.source.as_str();
    let source_markers = place_markers(source);
    let source_accelerator = accelerator(source).is_some();
    let source_punctuation = ending_punctuation(source);
    let source_whitespace = surrounding_whitespace(source);
    let numerus = message.translation.is_numerus();

    let mut findings: Vec<(CheckCode, String)> = Vec::new();
    let mut report = |code: CheckCode, text: String| {
        if !findings.iter().any(|(reported, _)| *reported == code) {
            findings.push((code, text));
        }
    };

    for (index, form) in message.translation.forms().iter().enumerate() {
        if form.is_empty() {
            continue;
        }
        let label = if numerus { format!("Plural form {}", index + 1) } else { "Translation".to_string() };

        let markers = place_markers(form);
        if markers.numbered != source_markers.numbered {
            let missing: Vec<String> = source_markers
                .numbered
                .difference(&markers.numbered)
                .map(|n| format!("%{n}"))
                .collect();
            let extra: Vec<String> =
                markers.numbered.difference(&source_markers.numbered).map(|n| format!("%{n}")).collect();
            let mut text = format!("{label} does not use the same place markers as the source");
            if !missing.is_empty() {
                text.push_str(&format!(", missing {}", missing.join(" ")));
            }
            if !extra.is_empty() {
                text.push_str(&format!(", unexpected {}", extra.join(" ")));
            }
            report(CheckCode::PlaceMarkerMismatch, text);
        }
        if numerus && source_markers.has_count && !markers.has_count && rule != PluralRule::Single {
            report(CheckCode::PlaceMarkerMismatch, format!("{label} does not use %n"));
        }

        if accelerator(form).is_some() != source_accelerator {
            let text = if source_accelerator {
                format!("Source has an accelerator but {} does not", label.to_lowercase())
            } else {
                format!("{label} has an accelerator but the source does not")
            };
            report(CheckCode::AcceleratorMismatch, text);
        }

        if ending_punctuation(form) != source_punctuation {
            report(
                CheckCode::PunctuationMismatch,
                format!("{label} does not end with the same punctuation as the source"),
            );
        }

        if surrounding_whitespace(form) != source_whitespace {
            report(
                CheckCode::WhitespaceMismatch,
                format!("{label} differs from the source in leading or trailing whitespace"),
            );
        }
    }

    findings
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::config::{
        ChecksConfig,
        Severity,
    };
    use crate::test_utils::load_test_catalog as loaded;

    fn all_enabled() -> CatalogSettings {
        CatalogSettings {
            checks: ChecksConfig { unfinished_translation: Severity::Info, ..ChecksConfig::default() },
            ..CatalogSettings::default()
        }
    }

    fn codes(diagnostics: &[Diagnostic]) -> Vec<CheckCode> {
        diagnostics.iter().map(|d| d.code).collect()
    }

    fn single_message(message: &str) -> LoadedCatalog {
        loaded(
            "/i18n/app_uk.json",
            &format!(r#"{{"contexts": [{{"name": "MainForm", "messages": [{message}]}}]}}"#),
        )
    }

    #[googletest::test]
    fn test_clean_catalog_has_no_diagnostics() {
        let catalog = loaded(
            "/i18n/app_uk.json",
            r#"{"contexts": [{"name": "MainForm", "messages": [
                {"source": "&Open...", "translation": "&Відкрити..."},
                {"source": "Export %1 to %2.", "translation": "Експорт %1 у %2."},
                {"source": "%n pattern(s)", "translation": ["%n шаблон", "%n шаблони", "%n шаблонів"]},
                {"source": "Obsolete & gone", "translation": "", "status": "obsolete"}
            ]}]}"#,
        );

        expect_that!(check_catalog(&catalog, &all_enabled()), is_empty());
    }

    #[googletest::test]
    fn test_empty_finished_translation() {
        let catalog = single_message(r#"{"source": "About"}"#);

        let diagnostics = check_catalog(&catalog, &all_enabled());

        expect_that!(codes(&diagnostics), elements_are![eq(&CheckCode::EmptyFinishedTranslation)]);
        expect_that!(diagnostics[0].severity, eq(Severity::Error));
        expect_that!(diagnostics[0].context.as_deref(), some(eq("MainForm")));
        expect_that!(diagnostics[0].source.as_deref(), some(eq("About")));
        expect_that!(diagnostics[0].range.map(|r| r.start.line), some(eq(0)));
    }

    #[googletest::test]
    fn test_unfinished_without_text_only_reports_unfinished() {
        let catalog = single_message(r#"{"source": "&Website:", "status": "unfinished"}"#);

        let diagnostics = check_catalog(&catalog, &all_enabled());

        expect_that!(codes(&diagnostics), elements_are![eq(&CheckCode::UnfinishedTranslation)]);
        expect_that!(check_catalog(&catalog, &CatalogSettings::default()), is_empty());
    }

    #[googletest::test]
    fn test_unfinished_with_text_is_still_checked() {
        let catalog =
            single_message(r#"{"source": "Save %1", "translation": "Зберегти", "status": "unfinished"}"#);

        let diagnostics = check_catalog(&catalog, &CatalogSettings::default());

        expect_that!(codes(&diagnostics), elements_are![eq(&CheckCode::PlaceMarkerMismatch)]);
        expect_that!(diagnostics[0].message, contains_substring("missing %1"));
    }

    #[googletest::test]
    fn test_duplicate_message() {
        let catalog = loaded(
            "/i18n/app_uk.json",
            r#"{"contexts": [{"name": "MainForm", "messages": [
                {"source": "Open", "translation": "Відкрити"},
                {"source": "Open", "comment": "instrument", "translation": "Завантажити"},
                {"source": "Open", "translation": "Відкрити"}
            ]}, {"name": "Mixer", "messages": [
                {"source": "Open", "translation": "Відкрити"}
            ]}]}"#,
        );

        let diagnostics = check_catalog(&catalog, &all_enabled());

        expect_that!(codes(&diagnostics), elements_are![eq(&CheckCode::DuplicateMessage)]);
        expect_that!(diagnostics[0].range.map(|r| r.start.line), some(eq(3)));
    }

    #[rstest]
    #[case::missing_marker(
        r#"{"source": "Export %1 to %2", "translation": "Експорт %1"}"#,
        CheckCode::PlaceMarkerMismatch,
        "missing %2"
    )]
    #[case::extra_marker(
        r#"{"source": "Export", "translation": "Експорт %3"}"#,
        CheckCode::PlaceMarkerMismatch,
        "unexpected %3"
    )]
    #[case::missing_count(
        r#"{"source": "%n bar(s)", "translation": ["%n такт", "такти", "%n тактів"]}"#,
        CheckCode::PlaceMarkerMismatch,
        "Plural form 2 does not use %n"
    )]
    #[case::missing_accelerator(
        r#"{"source": "&Open", "translation": "Відкрити"}"#,
        CheckCode::AcceleratorMismatch,
        "Source has an accelerator but translation does not"
    )]
    #[case::extra_accelerator(
        r#"{"source": "Open", "translation": "&Відкрити"}"#,
        CheckCode::AcceleratorMismatch,
        "Translation has an accelerator"
    )]
    #[case::punctuation(
        r#"{"source": "Save as...", "translation": "Зберегти як"}"#,
        CheckCode::PunctuationMismatch,
        "punctuation"
    )]
    #[case::whitespace(
        r#"{"source": "Volume ", "translation": "Гучність"}"#,
        CheckCode::WhitespaceMismatch,
        "whitespace"
    )]
    #[case::form_count(
        r#"{"source": "%n bar(s)", "translation": ["%n такт", "%n такти"]}"#,
        CheckCode::NumerusFormCount,
        "Expected 3 plural form(s) for 'uk', found 2"
    )]
    fn test_text_checks(#[case] message: &str, #[case] code: CheckCode, #[case] expected: &str) {
        let catalog = single_message(message);

        let diagnostics = check_catalog(&catalog, &all_enabled());

        assert_that!(diagnostics, len(eq(1)));
        assert_that!(diagnostics[0].code, eq(code));
        assert_that!(diagnostics[0].message, contains_substring(expected));
    }

    #[googletest::test]
    fn test_single_form_language_may_drop_count_marker() {
        let catalog = loaded(
            "/i18n/app_ja.json",
            r#"{"contexts": [{"name": "SongEditor", "messages": [
                {"source": "%n pattern(s)", "translation": ["パターン"]}
            ]}]}"#,
        );

        expect_that!(check_catalog(&catalog, &all_enabled()), is_empty());
    }

    #[googletest::test]
    fn test_each_check_reported_once_per_message() {
        let catalog = single_message(
            r#"{"source": "%n file(s) in %1", "translation": ["%n файл", "%n файли", "%n файлів"]}"#,
        );

        let diagnostics = check_catalog(&catalog, &all_enabled());

        expect_that!(codes(&diagnostics), elements_are![eq(&CheckCode::PlaceMarkerMismatch)]);
        expect_that!(diagnostics[0].message, starts_with("Plural form 1"));
    }

    #[googletest::test]
    fn test_disabled_checks_are_dropped() {
        let catalog = single_message(r#"{"source": "&Open...", "translation": "Відкрити"}"#);
        let settings = CatalogSettings {
            checks: ChecksConfig {
                accelerator_mismatch: Severity::Off,
                punctuation_mismatch: Severity::Off,
                ..ChecksConfig::default()
            },
            ..CatalogSettings::default()
        };

        expect_that!(check_catalog(&catalog, &settings), is_empty());
    }

    #[rstest]
    #[case(Some(50), 0)]
    #[case(Some(51), 1)]
    #[case(None, 0)]
    fn test_low_completion(#[case] minimum: Option<u8>, #[case] expected: usize) {
        let catalog = loaded(
            "/i18n/app_uk.json",
            r#"{"contexts": [{"name": "MainForm", "messages": [
                {"source": "Open", "translation": "Відкрити"},
                {"source": "Close", "status": "unfinished"}
            ]}]}"#,
        );
        let settings = CatalogSettings { minimum_completion: minimum, ..CatalogSettings::default() };

        let diagnostics = check_catalog(&catalog, &settings);

        assert_that!(diagnostics, len(eq(expected)));
        for diagnostic in &diagnostics {
            assert_that!(diagnostic.code, eq(CheckCode::LowCompletion));
            assert_that!(diagnostic.range, none());
            assert_that!(diagnostic.message, contains_substring("50% complete"));
        }
    }
}
