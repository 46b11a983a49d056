//! Output of the `check` and `stats` commands.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::OutputFormat;
use crate::config::Severity;
use crate::indexer::LoadFailure;
use crate::input::LoadedCatalog;
use crate::qa::Diagnostic;
use crate::stats::{
    CatalogStats,
    ContextStats,
    Counts,
};

/// JSON output of `check`.
#[derive(Serialize)]
struct CheckReport<'a> {
    /// Findings in path order
    diagnostics: &'a [Diagnostic],
    /// Catalogs that could not be loaded
    failures: &'a [LoadFailure],
}

/// JSON output of `stats` for one catalog.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogReport<'a> {
    /// Catalog file
    path: &'a Path,
    /// Detected or declared language
    language: &'a str,
    /// Percentage of finished messages
    completion: usize,
    /// Counts over all contexts
    totals: Counts,
    /// Only with `--contexts`
    #[serde(skip_serializing_if = "Option::is_none")]
    contexts: Option<&'a [ContextStats]>,
}

/// JSON output of `stats`.
#[derive(Serialize)]
struct StatsReport<'a> {
    /// One entry per loaded catalog
    catalogs: Vec<CatalogReport<'a>>,
    /// Catalogs that could not be loaded
    failures: &'a [LoadFailure],
}

/// Prints the findings of `check` followed by a summary line.
pub(super) fn write_diagnostics(
    out: &mut impl Write,
    diagnostics: &[Diagnostic],
    failures: &[LoadFailure],
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &CheckReport { diagnostics, failures })?;
        writeln!(out)?;
        return Ok(());
    }

    write_failures(out, failures)?;
    for diagnostic in diagnostics {
        writeln!(out, "{diagnostic}")?;
    }

    let count = |severity: Severity| diagnostics.iter().filter(|d| d.severity == severity).count();
    let (errors, warnings, infos) =
        (count(Severity::Error) + failures.len(), count(Severity::Warning), count(Severity::Info));
    if errors + warnings + infos == 0 {
        writeln!(out, "No problems found")?;
    } else {
        writeln!(out, "{errors} error(s), {warnings} warning(s), {infos} info(s)")?;
    }
    Ok(())
}

/// Prints completion per catalog, and per context with `with_contexts`.
pub(super) fn write_stats(
    out: &mut impl Write,
    catalogs: &[LoadedCatalog],
    failures: &[LoadFailure],
    with_contexts: bool,
    format: OutputFormat,
) -> Result<()> {
    let stats: Vec<CatalogStats> = catalogs.iter().map(|l| CatalogStats::from_catalog(&l.catalog)).collect();

    if format == OutputFormat::Json {
        let catalogs = catalogs
            .iter()
            .zip(&stats)
            .map(|(loaded, stats)| CatalogReport {
                path: &loaded.path,
                language: &loaded.language,
                completion: stats.completion_percent(),
                totals: stats.totals,
                contexts: with_contexts.then_some(stats.contexts.as_slice()),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &StatsReport { catalogs, failures })?;
        writeln!(out)?;
        return Ok(());
    }

    for (loaded, stats) in catalogs.iter().zip(&stats) {
        writeln!(out, "{} [{}]", loaded.path.display(), loaded.language)?;
        for line in stats.to_string().lines() {
            writeln!(out, "  {line}")?;
        }
        if with_contexts {
            for context in &stats.contexts {
                let counts = &context.counts;
                writeln!(
                    out,
                    "    {}: {}/{} finished ({}%)",
                    context.name,
                    counts.finished,
                    counts.active(),
                    counts.completion_percent()
                )?;
            }
        }
    }
    write_failures(out, failures)
}

/// One `path: error: message` line per catalog that failed to load.
fn write_failures(out: &mut impl Write, failures: &[LoadFailure]) -> Result<()> {
    for failure in failures {
        writeln!(out, "{}: error: {}", failure.path.display(), failure.message)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use googletest::prelude::*;

    use super::*;
    use crate::test_utils::load_test_catalog;

    fn loaded() -> LoadedCatalog {
        load_test_catalog(
            "i18n/app_uk.json",
            r#"{"contexts": [{"name": "Mixer", "messages": [
                {"source": "Mute", "translation": "Тиша"},
                {"source": "Solo", "status": "unfinished"}
            ]}]}"#,
        )
    }

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>,
    {
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[googletest::test]
    fn test_no_problems() {
        let text = render(|out| write_diagnostics(out, &[], &[], OutputFormat::Text));

        expect_that!(text, eq("No problems found\n"));
    }

    #[googletest::test]
    fn test_failures_count_as_errors() {
        let failures = [LoadFailure { path: PathBuf::from("i18n/bad.json"), message: "oops".to_string() }];

        let text = render(|out| write_diagnostics(out, &[], &failures, OutputFormat::Text));

        expect_that!(text, eq("i18n/bad.json: error: oops\n1 error(s), 0 warning(s), 0 info(s)\n"));
    }

    #[googletest::test]
    fn test_stats_text() {
        let text = render(|out| write_stats(out, &[loaded()], &[], true, OutputFormat::Text));

        expect_that!(
            text,
            eq("i18n/app_uk.json [uk]\n  \
                1 translation(s) (1 finished and 0 unfinished), 50% complete\n  \
                1 untranslated source text(s)\n    \
                Mixer: 1/2 finished (50%)\n")
        );
    }

    #[googletest::test]
    fn test_stats_json() {
        let text = render(|out| write_stats(out, &[loaded()], &[], false, OutputFormat::Json));
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        expect_that!(json["catalogs"][0]["language"].as_str(), some(eq("uk")));
        expect_that!(json["catalogs"][0]["completion"].as_u64(), some(eq(50)));
        expect_that!(json["catalogs"][0]["totals"]["untranslated"].as_u64(), some(eq(1)));
        expect_that!(json["catalogs"][0].get("contexts"), none());
    }
}
