//! Updating a translated catalog from a freshly extracted template.
//!
//! The template lists every source text the application currently uses, in
//! the order it should appear. Translations are carried over by key
//! (source text plus disambiguation comment) within each context.

use std::fmt;

use serde::Serialize;

use crate::catalog::{
    Catalog,
    Context,
    Message,
    Translation,
    TranslationStatus,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Drop messages that are no longer in the template instead of marking them obsolete.
    pub drop_obsolete: bool,
}

/// What happened to each message during a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    /// Template messages without a translation yet.
    pub new: usize,
    pub kept: usize,
    /// Obsolete or vanished messages found in the template again.
    pub revived: usize,
    /// Messages kept as obsolete because the template no longer has them.
    pub obsoleted: usize,
    pub dropped: usize,
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} new, {} kept, {} revived, {} obsolete, {} dropped",
            self.new, self.kept, self.revived, self.obsoleted, self.dropped
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub catalog: Catalog,
    pub report: MergeReport,
}

/// Merges `existing` translations into the structure of `template`.
///
/// - Contexts and messages follow the template order; contexts only found in
///   `existing` come last.
/// - Known messages keep their translation, status and translator comment.
///   Obsolete or vanished ones become unfinished again.
/// - The developer comment is always taken from the template.
/// - Template messages without a translation are added as unfinished.
/// - Messages missing from the template become obsolete when they carry a
///   translation and are dropped otherwise.
#[must_use]
pub fn merge(existing: &Catalog, template: &Catalog, options: &MergeOptions) -> MergeOutcome {
    let mut report = MergeReport::default();
    let mut contexts = Vec::with_capacity(template.contexts.len());

    for template_context in &template.contexts {
        let mut pool = Pool::new(existing.context(&template_context.name));
        let mut merged = Context::new(template_context.name.clone());

        for template_message in &template_context.messages {
            let message = match pool.take(template_message) {
                Some(known) => update_known(known, template_message, &mut report),
                None => {
                    report.new += 1;
                    new_message(template_message)
                }
            };
            merged.messages.push(message);
        }

        merged.messages.extend(retire(pool.into_rest(), options, &mut report));
        contexts.push(merged);
    }

    for context in &existing.contexts {
        if template.context(&context.name).is_some() {
            continue;
        }
        let messages = retire(context.messages.iter(), options, &mut report);
        if !messages.is_empty() {
            contexts.push(Context { name: context.name.clone(), messages });
        }
    }

    tracing::debug!(
        new = report.new,
        kept = report.kept,
        revived = report.revived,
        obsoleted = report.obsoleted,
        dropped = report.dropped,
        "Merged catalog"
    );

    let catalog = Catalog {
        language: existing.language.clone().or_else(|| template.language.clone()),
        source_language: template.source_language.clone().or_else(|| existing.source_language.clone()),
        contexts,
    };
    MergeOutcome { catalog, report }
}

/// Existing messages of one context, each matched at most once.
struct Pool<'a> {
    /// Messages and whether a template entry already claimed them
    messages: Vec<(&'a Message, bool)>,
}

impl<'a> Pool<'a> {
    /// Pool over the messages of `context`, empty when it is missing.
    fn new(context: Option<&'a Context>) -> Self {
        let messages = context.map_or_else(Vec::new, |c| c.messages.iter().map(|m| (m, false)).collect());
        Self { messages }
    }

    /// Claims the unused message with the key of `template`.
    fn take(&mut self, template: &Message) -> Option<&'a Message> {
        let (comment, source) = (template.comment.as_deref(), template.source.as_str());
        let (message, used) =
            self.messages.iter_mut().find(|(message, used)| !*used && message.matches(source, comment))?;
        *used = true;
        Some(*message)
    }

    /// Messages no template entry claimed.
    fn into_rest(self) -> impl Iterator<Item = &'a Message> {
        self.messages.into_iter().filter(|(_, used)| !*used).map(|(message, _)| message)
    }
}

/// Carries an existing message over to the template.
fn update_known(known: &Message, template: &Message, report: &mut MergeReport) -> Message {
    let mut message = known.clone();
    message.extra_comment.clone_from(&template.extra_comment);

    if message.status.is_active() {
        report.kept += 1;
    } else {
        message.status = TranslationStatus::Unfinished;
        report.revived += 1;
    }

    if template.translation.is_numerus() != message.translation.is_numerus() {
        message.translation = reshape(&message.translation, template.translation.is_numerus());
        if message.status.is_finished() {
            message.status = TranslationStatus::Unfinished;
        }
    }

    message
}

/// Converts between single and numerus translations, keeping whatever text exists.
fn reshape(translation: &Translation, numerus: bool) -> Translation {
    if numerus {
        let forms = if translation.is_empty() { Vec::new() } else { vec![translation.first().to_string()] };
        Translation::Numerus(forms)
    } else {
        Translation::from(translation.first())
    }
}

/// Unfinished message for a source text seen for the first time.
fn new_message(template: &Message) -> Message {
    let translation =
        if template.translation.is_numerus() { Translation::Numerus(Vec::new()) } else { Translation::default() };

    Message {
        source: template.source.clone(),
        comment: template.comment.clone(),
        extra_comment: template.extra_comment.clone(),
        translator_comment: None,
        translation,
        status: TranslationStatus::Unfinished,
    }
}

/// Handles messages that are no longer in the template.
fn retire<'a>(
    messages: impl Iterator<Item = &'a Message>,
    options: &MergeOptions,
    report: &mut MergeReport,
) -> Vec<Message> {
    let drop_obsolete = options.drop_obsolete;
    let mut retired = Vec::new();

    for message in messages {
        if drop_obsolete || message.translation.is_empty() {
            report.dropped += 1;
            continue;
        }
        let mut message = message.clone();
        message.status = TranslationStatus::Obsolete;
        report.obsoleted += 1;
        retired.push(message);
    }

    retired
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;

    use super::*;

    fn catalog(text: &str) -> Catalog {
        Catalog::from_json_str(text).unwrap()
    }

    fn sources(context: &Context) -> Vec<&str> {
        context.messages.iter().map(|m| m.source.as_str()).collect()
    }

    const EXISTING: &str = r#"{"language": "uk", "contexts": [
        {"name": "MainForm", "messages": [
            {"source": "Close", "translation": "Закрити", "translatorComment": "verb"},
            {"source": "Open", "translation": "Відкрити"},
            {"source": "Undo", "translation": "Скасувати", "status": "obsolete"},
            {"source": "Redo", "status": "unfinished"},
            {"source": "Quit", "translation": "Вийти", "status": "unfinished"}
        ]},
        {"name": "OldDialog", "messages": [
            {"source": "Ok", "translation": "Гаразд"},
            {"source": "Maybe", "status": "vanished"}
        ]}
    ]}"#;

    const TEMPLATE: &str = r#"{"sourceLanguage": "en", "contexts": [
        {"name": "MainForm", "messages": [
            {"source": "Open", "extraComment": "File menu", "status": "unfinished"},
            {"source": "Undo", "status": "unfinished"},
            {"source": "Save", "status": "unfinished"},
            {"source": "Close", "status": "unfinished"}
        ]},
        {"name": "Mixer", "messages": [
            {"source": "%n track(s)", "translation": [], "status": "unfinished"}
        ]}
    ]}"#;

    #[googletest::test]
    fn test_merge() {
        let outcome = merge(&catalog(EXISTING), &catalog(TEMPLATE), &MergeOptions::default());
        let merged = &outcome.catalog;

        expect_that!(merged.language.as_deref(), some(eq("uk")));
        expect_that!(merged.source_language.as_deref(), some(eq("en")));
        expect_that!(
            merged.contexts.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            elements_are![eq(&"MainForm"), eq(&"Mixer"), eq(&"OldDialog")]
        );

        let main = &merged.contexts[0];
        expect_that!(
            sources(main),
            elements_are![eq(&"Open"), eq(&"Undo"), eq(&"Save"), eq(&"Close"), eq(&"Quit")]
        );

        let open = &main.messages[0];
        expect_that!(open.translation.first(), eq("Відкрити"));
        expect_that!(open.status, eq(TranslationStatus::Finished));
        expect_that!(open.extra_comment.as_deref(), some(eq("File menu")));

        let undo = &main.messages[1];
        expect_that!(undo.translation.first(), eq("Скасувати"));
        expect_that!(undo.status, eq(TranslationStatus::Unfinished));

        let save = &main.messages[2];
        expect_that!(save.translation.is_empty(), eq(true));
        expect_that!(save.status, eq(TranslationStatus::Unfinished));

        expect_that!(main.messages[3].translator_comment.as_deref(), some(eq("verb")));
        expect_that!(main.messages[4].status, eq(TranslationStatus::Obsolete));

        let tracks = &merged.contexts[1].messages[0];
        expect_that!(tracks.translation, eq(&Translation::Numerus(vec![])));

        expect_that!(sources(&merged.contexts[2]), elements_are![eq(&"Ok")]);
        expect_that!(merged.contexts[2].messages[0].status, eq(TranslationStatus::Obsolete));

        assert_eq!(
            outcome.report,
            MergeReport { new: 2, kept: 2, revived: 1, obsoleted: 2, dropped: 2 }
        );
    }

    #[googletest::test]
    fn test_merge_drop_obsolete() {
        let options = MergeOptions { drop_obsolete: true };

        let outcome = merge(&catalog(EXISTING), &catalog(TEMPLATE), &options);

        expect_that!(outcome.catalog.contexts, len(eq(2)));
        expect_that!(outcome.catalog.contexts[0].messages, len(eq(4)));
        expect_that!(outcome.report.obsoleted, eq(0));
        expect_that!(outcome.report.dropped, eq(4));
    }

    #[googletest::test]
    fn test_merge_result_is_valid_catalog() {
        let outcome = merge(&catalog(EXISTING), &catalog(TEMPLATE), &MergeOptions::default());

        let text = outcome.catalog.to_json_string().unwrap();

        expect_that!(Catalog::from_json_str(&text), ok(eq(&outcome.catalog)));
    }

    #[googletest::test]
    fn test_merge_with_itself_changes_nothing() {
        let existing = catalog(
            r#"{"contexts": [{"name": "MainForm", "messages": [
                {"source": "Open", "translation": "Відкрити"},
                {"source": "Open", "comment": "instrument", "translation": "Завантажити"},
                {"source": "%n file(s)", "translation": ["%n файл", "%n файли", "%n файлів"]}
            ]}]}"#,
        );

        let outcome = merge(&existing, &existing, &MergeOptions::default());

        assert_eq!(outcome.catalog, existing);
        expect_that!(outcome.report.kept, eq(3));
    }

    #[googletest::test]
    fn test_merge_reshapes_numerus_change() {
        let existing = catalog(
            r#"{"contexts": [{"name": "Mixer", "messages": [
                {"source": "%n track(s)", "translation": "%n доріжок"}
            ]}]}"#,
        );
        let template = catalog(
            r#"{"contexts": [{"name": "Mixer", "messages": [
                {"source": "%n track(s)", "translation": [], "status": "unfinished"}
            ]}]}"#,
        );

        let outcome = merge(&existing, &template, &MergeOptions::default());
        let message = &outcome.catalog.contexts[0].messages[0];

        expect_that!(message.translation, eq(&Translation::Numerus(vec!["%n доріжок".to_string()])));
        expect_that!(message.status, eq(TranslationStatus::Unfinished));
    }

    #[googletest::test]
    fn test_report_display() {
        let report = MergeReport { new: 2, kept: 10, revived: 1, obsoleted: 3, dropped: 0 };

        expect_that!(report.to_string(), eq("2 new, 10 kept, 1 revived, 3 obsolete, 0 dropped"));
    }
}
