//! Completion statistics.

use std::fmt;
use std::ops::AddAssign;

use serde::Serialize;

use crate::catalog::{
    Catalog,
    Context,
    TranslationStatus,
};

/// Message counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub finished: usize,
    pub unfinished: usize,
    /// Unfinished messages without any text.
    pub untranslated: usize,
    /// Obsolete and vanished messages.
    pub obsolete: usize,
}

impl Counts {
    #[must_use]
    pub fn from_context(context: &Context) -> Self {
        let mut counts = Self::default();
        for message in &context.messages {
            match message.status {
                TranslationStatus::Finished => counts.finished += 1,
                TranslationStatus::Unfinished => {
                    counts.unfinished += 1;
                    if message.translation.is_empty() {
                        counts.untranslated += 1;
                    }
                }
                TranslationStatus::Obsolete | TranslationStatus::Vanished => counts.obsolete += 1,
            }
        }
        counts
    }

    /// Messages the application can still ask for.
    #[must_use]
    pub const fn active(&self) -> usize {
        self.finished + self.unfinished
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.active() + self.obsolete
    }

    /// Finished share of active messages, rounded down. Empty sets are complete.
    #[must_use]
    pub const fn completion_percent(&self) -> usize {
        match self.active() {
            0 => 100,
            active => self.finished * 100 / active,
        }
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, other: Self) {
        self.finished += other.finished;
        self.unfinished += other.unfinished;
        self.untranslated += other.untranslated;
        self.obsolete += other.obsolete;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextStats {
    pub name: String,
    #[serde(flatten)]
    pub counts: Counts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub language: Option<String>,
    pub contexts: Vec<ContextStats>,
    pub totals: Counts,
}

impl CatalogStats {
    #[must_use]
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut totals = Counts::default();
        let contexts = catalog
            .contexts
            .iter()
            .map(|context| {
                let counts = Counts::from_context(context);
                totals += counts;
                ContextStats { name: context.name.clone(), counts }
            })
            .collect();

        Self { language: catalog.language.clone(), contexts, totals }
    }

    #[must_use]
    pub const fn completion_percent(&self) -> usize {
        self.totals.completion_percent()
    }
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals = &self.totals;
        let translated = totals.active() - totals.untranslated;
        writeln!(
            f,
            "{translated} translation(s) ({} finished and {} unfinished), {}% complete",
            totals.finished,
            totals.unfinished - totals.untranslated,
            totals.completion_percent(),
        )?;
        write!(f, "{} untranslated source text(s)", totals.untranslated)?;
        if totals.obsolete > 0 {
            write!(f, ", {} obsolete", totals.obsolete)?;
        }
        Ok(())
    }
}
