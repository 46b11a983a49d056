//! Translation quality checks.

mod checks;
mod diagnostic;

pub use checks::check_catalog;
pub use diagnostic::{
    CheckCode,
    Diagnostic,
};

use crate::config::CatalogSettings;
use crate::input::LoadedCatalog;

/// Checks every catalog whose language is selected by `settings.languages`.
///
/// Diagnostics are ordered by catalog path, then by position in the file.
#[must_use]
pub fn check_workspace(catalogs: &[LoadedCatalog], settings: &CatalogSettings) -> Vec<Diagnostic> {
    let mut checked: Vec<&LoadedCatalog> =
        catalogs.iter().filter(|loaded| settings.is_language_checked(&loaded.language)).collect();
    checked.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::debug!(catalogs = checked.len(), skipped = catalogs.len() - checked.len(), "Checking workspace");

    checked.into_iter().flat_map(|loaded| check_catalog(loaded, settings)).collect()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::test_utils::load_test_catalog;

    fn loaded(path: &str) -> LoadedCatalog {
        load_test_catalog(path, r#"{"contexts": [{"name": "Mixer", "messages": [{"source": "Mute"}]}]}"#)
    }

    #[googletest::test]
    fn test_check_workspace_filters_languages() {
        let catalogs = vec![loaded("/i18n/app_uk.json"), loaded("/i18n/app_de.json")];
        let settings = CatalogSettings {
            languages: Some(vec!["uk".to_string()]),
            ..CatalogSettings::default()
        };

        let diagnostics = check_workspace(&catalogs, &settings);

        expect_that!(diagnostics, len(eq(1)));
        expect_that!(diagnostics[0].path.to_str(), some(eq("/i18n/app_uk.json")));
    }

    #[googletest::test]
    fn test_check_workspace_orders_by_path() {
        let catalogs = vec![loaded("/i18n/b_uk.json"), loaded("/i18n/a_de.json")];

        let paths: Vec<_> = check_workspace(&catalogs, &CatalogSettings::default())
            .into_iter()
            .map(|d| d.path)
            .collect();

        expect_that!(
            paths,
            elements_are![eq(std::path::Path::new("/i18n/a_de.json")), eq(std::path::Path::new("/i18n/b_uk.json"))]
        );
    }
}
