//! Helpers shared by unit tests.
#![cfg(test)]

use crate::input::LoadedCatalog;

/// Parses catalog text as if it had been read from `file_path`.
///
/// # Panics
/// Panics if `json` is not a valid catalog.
#[allow(clippy::unwrap_used)]
pub(crate) fn load_test_catalog(file_path: &str, json: &str) -> LoadedCatalog {
    LoadedCatalog::from_text(file_path, json.to_string()).unwrap()
}
