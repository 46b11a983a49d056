//! Indexer type definitions.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::MatcherError;
use crate::input::LoadedCatalog;

/// A catalog file that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Every catalog found in a workspace, sorted by path.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    pub catalogs: Vec<LoadedCatalog>,
    pub failures: Vec<LoadFailure>,
}

impl CatalogIndex {
    /// Distinct languages of the loaded catalogs.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.catalogs.iter().map(|l| l.language.as_str()).collect();
        languages.sort_unstable();
        languages.dedup();
        languages
    }
}

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Workspace root does not exist: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}
