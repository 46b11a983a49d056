//! Workspace catalog discovery and loading.

use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::{
    ConfigManager,
    FileMatcher,
};
use crate::indexer::types::{
    CatalogIndex,
    IndexerError,
    LoadFailure,
};
use crate::input::LoadedCatalog;

/// Finds and loads every catalog file of a workspace.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorkspaceIndexer;

impl WorkspaceIndexer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads every catalog file under `workspace_path`.
    ///
    /// Files are read concurrently. A file that cannot be read or parsed is
    /// recorded in [`CatalogIndex::failures`] and does not stop the others.
    ///
    /// # Errors
    /// - The workspace root does not exist
    /// - A configured pattern is not a valid glob
    pub async fn index_workspace(
        &self,
        workspace_path: &Path,
        config_manager: &ConfigManager,
    ) -> Result<CatalogIndex, IndexerError> {
        tracing::debug!(workspace_path = %workspace_path.display(), "Indexing workspace");
        if !workspace_path.is_dir() {
            return Err(IndexerError::InvalidPath(workspace_path.to_path_buf()));
        }

        let matcher = FileMatcher::new(workspace_path.to_path_buf(), config_manager.get_settings())?;
        let files = Self::find_catalog_files(&matcher);

        // Read files concurrently
        let futures: Vec<_> = files.into_iter().map(Self::index_file).collect();
        let results = futures::future::join_all(futures).await;

        let mut index = CatalogIndex::default();
        for result in results {
            match result {
                Ok(loaded) => index.catalogs.push(loaded),
                Err(failure) => index.failures.push(failure),
            }
        }

        tracing::info!(
            catalogs = index.catalogs.len(),
            failures = index.failures.len(),
            "Workspace indexed"
        );
        Ok(index)
    }

    /// Reads and parses one catalog file.
    async fn index_file(file_path: PathBuf) -> Result<LoadedCatalog, LoadFailure> {
        let content = match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read file {:?}: {}", file_path, e);
                return Err(LoadFailure { path: file_path, message: e.to_string() });
            }
        };

        LoadedCatalog::from_text(file_path.clone(), content).map_err(|e| {
            tracing::warn!("Failed to load catalog {:?}: {}", file_path, e);
            LoadFailure { path: file_path, message: e.to_string() }
        })
    }

    /// Walks the workspace for catalog files, sorted by path.
    fn find_catalog_files(matcher: &FileMatcher) -> Vec<PathBuf> {
        let workspace_path = matcher.workspace_root();
        let mut found_files = Vec::new();

        // Respects .gitignore
        for result in WalkBuilder::new(workspace_path)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            // Files only
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            if matcher.is_catalog_file(entry.path()) {
                found_files.push(entry.path().to_path_buf());
            }
        }

        found_files.sort();
        found_files
    }
}
