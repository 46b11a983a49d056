//! File pattern matcher for catalog files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::CatalogSettings;

/// Invalid glob pattern in the settings.
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid catalog include pattern '{pattern}': {source}")]
    InvalidCatalogPattern {
        /// Offending pattern
        pattern: String,
        /// Parse error
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        /// Offending pattern
        pattern: String,
        /// Parse error
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches files against configured glob patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    /// Paths are matched relative to this directory
    workspace_root: PathBuf,
    /// `catalogFiles.includePatterns`
    catalog_set: GlobSet,
    /// `catalogFiles.excludePatterns`
    catalog_exclude_set: GlobSet,
    /// Global `excludePatterns`
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// Creates a new matcher from settings.
    ///
    /// # Errors
    /// Returns error if a pattern is not a valid glob.
    pub fn new(workspace_root: PathBuf, settings: &CatalogSettings) -> Result<Self, MatcherError> {
        let catalog_set =
            Self::build_glob_set(&settings.catalog_files.include_patterns, |pattern, source| {
                MatcherError::InvalidCatalogPattern { pattern, source }
            })?;

        let catalog_exclude_set =
            Self::build_glob_set(&settings.catalog_files.exclude_patterns, |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { workspace_root, catalog_set, catalog_exclude_set, exclude_set })
    }

    /// Compiles `patterns`, reporting the first invalid one through `make_error`.
    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Returns true if the path matches `catalogFiles.includePatterns`
    /// but neither `excludePatterns` nor `catalogFiles.excludePatterns`.
    ///
    /// The path must be absolute and under the workspace root.
    #[must_use]
    pub fn is_catalog_file(&self, absolute_path: &Path) -> bool {
        let Some(relative_path) = absolute_path.strip_prefix(&self.workspace_root).ok() else {
            return false;
        };

        self.is_catalog_file_relative(relative_path)
    }

    /// Same as [`Self::is_catalog_file`] for a path relative to the workspace root.
    #[must_use]
    pub fn is_catalog_file_relative(&self, relative_path: &Path) -> bool {
        self.catalog_set.is_match(relative_path)
            && !self.exclude_set.is_match(relative_path)
            && !self.catalog_exclude_set.is_match(relative_path)
    }
}
