//! Configuration manager.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    CatalogSettings,
    ConfigError,
    loader,
};

/// Holds the validated settings of one workspace.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Settings in effect
    current_settings: CatalogSettings,

    /// Workspace the settings were loaded from
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: CatalogSettings::default(), workspace_root: None }
    }

    /// Load settings from the workspace root, falling back to defaults
    /// when there is no config file.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.map_or_else(CatalogSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            CatalogSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replace the settings, e.g. after command line overrides.
    ///
    /// # Errors
    /// Returns the validation errors of `new_settings`.
    pub fn update_settings(&mut self, new_settings: CatalogSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &CatalogSettings {
        &self.current_settings
    }

    #[must_use]
    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }
}
