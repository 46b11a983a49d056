//! Config file loading.

use std::path::Path;

use super::{
    CatalogSettings,
    ConfigError,
};

/// Name of the configuration file looked up in the workspace root.
pub const CONFIG_FILE_NAME: &str = ".tr-catalog.json";

/// Load settings from the workspace.
///
/// # Returns
/// - `Ok(Some(settings))`: the config file exists and parsed
/// - `Ok(None)`: no config file
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<CatalogSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: CatalogSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn test_load_from_workspace_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"minimumCompletion": 80}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let settings = load_from_workspace(temp_dir.path()).unwrap();

        assert_eq!(settings.unwrap().minimum_completion, Some(80));
    }

    #[rstest]
    fn test_load_from_workspace_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(result.unwrap().is_none());
    }

    #[rstest]
    fn test_load_from_workspace_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
