use super::EditorConfig;
use crate::error::{LineupError, Result};
use std::{env, fs};

pub const CONFIG_PATH_ENV: &str = "LINEUP_CONFIG_PATH";

/// Load the editor config named by `LINEUP_CONFIG_PATH`, or the defaults when unset.
pub fn load_config_from_env() -> Result<EditorConfig> {
    let Ok(path) = env::var(CONFIG_PATH_ENV) else {
        return Ok(EditorConfig::default());
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(EditorConfig::default());
    }

    load_config_file(path)
}

pub(crate) fn load_config_file(path: &str) -> Result<EditorConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        LineupError::InvalidConfig(format!(
            "Failed to read editor config file from {CONFIG_PATH_ENV}='{path}': {e}"
        ))
    })?;

    let config: EditorConfig = serde_json::from_str(&content).map_err(|e| {
        LineupError::InvalidConfig(format!(
            "Failed to parse editor config JSON from {CONFIG_PATH_ENV}='{path}': {e}"
        ))
    })?;

    config.validate().map_err(|e| {
        LineupError::InvalidConfig(format!(
            "Invalid editor config from {CONFIG_PATH_ENV}='{path}': {e}"
        ))
    })?;

    log::info!("Loaded editor config from {}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::VeteranPolicy;
    use std::io::Write;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "veteran_policy": "disabled" }}"#).unwrap();
        let config = load_config_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.veteran_policy, VeteranPolicy::Disabled);
    }

    #[test]
    fn test_errors_name_the_env_var() {
        let err = load_config_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains(CONFIG_PATH_ENV));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_config_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_formation": "2-2" }}"#).unwrap();
        let err = load_config_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Invalid editor config"));
    }
}
