//! Configuration file loading for the CLI
//!
//! This module finds and loads TOML configuration files from an explicit
//! path, the local `weft/` directory or the platform config directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use weft::{WeftError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for WeftError {
    fn from(err: ConfigError) -> Self {
        WeftError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (weft/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config values are out of range
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, WeftError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("weft/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "weft", "weft") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, WeftError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    debug!(
        max_depth = config.parser().max_depth(),
        error_style:? = config.output().error_style();
        "Configuration loaded"
    );
    Ok(config)
}

/// Parse and validate configuration text.
fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if config.parser().max_depth() == 0 {
        return Err(ConfigError::Validation(
            "parser.max_depth must be at least 1".to_string(),
        ));
    }
    if config.project().extensions().is_empty() {
        return Err(ConfigError::Validation(
            "project.extensions must not be empty".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use weft::config::ErrorStyle;

    use super::*;

    #[test]
    fn test_parse_config() {
        let config = parse_config("[output]\nerror_style = \"plain\"\n").expect("valid config");

        assert_eq!(config.output().error_style(), ErrorStyle::Plain);
        assert_eq!(config.parser().max_depth(), 256);
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[parser\nmax_depth = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation() {
        let err = parse_config("[parser]\nmax_depth = 0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: parser.max_depth must be at least 1"
        );

        let err = parse_config("[project]\nextensions = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, WeftError::Config(message) if message.contains("Missing configuration file")));
    }
}
