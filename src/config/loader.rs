//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ToolConfig;
use crate::config::validation::validate_config;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ToolConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Invalid)?;

    tracing::debug!(path = ?path, "Configuration loaded");
    Ok(config)
}

/// [`load_config`] when a path is given, defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<ToolConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ToolConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(
            r#"
            [export]
            fallback_name = "fleet"
            pretty = false
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.export.fallback_name, "fleet");
        assert!(!config.export.pretty);
    }

    #[test]
    fn test_load_reports_each_failure_kind() {
        let missing = Path::new("/nonexistent/wb-config.toml");
        assert!(matches!(load_config(missing), Err(ConfigError::Io(_))));

        let file = write_config("[export\nfallback_name = 1");
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));

        let file = write_config("[observability]\nlog_level = \"loud\"");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref e) if e.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: "));
    }

    #[test]
    fn test_no_path_means_defaults() {
        assert_eq!(load_or_default(None).unwrap(), ToolConfig::default());
    }
}
