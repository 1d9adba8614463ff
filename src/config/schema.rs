//! Configuration schema definitions.
//!
//! This module defines the tool configuration read from TOML.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::observability::logging::LogFormat;
use crate::validation::ValidationOptions;

/// Root configuration for the document tooling.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ToolConfig {
    /// Policy knobs for the semantic rules.
    pub validation: ValidationOptions,

    /// How documents are written out.
    pub export: ExportSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportSettings {
    /// File stem used when the registration is blank.
    pub fallback_name: String,

    /// Indented output instead of a single line.
    pub pretty: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            fallback_name: "config".to_string(),
            pretty: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ToolConfig = toml::from_str("").unwrap();
        assert_eq!(config, ToolConfig::default());
        assert!(config.validation.require_complete_variations);
        assert_eq!(config.export.fallback_name, "config");
    }

    #[test]
    fn test_partial_sections() {
        let config: ToolConfig = toml::from_str(
            r#"
            [validation]
            single_default = true

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert!(config.validation.single_default);
        assert!(config.validation.require_complete_variations);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.export.pretty);
    }
}
