//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that the export fallback name can be used as a file stem
//! - Check that the log level is one the subscriber understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ToolConfig → Result<(), Vec<String>>
//! - Runs before config is accepted into the system

use crate::config::schema::ToolConfig;
use crate::observability::logging::LOG_LEVELS;

/// Check a parsed configuration. Every problem is returned.
pub fn validate_config(config: &ToolConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let fallback = &config.export.fallback_name;
    if fallback.trim().is_empty() {
        errors.push("export.fallback_name must not be empty".to_string());
    } else if !fallback
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        errors.push(format!(
            "export.fallback_name `{}` may only contain letters, digits, `_` and `-`",
            fallback
        ));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(format!(
            "observability.log_level `{}` is not one of {}",
            config.observability.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ToolConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_problem() {
        let mut config = ToolConfig::default();
        config.export.fallback_name = "my config".into();
        config.observability.log_level = "verbose".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("fallback_name"));
        assert!(errors[1].contains("verbose"));
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let mut config = ToolConfig::default();
        config.observability.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());

        config.export.fallback_name = "  ".into();
        assert_eq!(validate_config(&config).unwrap_err().len(), 1);
    }
}
