//! Configuration file loading and fail-fast validation.
//!
//! ```rust
//! use pconfig::{load_config, ConfigErrorKind};
//!
//! let error = load_config("/definitely/not/here.toml".as_ref()).unwrap_err();
//! assert_eq!(error.kind, ConfigErrorKind::NotFound);
//! ```

use std::path::{Path, PathBuf};

use crate::model::display_path;
use crate::{Config, ConfigError};

pub const CONFIG_PATH_ENV: &str = "PARLEY_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Resolves the configuration path from the environment, falling back to
/// `config.toml` in the working directory.
pub fn config_path_from_env() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Reads, parses, and validates the configuration document at `path`.
///
/// Missing files surface as `ConfigErrorKind::NotFound`; parse failures,
/// missing keys, wrong types, and unknown discriminants surface as
/// `ConfigErrorKind::Validation`. Either outcome is fatal to startup.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        ConfigError::not_found(format!("{}: {err}", display_path(path)))
    })?;

    parse_config(&raw)
}

/// Parses and validates a raw configuration document.
pub fn parse_config(raw: &str) -> Result<Config, ConfigError> {
    let config: Config =
        toml::from_str(raw).map_err(|err| ConfigError::validation(err.message().to_string()))?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigErrorKind;

    const VALID_OPENAI: &str = r#"
        [core]
        data_dir = "/tmp/parley-data"
        logging_level = "debug"

        [llm]
        type = "openai"
        name = "gpt-4o-mini"

        [embedding]
        type = "openai"
        name = "text-embedding-3-small"

        [openai]
        api_key = "sk-test"
        organization = "org-123"

        [jira]
        url = "https://jira.example.com"
        username = "bot"
        api_token = "jira-token"

        [source]
        root = "/srv/docs"
    "#;

    #[test]
    fn parse_config_accepts_a_complete_document() {
        let config = parse_config(VALID_OPENAI).expect("config should parse");
        assert_eq!(config.core.logging_level, crate::LogLevel::Debug);
        assert!(config.azure.is_none());
        assert_eq!(config.source.get("root").and_then(|v| v.as_str()), Some("/srv/docs"));
    }

    #[test]
    fn missing_file_maps_to_not_found() {
        let error = load_config("/no/such/parley.toml".as_ref()).unwrap_err();
        assert_eq!(error.kind, ConfigErrorKind::NotFound);
    }

    #[test]
    fn unknown_discriminant_fails_validation() {
        let raw = VALID_OPENAI.replace("type = \"openai\"", "type = \"mystery\"");
        let error = parse_config(&raw).unwrap_err();
        assert_eq!(error.kind, ConfigErrorKind::Validation);
    }

    #[test]
    fn missing_required_field_for_selected_variant_fails_validation() {
        let raw = VALID_OPENAI.replace("name = \"gpt-4o-mini\"", "");
        let error = parse_config(&raw).unwrap_err();
        assert_eq!(error.kind, ConfigErrorKind::Validation);
    }

    #[test]
    fn openai_discriminant_without_credentials_block_fails_validation() {
        let raw = VALID_OPENAI
            .replace("[openai]", "[openai_disabled]")
            .replace("organization = \"org-123\"", "");
        let error = parse_config(&raw).unwrap_err();
        assert_eq!(error.kind, ConfigErrorKind::Validation);
    }

    #[test]
    fn config_path_falls_back_to_default() {
        // Only meaningful when the override is unset in the test environment.
        if std::env::var_os(CONFIG_PATH_ENV).is_none() {
            assert_eq!(config_path_from_env(), PathBuf::from(DEFAULT_CONFIG_PATH));
        }
    }
}
