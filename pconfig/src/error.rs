//! Configuration error kinds and helpers.
//!
//! ```rust
//! use pconfig::{ConfigError, ConfigErrorKind};
//!
//! let missing = ConfigError::not_found("config.toml does not exist");
//! assert_eq!(missing.kind, ConfigErrorKind::NotFound);
//!
//! let invalid = ConfigError::validation("llm.type must be one of azure, ollama, openai");
//! assert_eq!(invalid.kind, ConfigErrorKind::Validation);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    NotFound,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Validation, message)
    }

    pub fn is_fatal(&self) -> bool {
        // Every configuration failure aborts startup; there is no degraded mode.
        true
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ConfigErrorKind::NotFound => write!(f, "configuration not found: {}", self.message),
            ConfigErrorKind::Validation => write!(f, "invalid configuration: {}", self.message),
        }
    }
}

impl Error for ConfigError {}
