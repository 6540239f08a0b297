//! Declarative configuration model, loader, and validator.
//!
//! The configuration is loaded once at process start and is immutable
//! afterwards; a new process is required to pick up changes. Any loading or
//! validation failure is fatal to startup.

mod error;
mod loader;
mod model;
mod secret;

pub use error::{ConfigError, ConfigErrorKind};
pub use loader::{
    config_path_from_env, load_config, parse_config, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH,
};
pub use model::{
    AzureCredentials, Config, CoreConfig, EmbeddingConfig, JiraConfig, JiraPolling, LlmConfig,
    LogLevel, OpenAiCredentials, SourceConfig,
};
pub use secret::SecretString;
