//! Typed configuration tree for the assistant backend.
//!
//! The `llm` and `embedding` sections are discriminated unions: the `type`
//! field selects which variant's fields are required, and which shared
//! credential block (`[azure]` or `[openai]`) the provider resolver will
//! consult. Exactly one variant of each union is active per process.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{ConfigError, SecretString};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub core: CoreConfig,
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub azure: Option<AzureCredentials>,
    #[serde(default)]
    pub openai: Option<OpenAiCredentials>,
    pub jira: JiraConfig,
    pub source: SourceConfig,
}

impl Config {
    /// Cross-field checks that serde alone cannot express: the selected
    /// discriminants determine which shared credential blocks must exist.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.llm {
            LlmConfig::Azure { deployment } => {
                require_field(!deployment.trim().is_empty(), "llm.deployment")?;
                self.require_azure_block("llm.type = \"azure\"")?;
            }
            LlmConfig::Ollama { endpoint, name } => {
                require_field(!endpoint.trim().is_empty(), "llm.endpoint")?;
                require_field(!name.trim().is_empty(), "llm.name")?;
            }
            LlmConfig::OpenAi { name } => {
                require_field(!name.trim().is_empty(), "llm.name")?;
                self.require_openai_block("llm.type = \"openai\"")?;
            }
        }

        match &self.embedding {
            EmbeddingConfig::Jina { name, .. } => {
                require_field(!name.trim().is_empty(), "embedding.name")?;
            }
            EmbeddingConfig::Azure { deployment } => {
                require_field(!deployment.trim().is_empty(), "embedding.deployment")?;
                self.require_azure_block("embedding.type = \"azure\"")?;
            }
            EmbeddingConfig::OpenAi { name } => {
                require_field(!name.trim().is_empty(), "embedding.name")?;
                self.require_openai_block("embedding.type = \"openai\"")?;
            }
        }

        require_field(!self.jira.url.trim().is_empty(), "jira.url")?;
        require_field(!self.jira.username.trim().is_empty(), "jira.username")?;

        Ok(())
    }

    fn require_azure_block(&self, selector: &str) -> Result<&AzureCredentials, ConfigError> {
        let azure = self.azure.as_ref().ok_or_else(|| {
            ConfigError::validation(format!("{selector} requires an [azure] credentials section"))
        })?;

        if azure.endpoint.trim().is_empty() {
            return Err(ConfigError::validation("azure.endpoint must not be empty"));
        }

        if azure.api_key.is_empty() {
            return Err(ConfigError::validation("azure.api_key must not be empty"));
        }

        Ok(azure)
    }

    fn require_openai_block(&self, selector: &str) -> Result<&OpenAiCredentials, ConfigError> {
        let openai = self.openai.as_ref().ok_or_else(|| {
            ConfigError::validation(format!("{selector} requires an [openai] credentials section"))
        })?;

        if openai.api_key.is_empty() {
            return Err(ConfigError::validation("openai.api_key must not be empty"));
        }

        Ok(openai)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    #[serde(default)]
    pub logging_level: LogLevel,
}

impl CoreConfig {
    /// Cache directory for locally managed embedding models.
    pub fn models_dir(&self) -> PathBuf {
        self.data_dir.join("models")
    }

    /// Sentinel file touched when source data has been refreshed.
    pub fn sentinel_path(&self) -> PathBuf {
        self.data_dir.join("data_updated.flag")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chat-model provider selection. The discriminant fully determines the
/// required fields; azure and openai variants additionally consult the
/// matching shared credential block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LlmConfig {
    Azure { deployment: String },
    Ollama { endpoint: String, name: String },
    OpenAi { name: String },
}

/// Embedding-model provider selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmbeddingConfig {
    Jina {
        name: String,
        #[serde(default)]
        revision: Option<String>,
        #[serde(default)]
        endpoint: Option<String>,
    },
    Azure {
        deployment: String,
    },
    OpenAi {
        name: String,
    },
}

/// Shared Azure OpenAI credentials, consulted by any section whose
/// discriminant is `azure`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AzureCredentials {
    pub endpoint: String,
    pub api_key: SecretString,
    pub api_version: String,
}

/// Shared OpenAI credentials, consulted by any section whose discriminant
/// is `openai`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenAiCredentials {
    pub api_key: SecretString,
    pub organization: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JiraConfig {
    pub url: String,
    pub username: String,
    pub api_token: SecretString,
    #[serde(default)]
    pub polling: Option<JiraPolling>,
}

/// Default issue poll used by background summarization jobs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JiraPolling {
    pub project: String,
    pub status: String,
    pub assignee: String,
}

impl JiraPolling {
    pub fn jql(&self) -> String {
        format!(
            "project = \"{}\" and status = \"{}\" and assignee = \"{}\" ORDER BY created ASC",
            self.project, self.status, self.assignee
        )
    }
}

/// Data-source settings for the QA pipeline. Opaque to this core; the QA
/// delegate interprets the table.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct SourceConfig(pub toml::Table);

impl SourceConfig {
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.0.get(key)
    }
}

fn require_field(present: bool, field: &str) -> Result<(), ConfigError> {
    if present {
        Ok(())
    } else {
        Err(ConfigError::validation(format!(
            "{field} must be present and non-empty"
        )))
    }
}

/// Normalizes a path for display in diagnostics.
pub(crate) fn display_path(path: &Path) -> String {
    path.display().to_string()
}
