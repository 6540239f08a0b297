//! Provider resolution: turning the validated configuration into concrete
//! chat and embedding clients.
//!
//! Each resolver is a closed, exhaustive dispatch over the configuration
//! discriminant. The discriminant fully determines which variant fields are
//! read and which shared credential block is consulted; an unrecognized
//! discriminant never reaches this layer because validation rejects it
//! first. Adding a provider means adding a variant and a constructor arm.

use std::sync::Arc;
use std::time::Duration;

use pconfig::{Config, EmbeddingConfig, LlmConfig};
use reqwest::Client;

use crate::adapters::azure::{AzureChatModel, AzureEmbeddings};
use crate::adapters::jina::JinaEmbeddings;
use crate::adapters::ollama::OllamaChatModel;
use crate::adapters::openai::{OpenAiChatModel, OpenAiEmbeddings};
use crate::{ChatModel, EmbeddingModel, ProviderError};

pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(90);

/// Selects and constructs the chat client matching `config.llm`. Streaming
/// is enabled on every constructed client. Construction failures are fatal
/// at startup; no fallback provider is attempted.
pub fn resolve_chat_model(config: &Config) -> Result<Arc<dyn ChatModel>, ProviderError> {
    let client = http_client()?;

    match &config.llm {
        LlmConfig::Azure { deployment } => {
            let azure = shared_azure_block(config)?;
            Ok(Arc::new(AzureChatModel::new(azure, deployment, client)))
        }
        LlmConfig::Ollama { endpoint, name } => {
            Ok(Arc::new(OllamaChatModel::new(endpoint, name, client)))
        }
        LlmConfig::OpenAi { name } => {
            let openai = shared_openai_block(config)?;
            Ok(Arc::new(OpenAiChatModel::new(openai, name, client)))
        }
    }
}

/// Selects and constructs the embedding client matching `config.embedding`.
pub fn resolve_embedding_model(
    config: &Config,
) -> Result<Arc<dyn EmbeddingModel>, ProviderError> {
    let client = http_client()?;

    match &config.embedding {
        EmbeddingConfig::Jina {
            name,
            revision,
            endpoint,
        } => Ok(Arc::new(JinaEmbeddings::new(
            name,
            revision.as_deref(),
            endpoint.as_deref(),
            client,
        ))),
        EmbeddingConfig::Azure { deployment } => {
            let azure = shared_azure_block(config)?;
            Ok(Arc::new(AzureEmbeddings::new(azure, deployment, client)))
        }
        EmbeddingConfig::OpenAi { name } => {
            let openai = shared_openai_block(config)?;
            Ok(Arc::new(OpenAiEmbeddings::new(openai, name, client)))
        }
    }
}

fn http_client() -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(PROVIDER_TIMEOUT)
        .build()
        .map_err(|err| ProviderError::initialization(err.to_string()))
}

fn shared_azure_block(config: &Config) -> Result<&pconfig::AzureCredentials, ProviderError> {
    config.azure.as_ref().ok_or_else(|| {
        ProviderError::initialization(
            "azure provider selected but the [azure] credentials section is missing",
        )
    })
}

fn shared_openai_block(config: &Config) -> Result<&pconfig::OpenAiCredentials, ProviderError> {
    config.openai.as_ref().ok_or_else(|| {
        ProviderError::initialization(
            "openai provider selected but the [openai] credentials section is missing",
        )
    })
}
