//! Azure OpenAI chat and embedding clients.
//!
//! Azure routes requests per deployment: the base URL embeds the deployment
//! name and an `api-version` query parameter, and authentication uses an
//! `api-key` header. Endpoint, key, and api-version come from the shared
//! `[azure]` credentials block, not from the `llm`/`embedding` sections.

use pconfig::AzureCredentials;
use reqwest::Client;

use crate::adapters::openai::build_wire_request;
use crate::transport::{ApiAuth, OpenAiCompatTransport};
use crate::{
    ChatModel, ChatProviderKind, EmbeddingModel, EmbeddingProviderKind, ModelRequest,
    ModelResponse, ProviderError, ProviderFuture, TokenStream,
};

const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

fn deployment_transport(
    credentials: &AzureCredentials,
    deployment: &str,
    client: Client,
) -> OpenAiCompatTransport {
    let base_url = format!(
        "{}/openai/deployments/{deployment}",
        credentials.endpoint.trim_end_matches('/')
    );

    OpenAiCompatTransport::new(client, base_url)
        .with_auth(ApiAuth::AzureKey(credentials.api_key.clone()))
        .with_query("api-version", credentials.api_version.clone())
}

pub struct AzureChatModel {
    transport: OpenAiCompatTransport,
    deployment: String,
    streaming: bool,
}

impl AzureChatModel {
    pub fn new(
        credentials: &AzureCredentials,
        deployment: impl Into<String>,
        client: Client,
    ) -> Self {
        let deployment = deployment.into();
        Self {
            transport: deployment_transport(credentials, &deployment, client),
            deployment,
            streaming: true,
        }
    }
}

impl ChatModel for AzureChatModel {
    fn kind(&self) -> ChatProviderKind {
        ChatProviderKind::Azure
    }

    fn model_name(&self) -> &str {
        &self.deployment
    }

    fn streaming_enabled(&self) -> bool {
        self.streaming
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let wire = build_wire_request(&self.deployment, request, false);
            self.transport.chat_completions(wire).await
        })
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<TokenStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let wire = build_wire_request(&self.deployment, request, true);
            self.transport.stream_chat_completions(wire).await
        })
    }
}

pub struct AzureEmbeddings {
    transport: OpenAiCompatTransport,
    deployment: String,
    dimension: usize,
}

impl AzureEmbeddings {
    pub fn new(
        credentials: &AzureCredentials,
        deployment: impl Into<String>,
        client: Client,
    ) -> Self {
        let deployment = deployment.into();
        Self {
            transport: deployment_transport(credentials, &deployment, client),
            deployment,
            dimension: DEFAULT_EMBEDDING_DIMENSION,
        }
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }
}

impl EmbeddingModel for AzureEmbeddings {
    fn kind(&self) -> EmbeddingProviderKind {
        EmbeddingProviderKind::Azure
    }

    fn model_name(&self) -> &str {
        &self.deployment
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed<'a>(
        &'a self,
        texts: Vec<String>,
    ) -> ProviderFuture<'a, Result<Vec<Vec<f32>>, ProviderError>> {
        Box::pin(async move { self.transport.embeddings(&self.deployment, texts).await })
    }
}
