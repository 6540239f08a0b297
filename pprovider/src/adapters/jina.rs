//! Jina embedding client for a locally hosted embedding server.
//!
//! The configured model name (optionally pinned to a revision) is served by
//! an OpenAI-compatible embeddings endpoint; the default endpoint targets a
//! local server, matching the self-hosted deployment this variant is for.

use reqwest::Client;

use crate::transport::OpenAiCompatTransport;
use crate::{EmbeddingModel, EmbeddingProviderKind, ProviderError, ProviderFuture};

pub const DEFAULT_JINA_ENDPOINT: &str = "http://localhost:8080";

const DEFAULT_EMBEDDING_DIMENSION: usize = 768;

pub struct JinaEmbeddings {
    transport: OpenAiCompatTransport,
    model: String,
    dimension: usize,
}

impl JinaEmbeddings {
    pub fn new(
        name: impl Into<String>,
        revision: Option<&str>,
        endpoint: Option<&str>,
        client: Client,
    ) -> Self {
        let name = name.into();
        let model = match revision {
            Some(revision) if !revision.trim().is_empty() => format!("{name}@{revision}"),
            _ => name,
        };

        let endpoint = endpoint.unwrap_or(DEFAULT_JINA_ENDPOINT);
        let base_url = format!("{}/v1", endpoint.trim_end_matches('/'));

        Self {
            transport: OpenAiCompatTransport::new(client, base_url),
            model,
            dimension: DEFAULT_EMBEDDING_DIMENSION,
        }
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }
}

impl EmbeddingModel for JinaEmbeddings {
    fn kind(&self) -> EmbeddingProviderKind {
        EmbeddingProviderKind::Jina
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed<'a>(
        &'a self,
        texts: Vec<String>,
    ) -> ProviderFuture<'a, Result<Vec<Vec<f32>>, ProviderError>> {
        Box::pin(async move { self.transport.embeddings(&self.model, texts).await })
    }
}
