//! Embedding-model capability contract.

use std::fmt::{Display, Formatter};

use crate::{ProviderError, ProviderFuture};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbeddingProviderKind {
    Jina,
    Azure,
    OpenAi,
}

impl Display for EmbeddingProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Jina => "jina",
            Self::Azure => "azure",
            Self::OpenAi => "openai",
        };

        f.write_str(kind)
    }
}

impl std::fmt::Debug for dyn EmbeddingModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingModel")
            .field("kind", &self.kind())
            .field("model_name", &self.model_name())
            .finish_non_exhaustive()
    }
}

pub trait EmbeddingModel: Send + Sync {
    fn kind(&self) -> EmbeddingProviderKind;

    fn model_name(&self) -> &str;

    /// Vector width produced by this model. Known per adapter; no network
    /// request is issued.
    fn dimension(&self) -> usize;

    fn embed<'a>(
        &'a self,
        texts: Vec<String>,
    ) -> ProviderFuture<'a, Result<Vec<Vec<f32>>, ProviderError>>;

    fn embed_query<'a>(
        &'a self,
        text: String,
    ) -> ProviderFuture<'a, Result<Vec<f32>, ProviderError>> {
        let batch = self.embed(vec![text]);
        Box::pin(async move {
            let mut vectors = batch.await?;
            vectors
                .pop()
                .ok_or_else(|| ProviderError::other("embedding response was empty"))
        })
    }
}
