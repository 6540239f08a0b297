//! Chat-model capability contract.

use std::fmt::{Display, Formatter};

use crate::{ModelRequest, ModelResponse, ProviderError, ProviderFuture, TokenStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatProviderKind {
    Azure,
    Ollama,
    OpenAi,
}

impl Display for ChatProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Azure => "azure",
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
        };

        f.write_str(kind)
    }
}

/// A resolved chat client: given a conversation, produce a response,
/// optionally incrementally. Constructed once per process and shared
/// read-only across sessions.
impl std::fmt::Debug for dyn ChatModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatModel")
            .field("kind", &self.kind())
            .field("model_name", &self.model_name())
            .finish_non_exhaustive()
    }
}

pub trait ChatModel: Send + Sync {
    fn kind(&self) -> ChatProviderKind;

    /// The configured model or deployment name this client targets.
    fn model_name(&self) -> &str;

    /// Every resolved chat client delivers responses incrementally to the
    /// session layer; this always reports `true` for built-in adapters.
    fn streaming_enabled(&self) -> bool;

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<TokenStream<'a>, ProviderError>>;
}
