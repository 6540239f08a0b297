//! Ollama chat client over the OpenAI-compatible `/v1` surface.
//!
//! Ollama carries its own endpoint and model name in the `llm` section and
//! consults no shared credential block; local servers accept
//! unauthenticated requests.

use reqwest::Client;

use crate::adapters::openai::build_wire_request;
use crate::transport::OpenAiCompatTransport;
use crate::{
    ChatModel, ChatProviderKind, ModelRequest, ModelResponse, ProviderError, ProviderFuture,
    TokenStream,
};

pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";

pub struct OllamaChatModel {
    transport: OpenAiCompatTransport,
    model: String,
    streaming: bool,
}

impl OllamaChatModel {
    pub fn new(endpoint: &str, model: impl Into<String>, client: Client) -> Self {
        let base_url = format!("{}/v1", endpoint.trim_end_matches('/'));
        Self {
            transport: OpenAiCompatTransport::new(client, base_url),
            model: model.into(),
            streaming: true,
        }
    }
}

impl ChatModel for OllamaChatModel {
    fn kind(&self) -> ChatProviderKind {
        ChatProviderKind::Ollama
    }

    fn model_name(&self) -> &str {
        &self.model
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
            let wire = build_wire_request(&self.model, request, false);
            self.transport.chat_completions(wire).await
        })
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<TokenStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let wire = build_wire_request(&self.model, request, true);
            self.transport.stream_chat_completions(wire).await
        })
    }
}
