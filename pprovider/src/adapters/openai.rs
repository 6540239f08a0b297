//! OpenAI chat and embedding clients.

use pconfig::OpenAiCredentials;
use reqwest::Client;

use crate::transport::{ApiAuth, OpenAiCompatTransport, WireChatRequest, WireMessage};
use crate::{
    ChatModel, ChatProviderKind, EmbeddingModel, EmbeddingProviderKind, ModelRequest,
    ModelResponse, ProviderError, ProviderFuture, TokenStream,
};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;

pub struct OpenAiChatModel {
    transport: OpenAiCompatTransport,
    model: String,
    streaming: bool,
}

impl OpenAiChatModel {
    pub fn new(credentials: &OpenAiCredentials, model: impl Into<String>, client: Client) -> Self {
        let auth = ApiAuth::Bearer {
            api_key: credentials.api_key.clone(),
            organization: Some(credentials.organization.clone()),
        };

        Self {
            transport: OpenAiCompatTransport::new(client, OPENAI_BASE_URL).with_auth(auth),
            model: model.into(),
            streaming: true,
        }
    }

    fn wire_request(&self, request: ModelRequest, stream: bool) -> WireChatRequest {
        build_wire_request(&self.model, request, stream)
    }
}

impl ChatModel for OpenAiChatModel {
    fn kind(&self) -> ChatProviderKind {
        ChatProviderKind::OpenAi
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
            let wire = self.wire_request(request, false);
            self.transport.chat_completions(wire).await
        })
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<TokenStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let wire = self.wire_request(request, true);
            self.transport.stream_chat_completions(wire).await
        })
    }
}

pub struct OpenAiEmbeddings {
    transport: OpenAiCompatTransport,
    model: String,
    dimension: usize,
}

impl OpenAiEmbeddings {
    pub fn new(credentials: &OpenAiCredentials, model: impl Into<String>, client: Client) -> Self {
        let auth = ApiAuth::Bearer {
            api_key: credentials.api_key.clone(),
            organization: Some(credentials.organization.clone()),
        };

        Self {
            transport: OpenAiCompatTransport::new(client, OPENAI_BASE_URL).with_auth(auth),
            model: model.into(),
            dimension: DEFAULT_EMBEDDING_DIMENSION,
        }
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }
}

impl EmbeddingModel for OpenAiEmbeddings {
    fn kind(&self) -> EmbeddingProviderKind {
        EmbeddingProviderKind::OpenAi
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

pub(crate) fn build_wire_request(
    model: &str,
    request: ModelRequest,
    stream: bool,
) -> WireChatRequest {
    WireChatRequest {
        model: model.to_string(),
        messages: request
            .messages
            .into_iter()
            .map(WireMessage::from)
            .collect(),
        temperature: request.options.temperature,
        max_tokens: request.options.max_tokens,
        stream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Message, Role};
    use pconfig::SecretString;

    fn credentials() -> OpenAiCredentials {
        OpenAiCredentials {
            api_key: SecretString::new("sk-test"),
            organization: "org-1".to_string(),
        }
    }

    #[test]
    fn chat_client_reports_kind_model_and_streaming() {
        let model = OpenAiChatModel::new(&credentials(), "gpt-4o-mini", Client::new());
        assert_eq!(model.kind(), ChatProviderKind::OpenAi);
        assert_eq!(model.model_name(), "gpt-4o-mini");
        assert!(model.streaming_enabled());
    }

    #[test]
    fn wire_request_carries_conversation_and_options() {
        let model = OpenAiChatModel::new(&credentials(), "gpt-4o-mini", Client::new());
        let request = ModelRequest::new(vec![Message::new(Role::User, "hi")])
            .with_temperature(0.3)
            .with_max_tokens(64);

        let wire = model.wire_request(request, true);
        assert_eq!(wire.model, "gpt-4o-mini");
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.temperature, Some(0.3));
        assert_eq!(wire.max_tokens, Some(64));
        assert!(wire.stream);
    }

    #[test]
    fn embeddings_default_dimension_can_be_overridden() {
        let embeddings = OpenAiEmbeddings::new(&credentials(), "text-embedding-3-small", Client::new())
            .with_dimension(768);
        assert_eq!(embeddings.dimension(), 768);
        assert_eq!(embeddings.kind(), EmbeddingProviderKind::OpenAi);
    }
}
