//! OpenAI-compatible HTTP transport shared by the chat and embedding
//! adapters. Azure OpenAI, OpenAI, Ollama, and local Jina servers all speak
//! this wire shape; only base URL, auth, and query parameters differ.

use async_stream::try_stream;
use futures_util::StreamExt;
use pconfig::SecretString;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    Message, ModelResponse, ProviderError, Role, StopReason, StreamEvent, TokenStream, TokenUsage,
};

pub enum ApiAuth {
    Bearer {
        api_key: SecretString,
        organization: Option<String>,
    },
    /// Azure OpenAI authenticates with an `api-key` header instead of a
    /// bearer token.
    AzureKey(SecretString),
    /// Local servers (Ollama, Jina) accept unauthenticated requests.
    None,
}

impl std::fmt::Debug for ApiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer { organization, .. } => f
                .debug_struct("ApiAuth::Bearer")
                .field("api_key", &"[REDACTED]")
                .field("organization", organization)
                .finish(),
            Self::AzureKey(_) => f.write_str("ApiAuth::AzureKey([REDACTED])"),
            Self::None => f.write_str("ApiAuth::None"),
        }
    }
}

#[derive(Debug)]
pub struct OpenAiCompatTransport {
    client: Client,
    base_url: String,
    auth: ApiAuth,
    query: Vec<(String, String)>,
}

impl OpenAiCompatTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            auth: ApiAuth::None,
            query: Vec::new(),
        }
    }

    pub fn with_auth(mut self, auth: ApiAuth) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(self.endpoint(path));
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }

        match &self.auth {
            ApiAuth::Bearer {
                api_key,
                organization,
            } => {
                builder = builder.bearer_auth(api_key.expose());
                if let Some(organization) = organization {
                    builder = builder.header("OpenAI-Organization", organization);
                }
                builder
            }
            ApiAuth::AzureKey(api_key) => builder.header("api-key", api_key.expose()),
            ApiAuth::None => builder,
        }
    }

    async fn send(&self, path: &str, body: &impl Serialize) -> Result<Response, ProviderError> {
        let response = self.post(path).json(body).send().await.map_err(|err| {
            if err.is_timeout() {
                ProviderError::timeout(err.to_string())
            } else {
                ProviderError::transport(err.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(parse_error(response).await);
        }

        Ok(response)
    }

    pub async fn chat_completions(
        &self,
        request: WireChatRequest,
    ) -> Result<ModelResponse, ProviderError> {
        let response = self.send("chat/completions", &request).await?;
        let parsed: WireChatResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::transport(err.to_string()))?;

        parsed.into_model_response()
    }

    /// Issues a streaming chat completion and yields `TextDelta` events as
    /// SSE chunks arrive, closing with a single `ResponseComplete`.
    pub async fn stream_chat_completions(
        &self,
        mut request: WireChatRequest,
    ) -> Result<TokenStream<'static>, ProviderError> {
        request.stream = true;
        let response = self.send("chat/completions", &request).await?;
        let fallback_model = request.model;

        let stream = try_stream! {
            let mut chunks = response.bytes_stream();
            let mut sse_buffer = String::new();
            let mut content = String::new();
            let mut model = None::<String>;
            let mut finish_reason = None::<String>;
            let mut done = false;

            while let Some(item) = chunks.next().await {
                let bytes = item.map_err(|err| ProviderError::transport(err.to_string()))?;
                let text = std::str::from_utf8(&bytes)
                    .map_err(|err| ProviderError::transport(err.to_string()))?;
                sse_buffer.push_str(text);

                while let Some(newline_index) = sse_buffer.find('\n') {
                    let line = sse_buffer.drain(..=newline_index).collect::<String>();
                    let line = line.trim();

                    if !line.starts_with("data:") {
                        continue;
                    }

                    let payload = line.trim_start_matches("data:").trim();
                    if payload == "[DONE]" {
                        done = true;
                        break;
                    }

                    let parsed: WireStreamResponse = serde_json::from_str(payload)
                        .map_err(|err| ProviderError::transport(err.to_string()))?;

                    if model.is_none() && !parsed.model.is_empty() {
                        model = Some(parsed.model);
                    }

                    if let Some(choice) = parsed.choices.first() {
                        if let Some(reason) = &choice.finish_reason {
                            finish_reason = Some(reason.clone());
                        }

                        if let Some(delta) = &choice.delta.content {
                            if !delta.is_empty() {
                                content.push_str(delta);
                                yield StreamEvent::TextDelta(delta.clone());
                            }
                        }
                    }
                }

                if done {
                    break;
                }
            }

            yield StreamEvent::ResponseComplete(ModelResponse {
                model: model.unwrap_or(fallback_model),
                content,
                stop_reason: map_finish_reason(finish_reason.as_deref()),
                usage: TokenUsage::default(),
            });
        };

        Ok(Box::pin(stream) as TokenStream<'static>)
    }

    pub async fn embeddings(
        &self,
        model: &str,
        input: Vec<String>,
    ) -> Result<Vec<Vec<f32>>, ProviderError> {
        if input.is_empty() {
            return Err(ProviderError::invalid_request(
                "embedding input must not be empty",
            ));
        }

        let request = WireEmbeddingsRequest {
            model: model.to_string(),
            input,
        };

        let response = self.send("embeddings", &request).await?;
        let parsed: WireEmbeddingsResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::transport(err.to_string()))?;

        let mut data = parsed.data;
        data.sort_by_key(|item| item.index);
        Ok(data.into_iter().map(|item| item.embedding).collect())
    }
}

async fn parse_error(response: Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body)
        .unwrap_or_else(|| format!("provider request failed with status {status}"));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::authentication(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderError::timeout(message)
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(message)
        }
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::BAD_GATEWAY => ProviderError::unavailable(message),
        _ => ProviderError::transport(message),
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

fn map_finish_reason(value: Option<&str>) -> StopReason {
    match value {
        Some("stop") => StopReason::EndTurn,
        Some("length") => StopReason::MaxTokens,
        _ => StopReason::Other,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WireChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl From<Message> for WireMessage {
    fn from(message: Message) -> Self {
        let role = match message.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };

        Self {
            role: role.to_string(),
            content: message.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireChatResponse {
    #[serde(default)]
    model: String,
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

impl WireChatResponse {
    fn into_model_response(self) -> Result<ModelResponse, ProviderError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::transport("response contained no choices"))?;

        Ok(ModelResponse {
            model: self.model,
            content: choice.message.content,
            stop_reason: map_finish_reason(choice.finish_reason.as_deref()),
            usage: self.usage.map(WireUsage::into_token_usage).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl WireUsage {
    fn into_token_usage(self) -> TokenUsage {
        TokenUsage {
            input_tokens: self.prompt_tokens,
            output_tokens: self.completion_tokens,
            total_tokens: self.total_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireStreamResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<WireStreamChoice>,
}

#[derive(Debug, Deserialize)]
struct WireStreamChoice {
    delta: WireDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct WireEmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireEmbeddingsResponse {
    data: Vec<WireEmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct WireEmbeddingItem {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}
