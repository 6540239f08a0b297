use std::sync::Arc;

use futures_util::StreamExt;
use pprovider::{
    ChatModel, ChatProviderKind, EmbeddingModel, EmbeddingProviderKind, Message, ModelRequest,
    ModelResponse, ProviderError, ProviderFuture, Role, StopReason, StreamEvent, TokenStream,
    TokenUsage,
};

struct FakeChatModel;

impl ChatModel for FakeChatModel {
    fn kind(&self) -> ChatProviderKind {
        ChatProviderKind::OpenAi
    }

    fn model_name(&self) -> &str {
        "fake-chat"
    }

    fn streaming_enabled(&self) -> bool {
        true
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            Ok(ModelResponse {
                model: "fake-chat".to_string(),
                content: "hello from the model".to_string(),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            })
        })
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<TokenStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let events = vec![
                Ok(StreamEvent::TextDelta("hello".to_string())),
                Ok(StreamEvent::TextDelta(" world".to_string())),
                Ok(StreamEvent::ResponseComplete(ModelResponse {
                    model: "fake-chat".to_string(),
                    content: "hello world".to_string(),
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage::default(),
                })),
            ];

            Ok(Box::pin(futures_util::stream::iter(events)) as TokenStream<'a>)
        })
    }
}

struct FakeEmbeddings;

impl EmbeddingModel for FakeEmbeddings {
    fn kind(&self) -> EmbeddingProviderKind {
        EmbeddingProviderKind::Jina
    }

    fn model_name(&self) -> &str {
        "fake-embed"
    }

    fn dimension(&self) -> usize {
        3
    }

    fn embed<'a>(
        &'a self,
        texts: Vec<String>,
    ) -> ProviderFuture<'a, Result<Vec<Vec<f32>>, ProviderError>> {
        Box::pin(async move {
            Ok(texts
                .iter()
                .map(|text| vec![text.len() as f32, 0.0, 1.0])
                .collect())
        })
    }
}

#[tokio::test]
async fn chat_model_trait_objects_complete_and_stream() {
    let model: Arc<dyn ChatModel> = Arc::new(FakeChatModel);

    let request = ModelRequest::new(vec![Message::new(Role::User, "hi")]);
    let response = model.complete(request).await.expect("completion works");
    assert_eq!(response.content, "hello from the model");

    let request = ModelRequest::new(vec![Message::new(Role::User, "hi")]).enable_streaming();
    let mut stream = model.stream(request).await.expect("stream builds");

    let mut text = String::new();
    let mut completed = false;
    while let Some(event) = stream.next().await {
        match event.expect("event should be ok") {
            StreamEvent::TextDelta(delta) => text.push_str(&delta),
            StreamEvent::ResponseComplete(response) => {
                completed = true;
                assert_eq!(response.content, text);
            }
        }
    }

    assert!(completed);
    assert_eq!(text, "hello world");
}

#[tokio::test]
async fn embed_query_defaults_to_a_single_batch_call() {
    let embeddings: Arc<dyn EmbeddingModel> = Arc::new(FakeEmbeddings);

    let vector = embeddings
        .embed_query("abc".to_string())
        .await
        .expect("query embedding works");

    assert_eq!(vector, vec![3.0, 0.0, 1.0]);
    assert_eq!(vector.len(), embeddings.dimension());
}
