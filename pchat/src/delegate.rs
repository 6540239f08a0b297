//! Question-answering delegate contract and the model-backed default.

use std::sync::Arc;

use pcommon::{BoxFuture, SessionId};
use pprovider::{ChatModel, ModelRequest};
use ptooling::ToolRegistry;

use crate::{ChatMode, ConversationContext, DelegateError, IncomingMessage};

/// Answers messages inside a session. The orchestrator treats this as an
/// opaque capability; anything with conversation context in and text out
/// qualifies.
pub trait QaDelegate: Send + Sync {
    fn on_chat_start<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> BoxFuture<'a, Result<ConversationContext, DelegateError>>;

    fn on_message<'a>(
        &'a self,
        context: &'a mut ConversationContext,
        message: &'a IncomingMessage,
    ) -> BoxFuture<'a, Result<String, DelegateError>>;
}

/// Default delegate: relays each turn to the resolved chat model, with a
/// system prompt that advertises the registered tools.
pub struct ModelQaDelegate {
    mode: ChatMode,
    model: Arc<dyn ChatModel>,
    tools: ToolRegistry,
}

impl ModelQaDelegate {
    pub fn new(mode: ChatMode, model: Arc<dyn ChatModel>, tools: ToolRegistry) -> Self {
        Self { mode, model, tools }
    }

    fn system_prompt(&self) -> String {
        let mut prompt = String::from(
            "You are a helpful assistant. Answer the user's questions directly and concisely.",
        );
        if !self.tools.is_empty() {
            prompt.push_str("\n\nYou have access to the following tools:\n");
            for spec in self.tools.specs() {
                prompt.push_str(&format!("- {}: {}\n", spec.name, spec.description));
            }
        }
        prompt
    }
}

impl QaDelegate for ModelQaDelegate {
    fn on_chat_start<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> BoxFuture<'a, Result<ConversationContext, DelegateError>> {
        Box::pin(async move {
            Ok(ConversationContext::new(session_id.clone())
                .with_system_prompt(self.system_prompt()))
        })
    }

    fn on_message<'a>(
        &'a self,
        context: &'a mut ConversationContext,
        message: &'a IncomingMessage,
    ) -> BoxFuture<'a, Result<String, DelegateError>> {
        Box::pin(async move {
            let request = ModelRequest::new(context.prompt_for(self.mode, &message.text));
            request.validate()?;

            let response = self.model.complete(request).await?;
            context.record_turn(&message.text, &response.content);
            Ok(response.content)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pprovider::{
        ChatProviderKind, ModelResponse, ProviderError, ProviderFuture, Role, StopReason,
        TokenStream, TokenUsage,
    };
    use ptooling::{Tool, ToolError, ToolSpec};

    struct EchoModel;

    impl ChatModel for EchoModel {
        fn kind(&self) -> ChatProviderKind {
            ChatProviderKind::OpenAi
        }

        fn model_name(&self) -> &str {
            "echo"
        }

        fn streaming_enabled(&self) -> bool {
            false
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                let content = request
                    .messages
                    .last()
                    .map(|message| format!("echo: {}", message.content))
                    .unwrap_or_default();
                Ok(ModelResponse {
                    model: "echo".to_string(),
                    content,
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage::default(),
                })
            })
        }

        fn stream<'a>(
            &'a self,
            _request: ModelRequest,
        ) -> ProviderFuture<'a, Result<TokenStream<'a>, ProviderError>> {
            unimplemented!("streaming is not exercised by the delegate tests")
        }
    }

    struct NoopTool;

    impl Tool for NoopTool {
        fn spec(&self) -> ToolSpec {
            ToolSpec::new("noop", "Does nothing useful.")
        }

        fn invoke(&self, _input: &str) -> Result<String, ToolError> {
            Ok(String::new())
        }
    }

    fn delegate() -> ModelQaDelegate {
        let mut tools = ToolRegistry::new();
        tools.register(NoopTool);
        ModelQaDelegate::new(ChatMode::Conversational, Arc::new(EchoModel), tools)
    }

    #[tokio::test]
    async fn start_builds_a_context_advertising_the_tools() {
        let delegate = delegate();
        let session_id = SessionId::new("s1");
        let context = delegate.on_chat_start(&session_id).await.unwrap();

        let prompt = context.prompt_for(ChatMode::Conversational, "hi");
        assert_eq!(prompt[0].role, Role::System);
        assert!(prompt[0].content.contains("noop: Does nothing useful."));
    }

    #[tokio::test]
    async fn messages_are_answered_and_recorded() {
        let delegate = delegate();
        let session_id = SessionId::new("s2");
        let mut context = delegate.on_chat_start(&session_id).await.unwrap();

        let answer = delegate
            .on_message(&mut context, &IncomingMessage::new("hello"))
            .await
            .unwrap();

        assert_eq!(answer, "echo: hello");
        assert_eq!(context.transcript().len(), 2);
    }
}
