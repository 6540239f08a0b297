//! Session-facing message and context types.

use pcommon::SessionId;
use pprovider::{Message, Role};

/// How the delegate treats conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatMode {
    /// Every turn sees the full prior conversation.
    #[default]
    Conversational,
    /// Each message is answered in isolation.
    OneShot,
}

/// One inbound user message, as handed over by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub text: String,
}

impl IncomingMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Outcome of one turn. A `Failure` is session-scoped; the conversation
/// continues and later turns may succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    Answer(String),
    Failure(String),
}

impl SessionReply {
    pub fn is_failure(&self) -> bool {
        matches!(self, SessionReply::Failure(_))
    }
}

/// Per-conversation state owned by exactly one session. The transcript only
/// records completed turns; a failed turn leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationContext {
    pub session_id: SessionId,
    system_prompt: Option<String>,
    transcript: Vec<Message>,
}

impl ConversationContext {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            system_prompt: None,
            transcript: Vec::new(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn record_turn(&mut self, user_text: &str, assistant_text: &str) {
        self.transcript.push(Message::new(Role::User, user_text));
        self.transcript
            .push(Message::new(Role::Assistant, assistant_text));
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Prompt for the next turn: system prompt, prior transcript per the
    /// mode, then the new user message.
    pub fn prompt_for(&self, mode: ChatMode, user_text: &str) -> Vec<Message> {
        let mut messages = Vec::new();
        if let Some(prompt) = &self.system_prompt {
            messages.push(Message::new(Role::System, prompt.clone()));
        }
        if mode == ChatMode::Conversational {
            messages.extend(self.transcript.iter().cloned());
        }
        messages.push(Message::new(Role::User, user_text));
        messages
    }
}
