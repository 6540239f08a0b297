//! Per-session lifecycle state machine.

use std::sync::Arc;

use pcommon::SessionId;

use crate::{
    ConversationContext, IncomingMessage, QaDelegate, SessionError, SessionReply,
};

enum SessionState {
    Idle,
    Active(ConversationContext),
}

/// One conversation from start to end. `Idle` until `on_chat_start`, then
/// `Active` with a conversation context owned exclusively by this session.
/// Delegate failures never leave the active state; only a lifecycle
/// violation surfaces as a [`SessionError`].
pub struct SessionOrchestrator {
    session_id: SessionId,
    delegate: Arc<dyn QaDelegate>,
    state: SessionState,
}

impl SessionOrchestrator {
    pub fn new(session_id: SessionId, delegate: Arc<dyn QaDelegate>) -> Self {
        Self {
            session_id,
            delegate,
            state: SessionState::Idle,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// Starts the conversation. Starting an already active session begins a
    /// fresh conversation and discards the previous context.
    pub async fn on_chat_start(&mut self) -> Result<(), SessionError> {
        let context = self
            .delegate
            .on_chat_start(&self.session_id)
            .await
            .map_err(|err| SessionError::other(err.to_string()))?;
        self.state = SessionState::Active(context);
        Ok(())
    }

    /// Handles one inbound message. Requires a started session; a delegate
    /// failure comes back as [`SessionReply::Failure`] and the session
    /// remains active.
    pub async fn on_message(
        &mut self,
        message: IncomingMessage,
    ) -> Result<SessionReply, SessionError> {
        let context = match &mut self.state {
            SessionState::Active(context) => context,
            SessionState::Idle => {
                return Err(SessionError::not_started(
                    "on_message requires on_chat_start first",
                ));
            }
        };

        if message.text.trim().is_empty() {
            return Err(SessionError::invalid_message("message text must not be empty"));
        }

        match self.delegate.on_message(context, &message).await {
            Ok(answer) => Ok(SessionReply::Answer(answer)),
            Err(err) => Ok(SessionReply::Failure(err.to_string())),
        }
    }

    /// Ends the conversation and drops its context.
    pub fn end(&mut self) {
        self.state = SessionState::Idle;
    }
}
