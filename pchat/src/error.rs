//! Session lifecycle errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// A message arrived before the session was started.
    NotStarted,
    InvalidMessage,
    Other,
}

/// Caller-facing lifecycle violation. Delegate failures are not session
/// errors; they come back as a failure reply and the session stays usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub kind: SessionErrorKind,
    pub message: String,
}

impl SessionError {
    pub fn new(kind: SessionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_started(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::NotStarted, message)
    }

    pub fn invalid_message(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::InvalidMessage, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::Other, message)
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for SessionError {}

/// Failure inside the question-answering delegate. Always recoverable from
/// the session's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateError {
    pub message: String,
}

impl DelegateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for DelegateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "delegate failure: {}", self.message)
    }
}

impl Error for DelegateError {}

impl From<pprovider::ProviderError> for DelegateError {
    fn from(value: pprovider::ProviderError) -> Self {
        DelegateError::new(value.to_string())
    }
}

impl From<ptooling::ToolError> for DelegateError {
    fn from(value: ptooling::ToolError) -> Self {
        DelegateError::new(value.to_string())
    }
}
