//! Chat session orchestration for the assistant backend.
//!
//! A [`SessionOrchestrator`] owns one conversation's lifecycle and hands
//! each message to a [`QaDelegate`]. The shared chat model and tool registry
//! stay read-only behind the delegate; every session owns its
//! [`ConversationContext`] exclusively.

mod delegate;
mod error;
mod session;
mod types;

pub use delegate::{ModelQaDelegate, QaDelegate};
pub use error::{DelegateError, SessionError, SessionErrorKind};
pub use session::SessionOrchestrator;
pub use types::{ChatMode, ConversationContext, IncomingMessage, SessionReply};
