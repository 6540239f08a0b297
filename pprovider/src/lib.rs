//! Model and embedding provider clients for the assistant backend.
//!
//! The configuration layer decides *what* is configured; this crate decides
//! *what gets constructed*: `resolve_chat_model` and
//! `resolve_embedding_model` turn a validated [`pconfig::Config`] into
//! concrete clients behind the [`ChatModel`] and [`EmbeddingModel`]
//! capability traits.

mod chat;
mod embedding;
mod error;
mod model;
mod resolve;

pub mod adapters;
pub mod transport;

pub use chat::{ChatModel, ChatProviderKind};
pub use embedding::{EmbeddingModel, EmbeddingProviderKind};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, ModelRequest, ModelResponse, ProviderFuture, Role, StopReason, StreamEvent,
    TokenStream, TokenUsage,
};
pub use resolve::{resolve_chat_model, resolve_embedding_model, PROVIDER_TIMEOUT};
