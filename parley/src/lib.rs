//! Unified facade over the Parley workspace crates.
//!
//! Applications depend on this crate alone: it re-exports the member crates'
//! public types and provides [`initialize`], the single ordered startup
//! entry point that loads configuration, sets up logging, resolves the
//! model providers and assembles the tool registry.

mod error;
mod logging;
mod runtime;

pub use pchat;
pub use pcommon;
pub use pconfig;
pub use pprovider;
pub use ptooling;

pub use pchat::{
    ChatMode, ConversationContext, DelegateError, IncomingMessage, ModelQaDelegate, QaDelegate,
    SessionError, SessionErrorKind, SessionOrchestrator, SessionReply,
};
pub use pcommon::{BoxFuture, GenerationOptions, SessionId};
pub use pconfig::{
    config_path_from_env, load_config, parse_config, Config, ConfigError, ConfigErrorKind,
    EmbeddingConfig, JiraConfig, LlmConfig, LogLevel, SecretString, CONFIG_PATH_ENV,
    DEFAULT_CONFIG_PATH,
};
pub use pprovider::{
    resolve_chat_model, resolve_embedding_model, ChatModel, ChatProviderKind, EmbeddingModel,
    EmbeddingProviderKind, Message, ModelRequest, ModelResponse, ProviderError, ProviderErrorKind,
    Role, StopReason, StreamEvent, TokenUsage,
};
pub use ptooling::{
    build_tools, DuckDuckGoSearch, IssueTracker, JiraHttpClient, SearchBackend, Tool, ToolError,
    ToolErrorKind, ToolRegistry, ToolSpec,
};

pub use error::FatalError;
pub use logging::init_logging;
pub use runtime::{initialize, AppContext};
