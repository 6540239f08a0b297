//! Startup wiring: one `initialize` call turns a config path into a ready
//! application context.

use std::path::Path;
use std::sync::Arc;

use pchat::{ChatMode, ModelQaDelegate, SessionOrchestrator};
use pcommon::SessionId;
use pconfig::{load_config, Config};
use pprovider::{resolve_chat_model, resolve_embedding_model, ChatModel, EmbeddingModel};
use ptooling::{build_tools, DuckDuckGoSearch, JiraHttpClient, ToolRegistry};
use tracing::{debug, info};

use crate::logging::init_logging;
use crate::FatalError;

/// Everything resolved at startup. Constructed once, immutable for the
/// process lifetime, and shared read-only with every session.
pub struct AppContext {
    pub config: Config,
    pub chat_model: Arc<dyn ChatModel>,
    pub embedding_model: Arc<dyn EmbeddingModel>,
    pub tools: ToolRegistry,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    pub fn new_session(&self, session_id: SessionId) -> SessionOrchestrator {
        let delegate = ModelQaDelegate::new(
            ChatMode::Conversational,
            self.chat_model.clone(),
            self.tools.clone(),
        );
        SessionOrchestrator::new(session_id, Arc::new(delegate))
    }
}

/// Ordered startup steps. Any failure is fatal; nothing here runs twice.
pub fn initialize(config_path: &Path) -> Result<AppContext, FatalError> {
    let config = load_config(config_path)?;
    init_logging(config.core.logging_level);
    info!(path = %config_path.display(), "configuration loaded");

    std::fs::create_dir_all(&config.core.data_dir)?;
    std::fs::create_dir_all(config.core.models_dir())?;
    debug!(data_dir = %config.core.data_dir.display(), "data directories ready");

    let chat_model = resolve_chat_model(&config)?;
    let embedding_model = resolve_embedding_model(&config)?;
    info!(
        chat = %chat_model.kind(),
        chat_model = chat_model.model_name(),
        embedding_model = embedding_model.model_name(),
        "providers resolved"
    );

    let http = reqwest::Client::new();
    let search = Arc::new(DuckDuckGoSearch::new(http.clone()));
    let tracker = Arc::new(JiraHttpClient::new(&config.jira, http));
    let tools = build_tools(chat_model.clone(), search, tracker);
    info!(tools = ?tools.names(), "tool registry built");

    Ok(AppContext {
        config,
        chat_model,
        embedding_model,
        tools,
    })
}
