//! Standard tool set assembly.

use std::sync::Arc;

use pprovider::ChatModel;

use crate::{
    CalculatorTool, GetIssueTool, IssueAgent, IssueTracker, SearchBackend, SummarizeIssueTool,
    ToolRegistry, WebSearchTool,
};

/// Builds the registry every session starts from. Registration order is
/// fixed so prompts rendered from the registry are stable across runs.
pub fn build_tools(
    model: Arc<dyn ChatModel>,
    search: Arc<dyn SearchBackend>,
    tracker: Arc<dyn IssueTracker>,
) -> ToolRegistry {
    let agent = Arc::new(IssueAgent::new(model.clone(), tracker));

    let mut registry = ToolRegistry::new();
    registry.register(WebSearchTool::new(search));
    registry.register(CalculatorTool::new(model));
    registry.register(SummarizeIssueTool::new(agent.clone()));
    registry.register(GetIssueTool::new(agent));
    registry
}
