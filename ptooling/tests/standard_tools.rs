//! Contract tests for the assembled standard tool set.

use std::collections::HashSet;
use std::sync::Arc;

use pcommon::BoxFuture;
use pprovider::{
    ChatModel, ChatProviderKind, ModelRequest, ModelResponse, ProviderError, ProviderFuture,
    StopReason, TokenStream, TokenUsage,
};
use ptooling::{
    build_tools, IssueTracker, JiraIssue, SearchBackend, ToolError, CALCULATOR_TOOL_NAME,
    GET_ISSUE_TOOL_NAME, SEARCH_TOOL_NAME, SUMMARIZE_ISSUE_TOOL_NAME,
};

struct StaticModel;

impl ChatModel for StaticModel {
    fn kind(&self) -> ChatProviderKind {
        ChatProviderKind::OpenAi
    }

    fn model_name(&self) -> &str {
        "static-model"
    }

    fn streaming_enabled(&self) -> bool {
        false
    }

    fn complete<'a>(
        &'a self,
        _request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async {
            Ok(ModelResponse {
                model: "static-model".to_string(),
                content: "1 + 1".to_string(),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            })
        })
    }

    fn stream<'a>(
        &'a self,
        _request: ModelRequest,
    ) -> ProviderFuture<'a, Result<TokenStream<'a>, ProviderError>> {
        unimplemented!("streaming is not exercised here")
    }
}

struct StaticSearch;

impl SearchBackend for StaticSearch {
    fn search<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, Result<String, ToolError>> {
        Box::pin(async { Ok("a result".to_string()) })
    }
}

struct StaticTracker;

impl IssueTracker for StaticTracker {
    fn fetch_issue<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<JiraIssue, ToolError>> {
        let key = key.to_string();
        Box::pin(async move {
            Ok(JiraIssue {
                key,
                summary: "a summary".to_string(),
                description: String::new(),
                status: "Open".to_string(),
                assignee: None,
                reporter: None,
            })
        })
    }
}

fn standard_tools() -> ptooling::ToolRegistry {
    build_tools(
        Arc::new(StaticModel),
        Arc::new(StaticSearch),
        Arc::new(StaticTracker),
    )
}

#[test]
fn standard_set_has_a_fixed_order() {
    let registry = standard_tools();
    assert_eq!(
        registry.names(),
        vec![
            SEARCH_TOOL_NAME,
            CALCULATOR_TOOL_NAME,
            SUMMARIZE_ISSUE_TOOL_NAME,
            GET_ISSUE_TOOL_NAME,
        ]
    );
}

#[test]
fn tool_names_are_unique() {
    let registry = standard_tools();
    let names = registry.names();
    let unique: HashSet<_> = names.iter().collect();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn issue_tools_state_the_key_contract() {
    let registry = standard_tools();
    for name in [SUMMARIZE_ISSUE_TOOL_NAME, GET_ISSUE_TOOL_NAME] {
        let tool = registry.get(name).unwrap();
        assert!(
            tool.spec()
                .description
                .contains("a single issue key string like 'PROJECT-1234'"),
            "{name} must document its input contract"
        );
    }
}

#[test]
fn summarize_description_tells_the_agent_to_use_the_summary_directly() {
    let registry = standard_tools();
    let tool = registry.get(SUMMARIZE_ISSUE_TOOL_NAME).unwrap();
    let description = tool.spec().description;
    assert!(description.contains("very elaborate"));
    assert!(description.contains("use it directly"));
    assert!(description.contains("do not summarize it again"));
}

#[test]
fn every_tool_has_a_nonempty_description() {
    for spec in standard_tools().specs() {
        assert!(!spec.description.trim().is_empty(), "{}", spec.name);
    }
}

#[test]
fn calculator_runs_end_to_end_against_the_model() {
    let registry = standard_tools();
    let calculator = registry.get(CALCULATOR_TOOL_NAME).unwrap();
    assert_eq!(calculator.invoke("what is one plus one?").unwrap(), "2");
}
