//! Agent tools for the assistant backend.
//!
//! A [`Tool`] is a named capability the chat session can call on. This crate
//! defines the capability contract, an insertion-ordered [`ToolRegistry`],
//! the built-in tools (web search, calculator and two JIRA issue tools) and
//! [`build_tools`], which assembles the standard set from resolved
//! dependencies.

mod blocking;
mod builder;
mod calculator;
mod error;
mod jira;
mod registry;
mod search;
mod tool;

pub use builder::build_tools;
pub use calculator::{evaluate, CalculatorTool, CALCULATOR_TOOL_NAME};
pub use error::{ToolError, ToolErrorKind};
pub use jira::{
    is_issue_key, GetIssueTool, IssueAgent, IssueTracker, JiraHttpClient, JiraIssue,
    SummarizeIssueTool, GET_ISSUE_TOOL_NAME, SUMMARIZE_ISSUE_TOOL_NAME,
};
pub use registry::ToolRegistry;
pub use search::{DuckDuckGoSearch, SearchBackend, WebSearchTool, SEARCH_TOOL_NAME};
pub use tool::{Tool, ToolSpec};
