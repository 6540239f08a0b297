//! JIRA issue tools.
//!
//! Two tools share one issue-fetching capability. `summarize_jira_issue`
//! fetches an issue and asks the chat model for a short summary of it;
//! `get_jira_issue` returns the rendered issue fields directly. Both take a
//! single issue key as input and reject anything that does not look like one.

use std::sync::Arc;

use pcommon::{BoxFuture, GenerationOptions};
use pconfig::JiraConfig;
use pprovider::{ChatModel, Message, ModelRequest, Role};
use reqwest::Client;
use serde::Deserialize;

use crate::blocking::run_blocking;
use crate::{Tool, ToolError, ToolSpec};

pub const SUMMARIZE_ISSUE_TOOL_NAME: &str = "summarize_jira_issue";
pub const GET_ISSUE_TOOL_NAME: &str = "get_jira_issue";

const INPUT_CONTRACT: &str = "The input is a single issue key string like 'PROJECT-1234'.";

const SUMMARIZE_PROMPT: &str = "Write an elaborate summary of the following issue. Cover its \
     status, the people involved and everything the description adds beyond the summary \
     field, so the reader never needs to open the issue itself.";

/// One issue as the tools see it. A subset of the tracker's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraIssue {
    pub key: String,
    pub summary: String,
    pub description: String,
    pub status: String,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
}

impl JiraIssue {
    /// Plain-text rendering used both as model input and as the
    /// `get_jira_issue` output.
    pub fn details(&self) -> String {
        let mut rendered = format!(
            "Key: {}\nStatus: {}\nSummary: {}\n",
            self.key, self.status, self.summary
        );
        if let Some(assignee) = &self.assignee {
            rendered.push_str(&format!("Assignee: {assignee}\n"));
        }
        if let Some(reporter) = &self.reporter {
            rendered.push_str(&format!("Reporter: {reporter}\n"));
        }
        if !self.description.is_empty() {
            rendered.push_str(&format!("Description: {}\n", self.description));
        }
        rendered
    }
}

/// Narrow interface to the issue tracker.
pub trait IssueTracker: Send + Sync {
    fn fetch_issue<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<JiraIssue, ToolError>>;
}

/// An issue key is a project code in uppercase letters, a dash and a number.
pub fn is_issue_key(candidate: &str) -> bool {
    let Some((project, number)) = candidate.split_once('-') else {
        return false;
    };
    !project.is_empty()
        && project.chars().all(|ch| ch.is_ascii_uppercase())
        && !number.is_empty()
        && number.chars().all(|ch| ch.is_ascii_digit())
}

fn validated_key(input: &str, tool_name: &str) -> Result<String, ToolError> {
    let candidate = input.trim();
    if is_issue_key(candidate) {
        Ok(candidate.to_string())
    } else {
        Err(ToolError::invalid_arguments(format!(
            "not an issue key: '{candidate}'. {INPUT_CONTRACT}"
        ))
        .with_tool_name(tool_name))
    }
}

/// Shared capability behind both issue tools.
pub struct IssueAgent {
    model: Arc<dyn ChatModel>,
    tracker: Arc<dyn IssueTracker>,
}

impl IssueAgent {
    pub fn new(model: Arc<dyn ChatModel>, tracker: Arc<dyn IssueTracker>) -> Self {
        Self { model, tracker }
    }

    pub async fn summarize(&self, key: &str) -> Result<String, ToolError> {
        let issue = self.tracker.fetch_issue(key).await?;
        let request = ModelRequest::new(vec![
            Message::new(Role::System, SUMMARIZE_PROMPT),
            Message::new(Role::User, issue.details()),
        ])
        .with_options(GenerationOptions::default().with_temperature(0.2));

        let response = self
            .model
            .complete(request)
            .await
            .map_err(|err| ToolError::from(err).with_tool_name(SUMMARIZE_ISSUE_TOOL_NAME))?;
        Ok(response.content.trim().to_string())
    }

    pub async fn issue_details(&self, key: &str) -> Result<String, ToolError> {
        let issue = self.tracker.fetch_issue(key).await?;
        Ok(issue.details())
    }
}

pub struct SummarizeIssueTool {
    agent: Arc<IssueAgent>,
}

impl SummarizeIssueTool {
    pub fn new(agent: Arc<IssueAgent>) -> Self {
        Self { agent }
    }
}

impl Tool for SummarizeIssueTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            SUMMARIZE_ISSUE_TOOL_NAME,
            format!(
                "Useful for summarizing a JIRA issue. The summary it returns is already very \
                 elaborate, so use it directly and do not summarize it again. {INPUT_CONTRACT}"
            ),
        )
    }

    fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let key = validated_key(input, SUMMARIZE_ISSUE_TOOL_NAME)?;
        run_blocking(self.agent.summarize(&key))
    }

    fn invoke_async<'a>(
        &'a self,
        input: &'a str,
    ) -> Option<BoxFuture<'a, Result<String, ToolError>>> {
        Some(Box::pin(async move {
            let key = validated_key(input, SUMMARIZE_ISSUE_TOOL_NAME)?;
            self.agent.summarize(&key).await
        }))
    }
}

/// Blocking-only. Fetching a single issue is one short request and callers
/// use this tool from synchronous contexts.
pub struct GetIssueTool {
    agent: Arc<IssueAgent>,
}

impl GetIssueTool {
    pub fn new(agent: Arc<IssueAgent>) -> Self {
        Self { agent }
    }
}

impl Tool for GetIssueTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            GET_ISSUE_TOOL_NAME,
            format!(
                "Useful for getting the full details of a JIRA issue. {INPUT_CONTRACT}"
            ),
        )
    }

    fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let key = validated_key(input, GET_ISSUE_TOOL_NAME)?;
        run_blocking(self.agent.issue_details(&key))
    }
}

/// REST v2 client authenticated with the configured username and API token.
pub struct JiraHttpClient {
    client: Client,
    base_url: String,
    username: String,
    api_token: pconfig::SecretString,
}

impl JiraHttpClient {
    pub fn new(config: &JiraConfig, client: Client) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            api_token: config.api_token.clone(),
        }
    }

    async fn get_issue(&self, key: &str) -> Result<JiraIssue, ToolError> {
        let url = format!("{}/rest/api/2/issue/{key}", self.base_url);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(self.api_token.expose()))
            .send()
            .await
            .map_err(|err| {
                let error = if err.is_timeout() {
                    ToolError::timeout(err.to_string())
                } else {
                    ToolError::execution(err.to_string())
                };
                error.with_tool_name(GET_ISSUE_TOOL_NAME)
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ToolError::not_found(format!("no issue with key {key}")));
        }
        if !status.is_success() {
            return Err(ToolError::execution(format!(
                "issue tracker returned status {status} for {key}"
            )));
        }

        let wire: WireIssue = response
            .json()
            .await
            .map_err(|err| ToolError::execution(err.to_string()))?;
        Ok(wire.into_issue())
    }
}

impl IssueTracker for JiraHttpClient {
    fn fetch_issue<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<JiraIssue, ToolError>> {
        Box::pin(self.get_issue(key))
    }
}

#[derive(Debug, Deserialize)]
struct WireIssue {
    key: String,
    fields: WireFields,
}

#[derive(Debug, Deserialize)]
struct WireFields {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    description: Option<String>,
    status: WireStatus,
    #[serde(default)]
    assignee: Option<WirePerson>,
    #[serde(default)]
    reporter: Option<WirePerson>,
}

#[derive(Debug, Deserialize)]
struct WireStatus {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WirePerson {
    #[serde(rename = "displayName")]
    display_name: String,
}

impl WireIssue {
    fn into_issue(self) -> JiraIssue {
        JiraIssue {
            key: self.key,
            summary: self.fields.summary,
            description: self.fields.description.unwrap_or_default(),
            status: self.fields.status.name,
            assignee: self.fields.assignee.map(|person| person.display_name),
            reporter: self.fields.reporter.map(|person| person.display_name),
        }
    }
}
