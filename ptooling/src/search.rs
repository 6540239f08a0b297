//! Web search tool over an external search capability.

use std::sync::Arc;

use pcommon::BoxFuture;
use reqwest::Client;
use serde::Deserialize;

use crate::blocking::run_blocking;
use crate::{Tool, ToolError, ToolSpec};

pub const SEARCH_TOOL_NAME: &str = "web_search";

const SEARCH_DESCRIPTION: &str = "Useful for searching the internet and returns the first \
     result. The input to this tool should be a typical search query.";

/// Narrow interface to the external search backend.
pub trait SearchBackend: Send + Sync {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<String, ToolError>>;
}

pub struct WebSearchTool {
    backend: Arc<dyn SearchBackend>,
}

impl WebSearchTool {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }
}

impl Tool for WebSearchTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(SEARCH_TOOL_NAME, SEARCH_DESCRIPTION)
    }

    fn invoke(&self, input: &str) -> Result<String, ToolError> {
        run_blocking(self.backend.search(input))
    }

    fn invoke_async<'a>(
        &'a self,
        input: &'a str,
    ) -> Option<BoxFuture<'a, Result<String, ToolError>>> {
        Some(self.backend.search(input))
    }
}

/// DuckDuckGo instant-answer backend.
pub struct DuckDuckGoSearch {
    client: Client,
    base_url: String,
}

impl DuckDuckGoSearch {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://api.duckduckgo.com".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn first_result(&self, query: &str) -> Result<String, ToolError> {
        if query.trim().is_empty() {
            return Err(ToolError::invalid_arguments("search query must not be empty"));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ToolError::timeout(err.to_string())
                } else {
                    ToolError::execution(err.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ToolError::execution(format!(
                "search backend returned status {}",
                response.status()
            )));
        }

        let parsed: InstantAnswer = response
            .json()
            .await
            .map_err(|err| ToolError::execution(err.to_string()))?;

        if !parsed.abstract_text.is_empty() {
            return Ok(parsed.abstract_text);
        }

        parsed
            .related_topics
            .into_iter()
            .find_map(|topic| topic.text.filter(|text| !text.is_empty()))
            .ok_or_else(|| ToolError::execution("search returned no results"))
    }
}

impl SearchBackend for DuckDuckGoSearch {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<String, ToolError>> {
        Box::pin(self.first_result(query))
    }
}

#[derive(Debug, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedSearch;

    impl SearchBackend for CannedSearch {
        fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<String, ToolError>> {
            let result = format!("first result for {query}");
            Box::pin(async move { Ok(result) })
        }
    }

    #[test]
    fn blocking_and_async_paths_return_the_same_result() {
        let tool = WebSearchTool::new(Arc::new(CannedSearch));

        let blocking = tool.invoke("rust language").expect("blocking path works");
        let non_blocking = tool
            .invoke_async("rust language")
            .map(run_blocking)
            .expect("async path is available")
            .expect("async path works");

        assert_eq!(blocking, non_blocking);
        assert_eq!(blocking, "first result for rust language");
    }

    /// The backend suspends on the reactor, like the real HTTP backends.
    struct ReactorBackedSearch;

    impl SearchBackend for ReactorBackedSearch {
        fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<String, ToolError>> {
            Box::pin(async move {
                tokio::time::sleep(std::time::Duration::from_millis(1)).await;
                Ok(format!("result for {query}"))
            })
        }
    }

    #[test]
    fn blocking_invoke_works_from_a_plain_synchronous_thread() {
        let tool = WebSearchTool::new(Arc::new(ReactorBackedSearch));
        let result = tool.invoke("rust language").expect("blocking path works");
        assert_eq!(result, "result for rust language");
    }

    #[test]
    fn spec_states_the_input_contract() {
        let tool = WebSearchTool::new(Arc::new(CannedSearch));
        let spec = tool.spec();
        assert_eq!(spec.name, SEARCH_TOOL_NAME);
        assert!(spec.description.contains("search query"));
    }
}
