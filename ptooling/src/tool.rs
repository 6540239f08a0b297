//! Tool capability contract.
//!
//! A tool is a named, described capability an agent can select during a
//! conversation. Every tool exposes a blocking invocation; tools whose work
//! suspends on the network additionally expose a non-blocking path so they
//! do not stall the shared event loop. Callers pick the path matching their
//! own concurrency context.
//!
//! ```rust
//! use ptooling::{Tool, ToolSpec, ToolError};
//!
//! struct Upper;
//!
//! impl Tool for Upper {
//!     fn spec(&self) -> ToolSpec {
//!         ToolSpec::new("upper", "Uppercases the input string.")
//!     }
//!
//!     fn invoke(&self, input: &str) -> Result<String, ToolError> {
//!         Ok(input.to_uppercase())
//!     }
//! }
//!
//! let tool = Upper;
//! assert_eq!(tool.invoke("hi").unwrap(), "HI");
//! assert!(tool.invoke_async("hi").is_none());
//! ```

use pcommon::BoxFuture;

use crate::ToolError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Unique within a registry.
    pub name: String,
    /// Natural-language description an agent uses to decide applicability.
    pub description: String,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

pub trait Tool: Send + Sync {
    fn spec(&self) -> ToolSpec;

    /// Blocking invocation. Always available; tools without a non-blocking
    /// path are assumed short-lived enough to tolerate blocking the loop.
    fn invoke(&self, input: &str) -> Result<String, ToolError>;

    /// Non-blocking invocation, when the tool supports one. Must produce
    /// results equivalent to [`Tool::invoke`] for the same input.
    fn invoke_async<'a>(
        &'a self,
        input: &'a str,
    ) -> Option<BoxFuture<'a, Result<String, ToolError>>> {
        let _ = input;
        None
    }
}
