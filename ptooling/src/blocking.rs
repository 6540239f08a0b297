//! Reactor for the blocking tool path.

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Runtime};

use crate::ToolError;

static BLOCKING_RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> Result<&'static Runtime, ToolError> {
    if let Some(runtime) = BLOCKING_RUNTIME.get() {
        return Ok(runtime);
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| ToolError::execution(format!("blocking tool runtime: {err}")))?;
    Ok(BLOCKING_RUNTIME.get_or_init(|| runtime))
}

/// Drives a tool future to completion for a synchronous caller. Tool
/// futures suspend on the network and need a live reactor; a shared
/// single-thread runtime provides one, so `invoke` works on threads with
/// no ambient runtime. Must not be called from inside an async context;
/// async callers take the `invoke_async` path instead.
pub(crate) fn run_blocking<F, T>(future: F) -> Result<T, ToolError>
where
    F: Future<Output = Result<T, ToolError>>,
{
    runtime()?.block_on(future)
}
