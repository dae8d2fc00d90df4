//! Task-local trace context for web requests.
//!
//! Gives error responses access to the current request's trace id without
//! threading it through every call. The scope is established by the
//! `RequestTrace` middleware; outside a request there is no trace id and
//! callers get the "unknown" placeholder.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// The trace id for the current task, or "unknown" outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future with the given trace id in scope.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
