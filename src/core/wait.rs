use crate::utils::error::{FacadeError, Result};
use std::future::Future;
use std::time::Duration;

/// Awaits `operation` for at most `timeout`.
///
/// When the bound elapses the inner future is dropped and `FacadeError::Timeout` is returned.
/// Whether the underlying network request is aborted as a result is up to the SDK.
pub async fn bounded_wait<F, T>(operation: &'static str, timeout: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("⏱️ {} timed out after {:?}", operation, timeout);
            Err(FacadeError::Timeout {
                operation,
                after: timeout,
            })
        }
    }
}
