use std::future::Future;
use std::time::Duration;

/// Run a browser operation under a deadline.
///
/// `on_timeout` builds the error returned when the deadline passes first.
pub async fn with_page_timeout<F, T, E>(
    operation: F,
    timeout: Duration,
    on_timeout: impl FnOnce() -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout()),
    }
}
