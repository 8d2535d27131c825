//! Retry with exponential backoff for idempotent reads.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::ApiError;

/// Attempts made by [`retry_transient`] unless told otherwise.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay before the second attempt; later delays double.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Run `operation` up to `max_retries` times while `should_retry` accepts
/// the error, sleeping `base_delay * 2^(attempt - 1)` between attempts.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or the first error
/// `should_retry` rejects.
pub async fn retry_operation<T, E, F, Fut, P>(
    mut operation: F,
    max_retries: u32,
    base_delay: Duration,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let max_retries = max_retries.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_retries || !should_retry(&e) => return Err(e),
            Err(_) => {
                let delay = base_delay.saturating_mul(2_u32.saturating_pow(attempt - 1));
                debug!(attempt, delay_ms = delay.as_millis(), "Attempt failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// [`retry_operation`] for storefront calls, retrying network and 5xx failures.
///
/// # Errors
///
/// Returns the last `ApiError`.
pub async fn retry_transient<T, F, Fut>(
    operation: F,
    max_retries: u32,
    base_delay: Duration,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    retry_operation(operation, max_retries, base_delay, ApiError::is_transient).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    const FAST: Duration = Duration::from_millis(1);

    #[tokio::test]
    async fn test_succeeds_on_first_attempt() {
        let calls = &AtomicU32::new(0);
        let result: Result<&str, ApiError> = retry_transient(
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("success")
            },
            3,
            FAST,
        )
        .await;
        assert_eq!(result.unwrap(), "success");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let calls = &AtomicU32::new(0);
        let result = retry_transient(
            || async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ApiError::Network("first attempt failed".to_string()))
                } else {
                    Ok(42)
                }
            },
            3,
            FAST,
        )
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_returns_last_error_after_max_retries() {
        let calls = &AtomicU32::new(0);
        let result: Result<(), ApiError> = retry_transient(
            || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::Status {
                    status: 503,
                    message: Some(format!("attempt {n}")),
                })
            },
            2,
            FAST,
        )
        .await;
        match result.unwrap_err() {
            ApiError::Status { message, .. } => assert_eq!(message.as_deref(), Some("attempt 1")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let calls = &AtomicU32::new(0);
        let result: Result<(), ApiError> = retry_transient(
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::Status { status: 404, message: None })
            },
            3,
            FAST,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backoff_doubles() {
        let start = tokio::time::Instant::now();
        let result: Result<(), &str> =
            retry_operation(|| async { Err("always fails") }, 3, Duration::from_millis(20), |_| true)
                .await;
        assert_eq!(result.unwrap_err(), "always fails");
        // 20ms + 40ms between three attempts
        assert!(start.elapsed() >= Duration::from_millis(60));
    }
}
