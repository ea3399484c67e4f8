// src/common/retry.rs
//! Bounded exponential backoff for reads against the database.
//!
//! Only errors classified as transient are retried; everything else
//! (including row-not-found) returns immediately. On exhaustion the last
//! observed error is returned unchanged.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry policy: `max_retries` additional attempts beyond the first,
/// with delays of `base_delay * 2^attempt` between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Classify a database error as transient (retryable) or not.
///
/// Transient: pool timeouts, connection-level IO/TLS failures, and backend
/// errors whose message indicates a timeout, dropped connection, or a locked
/// database file.
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Io(_) => true,
        sqlx::Error::Tls(_) => true,
        sqlx::Error::Database(db) => {
            let msg = db.message().to_lowercase();
            msg.contains("timeout") || msg.contains("connection") || msg.contains("locked")
        }
        other => {
            let msg = other.to_string().to_lowercase();
            msg.contains("timeout") || msg.contains("connection")
        }
    }
}

/// Run `op`, retrying transient failures per `policy`.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if !is_transient(&e) || attempt >= policy.max_retries {
                    return Err(e);
                }
                let delay = policy.base_delay * 2u32.pow(attempt);
                warn!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient database error, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
