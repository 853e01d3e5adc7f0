//! Shared HTTP client with bounded retries.
//!
//! One `reqwest::Client` (connection pool, timeout) is built at startup and
//! reused for every provider call. GET requests are retried on transport
//! failures and on the statuses listed in the [`RetryPolicy`], with
//! exponential backoff between attempts.

use std::time::Duration;

use reqwest::{header::RETRY_AFTER, Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// When and how long to wait before retrying a failed GET
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Wait before the first retry; doubles for each later retry
    pub backoff_base: Duration,
    /// Upper bound on any single wait, including `Retry-After`
    pub max_backoff: Duration,
    pub retry_statuses: Vec<StatusCode>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
            max_backoff: Duration::from_secs(120),
            retry_statuses: vec![
                StatusCode::TOO_MANY_REQUESTS,
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::BAD_GATEWAY,
                StatusCode::SERVICE_UNAVAILABLE,
                StatusCode::GATEWAY_TIMEOUT,
            ],
        }
    }
}

impl RetryPolicy {
    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Backoff before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.backoff_base
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }

    /// Wait requested by the server, honoured for 429 and 503 only
    fn retry_after(&self, response: &Response) -> Option<Duration> {
        let status = response.status();
        if status != StatusCode::TOO_MANY_REQUESTS && status != StatusCode::SERVICE_UNAVAILABLE {
            return None;
        }

        response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|secs| Duration::from_secs(secs).min(self.max_backoff))
    }
}

/// HTTP client that retries idempotent requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    policy: RetryPolicy,
}

impl HttpClient {
    pub fn new(timeout: Duration, policy: RetryPolicy) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, policy })
    }

    /// Sends a GET and decodes a JSON body, retrying per the policy
    ///
    /// Non-retryable statuses fail immediately. When retries run out the last
    /// failure is returned.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let mut retries = 0u32;

        loop {
            let wait = match self.client.get(url).query(query).send().await {
                Ok(response) if response.status().is_success() => {
                    return Ok(response.json::<T>().await?);
                }
                Ok(response) => {
                    let status = response.status();
                    if !self.policy.is_retryable(status) || retries >= self.policy.max_retries {
                        let body = response.text().await.unwrap_or_default();
                        tracing::error!(
                            status = %status,
                            retries,
                            body = %body,
                            "Provider request failed"
                        );
                        return Err(AppError::ExternalApi(format!(
                            "API returned status {}: {}",
                            status, body
                        )));
                    }

                    let wait = self
                        .policy
                        .retry_after(&response)
                        .unwrap_or_else(|| self.policy.backoff(retries + 1));
                    tracing::warn!(
                        status = %status,
                        attempt = retries + 1,
                        max_retries = self.policy.max_retries,
                        wait_ms = wait.as_millis() as u64,
                        "Retryable status from provider, backing off"
                    );
                    wait
                }
                Err(e) => {
                    if !is_connection_failure(&e) || retries >= self.policy.max_retries {
                        tracing::error!(error = %e, retries, "Provider request failed");
                        return Err(e.into());
                    }

                    let wait = self.policy.backoff(retries + 1);
                    tracing::warn!(
                        error = %e,
                        attempt = retries + 1,
                        max_retries = self.policy.max_retries,
                        wait_ms = wait.as_millis() as u64,
                        "Provider request did not complete, backing off"
                    );
                    wait
                }
            };

            retries += 1;
            tokio::time::sleep(wait).await;
        }
    }
}

/// Whether the request failed in transit (connect, timeout, incomplete
/// exchange) rather than being malformed or rejected by the client
fn is_connection_failure(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request()
}
