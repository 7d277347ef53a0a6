//! Package registry lookups against a fullnode.

use std::time::Duration;

use deptrace_core::metadata::PackageRegistry;
use deptrace_util::errors::DepTraceError;
use reqwest::Client;
use serde::Deserialize;

use crate::node::FullNode;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How often and how patiently to retry transient failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Delay before the second attempt; grows linearly after that.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Build a shared reqwest client for fullnode requests.
pub fn build_client() -> Result<Client, DepTraceError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("deptrace/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| DepTraceError::Network {
            message: format!("Failed to create HTTP client: {e}"),
        })
}

/// `{"type": "...", "data": {...}}` envelope around a Move resource.
#[derive(Debug, Deserialize)]
struct ResourceEnvelope {
    data: PackageRegistry,
}

/// Fetch the package registry resource at `address`.
///
/// Returns `Ok(None)` for 404 (no such account, or no packages published
/// there). Timeouts, connection errors and 5xx responses are retried.
pub async fn fetch_registry(
    client: &Client,
    node: &FullNode,
    address: &str,
    retry: RetryPolicy,
) -> Result<Option<PackageRegistry>, DepTraceError> {
    let url = node.registry_url(address);
    let mut last_err = String::new();

    for attempt in 0..retry.max_attempts.max(1) {
        if attempt > 0 {
            tracing::debug!("Retrying {url} (attempt {})", attempt + 1);
            tokio::time::sleep(retry.delay * attempt).await;
        }

        let mut req = client.get(&url);
        if let Some(key) = &node.api_key {
            req = req.bearer_auth(key);
        }

        match req.send().await {
            Ok(resp) => {
                let status = resp.status();
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if status.is_server_error() {
                    last_err = format!("HTTP {status} from {url}");
                    continue;
                }
                if !status.is_success() {
                    return Err(DepTraceError::Network {
                        message: format!("HTTP {status} fetching {url}"),
                    });
                }

                let envelope: ResourceEnvelope =
                    resp.json().await.map_err(|e| DepTraceError::Network {
                        message: format!("Invalid registry response from {url}: {e}"),
                    })?;
                return Ok(Some(envelope.data));
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_err = format!("{e}");
                continue;
            }
            Err(e) => {
                return Err(DepTraceError::Network {
                    message: format!("Request to {url} failed: {e}"),
                });
            }
        }
    }

    Err(DepTraceError::Network {
        message: format!(
            "Failed after {} attempts for {url}: {last_err}",
            retry.max_attempts.max(1)
        ),
    })
}
