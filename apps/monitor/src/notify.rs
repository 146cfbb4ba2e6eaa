//! Push delivery through a Bark-style relay.
//!
//! The relay accepts the title and body as URL-encoded query parameters
//! and reports success in its own JSON status field, not just the HTTP
//! status code.

use std::time::Duration;

use anyhow::bail;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Delivery seam for the per-ticker notification.
#[async_trait]
pub trait Notify: Send + Sync {
    /// Deliver one notification; errors are reported but never fail a run.
    async fn push(&self, title: &str, message: &str) -> anyhow::Result<()>;
}

/// Response from the relay
#[derive(Debug, Deserialize)]
struct RelayResponse {
    /// 0 on success
    errcode: Option<i64>,
    /// Human-readable failure reason
    errmsg: Option<String>,
}

/// Bark relay client.
pub struct BarkNotifier {
    client: Client,
    base_url: String,
}

impl BarkNotifier {
    /// Create a notifier against the given relay endpoint.
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }
}

#[async_trait]
impl Notify for BarkNotifier {
    async fn push(&self, title: &str, message: &str) -> anyhow::Result<()> {
        debug!("Pushing notification: {}", title);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("type", "bark"), ("title", title), ("msg", message)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            bail!("relay returned HTTP {}", status);
        }

        let result: RelayResponse = response.json().await?;
        match result.errcode {
            Some(0) => Ok(()),
            _ => bail!(
                "relay rejected push: {}",
                result.errmsg.unwrap_or_else(|| "unknown error".to_string())
            ),
        }
    }
}
