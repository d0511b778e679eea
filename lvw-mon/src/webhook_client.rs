//! Webhook delivery client

use crate::types::Notifier;
use async_trait::async_trait;
use lvw_common::{Error, Result};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Request timeout for webhook posts
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "levelwatch/0.1.0";

/// HTTP client for the notification webhook endpoint.
pub struct WebhookClient {
    http_client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| Error::DeliveryTransport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookClient {
    /// POST `{"content": message}`; status 200/204 counts as delivered.
    async fn send(&self, message: &str) -> Result<()> {
        debug!(bytes = message.len(), "posting webhook notification");

        let response = self
            .http_client
            .post(&self.url)
            .json(&json!({ "content": message }))
            .send()
            .await
            .map_err(|e| Error::DeliveryTransport(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 200 || status == 204 {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Delivery { status, body })
        }
    }
}
