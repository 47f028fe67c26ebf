//! Discord-compatible webhook client.

use async_trait::async_trait;
use pulse_core::error::NotifyError;
use pulse_core::traits::{MessageId, Notifier};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct WebhookMessage {
    id: String,
}

/// Notifier posting to a Discord-compatible webhook endpoint.
///
/// Sends use `?wait=true` so the endpoint returns the created message,
/// whose id allows later in-place edits.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    /// Create a notifier for the given webhook URL.
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, content: &str) -> Result<MessageId, NotifyError> {
        let url = format!("{}?wait=true", self.url);
        let response = self
            .client
            .post(&url)
            .json(&WebhookPayload { content })
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Api {
                status: status.as_u16(),
            });
        }

        let message: WebhookMessage = response
            .json()
            .await
            .map_err(|e| NotifyError::Parse(e.to_string()))?;
        debug!(id = %message.id, "webhook message sent");

        Ok(MessageId(message.id))
    }

    async fn edit(&self, id: &MessageId, content: &str) -> Result<(), NotifyError> {
        let url = format!("{}/messages/{}", self.url, id.0);
        let response = self
            .client
            .patch(&url)
            .json(&WebhookPayload { content })
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Api {
                status: status.as_u16(),
            });
        }
        debug!(id = %id.0, "webhook message edited");

        Ok(())
    }

    fn name(&self) -> &str {
        "discord-webhook"
    }
}
