//! Notification sink trait definition.

use crate::error::NotifyError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identifier of a previously sent message, usable for in-place edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Trait for chat notification sinks.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a text message and return its identifier.
    async fn send(&self, content: &str) -> Result<MessageId, NotifyError>;

    /// Replace the content of a previously sent message.
    async fn edit(&self, id: &MessageId, content: &str) -> Result<(), NotifyError>;

    /// Get the sink name.
    fn name(&self) -> &str;
}
