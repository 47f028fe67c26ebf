//! Order executor trait definition.

use crate::error::ExecError;
use crate::types::OrderRequest;
use async_trait::async_trait;

/// Trait for order submission backends.
///
/// The bot submits intended actions and does not wait for fills; a
/// submission failure is logged and never aborts the cycle.
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    /// Submit an order request.
    async fn submit(&self, request: OrderRequest) -> Result<(), ExecError>;

    /// Get the executor name.
    fn name(&self) -> &str;
}
