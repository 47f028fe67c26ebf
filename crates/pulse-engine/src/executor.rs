//! Paper order executor.

use async_trait::async_trait;
use pulse_core::error::ExecError;
use pulse_core::traits::OrderExecutor;
use pulse_core::types::OrderRequest;
use std::sync::Mutex;
use tracing::info;

/// Executor that accepts every order without routing it anywhere.
///
/// Submitted requests are retained so operators and tests can inspect
/// what the bot intended to trade.
#[derive(Default)]
pub struct PaperExecutor {
    submitted: Mutex<Vec<OrderRequest>>,
}

impl PaperExecutor {
    /// Create a paper executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests submitted so far.
    pub fn submitted(&self) -> Vec<OrderRequest> {
        self.submitted.lock().unwrap().clone()
    }

    /// Number of requests submitted so far.
    pub fn submitted_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderExecutor for PaperExecutor {
    async fn submit(&self, request: OrderRequest) -> Result<(), ExecError> {
        info!(
            symbol = %request.symbol,
            side = %request.side,
            notional = %request.notional,
            "paper order accepted"
        );
        self.submitted.lock().unwrap().push(request);
        Ok(())
    }

    fn name(&self) -> &str {
        "paper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::types::Side;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_paper_executor_records_orders() {
        let executor = PaperExecutor::new();

        executor
            .submit(OrderRequest::market("BTC", Side::Buy, dec!(10)))
            .await
            .unwrap();
        executor
            .submit(OrderRequest::market("ETH", Side::Sell, dec!(10)))
            .await
            .unwrap();

        assert_eq!(executor.submitted_count(), 2);
        assert_eq!(executor.submitted()[0].symbol, "BTC");
    }
}
