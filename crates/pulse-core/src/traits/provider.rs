//! Price provider trait definition.

use crate::error::DataError;
use crate::types::SymbolSpec;
use async_trait::async_trait;

/// Trait for external price sources.
///
/// Implementations choose the interval and span per asset class; the bot
/// only needs the chronological close prices and a current quote.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch historical close prices for a symbol, oldest first.
    ///
    /// An empty result must be reported as `DataError::EmptyResponse`,
    /// never as an empty vector.
    async fn historical_closes(&self, spec: &SymbolSpec) -> Result<Vec<f64>, DataError>;

    /// Fetch the current quote (mark price) for a symbol.
    async fn latest_price(&self, spec: &SymbolSpec) -> Result<f64, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}
