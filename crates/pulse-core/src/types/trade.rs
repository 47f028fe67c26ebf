//! Trade decision records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Action;

/// Immutable append-only record of one decision for one symbol.
///
/// A record is written for every decision, including holds; it is an audit
/// trail of intended actions, not of confirmed fills. The `macd` column holds
/// the MACD histogram (line minus signal), the value policies decide on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Decision time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Symbol identifier
    pub symbol: String,
    /// Decision taken
    pub action: Action,
    /// Current price at decision time
    pub price: f64,
    /// SMA(5) at decision time
    pub sma: f64,
    /// RSI(14) at decision time
    pub rsi: f64,
    /// MACD histogram at decision time
    pub macd: f64,
}

impl TradeRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        symbol: impl Into<String>,
        action: Action,
        price: f64,
        sma: f64,
        rsi: f64,
        macd: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            symbol: symbol.into(),
            action,
            price,
            sma,
            rsi,
            macd,
        }
    }
}
