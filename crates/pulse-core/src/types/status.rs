//! Per-cycle evaluation results.

use serde::{Deserialize, Serialize};

use super::{Action, MacdTrend};

/// One symbol's evaluation result for a single cycle.
///
/// Transient: produced by an evaluation job, consumed by the status reporter,
/// then dropped. `macd` is the histogram value, matching the trade log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolStatus {
    /// Symbol identifier
    pub symbol: String,
    /// Current price
    pub price: f64,
    /// Absolute change against the previous close
    pub change: f64,
    /// Percentage change against the previous close
    pub change_pct: f64,
    /// SMA(5)
    pub sma: f64,
    /// RSI(14)
    pub rsi: f64,
    /// MACD histogram
    pub macd: f64,
    /// MACD direction
    pub trend: MacdTrend,
    /// Sparkline over the trailing closes
    pub price_bar: String,
    /// Decision taken this cycle
    pub action: Action,
}
