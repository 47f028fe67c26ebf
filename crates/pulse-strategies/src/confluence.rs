//! Indicator-confluence policy (strategy 1).

use pulse_core::types::Action;
use pulse_indicators::IndicatorSnapshot;

use crate::DecisionPolicy;

/// Default policy: all three indicators must agree.
///
/// Buys when price is above the SMA, RSI is below the overbought
/// threshold, and the MACD histogram is positive; sells on the mirrored
/// conditions; holds otherwise.
#[derive(Debug, Clone)]
pub struct ConfluencePolicy {
    overbought: f64,
    oversold: f64,
}

impl ConfluencePolicy {
    /// Create a policy with custom RSI thresholds.
    pub fn with_thresholds(overbought: f64, oversold: f64) -> Self {
        assert!(
            overbought > oversold,
            "Overbought must be greater than oversold"
        );
        Self {
            overbought,
            oversold,
        }
    }
}

impl Default for ConfluencePolicy {
    fn default() -> Self {
        Self::with_thresholds(70.0, 30.0)
    }
}

impl DecisionPolicy for ConfluencePolicy {
    fn name(&self) -> &str {
        "confluence"
    }

    fn decide(&self, price: f64, snapshot: &IndicatorSnapshot) -> Action {
        if price > snapshot.sma && snapshot.rsi < self.overbought && snapshot.histogram > 0.0 {
            Action::Buy
        } else if price < snapshot.sma && snapshot.rsi > self.oversold && snapshot.histogram < 0.0 {
            Action::Sell
        } else {
            Action::Hold
        }
    }
}
