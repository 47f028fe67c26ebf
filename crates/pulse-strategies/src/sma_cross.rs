//! Price-vs-SMA policy (strategy 2).

use pulse_core::types::Action;
use pulse_indicators::IndicatorSnapshot;

use crate::DecisionPolicy;

/// Aggressive two-state policy: buy above the SMA, sell below it.
///
/// There is no hold state in this mode.
#[derive(Debug, Clone, Default)]
pub struct SmaCrossPolicy;

impl DecisionPolicy for SmaCrossPolicy {
    fn name(&self) -> &str {
        "sma_cross"
    }

    fn decide(&self, price: f64, snapshot: &IndicatorSnapshot) -> Action {
        if price > snapshot.sma {
            Action::Buy
        } else {
            Action::Sell
        }
    }
}
