//! Stop-loss / take-profit exit overrides.

use pulse_core::types::Action;
use rust_decimal::Decimal;
use tracing::debug;

/// Percentage-based exit rules applied on top of a policy decision.
///
/// When an open entry exists and the price has moved past either bound,
/// the cycle's action becomes a sell regardless of what the policy said.
/// A zero percentage disables that bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitRules {
    stop_loss_pct: Decimal,
    take_profit_pct: Decimal,
}

impl ExitRules {
    /// Create exit rules from percentage bounds (e.g. 3 = 3%).
    pub fn new(stop_loss_pct: Decimal, take_profit_pct: Decimal) -> Self {
        Self {
            stop_loss_pct,
            take_profit_pct,
        }
    }

    /// Rules that never override.
    pub fn disabled() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    /// Override `action` when the entry has breached a bound.
    pub fn apply(&self, entry_price: Option<Decimal>, price: Decimal, action: Action) -> Action {
        let Some(entry) = entry_price else {
            return action;
        };
        if entry <= Decimal::ZERO {
            return action;
        }

        let move_pct = (price - entry) / entry * Decimal::from(100);

        if self.stop_loss_pct > Decimal::ZERO && -move_pct >= self.stop_loss_pct {
            debug!(%entry, %price, "stop-loss breached, forcing sell");
            return Action::Sell;
        }
        if self.take_profit_pct > Decimal::ZERO && move_pct >= self.take_profit_pct {
            debug!(%entry, %price, "take-profit reached, forcing sell");
            return Action::Sell;
        }

        action
    }
}
