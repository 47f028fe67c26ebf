//! Decision policies for the signal bot.
//!
//! A policy maps the current price plus an indicator snapshot into one of
//! buy/sell/hold. Policies are stateless; position bookkeeping happens in
//! the ledger after the decision.

mod confluence;
mod exits;
mod kind;
mod sma_cross;

pub use confluence::ConfluencePolicy;
pub use exits::ExitRules;
pub use kind::PolicyKind;
pub use sma_cross::SmaCrossPolicy;

use pulse_core::types::Action;
use pulse_indicators::IndicatorSnapshot;

/// Core decision policy trait.
pub trait DecisionPolicy: Send + Sync {
    /// Get the unique name of this policy.
    fn name(&self) -> &str;

    /// Map price and indicators into an action.
    fn decide(&self, price: f64, snapshot: &IndicatorSnapshot) -> Action;
}
