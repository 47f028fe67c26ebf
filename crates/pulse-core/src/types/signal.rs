//! Decision outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal output of a decision policy for one symbol and cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    /// Whether this action would place an order.
    pub fn is_trade(&self) -> bool {
        !matches!(self, Action::Hold)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "buy"),
            Action::Sell => write!(f, "sell"),
            Action::Hold => write!(f, "hold"),
        }
    }
}

/// Sign of the MACD histogram at the newest point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacdTrend {
    Up,
    Down,
}

impl MacdTrend {
    /// Directional indicator from a histogram value.
    pub fn from_histogram(histogram: f64) -> Self {
        if histogram > 0.0 {
            MacdTrend::Up
        } else {
            MacdTrend::Down
        }
    }

    /// Chat-friendly arrow for status summaries.
    pub fn icon(&self) -> &'static str {
        match self {
            MacdTrend::Up => "📈",
            MacdTrend::Down => "📉",
        }
    }
}
