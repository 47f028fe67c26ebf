//! Policy selection.

use pulse_core::error::StrategyError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::{ConfluencePolicy, DecisionPolicy, SmaCrossPolicy};

/// Selector for the active decision policy.
///
/// Read fresh from configuration each cycle, so operators can switch
/// strategies without restarting the bot. Accepts the legacy numeric
/// selector (`1`, `2`) as well as names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Confluence,
    SmaCross,
}

impl PolicyKind {
    /// Instantiate the selected policy with default thresholds.
    pub fn policy(&self) -> Box<dyn DecisionPolicy> {
        match self {
            PolicyKind::Confluence => Box::new(ConfluencePolicy::default()),
            PolicyKind::SmaCross => Box::new(SmaCrossPolicy),
        }
    }

    /// Stable name used in configuration and the CLI listing.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Confluence => "confluence",
            PolicyKind::SmaCross => "sma_cross",
        }
    }

    /// One-line description for the CLI listing.
    pub fn description(&self) -> &'static str {
        match self {
            PolicyKind::Confluence => {
                "Buy when price > SMA, RSI < 70 and MACD histogram > 0; mirrored sell"
            }
            PolicyKind::SmaCross => "Buy above the SMA, sell below it; never holds",
        }
    }

    /// All selectable policies.
    pub fn all() -> &'static [PolicyKind] {
        &[PolicyKind::Confluence, PolicyKind::SmaCross]
    }

    fn from_index(index: u64) -> Result<Self, StrategyError> {
        match index {
            1 => Ok(PolicyKind::Confluence),
            2 => Ok(PolicyKind::SmaCross),
            other => Err(StrategyError::NotFound(other.to_string())),
        }
    }
}

impl Default for PolicyKind {
    fn default() -> Self {
        PolicyKind::Confluence
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confluence" => Ok(PolicyKind::Confluence),
            "sma_cross" => Ok(PolicyKind::SmaCross),
            numeric => numeric
                .parse::<u64>()
                .map_err(|_| StrategyError::NotFound(s.to_string()))
                .and_then(Self::from_index),
        }
    }
}

impl Serialize for PolicyKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for PolicyKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KindVisitor;

        impl Visitor<'_> for KindVisitor {
            type Value = PolicyKind;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a strategy name or numeric selector")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                PolicyKind::from_index(value).map_err(de::Error::custom)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map_err(de::Error::custom)
                    .and_then(|v| PolicyKind::from_index(v).map_err(de::Error::custom))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(KindVisitor)
    }
}
