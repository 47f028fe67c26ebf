//! Symbols and asset classes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Asset class of a configured symbol.
///
/// Determines which provider endpoints are used and whether the
/// market-hours gate applies (stocks only; crypto trades around the clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Crypto,
    Stock,
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::Crypto => write!(f, "crypto"),
            AssetClass::Stock => write!(f, "stock"),
        }
    }
}

impl FromStr for AssetClass {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crypto" => Ok(AssetClass::Crypto),
            "stock" => Ok(AssetClass::Stock),
            other => Err(ParseSymbolError::UnknownClass(other.to_string())),
        }
    }
}

/// Error parsing a `"SYM:class"` configuration entry.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseSymbolError {
    #[error("empty symbol entry")]
    Empty,

    #[error("unknown asset class: {0}")]
    UnknownClass(String),

    #[error("malformed symbol entry: {0}")]
    Malformed(String),
}

/// A configured symbol with its asset class. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolSpec {
    /// Symbol identifier, e.g. "BTC" or "AAPL"
    pub symbol: String,
    /// Asset class tag
    pub class: AssetClass,
}

impl SymbolSpec {
    /// Create a symbol spec directly.
    pub fn new(symbol: impl Into<String>, class: AssetClass) -> Self {
        Self {
            symbol: symbol.into(),
            class,
        }
    }

    /// Shorthand for a crypto symbol.
    pub fn crypto(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetClass::Crypto)
    }

    /// Shorthand for a stock symbol.
    pub fn stock(symbol: impl Into<String>) -> Self {
        Self::new(symbol, AssetClass::Stock)
    }

    /// Whether this symbol is gated by stock-market hours.
    pub fn is_stock(&self) -> bool {
        self.class == AssetClass::Stock
    }
}

impl FromStr for SymbolSpec {
    type Err = ParseSymbolError;

    /// Parse a `"SYM:class"` entry. A bare `"SYM"` defaults to crypto.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseSymbolError::Empty);
        }

        let mut parts = s.split(':');
        let symbol = parts.next().unwrap_or_default().trim();
        if symbol.is_empty() {
            return Err(ParseSymbolError::Empty);
        }

        let class = match parts.next() {
            Some(class) => class.trim().parse()?,
            None => AssetClass::Crypto,
        };

        if parts.next().is_some() {
            return Err(ParseSymbolError::Malformed(s.to_string()));
        }

        Ok(Self::new(symbol, class))
    }
}

impl fmt::Display for SymbolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.symbol, self.class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_entry() {
        let spec: SymbolSpec = "AAPL:stock".parse().unwrap();
        assert_eq!(spec.symbol, "AAPL");
        assert_eq!(spec.class, AssetClass::Stock);
    }

    #[test]
    fn test_parse_bare_entry_defaults_to_crypto() {
        let spec: SymbolSpec = "BTC".parse().unwrap();
        assert_eq!(spec.symbol, "BTC");
        assert_eq!(spec.class, AssetClass::Crypto);
    }

    #[test]
    fn test_parse_rejects_unknown_class() {
        let err = "GOLD:commodity".parse::<SymbolSpec>().unwrap_err();
        assert_eq!(err, ParseSymbolError::UnknownClass("commodity".to_string()));
    }

    #[test]
    fn test_parse_rejects_empty_and_malformed() {
        assert_eq!("".parse::<SymbolSpec>().unwrap_err(), ParseSymbolError::Empty);
        assert_eq!(
            ":crypto".parse::<SymbolSpec>().unwrap_err(),
            ParseSymbolError::Empty
        );
        assert!(matches!(
            "BTC:crypto:extra".parse::<SymbolSpec>().unwrap_err(),
            ParseSymbolError::Malformed(_)
        ));
    }

    #[test]
    fn test_display_round_trip() {
        let spec = SymbolSpec::stock("TSLA");
        let parsed: SymbolSpec = spec.to_string().parse().unwrap();
        assert_eq!(parsed, spec);
    }
}
