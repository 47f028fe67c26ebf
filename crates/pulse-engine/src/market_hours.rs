//! Coarse market-hours gate.

use pulse_core::types::SymbolSpec;

/// Whether the local hour falls inside the stock-trading window.
pub fn is_market_hour(local_hour: u32, open_hour: u32, close_hour: u32) -> bool {
    local_hour >= open_hour && local_hour <= close_hour
}

/// Symbols eligible for evaluation at the given local hour.
///
/// Crypto symbols are always eligible; stocks only inside the trading
/// window. An empty result with a non-empty input means the whole cycle
/// should gate-sleep.
pub fn eligible_symbols(
    specs: &[SymbolSpec],
    local_hour: u32,
    open_hour: u32,
    close_hour: u32,
) -> Vec<SymbolSpec> {
    let stocks_open = is_market_hour(local_hour, open_hour, close_hour);
    specs
        .iter()
        .filter(|spec| !spec.is_stock() || stocks_open)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<SymbolSpec> {
        vec![SymbolSpec::crypto("BTC"), SymbolSpec::stock("AAPL")]
    }

    #[test]
    fn test_market_hour_bounds_inclusive() {
        assert!(is_market_hour(9, 9, 16));
        assert!(is_market_hour(16, 9, 16));
        assert!(!is_market_hour(8, 9, 16));
        assert!(!is_market_hour(17, 9, 16));
    }

    #[test]
    fn test_crypto_always_eligible() {
        let eligible = eligible_symbols(&specs(), 3, 9, 16);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].symbol, "BTC");
    }

    #[test]
    fn test_stocks_eligible_during_market_hours() {
        let eligible = eligible_symbols(&specs(), 10, 9, 16);
        assert_eq!(eligible.len(), 2);
    }

    #[test]
    fn test_all_stock_list_gates_out() {
        let stocks = vec![SymbolSpec::stock("AAPL"), SymbolSpec::stock("TSLA")];
        assert!(eligible_symbols(&stocks, 3, 9, 16).is_empty());
    }
}
