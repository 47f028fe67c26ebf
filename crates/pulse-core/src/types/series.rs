//! Close-price series.

use serde::{Deserialize, Serialize};

/// Ordered close prices for one symbol, newest last.
///
/// A series is replaced wholesale on each fresh fetch and never partially
/// mutated; indicator math treats it as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Symbol identifier
    pub symbol: String,
    closes: Vec<f64>,
}

impl PriceSeries {
    /// Create a series from chronological close prices (newest last).
    pub fn new(symbol: impl Into<String>, closes: Vec<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            closes,
        }
    }

    /// Number of close prices.
    #[inline]
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// All closes as a slice.
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// Most recent close.
    pub fn last(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// Close before the most recent one.
    pub fn prev(&self) -> Option<f64> {
        let len = self.closes.len();
        if len < 2 {
            return None;
        }
        Some(self.closes[len - 2])
    }

    /// The trailing `n` closes (fewer if the series is shorter).
    pub fn last_n(&self, n: usize) -> &[f64] {
        let start = self.closes.len().saturating_sub(n);
        &self.closes[start..]
    }

    /// Absolute and percentage change of `price` against the previous close.
    ///
    /// Percentage is zero when the previous close is zero.
    pub fn change_against_prev(&self, price: f64) -> Option<(f64, f64)> {
        let prev = self.prev()?;
        let change = price - prev;
        let change_pct = if prev == 0.0 {
            0.0
        } else {
            (change / prev) * 100.0
        };
        Some((change, change_pct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_and_prev() {
        let series = PriceSeries::new("BTC", vec![1.0, 2.0, 3.0]);
        assert_eq!(series.last(), Some(3.0));
        assert_eq!(series.prev(), Some(2.0));

        let short = PriceSeries::new("BTC", vec![1.0]);
        assert_eq!(short.last(), Some(1.0));
        assert_eq!(short.prev(), None);
    }

    #[test]
    fn test_last_n_clamps_to_length() {
        let series = PriceSeries::new("BTC", vec![1.0, 2.0, 3.0]);
        assert_eq!(series.last_n(2), &[2.0, 3.0]);
        assert_eq!(series.last_n(10), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_change_against_prev() {
        let series = PriceSeries::new("BTC", vec![100.0, 104.0]);
        let (change, change_pct) = series.change_against_prev(106.0).unwrap();
        assert!((change - 2.0).abs() < 1e-10);
        assert!((change_pct - (2.0 / 104.0 * 100.0)).abs() < 1e-10);
    }

    #[test]
    fn test_change_guards_zero_prev() {
        let series = PriceSeries::new("BTC", vec![0.0, 0.0]);
        let (change, change_pct) = series.change_against_prev(5.0).unwrap();
        assert_eq!(change, 5.0);
        assert_eq!(change_pct, 0.0);
    }
}
