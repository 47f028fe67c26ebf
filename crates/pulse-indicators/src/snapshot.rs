//! Combined per-cycle indicator snapshot.

use pulse_core::error::IndicatorError;
use pulse_core::types::{MacdTrend, PriceSeries};
use serde::{Deserialize, Serialize};

use crate::{Macd, Rsi, Sma};

/// Minimum close prices required before a snapshot is considered valid.
///
/// RSI(14) needs 15 points; below that no value reaches a decision policy.
pub const MIN_SAMPLES: usize = 15;

/// All indicator values for one symbol at the newest point of a series.
///
/// Derived functionally from the series; recomputed every cycle, never
/// persisted. `histogram` (MACD line minus signal) is the value decision
/// policies compare against zero and the value written to the trade log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// SMA(5) of the trailing closes
    pub sma: f64,
    /// RSI(14)
    pub rsi: f64,
    /// MACD line (EMA12 - EMA26)
    pub macd: f64,
    /// Signal line (EMA9 of the MACD line)
    pub signal: f64,
    /// MACD histogram (line - signal)
    pub histogram: f64,
    /// Direction of the histogram
    pub trend: MacdTrend,
}

impl IndicatorSnapshot {
    /// Compute the snapshot for a price series.
    ///
    /// Fails with `InsufficientData` below [`MIN_SAMPLES`] closes so callers
    /// skip the symbol instead of comparing against undefined values.
    pub fn compute(series: &PriceSeries) -> Result<Self, IndicatorError> {
        let closes = series.closes();
        if closes.len() < MIN_SAMPLES {
            return Err(IndicatorError::InsufficientData {
                required: MIN_SAMPLES,
                available: closes.len(),
            });
        }

        let sma = Sma::new(5)
            .latest(closes)
            .ok_or(IndicatorError::InsufficientData {
                required: 5,
                available: closes.len(),
            })?;
        let rsi = Rsi::new(14)
            .latest(closes)
            .ok_or(IndicatorError::InsufficientData {
                required: MIN_SAMPLES,
                available: closes.len(),
            })?;
        let macd = Macd::new()
            .latest(closes)
            .ok_or(IndicatorError::InsufficientData {
                required: 1,
                available: closes.len(),
            })?;

        Ok(Self {
            sma,
            rsi,
            macd: macd.line,
            signal: macd.signal,
            histogram: macd.histogram,
            trend: MacdTrend::from_histogram(macd.histogram),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(closes: Vec<f64>) -> PriceSeries {
        PriceSeries::new("BTC", closes)
    }

    #[test]
    fn test_snapshot_requires_warmup() {
        let short = series((0..14).map(|i| 100.0 + i as f64).collect());
        let err = IndicatorSnapshot::compute(&short).unwrap_err();
        assert!(matches!(
            err,
            IndicatorError::InsufficientData { required: 15, available: 14 }
        ));
    }

    #[test]
    fn test_snapshot_at_warmup_boundary() {
        let exact = series((0..15).map(|i| 100.0 + i as f64).collect());
        assert!(IndicatorSnapshot::compute(&exact).is_ok());
    }

    #[test]
    fn test_strictly_increasing_trends_up() {
        let rising = series((0..31).map(|i| 100.0 + i as f64).collect());
        let snapshot = IndicatorSnapshot::compute(&rising).unwrap();

        assert_eq!(snapshot.trend, MacdTrend::Up);
        assert!(snapshot.histogram > 0.0);
        assert!((snapshot.rsi - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_strictly_decreasing_trends_down() {
        let falling = series((0..31).map(|i| 200.0 - i as f64).collect());
        let snapshot = IndicatorSnapshot::compute(&falling).unwrap();

        assert_eq!(snapshot.trend, MacdTrend::Down);
        assert!(snapshot.histogram < 0.0);
        assert!(snapshot.rsi.abs() < 1e-10);
    }

    #[test]
    fn test_sma_matches_trailing_mean() {
        let closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let snapshot = IndicatorSnapshot::compute(&series(closes)).unwrap();

        // Mean of 16..=20
        assert!((snapshot.sma - 18.0).abs() < 1e-10);
    }
}
