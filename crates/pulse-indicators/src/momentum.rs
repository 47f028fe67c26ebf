//! Momentum indicators.

use pulse_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::Ema;

/// Relative Strength Index (RSI).
///
/// Average gain over average loss across the trailing window of price
/// diffs, scaled to 0–100. Uses a plain rolling mean, not Wilder's
/// smoothing. When the average loss is zero the value clamps to 100.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// RSI at the newest point, if enough data exists.
    pub fn latest(&self, data: &[f64]) -> Option<f64> {
        self.calculate(data).last().copied()
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for pair in data.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let period_f64 = self.period as f64;
        gains
            .windows(self.period)
            .zip(losses.windows(self.period))
            .map(|(gain_window, loss_window)| {
                let avg_gain: f64 = gain_window.iter().sum::<f64>() / period_f64;
                let avg_loss: f64 = loss_window.iter().sum::<f64>() / period_f64;
                if avg_loss == 0.0 {
                    100.0
                } else {
                    100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points for period diffs
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub line: f64,
    /// Signal line (EMA of the MACD line)
    pub signal: f64,
    /// Histogram (line - signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Both EMAs and the signal EMA are seeded by their first value, so an
/// output exists for every input point; early values reflect partial
/// warm-up and callers gate on a minimum sample count.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }

    /// MACD output at the newest point.
    pub fn latest(&self, data: &[f64]) -> Option<MacdOutput> {
        self.calculate(data).last().copied()
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        if data.is_empty() {
            return vec![];
        }

        let fast_ema = self.fast.calculate(data);
        let slow_ema = self.slow.calculate(data);

        let line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let signal_line = self.signal.calculate(&line);

        line.iter()
            .zip(signal_line.iter())
            .map(|(&line, &signal)| MacdOutput {
                line,
                signal,
                histogram: line - signal,
            })
            .collect()
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_bounded() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert!(!result.is_empty());
        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains_clamps_to_100() {
        let rsi = Rsi::new(5);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        for value in &result {
            assert!((value - 100.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        assert!(result[0].abs() < 1e-10);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..14).map(|i| i as f64).collect();
        assert!(rsi.calculate(&data).is_empty());
        assert!(rsi.latest(&data).is_none());
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert_eq!(result.len(), data.len());
        let last = result.last().unwrap();
        assert!(last.line > 0.0);
        assert!(last.histogram > 0.0);
    }

    #[test]
    fn test_macd_negative_in_downtrend() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 150.0 - i as f64).collect();
        let last = macd.latest(&data).unwrap();

        assert!(last.line < 0.0);
        assert!(last.histogram < 0.0);
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let macd = Macd::new();
        let data = vec![100.0; 40];
        let last = macd.latest(&data).unwrap();

        assert!(last.line.abs() < 1e-10);
        assert!(last.signal.abs() < 1e-10);
        assert!(last.histogram.abs() < 1e-10);
    }
}
