//! Technical indicators for the signal bot.
//!
//! This crate provides the indicator kernels the decision loop runs on:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - A per-cycle [`IndicatorSnapshot`] combining all of them
//!
//! EMAs use exponential smoothing seeded by the first value, so MACD values
//! are defined from the start of a series; the snapshot still enforces the
//! 15-point warm-up before any value is handed to a decision policy.

pub mod momentum;
pub mod moving_average;

mod snapshot;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use snapshot::{IndicatorSnapshot, MIN_SAMPLES};
