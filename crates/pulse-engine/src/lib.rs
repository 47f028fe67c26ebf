//! Fetch/evaluate scheduler driving the signal bot.
//!
//! One long-lived control loop fetches price data sequentially (the
//! provider is rate-limit-sensitive), fans evaluation out to one task per
//! symbol, waits for all of them, then reports. No failure below the loop
//! is allowed to terminate it.

mod engine;
mod executor;
mod market_hours;

pub use engine::{CycleOutcome, Engine};
pub use executor::PaperExecutor;
pub use market_hours::{eligible_symbols, is_market_hour};
