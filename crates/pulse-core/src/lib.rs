//! Core types and traits for the pulse signal bot.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PriceSeries, CacheEntry inputs)
//! - Decision and trade-record types
//! - Order request types for the execution interface
//! - Core traits for price providers, order executors, and notifiers

pub mod error;
pub mod traits;
pub mod types;

pub use error::{PulseError, PulseResult};
pub use traits::*;
pub use types::*;
