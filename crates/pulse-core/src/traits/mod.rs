//! Core traits for the signal bot.

mod executor;
mod indicator;
mod notifier;
mod provider;

pub use executor::OrderExecutor;
pub use indicator::{Indicator, MultiOutputIndicator};
pub use notifier::{MessageId, Notifier};
pub use provider::PriceProvider;
