//! Price data access: provider client, cache, and trade log.

mod cache;
mod provider;
mod trade_log;

pub use cache::{CacheEntry, PriceCache};
pub use provider::RetailApiClient;
pub use trade_log::TradeLog;
