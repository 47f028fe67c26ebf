//! Time-bounded price cache.

use chrono::{DateTime, Duration, Utc};
use pulse_core::error::DataError;
use pulse_core::traits::PriceProvider;
use pulse_core::types::{PriceSeries, SymbolSpec};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// One cached fetch result for a symbol.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Quote price at fetch time
    pub current_price: f64,
    /// Historical closes at fetch time
    pub series: PriceSeries,
    /// When the fetch happened
    pub fetched_at: DateTime<Utc>,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    max_age: Duration,
}

/// Shared per-symbol cache of price data.
///
/// Entries younger than `ttl` are served without a provider call; entries
/// older than `max_age` are evicted before every lookup and never served.
/// Anything in between is refreshed from the provider on access. The whole
/// lookup-fetch-store sequence runs under one lock, so concurrent callers
/// cannot interleave a fetch with a store and lose an update.
pub struct PriceCache {
    inner: Mutex<CacheInner>,
}

impl PriceCache {
    /// Create a cache with the given freshness and expiry windows.
    pub fn new(ttl_secs: u64, max_age_secs: u64) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                ttl: Duration::seconds(ttl_secs as i64),
                max_age: Duration::seconds(max_age_secs as i64),
            }),
        }
    }

    /// Update the windows from freshly reloaded configuration.
    pub async fn configure(&self, ttl_secs: u64, max_age_secs: u64) {
        let mut inner = self.inner.lock().await;
        inner.ttl = Duration::seconds(ttl_secs as i64);
        inner.max_age = Duration::seconds(max_age_secs as i64);
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    /// Check if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Return cached price data for a symbol, fetching when needed.
    ///
    /// Fetch failures propagate without populating the cache; the caller
    /// skips the symbol for the cycle and retries next cycle.
    pub async fn get_or_fetch(
        &self,
        provider: &dyn PriceProvider,
        spec: &SymbolSpec,
    ) -> Result<(f64, PriceSeries), DataError> {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();

        let max_age = inner.max_age;
        inner
            .entries
            .retain(|_, entry| now - entry.fetched_at <= max_age);

        if let Some(entry) = inner.entries.get(&spec.symbol) {
            if now - entry.fetched_at < inner.ttl {
                debug!(symbol = %spec.symbol, "price cache hit");
                return Ok((entry.current_price, entry.series.clone()));
            }
        }

        let closes = provider.historical_closes(spec).await?;
        if closes.is_empty() {
            return Err(DataError::EmptyResponse {
                symbol: spec.symbol.clone(),
            });
        }
        let current_price = provider.latest_price(spec).await?;

        let series = PriceSeries::new(&spec.symbol, closes);
        inner.entries.insert(
            spec.symbol.clone(),
            CacheEntry {
                current_price,
                series: series.clone(),
                fetched_at: now,
            },
        );

        Ok((current_price, series))
    }
}
