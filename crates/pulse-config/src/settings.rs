//! Configuration structures.

use pulse_core::types::{ParseSymbolError, SymbolSpec};
use pulse_strategies::PolicyKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub trading: TradingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub webhook: WebhookSettings,
}

impl Settings {
    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        self.trading
            .symbol_specs()
            .map_err(|e| format!("trading.symbols: {e}"))?;
        if self.trading.trade_amount <= Decimal::ZERO {
            return Err("trading.trade_amount must be positive".to_string());
        }
        if self.trading.stop_loss_pct < Decimal::ZERO
            || self.trading.take_profit_pct < Decimal::ZERO
        {
            return Err("stop-loss and take-profit percentages must not be negative".to_string());
        }
        if self.cache.max_age_secs < self.cache.ttl_secs {
            return Err("cache.max_age_secs must be at least cache.ttl_secs".to_string());
        }
        if self.engine.market_open_hour > self.engine.market_close_hour
            || self.engine.market_close_hour > 23
        {
            return Err("engine market hours must satisfy open <= close <= 23".to_string());
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Price provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Base URL of the retail trading API
    pub base_url: String,
    /// Environment variable holding the session token
    pub token_env: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.retailtrade.example".to_string(),
            token_env: "PULSE_API_TOKEN".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Trading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingSettings {
    /// Symbol entries, `"SYM:class"` (bare symbols default to crypto)
    pub symbols: Vec<String>,
    /// Active decision policy; hot-reloaded every cycle
    pub strategy: PolicyKind,
    /// Dollar amount per order
    pub trade_amount: Decimal,
    /// Stop-loss bound in percent (0 disables)
    pub stop_loss_pct: Decimal,
    /// Take-profit bound in percent (0 disables)
    pub take_profit_pct: Decimal,
    /// Route orders to the paper executor
    pub paper_trading: bool,
    /// Path of the append-only decision log
    pub trade_log: String,
}

impl Default for TradingSettings {
    fn default() -> Self {
        use rust_decimal_macros::dec;
        Self {
            symbols: vec!["BTC:crypto".to_string()],
            strategy: PolicyKind::default(),
            trade_amount: dec!(10),
            stop_loss_pct: dec!(3),
            take_profit_pct: dec!(5),
            paper_trading: true,
            trade_log: "trade_log.csv".to_string(),
        }
    }
}

impl TradingSettings {
    /// Parse all configured symbol entries, failing on the first bad one.
    pub fn symbol_specs(&self) -> Result<Vec<SymbolSpec>, ParseSymbolError> {
        self.symbols.iter().map(|s| s.parse()).collect()
    }
}

/// Price cache windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Freshness window: entries younger than this skip the provider
    pub ttl_secs: u64,
    /// Hard expiry: entries older than this are evicted before lookup
    pub max_age_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            max_age_secs: 7200,
        }
    }
}

/// Control loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Sleep between cycles
    pub interval_secs: u64,
    /// Sleep when the market-hours gate leaves nothing to evaluate
    pub gate_interval_secs: u64,
    /// First local hour (inclusive) stocks are eligible
    pub market_open_hour: u32,
    /// Last local hour (inclusive) stocks are eligible
    pub market_close_hour: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            gate_interval_secs: 300,
            market_open_hour: 9,
            market_close_hour: 16,
        }
    }
}

/// Chat webhook configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WebhookSettings {
    /// Webhook endpoint; summaries are skipped when unset
    pub url: Option<String>,
    /// Edit the previous summary message instead of posting a new one
    #[serde(default)]
    pub edit_in_place: bool,
}
