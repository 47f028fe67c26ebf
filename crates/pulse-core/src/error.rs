//! Error types for the signal bot.

use thiserror::Error;

/// Top-level bot error.
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Execution error: {0}")]
    Exec(#[from] ExecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Price-data fetch errors.
///
/// Everything except `Unauthenticated` is treated as transient: the symbol
/// is skipped for the cycle and retried on the next one.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No provider session: authentication token is missing")]
    Unauthenticated,

    #[error("Empty response from provider for {symbol}")]
    EmptyResponse { symbol: String },

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Rate limited: retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Decision policy errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown strategy: {0}")]
    NotFound(String),
}

/// Position/profit ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Price is not representable: {0}")]
    InvalidPrice(f64),

    #[error("Trade log error: {0}")]
    Log(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Notification sink errors. Logged and swallowed, never fatal.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("No webhook configured")]
    NotConfigured,

    #[error("Webhook returned status {status}")]
    Api { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed webhook response: {0}")]
    Parse(String),
}

/// Order submission errors.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Order rejected: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Result type alias for bot operations.
pub type PulseResult<T> = Result<T, PulseError>;
