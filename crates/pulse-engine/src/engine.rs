//! The fetch/evaluate control loop.

use chrono::{Local, Timelike};
use futures::future::join_all;
use pulse_config::{load_config, Settings};
use pulse_core::error::{DataError, PulseResult};
use pulse_core::traits::{OrderExecutor, PriceProvider};
use pulse_core::types::{OrderRequest, PriceSeries, Side, SymbolSpec, SymbolStatus, TradeRecord};
use pulse_data::PriceCache;
use pulse_indicators::IndicatorSnapshot;
use pulse_ledger::Ledger;
use pulse_notify::{price_bar, StatusReporter};
use pulse_strategies::{ExitRules, PolicyKind};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::market_hours;

/// What a single cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Evaluations ran; `skipped` counts symbols dropped by fetch or
    /// evaluation failures.
    Completed { evaluated: usize, skipped: usize },
    /// Every configured symbol was gated out by market hours.
    MarketClosed,
}

/// Long-lived scheduler owning the shared bot state.
///
/// Configuration is reloaded at the start of every cycle and used as an
/// immutable snapshot for the rest of it; the cache, ledger, and reporter
/// live across cycles.
pub struct Engine {
    config_path: PathBuf,
    provider: Arc<dyn PriceProvider>,
    executor: Arc<dyn OrderExecutor>,
    ledger: Arc<Ledger>,
    reporter: Arc<StatusReporter>,
    cache: Arc<PriceCache>,
}

impl Engine {
    /// Wire up an engine from its collaborators.
    pub fn new(
        config_path: impl Into<PathBuf>,
        provider: Arc<dyn PriceProvider>,
        executor: Arc<dyn OrderExecutor>,
        ledger: Arc<Ledger>,
        reporter: Arc<StatusReporter>,
        cache: Arc<PriceCache>,
    ) -> Self {
        Self {
            config_path: config_path.into(),
            provider,
            executor,
            ledger,
            reporter,
            cache,
        }
    }

    /// Run cycles forever. Nothing below the loop terminates it: failed
    /// reloads keep the previous settings, failed symbols are skipped,
    /// failed sends are swallowed.
    pub async fn run(&self, initial_settings: Settings) -> PulseResult<()> {
        let mut settings = initial_settings;

        loop {
            match load_config(&self.config_path) {
                Ok(fresh) => settings = fresh,
                Err(e) => warn!(error = %e, "config reload failed, keeping previous settings"),
            }

            let local_hour = Local::now().hour();
            let outcome = self.run_cycle(&settings, local_hour).await;

            let sleep_secs = match outcome {
                CycleOutcome::MarketClosed => {
                    info!(
                        "stock market closed, sleeping {}s",
                        settings.engine.gate_interval_secs
                    );
                    settings.engine.gate_interval_secs
                }
                CycleOutcome::Completed { evaluated, skipped } => {
                    info!(evaluated, skipped, "cycle complete");
                    settings.engine.interval_secs
                }
            };
            tokio::time::sleep(Duration::from_secs(sleep_secs)).await;
        }
    }

    /// Run a single cycle at the current local hour.
    pub async fn run_once(&self, settings: &Settings) -> CycleOutcome {
        self.run_cycle(settings, Local::now().hour()).await
    }

    /// One full fetch/evaluate/report pass.
    pub async fn run_cycle(&self, settings: &Settings, local_hour: u32) -> CycleOutcome {
        self.cache
            .configure(settings.cache.ttl_secs, settings.cache.max_age_secs)
            .await;

        let specs: Vec<SymbolSpec> = settings
            .trading
            .symbols
            .iter()
            .filter_map(|entry| match entry.parse() {
                Ok(spec) => Some(spec),
                Err(e) => {
                    warn!(%entry, error = %e, "skipping bad symbol entry");
                    None
                }
            })
            .collect();

        let eligible = market_hours::eligible_symbols(
            &specs,
            local_hour,
            settings.engine.market_open_hour,
            settings.engine.market_close_hour,
        );
        if eligible.is_empty() && !specs.is_empty() {
            return CycleOutcome::MarketClosed;
        }

        // Sequential fetches keep us inside the provider's rate limits;
        // only the evaluation fans out.
        let mut fetched: Vec<(SymbolSpec, f64, PriceSeries)> = Vec::new();
        let mut skipped = 0usize;
        for spec in &eligible {
            info!(symbol = %spec.symbol, "fetching price data");
            match self.cache.get_or_fetch(self.provider.as_ref(), spec).await {
                Ok((price, series)) => {
                    info!(
                        symbol = %spec.symbol,
                        closes = series.len(),
                        price,
                        "price data ready"
                    );
                    fetched.push((spec.clone(), price, series));
                }
                Err(DataError::Unauthenticated) => {
                    error!(symbol = %spec.symbol, "provider session is unauthenticated");
                    skipped += 1;
                }
                Err(e) => {
                    warn!(symbol = %spec.symbol, error = %e, "price fetch failed, skipping symbol");
                    skipped += 1;
                }
            }
        }

        let policy_kind = settings.trading.strategy;
        let exits = ExitRules::new(
            settings.trading.stop_loss_pct,
            settings.trading.take_profit_pct,
        );
        let trade_amount = settings.trading.trade_amount;

        let mut jobs = Vec::with_capacity(fetched.len());
        for (spec, price, series) in fetched {
            let ledger = Arc::clone(&self.ledger);
            let executor = Arc::clone(&self.executor);
            jobs.push(tokio::spawn(async move {
                evaluate_symbol(
                    spec,
                    price,
                    series,
                    policy_kind,
                    exits,
                    trade_amount,
                    ledger,
                    executor,
                )
                .await
            }));
        }

        // Barrier: the reporter only runs once every job has finished.
        let mut statuses = Vec::new();
        for result in join_all(jobs).await {
            match result {
                Ok(Some(status)) => statuses.push(status),
                Ok(None) => skipped += 1,
                Err(e) => {
                    error!(error = %e, "evaluation task failed");
                    skipped += 1;
                }
            }
        }

        if statuses.is_empty() {
            info!("no valid statuses to report");
        }
        let evaluated = statuses.len();
        self.reporter
            .publish(&statuses, self.ledger.realized_profit())
            .await;

        CycleOutcome::Completed { evaluated, skipped }
    }
}

/// Evaluate one symbol: indicators, decision, exit override, order, record.
///
/// Returns `None` when the symbol produces no status this cycle (e.g. the
/// series is still inside the indicator warm-up).
#[allow(clippy::too_many_arguments)]
async fn evaluate_symbol(
    spec: SymbolSpec,
    price: f64,
    series: PriceSeries,
    policy_kind: PolicyKind,
    exits: ExitRules,
    trade_amount: Decimal,
    ledger: Arc<Ledger>,
    executor: Arc<dyn OrderExecutor>,
) -> Option<SymbolStatus> {
    let snapshot = match IndicatorSnapshot::compute(&series) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            debug!(symbol = %spec.symbol, error = %e, "indicators not ready, skipping");
            return None;
        }
    };

    let policy = policy_kind.policy();
    let mut action = policy.decide(price, &snapshot);
    if let Ok(price_dec) = Decimal::try_from(price) {
        action = exits.apply(ledger.entry_price(&spec.symbol), price_dec, action);
    }

    let (change, change_pct) = series.change_against_prev(price).unwrap_or((0.0, 0.0));

    if let Some(side) = Side::from_action(action) {
        let request = OrderRequest::market(&spec.symbol, side, trade_amount);
        if let Err(e) = executor.submit(request).await {
            warn!(symbol = %spec.symbol, error = %e, "order submission failed");
        }
    }

    let record = TradeRecord::new(
        &spec.symbol,
        action,
        price,
        snapshot.sma,
        snapshot.rsi,
        snapshot.histogram,
    );
    if let Err(e) = ledger.record(&record) {
        error!(symbol = %spec.symbol, error = %e, "failed to record decision");
    }

    Some(SymbolStatus {
        symbol: spec.symbol,
        price,
        change,
        change_pct,
        sma: snapshot.sma,
        rsi: snapshot.rsi,
        macd: snapshot.histogram,
        trend: snapshot.trend,
        price_bar: price_bar(series.last_n(10)),
        action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pulse_core::types::Action;
    use pulse_data::TradeLog;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::PaperExecutor;

    struct ScriptedProvider {
        closes: HashMap<String, Vec<f64>>,
        quotes: HashMap<String, f64>,
        fetched: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new() -> Self {
            Self {
                closes: HashMap::new(),
                quotes: HashMap::new(),
                fetched: Mutex::new(Vec::new()),
            }
        }

        fn with_symbol(mut self, symbol: &str, closes: Vec<f64>, quote: f64) -> Self {
            self.closes.insert(symbol.to_string(), closes);
            self.quotes.insert(symbol.to_string(), quote);
            self
        }

        fn fetched_symbols(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PriceProvider for ScriptedProvider {
        async fn historical_closes(&self, spec: &SymbolSpec) -> Result<Vec<f64>, DataError> {
            self.fetched.lock().unwrap().push(spec.symbol.clone());
            self.closes
                .get(&spec.symbol)
                .cloned()
                .ok_or_else(|| DataError::EmptyResponse {
                    symbol: spec.symbol.clone(),
                })
        }

        async fn latest_price(&self, spec: &SymbolSpec) -> Result<f64, DataError> {
            self.quotes
                .get(&spec.symbol)
                .copied()
                .ok_or_else(|| DataError::EmptyResponse {
                    symbol: spec.symbol.clone(),
                })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct Harness {
        engine: Engine,
        provider: Arc<ScriptedProvider>,
        executor: Arc<PaperExecutor>,
        ledger: Arc<Ledger>,
        log_path: std::path::PathBuf,
    }

    fn harness(provider: ScriptedProvider) -> Harness {
        let log_path =
            std::env::temp_dir().join(format!("pulse_engine_{}.csv", Uuid::new_v4()));
        let provider = Arc::new(provider);
        let ledger = Arc::new(Ledger::new(TradeLog::new(&log_path)));
        let executor = Arc::new(PaperExecutor::new());
        let engine = Engine::new(
            "config/default.toml",
            provider.clone(),
            executor.clone(),
            ledger.clone(),
            Arc::new(StatusReporter::new(None, false)),
            Arc::new(PriceCache::new(3600, 7200)),
        );
        Harness {
            engine,
            provider,
            executor,
            ledger,
            log_path,
        }
    }

    fn settings_for(symbols: &[&str]) -> Settings {
        let mut settings = Settings::default();
        settings.trading.symbols = symbols.iter().map(|s| s.to_string()).collect();
        settings
    }

    /// Rising series with regular pullbacks: +3 then -2, netting +1 every
    /// two steps. Keeps RSI around 60, below the overbought guard.
    fn zigzag_uptrend(len: usize) -> Vec<f64> {
        let mut closes = Vec::with_capacity(len);
        let mut price = 100.0;
        closes.push(price);
        for i in 1..len {
            price += if i % 2 == 1 { 3.0 } else { -2.0 };
            closes.push(price);
        }
        closes
    }

    #[tokio::test]
    async fn test_market_gate_skips_stocks_outside_hours() {
        let provider = ScriptedProvider::new()
            .with_symbol("BTC", zigzag_uptrend(31), 117.0)
            .with_symbol("AAPL", zigzag_uptrend(31), 117.0);
        let h = harness(provider);
        let settings = settings_for(&["BTC:crypto", "AAPL:stock"]);

        let outcome = h.engine.run_cycle(&settings, 3).await;

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                evaluated: 1,
                skipped: 0
            }
        );
        // The stock is not even fetched while the market is closed.
        assert_eq!(h.provider.fetched_symbols(), vec!["BTC".to_string()]);

        std::fs::remove_file(&h.log_path).ok();
    }

    #[tokio::test]
    async fn test_only_stocks_gates_whole_cycle() {
        let provider = ScriptedProvider::new().with_symbol("AAPL", zigzag_uptrend(31), 117.0);
        let h = harness(provider);
        let settings = settings_for(&["AAPL:stock"]);

        let outcome = h.engine.run_cycle(&settings, 3).await;

        assert_eq!(outcome, CycleOutcome::MarketClosed);
        assert!(h.provider.fetched_symbols().is_empty());
        assert_eq!(h.ledger.open_positions(), 0);
        assert!(!h.log_path.exists());
    }

    #[tokio::test]
    async fn test_uptrend_buys_and_opens_position() {
        // Last closes ...113,116,114,117,115 -> SMA(5)=115; quote above it.
        let provider = ScriptedProvider::new().with_symbol("BTC", zigzag_uptrend(31), 116.0);
        let h = harness(provider);
        let settings = settings_for(&["BTC:crypto"]);

        let outcome = h.engine.run_cycle(&settings, 3).await;

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                evaluated: 1,
                skipped: 0
            }
        );
        assert_eq!(h.ledger.entry_price("BTC"), Some(dec!(116)));
        assert_eq!(h.executor.submitted_count(), 1);
        assert_eq!(h.executor.submitted()[0].side, Side::Buy);

        let log = std::fs::read_to_string(&h.log_path).unwrap();
        assert!(log.lines().nth(1).unwrap().contains(",BTC,buy,"));

        std::fs::remove_file(&h.log_path).ok();
    }

    #[tokio::test]
    async fn test_strictly_rising_series_buys_with_sma_cross() {
        let closes: Vec<f64> = (0..31).map(|i| 100.0 + i as f64).collect();
        let provider = ScriptedProvider::new().with_symbol("BTC", closes, 131.0);
        let h = harness(provider);
        let mut settings = settings_for(&["BTC:crypto"]);
        settings.trading.strategy = PolicyKind::SmaCross;

        h.engine.run_cycle(&settings, 3).await;

        assert_eq!(h.ledger.entry_price("BTC"), Some(dec!(131)));
        assert_eq!(h.executor.submitted()[0].side, Side::Buy);

        std::fs::remove_file(&h.log_path).ok();
    }

    #[tokio::test]
    async fn test_overbought_guard_holds_on_monotonic_rise() {
        // With no losses in the window RSI clamps to 100, so the
        // confluence policy treats a straight-line rise as overbought.
        let closes: Vec<f64> = (0..31).map(|i| 100.0 + i as f64).collect();
        let provider = ScriptedProvider::new().with_symbol("BTC", closes, 131.0);
        let h = harness(provider);
        let settings = settings_for(&["BTC:crypto"]);

        h.engine.run_cycle(&settings, 3).await;

        assert_eq!(h.ledger.open_positions(), 0);
        assert_eq!(h.executor.submitted_count(), 0);
        let log = std::fs::read_to_string(&h.log_path).unwrap();
        assert!(log.lines().nth(1).unwrap().contains(",BTC,hold,"));

        std::fs::remove_file(&h.log_path).ok();
    }

    #[tokio::test]
    async fn test_short_series_is_skipped_not_fatal() {
        let provider = ScriptedProvider::new().with_symbol("BTC", vec![100.0; 10], 100.0);
        let h = harness(provider);
        let settings = settings_for(&["BTC:crypto"]);

        let outcome = h.engine.run_cycle(&settings, 3).await;

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                evaluated: 0,
                skipped: 1
            }
        );
        assert_eq!(h.ledger.open_positions(), 0);

        std::fs::remove_file(&h.log_path).ok();
    }

    #[tokio::test]
    async fn test_failed_fetch_skips_symbol_but_not_cycle() {
        let provider = ScriptedProvider::new().with_symbol("BTC", zigzag_uptrend(31), 116.0);
        let h = harness(provider);
        let settings = settings_for(&["BTC:crypto", "DOGE:crypto"]);

        let outcome = h.engine.run_cycle(&settings, 3).await;

        assert_eq!(
            outcome,
            CycleOutcome::Completed {
                evaluated: 1,
                skipped: 1
            }
        );

        std::fs::remove_file(&h.log_path).ok();
    }

    #[tokio::test]
    async fn test_stop_loss_overrides_policy_to_sell() {
        // Flat-ish tail keeps the policy on hold; entry far above forces
        // the stop-loss override.
        let provider = ScriptedProvider::new().with_symbol("BTC", zigzag_uptrend(31), 115.0);
        let h = harness(provider);
        let settings = settings_for(&["BTC:crypto"]);

        h.ledger
            .record(&TradeRecord::new("BTC", Action::Buy, 200.0, 0.0, 50.0, 0.0))
            .unwrap();

        h.engine.run_cycle(&settings, 3).await;

        // Position closed by the forced sell: 115 - 200 realized.
        assert_eq!(h.ledger.entry_price("BTC"), None);
        assert_eq!(h.ledger.realized_profit(), dec!(-85));

        std::fs::remove_file(&h.log_path).ok();
    }
}
