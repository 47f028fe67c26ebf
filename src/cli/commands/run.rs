//! Run command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use pulse_config::load_config;
use pulse_core::traits::Notifier;
use pulse_data::{PriceCache, RetailApiClient, TradeLog};
use pulse_engine::{Engine, PaperExecutor};
use pulse_ledger::Ledger;
use pulse_notify::{setup_logging, StatusReporter, WebhookNotifier};

use crate::cli::{LogLevel, RunArgs};

pub async fn run(
    args: RunArgs,
    config_path: &Path,
    log_level: Option<LogLevel>,
    json_logs: bool,
) -> Result<()> {
    let mut settings = load_config(config_path)
        .with_context(|| format!("failed to load configuration from {:?}", config_path))?;

    if let Some(symbols) = args.symbols {
        settings.trading.symbols = symbols;
    }
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let level = log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| settings.logging.level.clone());
    let json = json_logs || settings.logging.format == "json";
    let _log_guard = setup_logging(&level, json, settings.logging.file.as_deref());

    let provider = Arc::new(
        RetailApiClient::from_env(
            &settings.provider.base_url,
            &settings.provider.token_env,
            Duration::from_secs(settings.provider.timeout_secs),
        )
        .with_context(|| {
            format!(
                "provider authentication failed; set {} to a valid session token",
                settings.provider.token_env
            )
        })?,
    );

    if !settings.trading.paper_trading {
        warn!("live order routing is not implemented; orders stay on the paper executor");
    }
    let executor = Arc::new(PaperExecutor::new());

    let ledger = Arc::new(Ledger::new(TradeLog::new(&settings.trading.trade_log)));

    let notifier: Option<Arc<dyn Notifier>> = match &settings.webhook.url {
        Some(url) => Some(Arc::new(WebhookNotifier::new(url)?)),
        None => {
            info!("no webhook configured; status summaries will only be logged");
            None
        }
    };
    let reporter = Arc::new(StatusReporter::new(
        notifier,
        settings.webhook.edit_in_place,
    ));

    let cache = Arc::new(PriceCache::new(
        settings.cache.ttl_secs,
        settings.cache.max_age_secs,
    ));

    let engine = Engine::new(config_path, provider, executor, ledger, reporter, cache);

    info!(
        symbols = ?settings.trading.symbols,
        strategy = %settings.trading.strategy,
        "starting signal loop"
    );

    if args.once {
        let outcome = engine.run_once(&settings).await;
        info!(?outcome, "single cycle finished");
        return Ok(());
    }

    engine.run(settings).await?;
    Ok(())
}
