//! Validate configuration command.

use anyhow::Result;
use pulse_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(settings) => {
            if let Err(e) = settings.validate() {
                println!("Configuration error: {e}");
                anyhow::bail!("invalid configuration");
            }

            println!("Configuration is valid!");
            println!();
            println!("Symbols: {:?}", settings.trading.symbols);
            println!("Strategy: {}", settings.trading.strategy);
            println!("Trade amount: ${}", settings.trading.trade_amount);
            println!(
                "Stops: -{}% / +{}%",
                settings.trading.stop_loss_pct, settings.trading.take_profit_pct
            );
            println!(
                "Cache: ttl {}s, max age {}s",
                settings.cache.ttl_secs, settings.cache.max_age_secs
            );
            println!("Loop interval: {}s", settings.engine.interval_secs);
            println!(
                "Webhook: {}",
                if settings.webhook.url.is_some() {
                    "configured"
                } else {
                    "not configured"
                }
            );
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
