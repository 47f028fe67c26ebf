//! List strategies command.

use anyhow::Result;
use pulse_strategies::PolicyKind;

pub async fn run() -> Result<()> {
    println!("Available Strategies");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for kind in PolicyKind::all() {
        println!("  {}", kind.name());
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", kind.description());
        println!();
    }

    println!("Select one with trading.strategy in the config file;");
    println!("the numeric selectors 1 (confluence) and 2 (sma_cross) also work.");

    Ok(())
}
