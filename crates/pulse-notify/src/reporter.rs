//! Cycle status summaries.

use pulse_core::traits::{MessageId, Notifier};
use pulse_core::types::SymbolStatus;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

const BAR_CHARS: [char; 7] = ['▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the trailing closes as a compact intensity bar.
///
/// The last ten prices are bucketed into seven levels scaled by the
/// min/max of that window. A flat window renders at the lowest level.
pub fn price_bar(prices: &[f64]) -> String {
    if prices.is_empty() {
        return String::new();
    }

    let start = prices.len().saturating_sub(10);
    let subset = &prices[start..];

    let min = subset.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = subset.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let scale = if max == min {
        1.0
    } else {
        (max - min) / BAR_CHARS.len() as f64
    };

    subset
        .iter()
        .map(|p| {
            let level = (((p - min) / scale) as usize).min(BAR_CHARS.len() - 1);
            BAR_CHARS[level]
        })
        .collect()
}

#[derive(Default)]
struct ReporterState {
    last_summary: Option<String>,
    last_message_id: Option<MessageId>,
}

/// Aggregates per-symbol results into one chat summary per cycle.
///
/// Textually identical consecutive summaries are suppressed; send and
/// edit failures are logged and swallowed, never fatal to the loop.
pub struct StatusReporter {
    notifier: Option<Arc<dyn Notifier>>,
    edit_in_place: bool,
    state: Mutex<ReporterState>,
}

impl StatusReporter {
    /// Create a reporter. With no notifier, summaries are only logged.
    pub fn new(notifier: Option<Arc<dyn Notifier>>, edit_in_place: bool) -> Self {
        Self {
            notifier,
            edit_in_place,
            state: Mutex::new(ReporterState::default()),
        }
    }

    /// Format the cycle summary.
    pub fn build_summary(statuses: &[SymbolStatus], realized_profit: Decimal) -> String {
        let mut message = String::new();
        for status in statuses {
            message.push_str(&format!(
                "{} — {} @ ${:.2} | Δ ${:.2} ({:.2}%)\n",
                status.symbol, status.action, status.price, status.change, status.change_pct
            ));
            message.push_str(&format!(
                "SMA: ${:.2} | RSI: {:.2} | MACD: {:.2} {}\n",
                status.sma,
                status.rsi,
                status.macd,
                status.trend.icon()
            ));
            message.push_str(&format!("{}\n", status.price_bar));
            message.push_str(&format!(
                "Chart: https://www.tradingview.com/symbols/{}USD/\n\n",
                status.symbol
            ));
        }
        message.push_str(&format!("**Current Profit:** ${:.2}\n", realized_profit));

        format!("**Pulse Bot Update**\n\n{message}")
    }

    /// Publish the cycle summary, deduplicating against the previous one.
    pub async fn publish(&self, statuses: &[SymbolStatus], realized_profit: Decimal) {
        let Some(notifier) = &self.notifier else {
            debug!("no notifier configured, skipping status summary");
            return;
        };

        let summary = Self::build_summary(statuses, realized_profit);

        let previous_id = {
            let mut state = self.state.lock().unwrap();
            if state.last_summary.as_deref() == Some(summary.as_str()) {
                debug!("status summary unchanged, suppressing send");
                return;
            }
            state.last_summary = Some(summary.clone());
            state.last_message_id.clone()
        };

        if self.edit_in_place {
            if let Some(id) = previous_id {
                match notifier.edit(&id, &summary).await {
                    Ok(()) => return,
                    Err(e) => {
                        warn!(error = %e, "failed to edit status message, sending a new one")
                    }
                }
            }
        }

        match notifier.send(&summary).await {
            Ok(id) => {
                self.state.lock().unwrap().last_message_id = Some(id);
            }
            Err(e) => warn!(error = %e, "failed to send status summary"),
        }
    }
}
