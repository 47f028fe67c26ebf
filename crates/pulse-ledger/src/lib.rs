//! Simulated position and profit tracking.
//!
//! The ledger models intended actions, not confirmed fills: every decision
//! is recorded in the durable trade log, and buys/sells move the simulated
//! entry-price map and running realized profit. Workers on different
//! symbols share one ledger, so all mutation and every profit read happens
//! under a single lock.

use pulse_core::error::LedgerError;
use pulse_core::types::{Action, TradeRecord};
use pulse_data::TradeLog;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};

struct LedgerState {
    entry_prices: HashMap<String, Decimal>,
    realized_profit: Decimal,
}

/// Position/profit ledger with an append-only decision log.
pub struct Ledger {
    log: TradeLog,
    state: Mutex<LedgerState>,
}

impl Ledger {
    /// Create a ledger writing decisions to the given trade log.
    pub fn new(log: TradeLog) -> Self {
        Self {
            log,
            state: Mutex::new(LedgerState {
                entry_prices: HashMap::new(),
                realized_profit: Decimal::ZERO,
            }),
        }
    }

    /// Record one decision.
    ///
    /// A buy overwrites any existing entry price (latest entry wins); a
    /// sell realizes `price - entry` against the running total and clears
    /// the entry, or does nothing when no position is open (shorts are not
    /// modeled); a hold only logs. The log append happens inside the
    /// critical section so concurrent workers cannot interleave rows.
    pub fn record(&self, record: &TradeRecord) -> Result<(), LedgerError> {
        let price =
            Decimal::try_from(record.price).map_err(|_| LedgerError::InvalidPrice(record.price))?;

        let mut state = self.state.lock().unwrap();

        match record.action {
            Action::Buy => {
                if let Some(previous) = state.entry_prices.insert(record.symbol.clone(), price) {
                    info!(symbol = %record.symbol, %previous, %price, "entry price replaced");
                }
            }
            Action::Sell => match state.entry_prices.remove(&record.symbol) {
                Some(entry) => {
                    state.realized_profit += price - entry;
                    info!(
                        symbol = %record.symbol,
                        %entry,
                        %price,
                        profit = %state.realized_profit,
                        "position closed"
                    );
                }
                None => {
                    warn!(symbol = %record.symbol, "sell without open position, ignoring");
                }
            },
            Action::Hold => {}
        }

        self.log.append(record)
    }

    /// Running realized profit across all closed positions.
    pub fn realized_profit(&self) -> Decimal {
        self.state.lock().unwrap().realized_profit
    }

    /// Entry price of the open simulated position, if any.
    pub fn entry_price(&self, symbol: &str) -> Option<Decimal> {
        self.state.lock().unwrap().entry_prices.get(symbol).copied()
    }

    /// Number of open simulated positions.
    pub fn open_positions(&self) -> usize {
        self.state.lock().unwrap().entry_prices.len()
    }
}
