//! Append-only CSV decision log.

use pulse_core::error::LedgerError;
use pulse_core::types::TradeRecord;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

const HEADER: [&str; 7] = ["timestamp", "symbol", "action", "price", "sma", "rsi", "macd"];

/// Durable log of every decision, one CSV row per symbol per cycle.
///
/// The header is written exactly once, when the file is created; rows are
/// only ever appended. Callers serialize access (the ledger holds its lock
/// across the append) so rows never interleave.
pub struct TradeLog {
    path: PathBuf,
}

impl TradeLog {
    /// Create a log writing to the given path. The file is created lazily
    /// on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header first if the file is new.
    pub fn append(&self, record: &TradeRecord) -> Result<(), LedgerError> {
        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer
                .write_record(HEADER)
                .map_err(|e| LedgerError::Log(e.to_string()))?;
        }
        writer
            .serialize(record)
            .map_err(|e| LedgerError::Log(e.to_string()))?;
        writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::types::Action;
    use uuid::Uuid;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("pulse_trade_log_{}.csv", Uuid::new_v4()))
    }

    fn record(symbol: &str, action: Action) -> TradeRecord {
        TradeRecord::new(symbol, action, 100.0, 99.5, 55.0, 0.25)
    }

    #[test]
    fn test_header_written_once() {
        let path = scratch_path();
        let log = TradeLog::new(&path);

        log.append(&record("BTC", Action::Buy)).unwrap();
        log.append(&record("BTC", Action::Hold)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,symbol,action,price,sma,rsi,macd");
        assert!(lines[1].contains(",BTC,buy,100.0,"));
        assert!(lines[2].contains(",BTC,hold,100.0,"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_appends_survive_reopening() {
        let path = scratch_path();

        TradeLog::new(&path)
            .append(&record("ETH", Action::Sell))
            .unwrap();
        TradeLog::new(&path)
            .append(&record("ETH", Action::Buy))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3); // header + 2 rows
        assert_eq!(
            contents
                .lines()
                .filter(|l| l.starts_with("timestamp"))
                .count(),
            1
        );

        std::fs::remove_file(&path).ok();
    }
}
