//! CSV trade file adapter.
//!
//! Expects a header row naming `entry_date`, `exit_date`, `entry_price` and
//! `exit_price`, plus an optional `ticker`, in any column order.

use crate::domain::error::CashtrackError;
use crate::domain::trade::TradeRecord;
use crate::ports::trade_source::TradeSource;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const TRADE_COLUMNS: [&str; 5] = ["ticker", "entry_date", "exit_date", "entry_price", "exit_price"];

const UNKNOWN_TICKER: &str = "UNKNOWN";

pub struct CsvTradeSource {
    path: PathBuf,
}

impl CsvTradeSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TradeSource for CsvTradeSource {
    fn load_trades(&self) -> Result<Vec<TradeRecord>, CashtrackError> {
        let file = std::fs::File::open(&self.path).map_err(|e| CashtrackError::TradeSource {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        read_trades(file)
    }
}

struct ColumnIndex {
    ticker: Option<usize>,
    entry_date: usize,
    exit_date: usize,
    entry_price: usize,
    exit_price: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, CashtrackError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| CashtrackError::TradeSource {
                reason: format!("missing {} column", name),
            })
        };
        Ok(ColumnIndex {
            ticker: find("ticker"),
            entry_date: require("entry_date")?,
            exit_date: require("exit_date")?,
            entry_price: require("entry_price")?,
            exit_price: require("exit_price")?,
        })
    }
}

/// Unparseable prices become NaN so validation reports the row instead of
/// failing the whole load.
fn parse_price(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(f64::NAN)
}

pub fn read_trades<R: Read>(reader: R) -> Result<Vec<TradeRecord>, CashtrackError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().map_err(|e| CashtrackError::TradeSource {
        reason: format!("CSV header error: {}", e),
    })?;
    let columns = ColumnIndex::from_headers(headers)?;

    let mut trades = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| CashtrackError::TradeSource {
            reason: format!("CSV parse error: {}", e),
        })?;

        let ticker = columns
            .ticker
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_TICKER);

        trades.push(TradeRecord {
            ticker: ticker.to_string(),
            entry_date: record.get(columns.entry_date).unwrap_or_default().to_string(),
            exit_date: record.get(columns.exit_date).unwrap_or_default().to_string(),
            entry_price: parse_price(record.get(columns.entry_price)),
            exit_price: parse_price(record.get(columns.exit_price)),
        });
    }

    Ok(trades)
}

/// Write trade records with the standard header.
pub fn write_trades(path: &Path, trades: &[TradeRecord]) -> Result<(), CashtrackError> {
    let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;
    wtr.write_record(TRADE_COLUMNS).map_err(csv_error)?;
    for trade in trades {
        wtr.write_record([
            trade.ticker.clone(),
            trade.entry_date.clone(),
            trade.exit_date.clone(),
            trade.entry_price.to_string(),
            trade.exit_price.to_string(),
        ])
        .map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn csv_error(err: csv::Error) -> CashtrackError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => CashtrackError::Io(io),
        other => CashtrackError::TradeSource {
            reason: format!("CSV error: {:?}", other),
        },
    }
}
