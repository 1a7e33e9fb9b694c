#![allow(dead_code)]

use cashtrack::domain::error::CashtrackError;
use cashtrack::domain::simulation::SimulationResult;
pub use cashtrack::domain::trade::{Trade, TradeRecord};
use cashtrack::ports::report_port::ReportPort;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn make_trade(ticker: &str, entry: &str, exit: &str, entry_price: f64, exit_price: f64) -> Trade {
    Trade::new(ticker, parse_date(entry), parse_date(exit), entry_price, exit_price)
}

pub fn make_record(
    ticker: &str,
    entry: &str,
    exit: &str,
    entry_price: f64,
    exit_price: f64,
) -> TradeRecord {
    TradeRecord {
        ticker: ticker.to_string(),
        entry_date: entry.to_string(),
        exit_date: exit.to_string(),
        entry_price,
        exit_price,
    }
}

/// Nine overlapping valid trades in January/February 2017.
pub fn nine_valid_trades() -> Vec<Trade> {
    vec![
        make_trade("AAPL", "2017-01-02", "2017-01-20", 98.96, 109.07),
        make_trade("GNRC", "2017-01-03", "2017-02-10", 37.75, 37.49),
        make_trade("AMD", "2017-01-05", "2017-01-20", 9.88, 13.63),
        make_trade("ALGN", "2017-01-05", "2017-02-01", 91.70, 111.85),
        make_trade("NVDA", "2017-01-09", "2017-01-09", 45.20, 52.30),
        make_trade("MSFT", "2017-01-20", "2017-02-15", 62.74, 64.65),
        make_trade("TSLA", "2017-01-24", "2017-02-06", 254.61, 257.48),
        make_trade("NFLX", "2017-02-01", "2017-02-28", 140.82, 142.13),
        make_trade("AMZN", "2017-02-06", "2017-02-28", 807.64, 845.04),
    ]
}

/// Report port that records what it was asked to write.
pub struct RecordingReport {
    pub written: RefCell<Vec<(usize, usize, PathBuf)>>,
}

impl RecordingReport {
    pub fn new() -> Self {
        Self {
            written: RefCell::new(Vec::new()),
        }
    }
}

impl ReportPort for RecordingReport {
    fn write(
        &self,
        result: &SimulationResult,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, CashtrackError> {
        self.written.borrow_mut().push((
            result.daily.len(),
            result.trades.len(),
            output_dir.to_path_buf(),
        ));
        Ok(vec![output_dir.join("report")])
    }
}
