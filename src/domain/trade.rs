//! Trade input types and pre-simulation validation.
//!
//! A loader hands the core [`TradeRecord`]s with raw date strings. Validation
//! turns them into typed [`Trade`]s and collects a [`TradeWarning`] for every
//! record that cannot be simulated. Rejected records are never reordered or
//! repaired.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A validated trade: positive prices, `exit_date >= entry_date`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub ticker: String,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
}

impl Trade {
    pub fn new(
        ticker: impl Into<String>,
        entry_date: NaiveDate,
        exit_date: NaiveDate,
        entry_price: f64,
        exit_price: f64,
    ) -> Self {
        Trade {
            ticker: ticker.into(),
            entry_date,
            exit_date,
            entry_price,
            exit_price,
        }
    }

    /// Entered and exited on the same calendar day.
    pub fn is_zero_duration(&self) -> bool {
        self.entry_date == self.exit_date
    }

    pub fn holding_days(&self) -> i64 {
        (self.exit_date - self.entry_date).num_days()
    }
}

/// A raw trade row as produced by a loader, before date parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub ticker: String,
    pub entry_date: String,
    pub exit_date: String,
    pub entry_price: f64,
    pub exit_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnparseableEntryDate,
    UnparseableExitDate,
    NonPositiveEntryPrice,
    NonPositiveExitPrice,
    ExitBeforeEntry,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::UnparseableEntryDate => "unparseable entry date",
            RejectReason::UnparseableExitDate => "unparseable exit date",
            RejectReason::NonPositiveEntryPrice => "entry price must be positive",
            RejectReason::NonPositiveExitPrice => "exit price must be positive",
            RejectReason::ExitBeforeEntry => "exit date is before entry date",
        };
        f.write_str(text)
    }
}

/// A trade excluded from simulation, with the fields needed to identify it.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeWarning {
    /// Position of the record in the loader's input.
    pub index: usize,
    pub ticker: String,
    pub entry_date: String,
    pub exit_date: String,
    pub entry_price: f64,
    pub exit_price: f64,
    pub reason: RejectReason,
}

impl TradeWarning {
    fn new(index: usize, record: &TradeRecord, reason: RejectReason) -> Self {
        TradeWarning {
            index,
            ticker: record.ticker.clone(),
            entry_date: record.entry_date.clone(),
            exit_date: record.exit_date.clone(),
            entry_price: record.entry_price,
            exit_price: record.exit_price,
            reason,
        }
    }

    fn from_trade(index: usize, trade: &Trade, reason: RejectReason) -> Self {
        TradeWarning {
            index,
            ticker: trade.ticker.clone(),
            entry_date: trade.entry_date.format(DATE_FORMAT).to_string(),
            exit_date: trade.exit_date.format(DATE_FORMAT).to_string(),
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            reason,
        }
    }
}

impl fmt::Display for TradeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trade #{} {} (entry {} @ {}, exit {} @ {}): {}",
            self.index,
            self.ticker,
            self.entry_date,
            self.entry_price,
            self.exit_date,
            self.exit_price,
            self.reason
        )
    }
}

/// Outcome of validation: simulable trades in input order, plus rejections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeBatch {
    pub trades: Vec<Trade>,
    pub warnings: Vec<TradeWarning>,
}

/// Parse a trade date. Accepts `YYYY-MM-DD` or a timestamp whose time of day
/// is discarded.
pub fn parse_trade_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

fn check_trade(trade: &Trade) -> Result<(), RejectReason> {
    if !is_valid_price(trade.entry_price) {
        return Err(RejectReason::NonPositiveEntryPrice);
    }
    if !is_valid_price(trade.exit_price) {
        return Err(RejectReason::NonPositiveExitPrice);
    }
    if trade.exit_date < trade.entry_date {
        return Err(RejectReason::ExitBeforeEntry);
    }
    Ok(())
}

fn check_record(record: &TradeRecord) -> Result<Trade, RejectReason> {
    let entry_date =
        parse_trade_date(&record.entry_date).ok_or(RejectReason::UnparseableEntryDate)?;
    let exit_date =
        parse_trade_date(&record.exit_date).ok_or(RejectReason::UnparseableExitDate)?;
    let trade = Trade::new(
        record.ticker.clone(),
        entry_date,
        exit_date,
        record.entry_price,
        record.exit_price,
    );
    check_trade(&trade)?;
    Ok(trade)
}

/// Split raw records into valid trades and warnings, preserving input order.
pub fn validate_records(records: &[TradeRecord]) -> TradeBatch {
    let mut batch = TradeBatch::default();
    for (index, record) in records.iter().enumerate() {
        match check_record(record) {
            Ok(trade) => batch.trades.push(trade),
            Err(reason) => batch.warnings.push(TradeWarning::new(index, record, reason)),
        }
    }
    batch
}

/// Validate already-typed trades (prices and date order).
pub fn validate_trades(trades: &[Trade]) -> TradeBatch {
    let mut batch = TradeBatch::default();
    for (index, trade) in trades.iter().enumerate() {
        match check_trade(trade) {
            Ok(()) => batch.trades.push(trade.clone()),
            Err(reason) => batch
                .warnings
                .push(TradeWarning::from_trade(index, trade, reason)),
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(entry: &str, exit: &str, entry_price: f64, exit_price: f64) -> TradeRecord {
        TradeRecord {
            ticker: "AAPL".into(),
            entry_date: entry.into(),
            exit_date: exit.into(),
            entry_price,
            exit_price,
        }
    }

    #[test]
    fn parse_plain_date() {
        assert_eq!(parse_trade_date("2017-01-11"), Some(date(2017, 1, 11)));
        assert_eq!(parse_trade_date("  2017-01-11 "), Some(date(2017, 1, 11)));
    }

    #[test]
    fn parse_timestamp_drops_time() {
        assert_eq!(
            parse_trade_date("2017-01-11 15:59:00"),
            Some(date(2017, 1, 11))
        );
        assert_eq!(
            parse_trade_date("2017-01-11T09:30:00"),
            Some(date(2017, 1, 11))
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_trade_date(""), None);
        assert_eq!(parse_trade_date("yesterday"), None);
        assert_eq!(parse_trade_date("2017-13-01"), None);
    }

    #[test]
    fn valid_record_becomes_trade() {
        let batch = validate_records(&[record("2017-01-11", "2017-03-14", 98.96, 109.07)]);
        assert!(batch.warnings.is_empty());
        assert_eq!(batch.trades.len(), 1);
        let trade = &batch.trades[0];
        assert_eq!(trade.ticker, "AAPL");
        assert_eq!(trade.entry_date, date(2017, 1, 11));
        assert_eq!(trade.exit_date, date(2017, 3, 14));
        assert_eq!(trade.holding_days(), 62);
    }

    #[test]
    fn zero_duration_is_valid() {
        let batch = validate_records(&[record("2017-01-11", "2017-01-11", 10.0, 11.0)]);
        assert_eq!(batch.trades.len(), 1);
        assert!(batch.trades[0].is_zero_duration());
    }

    #[test]
    fn exit_before_entry_rejected() {
        let batch = validate_records(&[record("2017-03-14", "2017-01-11", 10.0, 11.0)]);
        assert!(batch.trades.is_empty());
        assert_eq!(batch.warnings.len(), 1);
        assert_eq!(batch.warnings[0].reason, RejectReason::ExitBeforeEntry);
        assert_eq!(batch.warnings[0].entry_date, "2017-03-14");
    }

    #[test]
    fn non_positive_prices_rejected() {
        let batch = validate_records(&[
            record("2017-01-11", "2017-01-12", 0.0, 11.0),
            record("2017-01-11", "2017-01-12", 10.0, -1.0),
            record("2017-01-11", "2017-01-12", f64::NAN, 11.0),
        ]);
        assert!(batch.trades.is_empty());
        let reasons: Vec<_> = batch.warnings.iter().map(|w| w.reason).collect();
        assert_eq!(
            reasons,
            vec![
                RejectReason::NonPositiveEntryPrice,
                RejectReason::NonPositiveExitPrice,
                RejectReason::NonPositiveEntryPrice,
            ]
        );
    }

    #[test]
    fn unparseable_dates_rejected() {
        let batch = validate_records(&[
            record("not a date", "2017-01-12", 10.0, 11.0),
            record("2017-01-11", "", 10.0, 11.0),
        ]);
        assert_eq!(batch.warnings[0].reason, RejectReason::UnparseableEntryDate);
        assert_eq!(batch.warnings[1].reason, RejectReason::UnparseableExitDate);
    }

    #[test]
    fn warnings_keep_input_index_and_order() {
        let batch = validate_records(&[
            record("2017-01-11", "2017-01-12", 10.0, 11.0),
            record("2017-01-12", "2017-01-11", 10.0, 11.0),
            record("2017-01-13", "2017-01-14", 12.0, 11.0),
        ]);
        assert_eq!(batch.trades.len(), 2);
        assert_eq!(batch.trades[1].entry_date, date(2017, 1, 13));
        assert_eq!(batch.warnings[0].index, 1);
    }

    #[test]
    fn warning_display_names_trade() {
        let batch = validate_records(&[record("2017-03-14", "2017-01-11", 10.0, 11.0)]);
        let text = batch.warnings[0].to_string();
        assert_eq!(
            text,
            "trade #0 AAPL (entry 2017-03-14 @ 10, exit 2017-01-11 @ 11): exit date is before entry date"
        );
    }

    #[test]
    fn validate_typed_trades() {
        let trades = vec![
            Trade::new("A", date(2017, 1, 1), date(2017, 1, 5), 10.0, 11.0),
            Trade::new("B", date(2017, 1, 5), date(2017, 1, 1), 10.0, 11.0),
        ];
        let batch = validate_trades(&trades);
        assert_eq!(batch.trades, vec![trades[0].clone()]);
        assert_eq!(batch.warnings[0].ticker, "B");
    }

    #[test]
    fn typed_trade_warnings_carry_original_fields() {
        let trades = vec![
            Trade::new("A", date(2017, 1, 1), date(2017, 1, 5), -1.0, 11.0),
            Trade::new("B", date(2017, 1, 2), date(2017, 1, 6), 10.0, f64::NAN),
            Trade::new("C", date(2017, 1, 3), date(2017, 1, 3), 10.0, 12.0),
        ];
        let batch = validate_trades(&trades);
        assert_eq!(batch.trades, vec![trades[2].clone()]);

        let first = &batch.warnings[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.reason, RejectReason::NonPositiveEntryPrice);
        assert_eq!(first.entry_date, "2017-01-01");
        assert_eq!(first.exit_date, "2017-01-05");
        assert_eq!(first.entry_price, -1.0);

        assert_eq!(batch.warnings[1].index, 1);
        assert_eq!(batch.warnings[1].reason, RejectReason::NonPositiveExitPrice);
    }
}
