//! CSV report adapter implementing ReportPort.
//!
//! Writes `daily_balance.csv` and `trades.csv`. Money columns use two
//! decimals; an undefined return percentage is written as `NaN`.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::adapters::csv_adapter::csv_error;
use crate::domain::error::CashtrackError;
use crate::domain::simulation::{DailyBalance, EnrichedTrade, SimulationResult};
use crate::ports::report_port::ReportPort;

pub const DAILY_BALANCE_FILE: &str = "daily_balance.csv";
pub const TRADES_FILE: &str = "trades.csv";

const DAILY_COLUMNS: [&str; 5] = [
    "date",
    "cash_balance",
    "active_positions",
    "position_value",
    "total_portfolio",
];

const TRADE_RESULT_COLUMNS: [&str; 12] = [
    "ticker",
    "entry_date",
    "exit_date",
    "entry_price",
    "exit_price",
    "cash_available",
    "position_size",
    "actual_shares",
    "actual_cost",
    "actual_proceeds",
    "actual_pnl",
    "return_pct",
];

pub struct CsvReportAdapter;

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn percent(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn daily_row(row: &DailyBalance) -> [String; 5] {
    [
        row.date.to_string(),
        money(row.cash_balance),
        row.active_positions.to_string(),
        money(row.position_value),
        money(row.total_portfolio),
    ]
}

fn trade_row(row: &EnrichedTrade) -> [String; 12] {
    [
        row.ticker.clone(),
        row.entry_date.to_string(),
        row.exit_date.to_string(),
        row.entry_price.to_string(),
        row.exit_price.to_string(),
        money(row.cash_available),
        money(row.position_size),
        row.actual_shares.to_string(),
        money(row.actual_cost),
        money(row.actual_proceeds),
        money(row.actual_pnl),
        percent(row.return_pct),
    ]
}

pub fn write_daily_balances<W: Write>(out: W, rows: &[DailyBalance]) -> Result<(), CashtrackError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(DAILY_COLUMNS).map_err(csv_error)?;
    for row in rows {
        wtr.write_record(daily_row(row)).map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_trade_results<W: Write>(out: W, rows: &[EnrichedTrade]) -> Result<(), CashtrackError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(TRADE_RESULT_COLUMNS).map_err(csv_error)?;
    for row in rows {
        wtr.write_record(trade_row(row)).map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &SimulationResult,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, CashtrackError> {
        std::fs::create_dir_all(output_dir)?;

        let daily_path = output_dir.join(DAILY_BALANCE_FILE);
        write_daily_balances(std::fs::File::create(&daily_path)?, &result.daily)?;

        let trades_path = output_dir.join(TRADES_FILE);
        write_trade_results(std::fs::File::create(&trades_path)?, &result.trades)?;

        Ok(vec![daily_path, trades_path])
    }
}
