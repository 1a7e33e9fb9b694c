//! Daily cash balance simulation.
//!
//! Walks every calendar day from the earliest entry to the latest exit. Each
//! day runs three steps in a fixed order:
//!
//! 1. close positions exiting today, crediting `shares * exit_price`
//! 2. open trades entering today in input order, each sized against the cash
//!    left after step 1 and after earlier entries on the same day
//! 3. record a [`DailyBalance`] snapshot
//!
//! Zero-duration trades (entry and exit on the same day) enter in step 2 and
//! settle right after the day's last entry, so their proceeds are not visible
//! to other entries on that day.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::error::CashtrackError;
use super::portfolio::Portfolio;
use super::position::OpenPosition;
use super::sizing::{size_position, PositionSize, DEFAULT_ALLOCATION_FRACTION};
use super::trade::{validate_records, validate_trades, Trade, TradeBatch, TradeRecord, TradeWarning};

pub const DEFAULT_STARTING_CASH: f64 = 1_000_000.0;

/// Number of leading daily snapshots echoed at debug level.
const DEBUG_SNAPSHOT_DAYS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub starting_cash: f64,
    pub allocation_fraction: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            starting_cash: DEFAULT_STARTING_CASH,
            allocation_fraction: DEFAULT_ALLOCATION_FRACTION,
        }
    }
}

impl SimulationConfig {
    pub fn new(starting_cash: f64, allocation_fraction: f64) -> Self {
        SimulationConfig {
            starting_cash,
            allocation_fraction,
        }
    }

    pub fn validate(&self) -> Result<(), CashtrackError> {
        if !self.starting_cash.is_finite() || self.starting_cash <= 0.0 {
            return Err(CashtrackError::InvalidStartingCash {
                value: self.starting_cash,
            });
        }
        let f = self.allocation_fraction;
        if !f.is_finite() || f <= 0.0 || f > 1.0 {
            return Err(CashtrackError::InvalidFraction { value: f });
        }
        Ok(())
    }
}

/// End-of-day state for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub cash_balance: f64,
    pub active_positions: usize,
    /// Cost basis of open positions.
    pub position_value: f64,
    pub total_portfolio: f64,
}

impl DailyBalance {
    fn snapshot(date: NaiveDate, portfolio: &Portfolio) -> Self {
        let position_value = portfolio.position_value();
        DailyBalance {
            date,
            cash_balance: portfolio.cash,
            active_positions: portfolio.position_count(),
            position_value,
            total_portfolio: portfolio.cash + position_value,
        }
    }
}

/// Per-trade result using the share count affordable on the entry day.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTrade {
    pub ticker: String,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    pub cash_available: f64,
    pub position_size: f64,
    pub actual_shares: u64,
    pub actual_cost: f64,
    pub actual_proceeds: f64,
    pub actual_pnl: f64,
    /// NaN when no shares were affordable.
    pub return_pct: f64,
}

impl EnrichedTrade {
    fn new(trade: &Trade, cash_available: f64, size: &PositionSize) -> Self {
        let actual_proceeds = size.shares as f64 * trade.exit_price;
        let actual_pnl = actual_proceeds - size.cost;
        let return_pct = if size.cost > 0.0 {
            actual_pnl / size.cost * 100.0
        } else {
            f64::NAN
        };
        EnrichedTrade {
            ticker: trade.ticker.clone(),
            entry_date: trade.entry_date,
            exit_date: trade.exit_date,
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            cash_available,
            position_size: size.budget,
            actual_shares: size.shares,
            actual_cost: size.cost,
            actual_proceeds,
            actual_pnl,
            return_pct,
        }
    }

    pub fn is_winner(&self) -> bool {
        self.actual_pnl > 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationResult {
    /// One row per calendar day, ascending.
    pub daily: Vec<DailyBalance>,
    /// One row per valid trade, in input order.
    pub trades: Vec<EnrichedTrade>,
    pub warnings: Vec<TradeWarning>,
}

impl SimulationResult {
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    pub fn final_portfolio_value(&self) -> Option<f64> {
        self.daily.last().map(|d| d.total_portfolio)
    }
}

/// Simulate typed trades. Invalid trades are excluded and reported as warnings.
pub fn simulate(
    trades: &[Trade],
    config: &SimulationConfig,
) -> Result<SimulationResult, CashtrackError> {
    config.validate()?;
    Ok(run_batch(validate_trades(trades), config))
}

/// Simulate raw loader records, parsing and validating them first.
pub fn simulate_records(
    records: &[TradeRecord],
    config: &SimulationConfig,
) -> Result<SimulationResult, CashtrackError> {
    config.validate()?;
    Ok(run_batch(validate_records(records), config))
}

fn run_batch(batch: TradeBatch, config: &SimulationConfig) -> SimulationResult {
    let TradeBatch { trades, warnings } = batch;
    for warning in &warnings {
        warn!(%warning, "skipping invalid trade");
    }

    let (daily, enriched) = run_calendar(&trades, config);
    SimulationResult {
        daily,
        trades: enriched,
        warnings,
    }
}

fn run_calendar(
    trades: &[Trade],
    config: &SimulationConfig,
) -> (Vec<DailyBalance>, Vec<EnrichedTrade>) {
    let (Some(start), Some(end)) = (
        trades.iter().map(|t| t.entry_date).min(),
        trades.iter().map(|t| t.exit_date).max(),
    ) else {
        info!("no valid trades to simulate");
        return (Vec::new(), Vec::new());
    };

    let mut entries_by_date: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    for (index, trade) in trades.iter().enumerate() {
        entries_by_date.entry(trade.entry_date).or_default().push(index);
    }

    info!(
        trades = trades.len(),
        days = (end - start).num_days() + 1,
        %start,
        %end,
        "running daily cash simulation"
    );

    let mut portfolio = Portfolio::new(config.starting_cash);
    let mut enriched: Vec<Option<EnrichedTrade>> = vec![None; trades.len()];
    let mut daily = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= end) {
        portfolio.close_due(date);

        if let Some(indices) = entries_by_date.get(&date) {
            for &index in indices {
                let trade = &trades[index];
                let cash_available = portfolio.cash;
                let size = size_position(
                    cash_available,
                    trade.entry_price,
                    config.allocation_fraction,
                );
                enriched[index] = Some(EnrichedTrade::new(trade, cash_available, &size));
                portfolio.open(OpenPosition::from_trade(index, trade, &size));
            }
            // Same-day round trips settle after every entry of the day.
            portfolio.close_due(date);
        }

        let snapshot = DailyBalance::snapshot(date, &portfolio);
        if daily.len() < DEBUG_SNAPSHOT_DAYS {
            debug!(
                %date,
                cash = snapshot.cash_balance,
                active = snapshot.active_positions,
                "daily balance"
            );
        }
        daily.push(snapshot);
    }

    (daily, enriched.into_iter().flatten().collect())
}
