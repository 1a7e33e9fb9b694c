//! Open positions held during a simulation run.

use chrono::NaiveDate;

use super::sizing::PositionSize;
use super::trade::Trade;

#[derive(Debug, Clone, PartialEq)]
pub struct OpenPosition {
    /// Index of the originating trade among the valid trades.
    pub trade_index: usize,
    pub ticker: String,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub entry_price: f64,
    pub exit_price: f64,
    pub shares: u64,
}

impl OpenPosition {
    pub fn from_trade(trade_index: usize, trade: &Trade, size: &PositionSize) -> Self {
        OpenPosition {
            trade_index,
            ticker: trade.ticker.clone(),
            entry_date: trade.entry_date,
            exit_date: trade.exit_date,
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            shares: size.shares,
        }
    }

    /// Entry cost basis. Positions are not marked to market.
    pub fn cost_basis(&self) -> f64 {
        self.shares as f64 * self.entry_price
    }

    /// Cash returned when the position closes at its exit price.
    pub fn proceeds(&self) -> f64 {
        self.shares as f64 * self.exit_price
    }

    pub fn pnl(&self) -> f64 {
        self.proceeds() - self.cost_basis()
    }

    pub fn exits_on(&self, date: NaiveDate) -> bool {
        self.exit_date == date
    }
}
