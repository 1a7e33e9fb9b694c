//! Run-level summary statistics.

use super::simulation::SimulationResult;

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub starting_cash: f64,
    pub final_portfolio_value: f64,
    /// Percent change from starting cash to the final portfolio value.
    pub total_return_pct: f64,
    pub total_pnl: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate_pct: f64,
    pub avg_pnl: f64,
    pub rejected_trades: usize,
    pub days: usize,
    pub max_cash_balance: f64,
    pub min_cash_balance: f64,
    pub max_active_positions: usize,
}

impl RunSummary {
    pub fn compute(result: &SimulationResult, starting_cash: f64) -> Self {
        let final_portfolio_value = result.final_portfolio_value().unwrap_or(starting_cash);
        let total_return_pct = if starting_cash > 0.0 {
            (final_portfolio_value - starting_cash) / starting_cash * 100.0
        } else {
            0.0
        };

        let total_trades = result.trades.len();
        let winning_trades = result.trades.iter().filter(|t| t.is_winner()).count();
        let losing_trades = result.trades.iter().filter(|t| t.actual_pnl < 0.0).count();
        let total_pnl = result.trades.iter().fold(0.0, |acc, t| acc + t.actual_pnl);

        let (win_rate_pct, avg_pnl) = if total_trades > 0 {
            (
                winning_trades as f64 / total_trades as f64 * 100.0,
                total_pnl / total_trades as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let (max_cash_balance, min_cash_balance) = if result.daily.is_empty() {
            (starting_cash, starting_cash)
        } else {
            result.daily.iter().fold(
                (f64::NEG_INFINITY, f64::INFINITY),
                |(max, min), d| (max.max(d.cash_balance), min.min(d.cash_balance)),
            )
        };

        let max_active_positions = result
            .daily
            .iter()
            .map(|d| d.active_positions)
            .max()
            .unwrap_or(0);

        RunSummary {
            starting_cash,
            final_portfolio_value,
            total_return_pct,
            total_pnl,
            total_trades,
            winning_trades,
            losing_trades,
            win_rate_pct,
            avg_pnl,
            rejected_trades: result.warnings.len(),
            days: result.daily.len(),
            max_cash_balance,
            min_cash_balance,
            max_active_positions,
        }
    }
}
