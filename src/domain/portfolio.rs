//! Cash and open-position state owned by a single simulation run.

use chrono::NaiveDate;

use super::position::OpenPosition;

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub cash: f64,
    pub starting_cash: f64,
    /// Open positions in the order they were entered.
    pub positions: Vec<OpenPosition>,
}

impl Portfolio {
    pub fn new(starting_cash: f64) -> Self {
        Portfolio {
            cash: starting_cash,
            starting_cash,
            positions: Vec::new(),
        }
    }

    /// Debit the position's cost and add it to the open set.
    pub fn open(&mut self, position: OpenPosition) {
        self.cash -= position.cost_basis();
        self.positions.push(position);
    }

    /// Close every position exiting on `date`, crediting proceeds.
    /// Returns the closed positions in entry order.
    pub fn close_due(&mut self, date: NaiveDate) -> Vec<OpenPosition> {
        let (closing, staying): (Vec<_>, Vec<_>) = std::mem::take(&mut self.positions)
            .into_iter()
            .partition(|pos| pos.exits_on(date));
        self.positions = staying;
        for pos in &closing {
            self.cash += pos.proceeds();
        }
        closing
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn position_value(&self) -> f64 {
        self.positions
            .iter()
            .fold(0.0, |acc, pos| acc + pos.cost_basis())
    }

    pub fn total_value(&self) -> f64 {
        self.cash + self.position_value()
    }
}
