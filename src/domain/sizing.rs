//! Fractional position sizing.
//!
//! Commits `fraction` of the available cash to a new position, rounded down
//! to whole shares.

/// Default share of available cash committed to each new position.
pub const DEFAULT_ALLOCATION_FRACTION: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSize {
    /// Cash earmarked for the position: `available_cash * fraction`.
    pub budget: f64,
    pub shares: u64,
    pub cost: f64,
}

impl PositionSize {
    pub fn is_empty(&self) -> bool {
        self.shares == 0
    }
}

/// Size a position: `shares = floor(available_cash * fraction / price)`.
///
/// A budget below one share yields zero shares and zero cost, which is a
/// normal outcome rather than an error. Non-positive cash or price also
/// yield an empty position.
pub fn size_position(available_cash: f64, price: f64, fraction: f64) -> PositionSize {
    let budget = available_cash * fraction;
    if !(budget > 0.0) || !(price > 0.0) || !price.is_finite() {
        return PositionSize {
            budget: budget.max(0.0),
            shares: 0,
            cost: 0.0,
        };
    }

    let mut shares = (budget / price).floor() as u64;
    // Division can round up across an integer boundary.
    if shares > 0 && shares as f64 * price > budget {
        shares -= 1;
    }

    PositionSize {
        budget,
        shares,
        cost: shares as f64 * price,
    }
}
