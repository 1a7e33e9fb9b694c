//! Trade loading port trait.

use crate::domain::error::CashtrackError;
use crate::domain::trade::TradeRecord;

/// Supplies raw trade rows to the simulator. Implementations own file
/// handling; dates stay as raw strings so the core can report bad ones.
pub trait TradeSource {
    fn load_trades(&self) -> Result<Vec<TradeRecord>, CashtrackError>;
}

impl TradeSource for Vec<TradeRecord> {
    fn load_trades(&self) -> Result<Vec<TradeRecord>, CashtrackError> {
        Ok(self.clone())
    }
}
