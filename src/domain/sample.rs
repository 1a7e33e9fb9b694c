//! Built-in sample trades for trying the tool without a data file.

use super::trade::TradeRecord;

const SAMPLE_TRADES: [(&str, &str, &str, f64, f64); 5] = [
    ("AAPL", "2017-01-11", "2017-03-14", 98.96, 109.07),
    ("GNRC", "2017-01-17", "2017-03-27", 37.75, 37.49),
    ("AMD", "2017-01-18", "2017-02-06", 9.88, 13.63),
    ("ALGN", "2017-01-20", "2017-03-17", 91.7, 111.85),
    ("NVDA", "2017-01-25", "2017-04-15", 45.20, 52.30),
];

pub fn sample_trades() -> Vec<TradeRecord> {
    SAMPLE_TRADES
        .iter()
        .map(|&(ticker, entry, exit, entry_price, exit_price)| TradeRecord {
            ticker: ticker.to_string(),
            entry_date: entry.to_string(),
            exit_date: exit.to_string(),
            entry_price,
            exit_price,
        })
        .collect()
}
