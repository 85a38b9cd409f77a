// Utility functions
use chrono::{DateTime, NaiveDate};

/// Trims and uppercases user input. Returns `None` for blank input.
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() { None } else { Some(ticker) }
}

/// Converts a provider unix timestamp to the exchange-local calendar date.
/// `None` when the shifted timestamp is out of range.
pub fn exchange_date(timestamp: i64, gmt_offset: i64) -> Option<NaiveDate> {
    timestamp
        .checked_add(gmt_offset)
        .and_then(|t| DateTime::from_timestamp(t, 0))
        .map(|dt| dt.date_naive())
}
