// Console output for one analysis
use crate::model::{Analysis, ExtractionFailure};

pub const EMPTY_TICKER: &str = "No ticker entered. Please try again.";

/// Labeled result block. Values are rounded here and nowhere else.
pub fn format_analysis(a: &Analysis) -> String {
    format!(
        "\n📈 Stock Analysis Result:\n\n\
         Ticker: {}\n\
         Close Price: {:.2}\n\
         RSI: {:.2}\n\
         SMA 50: {:.2}\n\
         SMA 200: {:.2}\n\
         Decision: {}\n",
        a.ticker,
        a.snapshot.close,
        a.snapshot.rsi,
        a.snapshot.sma50,
        a.snapshot.sma200,
        a.recommendation
    )
}

pub fn no_data(ticker: &str) -> String {
    format!("No data found for ticker '{}'", ticker)
}

pub fn extraction_failure(ticker: &str, failure: &ExtractionFailure) -> String {
    match failure {
        ExtractionFailure::InsufficientHistory { .. } => {
            format!("Not enough data to calculate indicators for '{}'", ticker)
        }
        ExtractionFailure::NonFinite { .. } => format!(
            "Not enough indicator data for '{}'. Try a different stock or longer period.",
            ticker
        ),
    }
}

pub fn fetch_failure(ticker: &str, reason: &dyn std::fmt::Display) -> String {
    format!("Failed to fetch data for '{}': {}", ticker, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Decision, IndicatorSnapshot, Recommendation};
    use chrono::NaiveDate;

    #[test]
    fn block_has_six_fields_in_order() {
        let analysis = Analysis {
            ticker: "AAPL".into(),
            as_of: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            snapshot: IndicatorSnapshot {
                close: 194.034_999,
                rsi: 61.0,
                sma50: 181.2361,
                sma200: 178.5,
            },
            recommendation: Recommendation {
                decision: Decision::Hold,
                rationale: "No clear signal".into(),
            },
        };
        let text = format_analysis(&analysis);
        let fields: Vec<&str> = text.lines().filter(|l| l.contains(": ")).collect();
        assert_eq!(
            fields,
            vec![
                "Ticker: AAPL",
                "Close Price: 194.03",
                "RSI: 61.00",
                "SMA 50: 181.24",
                "SMA 200: 178.50",
                "Decision: HOLD 🤔 (No clear signal)",
            ]
        );
        assert!(text.contains("📈 Stock Analysis Result:"));
    }

    #[test]
    fn failure_kinds_get_their_own_message() {
        let short = ExtractionFailure::InsufficientHistory {
            indicator: "SMA200",
            required: 200,
            available: 120,
        };
        let odd = ExtractionFailure::NonFinite { field: "SMA50" };
        assert_eq!(
            extraction_failure("IPO", &short),
            "Not enough data to calculate indicators for 'IPO'"
        );
        assert!(extraction_failure("IPO", &odd).starts_with("Not enough indicator data for 'IPO'."));
        assert_eq!(no_data("ZZZZ"), "No data found for ticker 'ZZZZ'");
    }
}
