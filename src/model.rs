// Core structs: PriceBar, PriceSeries, IndicatorSnapshot, Decision
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// One trading day. Only `close` is required, the provider leaves the
/// rest null on some sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<u64>,
}

impl PriceBar {
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }
}

/// Daily bars for one ticker. Never empty, dates strictly increasing.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::UnorderedDates {
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self {
            ticker: ticker.into(),
            bars,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last(&self) -> &PriceBar {
        // non-empty by construction
        &self.bars[self.bars.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }
}

/// Latest close and indicator values of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub rsi: f64,
    pub sma50: f64,
    pub sma200: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Invest,
    DontInvest,
    Hold,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Invest => "INVEST",
            Decision::DontInvest => "DON'T INVEST",
            Decision::Hold => "HOLD",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Decision::Invest => "✅",
            Decision::DontInvest => "❌",
            Decision::Hold => "🤔",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub decision: Decision,
    pub rationale: String,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.decision.label(),
            self.decision.glyph(),
            self.rationale
        )
    }
}

/// Result of a successful run of the indicator pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub ticker: String,
    pub as_of: NaiveDate,
    pub snapshot: IndicatorSnapshot,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone)]
pub struct HistoryRequest {
    pub ticker: String,
    pub range: String,
    pub interval: String,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("unexpected response status {0}")]
    InvalidResponse(u16),
    #[error(transparent)]
    Parse(#[from] ParserError),
    #[error(transparent)]
    Series(#[from] SeriesError),
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("malformed chart payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("field {field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("timestamp out of range: {0}")]
    BadTimestamp(i64),
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("price series is empty")]
    Empty,
    #[error("dates not strictly increasing: {previous} then {next}")]
    UnorderedDates { previous: NaiveDate, next: NaiveDate },
}

/// Why no snapshot could be taken from the last bar.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractionFailure {
    #[error("{indicator} needs {required} bars, series has {available}")]
    InsufficientHistory {
        indicator: &'static str,
        required: usize,
        available: usize,
    },
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
}
