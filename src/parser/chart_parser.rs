// Yahoo chart API payload parsing
use crate::model::ParserError;
use crate::utils::exchange_date;
use chrono::NaiveDate;
use serde::Deserialize;

pub trait Parser {
    fn parse(&self, body: &str) -> Result<ChartData, ParserError>;
}

/// A bar as delivered, before nulls are dropped and dates ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

#[derive(Debug, Default)]
pub struct ChartData {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub bars: Vec<RawBar>,
}

#[derive(Deserialize)]
struct Envelope {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartFault>,
}

#[derive(Deserialize)]
struct ChartFault {
    code: String,
    description: Option<String>,
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ChartMeta {
    symbol: Option<String>,
    currency: Option<String>,
    gmtoffset: Option<i64>,
}

#[derive(Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Quote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

pub struct ChartParser;

impl ChartParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for ChartParser {
    fn parse(&self, body: &str) -> Result<ChartData, ParserError> {
        let envelope: Envelope = serde_json::from_str(body)?;

        if let Some(fault) = envelope.chart.error {
            tracing::info!(
                "Provider reported {}: {}",
                fault.code,
                fault.description.unwrap_or_default()
            );
            return Ok(ChartData::default());
        }

        let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(ChartData::default());
        };

        let gmt_offset = result.meta.gmtoffset.unwrap_or(0);
        let mut data = ChartData {
            symbol: result.meta.symbol,
            currency: result.meta.currency,
            bars: Vec::new(),
        };

        // No trading days in range: provider omits timestamps altogether.
        let Some(timestamps) = result.timestamp else {
            return Ok(data);
        };

        let quote = result
            .indicators
            .and_then(|i| i.quote.into_iter().next())
            .ok_or_else(|| ParserError::MissingField("indicators.quote".into()))?;

        let expected = timestamps.len();
        check_len("close", expected, quote.close.len(), false)?;
        check_len("open", expected, quote.open.len(), true)?;
        check_len("high", expected, quote.high.len(), true)?;
        check_len("low", expected, quote.low.len(), true)?;
        check_len("volume", expected, quote.volume.len(), true)?;

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = exchange_date(ts, gmt_offset)
                .ok_or(ParserError::BadTimestamp(ts))?;
            data.bars.push(RawBar {
                date,
                open: quote.open.get(i).copied().flatten(),
                high: quote.high.get(i).copied().flatten(),
                low: quote.low.get(i).copied().flatten(),
                close: quote.close[i],
                volume: quote.volume.get(i).copied().flatten(),
            });
        }

        Ok(data)
    }
}

fn check_len(
    field: &'static str,
    expected: usize,
    actual: usize,
    may_be_absent: bool,
) -> Result<(), ParserError> {
    if actual == expected || (may_be_absent && actual == 0) {
        Ok(())
    } else {
        Err(ParserError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}
