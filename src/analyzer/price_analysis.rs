use crate::analyzer::decision::decide;
use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::model::{Analysis, ExtractionFailure, IndicatorSnapshot, PriceSeries};
use tracing::{debug, info};

pub const RSI_PERIOD: usize = 14;
pub const SMA_SHORT: usize = 50;
pub const SMA_LONG: usize = 200;

/// Full indicator series, aligned with the closes.
#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub closes: Vec<f64>,
    pub rsi: Vec<Option<f64>>,
    pub sma50: Vec<Option<f64>>,
    pub sma200: Vec<Option<f64>>,
}

/// Trait defining the interface for a price series analyzer.
pub trait Analyzer {
    fn compute_indicators(&self, series: &PriceSeries) -> IndicatorSeries;
    fn snapshot(&self, indicators: &IndicatorSeries) -> Result<IndicatorSnapshot, ExtractionFailure>;
    fn analyze(&self, series: &PriceSeries) -> Result<Analysis, ExtractionFailure>;
}

pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    fn compute_indicators(&self, series: &PriceSeries) -> IndicatorSeries {
        let closes = series.closes();
        IndicatorSeries {
            rsi: MarketAnalyzer::rsi_series(&closes, RSI_PERIOD),
            sma50: MarketAnalyzer::moving_average_series(&closes, SMA_SHORT),
            sma200: MarketAnalyzer::moving_average_series(&closes, SMA_LONG),
            closes,
        }
    }

    /// Takes the last value of each series. Undefined values and values
    /// that are not finite both refuse a snapshot.
    fn snapshot(&self, ind: &IndicatorSeries) -> Result<IndicatorSnapshot, ExtractionFailure> {
        let available = ind.closes.len();
        let close = ind
            .closes
            .last()
            .copied()
            .ok_or(ExtractionFailure::InsufficientHistory {
                indicator: "Close",
                required: 1,
                available,
            })?;

        let rsi = last_defined(&ind.rsi, "RSI", RSI_PERIOD + 1)?;
        let sma50 = last_defined(&ind.sma50, "SMA50", SMA_SHORT)?;
        let sma200 = last_defined(&ind.sma200, "SMA200", SMA_LONG)?;

        for (field, value) in [("Close", close), ("RSI", rsi), ("SMA50", sma50), ("SMA200", sma200)] {
            if !value.is_finite() {
                return Err(ExtractionFailure::NonFinite { field });
            }
        }

        Ok(IndicatorSnapshot {
            close,
            rsi,
            sma50,
            sma200,
        })
    }

    fn analyze(&self, series: &PriceSeries) -> Result<Analysis, ExtractionFailure> {
        info!("Analyzing {} bars for {}", series.len(), series.ticker());
        let indicators = self.compute_indicators(series);
        let snapshot = self.snapshot(&indicators)?;
        debug!(
            "Snapshot: close={} rsi={} sma50={} sma200={}",
            snapshot.close, snapshot.rsi, snapshot.sma50, snapshot.sma200
        );

        let recommendation = decide(&snapshot);
        info!("Decision for {}: {}", series.ticker(), recommendation);

        Ok(Analysis {
            ticker: series.ticker().to_string(),
            as_of: series.last().date,
            snapshot,
            recommendation,
        })
    }
}

fn last_defined(
    values: &[Option<f64>],
    indicator: &'static str,
    required: usize,
) -> Result<f64, ExtractionFailure> {
    values
        .last()
        .copied()
        .flatten()
        .ok_or(ExtractionFailure::InsufficientHistory {
            indicator,
            required,
            available: values.len(),
        })
}
