// One invocation: prompt, fetch, analyze, print.
use crate::analyzer::Analyzer;
use crate::config::AppConfig;
use crate::model::{Analysis, ExtractionFailure, HistoryRequest, ScraperError};
use crate::report;
use crate::scraper::PriceSource;
use crate::utils::normalize_ticker;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{error, info, warn};

pub const PROMPT: &str = "Enter a stock ticker (example: AAPL, TSLA): ";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("fetch for {ticker} failed: {source}")]
    Fetch {
        ticker: String,
        #[source]
        source: ScraperError,
    },
}

/// What the invocation ended with, after its message was printed.
#[derive(Debug)]
pub enum Outcome {
    EmptyTicker,
    NoData { ticker: String },
    NotAnalyzable { ticker: String, failure: ExtractionFailure },
    Analyzed(Analysis),
}

pub async fn run<R, W, A>(
    input: &mut R,
    out: &mut W,
    source: &dyn PriceSource,
    analyzer: &A,
    config: &AppConfig,
) -> Result<Outcome, AppError>
where
    R: BufRead,
    W: Write,
    A: Analyzer,
{
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let Some(ticker) = normalize_ticker(&line) else {
        info!("Empty ticker input");
        writeln!(out, "{}", report::EMPTY_TICKER)?;
        return Ok(Outcome::EmptyTicker);
    };

    let request = HistoryRequest {
        ticker: ticker.clone(),
        range: config.range.clone(),
        interval: config.interval.clone(),
    };

    let series = match source.fetch(&request).await {
        Ok(Some(series)) => series,
        Ok(None) => {
            warn!("No data for {}", ticker);
            writeln!(out, "{}", report::no_data(&ticker))?;
            return Ok(Outcome::NoData { ticker });
        }
        Err(e) => {
            error!("Fetch failed for {}: {}", ticker, e);
            writeln!(out, "{}", report::fetch_failure(&ticker, &e))?;
            return Err(AppError::Fetch { ticker, source: e });
        }
    };

    match analyzer.analyze(&series) {
        Ok(analysis) => {
            write!(out, "{}", report::format_analysis(&analysis))?;
            Ok(Outcome::Analyzed(analysis))
        }
        Err(failure) => {
            warn!("Cannot analyze {}: {}", ticker, failure);
            writeln!(out, "{}", report::extraction_failure(&ticker, &failure))?;
            Ok(Outcome::NotAnalyzable { ticker, failure })
        }
    }
}
