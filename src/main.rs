mod analyzer;
mod app;
mod config;
mod model;
mod normalizer;
mod parser;
mod report;
mod scraper;
mod utils;

use analyzer::AnalyzerImpl;
use config::{load_config, AppConfig};
use scraper::YahooFetcher;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file, defaults when absent
    let config_result = load_config("config.json");
    let log_level = config_result
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| AppConfig::default().log_level);
    init_logging(&log_level);

    let config = match config_result {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            eprintln!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let fetcher = match YahooFetcher::new(&config) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to initialize HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let analyzer = AnalyzerImpl::new();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match app::run(&mut input, &mut out, &fetcher, &analyzer, &config).await {
        Ok(outcome) => {
            info!("Finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only the report. `RUST_LOG` wins
/// over the configured level.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
