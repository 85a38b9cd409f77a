use crate::config::AppConfig;
use crate::model::{HistoryRequest, PriceSeries, ScraperError};
use crate::normalizer::normalize_all;
use crate::parser::{ChartParser, Parser};
use crate::scraper::PriceSource;

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

pub struct YahooFetcher {
    client: Client,
    base_url: String,
    timeout_secs: u64,
    parser: ChartParser,
}

impl YahooFetcher {
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ScraperError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.request_timeout_seconds,
            parser: ChartParser::new(),
        })
    }

    fn build_url(&self, req: &HistoryRequest) -> String {
        format!("{}/{}", self.base_url, req.ticker)
    }

    /// Returns the response body, or `None` when the provider answers 404.
    async fn fetch_body(&self, req: &HistoryRequest) -> Result<Option<String>, ScraperError> {
        let url = self.build_url(req);
        info!("GET {} range={} interval={}", url, req.range, req.interval);

        let request = self
            .client
            .get(&url)
            .query(&[("range", req.range.as_str()), ("interval", req.interval.as_str())])
            .send();

        let response = match timeout(Duration::from_secs(self.timeout_secs), request).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                warn!("❌ Price request failed: {:?}", e);
                return Err(ScraperError::HttpError(e.to_string()));
            }
            Err(_) => {
                warn!("⏳ Price request timed out");
                return Err(ScraperError::Timeout(self.timeout_secs));
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!("Provider has no chart for {}", req.ticker);
            return Ok(None);
        }
        if !status.is_success() {
            warn!("❌ Provider responded [{}]", status);
            return Err(ScraperError::InvalidResponse(status.as_u16()));
        }

        response
            .text()
            .await
            .map(Some)
            .map_err(|e| ScraperError::HttpError(e.to_string()))
    }
}

#[async_trait::async_trait]
impl PriceSource for YahooFetcher {
    async fn fetch(&self, req: &HistoryRequest) -> Result<Option<PriceSeries>, ScraperError> {
        let Some(body) = self.fetch_body(req).await? else {
            return Ok(None);
        };

        let chart = self.parser.parse(&body)?;
        debug!(
            "Chart for {:?} ({:?}): {} raw bars",
            chart.symbol,
            chart.currency,
            chart.bars.len()
        );

        let bars = normalize_all(chart.bars);
        if bars.is_empty() {
            return Ok(None);
        }

        let series = PriceSeries::new(req.ticker.clone(), bars)?;
        let last = series.last();
        debug!(
            "Last session {}: open={:?} high={:?} low={:?} close={} volume={:?}",
            last.date, last.open, last.high, last.low, last.close, last.volume
        );
        info!("Fetched {} daily bars for {}", series.len(), req.ticker);
        Ok(Some(series))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const BODY: &str = r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","gmtoffset":-18000},
        "timestamp":[1709562600,1709649000,1709735400],
        "indicators":{"quote":[{"close":[175.1,null,170.5],"volume":[10,20,30]}]}}],"error":null}}"#;

    fn request(ticker: &str) -> HistoryRequest {
        HistoryRequest {
            ticker: ticker.to_string(),
            range: "1y".into(),
            interval: "1d".into(),
        }
    }

    fn fetcher_for(url: String) -> YahooFetcher {
        let config = AppConfig {
            base_url: url,
            request_timeout_seconds: 5,
            ..AppConfig::default()
        };
        YahooFetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn fetches_and_normalizes_series() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/AAPL")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("range".into(), "1y".into()),
                Matcher::UrlEncoded("interval".into(), "1d".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let series = fetcher_for(server.url())
            .fetch(&request("AAPL"))
            .await
            .unwrap()
            .expect("series");

        mock.assert_async().await;
        assert_eq!(series.ticker(), "AAPL");
        assert_eq!(series.closes(), vec![175.1, 170.5]);
    }

    #[tokio::test]
    async fn not_found_is_no_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/NOPE")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#)
            .create_async()
            .await;

        let result = fetcher_for(server.url()).fetch(&request("NOPE")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn all_null_closes_is_no_data() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/HALT")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"chart":{"result":[{"meta":{},"timestamp":[1709562600],
                "indicators":{"quote":[{"close":[null]}]}}],"error":null}}"#)
            .create_async()
            .await;

        let result = fetcher_for(server.url()).fetch(&request("HALT")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn server_error_is_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/AAPL")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = fetcher_for(server.url()).fetch(&request("AAPL")).await.unwrap_err();
        assert!(matches!(err, ScraperError::InvalidResponse(500)));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/AAPL")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("Too Many Requests")
            .create_async()
            .await;

        let err = fetcher_for(server.url()).fetch(&request("AAPL")).await.unwrap_err();
        assert!(matches!(err, ScraperError::Parse(_)));
    }
}
