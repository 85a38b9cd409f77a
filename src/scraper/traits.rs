use crate::model::{HistoryRequest, PriceSeries, ScraperError};

/// Source of daily price history. `Ok(None)` means the provider has no
/// data for the ticker, which is not a transport failure.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, req: &HistoryRequest) -> Result<Option<PriceSeries>, ScraperError>;
}
