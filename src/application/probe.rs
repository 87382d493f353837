use crate::domain::error::DomainError;
use crate::domain::ports::metric_provider::MetricProvider;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Ticker used by the connectivity self-test: a large, always-quoted listing.
pub const DEFAULT_PROBE_TICKER: &str = "2330.TW";

#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub provider: String,
    pub ticker: String,
    pub payload: serde_json::Value,
}

/// Connectivity self-test: the first thing to try when a scan skips most tickers.
pub struct ProbeUseCase {
    provider: Arc<dyn MetricProvider>,
}

impl ProbeUseCase {
    pub fn new(provider: Arc<dyn MetricProvider>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self, ticker: Option<&str>) -> Result<ProbeReport, DomainError> {
        let ticker = ticker.unwrap_or(DEFAULT_PROBE_TICKER);
        let payload = self.provider.probe(ticker).await?;
        info!(ticker, provider = self.provider.name(), "probe succeeded");
        Ok(ProbeReport {
            provider: self.provider.name().to_string(),
            ticker: ticker.to_string(),
            payload,
        })
    }
}
