use crate::domain::error::DomainError;
use crate::domain::values::snapshot::MetricSnapshot;
use async_trait::async_trait;

/// Per-ticker fundamentals source (Yahoo Finance in production).
#[async_trait]
pub trait MetricProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch a snapshot for one provider ticker.
    ///
    /// Every failure, transport or otherwise, surfaces as `DomainError::DataUnavailable`
    /// so one bad ticker cannot abort a batch.
    async fn snapshot(&self, ticker: &str) -> Result<MetricSnapshot, DomainError>;

    /// Raw provider payload for the connectivity self-test.
    async fn probe(&self, ticker: &str) -> Result<serde_json::Value, DomainError> {
        let snap = self.snapshot(ticker).await?;
        serde_json::to_value(snap).map_err(|e| DomainError::DataUnavailable(e.to_string()))
    }
}
