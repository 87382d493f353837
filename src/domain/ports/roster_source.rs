use crate::domain::error::DomainError;
use crate::domain::values::raw_table::RawTable;
use crate::domain::values::segment::MarketSegment;
use async_trait::async_trait;

/// Where the exchange roster comes from.
/// Implementations fetch one market segment's published table at a time.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Name of this source (e.g., "twse_isin")
    fn name(&self) -> &str;

    /// Fetch the first data table of the segment's roster page.
    /// Fails with `DomainError::Fetch` on network errors, non-200 status, or no table.
    async fn fetch_table(&self, segment: MarketSegment) -> Result<RawTable, DomainError>;
}
