use crate::application::evaluate::{evaluate, Verdict};
use crate::application::rate_limiter::RateLimiter;
use crate::domain::entities::listing::SecurityListing;
use crate::domain::entities::scan_result::ScanResult;
use crate::domain::error::DomainError;
use crate::domain::ports::metric_provider::MetricProvider;
use crate::domain::values::criteria::FilterCriteria;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Skip rates above this, over at least `THROTTLE_MIN_SAMPLE` entries, suggest the
/// provider is blocking us rather than individual tickers lacking data.
const THROTTLE_SKIP_RATE: f64 = 0.5;
const THROTTLE_MIN_SAMPLE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanProgress {
    pub processed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Clamped range actually scanned
    pub start: usize,
    pub end: usize,
    pub total: usize,
    /// Passing securities in roster order
    pub results: Vec<ScanResult>,
    /// Entries skipped because no data was available
    pub failures: usize,
    /// Entries with data that did not meet the criteria
    pub rejected: usize,
    pub suspected_throttling: bool,
}

pub struct ScanUseCase {
    provider: Arc<dyn MetricProvider>,
    limiter: Arc<RateLimiter>,
    concurrency: usize,
}

/// Clamp `[start, end)` to `0..len`; an inverted range becomes empty.
pub fn clamp_range(range: Range<usize>, len: usize) -> Range<usize> {
    let start = range.start.min(len);
    let end = range.end.clamp(start, len);
    start..end
}

fn suspect_throttling(failures: usize, total: usize) -> bool {
    total >= THROTTLE_MIN_SAMPLE && failures as f64 / total as f64 > THROTTLE_SKIP_RATE
}

impl ScanUseCase {
    pub fn new(provider: Arc<dyn MetricProvider>, limiter: Arc<RateLimiter>, concurrency: usize) -> Self {
        Self {
            provider,
            limiter,
            concurrency: concurrency.max(1),
        }
    }

    /// Screen `listings[range]` against `criteria`.
    ///
    /// Per-ticker failures are counted, never propagated. `on_progress` is called
    /// after every entry. Only invalid criteria fail the whole scan.
    pub async fn execute<F>(
        &self,
        listings: &[SecurityListing],
        range: Range<usize>,
        criteria: &FilterCriteria,
        mut on_progress: F,
    ) -> Result<ScanReport, DomainError>
    where
        F: FnMut(ScanProgress),
    {
        criteria.validate()?;
        let range = clamp_range(range, listings.len());
        let slice = &listings[range.clone()];
        let total = slice.len();
        info!(
            start = range.start,
            end = range.end,
            total,
            concurrency = self.concurrency,
            provider = self.provider.name(),
            "scan started"
        );

        let mut report = ScanReport {
            start: range.start,
            end: range.end,
            total,
            results: Vec::new(),
            failures: 0,
            rejected: 0,
            suspected_throttling: false,
        };

        // `buffered` yields in input order even when several lookups are in flight.
        let mut outcomes = stream::iter(slice)
            .map(move |listing| async move { (listing, self.scan_one(listing, criteria).await) })
            .buffered(self.concurrency);

        let mut processed = 0;
        while let Some((listing, outcome)) = outcomes.next().await {
            processed += 1;
            match outcome {
                Ok(Verdict::Pass(result)) => {
                    debug!(ticker = %listing.provider_ticker, "passed");
                    report.results.push(result);
                }
                Ok(Verdict::Reject(failed)) => {
                    let failed: Vec<String> = failed.iter().map(ToString::to_string).collect();
                    debug!(ticker = %listing.provider_ticker, failed = %failed.join(", "), "rejected");
                    report.rejected += 1;
                }
                Err(e) => {
                    debug!(ticker = %listing.provider_ticker, error = %e, "skipped");
                    report.failures += 1;
                }
            }
            on_progress(ScanProgress { processed, total });
        }

        report.suspected_throttling = suspect_throttling(report.failures, total);
        if report.suspected_throttling {
            warn!(
                failures = report.failures,
                total, "high skip rate; provider may be rate limiting, run the connectivity probe"
            );
        }
        info!(
            passed = report.results.len(),
            rejected = report.rejected,
            failures = report.failures,
            "scan finished"
        );
        Ok(report)
    }

    async fn scan_one(&self, listing: &SecurityListing, criteria: &FilterCriteria) -> Result<Verdict, DomainError> {
        self.limiter.acquire().await;
        let snapshot = self.provider.snapshot(&listing.provider_ticker).await?;
        evaluate(listing, &snapshot, criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_range() {
        assert_eq!(clamp_range(0..100, 30), 0..30);
        assert_eq!(clamp_range(10..20, 30), 10..20);
        assert_eq!(clamp_range(50..80, 30), 30..30);
        assert_eq!(clamp_range(20..10, 30), 20..20);
        assert_eq!(clamp_range(0..0, 0), 0..0);
    }

    #[test]
    fn test_throttle_heuristic() {
        assert!(!suspect_throttling(5, 5));
        assert!(!suspect_throttling(5, 10));
        assert!(suspect_throttling(6, 10));
    }
}
