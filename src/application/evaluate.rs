//! Screening decision for a single security.

use crate::domain::entities::listing::SecurityListing;
use crate::domain::entities::scan_result::{round2, ScanResult};
use crate::domain::error::DomainError;
use crate::domain::values::criteria::{Criterion, FilterCriteria};
use crate::domain::values::snapshot::{MetricSnapshot, ResolvedMetrics};

const UNKNOWN_INDUSTRY: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Pass(ScanResult),
    /// Conditions that were not met, in P/E, P/B, yield, ROE order.
    Reject(Vec<Criterion>),
}

/// All comparisons are strict: `pe < max_pe`, `pb < max_pb`,
/// `yield_pct > min_yield_pct`, `roe_pct > min_roe_pct`.
pub fn failed_criteria(metrics: &ResolvedMetrics, criteria: &FilterCriteria) -> Vec<Criterion> {
    let checks = [
        (Criterion::Pe, metrics.pe < criteria.max_pe),
        (Criterion::Pb, metrics.pb < criteria.max_pb),
        (Criterion::Yield, metrics.yield_pct > criteria.min_yield_pct),
        (Criterion::Roe, metrics.roe_pct > criteria.min_roe_pct),
    ];
    checks
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(criterion, _)| criterion)
        .collect()
}

/// Fails with `DataUnavailable` when the snapshot has no quoted price.
pub fn evaluate(
    listing: &SecurityListing,
    snapshot: &MetricSnapshot,
    criteria: &FilterCriteria,
) -> Result<Verdict, DomainError> {
    let metrics = snapshot.resolve()?;
    let failed = failed_criteria(&metrics, criteria);
    if !failed.is_empty() {
        return Ok(Verdict::Reject(failed));
    }

    Ok(Verdict::Pass(ScanResult {
        code: listing.code.clone(),
        name: listing.name.clone(),
        price: metrics.price,
        pe: round2(metrics.pe),
        pb: round2(metrics.pb),
        yield_pct: round2(metrics.yield_pct),
        roe_pct: round2(metrics.roe_pct),
        industry: snapshot
            .industry
            .clone()
            .unwrap_or_else(|| UNKNOWN_INDUSTRY.to_string()),
    }))
}
