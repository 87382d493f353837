use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// Stand-in for an unknown P/E or P/B. Larger than any realistic "maximum" threshold.
pub const MISSING_RATIO: f64 = 999.0;

/// Stand-in for an unknown yield or ROE. Never exceeds a non-negative "minimum" threshold.
pub const MISSING_RETURN: f64 = 0.0;

/// Per-ticker fundamentals as reported by the metric provider.
///
/// Yield and ROE are fractions (0.05 == 5 %). Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub price: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub price_to_book: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub industry: Option<String>,
}

/// Snapshot after the missing-value policy: every ratio has a concrete value and
/// yield/ROE are scaled to percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMetrics {
    pub price: f64,
    pub pe: f64,
    pub pb: f64,
    pub yield_pct: f64,
    pub roe_pct: f64,
}

impl MetricSnapshot {
    /// Quoted price, or `DataUnavailable` when the instrument has none.
    pub fn quoted_price(&self) -> Result<f64, DomainError> {
        self.price
            .filter(|p| p.is_finite())
            .ok_or_else(|| DomainError::DataUnavailable("no current price in snapshot".into()))
    }

    /// Unknown fundamentals never look attractive: missing ratios become
    /// [`MISSING_RATIO`], missing returns become [`MISSING_RETURN`].
    pub fn resolve(&self) -> Result<ResolvedMetrics, DomainError> {
        let price = self.quoted_price()?;
        let ratio = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(MISSING_RATIO);
        let pct = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(MISSING_RETURN) * 100.0;

        Ok(ResolvedMetrics {
            price,
            pe: ratio(self.trailing_pe),
            pb: ratio(self.price_to_book),
            yield_pct: pct(self.dividend_yield),
            roe_pct: pct(self.return_on_equity),
        })
    }
}
