use crate::domain::values::segment::MarketSegment;
use serde::{Deserialize, Serialize};

/// One equity from the exchange roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityListing {
    pub code: String,
    pub name: String,
    pub provider_ticker: String,
    pub segment: MarketSegment,
}

impl SecurityListing {
    pub fn new(code: impl Into<String>, name: impl Into<String>, segment: MarketSegment) -> Self {
        let code = code.into();
        Self {
            provider_ticker: segment.provider_ticker(&code),
            code,
            name: name.into(),
            segment,
        }
    }
}
