use serde::{Deserialize, Serialize};
use std::fmt;

/// Market board a security trades on. Determines the provider ticker suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSegment {
    /// Primary board (TWSE listed, 上市).
    Listed,
    /// Secondary board (TPEx over-the-counter, 上櫃).
    Otc,
}

impl MarketSegment {
    pub const ALL: [MarketSegment; 2] = [MarketSegment::Listed, MarketSegment::Otc];

    /// Suffix Yahoo Finance expects after the 4-character code.
    pub fn ticker_suffix(&self) -> &'static str {
        match self {
            MarketSegment::Listed => ".TW",
            MarketSegment::Otc => ".TWO",
        }
    }

    /// `strMode` query value of the ISIN roster page.
    pub fn roster_mode(&self) -> u8 {
        match self {
            MarketSegment::Listed => 2,
            MarketSegment::Otc => 4,
        }
    }

    pub fn provider_ticker(&self, code: &str) -> String {
        format!("{code}{}", self.ticker_suffix())
    }
}

impl fmt::Display for MarketSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketSegment::Listed => write!(f, "listed"),
            MarketSegment::Otc => write!(f, "otc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes() {
        assert_eq!(MarketSegment::Listed.provider_ticker("2330"), "2330.TW");
        assert_eq!(MarketSegment::Otc.provider_ticker("6488"), "6488.TWO");
    }
}
