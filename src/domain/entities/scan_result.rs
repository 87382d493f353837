use serde::{Deserialize, Serialize};

/// A security that satisfied every screening condition.
///
/// Serialized field names are the column headers of the exported table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(rename = "代號")]
    pub code: String,
    #[serde(rename = "名稱")]
    pub name: String,
    #[serde(rename = "股價")]
    pub price: f64,
    #[serde(rename = "本益比")]
    pub pe: f64,
    #[serde(rename = "股價淨值比")]
    pub pb: f64,
    #[serde(rename = "殖利率(%)")]
    pub yield_pct: f64,
    #[serde(rename = "ROE(%)")]
    pub roe_pct: f64,
    #[serde(rename = "產業")]
    pub industry: String,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(1.2), 1.2);
        assert_eq!(round2(5.000_000_1), 5.0);
    }
}
