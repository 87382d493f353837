use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value-investing thresholds. Yield and ROE are entered as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub max_pe: f64,
    pub max_pb: f64,
    pub min_yield_pct: f64,
    pub min_roe_pct: f64,
}

/// One of the four screening conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Pe,
    Pb,
    Yield,
    Roe,
}

impl FilterCriteria {
    pub fn new(max_pe: f64, max_pb: f64, min_yield_pct: f64, min_roe_pct: f64) -> Result<Self, DomainError> {
        let criteria = Self {
            max_pe,
            max_pb,
            min_yield_pct,
            min_roe_pct,
        };
        criteria.validate()?;
        Ok(criteria)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("max_pe", self.max_pe),
            ("max_pb", self.max_pb),
            ("min_yield_pct", self.min_yield_pct),
            ("min_roe_pct", self.min_roe_pct),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidInput(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            max_pe: 15.0,
            max_pb: 1.5,
            min_yield_pct: 4.0,
            min_roe_pct: 10.0,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Pe => write!(f, "P/E"),
            Criterion::Pb => write!(f, "P/B"),
            Criterion::Yield => write!(f, "yield"),
            Criterion::Roe => write!(f, "ROE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_labels() {
        let labels: Vec<String> = [Criterion::Pe, Criterion::Pb, Criterion::Yield, Criterion::Roe]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(labels, vec!["P/E", "P/B", "yield", "ROE"]);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(FilterCriteria::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        assert!(FilterCriteria::new(-1.0, 1.5, 4.0, 10.0).is_err());
        assert!(FilterCriteria::new(15.0, f64::NAN, 4.0, 10.0).is_err());
        assert!(FilterCriteria::new(15.0, 1.5, 0.0, 0.0).is_ok());
    }
}
