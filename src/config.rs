//! Runtime settings, read from `RADAR_*` environment variables with built-in defaults.

use crate::domain::error::DomainError;
use crate::domain::values::segment::MarketSegment;
use crate::infrastructure::metrics::yahoo::YAHOO_BASE_URL;
use crate::infrastructure::roster::twse::TwseRosterSource;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub listed_url: String,
    pub otc_url: String,
    pub yahoo_base_url: String,
    pub roster_ttl: chrono::Duration,
    pub fallback_retry: chrono::Duration,
    /// Minimum gap between metric provider requests
    pub pacing: Duration,
    /// Metric lookups in flight at once; 1 means strictly sequential
    pub concurrency: usize,
    pub request_timeout: Duration,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listed_url: TwseRosterSource::default_url(MarketSegment::Listed),
            otc_url: TwseRosterSource::default_url(MarketSegment::Otc),
            yahoo_base_url: YAHOO_BASE_URL.to_string(),
            roster_ttl: chrono::Duration::hours(24),
            fallback_retry: chrono::Duration::minutes(15),
            pacing: Duration::from_millis(100),
            concurrency: 1,
            request_timeout: Duration::from_secs(15),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Config::default();
        let parse = |key: &str| -> Result<Option<u64>, DomainError> { parse_var(&lookup, key) };

        let config = Config {
            listed_url: lookup("RADAR_LISTED_URL").unwrap_or(d.listed_url),
            otc_url: lookup("RADAR_OTC_URL").unwrap_or(d.otc_url),
            yahoo_base_url: lookup("RADAR_YAHOO_BASE_URL").unwrap_or(d.yahoo_base_url),
            roster_ttl: parse("RADAR_ROSTER_TTL_HOURS")?
                .map(|h| chrono_duration("RADAR_ROSTER_TTL_HOURS", h, chrono::Duration::try_hours))
                .transpose()?
                .unwrap_or(d.roster_ttl),
            fallback_retry: parse("RADAR_FALLBACK_RETRY_MINUTES")?
                .map(|m| chrono_duration("RADAR_FALLBACK_RETRY_MINUTES", m, chrono::Duration::try_minutes))
                .transpose()?
                .unwrap_or(d.fallback_retry),
            pacing: parse("RADAR_PACING_MS")?
                .map(Duration::from_millis)
                .unwrap_or(d.pacing),
            concurrency: parse("RADAR_CONCURRENCY")?
                .map(|c| c as usize)
                .unwrap_or(d.concurrency),
            request_timeout: parse("RADAR_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(d.request_timeout),
            log_level: lookup("RADAR_LOG_LEVEL").unwrap_or(d.log_level),
            log_format: lookup("RADAR_LOG_FORMAT").unwrap_or(d.log_format),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.concurrency == 0 {
            return Err(DomainError::Config("RADAR_CONCURRENCY must be at least 1".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(DomainError::Config("RADAR_TIMEOUT_SECS must be at least 1".into()));
        }
        if !matches!(self.log_format.as_str(), "pretty" | "json") {
            return Err(DomainError::Config(format!(
                "RADAR_LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                self.log_format
            )));
        }
        Ok(())
    }
}

/// Range-checked conversion; chrono panics on out-of-range durations.
fn chrono_duration(
    key: &str,
    value: u64,
    unit: fn(i64) -> Option<chrono::Duration>,
) -> Result<chrono::Duration, DomainError> {
    i64::try_from(value)
        .ok()
        .and_then(unit)
        .ok_or_else(|| DomainError::Config(format!("{key}={value} is out of range")))
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| DomainError::Config(format!("{key}={raw}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.roster_ttl, chrono::Duration::hours(24));
        assert_eq!(config.pacing, Duration::from_millis(100));
        assert_eq!(config.concurrency, 1);
        assert!(config.listed_url.ends_with("strMode=2"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("RADAR_PACING_MS", "250"),
            ("RADAR_CONCURRENCY", "4"),
            ("RADAR_ROSTER_TTL_HOURS", "6"),
            ("RADAR_LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.pacing, Duration::from_millis(250));
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.roster_ttl, chrono::Duration::hours(6));
        assert_eq!(config.log_format, "json");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("RADAR_PACING_MS", "fast")])),
            Err(DomainError::Config(_))
        ));
        assert!(Config::from_lookup(lookup(&[("RADAR_CONCURRENCY", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("RADAR_LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn test_out_of_range_durations() {
        for (key, value) in [
            ("RADAR_ROSTER_TTL_HOURS", "3000000000000000"),
            ("RADAR_ROSTER_TTL_HOURS", "18446744073709551615"),
            ("RADAR_FALLBACK_RETRY_MINUTES", "9223372036854775807"),
        ] {
            assert!(
                matches!(Config::from_lookup(lookup(&[(key, value)])), Err(DomainError::Config(_))),
                "{key}={value}"
            );
        }
    }
}
