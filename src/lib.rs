pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

use crate::application::load_roster::{LoadRosterUseCase, RosterSnapshot};
use crate::application::probe::{ProbeReport, ProbeUseCase};
use crate::application::rate_limiter::RateLimiter;
use crate::application::roster_cache::RosterCache;
use crate::application::scan::{ScanProgress, ScanReport, ScanUseCase};
use crate::config::Config;
use crate::domain::entities::listing::SecurityListing;
use crate::domain::error::DomainError;
use crate::domain::ports::metric_provider::MetricProvider;
use crate::domain::ports::roster_source::RosterSource;
use crate::domain::values::criteria::FilterCriteria;
use crate::infrastructure::metrics::yahoo::YahooMetricProvider;
use crate::infrastructure::roster::fallback::fallback_listings;
use crate::infrastructure::roster::twse::TwseRosterSource;
use chrono::{DateTime, Utc};
use std::ops::Range;
use std::sync::Arc;

pub struct ValueRadar {
    roster_uc: LoadRosterUseCase,
    scan_uc: ScanUseCase,
    probe_uc: ProbeUseCase,
}

impl ValueRadar {
    /// Production wiring: TWSE roster pages and Yahoo Finance.
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        config.validate()?;
        let roster: Arc<dyn RosterSource> = Arc::new(TwseRosterSource::new(
            config.listed_url.clone(),
            config.otc_url.clone(),
            config.request_timeout,
        )?);
        let metrics: Arc<dyn MetricProvider> = Arc::new(YahooMetricProvider::new(
            config.yahoo_base_url.clone(),
            config.request_timeout,
        )?);

        Ok(Self::with_providers(roster, metrics, fallback_listings(), config))
    }

    pub fn with_providers(
        roster: Arc<dyn RosterSource>,
        metrics: Arc<dyn MetricProvider>,
        fallback: Vec<SecurityListing>,
        config: &Config,
    ) -> Self {
        let cache = RosterCache::new(config.roster_ttl, config.fallback_retry);
        let limiter = Arc::new(RateLimiter::new(metrics.name().to_string(), config.pacing));

        Self {
            roster_uc: LoadRosterUseCase::new(roster, fallback, cache),
            scan_uc: ScanUseCase::new(metrics.clone(), limiter, config.concurrency),
            probe_uc: ProbeUseCase::new(metrics),
        }
    }

    pub async fn listings(&self) -> RosterSnapshot {
        self.roster_uc.execute(Utc::now()).await
    }

    pub async fn listings_at(&self, now: DateTime<Utc>) -> RosterSnapshot {
        self.roster_uc.execute(now).await
    }

    /// Forget the cached roster and load it again.
    pub async fn refresh_listings(&self) -> RosterSnapshot {
        self.roster_uc.invalidate().await;
        self.listings().await
    }

    /// Screen `roster[range]`, loading the roster first if needed.
    pub async fn scan<F>(
        &self,
        range: Range<usize>,
        criteria: &FilterCriteria,
        on_progress: F,
    ) -> Result<(RosterSnapshot, ScanReport), DomainError>
    where
        F: FnMut(ScanProgress),
    {
        let roster = self.listings().await;
        let report = self
            .scan_uc
            .execute(&roster.listings, range, criteria, on_progress)
            .await?;
        Ok((roster, report))
    }

    /// Screen an explicit list, bypassing the roster.
    pub async fn scan_listings<F>(
        &self,
        listings: &[SecurityListing],
        range: Range<usize>,
        criteria: &FilterCriteria,
        on_progress: F,
    ) -> Result<ScanReport, DomainError>
    where
        F: FnMut(ScanProgress),
    {
        self.scan_uc.execute(listings, range, criteria, on_progress).await
    }

    pub async fn probe(&self, ticker: Option<&str>) -> Result<ProbeReport, DomainError> {
        self.probe_uc.execute(ticker).await
    }
}
