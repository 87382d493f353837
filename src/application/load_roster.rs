use crate::application::roster_cache::{CachedRoster, RosterCache, RosterOrigin};
use crate::application::roster_parser::parse_roster;
use crate::domain::entities::listing::SecurityListing;
use crate::domain::error::DomainError;
use crate::domain::ports::roster_source::RosterSource;
use crate::domain::values::segment::MarketSegment;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Roster handed to callers. Never empty.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    pub listings: Arc<[SecurityListing]>,
    pub origin: RosterOrigin,
    pub fetched_at: DateTime<Utc>,
    /// Served without network I/O.
    pub from_cache: bool,
    pub warning: Option<String>,
}

impl RosterSnapshot {
    fn from_entry(entry: CachedRoster, from_cache: bool) -> Self {
        Self {
            listings: entry.listings,
            origin: entry.origin,
            fetched_at: entry.fetched_at,
            from_cache,
            warning: entry.warning,
        }
    }
}

pub struct LoadRosterUseCase {
    source: Arc<dyn RosterSource>,
    fallback: Vec<SecurityListing>,
    cache: Mutex<RosterCache>,
}

impl LoadRosterUseCase {
    pub fn new(source: Arc<dyn RosterSource>, fallback: Vec<SecurityListing>, cache: RosterCache) -> Self {
        Self {
            source,
            fallback,
            cache: Mutex::new(cache),
        }
    }

    /// Merged roster of both segments, served from cache while fresh.
    ///
    /// Any failure on either segment discards the live attempt and substitutes the
    /// fallback list; the reason is carried in `warning`.
    pub async fn execute(&self, now: DateTime<Utc>) -> RosterSnapshot {
        let mut cache = self.cache.lock().await;
        if let Some((entry, true)) = cache.get(now) {
            debug!(origin = ?entry.origin, count = entry.listings.len(), "roster served from cache");
            return RosterSnapshot::from_entry(entry, true);
        }

        let entry = match self.fetch_live().await {
            Ok(listings) => {
                info!(count = listings.len(), source = self.source.name(), "roster refreshed");
                cache.put(listings, RosterOrigin::Live, None, now)
            }
            Err(e) => {
                warn!(error = %e, fallback = self.fallback.len(), "roster unavailable, using fallback list");
                cache.put(
                    self.fallback.clone(),
                    RosterOrigin::Fallback,
                    Some(format!("Roster unavailable ({e}); showing {} fallback securities", self.fallback.len())),
                    now,
                )
            }
        };
        RosterSnapshot::from_entry(entry, false)
    }

    /// Drop the cached roster so the next call fetches again.
    pub async fn invalidate(&self) {
        self.cache.lock().await.invalidate();
    }

    async fn fetch_live(&self) -> Result<Vec<SecurityListing>, DomainError> {
        let mut merged = Vec::new();
        for segment in MarketSegment::ALL {
            let table = self.source.fetch_table(segment).await?;
            let listings = parse_roster(&table, segment)?;
            debug!(%segment, rows = table.len(), listings = listings.len(), "segment parsed");
            merged.extend(listings);
        }

        if merged.is_empty() {
            return Err(DomainError::Parse("merged roster is empty".into()));
        }
        Ok(merged)
    }
}
