use crate::domain::entities::listing::SecurityListing;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterOrigin {
    /// Parsed from both exchange segments.
    Live,
    /// Static list substituted after a fetch or parse failure.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct CachedRoster {
    pub listings: Arc<[SecurityListing]>,
    pub origin: RosterOrigin,
    pub fetched_at: DateTime<Utc>,
    /// Why the live roster was abandoned, for fallback entries.
    pub warning: Option<String>,
}

/// Time-bounded memo of the merged roster. The caller supplies `now`.
///
/// Live rosters stay fresh for `ttl`; fallback rosters only for `fallback_ttl`,
/// so a recovered exchange site is picked up sooner.
#[derive(Debug)]
pub struct RosterCache {
    ttl: Duration,
    fallback_ttl: Duration,
    entry: Option<CachedRoster>,
}

impl RosterCache {
    pub fn new(ttl: Duration, fallback_ttl: Duration) -> Self {
        Self {
            ttl,
            fallback_ttl,
            entry: None,
        }
    }

    /// Cached roster and whether it is still fresh at `now`.
    pub fn get(&self, now: DateTime<Utc>) -> Option<(CachedRoster, bool)> {
        let entry = self.entry.as_ref()?;
        let ttl = match entry.origin {
            RosterOrigin::Live => self.ttl,
            RosterOrigin::Fallback => self.fallback_ttl,
        };
        let fresh = now - entry.fetched_at < ttl;
        Some((entry.clone(), fresh))
    }

    /// Replace the cached roster wholesale.
    pub fn put(
        &mut self,
        listings: Vec<SecurityListing>,
        origin: RosterOrigin,
        warning: Option<String>,
        now: DateTime<Utc>,
    ) -> CachedRoster {
        let entry = CachedRoster {
            listings: listings.into(),
            origin,
            fetched_at: now,
            warning,
        };
        self.entry = Some(entry.clone());
        entry
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

impl Default for RosterCache {
    fn default() -> Self {
        RosterCache::new(Duration::hours(24), Duration::minutes(15))
    }
}
