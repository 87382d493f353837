//! Shared test helpers: in-memory roster and metric sources.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use value_radar::config::Config;
use value_radar::domain::entities::listing::SecurityListing;
use value_radar::domain::error::DomainError;
use value_radar::domain::ports::metric_provider::MetricProvider;
use value_radar::domain::ports::roster_source::RosterSource;
use value_radar::domain::values::raw_table::RawTable;
use value_radar::domain::values::segment::MarketSegment;
use value_radar::domain::values::snapshot::MetricSnapshot;
use value_radar::ValueRadar;

pub const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Roster table shaped like the ISIN page: banner rows, header, a section divider,
/// equity rows, and a warrant row that must be filtered out.
pub fn roster_table(equities: &[(&str, &str)]) -> RawTable {
    let mut rows = vec![
        vec!["本國上市證券國際證券辨識號碼一覽表".to_string()],
        vec!["最近更新日期:2026/10/19".to_string()],
        vec![
            "有價證券代號及名稱".to_string(),
            "國際證券辨識號碼(ISIN Code)".to_string(),
            "上市日".to_string(),
        ],
        vec!["股票".to_string()],
    ];
    for (code, name) in equities {
        rows.push(vec![
            format!("{code}{IDEOGRAPHIC_SPACE}{name}"),
            format!("TW000{code}004"),
            "1962/02/09".to_string(),
        ]);
    }
    rows.push(vec!["上市認購(售)權證".to_string()]);
    rows.push(vec![
        format!("030001{IDEOGRAPHIC_SPACE}台積元大5A購01"),
        "TW13Z030001".to_string(),
        "2025/01/02".to_string(),
    ]);
    RawTable::new(rows)
}

pub struct FakeRosterSource {
    tables: Mutex<HashMap<MarketSegment, Result<RawTable, String>>>,
    pub calls: AtomicUsize,
}

impl FakeRosterSource {
    pub fn new(listed: &[(&str, &str)], otc: &[(&str, &str)]) -> Self {
        let mut tables = HashMap::new();
        tables.insert(MarketSegment::Listed, Ok(roster_table(listed)));
        tables.insert(MarketSegment::Otc, Ok(roster_table(otc)));
        Self {
            tables: Mutex::new(tables),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, segment: MarketSegment, table: Result<RawTable, String>) {
        self.tables.lock().unwrap().insert(segment, table);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RosterSource for FakeRosterSource {
    fn name(&self) -> &str {
        "fake_roster"
    }

    async fn fetch_table(&self, segment: MarketSegment) -> Result<RawTable, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.tables.lock().unwrap().get(&segment) {
            Some(Ok(table)) => Ok(table.clone()),
            Some(Err(msg)) => Err(DomainError::Fetch(msg.clone())),
            None => Err(DomainError::Fetch(format!("no table for {segment}"))),
        }
    }
}

/// Returns canned snapshots; unknown tickers are unavailable.
pub struct FakeMetricProvider {
    snapshots: HashMap<String, MetricSnapshot>,
    delays: HashMap<String, Duration>,
    pub calls: AtomicUsize,
}

impl FakeMetricProvider {
    pub fn new() -> Self {
        Self {
            snapshots: HashMap::new(),
            delays: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, ticker: &str, snapshot: MetricSnapshot) -> Self {
        self.snapshots.insert(ticker.to_string(), snapshot);
        self
    }

    /// Make one ticker's lookup slow, to shuffle completion order under concurrency.
    pub fn with_delay(mut self, ticker: &str, delay: Duration) -> Self {
        self.delays.insert(ticker.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricProvider for FakeMetricProvider {
    fn name(&self) -> &str {
        "fake_metrics"
    }

    async fn snapshot(&self, ticker: &str) -> Result<MetricSnapshot, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(ticker) {
            tokio::time::sleep(*delay).await;
        }
        self.snapshots
            .get(ticker)
            .cloned()
            .ok_or_else(|| DomainError::DataUnavailable(format!("{ticker}: not found")))
    }
}

/// Snapshot that passes the default criteria.
pub fn attractive() -> MetricSnapshot {
    MetricSnapshot {
        price: Some(100.0),
        trailing_pe: Some(12.0),
        price_to_book: Some(1.2),
        dividend_yield: Some(0.05),
        return_on_equity: Some(0.12),
        industry: Some("Banks".into()),
    }
}

/// Snapshot that fails the default criteria on P/E alone.
pub fn expensive() -> MetricSnapshot {
    MetricSnapshot {
        trailing_pe: Some(35.0),
        ..attractive()
    }
}

pub fn listing(code: &str, name: &str) -> SecurityListing {
    SecurityListing::new(code, name, MarketSegment::Listed)
}

pub fn test_config() -> Config {
    Config {
        pacing: Duration::ZERO,
        ..Config::default()
    }
}

pub fn setup(
    roster: Arc<FakeRosterSource>,
    metrics: Arc<FakeMetricProvider>,
    fallback: Vec<SecurityListing>,
) -> ValueRadar {
    ValueRadar::with_providers(roster, metrics, fallback, &test_config())
}
