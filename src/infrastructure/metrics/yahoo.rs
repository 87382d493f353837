use crate::domain::error::DomainError;
use crate::domain::ports::metric_provider::MetricProvider;
use crate::domain::values::snapshot::MetricSnapshot;
use crate::infrastructure::roster::twse::BROWSER_USER_AGENT;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Visiting this host sets the session cookie the crumb endpoint requires.
pub const YAHOO_SESSION_URL: &str = "https://fc.yahoo.com";

const MODULES: &str = "price,summaryDetail,financialData,defaultKeyStatistics,assetProfile";

/// Yahoo Finance fundamentals via the v10 quoteSummary API.
pub struct YahooMetricProvider {
    base_url: String,
    session_url: Option<String>,
    client: reqwest::Client,
    /// Last crumb Yahoo accepted. Failed handshakes are not cached.
    crumb: Mutex<Option<String>>,
}

impl YahooMetricProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("Yahoo HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_url: Some(YAHOO_SESSION_URL.to_string()),
            client,
            crumb: Mutex::new(None),
        })
    }

    /// Override (or with `None`, skip) the session-cookie request made before the crumb.
    pub fn with_session_url(mut self, url: Option<String>) -> Self {
        self.session_url = url;
        self
    }

    /// Crumb for authenticated quoteSummary calls. `None` if the handshake failed,
    /// in which case the call goes out without it and the next call tries again.
    async fn crumb(&self) -> Option<String> {
        let mut cached = self.crumb.lock().await;
        if cached.is_none() {
            match self.fetch_crumb().await {
                Ok(crumb) => *cached = Some(crumb),
                Err(e) => warn!(error = %e, "Yahoo crumb handshake failed; continuing without crumb"),
            }
        }
        cached.clone()
    }

    async fn fetch_crumb(&self) -> Result<String, reqwest::Error> {
        if let Some(session_url) = &self.session_url {
            // Usually a 404, but it carries the cookie.
            if let Err(e) = self.client.get(session_url).send().await {
                debug!(error = %e, url = %session_url, "Yahoo session cookie request failed");
            }
        }
        let crumb = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(crumb.trim().to_string())
    }

    async fn fetch_raw(&self, ticker: &str) -> Result<serde_json::Value, DomainError> {
        let unavailable = |msg: String| DomainError::DataUnavailable(format!("{ticker}: {msg}"));
        let url = format!("{}/v10/finance/quoteSummary/{ticker}", self.base_url);

        let mut resp = self
            .send_quote(&url, self.crumb().await)
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        // A stale or missing crumb comes back as 401: refresh it and retry once.
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            debug!(ticker, "crumb rejected; refreshing");
            self.crumb.lock().await.take();
            resp = self
                .send_quote(&url, self.crumb().await)
                .await
                .map_err(|e| unavailable(e.to_string()))?;
        }

        if !resp.status().is_success() {
            return Err(unavailable(format!("Yahoo API returned {}", resp.status())));
        }

        resp.json().await.map_err(|e| unavailable(e.to_string()))
    }

    async fn send_quote(&self, url: &str, crumb: Option<String>) -> Result<reqwest::Response, reqwest::Error> {
        let mut req = self.client.get(url).query(&[("modules", MODULES)]);
        if let Some(crumb) = crumb {
            req = req.query(&[("crumb", crumb)]);
        }
        req.send().await
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummary,
}

#[derive(Debug, serde::Deserialize)]
struct QuoteSummary {
    result: Option<Vec<QuoteModules>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteModules {
    #[serde(default)]
    price: PriceModule,
    #[serde(default)]
    summary_detail: SummaryDetail,
    #[serde(default)]
    financial_data: FinancialData,
    #[serde(default)]
    default_key_statistics: KeyStatistics,
    #[serde(default)]
    asset_profile: AssetProfile,
}

/// Yahoo wraps numbers as `{"raw": 12.3, "fmt": "12.30"}`, sends `{}` when unknown,
/// and occasionally `"Infinity"` as the raw value.
#[derive(Debug, Default, serde::Deserialize)]
struct RawNumber {
    #[serde(default)]
    raw: Option<serde_json::Value>,
}

impl RawNumber {
    fn value(&self) -> Option<f64> {
        self.raw.as_ref()?.as_f64().filter(|v| v.is_finite())
    }
}

fn value(n: &Option<RawNumber>) -> Option<f64> {
    n.as_ref().and_then(RawNumber::value)
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    #[serde(default)]
    regular_market_price: Option<RawNumber>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    #[serde(default, rename = "trailingPE")]
    trailing_pe: Option<RawNumber>,
    #[serde(default)]
    dividend_yield: Option<RawNumber>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    #[serde(default)]
    current_price: Option<RawNumber>,
    #[serde(default)]
    return_on_equity: Option<RawNumber>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    #[serde(default)]
    price_to_book: Option<RawNumber>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct AssetProfile {
    #[serde(default)]
    industry: Option<String>,
}

/// Map a quoteSummary payload to a snapshot. Requires a quoted price.
pub fn snapshot_from_payload(ticker: &str, payload: serde_json::Value) -> Result<MetricSnapshot, DomainError> {
    let unavailable = |msg: String| DomainError::DataUnavailable(format!("{ticker}: {msg}"));

    let data: QuoteSummaryResponse = serde_json::from_value(payload).map_err(|e| unavailable(e.to_string()))?;
    if let Some(err) = data.quote_summary.error.filter(|e| !e.is_null()) {
        return Err(unavailable(format!("Yahoo error: {err}")));
    }

    let modules = data
        .quote_summary
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| unavailable("empty quoteSummary result".into()))?;

    let price = value(&modules.financial_data.current_price).or(value(&modules.price.regular_market_price));
    if price.is_none() {
        return Err(unavailable("no current price".into()));
    }

    Ok(MetricSnapshot {
        price,
        trailing_pe: value(&modules.summary_detail.trailing_pe),
        price_to_book: value(&modules.default_key_statistics.price_to_book),
        dividend_yield: value(&modules.summary_detail.dividend_yield),
        return_on_equity: value(&modules.financial_data.return_on_equity),
        industry: modules.asset_profile.industry.filter(|s| !s.is_empty()),
    })
}

#[async_trait]
impl MetricProvider for YahooMetricProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    async fn snapshot(&self, ticker: &str) -> Result<MetricSnapshot, DomainError> {
        let payload = self.fetch_raw(ticker).await?;
        let snapshot = snapshot_from_payload(ticker, payload)?;
        debug!(ticker, ?snapshot, "snapshot fetched");
        Ok(snapshot)
    }

    async fn probe(&self, ticker: &str) -> Result<serde_json::Value, DomainError> {
        self.fetch_raw(ticker).await
    }
}
