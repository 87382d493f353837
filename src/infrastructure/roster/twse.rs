use crate::domain::error::DomainError;
use crate::domain::ports::roster_source::RosterSource;
use crate::domain::values::raw_table::RawTable;
use crate::domain::values::segment::MarketSegment;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

pub const ISIN_ROSTER_URL: &str = "https://isin.twse.com.tw/isin/C_public.jsp";

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// TWSE ISIN roster pages (`C_public.jsp?strMode=N`), one per market segment.
///
/// The site serves Big5 (MS950) and its certificate chain does not validate,
/// so certificate checks are off for this client only.
pub struct TwseRosterSource {
    listed_url: String,
    otc_url: String,
    client: reqwest::Client,
}

impl TwseRosterSource {
    pub fn new(listed_url: impl Into<String>, otc_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("roster HTTP client: {e}")))?;
        Ok(Self {
            listed_url: listed_url.into(),
            otc_url: otc_url.into(),
            client,
        })
    }

    pub fn default_url(segment: MarketSegment) -> String {
        format!("{ISIN_ROSTER_URL}?strMode={}", segment.roster_mode())
    }

    fn url(&self, segment: MarketSegment) -> &str {
        match segment {
            MarketSegment::Listed => &self.listed_url,
            MarketSegment::Otc => &self.otc_url,
        }
    }
}

#[async_trait]
impl RosterSource for TwseRosterSource {
    fn name(&self) -> &str {
        "twse_isin"
    }

    async fn fetch_table(&self, segment: MarketSegment) -> Result<RawTable, DomainError> {
        let url = self.url(segment);
        debug!(%segment, url, "fetching roster");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Fetch(format!("{segment} roster request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::Fetch(format!(
                "{segment} roster returned {}",
                resp.status()
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| DomainError::Fetch(format!("{segment} roster body: {e}")))?;

        let html = decode_big5(&bytes);
        first_table(&html)
            .filter(|table| !table.is_empty())
            .ok_or_else(|| DomainError::Fetch(format!("{segment} roster page has no table")))
    }
}

/// Decode the roster page. Decoding as UTF-8 would mangle the header label the
/// parser looks for.
pub fn decode_big5(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::BIG5.decode(bytes);
    if had_errors {
        warn!("roster page contained bytes outside Big5; replaced");
    }
    text.into_owned()
}

/// Cell text of the first `<table>` in the document.
pub fn first_table(html: &str) -> Option<RawTable> {
    let table_sel = Selector::parse("table").ok()?;
    let row_sel = Selector::parse("tr").ok()?;
    let cell_sel = Selector::parse("td, th").ok()?;

    let document = Html::parse_document(html);
    let table = document.select(&table_sel).next()?;

    let rows = table
        .select(&row_sel)
        .map(|row| {
            row.select(&cell_sel)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    Some(RawTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>ISIN</title></head><body>
        <h2>本國上市證券國際證券辨識號碼一覽表</h2>
        <table class="h4">
          <tr><td>有價證券代號及名稱 </td><td>國際證券辨識號碼(ISIN Code)</td><td>上市日</td></tr>
          <tr><td colspan=3><b> 股票 <b></td></tr>
          <tr><td>1101　台泥</td><td>TW0001101004</td><td>1962/02/09</td></tr>
        </table>
        <table><tr><td>footer</td></tr></table>
        </body></html>"#;

    #[test]
    fn test_first_table_cells() {
        let table = first_table(PAGE).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0][0], "有價證券代號及名稱");
        assert_eq!(table.rows[1], vec!["股票".to_string()]);
        assert_eq!(table.rows[2][0], "1101　台泥");
    }

    #[test]
    fn test_empty_table_has_no_rows() {
        let table = first_table("<html><body><table></table></body></html>").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_no_table() {
        assert!(first_table("<html><body><p>maintenance</p></body></html>").is_none());
    }

    #[test]
    fn test_decode_big5() {
        let (encoded, _, _) = encoding_rs::BIG5.encode("有價證券代號及名稱　台泥");
        assert_eq!(decode_big5(&encoded), "有價證券代號及名稱　台泥");
    }

    #[test]
    fn test_default_urls() {
        assert!(TwseRosterSource::default_url(MarketSegment::Listed).ends_with("strMode=2"));
        assert!(TwseRosterSource::default_url(MarketSegment::Otc).ends_with("strMode=4"));
    }
}
