//! Turns a raw exchange roster table into [`SecurityListing`]s.
//!
//! The ISIN roster pages put a few banner rows above the real column header, and
//! interleave section dividers ("股票", "上市認購(售)權證", ...) with data rows. Data
//! rows carry code and name in one cell separated by an ideographic space.

use crate::domain::entities::listing::SecurityListing;
use crate::domain::error::DomainError;
use crate::domain::values::raw_table::RawTable;
use crate::domain::values::segment::MarketSegment;

/// Label of the combined "security code and name" column.
pub const HEADER_KEYWORD: &str = "有價證券代號及名稱";

/// Number of leading rows searched for the header.
pub const HEADER_WINDOW: usize = 5;

/// Separator between code and name inside the combined cell (U+3000).
pub const CODE_NAME_DELIMITER: char = '\u{3000}';

/// Equity codes are exactly this wide; warrants and other instruments are not.
pub const EQUITY_CODE_LEN: usize = 4;

/// Index of the first row within `window` that has a cell containing `keyword`.
pub fn find_header_row(rows: &[Vec<String>], keyword: &str, window: usize) -> Option<usize> {
    rows.iter()
        .take(window)
        .position(|row| row.iter().any(|cell| cell.contains(keyword)))
}

/// Split a combined "code　name" cell, keeping only 4-character alphanumeric codes.
pub fn split_code_name(cell: &str) -> Option<(&str, &str)> {
    let (code, name) = cell.trim().split_once(CODE_NAME_DELIMITER)?;
    let code = code.trim();
    if code.chars().count() != EQUITY_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some((code, name.trim()))
}

/// Parse one segment's table. Every listing gets that segment's ticker suffix.
pub fn parse_roster(table: &RawTable, segment: MarketSegment) -> Result<Vec<SecurityListing>, DomainError> {
    let header_idx = find_header_row(&table.rows, HEADER_KEYWORD, HEADER_WINDOW).ok_or_else(|| {
        DomainError::Parse(format!(
            "header '{HEADER_KEYWORD}' not found in first {HEADER_WINDOW} rows of {segment} roster"
        ))
    })?;

    let column = table.rows[header_idx]
        .iter()
        .position(|cell| cell.contains(HEADER_KEYWORD))
        .ok_or_else(|| DomainError::Parse("header column vanished".into()))?;

    let listings: Vec<SecurityListing> = table.rows[header_idx + 1..]
        .iter()
        .filter_map(|row| row.get(column))
        .filter_map(|cell| split_code_name(cell))
        .map(|(code, name)| SecurityListing::new(code, name, segment))
        .collect();

    if listings.is_empty() {
        return Err(DomainError::Parse(format!("{segment} roster has no equity rows")));
    }

    Ok(listings)
}
