//! CSV export of scan results, readable by spreadsheet software without an import wizard.

use crate::domain::entities::scan_result::ScanResult;
use crate::domain::error::DomainError;
use std::io::Write;
use std::ops::Range;
use std::path::Path;

/// UTF-8 byte-order mark. Excel needs it to detect UTF-8 in a CSV.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header row; matches the serde names on [`ScanResult`].
pub const COLUMNS: [&str; 8] = ["代號", "名稱", "股價", "本益比", "股價淨值比", "殖利率(%)", "ROE(%)", "產業"];

pub fn write_csv<W: Write>(results: &[ScanResult], mut out: W) -> Result<(), DomainError> {
    out.write_all(UTF8_BOM)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer
        .write_record(COLUMNS)
        .map_err(|e| DomainError::Export(e.to_string()))?;
    for result in results {
        writer
            .serialize(result)
            .map_err(|e| DomainError::Export(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_to_path(results: &[ScanResult], path: &Path) -> Result<(), DomainError> {
    let file = std::fs::File::create(path)
        .map_err(|e| DomainError::Export(format!("cannot create {}: {e}", path.display())))?;
    write_csv(results, std::io::BufWriter::new(file))
}

/// `value_stocks.csv`, or `value_stocks_{start}_{end}.csv` for a scanned range.
pub fn export_file_name(range: Option<&Range<usize>>) -> String {
    match range {
        Some(r) => format!("value_stocks_{}_{}.csv", r.start, r.end),
        None => "value_stocks.csv".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_bytes(results: &[ScanResult]) -> Vec<u8> {
        let mut buf = Vec::new();
        write_csv(results, &mut buf).unwrap();
        buf
    }

    fn result() -> ScanResult {
        ScanResult {
            code: "2886".into(),
            name: "兆豐金".into(),
            price: 38.45,
            pe: 12.5,
            pb: 1.21,
            yield_pct: 4.55,
            roe_pct: 10.2,
            industry: "Banks, Regional".into(),
        }
    }

    #[test]
    fn test_bom_and_header() {
        let bytes = csv_bytes(&[result()]);
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "代號,名稱,股價,本益比,股價淨值比,殖利率(%),ROE(%),產業");
        assert_eq!(lines.next().unwrap(), "2886,兆豐金,38.45,12.5,1.21,4.55,10.2,\"Banks, Regional\"");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_results_still_have_header() {
        let bytes = csv_bytes(&[]);
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name(None), "value_stocks.csv");
        assert_eq!(export_file_name(Some(&(100..200))), "value_stocks_100_200.csv");
    }
}
