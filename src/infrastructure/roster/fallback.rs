use crate::domain::entities::listing::SecurityListing;
use crate::domain::values::segment::MarketSegment;

/// Large, long-listed names used when the exchange roster cannot be loaded.
const FALLBACK: &[(&str, &str, MarketSegment)] = &[
    ("0050", "元大台灣50", MarketSegment::Listed),
    ("1216", "統一", MarketSegment::Listed),
    ("1301", "台塑", MarketSegment::Listed),
    ("1303", "南亞", MarketSegment::Listed),
    ("2002", "中鋼", MarketSegment::Listed),
    ("2303", "聯電", MarketSegment::Listed),
    ("2308", "台達電", MarketSegment::Listed),
    ("2317", "鴻海", MarketSegment::Listed),
    ("2330", "台積電", MarketSegment::Listed),
    ("2412", "中華電", MarketSegment::Listed),
    ("2454", "聯發科", MarketSegment::Listed),
    ("2881", "富邦金", MarketSegment::Listed),
    ("2882", "國泰金", MarketSegment::Listed),
    ("2884", "玉山金", MarketSegment::Listed),
    ("2886", "兆豐金", MarketSegment::Listed),
    ("2891", "中信金", MarketSegment::Listed),
    ("2892", "第一金", MarketSegment::Listed),
    ("5880", "合庫金", MarketSegment::Listed),
    ("5483", "中美晶", MarketSegment::Otc),
    ("6488", "環球晶", MarketSegment::Otc),
];

pub fn fallback_listings() -> Vec<SecurityListing> {
    FALLBACK
        .iter()
        .map(|&(code, name, segment)| SecurityListing::new(code, name, segment))
        .collect()
}
