pub mod listing;
pub mod scan_result;
