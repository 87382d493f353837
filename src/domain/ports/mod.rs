pub mod metric_provider;
pub mod roster_source;
