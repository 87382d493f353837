pub mod criteria;
pub mod raw_table;
pub mod segment;
pub mod snapshot;
