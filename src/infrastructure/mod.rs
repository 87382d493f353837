pub mod metrics;
pub mod roster;
