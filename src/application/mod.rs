pub mod evaluate;
pub mod export;
pub mod load_roster;
pub mod probe;
pub mod rate_limiter;
pub mod roster_cache;
pub mod roster_parser;
pub mod scan;
