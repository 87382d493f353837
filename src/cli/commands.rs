use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "value-radar", about = "Value-investing screener for Taiwan-listed equities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the exchange roster (listed + OTC) and print it
    Roster {
        /// Print at most this many listings
        #[arg(long)]
        limit: Option<usize>,
        /// Ignore the cached roster
        #[arg(long)]
        refresh: bool,
    },
    /// Screen a slice of the roster against value thresholds
    Scan {
        /// First roster index (inclusive)
        #[arg(long, default_value = "0")]
        start: usize,
        /// Last roster index (exclusive)
        #[arg(long, default_value = "100")]
        end: usize,
        /// Maximum trailing P/E
        #[arg(long, default_value = "15")]
        max_pe: f64,
        /// Maximum price-to-book
        #[arg(long, default_value = "1.5")]
        max_pb: f64,
        /// Minimum dividend yield (%)
        #[arg(long, default_value = "4")]
        min_yield: f64,
        /// Minimum return on equity (%)
        #[arg(long, default_value = "10")]
        min_roe: f64,
        /// Milliseconds between provider requests (overrides RADAR_PACING_MS)
        #[arg(long)]
        pacing_ms: Option<u64>,
        /// Concurrent provider requests (overrides RADAR_CONCURRENCY)
        #[arg(long)]
        concurrency: Option<usize>,
        /// Write results as CSV; without a path, value_stocks_{start}_{end}.csv
        #[arg(long, num_args = 0..=1)]
        csv: Option<Option<PathBuf>>,
    },
    /// Connectivity self-test: print the raw provider snapshot for one ticker
    Probe {
        /// Provider ticker to query (defaults to 2330.TW)
        #[arg(long)]
        ticker: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_test_ticker_is_optional() {
        let cli = Cli::try_parse_from(["value-radar", "probe"]).unwrap();
        assert!(matches!(cli.command, Commands::Probe { ticker: None }));

        let cli = Cli::try_parse_from(["value-radar", "probe", "--ticker", "6488.TWO"]).unwrap();
        match cli.command {
            Commands::Probe { ticker } => assert_eq!(ticker.as_deref(), Some("6488.TWO")),
            _ => panic!("expected probe"),
        }
    }
}
