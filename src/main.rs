use clap::Parser;
use std::time::Duration;
use value_radar::application::export::{export_file_name, export_to_path};
use value_radar::application::roster_cache::RosterOrigin;
use value_radar::cli::commands::{Cli, Commands};
use value_radar::config::Config;
use value_radar::domain::values::criteria::FilterCriteria;
use value_radar::logging::init_logging;
use value_radar::ValueRadar;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = init_logging(&config.log_level, &config.log_format) {
        eprintln!("Warning: {e}");
    }

    if let Err(e) = run_command(config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(mut config: Config, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Roster { limit, refresh } => {
            let radar = ValueRadar::new(&config)?;
            let roster = if refresh {
                radar.refresh_listings().await
            } else {
                radar.listings().await
            };
            report_roster_status(roster.origin, roster.listings.len(), roster.warning.as_deref());
            let shown = limit.unwrap_or(roster.listings.len()).min(roster.listings.len());
            println!("{}", serde_json::to_string_pretty(&roster.listings[..shown])?);
        }
        Commands::Scan {
            start,
            end,
            max_pe,
            max_pb,
            min_yield,
            min_roe,
            pacing_ms,
            concurrency,
            csv,
        } => {
            if let Some(ms) = pacing_ms {
                config.pacing = Duration::from_millis(ms);
            }
            if let Some(c) = concurrency {
                config.concurrency = c;
            }
            let criteria = FilterCriteria::new(max_pe, max_pb, min_yield, min_roe)?;
            let radar = ValueRadar::new(&config)?;

            let (roster, report) = radar
                .scan(start..end, &criteria, |p| {
                    eprint!("\rScanning {}/{}", p.processed, p.total);
                })
                .await?;
            eprintln!();
            report_roster_status(roster.origin, roster.listings.len(), roster.warning.as_deref());

            eprintln!(
                "Scanned {} securities [{}..{}): {} passed, {} rejected, {} without data",
                report.total,
                report.start,
                report.end,
                report.results.len(),
                report.rejected,
                report.failures
            );
            if report.suspected_throttling {
                eprintln!("Warning: most lookups failed; the provider may be blocking requests. Try `value-radar probe`.");
            }
            if report.results.is_empty() {
                eprintln!("No securities matched. Widen the criteria or scan another range.");
            }

            if let Some(path) = csv {
                let path = path.unwrap_or_else(|| export_file_name(Some(&(report.start..report.end))).into());
                export_to_path(&report.results, &path)?;
                eprintln!("Wrote {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&report.results)?);
        }
        Commands::Probe { ticker } => {
            let radar = ValueRadar::new(&config)?;
            let report = radar.probe(ticker.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn report_roster_status(origin: RosterOrigin, count: usize, warning: Option<&str>) {
    match origin {
        RosterOrigin::Live => eprintln!("Loaded {count} listed and OTC securities"),
        RosterOrigin::Fallback => eprintln!(
            "Warning: {}",
            warning.unwrap_or("roster unavailable, using fallback list")
        ),
    }
}
