//! Tracing subscriber setup. Logs go to stderr; stdout carries command output.

use crate::domain::error::DomainError;
use tracing_subscriber::EnvFilter;

/// HTTP stack modules pinned to `warn` unless `RUST_LOG` says otherwise.
pub const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls", "html5ever", "selectors"];

fn build_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let mut directives = String::from(log_level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{module}=warn"));
    }
    EnvFilter::new(directives)
}

/// Install the global subscriber. `log_format` is "json" or "pretty".
pub fn init_logging(log_level: &str, log_format: &str) -> Result<(), DomainError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(log_level))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| DomainError::Config(format!("logging already initialized: {e}")))
}
