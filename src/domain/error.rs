use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Roster source unreachable, non-200 status, or no table in the page.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Roster table did not have the expected structure.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No tradable quote for a ticker, or the provider call failed.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Export(e.to_string())
    }
}
