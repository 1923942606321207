use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Unknown benchmark '{0}' (expected WTI or Brent)")]
    UnknownBenchmark(String),

    #[error("Unknown event category '{0}'")]
    UnknownCategory(String),
}
