use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Moving average window must be a positive number of observations, got {0}")]
    InvalidWindow(usize),

    #[error("Moving average window {0} is configured more than once")]
    DuplicateWindow(usize),

    #[error("At least one moving average window is required")]
    NoWindows,

    #[error("Impact horizon must be at least one day, got {0}")]
    InvalidHorizon(u32),
}
