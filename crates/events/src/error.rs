use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read event catalog: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid event in catalog: {0}")]
    InvalidEvent(#[from] core_types::CoreError),

    #[error("Event catalog is empty")]
    Empty,
}
