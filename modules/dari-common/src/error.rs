use thiserror::Error;

#[derive(Error, Debug)]
pub enum DariError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Amenity source error: {0}")]
    SourceFetch(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
