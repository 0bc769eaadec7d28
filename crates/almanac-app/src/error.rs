use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    RfcError(#[from] almanac_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),

    #[error("Failed to parse events: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type AppResult<T> = std::result::Result<T, AppError>;
