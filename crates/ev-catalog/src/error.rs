use thiserror::Error;

use ev_core::EvError;

/// Load-time failures.  All of them are fatal to startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is missing required columns {missing:?} (found {found:?})")]
    MissingColumns {
        missing: Vec<&'static str>,
        found:   Vec<String>,
    },

    #[error("catalog row {row}: {message}")]
    Row { row: usize, message: String },

    #[error("duplicate area name {0:?}")]
    DuplicateName(String),

    #[error("area {name:?} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates { name: String, lat: f64, lon: f64 },

    #[error("catalog contains no areas")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] EvError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
