//! Error types for the character generation engine

use thiserror::Error;

use crate::attributes::PointBuyError;

/// Main error type for the character generation engine
#[derive(Error, Debug)]
pub enum ChargenError {
    #[error("Invalid dice spec: {0}")]
    InvalidDiceSpec(String),

    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    #[error("Track not found: {0}")]
    TrackNotFound(String),

    #[error("Invalid track data: {0}")]
    InvalidTrackData(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Point-buy rejected: {0}")]
    PointBuy(#[from] PointBuyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "python")]
impl From<ChargenError> for pyo3::PyErr {
    fn from(err: ChargenError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyOSError, PyValueError};

        match err {
            ChargenError::InvalidDiceSpec(msg) => {
                PyValueError::new_err(format!("Invalid dice spec: {}", msg))
            }
            ChargenError::InvalidAttribute(name) => {
                PyKeyError::new_err(format!("Invalid attribute: {}", name))
            }
            ChargenError::TrackNotFound(id) => {
                PyKeyError::new_err(format!("Track not found: {}", id))
            }
            ChargenError::InvalidTrackData(msg) => {
                PyValueError::new_err(format!("Invalid track data: {}", msg))
            }
            ChargenError::InvalidConfig(msg) => {
                PyValueError::new_err(format!("Invalid config: {}", msg))
            }
            ChargenError::PointBuy(e) => PyValueError::new_err(e.to_string()),
            ChargenError::Io(e) => PyOSError::new_err(e.to_string()),
            ChargenError::Json(e) => PyValueError::new_err(format!("JSON error: {}", e)),
        }
    }
}

/// Result type alias for the character generation engine
pub type Result<T> = std::result::Result<T, ChargenError>;
