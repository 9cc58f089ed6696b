// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid type tag: {0:?}")]
    InvalidType(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed class model: {0}")]
    Json(#[from] serde_json::Error),
}
