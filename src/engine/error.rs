// Mon Oct 19 2026 - Alex

use crate::output::OutputError;
use crate::structure::StructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error("Class {class}: base class {base} failed")]
    BaseFailed { class: String, base: String },
    #[error(transparent)]
    Program(#[from] OutputError),
    #[error("Thread pool: {0}")]
    ThreadPool(String),
}

impl EngineError {
    pub fn is_base_failure(&self) -> bool {
        matches!(self, Self::BaseFailed { .. })
    }
}
