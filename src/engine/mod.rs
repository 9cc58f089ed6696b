// Mon Oct 19 2026 - Alex

pub mod driver;
pub mod error;
pub mod report;

pub use driver::Driver;
pub use error::EngineError;
pub use report::{GenerationFailure, GenerationReport, PlanReport};
