// Mon Oct 19 2026 - Alex

pub mod config;
pub mod engine;
pub mod model;
pub mod output;
pub mod structure;
pub mod ui;
pub mod utils;

pub use config::{Config, ConfigError};
pub use engine::{Driver, EngineError, GenerationReport, PlanReport};
pub use model::{ClassDef, ClassModel, MethodDef, TypeInfo};
pub use output::{CEmitter, EmitOptions, OutputError};
pub use structure::{LayoutPlanner, ResolvedLayout, StructureError};
