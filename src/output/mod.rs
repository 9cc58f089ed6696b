// Mon Oct 19 2026 - Alex

pub mod c_emitter;
pub mod c_types;
pub mod entry;
pub mod error;
pub mod naming;
pub mod sink;
pub mod unit;
pub mod writer;

pub use c_emitter::{CEmitter, ClassSource};
pub use entry::EntryEmitter;
pub use error::{OutputError, OutputResult};
pub use sink::OutputSink;
pub use unit::TranslationUnit;
pub use writer::SourceWriter;

use crate::config::Config;

/// Switches controlling what the emitter produces beyond the required
/// struct, constructor and thunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub accessors: bool,
    pub destructors: bool,
    pub comments: bool,
    pub layout_asserts: bool,
    pub indent_width: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            accessors: true,
            destructors: true,
            comments: true,
            layout_asserts: false,
            indent_width: 4,
        }
    }
}

impl From<&Config> for EmitOptions {
    fn from(config: &Config) -> Self {
        Self {
            accessors: config.emit_accessors,
            destructors: config.emit_destructors,
            comments: config.emit_comments,
            layout_asserts: config.emit_layout_asserts,
            indent_width: config.indent_width,
        }
    }
}
