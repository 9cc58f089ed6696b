// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("main: unknown variable {0}")]
    UnknownVariable(String),
    #[error("main: unknown class {0}")]
    UnknownClass(String),
    #[error("main: class {class} has no field {field}")]
    UnknownField { class: String, field: String },
    #[error("main: class {class} has no method {method}")]
    UnknownMethod { class: String, method: String },
    #[error("main: {0} is not a class instance")]
    NotAnInstance(String),
    #[error("main: {callee} expects {expected} arguments, got {found}")]
    ArityMismatch { callee: String, expected: usize, found: usize },
    #[error("main: {0} has no value")]
    VoidExpression(String),
    #[error("main: variable {0} is already declared")]
    Redeclared(String),
    #[error("main: {0} cannot be used as a variable name")]
    InvalidName(String),
    #[error("main: variable {0} cannot have type void")]
    VoidVariable(String),
    #[error("main: {context} expects {expected}, got {found}")]
    TypeMismatch { context: String, expected: String, found: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
