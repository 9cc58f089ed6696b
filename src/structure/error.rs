// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("Class {class}: base class {base} is not resolved")]
    UnresolvedBase { class: String, base: String },
    #[error("Class {class}: field {field} is already declared by {declared_in}")]
    DuplicateField { class: String, field: String, declared_in: String },
    #[error("Class {class}: method {method} is declared more than once")]
    DuplicateMethod { class: String, method: String },
    #[error("Class {class}: override of {method} changes its signature from {expected} to {found}")]
    SignatureMismatch { class: String, method: String, expected: String, found: String },
    #[error("Class {class}: inheritance cycle through {}", .cycle.join(" -> "))]
    CyclicInheritance { class: String, cycle: Vec<String> },
    #[error("Class {0} is defined more than once")]
    DuplicateClass(String),
    #[error("Class {class}: unknown type {ty} in {context}")]
    UnknownType { class: String, ty: String, context: String },
    #[error("Class {class}: {context} cannot have type void")]
    VoidValue { class: String, context: String },
    #[error("Class {class}: {name:?} is not a valid identifier")]
    InvalidIdentifier { class: String, name: String },
    #[error("Class {class}: {name} is a reserved name")]
    ReservedName { class: String, name: String },
    #[error("Class {class}: method {method} refers to unknown field {field}")]
    UnknownField { class: String, method: String, field: String },
    #[error("Class {class}: method {method} refers to unknown parameter {param}")]
    UnknownParameter { class: String, method: String, param: String },
    #[error("Class {class}: {first} and {second} both generate the C function {symbol}")]
    NameClash { class: String, symbol: String, first: String, second: String },
    #[error("Class {class}: layout check failed: {reason}")]
    ValidationFailed { class: String, reason: String },
}

impl StructureError {
    /// Class the error is reported against.
    pub fn class(&self) -> &str {
        match self {
            Self::UnresolvedBase { class, .. }
            | Self::DuplicateField { class, .. }
            | Self::DuplicateMethod { class, .. }
            | Self::SignatureMismatch { class, .. }
            | Self::CyclicInheritance { class, .. }
            | Self::UnknownType { class, .. }
            | Self::VoidValue { class, .. }
            | Self::InvalidIdentifier { class, .. }
            | Self::ReservedName { class, .. }
            | Self::UnknownField { class, .. }
            | Self::UnknownParameter { class, .. }
            | Self::NameClash { class, .. }
            | Self::ValidationFailed { class, .. } => class,
            Self::DuplicateClass(class) => class,
        }
    }
}
