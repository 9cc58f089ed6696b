// Mon Oct 19 2026 - Alex

pub mod class;
pub mod error;
pub mod literal;
pub mod method;
pub mod program;

pub use class::{ClassDef, FieldDef, ParamDef};
pub use error::ModelError;
pub use literal::Literal;
pub use method::{MethodBody, MethodDef, Signature};
pub use program::{CallExpr, ClassModel, Expr, FieldRef, Statement};

pub use crate::structure::type_info::{PrimitiveType, TypeInfo};
