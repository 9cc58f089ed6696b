// Mon Oct 19 2026 - Alex

use crate::model::{ClassDef, Literal, ModelError};
use crate::structure::type_info::TypeInfo;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Input to the generator: the classes plus an optional entry program.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassModel {
    #[serde(default)]
    pub classes: Vec<ClassDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<Vec<Statement>>,
}

impl ClassModel {
    pub fn new(classes: Vec<ClassDef>) -> Self {
        Self { classes, main: None }
    }

    pub fn with_main(mut self, statements: Vec<Statement>) -> Self {
        self.main = Some(statements);
        self
    }

    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = fs::read_to_string(path)?;
        let model = Self::from_json(&text)?;
        log::debug!("Loaded {} classes from {}", model.classes.len(), path.display());
        Ok(model)
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.iter().find(|c| c.name == name)
    }
}

/// Statement of the pre-lowered entry program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    New {
        var: String,
        class: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    Let {
        var: String,
        #[serde(rename = "type")]
        ty: TypeInfo,
        value: Expr,
    },
    Print(Expr),
    /// Method call whose result, if any, is discarded.
    Call(CallExpr),
    Delete(String),
    /// Exit status of `main`.
    Return(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    Literal(Literal),
    Var { var: String },
    Field { field: FieldRef },
    Call { call: CallExpr },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRef {
    pub var: String,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub var: String,
    pub method: String,
    #[serde(default)]
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn var(name: &str) -> Self {
        Self::Var { var: name.to_string() }
    }

    pub fn field(var: &str, field: &str) -> Self {
        Self::Field {
            field: FieldRef {
                var: var.to_string(),
                field: field.to_string(),
            },
        }
    }

    pub fn call(var: &str, method: &str, args: Vec<Expr>) -> Self {
        Self::Call {
            call: CallExpr {
                var: var.to_string(),
                method: method.to_string(),
                args,
            },
        }
    }

    pub fn int(value: i64) -> Self {
        Self::Literal(Literal::Int(value))
    }
}
