// Mon Oct 19 2026 - Alex

use crate::model::{Literal, ParamDef};
use crate::structure::type_info::TypeInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pre-lowered method body. The generator never parses source; the
/// front-end hands over one of these shapes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodBody {
    ReturnField(String),
    ReturnValue(Literal),
    AssignField { field: String, param: String },
    /// Definition supplied at link time; only a prototype is generated.
    Extern,
    #[default]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamDef>,
    #[serde(default)]
    pub returns: TypeInfo,
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
    #[serde(default)]
    pub body: MethodBody,
}

impl MethodDef {
    pub fn new(name: &str, returns: TypeInfo) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
            returns,
            is_virtual: false,
            body: MethodBody::Empty,
        }
    }

    pub fn virtual_method(name: &str, returns: TypeInfo) -> Self {
        Self::new(name, returns).with_virtual()
    }

    pub fn with_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn with_param(mut self, name: &str, ty: TypeInfo) -> Self {
        self.params.push(ParamDef::new(name, ty));
        self
    }

    pub fn with_body(mut self, body: MethodBody) -> Self {
        self.body = body;
        self
    }

    pub fn signature(&self) -> Signature {
        Signature {
            params: self.params.clone(),
            returns: self.returns.clone(),
        }
    }
}

/// Parameter list and return type of a method, excluding `self`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<ParamDef>,
    pub returns: TypeInfo,
}

impl Signature {
    /// Two signatures match when parameter and return types agree;
    /// parameter names are irrelevant.
    pub fn matches(&self, other: &Signature) -> bool {
        self.returns == other.returns
            && self.params.len() == other.params.len()
            && self.params.iter().zip(&other.params).all(|(a, b)| a.ty == b.ty)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
        }
        write!(f, ") -> {}", self.returns)
    }
}
