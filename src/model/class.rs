// Mon Oct 19 2026 - Alex

use crate::model::MethodDef;
use crate::structure::type_info::TypeInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInfo,
}

impl FieldDef {
    pub fn new(name: &str, ty: TypeInfo) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInfo,
}

impl ParamDef {
    pub fn new(name: &str, ty: TypeInfo) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

/// A class as handed over by the front-end. Bases are referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    /// Explicit constructor parameters. `None` means one parameter per
    /// resolved field, in layout order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Vec<ParamDef>>,
}

impl ClassDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructor: None,
        }
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    pub fn with_field(mut self, name: &str, ty: TypeInfo) -> Self {
        self.fields.push(FieldDef::new(name, ty));
        self
    }

    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, params: Vec<ParamDef>) -> Self {
        self.constructor = Some(params);
        self
    }

    pub fn is_root(&self) -> bool {
        self.base.is_none()
    }

    pub fn get_method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn virtual_methods(&self) -> impl Iterator<Item = &MethodDef> {
        self.methods.iter().filter(|m| m.is_virtual)
    }
}
