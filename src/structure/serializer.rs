// Mon Oct 19 2026 - Alex

use crate::structure::ResolvedLayout;
use serde::{Deserialize, Serialize};

/// JSON view of a resolved layout, as written by `classgen layout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLayout {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    pub size: usize,
    pub alignment: usize,
    pub vtable_offset: usize,
    pub fields: Vec<SerializableField>,
    pub vtable: Vec<SerializableSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub offset: usize,
    pub size: usize,
    pub alignment: usize,
    pub declared_in: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableSlot {
    pub index: usize,
    pub method: String,
    pub introduced_by: String,
    pub implemented_by: String,
}

impl From<&ResolvedLayout> for SerializableLayout {
    fn from(layout: &ResolvedLayout) -> Self {
        Self {
            name: layout.name().to_string(),
            base: layout.base().map(str::to_string),
            size: layout.size(),
            alignment: layout.alignment().as_usize(),
            vtable_offset: layout.vptr_offset(),
            fields: layout.fields().iter().map(|f| SerializableField {
                name: f.name().to_string(),
                ty: f.ty().to_string(),
                offset: f.offset(),
                size: f.size(),
                alignment: f.alignment().as_usize(),
                declared_in: f.declared_in().to_string(),
            }).collect(),
            vtable: layout.vtable().slots.iter().map(|s| SerializableSlot {
                index: s.index,
                method: s.method.clone(),
                introduced_by: s.introduced_by.clone(),
                implemented_by: s.implemented_by.clone(),
            }).collect(),
        }
    }
}
