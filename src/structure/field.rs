// Mon Oct 19 2026 - Alex

use crate::structure::{Alignment, TypeInfo};
use std::fmt;

/// A field after layout: its position inside the instance and the class
/// that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    name: String,
    ty: TypeInfo,
    offset: usize,
    size: usize,
    alignment: Alignment,
    declared_in: String,
}

impl ResolvedField {
    pub fn new(name: &str, ty: TypeInfo, offset: usize, size: usize, alignment: Alignment, declared_in: &str) -> Self {
        Self {
            name: name.to_string(),
            ty,
            offset,
            size,
            alignment,
            declared_in: declared_in.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeInfo {
        &self.ty
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn end_offset(&self) -> usize {
        self.offset + self.size
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn declared_in(&self) -> &str {
        &self.declared_in
    }
}

impl fmt::Display for ResolvedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ 0x{:x}: {} (from {})", self.name, self.offset, self.ty, self.declared_in)
    }
}
