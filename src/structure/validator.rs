// Mon Oct 19 2026 - Alex

use crate::model::{ClassDef, ParamDef};
use crate::structure::{ResolvedLayout, StructureError, TypeInfo};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Names the generated C code already uses, the C grammar forbids, or the
/// included headers declare.
const RESERVED: &[&str] = &[
    "vtable", "self", "self_base", "obj", "main", "vfn_t", "auto", "break", "case", "char", "const",
    "continue", "default", "do", "double", "else", "enum", "extern", "float", "for", "goto", "if", "inline",
    "int", "long", "register", "restrict", "return", "short", "signed", "sizeof", "static",
    "struct", "switch", "typedef", "union", "unsigned", "void", "volatile", "while", "bool",
    "true", "false", "NULL", "malloc", "free", "exit", "printf", "fprintf", "stderr", "stdout",
    "offsetof", "size_t", "ptrdiff_t", "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t",
    "uint16_t", "uint32_t", "uint64_t", "intptr_t", "uintptr_t",
];

/// Checks a class against the rules the planner relies on: C-safe names and
/// type references that point at known classes.
pub struct StructureValidator {
    known_classes: HashSet<String>,
}

impl StructureValidator {
    pub fn new<'a>(known_classes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            known_classes: known_classes.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn validate_class(&self, class: &ClassDef) -> Result<(), StructureError> {
        let owner = class.name.as_str();
        self.check_name(owner, owner)?;

        for field in &class.fields {
            self.check_value_name(owner, &field.name)?;
            self.check_value_type(owner, &field.ty, &format!("field {}", field.name))?;
        }

        for method in &class.methods {
            self.check_name(owner, &method.name)?;
            self.check_params(owner, &method.params, &format!("method {}", method.name))?;
            if !method.returns.is_void() {
                self.check_type(owner, &method.returns, &format!("return of {}", method.name))?;
            }
        }

        if let Some(params) = &class.constructor {
            self.check_params(owner, params, "constructor")?;
        }
        Ok(())
    }

    fn check_params(&self, owner: &str, params: &[ParamDef], context: &str) -> Result<(), StructureError> {
        let mut seen = HashSet::new();
        for param in params {
            self.check_value_name(owner, &param.name)?;
            if !seen.insert(param.name.as_str()) {
                return Err(StructureError::ValidationFailed {
                    class: owner.to_string(),
                    reason: format!("{} declares parameter {} twice", context, param.name),
                });
            }
            self.check_value_type(owner, &param.ty, &format!("parameter {} of {}", param.name, context))?;
        }
        Ok(())
    }

    fn check_name(&self, owner: &str, name: &str) -> Result<(), StructureError> {
        if !Self::is_identifier(name) {
            return Err(StructureError::InvalidIdentifier {
                class: owner.to_string(),
                name: name.to_string(),
            });
        }
        if Self::is_reserved(name) {
            return Err(StructureError::ReservedName {
                class: owner.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Fields and parameters end up as C locals (fields through the default
    /// constructor), so they must not hide a generated type or function.
    fn check_value_name(&self, owner: &str, name: &str) -> Result<(), StructureError> {
        self.check_name(owner, name)?;
        if self.shadows_generated(name) {
            return Err(StructureError::ReservedName {
                class: owner.to_string(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn is_identifier(name: &str) -> bool {
        IDENTIFIER.is_match(name)
    }

    pub fn is_reserved(name: &str) -> bool {
        RESERVED.contains(&name)
    }

    /// True when a local named `name` would hide a class typedef or one of
    /// the `create_X`, `destroy_X` or `X_*` functions.
    pub fn shadows_generated(&self, name: &str) -> bool {
        if self.known_classes.contains(name) {
            return true;
        }
        let lifecycle = ["create_", "destroy_"]
            .iter()
            .filter_map(|prefix| name.strip_prefix(prefix))
            .any(|rest| self.known_classes.contains(rest));
        lifecycle
            || self
                .known_classes
                .iter()
                .any(|class| name.strip_prefix(class.as_str()).map_or(false, |rest| rest.starts_with('_')))
    }

    fn check_value_type(&self, owner: &str, ty: &TypeInfo, context: &str) -> Result<(), StructureError> {
        if ty.is_void() {
            return Err(StructureError::VoidValue {
                class: owner.to_string(),
                context: context.to_string(),
            });
        }
        self.check_type(owner, ty, context)
    }

    fn check_type(&self, owner: &str, ty: &TypeInfo, context: &str) -> Result<(), StructureError> {
        match ty.referenced_class() {
            Some(name) if !self.known_classes.contains(name) => Err(StructureError::UnknownType {
                class: owner.to_string(),
                ty: ty.to_string(),
                context: context.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Post-planning sanity check: every field aligned, no overlap, nothing
    /// placed over the vtable pointer.
    pub fn validate_layout(layout: &ResolvedLayout) -> Result<(), StructureError> {
        let mut cursor = layout.vptr_offset() + layout.word_size();
        for field in layout.fields() {
            let reason = if !field.alignment().is_aligned(field.offset()) {
                Some(format!("field {} is not aligned", field.name()))
            } else if field.offset() < cursor {
                Some(format!("field {} overlaps the previous member", field.name()))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(StructureError::ValidationFailed {
                    class: layout.name().to_string(),
                    reason,
                });
            }
            cursor = field.end_offset();
        }
        if cursor > layout.size() || !layout.alignment().is_aligned(layout.size()) {
            return Err(StructureError::ValidationFailed {
                class: layout.name().to_string(),
                reason: format!("size {} does not cover the fields", layout.size()),
            });
        }
        Ok(())
    }
}
