// Mon Oct 19 2026 - Alex

use crate::model::{ParamDef, Signature};
use crate::structure::{Alignment, ResolvedField, TypeInfo, VTable};
use std::collections::HashMap;
use std::fmt;

/// Non-virtual method visible on a class, own or inherited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodBinding {
    pub name: String,
    pub declared_in: String,
    pub signature: Signature,
}

/// Planned shape of one class: where every field lives, how big an
/// instance is, and which implementation fills each vtable slot.
///
/// The vtable pointer always occupies offset 0 and one machine word; it is
/// not part of `fields()`.
#[derive(Debug, Clone)]
pub struct ResolvedLayout {
    name: String,
    base: Option<String>,
    ancestors: Vec<String>,
    word_size: usize,
    fields: Vec<ResolvedField>,
    field_map: HashMap<String, usize>,
    data_end: usize,
    size: usize,
    alignment: Alignment,
    vtable: VTable,
    methods: Vec<MethodBinding>,
    constructor: Vec<ParamDef>,
}

impl ResolvedLayout {
    /// Layout of a class without a base: only the vtable pointer.
    pub fn root(name: &str, word_size: usize) -> Self {
        let alignment = Alignment::new(word_size).unwrap_or_default();
        Self {
            name: name.to_string(),
            base: None,
            ancestors: Vec::new(),
            word_size,
            fields: Vec::new(),
            field_map: HashMap::new(),
            data_end: word_size,
            size: alignment.round_up(word_size),
            alignment,
            vtable: VTable::new(name),
            methods: Vec::new(),
            constructor: Vec::new(),
        }
    }

    /// Starts a descendant layout from its base: every base field keeps its
    /// offset, the vtable keeps its slot order.
    pub fn derive(base: &ResolvedLayout, name: &str) -> Self {
        let mut ancestors = Vec::with_capacity(base.ancestors.len() + 1);
        ancestors.push(base.name.clone());
        ancestors.extend(base.ancestors.iter().cloned());

        Self {
            name: name.to_string(),
            base: Some(base.name.clone()),
            ancestors,
            word_size: base.word_size,
            fields: base.fields.clone(),
            field_map: base.field_map.clone(),
            data_end: base.data_end,
            size: base.size,
            alignment: base.alignment,
            vtable: VTable::inherit(&base.vtable, name),
            methods: base.methods.clone(),
            constructor: Vec::new(),
        }
    }

    /// Places a field after the last one, at its natural alignment.
    pub(crate) fn add_field(&mut self, name: &str, ty: TypeInfo, declared_in: &str) -> &ResolvedField {
        let size = ty.size(self.word_size);
        let alignment = Alignment::new(ty.alignment(self.word_size)).unwrap_or_default();
        let offset = alignment.round_up(self.data_end);

        let index = self.fields.len();
        self.fields.push(ResolvedField::new(name, ty, offset, size, alignment, declared_in));
        self.field_map.insert(name.to_string(), index);
        self.data_end = offset + size;
        self.recalculate_size();
        &self.fields[index]
    }

    fn recalculate_size(&mut self) {
        let word = Alignment::new(self.word_size).unwrap_or_default();
        self.alignment = self
            .fields
            .iter()
            .map(|f| f.alignment())
            .fold(word, |acc, a| acc.max(a));
        self.size = self.alignment.round_up(self.data_end);
    }

    pub(crate) fn vtable_mut(&mut self) -> &mut VTable {
        &mut self.vtable
    }

    pub(crate) fn bind_method(&mut self, binding: MethodBinding) {
        match self.methods.iter_mut().find(|m| m.name == binding.name) {
            Some(existing) => *existing = binding,
            None => self.methods.push(binding),
        }
    }

    pub(crate) fn unbind_method(&mut self, name: &str) {
        self.methods.retain(|m| m.name != name);
    }

    pub(crate) fn set_constructor(&mut self, params: Vec<ParamDef>) {
        self.constructor = params;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Ancestors, nearest first.
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    pub fn is_subclass_of(&self, class: &str) -> bool {
        self.name == class || self.ancestors.iter().any(|a| a == class)
    }

    pub fn word_size(&self) -> usize {
        self.word_size
    }

    pub fn vptr_offset(&self) -> usize {
        0
    }

    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    pub fn own_fields(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().filter(move |f| f.declared_in() == self.name)
    }

    pub fn get_field(&self, name: &str) -> Option<&ResolvedField> {
        self.field_map.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn vtable(&self) -> &VTable {
        &self.vtable
    }

    pub fn methods(&self) -> &[MethodBinding] {
        &self.methods
    }

    pub fn get_method(&self, name: &str) -> Option<&MethodBinding> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn constructor(&self) -> &[ParamDef] {
        &self.constructor
    }

    /// True when every field of `base` sits at the same offset here, which
    /// is what makes a pointer to this class usable as a pointer to `base`.
    pub fn is_layout_compatible_with(&self, base: &ResolvedLayout) -> bool {
        base.fields.iter().all(|bf| {
            self.get_field(bf.name())
                .map(|f| f.offset() == bf.offset() && f.ty() == bf.ty())
                .unwrap_or(false)
        }) && base.vtable.slots.iter().all(|bs| self.vtable.slot_index(&bs.method) == Some(bs.index))
    }
}

impl fmt::Display for ResolvedLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(base) = &self.base {
            write!(f, " : {}", base)?;
        }
        writeln!(f, " [size: {}, align: {}]", self.size, self.alignment)?;
        writeln!(f, "  vtable @ 0x{:x}", self.vptr_offset())?;
        for field in &self.fields {
            writeln!(f, "  {}", field)?;
        }
        write!(f, "{}", self.vtable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::PrimitiveType;

    #[test]
    fn test_root_layout_is_one_word() {
        let layout = ResolvedLayout::root("Object", 8);
        assert_eq!(layout.size(), 8);
        assert_eq!(layout.alignment().as_usize(), 8);
        assert!(layout.fields().is_empty());
        assert!(layout.vtable().is_empty());
    }

    #[test]
    fn test_fields_follow_vtable_pointer() {
        let mut layout = ResolvedLayout::root("Point", 8);
        layout.add_field("flag", TypeInfo::Primitive(PrimitiveType::Bool), "Point");
        layout.add_field("x", TypeInfo::int(), "Point");
        layout.add_field("next", TypeInfo::class("Point"), "Point");

        assert_eq!(layout.get_field("flag").unwrap().offset(), 8);
        assert_eq!(layout.get_field("x").unwrap().offset(), 12);
        assert_eq!(layout.get_field("next").unwrap().offset(), 16);
        assert_eq!(layout.size(), 24);
    }

    #[test]
    fn test_derived_continues_after_last_field() {
        let mut base = ResolvedLayout::root("Base", 8);
        base.add_field("a", TypeInfo::int(), "Base");
        assert_eq!(base.size(), 16);

        let mut derived = ResolvedLayout::derive(&base, "Derived");
        derived.add_field("b", TypeInfo::int(), "Derived");

        assert_eq!(derived.get_field("a").unwrap().offset(), 8);
        assert_eq!(derived.get_field("b").unwrap().offset(), 12);
        assert_eq!(derived.size(), 16);
        assert!(derived.is_layout_compatible_with(&base));
        assert!(derived.is_subclass_of("Base"));
        assert_eq!(derived.own_fields().count(), 1);
    }

    #[test]
    fn test_word_size_four() {
        let mut layout = ResolvedLayout::root("Small", 4);
        layout.add_field("c", TypeInfo::Primitive(PrimitiveType::U8), "Small");
        assert_eq!(layout.get_field("c").unwrap().offset(), 4);
        assert_eq!(layout.size(), 8);
    }
}
