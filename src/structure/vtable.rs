// Mon Oct 19 2026 - Alex

use crate::model::Signature;
use std::fmt;

/// Represents a single slot in a virtual table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VTableSlot {
    /// Index in the vtable (0-based), fixed for the whole inheritance chain
    pub index: usize,
    /// Method name the slot dispatches
    pub method: String,
    /// The class that first introduced this slot
    pub introduced_by: String,
    /// The class whose implementation currently fills the slot
    pub implemented_by: String,
    /// Signature shared by every implementation of the slot
    pub signature: Signature,
}

impl VTableSlot {
    pub fn new(index: usize, method: &str, class: &str, signature: Signature) -> Self {
        Self {
            index,
            method: method.to_string(),
            introduced_by: class.to_string(),
            implemented_by: class.to_string(),
            signature,
        }
    }

    /// Whether the implementation differs from the introducing class.
    pub fn is_override(&self) -> bool {
        self.introduced_by != self.implemented_by
    }
}

impl fmt::Display for VTableSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let override_mark = if self.is_override() { " [override]" } else { "" };
        write!(
            f,
            "[{}] {}::{}{}{}",
            self.index, self.implemented_by, self.method, self.signature, override_mark
        )
    }
}

/// Virtual-method table of one class, in slot order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VTable {
    /// Name of the class this vtable belongs to
    pub class_name: String,
    /// All slots, own and inherited
    pub slots: Vec<VTableSlot>,
}

impl VTable {
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            slots: Vec::new(),
        }
    }

    /// Copy of an ancestor table re-owned by a descendant. Slot order and
    /// implementations are kept until overridden.
    pub fn inherit(base: &VTable, class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            slots: base.slots.clone(),
        }
    }

    /// Adds a slot at the end and returns its index.
    pub fn append(&mut self, method: &str, signature: Signature) -> usize {
        let index = self.slots.len();
        self.slots.push(VTableSlot::new(index, method, &self.class_name, signature));
        index
    }

    /// Points an existing slot at this class's implementation. The index
    /// never moves.
    pub fn override_slot(&mut self, index: usize) -> Option<&VTableSlot> {
        let class_name = self.class_name.clone();
        let slot = self.slots.get_mut(index)?;
        slot.implemented_by = class_name;
        Some(slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get_slot(&self, index: usize) -> Option<&VTableSlot> {
        self.slots.get(index)
    }

    pub fn find(&self, method: &str) -> Option<&VTableSlot> {
        self.slots.iter().find(|s| s.method == method)
    }

    pub fn slot_index(&self, method: &str) -> Option<usize> {
        self.find(method).map(|s| s.index)
    }

    pub fn override_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_override()).count()
    }
}

impl fmt::Display for VTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VTable for {}", self.class_name)?;
        writeln!(f, "  Slots: {}", self.slots.len())?;
        for slot in &self.slots {
            writeln!(f, "  {}", slot)?;
        }
        Ok(())
    }
}
