// Mon Oct 19 2026 - Alex

use crate::structure::ResolvedLayout;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Layouts published during a generation pass. A layout is immutable once
/// inserted; descendants read it through the shared `Arc`.
pub struct LayoutRegistry {
    layouts: RwLock<HashMap<String, Arc<ResolvedLayout>>>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self {
            layouts: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<ResolvedLayout>> {
        self.layouts.read().get(name).cloned()
    }

    pub fn publish(&self, layout: ResolvedLayout) -> Arc<ResolvedLayout> {
        let layout = Arc::new(layout);
        self.layouts.write().insert(layout.name().to_string(), layout.clone());
        layout
    }

    /// Point-in-time copy of the published layouts.
    pub fn snapshot(&self) -> HashMap<String, Arc<ResolvedLayout>> {
        self.layouts.read().clone()
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_snapshot() {
        let registry = LayoutRegistry::new();
        assert!(registry.snapshot().is_empty());
        let published = registry.publish(ResolvedLayout::root("Object", 8));
        assert_eq!(published.name(), "Object");

        let snapshot = registry.snapshot();
        registry.publish(ResolvedLayout::root("Other", 8));
        assert_eq!(snapshot.len(), 1);
        assert!(registry.get("Other").is_some());
        assert!(!snapshot.contains_key("Other"));
        assert!(Arc::ptr_eq(&snapshot["Object"], &registry.get("Object").unwrap()));
    }
}
