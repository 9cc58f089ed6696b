// Mon Oct 19 2026 - Alex

use crate::engine::EngineError;
use crate::structure::{HierarchyStats, ResolvedLayout, SerializableLayout};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// One class (or `main`) that could not be generated.
#[derive(Debug)]
pub struct GenerationFailure {
    pub subject: String,
    pub error: EngineError,
}

impl GenerationFailure {
    pub fn new(subject: &str, error: impl Into<EngineError>) -> Self {
        Self {
            subject: subject.to_string(),
            error: error.into(),
        }
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

#[derive(Debug)]
pub struct PlanReport {
    /// Successfully planned layouts, base before derived.
    pub layouts: IndexMap<String, Arc<ResolvedLayout>>,
    pub failures: Vec<GenerationFailure>,
    pub stats: HierarchyStats,
}

impl PlanReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn get(&self, class: &str) -> Option<&ResolvedLayout> {
        self.layouts.get(class).map(Arc::as_ref)
    }

    pub fn failure_for(&self, subject: &str) -> Option<&GenerationFailure> {
        self.failures.iter().find(|f| f.subject == subject)
    }

    pub fn layout_map(&self) -> HashMap<String, Arc<ResolvedLayout>> {
        self.layouts
            .iter()
            .map(|(name, layout)| (name.clone(), layout.clone()))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let layouts: Vec<SerializableLayout> = self
            .layouts
            .values()
            .map(|layout| SerializableLayout::from(layout.as_ref()))
            .collect();
        serde_json::to_string_pretty(&layouts)
    }
}

#[derive(Debug)]
pub struct GenerationReport {
    /// The translation unit. Contains every class that succeeded even when
    /// others failed.
    pub source: String,
    pub plan: PlanReport,
    /// Entry-program failure, reported separately from class failures.
    pub main_failure: Option<GenerationFailure>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.plan.is_complete() && self.main_failure.is_none()
    }

    pub fn failures(&self) -> impl Iterator<Item = &GenerationFailure> {
        self.plan.failures.iter().chain(self.main_failure.iter())
    }

    pub fn failure_count(&self) -> usize {
        self.plan.failures.len() + usize::from(self.main_failure.is_some())
    }

    pub fn generated_classes(&self) -> impl Iterator<Item = &str> {
        self.plan.layouts.keys().map(String::as_str)
    }
}
