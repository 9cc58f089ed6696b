// Mon Oct 19 2026 - Alex

use crate::model::ClassDef;
use crate::structure::StructureError;
use indexmap::IndexMap;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::fmt;

/// Represents a node in the class hierarchy tree
#[derive(Debug, Clone)]
pub struct ClassNode {
    /// Name of the class
    pub name: String,
    /// Declared base class, if any
    pub parent: Option<String>,
    /// Direct child classes, in declaration order
    pub children: Vec<String>,
    /// Position of the class in the input model
    pub position: usize,
}

impl ClassNode {
    pub fn new(name: &str, parent: Option<&str>, position: usize) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            children: Vec::new(),
            position,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Result of ordering the hierarchy. Classes caught in a cycle, and every
/// class below one, are left out of `order` and `levels`.
#[derive(Debug, Clone, Default)]
pub struct HierarchyOrder {
    /// Base-before-derived order, ties broken by input position
    pub order: Vec<String>,
    /// Classes grouped by depth; every class in level `n` only depends on
    /// classes in earlier levels
    pub levels: Vec<Vec<String>>,
    /// One error per class that is part of an inheritance cycle
    pub cyclic: Vec<StructureError>,
    /// Classes below a cycle, with the cyclic ancestor that blocks them
    pub blocked: Vec<(String, String)>,
}

impl HierarchyOrder {
    pub fn is_acyclic(&self) -> bool {
        self.cyclic.is_empty()
    }
}

/// Represents the complete single-inheritance hierarchy of a model
#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    classes: IndexMap<String, ClassNode>,
}

impl ClassHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class. A second definition with the same name is rejected and
    /// the first one stays.
    pub fn add_class(&mut self, class: &ClassDef) -> Result<(), StructureError> {
        if self.classes.contains_key(&class.name) {
            return Err(StructureError::DuplicateClass(class.name.clone()));
        }
        let position = self.classes.len();
        self.classes.insert(
            class.name.clone(),
            ClassNode::new(&class.name, class.base.as_deref(), position),
        );
        if let Some(base) = &class.base {
            if let Some(parent) = self.classes.get_mut(base) {
                parent.children.push(class.name.clone());
            }
        }
        // Children declared before their base are linked here.
        let name = class.name.clone();
        let early_children: Vec<String> = self
            .classes
            .values()
            .filter(|n| n.parent.as_deref() == Some(name.as_str()) && n.name != name)
            .map(|n| n.name.clone())
            .collect();
        if let Some(node) = self.classes.get_mut(&name) {
            for child in early_children {
                if !node.children.contains(&child) {
                    node.children.push(child);
                }
            }
        }
        Ok(())
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassNode> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Parent of a class when that parent is part of the hierarchy.
    fn known_parent(&self, name: &str) -> Option<&str> {
        self.classes
            .get(name)
            .and_then(|n| n.parent.as_deref())
            .filter(|p| self.classes.contains_key(*p))
    }

    /// Ancestors of a class, nearest first. Stops at the first repeat so a
    /// cycle cannot loop forever.
    pub fn ancestors(&self, name: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(name.to_string());
        let mut current = self.known_parent(name);
        while let Some(parent) = current {
            if !seen.insert(parent.to_string()) {
                break;
            }
            chain.push(parent.to_string());
            current = self.known_parent(parent);
        }
        chain
    }

    /// All classes below `name`, breadth first.
    pub fn descendants(&self, name: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        visited.insert(name.to_string());

        if let Some(node) = self.classes.get(name) {
            queue.extend(node.children.iter().map(String::as_str));
        }
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.to_string()) {
                continue;
            }
            result.push(current.to_string());
            if let Some(node) = self.classes.get(current) {
                queue.extend(node.children.iter().map(String::as_str));
            }
        }
        result
    }

    /// Walks the parent chain from `name`; returns the cycle if the walk
    /// comes back to `name`.
    fn cycle_through(&self, name: &str) -> Option<Vec<String>> {
        let mut path = vec![name.to_string()];
        let mut seen = HashSet::new();
        seen.insert(name);
        let mut current = self.known_parent(name);
        while let Some(parent) = current {
            path.push(parent.to_string());
            if parent == name {
                return Some(path);
            }
            if !seen.insert(parent) {
                return None;
            }
            current = self.known_parent(parent);
        }
        None
    }

    /// Topologically orders the hierarchy, base before descendant.
    ///
    /// A class whose base is not part of the hierarchy counts as a root
    /// here; the planner reports the missing base when it gets to it.
    pub fn order(&self) -> HierarchyOrder {
        let mut result = HierarchyOrder::default();
        let mut depth: IndexMap<&str, usize> = IndexMap::new();

        let mut ready: BinaryHeap<Reverse<(usize, &str)>> = self
            .classes
            .values()
            .filter(|n| self.known_parent(&n.name).is_none())
            .map(|n| Reverse((n.position, n.name.as_str())))
            .collect();

        while let Some(Reverse((_, name))) = ready.pop() {
            let level = self
                .known_parent(name)
                .and_then(|p| depth.get(p).copied())
                .map_or(0, |d| d + 1);
            depth.insert(name, level);
            result.order.push(name.to_string());
            if result.levels.len() <= level {
                result.levels.push(Vec::new());
            }
            result.levels[level].push(name.to_string());

            if let Some(node) = self.classes.get(name) {
                for child in &node.children {
                    if let Some(child_node) = self.classes.get(child) {
                        ready.push(Reverse((child_node.position, child_node.name.as_str())));
                    }
                }
            }
        }

        for node in self.classes.values() {
            if depth.contains_key(node.name.as_str()) {
                continue;
            }
            if let Some(cycle) = self.cycle_through(&node.name) {
                result.cyclic.push(StructureError::CyclicInheritance {
                    class: node.name.clone(),
                    cycle,
                });
            } else {
                let blocker = self
                    .ancestors(&node.name)
                    .into_iter()
                    .find(|a| self.cycle_through(a).is_some())
                    .unwrap_or_default();
                result.blocked.push((node.name.clone(), blocker));
            }
        }

        for level in &mut result.levels {
            level.sort_by_key(|name| self.classes.get(name).map_or(usize::MAX, |n| n.position));
        }
        result
    }

    pub fn stats(&self) -> HierarchyStats {
        HierarchyStats::from_hierarchy(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyStats {
    pub total_classes: usize,
    pub root_classes: usize,
    pub leaf_classes: usize,
    pub max_depth: usize,
    pub cyclic_classes: usize,
}

impl HierarchyStats {
    pub fn from_hierarchy(hierarchy: &ClassHierarchy) -> Self {
        let order = hierarchy.order();
        Self {
            total_classes: hierarchy.class_count(),
            root_classes: hierarchy.classes.values().filter(|n| n.is_root()).count(),
            leaf_classes: hierarchy.classes.values().filter(|n| n.is_leaf()).count(),
            max_depth: order.levels.len().saturating_sub(1),
            cyclic_classes: order.cyclic.len(),
        }
    }
}

impl fmt::Display for HierarchyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Classes:    {}", self.total_classes)?;
        writeln!(f, "Roots:      {}", self.root_classes)?;
        writeln!(f, "Leaves:     {}", self.leaf_classes)?;
        writeln!(f, "Max depth:  {}", self.max_depth)?;
        write!(f, "In cycles:  {}", self.cyclic_classes)
    }
}
