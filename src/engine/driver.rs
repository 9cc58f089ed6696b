// Mon Oct 19 2026 - Alex

use crate::config::Config;
use crate::engine::{EngineError, GenerationFailure, GenerationReport, PlanReport};
use crate::model::{ClassDef, ClassModel};
use crate::output::{CEmitter, EmitOptions, EntryEmitter, TranslationUnit};
use crate::structure::{
    ClassHierarchy, LayoutPlanner, LayoutRegistry, ResolvedLayout, StructureError, StructureValidator,
};
use crate::utils::ScopedTimer;
use indexmap::IndexMap;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Orders, plans and emits a whole class model.
///
/// Classes are planned one hierarchy level at a time. Everything in a level
/// only depends on earlier levels, so with `parallel` set a level is planned
/// on the thread pool. A class whose base failed is not planned and is
/// reported as `BaseFailed`; unrelated classes still go through.
pub struct Driver {
    config: Config,
    options: EmitOptions,
    planner: LayoutPlanner,
    pool: Option<ThreadPool>,
}

impl Driver {
    pub fn new(config: Config) -> Self {
        let pool = if config.parallel {
            match rayon::ThreadPoolBuilder::new().num_threads(config.max_threads).build() {
                Ok(pool) => Some(pool),
                Err(e) => {
                    log::warn!("{}; planning sequentially", EngineError::ThreadPool(e.to_string()));
                    None
                }
            }
        } else {
            None
        };

        Self {
            options: EmitOptions::from(&config),
            planner: LayoutPlanner::new(config.pointer_size),
            config,
            pool,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn plan(&self, model: &ClassModel) -> PlanReport {
        let _timer = ScopedTimer::new("planning");
        let mut failures = Vec::new();

        let mut hierarchy = ClassHierarchy::new();
        let mut definitions: HashMap<&str, &ClassDef> = HashMap::new();
        for class in &model.classes {
            match hierarchy.add_class(class) {
                Ok(()) => {
                    definitions.insert(class.name.as_str(), class);
                }
                Err(e) => failures.push(GenerationFailure::new(&class.name, e)),
            }
        }

        let order = hierarchy.order();
        for error in order.cyclic {
            let class = error.class().to_string();
            failures.push(GenerationFailure::new(&class, error));
        }
        for (class, blocker) in order.blocked {
            failures.push(GenerationFailure::new(
                &class,
                EngineError::BaseFailed {
                    class: class.clone(),
                    base: blocker,
                },
            ));
        }

        let validator = StructureValidator::new(hierarchy.names());
        let registry = LayoutRegistry::new();
        let mut failed: HashSet<String> = HashSet::new();

        for level in &order.levels {
            let mut ready = Vec::with_capacity(level.len());
            for name in level {
                let Some(class) = definitions.get(name.as_str()).copied() else {
                    continue;
                };
                match class.base.as_deref().filter(|b| failed.contains(*b)) {
                    Some(base) => {
                        failed.insert(name.clone());
                        failures.push(GenerationFailure::new(
                            name,
                            EngineError::BaseFailed {
                                class: name.clone(),
                                base: base.to_string(),
                            },
                        ));
                    }
                    None => ready.push(class),
                }
            }

            let ancestors = registry.snapshot();
            let plan_one = |class: &&ClassDef| {
                let result = self
                    .plan_class(class, &validator, &ancestors)
                    .map(|layout| registry.publish(layout));
                (class.name.clone(), result)
            };
            let results: Vec<(String, Result<Arc<ResolvedLayout>, StructureError>)> = match &self.pool {
                Some(pool) if ready.len() > 1 => pool.install(|| ready.par_iter().map(plan_one).collect()),
                _ => ready.iter().map(plan_one).collect(),
            };

            for (name, result) in results {
                if let Err(e) = result {
                    log::debug!("Planning {} failed: {}", name, e);
                    failed.insert(name.clone());
                    failures.push(GenerationFailure::new(&name, e));
                }
            }
        }

        let layouts: IndexMap<String, Arc<ResolvedLayout>> = order
            .order
            .iter()
            .filter_map(|name| registry.get(name).map(|layout| (name.clone(), layout)))
            .collect();

        log::info!(
            "Planned {} of {} classes ({} failed)",
            layouts.len(),
            model.classes.len(),
            failures.len()
        );

        PlanReport {
            layouts,
            failures,
            stats: hierarchy.stats(),
        }
    }

    fn plan_class(
        &self,
        class: &ClassDef,
        validator: &StructureValidator,
        ancestors: &HashMap<String, Arc<ResolvedLayout>>,
    ) -> Result<ResolvedLayout, StructureError> {
        validator.validate_class(class)?;
        self.planner.compute_layout(class, ancestors)
    }

    pub fn generate(&self, model: &ClassModel) -> GenerationReport {
        let plan = self.plan(model);
        let _timer = ScopedTimer::new("emission");

        let emitter = CEmitter::new(self.options.clone());
        let mut unit = TranslationUnit::new();
        for (name, layout) in &plan.layouts {
            if let Some(class) = model.get_class(name) {
                unit.push(emitter.emit(class, layout));
            }
        }

        let mut main_failure = None;
        if let Some(statements) = &model.main {
            let layouts = plan.layout_map();
            match EntryEmitter::new(&layouts, &self.options).emit(statements) {
                Ok(main) => unit.set_main(main),
                Err(e) => main_failure = Some(GenerationFailure::new("main", e)),
            }
        }

        log::info!("Emitted {} classes", unit.len());
        GenerationReport {
            source: unit.render(&self.options),
            plan,
            main_failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expr, Literal, MethodBody, MethodDef, Statement};
    use crate::structure::TypeInfo;

    fn user_model() -> ClassModel {
        ClassModel::new(vec![
            ClassDef::new("Object"),
            ClassDef::new("User").with_base("Object").with_field("age", TypeInfo::int()),
        ])
        .with_main(vec![
            Statement::New {
                var: "u".into(),
                class: "User".into(),
                args: vec![Expr::int(10)],
            },
            Statement::Print(Expr::field("u", "age")),
        ])
    }

    #[test]
    fn test_generates_user_program() {
        let report = Driver::new(Config::default()).generate(&user_model());
        assert!(report.is_complete());
        assert_eq!(report.generated_classes().collect::<Vec<_>>(), vec!["Object", "User"]);
        assert!(report.source.contains("struct User {"));
        assert!(report.source.contains("User* u = create_User(10);"));
        assert!(report.source.find("struct Object {") < report.source.find("struct User {"));
    }

    #[test]
    fn test_failed_base_fails_descendants_only() {
        let model = ClassModel::new(vec![
            ClassDef::new("Shape")
                .with_field("x", TypeInfo::int())
                .with_field("x", TypeInfo::int()),
            ClassDef::new("Circle").with_base("Shape"),
            ClassDef::new("Ring").with_base("Circle"),
            ClassDef::new("Color").with_field("rgb", TypeInfo::int()),
        ]);
        let plan = Driver::new(Config::default()).plan(&model);

        assert!(!plan.is_complete());
        assert!(matches!(
            plan.failure_for("Shape").map(|f| &f.error),
            Some(EngineError::Structure(StructureError::DuplicateField { .. }))
        ));
        assert!(plan.failure_for("Circle").unwrap().error.is_base_failure());
        assert!(plan.failure_for("Ring").unwrap().error.is_base_failure());
        assert!(plan.get("Color").is_some());
        assert_eq!(plan.layouts.len(), 1);
    }

    #[test]
    fn test_cycle_and_duplicate_class() {
        let model = ClassModel::new(vec![
            ClassDef::new("A").with_base("B"),
            ClassDef::new("B").with_base("A"),
            ClassDef::new("C"),
            ClassDef::new("C").with_field("extra", TypeInfo::int()),
        ]);
        let plan = Driver::new(Config::default()).plan(&model);

        assert!(matches!(
            plan.failure_for("A").map(|f| &f.error),
            Some(EngineError::Structure(StructureError::CyclicInheritance { .. }))
        ));
        assert!(matches!(
            plan.failure_for("C").map(|f| &f.error),
            Some(EngineError::Structure(StructureError::DuplicateClass(_)))
        ));
        assert!(plan.get("C").unwrap().fields().is_empty());
    }

    #[test]
    fn test_unknown_base_is_reported() {
        let model = ClassModel::new(vec![ClassDef::new("Orphan").with_base("Missing")]);
        let plan = Driver::new(Config::default()).plan(&model);
        assert!(matches!(
            plan.failure_for("Orphan").map(|f| &f.error),
            Some(EngineError::Structure(StructureError::UnresolvedBase { .. }))
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut classes = vec![ClassDef::new("Base").with_method(
            MethodDef::virtual_method("id", TypeInfo::int()).with_body(MethodBody::ReturnValue(Literal::Int(0))),
        )];
        for i in 0..16 {
            classes.push(
                ClassDef::new(&format!("Derived{}", i))
                    .with_base("Base")
                    .with_field("value", TypeInfo::int()),
            );
        }
        let model = ClassModel::new(classes);

        let sequential = Driver::new(Config::default()).generate(&model);
        let parallel = Driver::new(Config::default().with_parallel(true).with_max_threads(4)).generate(&model);
        assert!(parallel.is_complete());
        assert_eq!(sequential.source, parallel.source);
    }

    #[test]
    fn test_main_failure_keeps_classes() {
        let model = ClassModel::new(vec![ClassDef::new("Object")])
            .with_main(vec![Statement::Print(Expr::var("missing"))]);
        let report = Driver::new(Config::default()).generate(&model);
        assert!(!report.is_complete());
        assert_eq!(report.failure_count(), 1);
        assert!(report.source.contains("struct Object {"));
        assert!(!report.source.contains("int main(void)"));
    }

    #[test]
    fn test_layout_json() {
        let plan = Driver::new(Config::default()).plan(&user_model());
        let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
        assert_eq!(json[1]["name"], "User");
        assert_eq!(json[1]["size"], 16);
        assert_eq!(json[1]["fields"][0]["offset"], 8);
    }
}
