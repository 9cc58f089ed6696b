// Mon Oct 19 2026 - Alex

use crate::model::{ClassDef, MethodBody, MethodDef, ParamDef};
use crate::output::naming;
use crate::structure::layout::MethodBinding;
use crate::structure::{ResolvedLayout, StructureError, StructureValidator, TypeInfo};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Computes the resolved layout of one class from the layouts of its
/// ancestors. Ancestors must be planned first.
#[derive(Debug, Clone, Copy)]
pub struct LayoutPlanner {
    word_size: usize,
}

impl LayoutPlanner {
    pub fn new(word_size: usize) -> Self {
        Self { word_size }
    }

    pub fn word_size(&self) -> usize {
        self.word_size
    }

    pub fn compute_layout(
        &self,
        class: &ClassDef,
        ancestors: &HashMap<String, Arc<ResolvedLayout>>,
    ) -> Result<ResolvedLayout, StructureError> {
        let mut layout = match &class.base {
            None => ResolvedLayout::root(&class.name, self.word_size),
            Some(base) => {
                let base_layout = ancestors.get(base).ok_or_else(|| StructureError::UnresolvedBase {
                    class: class.name.clone(),
                    base: base.clone(),
                })?;
                ResolvedLayout::derive(base_layout, &class.name)
            }
        };

        self.place_fields(class, &mut layout)?;
        self.merge_methods(class, &mut layout)?;
        self.check_generated_names(class, &layout)?;
        self.check_bodies(class, &layout)?;
        self.resolve_constructor(class, &mut layout)?;
        StructureValidator::validate_layout(&layout)?;

        log::debug!(
            "Planned {}: {} fields, {} slots, size {}",
            layout.name(),
            layout.fields().len(),
            layout.vtable().len(),
            layout.size()
        );
        Ok(layout)
    }

    fn place_fields(&self, class: &ClassDef, layout: &mut ResolvedLayout) -> Result<(), StructureError> {
        for field in &class.fields {
            if let Some(existing) = layout.get_field(&field.name) {
                return Err(StructureError::DuplicateField {
                    class: class.name.clone(),
                    field: field.name.clone(),
                    declared_in: existing.declared_in().to_string(),
                });
            }
            layout.add_field(&field.name, field.ty.clone(), &class.name);
        }
        Ok(())
    }

    /// Inherited slots keep their index; a same-named declaration replaces
    /// the implementation in place whether or not it is flagged virtual.
    fn merge_methods(&self, class: &ClassDef, layout: &mut ResolvedLayout) -> Result<(), StructureError> {
        let mut seen = HashSet::new();
        for method in &class.methods {
            if !seen.insert(method.name.as_str()) {
                return Err(StructureError::DuplicateMethod {
                    class: class.name.clone(),
                    method: method.name.clone(),
                });
            }

            let signature = method.signature();
            if let Some(slot) = layout.vtable().find(&method.name) {
                if !slot.signature.matches(&signature) {
                    return Err(StructureError::SignatureMismatch {
                        class: class.name.clone(),
                        method: method.name.clone(),
                        expected: slot.signature.to_string(),
                        found: signature.to_string(),
                    });
                }
                let index = slot.index;
                layout.vtable_mut().override_slot(index);
            } else if method.is_virtual {
                layout.unbind_method(&method.name);
                layout.vtable_mut().append(&method.name, signature);
            } else {
                layout.bind_method(MethodBinding {
                    name: method.name.clone(),
                    declared_in: class.name.clone(),
                    signature,
                });
            }
        }
        Ok(())
    }

    /// Implementation functions live in the same `<Class>_` namespace as
    /// every other per-class function.
    fn check_generated_names(&self, class: &ClassDef, layout: &ResolvedLayout) -> Result<(), StructureError> {
        let mut public: HashMap<String, String> = HashMap::new();
        for slot in &layout.vtable().slots {
            public.insert(naming::method(&class.name, &slot.method), format!("method {}", slot.method));
        }
        for binding in layout.methods() {
            public.insert(naming::method(&class.name, &binding.name), format!("method {}", binding.name));
        }
        for field in layout.fields() {
            for accessor in [naming::getter_method(field.name()), naming::setter_method(field.name())] {
                public
                    .entry(naming::method(&class.name, &accessor))
                    .or_insert_with(|| format!("accessor {}", accessor));
            }
        }

        for slot in layout.vtable().slots.iter().filter(|s| s.implemented_by == class.name) {
            let symbol = naming::implementation(&class.name, &slot.method);
            if let Some(owner) = public.get(&symbol) {
                return Err(StructureError::NameClash {
                    class: class.name.clone(),
                    symbol,
                    first: owner.clone(),
                    second: format!("the implementation of {}", slot.method),
                });
            }
        }
        Ok(())
    }

    fn check_bodies(&self, class: &ClassDef, layout: &ResolvedLayout) -> Result<(), StructureError> {
        for method in &class.methods {
            match &method.body {
                MethodBody::ReturnField(field) => {
                    let field_ty = self.require_field(class, method, layout, field)?;
                    if method.returns.is_void() {
                        return Err(StructureError::ValidationFailed {
                            class: class.name.clone(),
                            reason: format!("method {} returns field {} but is declared void", method.name, field),
                        });
                    }
                    if !method.returns.accepts(field_ty) {
                        return Err(StructureError::ValidationFailed {
                            class: class.name.clone(),
                            reason: format!(
                                "method {} returns {} field {} but is declared {}",
                                method.name, field_ty, field, method.returns
                            ),
                        });
                    }
                }
                MethodBody::AssignField { field, param } => {
                    let field_ty = self.require_field(class, method, layout, field)?;
                    let param_ty = method
                        .params
                        .iter()
                        .find(|p| &p.name == param)
                        .map(|p| &p.ty)
                        .ok_or_else(|| StructureError::UnknownParameter {
                            class: class.name.clone(),
                            method: method.name.clone(),
                            param: param.clone(),
                        })?;
                    if !field_ty.accepts(param_ty) {
                        return Err(StructureError::ValidationFailed {
                            class: class.name.clone(),
                            reason: format!(
                                "method {} stores {} parameter {} in {} field {}",
                                method.name, param_ty, param, field_ty, field
                            ),
                        });
                    }
                }
                MethodBody::ReturnValue(_) if method.returns.is_void() => {
                    return Err(StructureError::ValidationFailed {
                        class: class.name.clone(),
                        reason: format!("method {} returns a value but is declared void", method.name),
                    });
                }
                MethodBody::ReturnValue(value) if !method.returns.accepts(&value.natural_type()) => {
                    return Err(StructureError::ValidationFailed {
                        class: class.name.clone(),
                        reason: format!(
                            "method {} returns {} but is declared {}",
                            method.name,
                            value.natural_type(),
                            method.returns
                        ),
                    });
                }
                MethodBody::ReturnValue(_) | MethodBody::Extern | MethodBody::Empty => {}
            }
        }
        Ok(())
    }

    fn require_field<'l>(
        &self,
        class: &ClassDef,
        method: &MethodDef,
        layout: &'l ResolvedLayout,
        field: &str,
    ) -> Result<&'l TypeInfo, StructureError> {
        layout
            .get_field(field)
            .map(|f| f.ty())
            .ok_or_else(|| StructureError::UnknownField {
                class: class.name.clone(),
                method: method.name.clone(),
                field: field.to_string(),
            })
    }

    /// Explicit parameters are kept as declared; the default is one
    /// parameter per resolved field.
    fn resolve_constructor(&self, class: &ClassDef, layout: &mut ResolvedLayout) -> Result<(), StructureError> {
        let params = match &class.constructor {
            Some(params) => {
                for param in params {
                    if let Some(field) = layout.get_field(&param.name) {
                        if field.ty() != &param.ty {
                            return Err(StructureError::ValidationFailed {
                                class: class.name.clone(),
                                reason: format!(
                                    "constructor parameter {} is {} but the field is {}",
                                    param.name,
                                    param.ty,
                                    field.ty()
                                ),
                            });
                        }
                    }
                }
                params.clone()
            }
            None => layout
                .fields()
                .iter()
                .map(|f| ParamDef::new(f.name(), f.ty().clone()))
                .collect(),
        };
        layout.set_constructor(params);
        Ok(())
    }
}
