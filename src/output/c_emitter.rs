// Mon Oct 19 2026 - Alex

use crate::model::{ClassDef, MethodBody, MethodDef};
use crate::output::naming::{self, VTABLE_ENTRY_TYPE, VTABLE_FIELD};
use crate::output::{c_types, EmitOptions, SourceWriter};
use crate::structure::{MethodBinding, ResolvedLayout, VTableSlot};
use itertools::Itertools;
use std::collections::HashSet;
use std::fmt;

/// Generated C for one class, split by where each part lands in the
/// translation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSource {
    pub class_name: String,
    /// Other classes named by this class's fields and signatures.
    pub references: Vec<String>,
    pub struct_def: String,
    pub prototypes: String,
    pub asserts: String,
    pub functions: String,
}

impl fmt::Display for ClassSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = [&self.struct_def, &self.prototypes, &self.asserts, &self.functions];
        let mut first = true;
        for section in sections.iter().filter(|s| !s.is_empty()) {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", section)?;
            first = false;
        }
        Ok(())
    }
}

struct GeneratedFn {
    comment: Option<String>,
    signature: String,
    /// `None` when the definition is supplied elsewhere.
    body: Option<String>,
}

/// Renders one class into C. Pure: the same class and layout always give
/// byte-identical text.
#[derive(Debug, Clone, Default)]
pub struct CEmitter {
    options: EmitOptions,
}

impl CEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    pub fn emit(&self, class: &ClassDef, layout: &ResolvedLayout) -> ClassSource {
        let functions = self.collect_functions(class, layout);

        let mut prototypes = SourceWriter::new(self.options.indent_width);
        for function in &functions {
            prototypes.line(&format!("{};", function.signature));
        }

        let mut definitions = SourceWriter::new(self.options.indent_width);
        for function in &functions {
            let Some(body) = &function.body else {
                continue;
            };
            if self.options.comments {
                if let Some(comment) = &function.comment {
                    definitions.line(&format!("// {}", comment));
                }
            }
            definitions.line(&format!("{} {{", function.signature));
            definitions.raw(body);
            definitions.line("}");
            definitions.blank();
        }

        let asserts = if self.options.layout_asserts {
            self.emit_asserts(layout)
        } else {
            String::new()
        };

        ClassSource {
            class_name: class.name.clone(),
            references: self.referenced_classes(layout),
            struct_def: self.emit_struct(layout),
            prototypes: prototypes.finish(),
            asserts,
            functions: definitions.finish(),
        }
    }

    /// Vtable pointer first, then every resolved field in layout order.
    pub fn emit_struct(&self, layout: &ResolvedLayout) -> String {
        let name = layout.name();
        let mut w = SourceWriter::new(self.options.indent_width);
        w.open(&format!("struct {}", name));
        w.line(&format!("{}* {};", VTABLE_ENTRY_TYPE, VTABLE_FIELD));

        if self.options.comments && layout.fields().is_empty() {
            w.line(&format!("// No fields declared for {}", name));
        }
        let mut current_owner: Option<&str> = None;
        for field in layout.fields() {
            if self.options.comments && current_owner != Some(field.declared_in()) {
                if field.declared_in() == name {
                    w.line(&format!("// Fields of {}", name));
                } else {
                    w.line(&format!("// Inherited from {}", field.declared_in()));
                }
                current_owner = Some(field.declared_in());
            }
            w.line(&format!("{};", c_types::declare(field.ty(), field.name())));
        }
        w.close_with("};");
        w.finish()
    }

    fn referenced_classes(&self, layout: &ResolvedLayout) -> Vec<String> {
        let slot_types = layout.vtable().slots.iter().flat_map(|slot| {
            std::iter::once(&slot.signature.returns).chain(slot.signature.params.iter().map(|p| &p.ty))
        });
        let binding_types = layout.methods().iter().flat_map(|binding| {
            std::iter::once(&binding.signature.returns).chain(binding.signature.params.iter().map(|p| &p.ty))
        });
        layout
            .fields()
            .iter()
            .map(|f| f.ty())
            .chain(layout.constructor().iter().map(|p| &p.ty))
            .chain(slot_types)
            .chain(binding_types)
            .filter_map(|ty| ty.referenced_class())
            .filter(|name| *name != layout.name())
            .map(str::to_string)
            .unique()
            .collect()
    }

    fn emit_asserts(&self, layout: &ResolvedLayout) -> String {
        let name = layout.name();
        let mut w = SourceWriter::new(self.options.indent_width);
        w.line(&format!(
            "_Static_assert(sizeof({0}) == {1}, \"{0}: size\");",
            name,
            layout.size()
        ));
        w.line(&format!(
            "_Static_assert(offsetof({0}, {1}) == {2}, \"{0}: {1} offset\");",
            name,
            VTABLE_FIELD,
            layout.vptr_offset()
        ));
        for field in layout.fields() {
            w.line(&format!(
                "_Static_assert(offsetof({0}, {1}) == {2}, \"{0}: {1} offset\");",
                name,
                field.name(),
                field.offset()
            ));
        }
        w.finish()
    }

    fn collect_functions(&self, class: &ClassDef, layout: &ResolvedLayout) -> Vec<GeneratedFn> {
        let mut functions = vec![self.constructor(layout)];
        if self.options.destructors {
            functions.push(self.destructor(layout));
        }

        for method in &class.methods {
            if let Some(slot) = layout.vtable().find(&method.name) {
                functions.push(self.implementation(class, method, slot));
            }
        }
        for slot in &layout.vtable().slots {
            functions.push(self.thunk(layout.name(), slot));
        }
        for method in &class.methods {
            if layout.vtable().find(&method.name).is_none() {
                functions.push(self.plain_method(class, method));
            }
        }
        for binding in layout.methods() {
            if binding.declared_in != class.name {
                functions.push(self.forwarding_wrapper(layout.name(), binding));
            }
        }
        if self.options.accessors {
            functions.extend(self.accessors(layout));
        }
        functions
    }

    fn constructor(&self, layout: &ResolvedLayout) -> GeneratedFn {
        let name = layout.name();
        let params = layout.constructor();
        let param_list = if params.is_empty() {
            "void".to_string()
        } else {
            params.iter().map(|p| c_types::declare(&p.ty, &p.name)).join(", ")
        };

        let mut w = SourceWriter::with_level(self.options.indent_width, 1);
        w.line(&format!("{0}* obj = malloc(sizeof({0}));", name));
        w.open("if (!obj)");
        w.line(&format!("fprintf(stderr, \"Memory allocation failed for {}\\n\");", name));
        w.line("exit(1);");
        w.close();
        w.blank();

        let vtable = layout.vtable();
        if self.options.comments {
            w.line("// Virtual method table");
        }
        if vtable.is_empty() {
            w.line(&format!("obj->{} = NULL;", VTABLE_FIELD));
        } else {
            w.line(&format!(
                "obj->{} = malloc(sizeof({}) * {});",
                VTABLE_FIELD,
                VTABLE_ENTRY_TYPE,
                vtable.len()
            ));
            w.open(&format!("if (!obj->{})", VTABLE_FIELD));
            w.line(&format!(
                "fprintf(stderr, \"Memory allocation failed for vtable of {}\\n\");",
                name
            ));
            w.line("free(obj);");
            w.line("exit(1);");
            w.close();
            for slot in &vtable.slots {
                w.line(&format!(
                    "obj->{}[{}] = ({}){};",
                    VTABLE_FIELD,
                    slot.index,
                    VTABLE_ENTRY_TYPE,
                    naming::implementation(&slot.implemented_by, &slot.method)
                ));
            }
        }

        if !layout.fields().is_empty() {
            w.blank();
            if self.options.comments {
                w.line(&format!("// Fields of {}", name));
            }
        }
        for field in layout.fields() {
            let value = params
                .iter()
                .find(|p| p.name == field.name())
                .map(|p| p.name.as_str())
                .unwrap_or_else(|| c_types::zero_value(field.ty()));
            w.line(&format!("obj->{} = {};", field.name(), value));
        }
        for param in params.iter().filter(|p| layout.get_field(&p.name).is_none()) {
            w.line(&format!("(void){};", param.name));
        }
        w.line("return obj;");

        GeneratedFn {
            comment: Some(format!("Constructor for {}", name)),
            signature: format!("{0}* {1}({2})", name, naming::constructor(name), param_list),
            body: Some(w.finish()),
        }
    }

    fn destructor(&self, layout: &ResolvedLayout) -> GeneratedFn {
        let name = layout.name();
        let mut w = SourceWriter::with_level(self.options.indent_width, 1);
        w.open("if (!obj)");
        w.line("return;");
        w.close();
        w.line(&format!("free(obj->{});", VTABLE_FIELD));
        w.line("free(obj);");

        GeneratedFn {
            comment: Some(format!("Destructor for {}", name)),
            signature: format!("void {}({}* obj)", naming::destructor(name), name),
            body: Some(w.finish()),
        }
    }

    /// Function stored in the vtable. Its receiver is typed as the class
    /// that introduced the slot so every implementation shares one
    /// function-pointer type.
    fn implementation(&self, class: &ClassDef, method: &MethodDef, slot: &VTableSlot) -> GeneratedFn {
        let introduced_here = slot.introduced_by == class.name;
        let receiver = if introduced_here {
            format!("{}* self", class.name)
        } else {
            format!("{}* self_base", slot.introduced_by)
        };
        let signature = format!(
            "{} {}({})",
            method.returns.c_type(),
            naming::implementation(&class.name, &method.name),
            c_types::param_list(&receiver, &method.params)
        );

        let body = (method.body != MethodBody::Extern).then(|| {
            let mut w = SourceWriter::with_level(self.options.indent_width, 1);
            if !introduced_here {
                w.line(&format!("{0}* self = ({0}*)self_base;", class.name));
            }
            self.write_body(&mut w, method);
            w.finish()
        });

        GeneratedFn {
            comment: Some(format!("{}.{} (slot {})", class.name, method.name, slot.index)),
            signature,
            body,
        }
    }

    /// Forwards through the instance's vtable at the slot's fixed index.
    fn thunk(&self, class: &str, slot: &VTableSlot) -> GeneratedFn {
        let sig = &slot.signature;
        let signature = format!(
            "{} {}({})",
            sig.returns.c_type(),
            naming::method(class, &slot.method),
            c_types::param_list(&format!("{}* self", class), &sig.params)
        );
        let receiver = if slot.introduced_by == class {
            "self".to_string()
        } else {
            format!("({}*)self", slot.introduced_by)
        };
        let args = std::iter::once(receiver)
            .chain(sig.params.iter().map(|p| p.name.clone()))
            .join(", ");
        let call = format!(
            "(({})self->{}[{}])({})",
            c_types::fn_pointer_type(&sig.returns, &slot.introduced_by, &sig.params),
            VTABLE_FIELD,
            slot.index,
            args
        );

        let mut w = SourceWriter::with_level(self.options.indent_width, 1);
        if sig.returns.is_void() {
            w.line(&format!("{};", call));
        } else {
            w.line(&format!("return {};", call));
        }

        GeneratedFn {
            comment: Some(format!("Dispatch {} through vtable slot {}", slot.method, slot.index)),
            signature,
            body: Some(w.finish()),
        }
    }

    fn plain_method(&self, class: &ClassDef, method: &MethodDef) -> GeneratedFn {
        let signature = format!(
            "{} {}({})",
            method.returns.c_type(),
            naming::method(&class.name, &method.name),
            c_types::param_list(&format!("{}* self", class.name), &method.params)
        );
        let body = (method.body != MethodBody::Extern).then(|| {
            let mut w = SourceWriter::with_level(self.options.indent_width, 1);
            self.write_body(&mut w, method);
            w.finish()
        });
        GeneratedFn {
            comment: None,
            signature,
            body,
        }
    }

    /// Inherited non-virtual method, called on the declaring ancestor.
    fn forwarding_wrapper(&self, class: &str, binding: &MethodBinding) -> GeneratedFn {
        let sig = &binding.signature;
        let signature = format!(
            "{} {}({})",
            sig.returns.c_type(),
            naming::method(class, &binding.name),
            c_types::param_list(&format!("{}* self", class), &sig.params)
        );
        let args = std::iter::once(format!("({}*)self", binding.declared_in))
            .chain(sig.params.iter().map(|p| p.name.clone()))
            .join(", ");
        let call = format!("{}({})", naming::method(&binding.declared_in, &binding.name), args);

        let mut w = SourceWriter::with_level(self.options.indent_width, 1);
        if sig.returns.is_void() {
            w.line(&format!("{};", call));
        } else {
            w.line(&format!("return {};", call));
        }
        GeneratedFn {
            comment: Some(format!("{} inherited from {}", binding.name, binding.declared_in)),
            signature,
            body: Some(w.finish()),
        }
    }

    /// Direct field access; skipped where a method already owns the name.
    fn accessors(&self, layout: &ResolvedLayout) -> Vec<GeneratedFn> {
        let name = layout.name();
        let taken = |method: &str| layout.vtable().find(method).is_some() || layout.get_method(method).is_some();
        let mut functions = Vec::new();

        for field in layout.fields() {
            let getter = naming::getter_method(field.name());
            if !taken(&getter) {
                let mut w = SourceWriter::with_level(self.options.indent_width, 1);
                w.line(&format!("return self->{};", field.name()));
                functions.push(GeneratedFn {
                    comment: None,
                    signature: format!(
                        "{} {}({}* self)",
                        field.ty().c_type(),
                        naming::method(name, &getter),
                        name
                    ),
                    body: Some(w.finish()),
                });
            }

            let setter = naming::setter_method(field.name());
            if !taken(&setter) {
                let mut w = SourceWriter::with_level(self.options.indent_width, 1);
                w.line(&format!("self->{} = value;", field.name()));
                functions.push(GeneratedFn {
                    comment: None,
                    signature: format!(
                        "void {}({}* self, {})",
                        naming::method(name, &setter),
                        name,
                        c_types::declare(field.ty(), "value")
                    ),
                    body: Some(w.finish()),
                });
            }
        }
        functions
    }

    fn write_body(&self, w: &mut SourceWriter, method: &MethodDef) {
        let mut used: HashSet<&str> = HashSet::new();
        if let MethodBody::AssignField { param, .. } = &method.body {
            used.insert(param.as_str());
        }
        let uses_self = matches!(method.body, MethodBody::ReturnField(_) | MethodBody::AssignField { .. });
        if !uses_self {
            w.line("(void)self;");
        }
        for param in method.params.iter().filter(|p| !used.contains(p.name.as_str())) {
            w.line(&format!("(void){};", param.name));
        }

        match &method.body {
            MethodBody::ReturnField(field) => w.line(&format!("return self->{};", field)),
            MethodBody::ReturnValue(value) => w.line(&format!("return {};", value.to_c())),
            MethodBody::AssignField { field, param } => w.line(&format!("self->{} = {};", field, param)),
            MethodBody::Empty if !method.returns.is_void() => {
                w.line(&format!("return {};", c_types::zero_value(&method.returns)))
            }
            MethodBody::Empty | MethodBody::Extern => {}
        }
    }
}
