// Mon Oct 19 2026 - Alex

use crate::model::{CallExpr, Expr, ParamDef, Signature, Statement};
use crate::output::c_types::{self, printf_spec};
use crate::output::naming::{self, VTABLE_FIELD};
use crate::output::{EmitOptions, OutputError, OutputResult, SourceWriter};
use crate::structure::{ResolvedLayout, StructureValidator, TypeInfo};
use itertools::Itertools;
use std::collections::HashMap;
use std::sync::Arc;

/// Lowers the entry program into `int main(void)`. Every expression is
/// typed against the resolved layouts so printf formats and calls are
/// checked before any C is written.
pub struct EntryEmitter<'a> {
    layouts: &'a HashMap<String, Arc<ResolvedLayout>>,
    options: &'a EmitOptions,
    names: StructureValidator,
}

struct Scope {
    variables: HashMap<String, TypeInfo>,
}

impl Scope {
    fn lookup(&self, var: &str) -> OutputResult<&TypeInfo> {
        self.variables
            .get(var)
            .ok_or_else(|| OutputError::UnknownVariable(var.to_string()))
    }

    fn declare(&mut self, var: &str, ty: TypeInfo) -> OutputResult<()> {
        if self.variables.contains_key(var) {
            return Err(OutputError::Redeclared(var.to_string()));
        }
        self.variables.insert(var.to_string(), ty);
        Ok(())
    }
}

impl<'a> EntryEmitter<'a> {
    pub fn new(layouts: &'a HashMap<String, Arc<ResolvedLayout>>, options: &'a EmitOptions) -> Self {
        Self {
            layouts,
            options,
            names: StructureValidator::new(layouts.keys().map(String::as_str)),
        }
    }

    pub fn emit(&self, statements: &[Statement]) -> OutputResult<String> {
        let mut scope = Scope {
            variables: HashMap::new(),
        };
        let mut w = SourceWriter::new(self.options.indent_width);
        w.open("int main(void)");

        for statement in statements {
            self.statement(&mut w, &mut scope, statement)?;
        }
        if !matches!(statements.last(), Some(Statement::Return(_))) {
            w.line("return 0;");
        }
        w.close();
        Ok(w.finish())
    }

    fn statement(&self, w: &mut SourceWriter, scope: &mut Scope, statement: &Statement) -> OutputResult<()> {
        match statement {
            Statement::New { var, class, args } => {
                let layout = self.layout(class)?;
                let params = layout.constructor();
                let args = self.arguments(scope, &naming::constructor(class), params, args)?;
                self.declare(scope, var, TypeInfo::class(class))?;
                w.line(&format!(
                    "{}* {} = {}({});",
                    class,
                    var,
                    naming::constructor(class),
                    args.join(", ")
                ));
            }
            Statement::Let { var, ty, value } => {
                let (text, found) = self.value(scope, value)?;
                self.declare(scope, var, ty.clone())?;
                let text = self.coerce(&format!("variable {}", var), ty, &found, text)?;
                w.line(&format!("{} = {};", c_types::declare(ty, var), text));
            }
            Statement::Print(expr) => {
                let (text, ty) = self.expr(scope, expr)?;
                let spec = printf_spec(&ty).ok_or_else(|| OutputError::VoidExpression(text.clone()))?;
                w.line(&format!("printf(\"{}\\n\", {});", spec.format, spec.argument(&text)));
            }
            Statement::Call(call) => {
                let (text, _) = self.call(scope, call)?;
                w.line(&format!("{};", text));
            }
            Statement::Delete(var) => {
                let class = self.instance_class(scope, var)?;
                if self.options.destructors {
                    w.line(&format!("{}({});", naming::destructor(&class), var));
                } else {
                    w.open(&format!("if ({})", var));
                    w.line(&format!("free({}->{});", var, VTABLE_FIELD));
                    w.line(&format!("free({});", var));
                    w.close();
                }
                w.line(&format!("{} = NULL;", var));
            }
            Statement::Return(code) => w.line(&format!("return {};", code)),
        }
        Ok(())
    }

    fn declare(&self, scope: &mut Scope, var: &str, ty: TypeInfo) -> OutputResult<()> {
        if !StructureValidator::is_identifier(var)
            || StructureValidator::is_reserved(var)
            || self.names.shadows_generated(var)
        {
            return Err(OutputError::InvalidName(var.to_string()));
        }
        if ty.is_void() {
            return Err(OutputError::VoidVariable(var.to_string()));
        }
        if let Some(class) = ty.referenced_class() {
            self.layout(class)?;
        }
        scope.declare(var, ty)
    }

    /// Text of a value of type `found` stored as `expected`. Instances of
    /// a derived class are cast up to the base.
    fn coerce(&self, context: &str, expected: &TypeInfo, found: &TypeInfo, text: String) -> OutputResult<String> {
        if expected.accepts(found) {
            return Ok(text);
        }
        if let (TypeInfo::Class(target), TypeInfo::Class(source)) = (expected, found) {
            if self.layout(source)?.is_subclass_of(target) {
                return Ok(format!("({}*){}", target, text));
            }
        }
        Err(OutputError::TypeMismatch {
            context: context.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        })
    }

    fn layout(&self, class: &str) -> OutputResult<&ResolvedLayout> {
        self.layouts
            .get(class)
            .map(Arc::as_ref)
            .ok_or_else(|| OutputError::UnknownClass(class.to_string()))
    }

    fn instance_class(&self, scope: &Scope, var: &str) -> OutputResult<String> {
        match scope.lookup(var)? {
            TypeInfo::Class(name) => Ok(name.clone()),
            _ => Err(OutputError::NotAnInstance(var.to_string())),
        }
    }

    /// An expression that has to produce something.
    fn value(&self, scope: &Scope, expr: &Expr) -> OutputResult<(String, TypeInfo)> {
        let (text, ty) = self.expr(scope, expr)?;
        if ty.is_void() {
            return Err(OutputError::VoidExpression(text));
        }
        Ok((text, ty))
    }

    fn expr(&self, scope: &Scope, expr: &Expr) -> OutputResult<(String, TypeInfo)> {
        match expr {
            Expr::Literal(literal) => Ok((literal.to_c(), literal.natural_type())),
            Expr::Var { var } => Ok((var.clone(), scope.lookup(var)?.clone())),
            Expr::Field { field } => {
                let class = self.instance_class(scope, &field.var)?;
                let resolved = self
                    .layout(&class)?
                    .get_field(&field.field)
                    .ok_or_else(|| OutputError::UnknownField {
                        class: class.clone(),
                        field: field.field.clone(),
                    })?;
                Ok((format!("{}->{}", field.var, field.field), resolved.ty().clone()))
            }
            Expr::Call { call } => self.call(scope, call),
        }
    }

    fn call(&self, scope: &Scope, call: &CallExpr) -> OutputResult<(String, TypeInfo)> {
        let class = self.instance_class(scope, &call.var)?;
        let layout = self.layout(&class)?;
        let signature = self.resolve_method(layout, &call.method).ok_or_else(|| OutputError::UnknownMethod {
            class: class.clone(),
            method: call.method.clone(),
        })?;
        let callee = naming::method(&class, &call.method);
        let args = self.arguments(scope, &callee, &signature.params, &call.args)?;
        let text = format!(
            "{}({})",
            callee,
            std::iter::once(call.var.clone()).chain(args).join(", ")
        );
        Ok((text, signature.returns))
    }

    /// Virtual slots first, then plain methods, then generated accessors.
    fn resolve_method(&self, layout: &ResolvedLayout, method: &str) -> Option<Signature> {
        if let Some(slot) = layout.vtable().find(method) {
            return Some(slot.signature.clone());
        }
        if let Some(binding) = layout.get_method(method) {
            return Some(binding.signature.clone());
        }
        if !self.options.accessors {
            return None;
        }
        layout.fields().iter().find_map(|field| {
            if method == naming::getter_method(field.name()) {
                Some(Signature {
                    params: Vec::new(),
                    returns: field.ty().clone(),
                })
            } else if method == naming::setter_method(field.name()) {
                Some(Signature {
                    params: vec![ParamDef::new("value", field.ty().clone())],
                    returns: TypeInfo::Void,
                })
            } else {
                None
            }
        })
    }

    fn arguments(&self, scope: &Scope, callee: &str, params: &[ParamDef], args: &[Expr]) -> OutputResult<Vec<String>> {
        if params.len() != args.len() {
            return Err(OutputError::ArityMismatch {
                callee: callee.to_string(),
                expected: params.len(),
                found: args.len(),
            });
        }
        args.iter()
            .zip(params)
            .map(|(arg, param)| {
                let (text, found) = self.value(scope, arg)?;
                self.coerce(&format!("argument {} of {}", param.name, callee), &param.ty, &found, text)
            })
            .collect()
    }
}
