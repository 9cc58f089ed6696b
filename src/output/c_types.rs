// Mon Oct 19 2026 - Alex

use crate::model::ParamDef;
use crate::structure::{PrimitiveType, TypeInfo};
use itertools::Itertools;

/// `int age`, `User* owner`.
pub fn declare(ty: &TypeInfo, name: &str) -> String {
    format!("{} {}", ty.c_type(), name)
}

/// Value a field gets when no constructor parameter sets it.
pub fn zero_value(ty: &TypeInfo) -> &'static str {
    match ty {
        TypeInfo::Primitive(PrimitiveType::Bool) => "false",
        TypeInfo::Primitive(p) if p.is_float() => "0.0",
        TypeInfo::Primitive(PrimitiveType::Str) | TypeInfo::Pointer(_) | TypeInfo::Class(_) => "NULL",
        TypeInfo::Primitive(_) => "0",
        TypeInfo::Void => "",
    }
}

/// Parameter list with an explicit receiver first.
pub fn param_list(receiver: &str, params: &[ParamDef]) -> String {
    std::iter::once(receiver.to_string())
        .chain(params.iter().map(|p| declare(&p.ty, &p.name)))
        .join(", ")
}

/// `int (*)(Animal*, int)`.
pub fn fn_pointer_type(returns: &TypeInfo, receiver: &str, params: &[ParamDef]) -> String {
    let args = std::iter::once(format!("{}*", receiver))
        .chain(params.iter().map(|p| p.ty.c_type()))
        .join(", ");
    format!("{} (*)({})", returns.c_type(), args)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintfSpec {
    pub format: &'static str,
    pub cast: Option<&'static str>,
}

impl PrintfSpec {
    fn plain(format: &'static str) -> Self {
        Self { format, cast: None }
    }

    fn cast(format: &'static str, cast: &'static str) -> Self {
        Self { format, cast: Some(cast) }
    }

    /// Argument as passed to printf, with the cast applied.
    pub fn argument(&self, expr: &str) -> String {
        match self.cast {
            Some(cast) => format!("({})({})", cast, expr),
            None => expr.to_string(),
        }
    }
}

pub fn printf_spec(ty: &TypeInfo) -> Option<PrintfSpec> {
    let spec = match ty {
        TypeInfo::Primitive(p) => match p {
            PrimitiveType::I8 | PrimitiveType::I16 | PrimitiveType::I32 | PrimitiveType::Bool => PrintfSpec::plain("%d"),
            PrimitiveType::U8 | PrimitiveType::U16 | PrimitiveType::U32 => PrintfSpec::cast("%u", "unsigned int"),
            PrimitiveType::I64 => PrintfSpec::cast("%lld", "long long"),
            PrimitiveType::U64 => PrintfSpec::cast("%llu", "unsigned long long"),
            PrimitiveType::F32 | PrimitiveType::F64 => PrintfSpec::cast("%f", "double"),
            PrimitiveType::Str => PrintfSpec::plain("%s"),
        },
        TypeInfo::Pointer(_) | TypeInfo::Class(_) => PrintfSpec::cast("%p", "void*"),
        TypeInfo::Void => return None,
    };
    Some(spec)
}
