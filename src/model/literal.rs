// Mon Oct 19 2026 - Alex

use crate::structure::type_info::{PrimitiveType, TypeInfo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Constant value appearing in method bodies and the entry program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl Literal {
    /// Type a literal takes when nothing else constrains it.
    pub fn natural_type(&self) -> TypeInfo {
        match self {
            Self::Bool(_) => TypeInfo::Primitive(PrimitiveType::Bool),
            Self::Int(v) if i32::try_from(*v).is_ok() => TypeInfo::int(),
            Self::Int(_) => TypeInfo::Primitive(PrimitiveType::I64),
            Self::Float(_) => TypeInfo::Primitive(PrimitiveType::F64),
            Self::Str(_) => TypeInfo::Primitive(PrimitiveType::Str),
            Self::Null => TypeInfo::pointer_to(TypeInfo::Void),
        }
    }

    /// C source spelling.
    pub fn to_c(&self) -> String {
        match self {
            Self::Bool(true) => "true".to_string(),
            Self::Bool(false) => "false".to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) if v.fract() == 0.0 && v.is_finite() => format!("{:.1}", v),
            Self::Float(v) => v.to_string(),
            Self::Str(s) => format!("\"{}\"", escape_c(s)),
            Self::Null => "NULL".to_string(),
        }
    }
}

fn escape_c(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_c())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_spelling() {
        assert_eq!(Literal::Int(10).to_c(), "10");
        assert_eq!(Literal::Float(2.0).to_c(), "2.0");
        assert_eq!(Literal::Float(0.25).to_c(), "0.25");
        assert_eq!(Literal::Bool(false).to_c(), "false");
        assert_eq!(Literal::Str("say \"hi\"\n".into()).to_c(), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(Literal::Null.to_c(), "NULL");
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<Literal> = serde_json::from_str(r#"[10, 1.5, true, "x", null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Literal::Int(10),
                Literal::Float(1.5),
                Literal::Bool(true),
                Literal::Str("x".into()),
                Literal::Null,
            ]
        );
    }

    #[test]
    fn test_natural_type_widens_large_ints() {
        assert_eq!(Literal::Int(7).natural_type(), TypeInfo::int());
        assert_eq!(
            Literal::Int(1 << 40).natural_type(),
            TypeInfo::Primitive(PrimitiveType::I64)
        );
    }
}
