// Mon Oct 19 2026 - Alex

use crate::model::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic type tag carried by fields, parameters and return values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeInfo {
    Primitive(PrimitiveType),
    Pointer(Box<TypeInfo>),
    /// Reference to an instance of a generated class, lowered to `Name*`.
    Class(String),
    Void,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Str,
}

impl TypeInfo {
    pub fn int() -> Self {
        Self::Primitive(PrimitiveType::I32)
    }

    pub fn class(name: &str) -> Self {
        Self::Class(name.to_string())
    }

    pub fn pointer_to(inner: TypeInfo) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Size in bytes for a target whose machine word is `word` bytes.
    pub fn size(&self, word: usize) -> usize {
        match self {
            Self::Primitive(ty) => ty.size(word),
            Self::Pointer(_) | Self::Class(_) => word,
            Self::Void => 0,
        }
    }

    pub fn alignment(&self, word: usize) -> usize {
        match self {
            Self::Primitive(ty) => ty.alignment(word),
            Self::Pointer(_) | Self::Class(_) => word,
            Self::Void => 1,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    pub fn is_pointer_like(&self) -> bool {
        match self {
            Self::Pointer(_) | Self::Class(_) => true,
            Self::Primitive(ty) => *ty == PrimitiveType::Str,
            Self::Void => false,
        }
    }

    /// Whether a value of type `value` can be stored here without a cast.
    /// Numbers and bools convert freely; strings and pointers must match,
    /// except that a null pointer fits any pointer.
    pub fn accepts(&self, value: &TypeInfo) -> bool {
        match (self, value) {
            _ if self == value => !self.is_void(),
            (Self::Primitive(target), Self::Primitive(value)) => {
                (*target == PrimitiveType::Str) == (*value == PrimitiveType::Str)
            }
            (_, Self::Pointer(inner)) if inner.is_void() => self.is_pointer_like(),
            _ => false,
        }
    }

    /// Name of the class this type refers to, looking through raw pointers.
    pub fn referenced_class(&self) -> Option<&str> {
        match self {
            Self::Class(name) => Some(name),
            Self::Pointer(inner) => inner.referenced_class(),
            _ => None,
        }
    }

    /// The generated C spelling of this type.
    pub fn c_type(&self) -> String {
        match self {
            Self::Primitive(ty) => ty.c_name().to_string(),
            Self::Pointer(inner) => format!("{}*", inner.c_type()),
            Self::Class(name) => format!("{}*", name),
            Self::Void => "void".to_string(),
        }
    }
}

impl PrimitiveType {
    pub fn size(self, word: usize) -> usize {
        match self {
            Self::I8 | Self::U8 | Self::Bool => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
            Self::Str => word,
        }
    }

    pub fn alignment(self, word: usize) -> usize {
        match self {
            Self::I64 | Self::U64 | Self::F64 => 8.min(word.max(4)),
            other => other.size(word),
        }
    }

    pub fn c_name(self) -> &'static str {
        match self {
            Self::I8 => "int8_t",
            Self::I16 => "int16_t",
            Self::I32 => "int",
            Self::I64 => "int64_t",
            Self::U8 => "uint8_t",
            Self::U16 => "uint16_t",
            Self::U32 => "uint32_t",
            Self::U64 => "uint64_t",
            Self::F32 => "float",
            Self::F64 => "double",
            Self::Bool => "bool",
            Self::Str => "char*",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "int",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "float",
            Self::Bool => "bool",
            Self::Str => "str",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    fn from_tag(tag: &str) -> Option<Self> {
        let ty = match tag {
            "int" | "i32" => Self::I32,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i64" => Self::I64,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "f32" => Self::F32,
            "float" | "f64" | "double" => Self::F64,
            "bool" => Self::Bool,
            "str" => Self::Str,
            _ => return None,
        };
        Some(ty)
    }
}

impl FromStr for TypeInfo {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if let Some(inner) = tag.strip_prefix('*') {
            return Ok(Self::pointer_to(inner.parse()?));
        }
        if tag == "void" || tag == "None" {
            return Ok(Self::Void);
        }
        if let Some(ty) = PrimitiveType::from_tag(tag) {
            return Ok(Self::Primitive(ty));
        }
        let mut chars = tag.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return Err(ModelError::InvalidType(s.to_string())),
        }
        if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(Self::Class(tag.to_string()))
        } else {
            Err(ModelError::InvalidType(s.to_string()))
        }
    }
}

impl TryFrom<String> for TypeInfo {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeInfo> for String {
    fn from(ty: TypeInfo) -> Self {
        ty.to_string()
    }
}

impl Default for TypeInfo {
    fn default() -> Self {
        Self::Void
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(ty) => write!(f, "{}", ty.tag()),
            Self::Pointer(inner) => write!(f, "*{}", inner),
            Self::Class(name) => write!(f, "{}", name),
            Self::Void => write!(f, "void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts() {
        let str_ty = TypeInfo::Primitive(PrimitiveType::Str);
        let null = TypeInfo::pointer_to(TypeInfo::Void);
        assert!(TypeInfo::int().accepts(&TypeInfo::Primitive(PrimitiveType::F64)));
        assert!(TypeInfo::Primitive(PrimitiveType::Bool).accepts(&TypeInfo::int()));
        assert!(!TypeInfo::int().accepts(&str_ty));
        assert!(!str_ty.accepts(&TypeInfo::int()));
        assert!(TypeInfo::class("User").accepts(&null));
        assert!(str_ty.accepts(&null));
        assert!(!TypeInfo::int().accepts(&null));
        assert!(!TypeInfo::class("User").accepts(&TypeInfo::class("Object")));
        assert!(!TypeInfo::Void.accepts(&TypeInfo::Void));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("int".parse::<TypeInfo>().unwrap(), TypeInfo::int());
        assert_eq!("float".parse::<TypeInfo>().unwrap(), TypeInfo::Primitive(PrimitiveType::F64));
        assert_eq!("User".parse::<TypeInfo>().unwrap(), TypeInfo::class("User"));
        assert_eq!("*u8".parse::<TypeInfo>().unwrap(), TypeInfo::pointer_to(TypeInfo::Primitive(PrimitiveType::U8)));
        assert_eq!("None".parse::<TypeInfo>().unwrap(), TypeInfo::Void);
        assert!("9lives".parse::<TypeInfo>().is_err());
        assert!("".parse::<TypeInfo>().is_err());
    }

    #[test]
    fn test_sizes_follow_word() {
        assert_eq!(TypeInfo::int().size(8), 4);
        assert_eq!(TypeInfo::class("User").size(8), 8);
        assert_eq!(TypeInfo::class("User").size(4), 4);
        assert_eq!(TypeInfo::Primitive(PrimitiveType::Str).alignment(4), 4);
        assert_eq!(TypeInfo::Primitive(PrimitiveType::I64).alignment(8), 8);
    }

    #[test]
    fn test_c_spelling() {
        assert_eq!(TypeInfo::int().c_type(), "int");
        assert_eq!(TypeInfo::class("User").c_type(), "User*");
        assert_eq!(TypeInfo::pointer_to(TypeInfo::Void).c_type(), "void*");
        assert_eq!(TypeInfo::Primitive(PrimitiveType::Str).c_type(), "char*");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let ty = TypeInfo::pointer_to(TypeInfo::class("Node"));
        assert_eq!(ty.to_string(), "*Node");
        assert_eq!(ty.to_string().parse::<TypeInfo>().unwrap(), ty);
    }
}
