mod modifiers;

pub use modifiers::Modifiers;

use serde::{Serialize, Serializer};
use std::fmt;

/// Primitive JVM types, including the descriptor character for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    pub fn from_descriptor(tag: u8) -> Option<Self> {
        let primitive = match tag {
            b'Z' => Self::Boolean,
            b'B' => Self::Byte,
            b'C' => Self::Char,
            b'S' => Self::Short,
            b'I' => Self::Int,
            b'J' => Self::Long,
            b'F' => Self::Float,
            b'D' => Self::Double,
            _ => return None,
        };
        Some(primitive)
    }
}

/// A concrete type as seen by the introspection view.
///
/// Reference names are binary names: packages separated by `.`, nested
/// classes separated by `$` (`java.util.Map$Entry`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Void,
    Primitive(PrimitiveType),
    Reference { name: String },
    Array {
        element: Box<JavaType>,
        dimensions: u8,
    },
}

impl JavaType {
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference { name: name.into() }
    }

    /// Wrap `element` into an array type, flattening nested arrays.
    pub fn array_of(element: JavaType, dimensions: u8) -> Self {
        match element {
            Self::Array {
                element,
                dimensions: inner,
            } => Self::Array {
                element,
                dimensions: inner + dimensions,
            },
            other => Self::Array {
                element: Box::new(other),
                dimensions,
            },
        }
    }

    /// Name without package or enclosing classes, like `Class.getSimpleName()`.
    ///
    /// `java.util.Map$Entry` -> `Entry`, `java.lang.String[][]` -> `String[][]`.
    pub fn simple_name(&self) -> String {
        match self {
            Self::Void => "void".to_string(),
            Self::Primitive(primitive) => primitive.keyword().to_string(),
            Self::Reference { name } => name
                .rsplit(['.', '$'])
                .next()
                .unwrap_or(name.as_str())
                .to_string(),
            Self::Array {
                element,
                dimensions,
            } => format!(
                "{}{}",
                element.simple_name(),
                "[]".repeat(*dimensions as usize)
            ),
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Primitive(primitive) => f.write_str(primitive.keyword()),
            Self::Reference { name } => f.write_str(&name.replace('$', ".")),
            Self::Array {
                element,
                dimensions,
            } => write!(f, "{element}{}", "[]".repeat(*dimensions as usize)),
        }
    }
}

impl Serialize for JavaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether an executable member is a constructor or a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Constructor,
    Method,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructor => f.write_str("constructor"),
            Self::Method => f.write_str("method"),
        }
    }
}

/// Tri-state nullability derived from parameter annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Nullability {
    NotNull,
    Nullable,
    /// No annotation, or conflicting annotations.
    #[default]
    Unknown,
}

impl fmt::Display for Nullability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNull => f.write_str("not-null"),
            Self::Nullable => f.write_str("nullable"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}
