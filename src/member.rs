//! Extracted executable members: the sole output of the extraction pipeline.

use crate::types::{JavaType, MemberKind, Modifiers, Nullability};
use serde::Serialize;
use std::fmt;

/// One formal parameter of an executable member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Declared type, taken from the introspection view
    #[serde(rename = "type")]
    pub ty: JavaType,
    /// Name as written in source
    pub name: String,
    pub nullability: Nullability,
}

impl Parameter {
    pub fn new(ty: JavaType, name: impl Into<String>, nullability: Nullability) -> Self {
        Self {
            ty,
            name: name.into(),
            nullability,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)?;
        if self.nullability != Nullability::Unknown {
            write!(f, " [{}]", self.nullability)?;
        }
        Ok(())
    }
}

/// A recognized Javadoc block tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Tag {
    /// `@param`; `position` indexes the owning member's parameter list.
    Param { position: usize, comment: String },
    /// `@return`
    Return { comment: String },
    /// `@throws` with its exception resolved to a concrete type.
    Throws { exception: JavaType, comment: String },
}

impl Tag {
    pub fn comment(&self) -> &str {
        match self {
            Self::Param { comment, .. } | Self::Return { comment } | Self::Throws { comment, .. } => {
                comment
            }
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Param { .. } => "param",
            Self::Return { .. } => "return",
            Self::Throws { .. } => "throws",
        }
    }
}

/// A constructor or method with its merged parameter list and parsed tags.
///
/// Built once per reconciled (source, introspected) pair and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutableMember {
    class_name: String,
    kind: MemberKind,
    name: String,
    modifiers: Modifiers,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_type: Option<JavaType>,
    parameters: Vec<Parameter>,
    tags: Vec<Tag>,
}

impl ExecutableMember {
    pub(crate) fn new(
        class_name: impl Into<String>,
        kind: MemberKind,
        name: impl Into<String>,
        modifiers: Modifiers,
        return_type: Option<JavaType>,
        parameters: Vec<Parameter>,
        tags: Vec<Tag>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            kind,
            name: name.into(),
            modifiers,
            return_type,
            parameters,
            tags,
        }
    }

    /// Qualified name of the owning class
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Return type for methods; `None` for constructors
    pub fn return_type(&self) -> Option<&JavaType> {
        self.return_type.as_ref()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The parameter a `Tag::Param` refers to.
    pub fn tagged_parameter(&self, tag: &Tag) -> Option<&Parameter> {
        match tag {
            Tag::Param { position, .. } => self.parameters.get(*position),
            _ => None,
        }
    }

    pub fn param_tags(&self) -> impl Iterator<Item = (&Parameter, &str)> {
        self.tags.iter().filter_map(|tag| {
            self.tagged_parameter(tag)
                .map(|parameter| (parameter, tag.comment()))
        })
    }

    pub fn return_tag(&self) -> Option<&str> {
        self.tags.iter().find_map(|tag| match tag {
            Tag::Return { comment } => Some(comment.as_str()),
            _ => None,
        })
    }

    pub fn throws_tags(&self) -> impl Iterator<Item = (&JavaType, &str)> {
        self.tags.iter().filter_map(|tag| match tag {
            Tag::Throws { exception, comment } => Some((exception, comment.as_str())),
            _ => None,
        })
    }

    /// `name(Type, Type)` using simple type names.
    pub fn signature(&self) -> String {
        let types: Vec<String> = self
            .parameters
            .iter()
            .map(|parameter| parameter.ty.simple_name())
            .collect();
        format!("{}({})", self.name, types.join(", "))
    }
}

impl fmt::Display for ExecutableMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = self.modifiers.to_string();
        if !modifiers.is_empty() {
            write!(f, "{modifiers} ")?;
        }
        if let Some(return_type) = &self.return_type {
            write!(f, "{return_type} ")?;
        }
        let parameters: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        writeln!(f, "{}({})", self.name, parameters.join(", "))?;

        for tag in &self.tags {
            match tag {
                Tag::Param { position, comment } => {
                    let name = self
                        .parameters
                        .get(*position)
                        .map(|p| p.name.as_str())
                        .unwrap_or("?");
                    writeln!(f, "  @param {name} {comment}")?;
                }
                Tag::Return { comment } => writeln!(f, "  @return {comment}")?,
                Tag::Throws { exception, comment } => {
                    writeln!(f, "  @throws {exception} {comment}")?
                }
            }
        }
        Ok(())
    }
}
