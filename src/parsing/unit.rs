//! Source-level declarations of a parsed Java file.

use super::javadoc::Javadoc;
use crate::types::MemberKind;
use std::path::PathBuf;

/// An `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// Imported name without `static` or the trailing `.*`
    pub name: String,
    pub is_static: bool,
    pub is_wildcard: bool,
}

/// Name-resolution context shared by all declarations of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceScope {
    pub package: Option<String>,
    pub imports: Vec<ImportDeclaration>,
}

impl SourceScope {
    pub fn imports(&self) -> &[ImportDeclaration] {
        &self.imports
    }

    /// Qualify a simple name with this file's package.
    pub fn qualify(&self, simple_name: &str) -> String {
        match &self.package {
            Some(package) => format!("{package}.{simple_name}"),
            None => simple_name.to_string(),
        }
    }
}

/// A generic type parameter (`T extends Comparable<T>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    /// Bound types as written, first bound first
    pub bounds: Vec<String>,
}

/// A formal parameter as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceParameter {
    /// Type as written (`List<String>`, `int[]`), without varargs dots
    pub type_name: String,
    pub name: String,
    /// Annotation names as written, without `@` or arguments
    pub annotations: Vec<String>,
    pub is_varargs: bool,
    /// C-style dimensions after the name (`int values[]`)
    pub extra_dimensions: usize,
}

impl SourceParameter {
    /// Type text with varargs and C-style dimensions folded in.
    pub fn full_type_name(&self) -> String {
        let mut dimensions = self.extra_dimensions;
        if self.is_varargs {
            dimensions += 1;
        }
        format!("{}{}", self.type_name, "[]".repeat(dimensions))
    }
}

/// A constructor or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableDeclaration {
    pub kind: MemberKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub type_parameters: Vec<TypeParameter>,
    pub parameters: Vec<SourceParameter>,
    pub javadoc: Option<Javadoc>,
    /// Compiler-supplied default constructor, absent from the file
    pub is_implicit: bool,
}

impl CallableDeclaration {
    pub fn parameters(&self) -> &[SourceParameter] {
        &self.parameters
    }

    pub fn javadoc(&self) -> Option<&Javadoc> {
        self.javadoc.as_ref()
    }

    pub fn is_private(&self) -> bool {
        self.modifiers.iter().any(|m| m == "private")
    }

    /// `name(Type, Type)` with types as written.
    pub fn signature(&self) -> String {
        let types: Vec<String> = self
            .parameters
            .iter()
            .map(SourceParameter::full_type_name)
            .collect();
        format!("{}({})", self.name, types.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub kind: TypeKind,
    pub name: String,
    pub modifiers: Vec<String>,
    pub type_parameters: Vec<TypeParameter>,
    /// Constructors in file order followed by methods in file order
    pub callables: Vec<CallableDeclaration>,
}

impl TypeDeclaration {
    pub fn callables(&self) -> &[CallableDeclaration] {
        &self.callables
    }

    pub fn constructors(&self) -> impl Iterator<Item = &CallableDeclaration> {
        self.callables
            .iter()
            .filter(|c| c.kind == MemberKind::Constructor)
    }

    pub fn methods(&self) -> impl Iterator<Item = &CallableDeclaration> {
        self.callables.iter().filter(|c| c.kind == MemberKind::Method)
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub path: PathBuf,
    pub scope: SourceScope,
    pub types: Vec<TypeDeclaration>,
}

impl CompilationUnit {
    pub fn scope(&self) -> &SourceScope {
        &self.scope
    }

    pub fn imports(&self) -> &[ImportDeclaration] {
        &self.scope.imports
    }

    /// Top-level class or interface named `name`.
    pub fn find_class_by_name(&self, name: &str) -> Option<&TypeDeclaration> {
        self.types.iter().find(|declaration| {
            declaration.name == name
                && matches!(declaration.kind, TypeKind::Class | TypeKind::Interface)
        })
    }
}
