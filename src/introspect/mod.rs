//! Introspection adapter
//!
//! The compiled view of a class: exact parameter types and modifiers of its
//! constructors and methods. Providers implement [`Introspector`];
//! [`ClassPathIntrospector`] reads class files from disk and
//! [`MemoryIntrospector`] serves programmatically registered classes.

pub mod classfile;
mod classpath;
mod jdk;
mod memory;

pub use classpath::ClassPathIntrospector;
pub use jdk::is_jdk_throwable;
pub use memory::{ClassBuilder, MemoryIntrospector};

use crate::error::IntrospectResult;
use crate::types::{JavaType, MemberKind, Modifiers};
use std::sync::Arc;

/// A class that an introspector successfully loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassHandle {
    name: String,
    modifiers: Modifiers,
}

impl ClassHandle {
    /// `name` is the binary name (`com.acme.Outer$Inner`).
    pub fn new(name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            modifiers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit(['.', '$']).next().unwrap_or(&self.name)
    }

    pub fn as_type(&self) -> JavaType {
        JavaType::reference(self.name.clone())
    }
}

/// A constructor or method as reported by the compiled view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    pub kind: MemberKind,
    /// Simple member name; constructors carry the class's simple name
    pub name: String,
    pub parameter_types: Vec<JavaType>,
    /// `None` for constructors
    pub return_type: Option<JavaType>,
    pub modifiers: Modifiers,
}

impl Executable {
    pub fn constructor(class_simple_name: impl Into<String>, parameter_types: Vec<JavaType>) -> Self {
        Self {
            kind: MemberKind::Constructor,
            name: class_simple_name.into(),
            parameter_types,
            return_type: None,
            modifiers: Modifiers::PUBLIC,
        }
    }

    pub fn method(
        name: impl Into<String>,
        parameter_types: Vec<JavaType>,
        return_type: JavaType,
    ) -> Self {
        Self {
            kind: MemberKind::Method,
            name: name.into(),
            parameter_types,
            return_type: Some(return_type),
            modifiers: Modifiers::PUBLIC,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// `name(Type, Type)` using simple type names.
    pub fn signature(&self) -> String {
        let types: Vec<String> = self
            .parameter_types
            .iter()
            .map(JavaType::simple_name)
            .collect();
        format!("{}({})", self.name, types.join(", "))
    }
}

/// Common interface for all introspection providers
pub trait Introspector: Send + Sync {
    /// Load a class by qualified or binary name
    fn load_class(&self, qualified_name: &str) -> IntrospectResult<ClassHandle>;

    /// Every constructor and method the class itself declares, including
    /// private and compiler-generated ones
    fn declared_executables(&self, class: &ClassHandle) -> IntrospectResult<Vec<Executable>>;
}

impl<T: Introspector + ?Sized> Introspector for &T {
    fn load_class(&self, qualified_name: &str) -> IntrospectResult<ClassHandle> {
        (**self).load_class(qualified_name)
    }

    fn declared_executables(&self, class: &ClassHandle) -> IntrospectResult<Vec<Executable>> {
        (**self).declared_executables(class)
    }
}

impl<T: Introspector + ?Sized> Introspector for Arc<T> {
    fn load_class(&self, qualified_name: &str) -> IntrospectResult<ClassHandle> {
        (**self).load_class(qualified_name)
    }

    fn declared_executables(&self, class: &ClassHandle) -> IntrospectResult<Vec<Executable>> {
        (**self).declared_executables(class)
    }
}

/// Non-private constructors and methods that exist in source form.
///
/// Synthetic and bridge members are compiler artifacts with no source
/// declaration, so they are dropped along with private ones. Constructors
/// come first.
pub fn visible_executables<I: Introspector + ?Sized>(
    introspector: &I,
    class: &ClassHandle,
) -> IntrospectResult<Vec<Executable>> {
    let (constructors, methods): (Vec<Executable>, Vec<Executable>) = introspector
        .declared_executables(class)?
        .into_iter()
        .filter(|executable| {
            !executable.modifiers.is_private() && !executable.modifiers.is_synthetic()
        })
        .partition(|executable| executable.kind == MemberKind::Constructor);

    Ok(constructors.into_iter().chain(methods).collect())
}
