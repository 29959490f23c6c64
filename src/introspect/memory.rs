//! In-memory introspection provider
//!
//! Serves classes registered through [`ClassBuilder`]. Useful when the
//! compiled view comes from somewhere other than class files on disk, and
//! for tests.

use super::{ClassHandle, Executable, Introspector};
use crate::error::{IntrospectError, IntrospectResult};
use crate::types::Modifiers;
use std::collections::HashMap;

/// Builder for one registered class.
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    handle: ClassHandle,
    executables: Vec<Executable>,
}

impl ClassBuilder {
    /// A public class with no executables; `name` is the binary name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handle: ClassHandle::new(name, Modifiers::PUBLIC),
            executables: Vec::new(),
        }
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.handle = ClassHandle::new(self.handle.name().to_string(), modifiers);
        self
    }

    pub fn executable(mut self, executable: Executable) -> Self {
        self.executables.push(executable);
        self
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryIntrospector {
    classes: HashMap<String, ClassBuilder>,
}

impl MemoryIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: ClassBuilder) -> Self {
        self.register(class);
        self
    }

    pub fn register(&mut self, class: ClassBuilder) {
        self.classes.insert(class.handle.name().to_string(), class);
    }

    /// Classes registered as `Outer$Inner` are also found as `Outer.Inner`.
    fn find(&self, name: &str) -> Option<&ClassBuilder> {
        self.classes.get(name).or_else(|| {
            self.classes
                .values()
                .find(|class| class.handle.name().replace('$', ".") == name)
        })
    }
}

impl Introspector for MemoryIntrospector {
    fn load_class(&self, qualified_name: &str) -> IntrospectResult<ClassHandle> {
        self.find(qualified_name)
            .map(|class| class.handle.clone())
            .ok_or_else(|| IntrospectError::ClassNotFound {
                name: qualified_name.to_string(),
            })
    }

    fn declared_executables(&self, class: &ClassHandle) -> IntrospectResult<Vec<Executable>> {
        self.find(class.name())
            .map(|registered| registered.executables.clone())
            .ok_or_else(|| IntrospectError::ClassNotFound {
                name: class.name().to_string(),
            })
    }
}
