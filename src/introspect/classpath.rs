//! Class-path introspection provider
//!
//! Resolves class names to `.class` files under a list of classpath
//! directories and decodes them with [`super::classfile`]. Parsed classes are
//! memoized so that concurrent extractions share class-file reads.

use super::classfile::{self, ParsedClass};
use super::jdk::is_jdk_throwable;
use super::{ClassHandle, Executable, Introspector};
use crate::error::{IntrospectError, IntrospectResult};
use crate::types::Modifiers;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct ClassPathIntrospector {
    roots: Vec<PathBuf>,
    jdk_catalog: bool,
    cache: DashMap<String, Arc<ParsedClass>>,
}

impl ClassPathIntrospector {
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            roots: roots.into_iter().collect(),
            jdk_catalog: true,
            cache: DashMap::new(),
        }
    }

    /// Answer lookups of platform exception types from the built-in catalog
    pub fn with_jdk_catalog(mut self, enabled: bool) -> Self {
        self.jdk_catalog = enabled;
        self
    }

    /// Locate, read and decode the class file for `name`, if there is one.
    fn find(&self, name: &str) -> IntrospectResult<Option<Arc<ParsedClass>>> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(Some(Arc::clone(cached.value())));
        }

        for relative in candidate_paths(name) {
            for root in &self.roots {
                let path = root.join(&relative);
                if !path.is_file() {
                    continue;
                }

                let parsed = Arc::new(read_class_file(&path)?);
                debug!("Loaded {} from {}", parsed.name, path.display());
                self.cache.insert(name.to_string(), Arc::clone(&parsed));
                if parsed.name != name {
                    self.cache.insert(parsed.name.clone(), Arc::clone(&parsed));
                }
                return Ok(Some(parsed));
            }
        }

        Ok(None)
    }
}

fn read_class_file(path: &Path) -> IntrospectResult<ParsedClass> {
    let bytes = std::fs::read(path).map_err(|source| IntrospectError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    classfile::parse_class(&bytes).map_err(|source| IntrospectError::ClassFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// Relative class-file paths that may hold `name`.
///
/// A dotted name does not say where the package ends and nesting begins, so
/// `a.b.C.D` yields `a/b/C/D.class`, `a/b/C$D.class`, `a/b$C$D.class`, ...
fn candidate_paths(name: &str) -> Vec<PathBuf> {
    let segments: Vec<&str> = name.split('.').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Vec::new();
    }

    (1..=segments.len())
        .rev()
        .map(|package_end| {
            let package = &segments[..package_end - 1];
            let class = segments[package_end - 1..].join("$");
            let mut path: PathBuf = package.iter().collect();
            path.push(format!("{class}.class"));
            path
        })
        .collect()
}

impl Introspector for ClassPathIntrospector {
    fn load_class(&self, qualified_name: &str) -> IntrospectResult<ClassHandle> {
        if let Some(parsed) = self.find(qualified_name)? {
            return Ok(ClassHandle::new(parsed.name.clone(), parsed.access));
        }

        if self.jdk_catalog && is_jdk_throwable(qualified_name) {
            debug!("Resolved {qualified_name} from the JDK catalog");
            return Ok(ClassHandle::new(qualified_name, Modifiers::PUBLIC));
        }

        Err(IntrospectError::ClassNotFound {
            name: qualified_name.to_string(),
        })
    }

    fn declared_executables(&self, class: &ClassHandle) -> IntrospectResult<Vec<Executable>> {
        match self.find(class.name())? {
            Some(parsed) => Ok(parsed.executables()),
            // Catalog entries carry no member information
            None if self.jdk_catalog && is_jdk_throwable(class.name()) => Ok(Vec::new()),
            None => Err(IntrospectError::ClassNotFound {
                name: class.name().to_string(),
            }),
        }
    }
}
