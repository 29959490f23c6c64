//! Exception type resolution
//!
//! Resolves the exception name written after `@throws` to a loaded class.
//! Lookups are tried in a fixed order and the first hit wins:
//!
//! 1. the name as written;
//! 2. the name inside the standard namespace (`java.lang` by default);
//! 3. the first import, in file order, whose name contains the token;
//! 4. when enabled, the declaring package and each wildcard import.
//!
//! The import scan is a substring match, so `@throws Error` picks up
//! `import com.acme.ErrorCodes;` if that import comes first.

use crate::config::ResolutionConfig;
use crate::error::ResolveError;
use crate::introspect::{ClassHandle, Introspector};
use crate::parsing::SourceScope;
use tracing::debug;

/// One lookup strategy came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupMiss;

type Lookup = Result<ClassHandle, LookupMiss>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionResolver {
    standard_namespace: String,
    package_fallback: bool,
}

impl Default for ExceptionResolver {
    fn default() -> Self {
        Self::from_config(&ResolutionConfig::default())
    }
}

impl ExceptionResolver {
    pub fn new(standard_namespace: impl Into<String>) -> Self {
        Self {
            standard_namespace: standard_namespace.into(),
            package_fallback: false,
        }
    }

    pub fn from_config(config: &ResolutionConfig) -> Self {
        Self::new(config.standard_namespace.clone()).with_package_fallback(config.package_fallback)
    }

    pub fn with_package_fallback(mut self, enabled: bool) -> Self {
        self.package_fallback = enabled;
        self
    }

    pub fn standard_namespace(&self) -> &str {
        &self.standard_namespace
    }

    /// Resolve `name` as seen from a file with the given scope.
    pub fn resolve<I: Introspector + ?Sized>(
        &self,
        introspector: &I,
        name: &str,
        scope: &SourceScope,
    ) -> Result<ClassHandle, ResolveError> {
        self.direct(introspector, name)
            .or_else(|_| self.in_standard_namespace(introspector, name))
            .or_else(|_| self.from_imports(introspector, name, scope))
            .or_else(|_| self.from_package_or_wildcards(introspector, name, scope))
            .map_err(|_| ResolveError::ExceptionTypeNotFound {
                name: name.to_string(),
            })
    }

    fn direct<I: Introspector + ?Sized>(&self, introspector: &I, name: &str) -> Lookup {
        load(introspector, name)
    }

    fn in_standard_namespace<I: Introspector + ?Sized>(&self, introspector: &I, name: &str) -> Lookup {
        load(introspector, &format!("{}.{name}", self.standard_namespace))
    }

    fn from_imports<I: Introspector + ?Sized>(
        &self,
        introspector: &I,
        name: &str,
        scope: &SourceScope,
    ) -> Lookup {
        let import = scope
            .imports()
            .iter()
            .find(|import| import.name.contains(name))
            .ok_or(LookupMiss)?;
        load(introspector, &import.name)
    }

    fn from_package_or_wildcards<I: Introspector + ?Sized>(
        &self,
        introspector: &I,
        name: &str,
        scope: &SourceScope,
    ) -> Lookup {
        if !self.package_fallback {
            return Err(LookupMiss);
        }

        let same_package = std::iter::once(scope.qualify(name));
        let wildcards = scope
            .imports()
            .iter()
            .filter(|import| import.is_wildcard && !import.is_static)
            .map(|import| format!("{}.{name}", import.name));

        same_package
            .chain(wildcards)
            .find_map(|candidate| load(introspector, &candidate).ok())
            .ok_or(LookupMiss)
    }
}

fn load<I: Introspector + ?Sized>(introspector: &I, qualified_name: &str) -> Lookup {
    introspector.load_class(qualified_name).map_err(|_| {
        debug!("Exception lookup missed '{qualified_name}'");
        LookupMiss
    })
}
