//! Extraction pipeline
//!
//! [`JavadocExtractor`] joins the compiled and source views of a class:
//!
//! 1. load the class through the [`Introspector`];
//! 2. parse `<source root>/<package path>/<Class>.java`;
//! 3. reconcile declarations with executables ([`reconcile`]);
//! 4. merge parameters ([`params`]) and convert Javadoc tags ([`tags`]),
//!    resolving `@throws` names through [`resolve`].
//!
//! Every step is fatal for the class on failure except dropped `@param`
//! tags and conflicting nullability annotations.

pub mod params;
pub mod reconcile;
pub mod resolve;
pub mod tags;

pub use params::{NullabilityPolicy, build_parameters};
pub use reconcile::{ReconciledPair, erase_source_type, reconcile};
pub use resolve::{ExceptionResolver, LookupMiss};
pub use tags::{TagContext, extract_tags};

use crate::config::Settings;
use crate::error::{ExtractError, ExtractResult, ParseError};
use crate::introspect::{ClassPathIntrospector, Introspector, visible_executables};
use crate::member::ExecutableMember;
use crate::parsing::{JavaSourceParser, SourceParser, visible_declarations};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outcome of extracting one class in a batch.
pub type ClassExtraction = (String, ExtractResult<Vec<ExecutableMember>>);

pub struct JavadocExtractor<I, P = JavaSourceParser> {
    introspector: I,
    parser: P,
    nullability: NullabilityPolicy,
    resolver: ExceptionResolver,
    source_extension: String,
    parallel_threads: usize,
}

impl JavadocExtractor<ClassPathIntrospector> {
    /// Extractor reading class files from the configured classpath.
    pub fn from_settings(settings: &Settings) -> Self {
        let introspector =
            ClassPathIntrospector::new(settings.introspection.classpath.iter().cloned())
                .with_jdk_catalog(settings.introspection.jdk_catalog);
        Self::with_settings(introspector, settings)
    }
}

impl<I: Introspector> JavadocExtractor<I> {
    pub fn new(introspector: I) -> Self {
        Self::with_settings(introspector, &Settings::default())
    }

    pub fn with_settings(introspector: I, settings: &Settings) -> Self {
        Self {
            introspector,
            parser: JavaSourceParser::new(),
            nullability: NullabilityPolicy::from_config(&settings.nullability),
            resolver: ExceptionResolver::from_config(&settings.resolution),
            source_extension: settings.source.extension.clone(),
            parallel_threads: settings.extraction.parallel_threads,
        }
    }
}

impl<I: Introspector, P: SourceParser> JavadocExtractor<I, P> {
    /// Swap the source parser.
    pub fn with_parser<Q: SourceParser>(self, parser: Q) -> JavadocExtractor<I, Q> {
        JavadocExtractor {
            introspector: self.introspector,
            parser,
            nullability: self.nullability,
            resolver: self.resolver,
            source_extension: self.source_extension,
            parallel_threads: self.parallel_threads,
        }
    }

    pub fn with_nullability(mut self, nullability: NullabilityPolicy) -> Self {
        self.nullability = nullability;
        self
    }

    pub fn with_resolver(mut self, resolver: ExceptionResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }

    pub fn with_parallel_threads(mut self, threads: usize) -> Self {
        self.parallel_threads = threads;
        self
    }

    /// `source_root/com/acme/Widget.java` for `com.acme.Widget`.
    pub fn source_path_for(&self, class_name: &str, source_root: &Path) -> PathBuf {
        let mut path = source_root.to_path_buf();
        let mut segments = class_name.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{segment}.{}", self.source_extension));
            }
        }
        path
    }

    /// Extract every non-private constructor and method of a top-level class.
    ///
    /// Constructors come first, then methods, each in source order.
    pub fn extract(
        &self,
        class_name: &str,
        source_root: &Path,
    ) -> ExtractResult<Vec<ExecutableMember>> {
        debug!("Extracting {class_name}");

        let class = self
            .introspector
            .load_class(class_name)
            .map_err(|source| ExtractError::ClassNotFound {
                class: class_name.to_string(),
                source,
            })?;

        let path = self.source_path_for(class_name, source_root);
        let unit = self.parser.parse_file(&path).map_err(|source| match source {
            ParseError::FileNotFound { path } => ExtractError::FileNotFound {
                class: class_name.to_string(),
                path,
            },
            source => ExtractError::SourceParse {
                class: class_name.to_string(),
                source,
            },
        })?;

        let simple_name = class_name.rsplit('.').next().unwrap_or(class_name);
        let declaration = unit.find_class_by_name(simple_name).ok_or_else(|| {
            ExtractError::ClassDeclarationNotFound {
                name: simple_name.to_string(),
                path: path.clone(),
            }
        })?;

        let executables = visible_executables(&self.introspector, &class).map_err(|source| {
            ExtractError::Introspection {
                class: class_name.to_string(),
                source,
            }
        })?;
        let declarations = visible_declarations(declaration);

        let pairs = reconcile(
            class_name,
            &declaration.type_parameters,
            &declarations,
            &executables,
        )?;

        let members = pairs
            .iter()
            .map(|pair| -> ExtractResult<ExecutableMember> {
                let parameters = build_parameters(class_name, pair, &self.nullability)?;
                let signature = pair.declaration.signature();
                let context = TagContext {
                    class_name,
                    member: &signature,
                    parameters: &parameters,
                    scope: unit.scope(),
                    introspector: &self.introspector,
                    resolver: &self.resolver,
                };
                let tags = extract_tags(pair.declaration.javadoc(), &context)?;

                Ok(ExecutableMember::new(
                    class_name,
                    pair.executable.kind,
                    pair.executable.name.clone(),
                    pair.executable.modifiers,
                    pair.executable.return_type.clone(),
                    parameters,
                    tags,
                ))
            })
            .collect::<ExtractResult<Vec<_>>>()?;

        info!("Extracted {} members from {class_name}", members.len());
        Ok(members)
    }

    /// Extract many classes in parallel. Results keep the input order.
    pub fn extract_all(&self, class_names: &[String], source_root: &Path) -> Vec<ClassExtraction> {
        let run = || {
            class_names
                .par_iter()
                .map(|class_name| (class_name.clone(), self.extract(class_name, source_root)))
                .collect::<Vec<ClassExtraction>>()
        };

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallel_threads)
            .build()
        {
            Ok(pool) => pool.install(run),
            Err(e) => {
                warn!(
                    "Failed to build a {}-thread pool, using the global one: {e}",
                    self.parallel_threads
                );
                run()
            }
        }
    }

    /// Qualified names of the classes a source tree declares, by file layout.
    ///
    /// `com/acme/Widget.java` under `source_root` becomes `com.acme.Widget`.
    /// Sorted, so batch output is deterministic.
    pub fn discover_classes(&self, source_root: &Path) -> Vec<String> {
        let mut classes: Vec<String> = WalkDir::new(source_root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(source_root).ok()?;
                class_name_for(relative, &self.source_extension)
            })
            .collect();
        classes.sort();
        classes
    }
}

fn class_name_for(relative: &Path, extension: &str) -> Option<String> {
    if relative.extension()? != extension {
        return None;
    }
    let stem = relative.file_stem()?.to_str()?;
    // package-info.java and module-info.java declare no class
    if stem.contains('-') {
        return None;
    }

    let mut segments: Vec<&str> = relative
        .parent()
        .into_iter()
        .flat_map(|parent| parent.components())
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<&str>>>()?;
    segments.push(stem);
    Some(segments.join("."))
}
