//! Configuration module for the extractor.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`.docspec/settings.toml`)
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `DOCSPEC_` and use double
//! underscores to separate nested levels:
//! - `DOCSPEC_EXTRACTION__PARALLEL_THREADS=8` sets `extraction.parallel_threads`
//! - `DOCSPEC_RESOLUTION__PACKAGE_FALLBACK=true` sets `resolution.package_fallback`
//! - `DOCSPEC_DEBUG=true` sets `debug`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".docspec";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "DOCSPEC_";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Workspace root directory (where .docspec is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Source file settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Compiled class lookup settings
    #[serde(default)]
    pub introspection: IntrospectionConfig,

    /// Annotation names recognized for parameter nullability
    #[serde(default)]
    pub nullability: NullabilityConfig,

    /// Exception type resolution settings
    #[serde(default)]
    pub resolution: ResolutionConfig,

    /// Multi-class extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourceConfig {
    /// Extension of source files, without the dot
    #[serde(default = "default_source_extension")]
    pub extension: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IntrospectionConfig {
    /// Directories holding compiled `.class` files
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Resolve common JDK exception types without JDK class files
    #[serde(default = "default_true")]
    pub jdk_catalog: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NullabilityConfig {
    /// Annotations marking a parameter as never null
    #[serde(default = "default_not_null_annotations")]
    pub not_null: Vec<String>,

    /// Annotations marking a parameter as possibly null
    #[serde(default = "default_nullable_annotations")]
    pub nullable: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResolutionConfig {
    /// Package implicitly visible to every source file
    #[serde(default = "default_standard_namespace")]
    pub standard_namespace: String,

    /// After imports, also try the declaring package and wildcard imports
    #[serde(default = "default_false")]
    pub package_fallback: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExtractionConfig {
    /// Number of classes extracted in parallel
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_source_extension() -> String {
    "java".to_string()
}
fn default_not_null_annotations() -> Vec<String> {
    vec![
        "NotNull".to_string(),
        "NonNull".to_string(),
        "Nonnull".to_string(),
    ]
}
fn default_nullable_annotations() -> Vec<String> {
    vec!["Nullable".to_string(), "CheckForNull".to_string()]
}
fn default_standard_namespace() -> String {
    "java.lang".to_string()
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            workspace_root: None,
            debug: false,
            source: SourceConfig::default(),
            introspection: IntrospectionConfig::default(),
            nullability: NullabilityConfig::default(),
            resolution: ResolutionConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            extension: default_source_extension(),
        }
    }
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            classpath: Vec::new(),
            jdk_catalog: true,
        }
    }
}

impl Default for NullabilityConfig {
    fn default() -> Self {
        Self {
            not_null: default_not_null_annotations(),
            nullable: default_nullable_annotations(),
        }
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            standard_namespace: default_standard_namespace(),
            package_fallback: false,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        // Try to find the workspace root by looking for .docspec directory
        let config_path =
            Self::find_workspace_config().unwrap_or_else(|| Path::new(CONFIG_DIR).join(CONFIG_FILE));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(config_path))
            // Double underscore (__) separates nested levels
            .merge(Env::prefixed(ENV_PREFIX).map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".")
                    .into()
            }))
    }

    /// Find the workspace config by looking for a .docspec directory
    /// Searches from current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Get the workspace root directory (where .docspec is located)
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Check if configuration is properly initialized
    pub fn check_init() -> Result<(), String> {
        let config_path =
            Self::find_workspace_config().unwrap_or_else(|| Path::new(CONFIG_DIR).join(CONFIG_FILE));

        if !config_path.exists() {
            return Err("No configuration file found".to_string());
        }

        match std::fs::read_to_string(&config_path) {
            Ok(content) => {
                if let Err(e) = toml::from_str::<Settings>(&content) {
                    return Err(format!(
                        "Configuration file is corrupted: {e}\nRun 'docspec init --force' to regenerate."
                    ));
                }
            }
            Err(e) => {
                return Err(format!("Cannot read configuration file: {e}"));
            }
        }

        Ok(())
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = Path::new(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = format!(
            r#"# docspec configuration file

# Version of the configuration schema
version = 1

# Global debug mode (debug-level logging on stderr)
debug = false

[source]
# Extension of source files under the source root
extension = "java"

[introspection]
# Directories holding compiled .class files, searched in order
classpath = []

# Resolve common JDK exception types (java.lang, java.io, java.util, ...)
# without JDK class files on the classpath
jdk_catalog = true

[nullability]
# Parameter annotations, matched by written or simple name
not_null = ["NotNull", "NonNull", "Nonnull"]
nullable = ["Nullable", "CheckForNull"]

[resolution]
# Package whose types need no import
standard_namespace = "java.lang"

# After scanning imports, also look up @throws names in the declaring
# package and in wildcard imports
package_fallback = false

[extraction]
# Number of classes extracted in parallel (defaults to CPU count)
parallel_threads = {}
"#,
            num_cpus::get()
        );

        std::fs::write(&config_path, template)?;

        Ok(config_path)
    }
}
