//! Error types for the extraction pipeline
//!
//! This module provides structured error types using thiserror so every
//! failure names the class, member and offending name involved.

use crate::introspect::classfile::ClassParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extracting the members of one class
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Collaborator errors
    #[error("Class '{class}' could not be loaded: {source}")]
    ClassNotFound {
        class: String,
        source: IntrospectError,
    },

    #[error("Source file for class '{class}' not found at '{path}'")]
    FileNotFound { class: String, path: PathBuf },

    #[error("Failed to parse source of class '{class}': {source}")]
    SourceParse { class: String, source: ParseError },

    #[error("No top-level class or interface named '{name}' in '{path}'")]
    ClassDeclarationNotFound { name: String, path: PathBuf },

    #[error("Failed to read members of class '{class}': {source}")]
    Introspection {
        class: String,
        source: IntrospectError,
    },

    /// Reconciliation errors
    #[error(
        "Class '{class}' has {introspected} non-private executables in compiled form but {declared} in source"
    )]
    StructuralMismatch {
        class: String,
        introspected: usize,
        declared: usize,
    },

    #[error("Cannot find compiled member corresponding to {signature} in class '{class}'")]
    MemberNotFound { class: String, signature: String },

    #[error(
        "Found {candidates} compiled members corresponding to {signature} in class '{class}'"
    )]
    AmbiguousMember {
        class: String,
        signature: String,
        candidates: usize,
    },

    #[error(
        "Member {member} of class '{class}' declares {declared} parameters in source but {introspected} in compiled form"
    )]
    ParameterCountMismatch {
        class: String,
        member: String,
        declared: usize,
        introspected: usize,
    },

    /// Documentation errors
    #[error("Cannot resolve exception type '{name}' documented on {member} in class '{class}'")]
    UnresolvedExceptionType {
        class: String,
        member: String,
        name: String,
    },
}

impl ExtractError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON output
    /// for programmatic error handling.
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::ClassNotFound { .. } => "CLASS_NOT_FOUND",
            Self::FileNotFound { .. } => "FILE_NOT_FOUND",
            Self::SourceParse { .. } => "PARSE_ERROR",
            Self::ClassDeclarationNotFound { .. } => "CLASS_DECLARATION_NOT_FOUND",
            Self::Introspection { .. } => "INTROSPECTION_ERROR",
            Self::StructuralMismatch { .. } => "STRUCTURAL_MISMATCH",
            Self::MemberNotFound { .. } => "MEMBER_NOT_FOUND",
            Self::AmbiguousMember { .. } => "AMBIGUOUS_MEMBER",
            Self::ParameterCountMismatch { .. } => "PARAMETER_COUNT_MISMATCH",
            Self::UnresolvedExceptionType { .. } => "UNRESOLVED_EXCEPTION_TYPE",
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::ClassNotFound { .. } => vec![
                "Check that the compiled classes directory is on the classpath (--classpath)",
                "Make sure the project was compiled after the last source change",
            ],
            Self::FileNotFound { .. } => vec![
                "Check that --source points at the source root, not the package directory",
                "Nested classes are not supported; pass the top-level class name",
            ],
            Self::StructuralMismatch { .. } | Self::MemberNotFound { .. } => vec![
                "Recompile the class; the compiled form may be out of date with the source",
                "Check the source file for syntax errors that hide members from the parser",
            ],
            Self::AmbiguousMember { .. } => vec![
                "Overloads that differ only in generic type arguments cannot be told apart",
            ],
            Self::UnresolvedExceptionType { .. } => vec![
                "Import the exception type or use its fully qualified name in the @throws tag",
                "Add the library defining the exception to the classpath",
                "Enable resolution.package_fallback to also search the declaring package",
            ],
            _ => vec![],
        }
    }
}

/// Errors reported by an introspection provider
#[derive(Error, Debug)]
pub enum IntrospectError {
    #[error("Class '{name}' not found on the classpath")]
    ClassNotFound { name: String },

    #[error("Failed to read class file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed class file '{path}': {source}")]
    ClassFormat {
        path: PathBuf,
        source: ClassParseError,
    },
}

/// Errors specific to parsing source files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Source file '{path}' not found")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to initialize {language} parser: {reason}")]
    ParserInit { language: String, reason: String },

    #[error("Failed to parse '{path}': {reason}")]
    SyntaxError { path: PathBuf, reason: String },
}

/// Errors from resolving a documented exception name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Exception type '{name}' not found")]
    ExceptionTypeNotFound { name: String },
}

/// Result type alias for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Result type alias for introspection providers
pub type IntrospectResult<T> = Result<T, IntrospectError>;

/// Result type alias for source parsing
pub type ParseResult<T> = Result<T, ParseError>;
