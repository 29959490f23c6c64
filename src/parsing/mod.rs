//! Source declaration adapter
//!
//! The source view of a class: parameter names, annotations and Javadoc as
//! the author wrote them. Parsers implement [`SourceParser`];
//! [`JavaSourceParser`] is the tree-sitter based implementation.

pub mod java;
pub mod javadoc;
pub mod unit;

pub use java::JavaSourceParser;
pub use javadoc::{BlockTag, BlockTagKind, Javadoc};
pub use unit::{
    CallableDeclaration, CompilationUnit, ImportDeclaration, SourceParameter, SourceScope,
    TypeDeclaration, TypeKind, TypeParameter,
};

use crate::error::ParseResult;
use std::path::Path;

/// Common interface for source parsers
pub trait SourceParser: Send + Sync {
    /// Parse one source file into its declarations
    fn parse_file(&self, path: &Path) -> ParseResult<CompilationUnit>;
}

/// Non-private constructor and method declarations of a type, constructors first.
pub fn visible_declarations(declaration: &TypeDeclaration) -> Vec<&CallableDeclaration> {
    declaration
        .callables()
        .iter()
        .filter(|callable| !callable.is_private())
        .collect()
}
