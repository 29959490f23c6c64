/// The main library module for docspec
pub mod config;
pub mod error;
pub mod extract;
pub mod introspect;
pub mod member;
pub mod parsing;
pub mod types;

// Explicit exports for better API clarity
pub use config::Settings;
pub use error::{
    ExtractError, ExtractResult, IntrospectError, IntrospectResult, ParseError, ParseResult,
    ResolveError,
};
pub use extract::{ExceptionResolver, JavadocExtractor, NullabilityPolicy};
pub use introspect::{
    ClassBuilder, ClassHandle, ClassPathIntrospector, Executable, Introspector, MemoryIntrospector,
};
pub use member::{ExecutableMember, Parameter, Tag};
pub use parsing::{JavaSourceParser, SourceParser};
pub use types::{JavaType, MemberKind, Modifiers, Nullability, PrimitiveType};
