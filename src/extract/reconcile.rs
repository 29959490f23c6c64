//! Member reconciliation
//!
//! Pairs every source declaration with exactly one compiled executable. Both
//! sides are reduced to a key of member kind, simple name and erased
//! parameter type names; the compiled side erases through
//! [`JavaType::simple_name`], the source side through [`erase_source_type`].

use crate::error::{ExtractError, ExtractResult};
use crate::introspect::Executable;
use crate::parsing::{CallableDeclaration, TypeParameter};
use crate::types::{JavaType, MemberKind};
use tracing::debug;

/// A source declaration and the compiled executable it corresponds to.
#[derive(Debug, Clone, Copy)]
pub struct ReconciledPair<'a> {
    pub declaration: &'a CallableDeclaration,
    pub executable: &'a Executable,
}

#[derive(Debug, PartialEq, Eq)]
struct MatchKey<'a> {
    kind: MemberKind,
    name: &'a str,
    parameter_types: Vec<String>,
}

impl<'a> MatchKey<'a> {
    fn of_executable(executable: &'a Executable) -> Self {
        Self {
            kind: executable.kind,
            name: &executable.name,
            parameter_types: executable
                .parameter_types
                .iter()
                .map(JavaType::simple_name)
                .collect(),
        }
    }

    fn of_declaration(
        declaration: &'a CallableDeclaration,
        class_type_parameters: &[TypeParameter],
    ) -> Self {
        // Member type parameters shadow the class's
        let type_variables: Vec<&TypeParameter> = declaration
            .type_parameters
            .iter()
            .chain(class_type_parameters)
            .collect();

        Self {
            kind: declaration.kind,
            name: &declaration.name,
            parameter_types: declaration
                .parameters()
                .iter()
                .map(|parameter| {
                    erase_source_type(&parameter.full_type_name(), &type_variables)
                })
                .collect(),
        }
    }
}

/// Pair each declaration with its executable, in declaration order.
pub fn reconcile<'a>(
    class_name: &str,
    class_type_parameters: &[TypeParameter],
    declarations: &[&'a CallableDeclaration],
    executables: &'a [Executable],
) -> ExtractResult<Vec<ReconciledPair<'a>>> {
    if declarations.len() != executables.len() {
        return Err(ExtractError::StructuralMismatch {
            class: class_name.to_string(),
            introspected: executables.len(),
            declared: declarations.len(),
        });
    }

    let executable_keys: Vec<MatchKey> =
        executables.iter().map(MatchKey::of_executable).collect();

    declarations
        .iter()
        .map(|&declaration| {
            let key = MatchKey::of_declaration(declaration, class_type_parameters);
            let mut candidates = executables
                .iter()
                .zip(&executable_keys)
                .filter(|(_, candidate)| **candidate == key)
                .map(|(executable, _)| executable);

            match (candidates.next(), candidates.count()) {
                (None, _) => Err(ExtractError::MemberNotFound {
                    class: class_name.to_string(),
                    signature: declaration.signature(),
                }),
                (Some(executable), 0) => {
                    debug!(
                        "Matched {} to {}",
                        declaration.signature(),
                        executable.signature()
                    );
                    Ok(ReconciledPair {
                        declaration,
                        executable,
                    })
                }
                (Some(_), rest) => Err(ExtractError::AmbiguousMember {
                    class: class_name.to_string(),
                    signature: declaration.signature(),
                    candidates: rest + 1,
                }),
            }
        })
        .collect()
}

/// Erase a source type as written to the simple name its compiled form has.
///
/// `type_variables` are the type parameters in scope, innermost first. A type
/// variable erases to its first bound, or `Object` when unbounded.
pub fn erase_source_type(written: &str, type_variables: &[&TypeParameter]) -> String {
    erase_with_depth(written, type_variables, 0)
}

fn erase_with_depth(written: &str, type_variables: &[&TypeParameter], depth: usize) -> String {
    let raw = strip_generic_arguments(written);
    let (base, dimensions) = split_dimensions(&raw);
    let simple = base.rsplit('.').next().unwrap_or(base);

    let erased = match type_variables.iter().find(|variable| variable.name == simple) {
        // Depth bound terminates cyclic bounds
        Some(variable) if depth < type_variables.len() => match variable.bounds.first() {
            Some(bound) => erase_with_depth(bound, type_variables, depth + 1),
            None => "Object".to_string(),
        },
        _ => simple.to_string(),
    };

    format!("{erased}{}", "[]".repeat(dimensions))
}

/// Drop `<...>` groups (nesting included) and all whitespace.
fn strip_generic_arguments(written: &str) -> String {
    let mut depth = 0usize;
    let mut stripped = String::with_capacity(written.len());
    for c in written.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if depth == 0 && !c.is_whitespace() => stripped.push(c),
            _ => {}
        }
    }
    stripped
}

fn split_dimensions(raw: &str) -> (&str, usize) {
    let mut base = raw;
    let mut dimensions = 0;
    while let Some(rest) = base.strip_suffix("[]") {
        base = rest;
        dimensions += 1;
    }
    (base, dimensions)
}
