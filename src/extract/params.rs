//! Parameter merging and nullability classification

use crate::config::NullabilityConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::member::Parameter;
use crate::types::Nullability;
use tracing::debug;

use super::reconcile::ReconciledPair;

/// Annotation sets that decide a parameter's [`Nullability`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullabilityPolicy {
    not_null: Vec<String>,
    nullable: Vec<String>,
}

impl Default for NullabilityPolicy {
    fn default() -> Self {
        Self::from_config(&NullabilityConfig::default())
    }
}

impl NullabilityPolicy {
    pub fn new<S: Into<String>>(
        not_null: impl IntoIterator<Item = S>,
        nullable: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            not_null: not_null.into_iter().map(Into::into).collect(),
            nullable: nullable.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &NullabilityConfig) -> Self {
        Self::new(config.not_null.iter().cloned(), config.nullable.iter().cloned())
    }

    /// Classify a parameter from its annotation names.
    ///
    /// Annotations found in both sets cancel out to [`Nullability::Unknown`].
    pub fn classify<S: AsRef<str>>(&self, annotations: &[S]) -> Nullability {
        let not_null: Vec<&str> = annotations
            .iter()
            .map(AsRef::as_ref)
            .filter(|annotation| contains_annotation(&self.not_null, annotation))
            .collect();
        let nullable: Vec<&str> = annotations
            .iter()
            .map(AsRef::as_ref)
            .filter(|annotation| contains_annotation(&self.nullable, annotation))
            .collect();

        match (not_null.is_empty(), nullable.is_empty()) {
            (false, false) => {
                debug!("Conflicting nullability annotations {not_null:?} and {nullable:?}");
                Nullability::Unknown
            }
            (false, true) => Nullability::NotNull,
            (true, false) => Nullability::Nullable,
            (true, true) => Nullability::Unknown,
        }
    }
}

/// Matches by the name as written or by its simple name.
fn contains_annotation(set: &[String], annotation: &str) -> bool {
    let simple = annotation.rsplit('.').next().unwrap_or(annotation);
    set.iter().any(|name| name == annotation || name == simple)
}

/// Zip source and compiled parameters: type from the compiled view, name
/// and nullability from source.
pub fn build_parameters(
    class_name: &str,
    pair: &ReconciledPair<'_>,
    policy: &NullabilityPolicy,
) -> ExtractResult<Vec<Parameter>> {
    let declared = pair.declaration.parameters();
    let introspected = &pair.executable.parameter_types;

    if declared.len() != introspected.len() {
        return Err(ExtractError::ParameterCountMismatch {
            class: class_name.to_string(),
            member: pair.declaration.signature(),
            declared: declared.len(),
            introspected: introspected.len(),
        });
    }

    Ok(declared
        .iter()
        .zip(introspected)
        .map(|(source, ty)| {
            Parameter::new(
                ty.clone(),
                source.name.clone(),
                policy.classify(&source.annotations),
            )
        })
        .collect())
}
