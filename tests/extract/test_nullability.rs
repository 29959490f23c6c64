//! Parameter nullability as seen through a full extraction.

use crate::common::TestProject;
use docspec::{
    ClassBuilder, Executable, JavaType, JavadocExtractor, MemoryIntrospector, Nullability,
    NullabilityPolicy, Settings,
};

const SOURCE: &str = r#"package org.sample;

import javax.annotation.CheckForNull;

public class Guard {
    public void check(
            String plain,
            @NotNull String notNull,
            @NonNull String nonNull,
            @javax.annotation.Nonnull String qualified,
            @Nullable String nullable,
            @CheckForNull String checkForNull,
            @NonNull @Nullable String conflicting,
            @Deprecated String unrelated,
            final @Deprecated @Nonnull String mixed,
            @MaybeNull String custom) {
    }
}
"#;

fn guard_class() -> MemoryIntrospector {
    let string = JavaType::reference("java.lang.String");
    MemoryIntrospector::new().with_class(
        ClassBuilder::new("org.sample.Guard")
            .executable(Executable::constructor("Guard", vec![]))
            .executable(Executable::method("check", vec![string; 10], JavaType::Void)),
    )
}

fn nullability_by_name<I: docspec::Introspector>(
    extractor: &JavadocExtractor<I>,
    project: &TestProject,
) -> Vec<(String, Nullability)> {
    let members = extractor
        .extract("org.sample.Guard", &project.source_root())
        .unwrap();
    members[1]
        .parameters()
        .iter()
        .map(|p| (p.name.clone(), p.nullability))
        .collect()
}

#[test]
fn test_default_annotation_sets() {
    let project = TestProject::new();
    project.add_source("org/sample/Guard.java", SOURCE);
    let extractor = JavadocExtractor::new(guard_class());

    let expected = vec![
        ("plain", Nullability::Unknown),
        ("notNull", Nullability::NotNull),
        ("nonNull", Nullability::NotNull),
        ("qualified", Nullability::NotNull),
        ("nullable", Nullability::Nullable),
        ("checkForNull", Nullability::Nullable),
        ("conflicting", Nullability::Unknown),
        ("unrelated", Nullability::Unknown),
        ("mixed", Nullability::NotNull),
        ("custom", Nullability::Unknown),
    ];
    let expected: Vec<(String, Nullability)> = expected
        .into_iter()
        .map(|(name, nullability)| (name.to_string(), nullability))
        .collect();

    assert_eq!(nullability_by_name(&extractor, &project), expected);
}

#[test]
fn test_annotation_sets_from_settings() {
    let project = TestProject::new();
    project.add_source("org/sample/Guard.java", SOURCE);

    let mut settings = Settings::default();
    settings.nullability.nullable = vec!["MaybeNull".to_string()];
    let extractor = JavadocExtractor::with_settings(guard_class(), &settings);

    let result = nullability_by_name(&extractor, &project);
    let lookup = |name: &str| {
        result
            .iter()
            .find(|(parameter, _)| parameter == name)
            .map(|(_, nullability)| *nullability)
            .unwrap()
    };

    assert_eq!(lookup("custom"), Nullability::Nullable);
    // Nullable is no longer configured, so NonNull wins without a conflict
    assert_eq!(lookup("conflicting"), Nullability::NotNull);
    assert_eq!(lookup("nullable"), Nullability::Unknown);
    assert_eq!(lookup("notNull"), Nullability::NotNull);
}

#[test]
fn test_policy_override_on_extractor() {
    let project = TestProject::new();
    project.add_source("org/sample/Guard.java", SOURCE);

    let extractor = JavadocExtractor::new(guard_class())
        .with_nullability(NullabilityPolicy::new(["Deprecated"], ["CheckForNull"]));

    let result = nullability_by_name(&extractor, &project);
    assert_eq!(result[7], ("unrelated".to_string(), Nullability::NotNull));
    assert_eq!(result[5], ("checkForNull".to_string(), Nullability::Nullable));
    assert_eq!(result[1], ("notNull".to_string(), Nullability::Unknown));
}
