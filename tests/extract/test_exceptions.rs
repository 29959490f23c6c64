//! Documented exceptions: lookup order, failures and dropped tags.

use crate::common::TestProject;
use docspec::{
    ClassBuilder, ExceptionResolver, Executable, ExtractError, JavaType, JavadocExtractor,
    MemoryIntrospector, Settings, Tag,
};

fn source(imports: &str, tags: &str) -> String {
    format!(
        r#"package com.acme.store;

{imports}

public class Store {{
    /**
     * Saves the store.
     *
{tags}
     */
    public void save(String path) {{
    }}
}}
"#
    )
}

fn store_class() -> ClassBuilder {
    ClassBuilder::new("com.acme.store.Store")
        .executable(Executable::constructor("Store", vec![]))
        .executable(Executable::method(
            "save",
            vec![JavaType::reference("java.lang.String")],
            JavaType::Void,
        ))
}

fn save_tags(
    extractor: &JavadocExtractor<MemoryIntrospector>,
    project: &TestProject,
) -> Result<Vec<Tag>, ExtractError> {
    let members = extractor.extract("com.acme.store.Store", &project.source_root())?;
    Ok(members[1].tags().to_vec())
}

fn throws_type(tag: &Tag) -> &JavaType {
    match tag {
        Tag::Throws { exception, .. } => exception,
        other => panic!("Expected a throws tag, got {other:?}"),
    }
}

#[test]
fn test_standard_namespace_lookup() {
    let project = TestProject::new();
    project.add_source(
        "com/acme/store/Store.java",
        &source("", "     * @throws IllegalStateException if the store is closed"),
    );
    let classes = MemoryIntrospector::new()
        .with_class(store_class())
        .with_class(ClassBuilder::new("java.lang.IllegalStateException"));

    let tags = save_tags(&JavadocExtractor::new(classes), &project).unwrap();

    assert_eq!(
        tags,
        vec![Tag::Throws {
            exception: JavaType::reference("java.lang.IllegalStateException"),
            comment: "if the store is closed".to_string(),
        }]
    );
}

#[test]
fn test_configured_standard_namespace_lookup() {
    let project = TestProject::new();
    project.add_source(
        "com/acme/store/Store.java",
        &source("", "     * @throws IOException if the disk fails"),
    );
    let classes = MemoryIntrospector::new()
        .with_class(store_class())
        .with_class(ClassBuilder::new("java.io.IOException"));

    let mut settings = Settings::default();
    settings.resolution.standard_namespace = "java.io".to_string();
    let tags = save_tags(&JavadocExtractor::with_settings(classes, &settings), &project).unwrap();

    assert_eq!(throws_type(&tags[0]), &JavaType::reference("java.io.IOException"));
}

#[test]
fn test_standard_namespace_is_tried_before_imports() {
    let project = TestProject::new();
    project.add_source(
        "com/acme/store/Store.java",
        &source(
            "import com.acme.errors.SecurityException;",
            "     * @throws SecurityException if access is denied",
        ),
    );
    let classes = MemoryIntrospector::new()
        .with_class(store_class())
        .with_class(ClassBuilder::new("java.lang.SecurityException"))
        .with_class(ClassBuilder::new("com.acme.errors.SecurityException"));

    let tags = save_tags(&JavadocExtractor::new(classes), &project).unwrap();

    assert_eq!(
        throws_type(&tags[0]),
        &JavaType::reference("java.lang.SecurityException")
    );
}

#[test]
fn test_import_scan_takes_first_matching_import() {
    let project = TestProject::new();
    project.add_source(
        "com/acme/store/Store.java",
        &source(
            "import java.util.List;\nimport com.acme.io.StoreException;\nimport com.acme.StoreException;",
            "     * @throws StoreException if saving fails",
        ),
    );
    let classes = MemoryIntrospector::new()
        .with_class(store_class())
        .with_class(ClassBuilder::new("com.acme.io.StoreException"))
        .with_class(ClassBuilder::new("com.acme.StoreException"));

    let tags = save_tags(&JavadocExtractor::new(classes), &project).unwrap();

    assert_eq!(
        throws_type(&tags[0]),
        &JavaType::reference("com.acme.io.StoreException")
    );
}

#[test]
fn test_fully_qualified_name_resolves_directly() {
    let project = TestProject::new();
    project.add_source(
        "com/acme/store/Store.java",
        &source("", "     * @throws com.acme.errors.StoreFault when the disk is full"),
    );
    let classes = MemoryIntrospector::new()
        .with_class(store_class())
        .with_class(ClassBuilder::new("com.acme.errors.StoreFault"));

    let tags = save_tags(&JavadocExtractor::new(classes), &project).unwrap();

    assert_eq!(
        throws_type(&tags[0]),
        &JavaType::reference("com.acme.errors.StoreFault")
    );
}

#[test]
fn test_unresolvable_throws_aborts_extraction() {
    let project = TestProject::new();
    project.add_source(
        "com/acme/store/Store.java",
        &source(
            "import java.util.List;",
            "     * @param path where to save\n     * @throws StoreException if saving fails",
        ),
    );
    let classes = MemoryIntrospector::new().with_class(store_class());

    let err = save_tags(&JavadocExtractor::new(classes), &project).unwrap_err();

    match &err {
        ExtractError::UnresolvedExceptionType {
            class,
            member,
            name,
        } => {
            assert_eq!(class, "com.acme.store.Store");
            assert_eq!(member, "save(String)");
            assert_eq!(name, "StoreException");
        }
        other => panic!("Expected UnresolvedExceptionType, got {other:?}"),
    }
    assert_eq!(err.status_code(), "UNRESOLVED_EXCEPTION_TYPE");
}

#[test]
fn test_same_package_needs_fallback_enabled() {
    let project = TestProject::new();
    project.add_source(
        "com/acme/store/Store.java",
        &source("", "     * @throws StoreException if saving fails"),
    );
    let classes = || {
        MemoryIntrospector::new()
            .with_class(store_class())
            .with_class(ClassBuilder::new("com.acme.store.StoreException"))
    };

    let strict = JavadocExtractor::new(classes());
    assert!(matches!(
        save_tags(&strict, &project),
        Err(ExtractError::UnresolvedExceptionType { .. })
    ));

    let lenient = JavadocExtractor::new(classes())
        .with_resolver(ExceptionResolver::default().with_package_fallback(true));
    let tags = save_tags(&lenient, &project).unwrap();
    assert_eq!(
        throws_type(&tags[0]),
        &JavaType::reference("com.acme.store.StoreException")
    );
}

#[test]
fn test_unmatched_param_tag_is_dropped() {
    let project = TestProject::new();
    project.add_source(
        "com/acme/store/Store.java",
        &source(
            "",
            "     * @param target no longer a parameter\n     * @param path where to save\n     * @return nothing useful",
        ),
    );
    let classes = MemoryIntrospector::new().with_class(store_class());

    let tags = save_tags(&JavadocExtractor::new(classes), &project).unwrap();

    assert_eq!(
        tags,
        vec![
            Tag::Param {
                position: 0,
                comment: "where to save".to_string()
            },
            Tag::Return {
                comment: "nothing useful".to_string()
            },
        ]
    );
}
