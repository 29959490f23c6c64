//! End-to-end extraction against class files on disk and the Java fixtures.

use crate::common::{
    ACC_ABSTRACT, ACC_INTERFACE, ACC_PRIVATE, ACC_PUBLIC, ACC_STATIC, ACC_SYNTHETIC, ACC_VARARGS,
    ClassFileBuilder, TestProject, java_fixtures,
};
use docspec::{
    ClassPathIntrospector, ExtractError, JavaType, JavadocExtractor, MemberKind, Modifiers,
    Nullability, PrimitiveType, Settings, Tag,
};

const ACC_PROTECTED: u16 = 0x0004;

/// Class files matching the fixtures under `tests/fixtures/java`.
fn compile_fixtures(project: &TestProject) {
    project.add_class(
        &ClassFileBuilder::new("com/acme/Widget")
            // Compiled order deliberately differs from source order
            .method(0, "bump", "([I)V")
            .method(
                ACC_PUBLIC,
                "lookup",
                "(Ljava/lang/String;Ljava/lang/Comparable;)Ljava/lang/Comparable;",
            )
            .method(ACC_PRIVATE, "<init>", "()V")
            .method(
                ACC_PUBLIC | ACC_STATIC,
                "copy",
                "(Ljava/util/List;Ljava/lang/Number;)V",
            )
            .method(ACC_PUBLIC | ACC_VARARGS, "<init>", "(Ljava/lang/String;[I)V")
            .method(ACC_PROTECTED, "reset", "()V")
            .method(
                ACC_STATIC | ACC_SYNTHETIC,
                "access$000",
                "(Lcom/acme/Widget;)Ljava/lang/String;",
            )
            .method(ACC_STATIC, "<clinit>", "()V"),
    );
    project.add_class(
        &ClassFileBuilder::new("com/acme/Shape")
            .access(ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT)
            .method(ACC_PUBLIC | ACC_ABSTRACT, "area", "()D")
            .method(ACC_PUBLIC, "scale", "(D)Lcom/acme/Shape;"),
    );
    project.add_class(
        &ClassFileBuilder::new("com/acme/Counter")
            .method(ACC_PUBLIC, "<init>", "()V")
            .method(ACC_PUBLIC, "count", "()I"),
    );
    project.add_class(
        &ClassFileBuilder::new("com/acme/util/WidgetException")
            .method(ACC_PUBLIC, "<init>", "(Ljava/lang/String;)V"),
    );
}

fn extractor_for(project: &TestProject) -> JavadocExtractor<ClassPathIntrospector> {
    let mut settings = Settings::default();
    settings.introspection.classpath = vec![project.classes_root()];
    settings.extraction.parallel_threads = 2;
    JavadocExtractor::from_settings(&settings)
}

#[test]
fn test_widget_end_to_end() {
    let project = TestProject::new();
    compile_fixtures(&project);
    let extractor = extractor_for(&project);

    let members = extractor
        .extract("com.acme.Widget", &java_fixtures())
        .unwrap();

    let names: Vec<&str> = members.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["Widget", "lookup", "copy", "reset", "bump"]);

    // Constructor with varargs
    let constructor = &members[0];
    assert_eq!(constructor.kind(), MemberKind::Constructor);
    assert!(constructor.modifiers().contains(Modifiers::PUBLIC));
    let parameters = constructor.parameters();
    assert_eq!(parameters[0].name, "label");
    assert_eq!(parameters[0].nullability, Nullability::NotNull);
    assert_eq!(parameters[1].name, "sizes");
    assert_eq!(
        parameters[1].ty,
        JavaType::array_of(JavaType::Primitive(PrimitiveType::Int), 1)
    );
    assert_eq!(constructor.tags().len(), 2);

    // Method on a class type variable, both throws tags resolved
    let lookup = &members[1];
    assert_eq!(
        lookup.return_type(),
        Some(&JavaType::reference("java.lang.Comparable"))
    );
    assert_eq!(lookup.parameters()[0].nullability, Nullability::Nullable);
    assert_eq!(lookup.parameters()[1].nullability, Nullability::Unknown);
    assert_eq!(lookup.return_tag(), Some("the stored value, or {@code fallback}"));
    let throws: Vec<(&JavaType, &str)> = lookup
        .tags()
        .iter()
        .filter_map(|tag| match tag {
            Tag::Throws { exception, comment } => Some((exception, comment.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(
        throws,
        vec![
            (
                &JavaType::reference("java.io.IOException"),
                "if the backing store fails"
            ),
            (
                &JavaType::reference("com.acme.util.WidgetException"),
                "when the widget\n    has been closed"
            ),
        ]
    );

    // Static generic method: unmatched @param colour is dropped
    let copy = &members[2];
    assert!(copy.modifiers().contains(Modifiers::STATIC));
    let tag_kinds: Vec<&str> = copy.tags().iter().map(Tag::kind_name).collect();
    assert_eq!(tag_kinds, vec!["param", "param", "throws"]);
    assert_eq!(
        copy.tags()[1],
        Tag::Param {
            position: 1,
            comment: "upper bound for copied values".to_string()
        }
    );

    assert!(members[3].modifiers().contains(Modifiers::PROTECTED));
    assert!(members[4].tags().is_empty());
    assert_eq!(members[4].parameters()[0].name, "values");
}

#[test]
fn test_interface_members() {
    let project = TestProject::new();
    compile_fixtures(&project);

    let members = extractor_for(&project)
        .extract("com.acme.Shape", &java_fixtures())
        .unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members[0].name(), "area");
    assert!(members[0].modifiers().contains(Modifiers::ABSTRACT));
    assert_eq!(
        members[0].return_tag(),
        Some("the area in square units")
    );
    assert_eq!(
        members[1].tags().last(),
        Some(&Tag::Throws {
            exception: JavaType::reference("java.lang.ArithmeticException"),
            comment: "if {@code factor} is zero".to_string(),
        })
    );
}

#[test]
fn test_implicit_constructor_from_class_file() {
    let project = TestProject::new();
    compile_fixtures(&project);

    let members = extractor_for(&project)
        .extract("com.acme.Counter", &java_fixtures())
        .unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members[0].kind(), MemberKind::Constructor);
    assert_eq!(members[0].name(), "Counter");
    assert_eq!(
        members[1].return_type(),
        Some(&JavaType::Primitive(PrimitiveType::Int))
    );
}

#[test]
fn test_extract_all_keeps_input_order() {
    let project = TestProject::new();
    compile_fixtures(&project);
    let extractor = extractor_for(&project);

    let classes: Vec<String> = [
        "com.acme.Shape",
        "com.acme.Missing",
        "com.acme.Widget",
        "com.acme.Counter",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect();

    let results = extractor.extract_all(&classes, &java_fixtures());

    let order: Vec<&str> = results.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        order,
        vec!["com.acme.Shape", "com.acme.Missing", "com.acme.Widget", "com.acme.Counter"]
    );
    assert!(matches!(
        results[1].1,
        Err(ExtractError::ClassNotFound { .. })
    ));
    assert_eq!(results[2].1.as_ref().unwrap().len(), 5);

    // A second run yields identical members
    let again = extractor.extract_all(&classes, &java_fixtures());
    for ((_, first), (_, second)) in results.iter().zip(&again) {
        if let (Ok(first), Ok(second)) = (first, second) {
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_discover_fixture_classes() {
    let extractor = JavadocExtractor::from_settings(&Settings::default());
    assert_eq!(
        extractor.discover_classes(&java_fixtures()),
        vec![
            "com.acme.Counter",
            "com.acme.Shape",
            "com.acme.Widget",
            "com.acme.util.WidgetException",
        ]
    );
}

#[test]
fn test_without_jdk_catalog_platform_exceptions_are_unresolved() {
    let project = TestProject::new();
    compile_fixtures(&project);

    let mut settings = Settings::default();
    settings.introspection.classpath = vec![project.classes_root()];
    settings.introspection.jdk_catalog = false;

    let err = JavadocExtractor::from_settings(&settings)
        .extract("com.acme.Widget", &java_fixtures())
        .unwrap_err();

    assert!(matches!(
        err,
        ExtractError::UnresolvedExceptionType { ref name, .. } if name == "IOException"
    ));
}

#[test]
fn test_corrupt_class_file_is_class_not_found() {
    let project = TestProject::new();
    let path = project.classes_root().join("com/acme/Counter.class");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"not a class file").unwrap();

    let err = extractor_for(&project)
        .extract("com.acme.Counter", &java_fixtures())
        .unwrap_err();

    assert_eq!(err.status_code(), "CLASS_NOT_FOUND");
}
