//! Pairing source declarations with compiled executables.

use crate::common::TestProject;
use docspec::{
    ClassBuilder, Executable, ExtractError, JavaType, JavadocExtractor, MemberKind,
    MemoryIntrospector, Modifiers, PrimitiveType,
};

fn int() -> JavaType {
    JavaType::Primitive(PrimitiveType::Int)
}

#[test]
fn test_overloads_differing_only_in_type_arguments_are_ambiguous() {
    let project = TestProject::new();
    project.add_source(
        "Registry.java",
        r#"import java.util.List;

public class Registry {
    public void register(List<String> names) {}
    public void register(List<Integer> ids) {}
}
"#,
    );
    let list = JavaType::reference("java.util.List");
    let classes = MemoryIntrospector::new().with_class(
        ClassBuilder::new("Registry")
            .executable(Executable::constructor("Registry", vec![]))
            .executable(Executable::method("register", vec![list.clone()], JavaType::Void))
            .executable(Executable::method("register", vec![list], JavaType::Void)),
    );

    let err = JavadocExtractor::new(classes)
        .extract("Registry", &project.source_root())
        .unwrap_err();

    match err {
        ExtractError::AmbiguousMember {
            class,
            signature,
            candidates,
        } => {
            assert_eq!(class, "Registry");
            assert_eq!(signature, "register(List<String>)");
            assert_eq!(candidates, 2);
        }
        other => panic!("Expected AmbiguousMember, got {other:?}"),
    }
}

#[test]
fn test_overloads_resolve_by_erased_types() {
    let project = TestProject::new();
    project.add_source(
        "com/acme/Ledger.java",
        r#"package com.acme;

import java.util.Map;

public class Ledger<K extends CharSequence> {
    public Ledger() {}

    public void post(int amount) {}

    public void post(K account, int amount) {}

    public void post(Map.Entry<K, Integer> entry) {}

    public <V> V[] snapshot(V... seed) { return seed; }
}
"#,
    );
    let classes = MemoryIntrospector::new().with_class(
        ClassBuilder::new("com.acme.Ledger")
            // Compiled order differs from source order
            .executable(Executable::method(
                "snapshot",
                vec![JavaType::array_of(JavaType::reference("java.lang.Object"), 1)],
                JavaType::array_of(JavaType::reference("java.lang.Object"), 1),
            ))
            .executable(Executable::method(
                "post",
                vec![JavaType::reference("java.util.Map$Entry")],
                JavaType::Void,
            ))
            .executable(Executable::method(
                "post",
                vec![JavaType::reference("java.lang.CharSequence"), int()],
                JavaType::Void,
            ))
            .executable(Executable::method("post", vec![int()], JavaType::Void))
            .executable(Executable::constructor("Ledger", vec![])),
    );

    let members = JavadocExtractor::new(classes)
        .extract("com.acme.Ledger", &project.source_root())
        .unwrap();

    let signatures: Vec<String> = members
        .iter()
        .map(|member| {
            let types: Vec<String> = member
                .parameters()
                .iter()
                .map(|p| p.ty.simple_name())
                .collect();
            format!("{}({})", member.name(), types.join(","))
        })
        .collect();
    assert_eq!(
        signatures,
        vec![
            "Ledger()",
            "post(int)",
            "post(CharSequence,int)",
            "post(Entry)",
            "snapshot(Object[])",
        ]
    );
    assert_eq!(members[0].kind(), MemberKind::Constructor);
    assert_eq!(members[2].parameters()[0].name, "account");
}

#[test]
fn test_private_and_synthetic_members_are_ignored() {
    let project = TestProject::new();
    project.add_source(
        "Gauge.java",
        r#"public class Gauge {
    public Gauge() {}

    private void calibrate() {}

    public double read() { return 0; }
}
"#,
    );
    let classes = MemoryIntrospector::new().with_class(
        ClassBuilder::new("Gauge")
            .executable(Executable::constructor("Gauge", vec![]))
            .executable(
                Executable::method("calibrate", vec![], JavaType::Void)
                    .with_modifiers(Modifiers::PRIVATE),
            )
            .executable(Executable::method(
                "read",
                vec![],
                JavaType::Primitive(PrimitiveType::Double),
            ))
            .executable(
                Executable::method(
                    "lambda$read$0",
                    vec![],
                    JavaType::reference("java.lang.Object"),
                )
                .with_modifiers(Modifiers::PRIVATE | Modifiers::STATIC | Modifiers::SYNTHETIC),
            )
            .executable(
                Executable::method("access$000", vec![], JavaType::Void)
                    .with_modifiers(Modifiers::STATIC | Modifiers::SYNTHETIC),
            ),
    );

    let members = JavadocExtractor::new(classes)
        .extract("Gauge", &project.source_root())
        .unwrap();

    let names: Vec<&str> = members.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["Gauge", "read"]);
}

#[test]
fn test_implicit_default_constructor_reconciles() {
    let project = TestProject::new();
    project.add_source(
        "Token.java",
        "public class Token {\n    public String value() { return \"\"; }\n}\n",
    );
    let classes = MemoryIntrospector::new().with_class(
        ClassBuilder::new("Token")
            .executable(Executable::constructor("Token", vec![]))
            .executable(Executable::method(
                "value",
                vec![],
                JavaType::reference("java.lang.String"),
            )),
    );

    let members = JavadocExtractor::new(classes)
        .extract("Token", &project.source_root())
        .unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members[0].kind(), MemberKind::Constructor);
    assert!(members[0].parameters().is_empty());
    assert!(members[0].tags().is_empty());
}

#[test]
fn test_stale_compiled_class_is_a_structural_mismatch() {
    let project = TestProject::new();
    project.add_source("Lamp.java", "public class Lamp {\n    public void on() {}\n}\n");
    let classes = MemoryIntrospector::new().with_class(
        ClassBuilder::new("Lamp")
            .executable(Executable::constructor("Lamp", vec![]))
            .executable(Executable::method("on", vec![], JavaType::Void))
            .executable(Executable::method("off", vec![], JavaType::Void)),
    );

    let err = JavadocExtractor::new(classes)
        .extract("Lamp", &project.source_root())
        .unwrap_err();

    assert!(matches!(
        err,
        ExtractError::StructuralMismatch {
            introspected: 3,
            declared: 2,
            ..
        }
    ));
    assert_eq!(err.status_code(), "STRUCTURAL_MISMATCH");
}

#[test]
fn test_changed_parameter_type_is_member_not_found() {
    let project = TestProject::new();
    project.add_source(
        "Lamp.java",
        "public class Lamp {\n    public void dim(long level) {}\n}\n",
    );
    let classes = MemoryIntrospector::new().with_class(
        ClassBuilder::new("Lamp")
            .executable(Executable::constructor("Lamp", vec![]))
            .executable(Executable::method("dim", vec![int()], JavaType::Void)),
    );

    let err = JavadocExtractor::new(classes)
        .extract("Lamp", &project.source_root())
        .unwrap_err();

    match err {
        ExtractError::MemberNotFound { class, signature } => {
            assert_eq!(class, "Lamp");
            assert_eq!(signature, "dim(long)");
        }
        other => panic!("Expected MemberNotFound, got {other:?}"),
    }
}

#[test]
fn test_one_member_per_declaration_with_matching_arity() {
    let project = TestProject::new();
    project.add_source(
        "Mixer.java",
        r#"public class Mixer {
    public Mixer(int channels) {}
    public Mixer(int channels, float gain) {}
    public void mix(float[] left, float right[], String... labels) {}
}
"#,
    );
    let float_array = JavaType::array_of(JavaType::Primitive(PrimitiveType::Float), 1);
    let classes = MemoryIntrospector::new().with_class(
        ClassBuilder::new("Mixer")
            .executable(Executable::constructor("Mixer", vec![int()]))
            .executable(Executable::constructor(
                "Mixer",
                vec![int(), JavaType::Primitive(PrimitiveType::Float)],
            ))
            .executable(Executable::method(
                "mix",
                vec![
                    float_array.clone(),
                    float_array,
                    JavaType::array_of(JavaType::reference("java.lang.String"), 1),
                ],
                JavaType::Void,
            )),
    );

    let members = JavadocExtractor::new(classes)
        .extract("Mixer", &project.source_root())
        .unwrap();

    let arities: Vec<usize> = members.iter().map(|m| m.parameters().len()).collect();
    assert_eq!(arities, vec![1, 2, 3]);
    let names: Vec<&str> = members[2].parameters().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["left", "right", "labels"]);
}

#[test]
fn test_type_use_annotation_in_qualified_type_reconciles() {
    let project = TestProject::new();
    project.add_source(
        "com/acme/Index.java",
        r#"package com.acme;

public class Index {
    public Index(java.util.@Nullable List<String> keys) {}

    public int find(@Nullable java.lang.@Interned String key) { return 0; }
}
"#,
    );
    let classes = MemoryIntrospector::new().with_class(
        ClassBuilder::new("com.acme.Index")
            .executable(Executable::constructor(
                "Index",
                vec![JavaType::reference("java.util.List")],
            ))
            .executable(Executable::method(
                "find",
                vec![JavaType::reference("java.lang.String")],
                int(),
            )),
    );

    let members = JavadocExtractor::new(classes)
        .extract("com.acme.Index", &project.source_root())
        .unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members[0].parameters()[0].name, "keys");
    assert_eq!(members[1].parameters()[0].name, "key");
    assert_eq!(
        members[1].parameters()[0].ty,
        JavaType::reference("java.lang.String")
    );
}
