//! Java source parser implementation
//!
//! Uses tree-sitter-java crate's LANGUAGE constant (converted via .into()).
//! Only top-level type declarations are collected; nested types are skipped.

use super::SourceParser;
use super::javadoc::Javadoc;
use super::unit::{
    CallableDeclaration, CompilationUnit, ImportDeclaration, SourceParameter, SourceScope,
    TypeDeclaration, TypeKind, TypeParameter,
};
use crate::error::{ParseError, ParseResult};
use crate::types::MemberKind;
use std::path::Path;
use tracing::debug;
use tree_sitter::{Node, Parser};

const ACCESS_KEYWORDS: [&str; 3] = ["public", "protected", "private"];

/// Parser for Java source files
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaSourceParser;

impl JavaSourceParser {
    pub fn new() -> Self {
        Self
    }

    /// tree-sitter parsers are stateful and not shared between threads, so
    /// each parse gets a fresh one.
    fn create_parser() -> ParseResult<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| ParseError::ParserInit {
                language: "Java".to_string(),
                reason: e.to_string(),
            })?;
        Ok(parser)
    }

    /// Parse Java source text; `path` is recorded on the unit and used in errors.
    pub fn parse_str(&self, code: &str, path: &Path) -> ParseResult<CompilationUnit> {
        let mut parser = Self::create_parser()?;
        let tree = parser
            .parse(code, None)
            .ok_or_else(|| ParseError::SyntaxError {
                path: path.to_path_buf(),
                reason: "parser produced no syntax tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            let reason = match first_error(root) {
                Some(node) => format!(
                    "syntax error at line {}, column {}",
                    node.start_position().row + 1,
                    node.start_position().column + 1
                ),
                None => "syntax error".to_string(),
            };
            return Err(ParseError::SyntaxError {
                path: path.to_path_buf(),
                reason,
            });
        }

        let mut scope = SourceScope::default();
        let mut types = Vec::new();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_declaration" => {
                    scope.package = first_named_child_of(child, &["scoped_identifier", "identifier"])
                        .map(|name| text_for_node(code, name).to_string());
                }
                "import_declaration" => {
                    if let Some(import) = extract_import(child, code) {
                        scope.imports.push(import);
                    }
                }
                "class_declaration"
                | "interface_declaration"
                | "enum_declaration"
                | "record_declaration"
                | "annotation_type_declaration" => {
                    if let Some(declaration) = extract_type_declaration(child, code) {
                        types.push(declaration);
                    }
                }
                _ => {}
            }
        }

        debug!(
            "Parsed {}: {} imports, {} top-level types",
            path.display(),
            scope.imports.len(),
            types.len()
        );

        Ok(CompilationUnit {
            path: path.to_path_buf(),
            scope,
            types,
        })
    }
}

impl SourceParser for JavaSourceParser {
    fn parse_file(&self, path: &Path) -> ParseResult<CompilationUnit> {
        let code = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ParseError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ParseError::FileRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        self.parse_str(&code, path)
    }
}

/// Extract raw source text for a node
fn text_for_node<'a>(code: &'a str, node: Node) -> &'a str {
    &code[node.byte_range()]
}

/// Node text with runs of whitespace collapsed to one space
fn normalized_text(code: &str, node: Node) -> String {
    text_for_node(code, node)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Type text with type-use annotations removed (`java.util.@Nullable List`)
fn type_text(code: &str, node: Node) -> String {
    let mut annotations = Vec::new();
    collect_annotation_ranges(node, &mut annotations);

    let mut text = String::new();
    let mut offset = node.start_byte();
    for range in annotations {
        text.push_str(&code[offset..range.start]);
        text.push(' ');
        offset = range.end;
    }
    text.push_str(&code[offset..node.end_byte()]);

    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(". ", ".")
}

fn collect_annotation_ranges(node: Node, ranges: &mut Vec<std::ops::Range<usize>>) {
    if matches!(node.kind(), "marker_annotation" | "annotation") {
        ranges.push(node.byte_range());
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_annotation_ranges(child, ranges);
    }
}

fn first_named_child_of<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| kinds.contains(&child.kind()));
    found
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error);
    found
}

fn extract_import(node: Node, code: &str) -> Option<ImportDeclaration> {
    let mut is_static = false;
    let mut is_wildcard = false;
    let mut name = None;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "static" => is_static = true,
            "asterisk" => is_wildcard = true,
            "scoped_identifier" | "identifier" => {
                name = Some(text_for_node(code, child).to_string());
            }
            _ => {}
        }
    }

    name.map(|name| ImportDeclaration {
        name,
        is_static,
        is_wildcard,
    })
}

/// Extract the `/** */` comment attached to a declaration, skipping line
/// comments in between.
fn doc_comment_for(node: Node, code: &str) -> Option<Javadoc> {
    let mut current = node.prev_sibling();
    while let Some(sibling) = current {
        match sibling.kind() {
            "block_comment" => {
                let raw = text_for_node(code, sibling);
                return raw.starts_with("/**").then(|| Javadoc::parse(raw));
            }
            "line_comment" => current = sibling.prev_sibling(),
            _ => return None,
        }
    }
    None
}

/// Keyword modifiers and annotation names of a declaration or parameter
fn extract_modifiers(node: Node, code: &str) -> (Vec<String>, Vec<String>) {
    let mut keywords = Vec::new();
    let mut annotations = Vec::new();

    let Some(modifiers) = first_named_child_of(node, &["modifiers"]) else {
        return (keywords, annotations);
    };

    let mut cursor = modifiers.walk();
    for child in modifiers.children(&mut cursor) {
        match child.kind() {
            "marker_annotation" | "annotation" => {
                if let Some(name) = annotation_name(child, code) {
                    annotations.push(name);
                }
            }
            _ => keywords.push(text_for_node(code, child).to_string()),
        }
    }

    (keywords, annotations)
}

fn annotation_name(node: Node, code: &str) -> Option<String> {
    node.child_by_field_name("name")
        .map(|name| normalized_text(code, name).replace(' ', ""))
}

fn extract_type_parameters(node: Node, code: &str) -> Vec<TypeParameter> {
    let Some(list) = first_named_child_of(node, &["type_parameters"]) else {
        return Vec::new();
    };

    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|child| child.kind() == "type_parameter")
        .filter_map(|parameter| {
            let name = first_named_child_of(parameter, &["type_identifier", "identifier"])?;
            let bounds: Vec<String> = first_named_child_of(parameter, &["type_bound"])
                .map(|bound| {
                    let mut bound_cursor = bound.walk();
                    bound
                        .named_children(&mut bound_cursor)
                        .map(|ty| type_text(code, ty))
                        .collect()
                })
                .unwrap_or_default();
            Some(TypeParameter {
                name: text_for_node(code, name).to_string(),
                bounds,
            })
        })
        .collect()
}

fn extract_type_declaration(node: Node, code: &str) -> Option<TypeDeclaration> {
    let kind = match node.kind() {
        "class_declaration" => TypeKind::Class,
        "interface_declaration" => TypeKind::Interface,
        "enum_declaration" => TypeKind::Enum,
        "record_declaration" => TypeKind::Record,
        "annotation_type_declaration" => TypeKind::Annotation,
        _ => return None,
    };
    let name = text_for_node(code, node.child_by_field_name("name")?).to_string();
    let (modifiers, _) = extract_modifiers(node, code);

    let mut constructors = Vec::new();
    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "constructor_declaration" => {
                    if let Some(c) = extract_callable(member, code, MemberKind::Constructor) {
                        constructors.push(c);
                    }
                }
                "method_declaration" => {
                    if let Some(m) = extract_callable(member, code, MemberKind::Method) {
                        methods.push(m);
                    }
                }
                _ => {}
            }
        }
    }

    if kind == TypeKind::Class && constructors.is_empty() {
        // The compiler adds a no-argument constructor with the class's access
        constructors.push(CallableDeclaration {
            kind: MemberKind::Constructor,
            name: name.clone(),
            modifiers: modifiers
                .iter()
                .filter(|m| ACCESS_KEYWORDS.contains(&m.as_str()))
                .cloned()
                .collect(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            javadoc: None,
            is_implicit: true,
        });
    }

    constructors.extend(methods);

    Some(TypeDeclaration {
        kind,
        type_parameters: extract_type_parameters(node, code),
        name,
        modifiers,
        callables: constructors,
    })
}

fn extract_callable(node: Node, code: &str, kind: MemberKind) -> Option<CallableDeclaration> {
    let name = text_for_node(code, node.child_by_field_name("name")?).to_string();
    let (modifiers, _) = extract_modifiers(node, code);

    let parameters: Vec<SourceParameter> = node
        .child_by_field_name("parameters")
        .or_else(|| first_named_child_of(node, &["formal_parameters"]))
        .map(|list| {
            let mut cursor = list.walk();
            list.named_children(&mut cursor)
                .filter_map(|parameter| extract_parameter(parameter, code))
                .collect()
        })
        .unwrap_or_default();

    Some(CallableDeclaration {
        kind,
        name,
        modifiers,
        type_parameters: extract_type_parameters(node, code),
        parameters,
        javadoc: doc_comment_for(node, code),
        is_implicit: false,
    })
}

fn count_dimensions(node: Option<Node>, code: &str) -> usize {
    node.map(|dims| text_for_node(code, dims).matches('[').count())
        .unwrap_or(0)
}

fn extract_parameter(node: Node, code: &str) -> Option<SourceParameter> {
    match node.kind() {
        "formal_parameter" => {
            let (_, annotations) = extract_modifiers(node, code);
            let type_node = node.child_by_field_name("type")?;
            let name = node.child_by_field_name("name")?;
            Some(SourceParameter {
                type_name: type_text(code, type_node),
                name: text_for_node(code, name).to_string(),
                annotations,
                is_varargs: false,
                extra_dimensions: count_dimensions(node.child_by_field_name("dimensions"), code),
            })
        }
        "spread_parameter" => {
            let (_, mut annotations) = extract_modifiers(node, code);
            let mut type_node = None;
            let mut declarator = None;

            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "modifiers" => {}
                    "marker_annotation" | "annotation" => {
                        if let Some(name) = annotation_name(child, code) {
                            annotations.push(name);
                        }
                    }
                    "variable_declarator" => declarator = Some(child),
                    _ if type_node.is_none() => type_node = Some(child),
                    _ => {}
                }
            }

            let declarator = declarator?;
            let name = declarator.child_by_field_name("name")?;
            Some(SourceParameter {
                type_name: type_text(code, type_node?),
                name: text_for_node(code, name).to_string(),
                annotations,
                is_varargs: true,
                extra_dimensions: count_dimensions(
                    declarator.child_by_field_name("dimensions"),
                    code,
                ),
            })
        }
        // `receiver_parameter` (explicit `this`) is not a formal parameter
        _ => None,
    }
}
