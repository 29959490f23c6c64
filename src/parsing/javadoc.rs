//! Javadoc comment parsing
//!
//! Splits a `/** ... */` comment into its main description and block tags.
//! A block tag starts on a line whose first non-blank character is `@` and
//! runs until the next such line. Inline tags (`{@code x}`) are kept as
//! written.

use serde::Serialize;

/// Kinds of standard block tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTagKind {
    Author,
    Deprecated,
    Exception,
    Param,
    Return,
    See,
    Serial,
    SerialData,
    SerialField,
    Since,
    Throws,
    Version,
    Unknown(String),
}

impl BlockTagKind {
    pub fn from_tag_name(name: &str) -> Self {
        match name {
            "author" => Self::Author,
            "deprecated" => Self::Deprecated,
            "exception" => Self::Exception,
            "param" => Self::Param,
            "return" => Self::Return,
            "see" => Self::See,
            "serial" => Self::Serial,
            "serialData" => Self::SerialData,
            "serialField" => Self::SerialField,
            "since" => Self::Since,
            "throws" => Self::Throws,
            "version" => Self::Version,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Tags whose first word names the documented element
    pub fn has_name(&self) -> bool {
        matches!(self, Self::Param)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockTag {
    pub kind: BlockTagKind,
    /// Element name for tags that carry one (`@param name ...`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tag text, trimmed, with line breaks preserved
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Javadoc {
    pub description: String,
    pub block_tags: Vec<BlockTag>,
}

impl Javadoc {
    /// Parse a raw comment including its `/**` and `*/` delimiters.
    pub fn parse(raw: &str) -> Self {
        let lines = clean_lines(raw);

        let first_tag = lines
            .iter()
            .position(|line| starts_block_tag(line))
            .unwrap_or(lines.len());

        let description = lines[..first_tag].join("\n").trim().to_string();

        let mut block_tags = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for line in &lines[first_tag..] {
            if starts_block_tag(line) && !current.is_empty() {
                block_tags.push(parse_block_tag(&current.join("\n")));
                current.clear();
            }
            current.push(line);
        }
        if !current.is_empty() {
            block_tags.push(parse_block_tag(&current.join("\n")));
        }

        Self {
            description,
            block_tags,
        }
    }
}

fn starts_block_tag(line: &str) -> bool {
    line.trim_start()
        .strip_prefix('@')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_alphabetic())
}

/// Strip comment delimiters and the leading `*` decoration from each line.
fn clean_lines(raw: &str) -> Vec<String> {
    let body = raw.trim();
    let body = body.strip_prefix("/**").unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);

    let mut lines: Vec<String> = body
        .lines()
        .map(|line| {
            let line = line.trim_start();
            let line = match line.strip_prefix('*') {
                Some(rest) if !rest.starts_with('/') => rest.strip_prefix(' ').unwrap_or(rest),
                _ => line,
            };
            line.trim_end().to_string()
        })
        .collect();

    while lines.first().is_some_and(|line| line.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Split `@name rest` into kind, optional element name and content.
fn parse_block_tag(text: &str) -> BlockTag {
    let text = text.trim_start().trim_start_matches('@');
    let (tag_name, rest) = split_first_word(text);
    let kind = BlockTagKind::from_tag_name(tag_name);

    let (name, content) = if kind.has_name() {
        let (name, rest) = split_first_word(rest);
        (Some(name.to_string()), rest)
    } else {
        (None, rest)
    };

    BlockTag {
        kind,
        name,
        content: content.trim().to_string(),
    }
}

fn split_first_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], &text[end..]),
        None => (text, ""),
    }
}
