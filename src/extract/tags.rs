//! Javadoc block tags to [`Tag`] records

use super::resolve::ExceptionResolver;
use crate::error::{ExtractError, ExtractResult};
use crate::introspect::Introspector;
use crate::member::{Parameter, Tag};
use crate::parsing::{BlockTag, BlockTagKind, Javadoc, SourceScope};
use tracing::debug;

/// Where the tags being extracted come from.
pub struct TagContext<'a, I: ?Sized> {
    pub class_name: &'a str,
    /// Member signature used in errors and logs
    pub member: &'a str,
    pub parameters: &'a [Parameter],
    pub scope: &'a SourceScope,
    pub introspector: &'a I,
    pub resolver: &'a ExceptionResolver,
}

/// Build the recognized tags of a member in documentation order.
///
/// Unmatched `@param` tags are dropped; an unresolvable `@throws` fails the
/// whole extraction.
pub fn extract_tags<I: Introspector + ?Sized>(
    javadoc: Option<&Javadoc>,
    context: &TagContext<'_, I>,
) -> ExtractResult<Vec<Tag>> {
    let Some(javadoc) = javadoc else {
        return Ok(Vec::new());
    };

    let mut tags = Vec::with_capacity(javadoc.block_tags.len());
    for block_tag in &javadoc.block_tags {
        if let Some(tag) = convert(block_tag, context)? {
            tags.push(tag);
        }
    }
    Ok(tags)
}

fn convert<I: Introspector + ?Sized>(
    block_tag: &BlockTag,
    context: &TagContext<'_, I>,
) -> ExtractResult<Option<Tag>> {
    match &block_tag.kind {
        BlockTagKind::Param => Ok(param_tag(block_tag, context)),
        BlockTagKind::Return => Ok(Some(Tag::Return {
            comment: block_tag.content.clone(),
        })),
        BlockTagKind::Throws => throws_tag(block_tag, context).map(Some),
        _ => Ok(None),
    }
}

fn param_tag<I: ?Sized>(block_tag: &BlockTag, context: &TagContext<'_, I>) -> Option<Tag> {
    let name = block_tag.name.as_deref().unwrap_or_default();
    match context.parameters.iter().position(|p| p.name == name) {
        Some(position) => Some(Tag::Param {
            position,
            comment: block_tag.content.clone(),
        }),
        None => {
            debug!(
                "Dropping @param '{name}' of {} in {}: no such parameter",
                context.member, context.class_name
            );
            None
        }
    }
}

fn throws_tag<I: Introspector + ?Sized>(
    block_tag: &BlockTag,
    context: &TagContext<'_, I>,
) -> ExtractResult<Tag> {
    let content = block_tag.content.as_str();
    let (name, comment) = match content.find(char::is_whitespace) {
        Some(end) => (&content[..end], content[end..].trim_start()),
        None => (content, ""),
    };

    let unresolved = || ExtractError::UnresolvedExceptionType {
        class: context.class_name.to_string(),
        member: context.member.to_string(),
        name: name.to_string(),
    };

    // An empty token would match every import
    if name.is_empty() {
        return Err(unresolved());
    }

    let class = context
        .resolver
        .resolve(context.introspector, name, context.scope)
        .map_err(|_| unresolved())?;

    Ok(Tag::Throws {
        exception: class.as_type(),
        comment: comment.to_string(),
    })
}
