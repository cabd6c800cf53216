//! Entity marker scanner for attribute values.
//!
//! Recognizes `{channel.field}`, `{content.field}` and `{stl:name attr="v"}`.
//! Anything else, including unbalanced braces, is literal text.

use super::ast::{EntityMarker, Segment, TagOccurrence};
use super::tag::{attributes, tag_name, ws};
use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// Split an attribute value into literal text and entity markers.
///
/// Never fails. A value without `{` comes back as a single literal segment,
/// and the empty string as no segments at all.
pub fn parse_entities(input: &str) -> Vec<Segment> {
    if input.is_empty() {
        return Vec::new();
    }
    if !input.contains('{') {
        return vec![Segment::Literal(input.to_string())];
    }
    let mut remaining = input;
    match segments(&mut remaining) {
        Ok(segments) if remaining.is_empty() => merge_literals(segments),
        _ => vec![Segment::Literal(input.to_string())],
    }
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

fn segments(input: &mut &str) -> ModalResult<Vec<Segment>> {
    repeat(0.., alt((entity, literal))).parse_next(input)
}

/// A run of text up to the next brace, or a lone brace that opened nothing.
fn literal(input: &mut &str) -> ModalResult<Segment> {
    alt((take_till(1.., '{'), "{"))
        .map(|text: &str| Segment::Literal(text.to_string()))
        .parse_next(input)
}

fn entity(input: &mut &str) -> ModalResult<Segment> {
    alt((field_entity, tag_entity))
        .with_taken()
        .map(|(marker, raw): (EntityMarker, &str)| Segment::Entity {
            marker,
            raw: raw.to_string(),
        })
        .parse_next(input)
}

/// `{channel.title}` or `{content.imageUrl}`; the scope is case-insensitive.
fn field_entity(input: &mut &str) -> ModalResult<EntityMarker> {
    delimited('{', (scope_name, '.', field_name), '}')
        .verify_map(|(scope, _, field): (&str, char, &str)| {
            if scope.eq_ignore_ascii_case("channel") {
                Some(EntityMarker::ChannelField(field.to_string()))
            } else if scope.eq_ignore_ascii_case("content") {
                Some(EntityMarker::ContentField(field.to_string()))
            } else {
                None
            }
        })
        .parse_next(input)
}

/// `{stl:channel type="title" upLevel="1"}`
fn tag_entity(input: &mut &str) -> ModalResult<EntityMarker> {
    delimited('{', (tag_name, attributes, ws), '}')
        .verify_map(|(name, attributes, ()): (&str, _, ())| {
            let is_stl = name.len() > 4 && name[..4].eq_ignore_ascii_case("stl:");
            is_stl.then(|| {
                EntityMarker::Tag(TagOccurrence {
                    name: name.to_string(),
                    attributes,
                    inner: None,
                    self_closing: true,
                })
            })
        })
        .parse_next(input)
}

fn scope_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)
}

fn field_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')
    })
    .parse_next(input)
}
