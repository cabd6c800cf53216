//! Single tag occurrence parser using winnow.
//!
//! Parses `<stl:name key="value" key2='value' flag />` and
//! `<stl:name ...>inner</stl:name>`. Attribute keys keep their written case
//! and order; attributes written without a value get the empty string.

use super::ast::{Attributes, TagOccurrence};
use super::error::ParseError;
use winnow::ascii::multispace1;
use winnow::combinator::{alt, delimited, not, opt, preceded, repeat, terminated};
use winnow::prelude::*;
use winnow::token::{none_of, take_till, take_while};

/// Parse exactly one tag occurrence. Surrounding whitespace is ignored.
pub fn parse_tag(input: &str) -> Result<TagOccurrence, ParseError> {
    let source = input.trim();
    let mut remaining = source;
    let open = match open_tag(&mut remaining) {
        Ok(open) => open,
        Err(e) => {
            let (line, column) = calculate_position(source, remaining);
            return Err(ParseError::Syntax {
                line,
                column,
                message: format!("parse error: {e}"),
            });
        }
    };

    if open.self_closing {
        if !remaining.trim().is_empty() {
            let (line, column) = calculate_position(source, remaining);
            return Err(ParseError::Syntax {
                line,
                column,
                message: "unexpected content after self-closing tag".to_string(),
            });
        }
        return Ok(TagOccurrence {
            name: open.name,
            attributes: open.attributes,
            inner: None,
            self_closing: true,
        });
    }

    let closing = format!("</{}>", open.name);
    let Some(inner) = strip_suffix_ignore_case(remaining, &closing) else {
        let (line, column) = calculate_position(source, "");
        return Err(ParseError::UnexpectedEof {
            line,
            column,
            name: open.name,
        });
    };

    Ok(TagOccurrence {
        name: open.name,
        attributes: open.attributes,
        inner: Some(inner.to_string()),
        self_closing: false,
    })
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    if !text.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = text.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}

/// Calculate line and column from original input and remaining input.
pub(super) fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

struct OpenTag {
    name: String,
    attributes: Attributes,
    self_closing: bool,
}

/// Parse an opening tag: < name attributes ws (/> | >)
fn open_tag(input: &mut &str) -> ModalResult<OpenTag> {
    (
        '<',
        tag_name,
        attributes,
        ws,
        alt(("/>".value(true), '>'.value(false))),
    )
        .map(|(_, name, attributes, (), self_closing)| OpenTag {
            name: name.to_string(),
            attributes,
            self_closing,
        })
        .parse_next(input)
}

/// Parse an element name such as `stl:channel`.
pub(super) fn tag_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_' | '.')
    })
    .parse_next(input)
}

/// Parse zero or more whitespace-separated attributes.
pub(super) fn attributes(input: &mut &str) -> ModalResult<Attributes> {
    repeat(0.., preceded(multispace1, attribute))
        .map(|entries: Vec<(String, String)>| entries.into_iter().collect())
        .parse_next(input)
}

/// Parse `key`, `key=value`, `key="value"` or `key='value'`.
fn attribute(input: &mut &str) -> ModalResult<(String, String)> {
    (attr_key, opt(preceded((ws, '=', ws), attr_value)))
        .map(|(key, value): (&str, Option<&str>)| {
            (key.to_string(), value.unwrap_or_default().to_string())
        })
        .parse_next(input)
}

fn attr_key<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'' | '{' | '}')
    })
    .parse_next(input)
}

fn attr_value<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((
        delimited('"', take_till(0.., '"'), '"'),
        delimited('\'', take_till(0.., '\''), '\''),
        unquoted_value,
    ))
    .parse_next(input)
}

/// Unquoted values run until whitespace, `>`, `}` or a `/>` terminator.
fn unquoted_value<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    repeat::<_, _, (), _, _>(
        1..,
        alt((
            none_of(|c: char| {
                c.is_whitespace() || matches!(c, '>' | '/' | '"' | '\'' | '{' | '}')
            })
            .void(),
            terminated('/', not('>')).void(),
        )),
    )
    .take()
    .parse_next(input)
}

/// Parse optional whitespace.
pub(super) fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}
