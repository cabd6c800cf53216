//! The string transform pipeline applied to every displayed field.
//!
//! Order is fixed: format (numbers and dates), replace, truncate, strip
//! tags, then slicing, case folding and newline conversion. Rich text strips
//! tags first so truncation counts visible characters.

use std::sync::LazyLock;

use bon::Builder;
use chrono::NaiveDateTime;
use regex::Regex;
use stl_semantics::{DEFAULT_DATE_FORMAT, DEFAULT_ELLIPSIS, FieldKind};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::interpreter::format::{format_date, format_number, format_text};

static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*>.*?</script\s*>|<style[^>]*>.*?</style\s*>")
        .expect("valid regex")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// A field value before the pipeline runs, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    RichText(String),
    Number(i64),
    Boolean(bool),
    Date(NaiveDateTime),
    /// Markup produced by the evaluator itself, e.g. an `<img>` element.
    Markup(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::RichText(_) => FieldKind::RichText,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Date(_) => FieldKind::DateTime,
            FieldValue::Markup(_) => FieldKind::Markup,
        }
    }

    /// Whether the value renders as nothing. Numbers, booleans and dates
    /// never do.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) | FieldValue::RichText(text) | FieldValue::Markup(text) => {
                text.is_empty()
            }
            FieldValue::Number(_) | FieldValue::Boolean(_) | FieldValue::Date(_) => false,
        }
    }
}

/// Post-processing attributes shared by every display tag.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct TextTransform {
    #[builder(default)]
    pub replace: String,
    #[builder(default)]
    pub to: String,
    #[builder(default)]
    pub start_index: i64,
    #[builder(default)]
    pub length: i64,
    #[builder(default)]
    pub word_num: i64,
    #[builder(default = DEFAULT_ELLIPSIS.to_string())]
    pub ellipsis: String,
    #[builder(default)]
    pub clear_tags: bool,
    #[builder(default)]
    pub return_to_br: bool,
    #[builder(default)]
    pub lower: bool,
    #[builder(default)]
    pub upper: bool,
    /// Normalized composite pattern, see
    /// [`normalize_format_string`](crate::normalize_format_string).
    #[builder(default)]
    pub format_string: String,
    /// Date pattern used when `format_string` is empty.
    #[builder(default = DEFAULT_DATE_FORMAT.to_string())]
    pub date_format: String,
}

impl Default for TextTransform {
    fn default() -> Self {
        TextTransform::builder().build()
    }
}

impl TextTransform {
    /// Run the pipeline over `value`, choosing steps by its kind.
    pub fn render(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::Markup(markup) => self.replaced(markup),
            FieldValue::Text(text) => {
                let text = format_text(text, &self.format_string);
                let text = self.truncated(&self.replaced(&text));
                let text = if self.clear_tags {
                    strip_tags(&text)
                } else {
                    text
                };
                self.finish(text, true)
            }
            FieldValue::RichText(text) => {
                let text = if self.clear_tags {
                    strip_tags(text)
                } else {
                    text.clone()
                };
                let text = self.truncated(&self.replaced(&text));
                self.finish(text, true)
            }
            FieldValue::Number(n) => {
                let text = format_number(*n, &self.format_string);
                self.finish(self.truncated(&self.replaced(&text)), false)
            }
            FieldValue::Boolean(b) => {
                let text = if *b { "True" } else { "False" };
                self.finish(self.truncated(&self.replaced(text)), false)
            }
            FieldValue::Date(date) => {
                let text = format_date(*date, &self.format_string, &self.date_format);
                self.finish(self.truncated(&self.replaced(&text)), false)
            }
        }
    }

    fn replaced(&self, text: &str) -> String {
        if self.replace.is_empty() {
            text.to_string()
        } else {
            replace_text(text, &self.replace, &self.to)
        }
    }

    fn truncated(&self, text: &str) -> String {
        if text.is_empty() || self.word_num <= 0 {
            return text.to_string();
        }
        let max = usize::try_from(self.word_num).unwrap_or(usize::MAX);
        max_length_text(text, max, &self.ellipsis)
    }

    fn finish(&self, text: String, line_breaks: bool) -> String {
        let mut text = slice(&text, self.start_index, self.length);
        if self.lower {
            text = text.to_lowercase();
        }
        if self.upper {
            text = text.to_uppercase();
        }
        if line_breaks && self.return_to_br {
            text = return_to_br(&text);
        }
        text
    }
}

/// Replace `pattern` with `to`. A pattern written as `/regex/` is a regular
/// expression; an invalid one leaves the text unchanged.
pub fn replace_text(text: &str, pattern: &str, to: &str) -> String {
    let regex_source = pattern
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'));
    match regex_source {
        Some(source) if !source.is_empty() => match Regex::new(source) {
            Ok(regex) => regex.replace_all(text, to).into_owned(),
            Err(err) => {
                debug!(pattern, %err, "invalid replace pattern, text left unchanged");
                text.to_string()
            }
        },
        _ => text.replace(pattern, to),
    }
}

/// Keep at most `max` grapheme clusters, appending `ellipsis` only when
/// something was cut.
pub fn max_length_text(text: &str, max: usize, ellipsis: &str) -> String {
    let mut graphemes = text.grapheme_indices(true);
    match graphemes.nth(max) {
        Some((cut, _)) => format!("{}{ellipsis}", &text[..cut]),
        None => text.to_string(),
    }
}

/// Remove HTML markup, dropping `<script>` and `<style>` blocks entirely.
pub fn strip_tags(text: &str) -> String {
    let text = SCRIPT_OR_STYLE.replace_all(text, "");
    ANY_TAG.replace_all(&text, "").into_owned()
}

/// Grapheme slice from `start` (clamped); `length <= 0` means to the end.
pub fn slice(text: &str, start: i64, length: i64) -> String {
    if start <= 0 && length <= 0 {
        return text.to_string();
    }
    let start = usize::try_from(start).unwrap_or_default();
    let graphemes = text.graphemes(true).skip(start);
    match usize::try_from(length) {
        Ok(length) if length > 0 => graphemes.take(length).collect(),
        _ => graphemes.collect(),
    }
}

/// Convert `\r\n`, `\r` and `\n` to `<br />`.
pub fn return_to_br(text: &str) -> String {
    text.replace("\r\n", "<br />")
        .replace('\r', "<br />")
        .replace('\n', "<br />")
}
