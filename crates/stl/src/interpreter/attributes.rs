//! Schema-driven attribute coercion.
//!
//! Every descriptor of a tag's schema is tested against every supplied key,
//! so unknown keys are ignored and repeated keys resolve to the last one
//! written. Coercion never fails: absent or malformed values fall back to
//! the default named at the point of use.

use std::collections::BTreeMap;

use crate::interpreter::RenderError;
use crate::parser::Attributes;
use crate::types::{AttrDescriptor, AttrType, BoolDefault};

/// A coerced attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// String and format attributes, after entity substitution.
    Text(String),
    /// `None` when the written value is not a base-10 integer.
    Integer(Option<i64>),
    /// `None` when the written value is not a recognized token.
    Boolean(Option<bool>),
    /// Lower-cased symbol; compared by the evaluator.
    Enum(String),
}

#[derive(Debug, Clone)]
struct Parsed {
    raw: String,
    value: AttrValue,
}

/// Typed view of a tag's attributes, one slot per schema descriptor.
#[derive(Debug, Clone, Default)]
pub struct ParsedAttrs {
    values: BTreeMap<&'static str, Parsed>,
    extra: Attributes,
}

impl ParsedAttrs {
    /// Whether the attribute was written at all, even with an empty value.
    pub fn is_present(&self, desc: &AttrDescriptor) -> bool {
        self.values.contains_key(desc.name)
    }

    /// The value as written, after entity substitution.
    pub fn text(&self, desc: &AttrDescriptor) -> Option<&str> {
        self.values.get(desc.name).map(|p| p.raw.as_str())
    }

    pub fn string(&self, desc: &AttrDescriptor, default: &str) -> String {
        self.text(desc).unwrap_or(default).to_string()
    }

    /// Integer value, or `default` when absent or malformed.
    pub fn integer(&self, desc: &AttrDescriptor, default: i64) -> i64 {
        match self.values.get(desc.name).map(|p| &p.value) {
            Some(AttrValue::Integer(Some(n))) => *n,
            Some(AttrValue::Text(raw) | AttrValue::Enum(raw)) => to_int(raw).unwrap_or(default),
            _ => default,
        }
    }

    /// Boolean value with per-attribute defaults for the missing and
    /// malformed cases.
    pub fn boolean(&self, desc: &AttrDescriptor, default: BoolDefault) -> bool {
        match self.values.get(desc.name) {
            None => default.missing,
            Some(parsed) => match &parsed.value {
                AttrValue::Boolean(value) => value.unwrap_or(default.malformed),
                _ => to_bool(&parsed.raw).unwrap_or(default.malformed),
            },
        }
    }

    /// Lower-cased symbol of an enum attribute.
    pub fn enumeration(&self, desc: &AttrDescriptor) -> Option<&str> {
        match self.values.get(desc.name).map(|p| &p.value) {
            Some(AttrValue::Enum(symbol)) => Some(symbol.as_str()),
            Some(_) => self.text(desc),
            None => None,
        }
    }

    pub fn value(&self, desc: &AttrDescriptor) -> Option<&AttrValue> {
        self.values.get(desc.name).map(|p| &p.value)
    }

    /// Supplied attributes that no schema descriptor names, as written.
    pub fn extra(&self) -> &Attributes {
        &self.extra
    }
}

/// Coerce `raw` against `schema`.
///
/// `substitute` runs over every matched value before coercion; it is where
/// embedded entity markers get expanded. Its errors are the only way this
/// function fails.
pub fn parse_attributes<F>(
    raw: &Attributes,
    schema: &[AttrDescriptor],
    mut substitute: F,
) -> Result<ParsedAttrs, RenderError>
where
    F: FnMut(&str) -> Result<String, RenderError>,
{
    let mut parsed = ParsedAttrs::default();
    for desc in schema {
        let mut found = None;
        for (key, value) in raw.iter() {
            if desc.matches(key) {
                found = Some(value);
            }
        }
        let Some(value) = found else {
            continue;
        };
        let resolved = substitute(value)?;
        let value = coerce(desc.attr_type, &resolved);
        parsed.values.insert(
            desc.name,
            Parsed {
                raw: resolved,
                value,
            },
        );
    }
    for (key, value) in raw.iter() {
        if !schema.iter().any(|desc| desc.matches(key)) {
            parsed.extra.insert(key, value);
        }
    }
    Ok(parsed)
}

fn coerce(attr_type: AttrType, raw: &str) -> AttrValue {
    match attr_type {
        AttrType::String | AttrType::DateTimeFormat => AttrValue::Text(raw.to_string()),
        AttrType::Integer => AttrValue::Integer(to_int(raw)),
        AttrType::Boolean => AttrValue::Boolean(to_bool(raw)),
        AttrType::Enum => AttrValue::Enum(raw.trim().to_lowercase()),
    }
}

/// Recognized boolean tokens, case-insensitive.
pub(crate) fn to_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(crate) fn to_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
