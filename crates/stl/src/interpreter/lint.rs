//! Static checks over a single tag occurrence.
//!
//! Rendering silently ignores everything reported here; the lint exists so
//! template authors can find out why a tag renders nothing.

use std::fmt::{Display, Formatter, Result as FmtResult};

use stl_semantics::{
    CHANNEL_FIELD_NAMES, CONTENT_FIELD_NAMES, canonical_tag_name, resolve_channel_field,
    resolve_content_field,
};
use strsim::levenshtein;

use crate::interpreter::TagRegistry;
use crate::interpreter::attributes::{to_bool, to_int};
use crate::parser::TagOccurrence;
use crate::types::AttrType;

/// A problem found in a tag occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagWarning {
    /// No tag of this name is registered; the markup is left unchanged.
    UnknownTag {
        name: String,
        suggestions: Vec<String>,
    },
    /// The attribute is not in the tag's schema and is ignored.
    UnknownAttribute {
        tag: String,
        attribute: String,
        suggestions: Vec<String>,
    },
    /// The value does not coerce; the attribute's default is used instead.
    MalformedValue {
        tag: String,
        attribute: String,
        value: String,
        expected: AttrType,
    },
    /// `type` names no built-in field. Renders empty unless a user-defined
    /// field of that name exists.
    UnknownFieldType {
        tag: String,
        field: String,
        suggestions: Vec<String>,
    },
}

impl Display for TagWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TagWarning::UnknownTag { name, suggestions } => {
                write!(f, "unknown tag '{name}'")?;
                write_suggestions(f, suggestions)
            }
            TagWarning::UnknownAttribute {
                tag,
                attribute,
                suggestions,
            } => {
                write!(f, "unknown attribute '{attribute}' on '{tag}'")?;
                write_suggestions(f, suggestions)
            }
            TagWarning::MalformedValue {
                tag,
                attribute,
                value,
                expected,
            } => write!(
                f,
                "'{value}' is not a valid {} for '{attribute}' on '{tag}', default used",
                expected.as_str()
            ),
            TagWarning::UnknownFieldType {
                tag,
                field,
                suggestions,
            } => {
                write!(
                    f,
                    "'{field}' is not a built-in field of '{tag}'; it renders only if a user-defined field exists"
                )?;
                write_suggestions(f, suggestions)
            }
        }
    }
}

fn write_suggestions(f: &mut Formatter<'_>, suggestions: &[String]) -> FmtResult {
    if suggestions.is_empty() {
        Ok(())
    } else {
        write!(f, " (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Check `occurrence` against the schemas in `registry`.
pub fn lint_tag(occurrence: &TagOccurrence, registry: &TagRegistry) -> Vec<TagWarning> {
    let mut warnings = Vec::new();
    let name = canonical_tag_name(&occurrence.name);
    let Some(definition) = registry.get(&name) else {
        let names: Vec<&str> = registry.names().collect();
        warnings.push(TagWarning::UnknownTag {
            suggestions: compute_suggestions(&name, &names),
            name: occurrence.name.clone(),
        });
        return warnings;
    };

    for (key, value) in occurrence.attributes.iter() {
        let Some(desc) = definition.attribute(key) else {
            if !definition.accepts_html_attributes {
                let names: Vec<&str> = definition.schema.iter().map(|d| d.name).collect();
                warnings.push(TagWarning::UnknownAttribute {
                    tag: definition.name.to_string(),
                    attribute: key.to_string(),
                    suggestions: compute_suggestions(key, &names),
                });
            }
            continue;
        };
        if value.contains('{') {
            continue;
        }
        let malformed = match desc.attr_type {
            AttrType::Integer => to_int(value).is_none(),
            AttrType::Boolean => !value.trim().is_empty() && to_bool(value).is_none(),
            AttrType::String | AttrType::Enum | AttrType::DateTimeFormat => false,
        };
        if malformed {
            warnings.push(TagWarning::MalformedValue {
                tag: definition.name.to_string(),
                attribute: desc.name.to_string(),
                value: value.to_string(),
                expected: desc.attr_type,
            });
        }
    }

    if let Some(field) = occurrence.attributes.get("type")
        && !field.is_empty()
        && !field.contains('{')
    {
        let known = match definition.name {
            "stl:channel" => Some((resolve_channel_field(field).is_some(), CHANNEL_FIELD_NAMES)),
            "stl:content" => Some((resolve_content_field(field).is_some(), CONTENT_FIELD_NAMES)),
            _ => None,
        };
        if let Some((false, names)) = known {
            warnings.push(TagWarning::UnknownFieldType {
                tag: definition.name.to_string(),
                field: field.to_string(),
                suggestions: compute_suggestions(field, names),
            });
        }
    }
    warnings
}

/// Up to three candidates within a small edit distance of `name`, closest
/// first. Comparison ignores ASCII case.
pub fn compute_suggestions(name: &str, available: &[&str]) -> Vec<String> {
    let name = name.to_ascii_lowercase();
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(&name, &candidate.to_ascii_lowercase());
            if dist <= max_distance && dist > 0 {
                Some((dist, (*candidate).to_string()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
