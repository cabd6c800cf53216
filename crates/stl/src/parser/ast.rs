//! Public AST types for STL tag occurrences and attribute-value entities.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Attributes of a tag occurrence, in the order they were written.
///
/// Keys keep their written case; every lookup is case-insensitive. When the
/// same key is written twice the later occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key`, matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key`, replacing any case-insensitive match in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let mut replaced = false;
        for (k, v) in &mut self.entries {
            if k.eq_ignore_ascii_case(&key) {
                v.clone_from(&value);
                replaced = true;
            }
        }
        if !replaced {
            self.entries.push((key, value));
        }
    }

    /// Remove every case-insensitive match of `key`, returning the last value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let mut removed = None;
        self.entries.retain(|(k, v)| {
            if k.eq_ignore_ascii_case(key) {
                removed = Some(v.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Entries in written order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// One occurrence of an STL element in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrence {
    /// Element name as written, e.g. `stl:channel`.
    pub name: String,
    pub attributes: Attributes,
    /// Markup between the opening and closing tag.
    pub inner: Option<String>,
    pub self_closing: bool,
}

impl TagOccurrence {
    /// A self-closing occurrence with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            inner: None,
            self_closing: true,
        }
    }

    /// Add an attribute, builder style.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    /// Inner markup, or the empty string for self-closing occurrences.
    pub fn inner_html(&self) -> &str {
        self.inner.as_deref().unwrap_or_default()
    }
}

/// Re-serializes the occurrence as markup. Used when an unknown tag is left in
/// the page unchanged.
impl Display for TagOccurrence {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "<{}", self.name)?;
        for (key, value) in self.attributes.iter() {
            if value.contains('"') {
                write!(f, " {key}='{value}'")?;
            } else {
                write!(f, " {key}=\"{value}\"")?;
            }
        }
        match &self.inner {
            Some(inner) if !self.self_closing => write!(f, ">{inner}</{}>", self.name),
            _ => write!(f, " />"),
        }
    }
}

/// A piece of an attribute value after entity scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied through unchanged.
    Literal(String),
    /// An entity marker and the exact text it was parsed from.
    Entity { marker: EntityMarker, raw: String },
}

impl Segment {
    pub fn is_entity(&self) -> bool {
        matches!(self, Segment::Entity { .. })
    }
}

/// A nested tag reference embedded in an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityMarker {
    /// `{channel.<field>}`
    ChannelField(String),
    /// `{content.<field>}`
    ContentField(String),
    /// `{stl:<name> attr="..."}`
    Tag(TagOccurrence),
}

impl EntityMarker {
    /// The tag occurrence this marker stands for.
    pub fn to_occurrence(&self) -> TagOccurrence {
        match self {
            EntityMarker::ChannelField(field) => {
                TagOccurrence::new("stl:channel").with_attr("type", field.as_str())
            }
            EntityMarker::ContentField(field) => {
                TagOccurrence::new("stl:content").with_attr("type", field.as_str())
            }
            EntityMarker::Tag(occurrence) => occurrence.clone(),
        }
    }
}
