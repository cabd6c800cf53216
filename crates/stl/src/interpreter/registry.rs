//! Tag registry mapping tag names to evaluators.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::LazyLock;

use stl_semantics::canonical_tag_name;

use crate::interpreter::{Engine, RenderContext, RenderError};
use crate::tags;
use crate::types::{AttrDescriptor, TagValue};

/// Evaluator signature shared by every tag.
pub type TagEvaluator =
    fn(&Engine<'_>, &mut RenderContext<'_>) -> Result<TagValue, RenderError>;

/// Static description of one tag kind.
#[derive(Clone, Copy)]
pub struct TagDefinition {
    /// Canonical name including the `stl:` prefix.
    pub name: &'static str,
    /// One-line summary for listings.
    pub usage: &'static str,
    pub description: &'static str,
    pub schema: &'static [AttrDescriptor],
    /// Whether attributes outside the schema are forwarded as HTML
    /// attributes instead of being ignored.
    pub accepts_html_attributes: bool,
    pub evaluate: TagEvaluator,
}

impl TagDefinition {
    /// Schema descriptor named `name`, matched case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&'static AttrDescriptor> {
        self.schema.iter().find(|desc| desc.matches(name))
    }
}

impl Debug for TagDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TagDefinition")
            .field("name", &self.name)
            .field("schema", &self.schema.len())
            .field("accepts_html_attributes", &self.accepts_html_attributes)
            .finish_non_exhaustive()
    }
}

static STANDARD: LazyLock<TagRegistry> = LazyLock::new(TagRegistry::with_standard_tags);

/// Immutable after construction; lookups normalize the name, so `Channel`,
/// `stl:channel` and `STL:CHANNEL` find the same definition.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: BTreeMap<String, TagDefinition>,
}

impl TagRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in tag.
    pub fn with_standard_tags() -> Self {
        let mut registry = Self::new();
        for definition in tags::STANDARD_TAGS {
            registry.register(*definition);
        }
        registry
    }

    /// The shared built-in registry, built on first use.
    pub fn standard() -> &'static TagRegistry {
        &STANDARD
    }

    /// Add or replace a definition.
    pub fn register(&mut self, definition: TagDefinition) {
        self.tags
            .insert(canonical_tag_name(definition.name), definition);
    }

    pub fn get(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(&canonical_tag_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Definitions in name order.
    pub fn definitions(&self) -> impl Iterator<Item = &TagDefinition> {
        self.tags.values()
    }

    /// Canonical names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }
}
