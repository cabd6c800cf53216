//! Page-scoped and tag-scoped state carried through a render pass.

use std::collections::BTreeMap;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::interpreter::RenderError;
use crate::parser::{Attributes, TagOccurrence};

/// Kind of template the page is rendered from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateType {
    #[default]
    Index,
    Channel,
    Content,
    File,
}

/// State owned by the page-level caller for one whole render pass.
///
/// Tags read the site and template kind from here and write to its side
/// channel: scripts the page body needs, and a counter for element ids that
/// must be unique within the page.
#[derive(Debug, Builder)]
pub struct PageInfo {
    site_id: i64,

    #[builder(default)]
    template_type: TemplateType,

    /// Body code fragments keyed by a stable name, emitted once each.
    #[builder(skip)]
    body_codes: BTreeMap<String, String>,

    #[builder(skip)]
    unique_id: u32,
}

impl PageInfo {
    /// A page of the given site rendered from an index template.
    pub fn new(site_id: i64) -> Self {
        PageInfo::builder().site_id(site_id).build()
    }

    pub fn site_id(&self) -> i64 {
        self.site_id
    }

    pub fn template_type(&self) -> TemplateType {
        self.template_type
    }

    /// Register a body code fragment unless one with `key` already exists.
    ///
    /// Returns whether the fragment was added.
    pub fn add_body_code_if_not_exists(&mut self, key: &str, code: impl Into<String>) -> bool {
        if self.body_codes.contains_key(key) {
            return false;
        }
        self.body_codes.insert(key.to_string(), code.into());
        true
    }

    pub fn has_body_code(&self, key: &str) -> bool {
        self.body_codes.contains_key(key)
    }

    /// Registered fragments in key order.
    pub fn body_codes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.body_codes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Next page-unique id, starting at 1.
    pub fn next_unique_id(&mut self) -> u32 {
        self.unique_id += 1;
        self.unique_id
    }
}

/// Position of the tag inside an enclosing repeating list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListItem {
    /// Zero-based index within a channel list.
    Channel { index: usize },
    /// Zero-based index within a content list.
    Content { index: usize },
}

/// Where on the site a tag is being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder)]
pub struct Scope {
    pub channel_id: i64,
    /// `0` when the page is not about a single content item.
    #[builder(default)]
    pub content_id: i64,
    pub item: Option<ListItem>,
    /// Whether the tag is nested inside another tag's body.
    #[builder(default)]
    pub inner: bool,
}

impl Scope {
    /// Scope of a channel page.
    pub fn channel(channel_id: i64) -> Self {
        Scope::builder().channel_id(channel_id).build()
    }

    /// Scope of a content page.
    pub fn content(channel_id: i64, content_id: i64) -> Self {
        Scope::builder()
            .channel_id(channel_id)
            .content_id(content_id)
            .build()
    }
}

/// Evaluation context for one tag occurrence.
///
/// The context tracks:
/// - The occurrence being evaluated (name, attributes, markup)
/// - The channel/content scope it is rendered in
/// - Whether the caller wants an entity (structured value) or display text
/// - Nesting depth for bounding entity substitution
pub struct RenderContext<'p> {
    page: &'p mut PageInfo,
    tag_name: String,
    attributes: Attributes,
    inner_html: String,
    outer_html: String,
    scope: Scope,
    is_entity: bool,
    depth: usize,
    max_depth: usize,
}

impl<'p> RenderContext<'p> {
    /// Create a top-level context for `occurrence`.
    pub fn new(
        page: &'p mut PageInfo,
        occurrence: &TagOccurrence,
        scope: Scope,
        max_depth: usize,
    ) -> Self {
        Self {
            page,
            tag_name: occurrence.name.clone(),
            attributes: occurrence.attributes.clone(),
            inner_html: occurrence.inner_html().to_string(),
            outer_html: occurrence.to_string(),
            scope,
            is_entity: false,
            depth: 0,
            max_depth,
        }
    }

    /// Switch between entity mode and display mode.
    pub fn with_entity(mut self, is_entity: bool) -> Self {
        self.is_entity = is_entity;
        self
    }

    /// Create a child context for a nested occurrence in entity mode.
    ///
    /// The child shares the page and scope and is marked as an inner element.
    /// Returns [`RenderError::MaxDepthExceeded`] once the depth bound is hit.
    pub fn nested(&mut self, occurrence: &TagOccurrence) -> Result<RenderContext<'_>, RenderError> {
        if self.depth >= self.max_depth {
            return Err(RenderError::MaxDepthExceeded {
                max_depth: self.max_depth,
            });
        }
        let scope = Scope {
            inner: true,
            ..self.scope
        };
        Ok(RenderContext {
            page: &mut *self.page,
            tag_name: occurrence.name.clone(),
            attributes: occurrence.attributes.clone(),
            inner_html: occurrence.inner_html().to_string(),
            outer_html: occurrence.to_string(),
            scope,
            is_entity: true,
            depth: self.depth + 1,
            max_depth: self.max_depth,
        })
    }

    pub fn page(&self) -> &PageInfo {
        &*self.page
    }

    pub fn page_mut(&mut self) -> &mut PageInfo {
        &mut *self.page
    }

    pub fn site_id(&self) -> i64 {
        self.page.site_id()
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Attributes are writable so a tag can default or rewrite them before
    /// delegating to another evaluator.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    pub fn outer_html(&self) -> &str {
        &self.outer_html
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn channel_id(&self) -> i64 {
        self.scope.channel_id
    }

    pub fn content_id(&self) -> i64 {
        self.scope.content_id
    }

    pub fn item(&self) -> Option<ListItem> {
        self.scope.item
    }

    pub fn is_inner_element(&self) -> bool {
        self.scope.inner
    }

    pub fn is_entity(&self) -> bool {
        self.is_entity
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
