//! The engine: dispatch of tag occurrences to their evaluators.
//!
//! A render pass hands each STL occurrence found by the page tokenizer to
//! [`Engine::render_tag`]. The engine looks the tag up in its registry,
//! builds a [`RenderContext`] and runs the evaluator, which parses its
//! attributes through [`Engine::parse_attributes`] (expanding entity
//! markers on the way), resolves its target and formats the field.

use bon::Builder;
use tracing::{debug, trace};

use crate::config::RenderConfig;
use crate::interpreter::attributes::{ParsedAttrs, parse_attributes};
use crate::interpreter::entity::substitute_entities;
use crate::interpreter::{PageInfo, RenderContext, RenderError, Scope, TagRegistry};
use crate::parser::TagOccurrence;
use crate::repository::SiteRepository;
use crate::types::{AttrDescriptor, TagValue};

/// Tag evaluation engine bound to a repository, a registry and a config.
///
/// The engine holds no per-page state and can be shared across concurrent
/// renders; everything page-scoped lives in [`PageInfo`].
#[derive(Builder)]
pub struct Engine<'r> {
    repository: &'r dyn SiteRepository,
    #[builder(default = TagRegistry::standard())]
    registry: &'r TagRegistry,
    #[builder(default)]
    config: RenderConfig,
}

impl<'r> Engine<'r> {
    /// An engine over `repository` with the built-in tags and default config.
    pub fn new(repository: &'r dyn SiteRepository) -> Self {
        Engine::builder().repository(repository).build()
    }

    pub fn repository(&self) -> &'r dyn SiteRepository {
        self.repository
    }

    pub fn registry(&self) -> &'r TagRegistry {
        self.registry
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render one occurrence for display.
    ///
    /// Unknown tags are returned as their own markup so the page still shows
    /// what the author wrote.
    ///
    /// # Errors
    ///
    /// Only repository failures are reported; everything else degrades to
    /// empty or unchanged output.
    pub fn render_tag(
        &self,
        page: &mut PageInfo,
        occurrence: &TagOccurrence,
        scope: Scope,
    ) -> Result<String, RenderError> {
        let mut ctx = RenderContext::new(page, occurrence, scope, self.config.max_entity_depth);
        match self.evaluate(&mut ctx)? {
            Some(value) => Ok(value.into_text()),
            None => {
                debug!(tag = %occurrence.name, "unknown tag, markup left unchanged");
                Ok(occurrence.to_string())
            }
        }
    }

    /// Evaluate one occurrence in entity mode, yielding a structured value
    /// when the tag supports it.
    pub fn resolve_entity(
        &self,
        page: &mut PageInfo,
        occurrence: &TagOccurrence,
        scope: Scope,
    ) -> Result<TagValue, RenderError> {
        let mut ctx = RenderContext::new(page, occurrence, scope, self.config.max_entity_depth)
            .with_entity(true);
        match self.evaluate(&mut ctx)? {
            Some(value) => Ok(value),
            None => {
                debug!(tag = %occurrence.name, "unknown tag in entity mode");
                Ok(TagValue::Text(occurrence.to_string()))
            }
        }
    }

    /// Run the evaluator registered for the context's tag.
    ///
    /// Returns `Ok(None)` when no tag of that name is registered.
    pub fn evaluate(&self, ctx: &mut RenderContext<'_>) -> Result<Option<TagValue>, RenderError> {
        let Some(definition) = self.registry.get(ctx.tag_name()) else {
            return Ok(None);
        };
        trace!(
            tag = definition.name,
            depth = ctx.depth(),
            entity = ctx.is_entity(),
            "dispatching tag"
        );
        (definition.evaluate)(self, ctx).map(Some)
    }

    /// Hand the context over to another tag's evaluator, keeping its
    /// attributes, scope and mode.
    pub fn delegate(
        &self,
        ctx: &mut RenderContext<'_>,
        tag_name: &str,
    ) -> Result<TagValue, RenderError> {
        match self.registry.get(tag_name) {
            Some(definition) => (definition.evaluate)(self, ctx),
            None => {
                debug!(tag = tag_name, "delegate target not registered");
                Ok(TagValue::empty())
            }
        }
    }

    /// Coerce the context's attributes against `schema`, expanding entity
    /// markers in every matched value first.
    pub fn parse_attributes(
        &self,
        ctx: &mut RenderContext<'_>,
        schema: &[AttrDescriptor],
    ) -> Result<ParsedAttrs, RenderError> {
        let raw = ctx.attributes().clone();
        parse_attributes(&raw, schema, |value| substitute_entities(self, ctx, value))
    }

    /// Expand entity markers in a single value.
    pub fn substitute(
        &self,
        ctx: &mut RenderContext<'_>,
        value: &str,
    ) -> Result<String, RenderError> {
        substitute_entities(self, ctx, value)
    }
}
