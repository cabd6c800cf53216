//! STL interpreter: attribute parsing, entity substitution, addressing,
//! dispatch and text formatting.
//!
//! The page layer tokenizes a template, hands each STL occurrence to an
//! [`Engine`], and splices the returned text back into the page.

mod attributes;
mod context;
mod entity;
mod error;
mod evaluator;
mod format;
mod level;
mod lint;
mod registry;
mod transforms;

pub use attributes::{AttrValue, ParsedAttrs, parse_attributes};
pub use context::{ListItem, PageInfo, RenderContext, Scope, TemplateType};
pub use entity::substitute_entities;
pub use error::{ConfigError, RenderError, RepositoryError};
pub use evaluator::Engine;
pub use format::{
    apply_composite, date_pattern, format_date, format_number, format_text,
    normalize_format_string,
};
pub use level::{ChannelAddress, resolve_channel, resolve_target, walk_levels};
pub use lint::{TagWarning, compute_suggestions, lint_tag};
pub use registry::{TagDefinition, TagEvaluator, TagRegistry};
pub use transforms::{
    FieldValue, TextTransform, max_length_text, replace_text, return_to_br, slice, strip_tags,
};
