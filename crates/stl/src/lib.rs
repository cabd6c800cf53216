//! Attribute parsing and dispatch engine for STL template tags.
//!
//! STL tags (`<stl:channel type="title" />`, `<stl:flash />`, ...) are
//! embedded in HTML templates. For each occurrence the engine expands entity
//! markers in attribute values, coerces the attributes against the tag's
//! schema, resolves which channel or content item the tag addresses, and
//! formats the selected field through a fixed transform pipeline.
//!
//! ```
//! use stl::{ChannelProjection, Engine, InMemoryRepository, PageInfo, Scope, parse_tag};
//!
//! let repository = InMemoryRepository::new(1).with_channel(
//!     ChannelProjection::builder()
//!         .id(1)
//!         .channel_name("Corporate News Archive")
//!         .build(),
//! );
//! let engine = Engine::new(&repository);
//! let mut page = PageInfo::new(1);
//! let tag = parse_tag(r#"<stl:channel type="title" wordNum="5" />"#).unwrap();
//! let html = engine.render_tag(&mut page, &tag, Scope::channel(1)).unwrap();
//! assert_eq!(html, "Corpo...");
//! ```

pub mod config;
pub mod interpreter;
pub mod parser;
pub mod repository;
pub mod tags;
pub mod types;

pub use config::RenderConfig;
pub use interpreter::{
    ConfigError, Engine, FieldValue, ListItem, PageInfo, RenderContext, RenderError,
    RepositoryError, Scope, TagDefinition, TagRegistry, TagWarning, TemplateType, TextTransform,
    compute_suggestions, lint_tag, normalize_format_string,
};
pub use parser::{Attributes, ParseError, Segment, TagOccurrence, parse_entities, parse_tag};
pub use repository::{InMemoryRepository, SiteFixture, SiteRepository, StyleFixture};
pub use types::{
    AttrDescriptor, AttrType, BoolDefault, ChannelProjection, ContentProjection, EntityRef,
    FieldDescriptor, StyleTable, TagValue,
};
