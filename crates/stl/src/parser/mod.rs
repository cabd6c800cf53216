//! Parsers for the markup the engine has to understand itself.
//!
//! The page-level HTML tokenizer lives outside this crate. What is here is the
//! grammar of a single tag occurrence (used by tooling and by entity markers)
//! and the entity-marker grammar scanned inside attribute values.

pub mod ast;
mod entity;
pub mod error;
mod tag;

pub use ast::*;
pub use entity::parse_entities;
pub use error::ParseError;
pub use tag::parse_tag;
