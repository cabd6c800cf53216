//! Built-in STL tags.

pub mod attrs;
pub mod channel;
pub mod content;
pub mod flash;
pub mod image;
mod media;
pub mod player;

use crate::interpreter::TagDefinition;

/// Every tag registered by [`TagRegistry::with_standard_tags`](crate::TagRegistry::with_standard_tags).
pub const STANDARD_TAGS: &[TagDefinition] = &[
    channel::DEFINITION,
    content::DEFINITION,
    flash::DEFINITION,
    image::DEFINITION,
    player::DEFINITION,
];
