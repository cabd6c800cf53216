//! `stl:image`: an `<img>` element for a channel or content image field.

use crate::interpreter::{Engine, RenderContext, RenderError, TagDefinition};
use crate::tags::attrs::{
    ALT_SRC, CHANNEL_INDEX, CHANNEL_NAME, PARENT, SRC, TOP_LEVEL, TYPE, UP_LEVEL,
};
use crate::tags::media::{image_html, media_url};
use crate::types::{AttrDescriptor, TagValue};

pub const SCHEMA: &[AttrDescriptor] = &[
    CHANNEL_INDEX,
    CHANNEL_NAME,
    PARENT,
    UP_LEVEL,
    TOP_LEVEL,
    TYPE,
    SRC,
    ALT_SRC,
];

pub const DEFINITION: TagDefinition = TagDefinition {
    name: "stl:image",
    usage: "Image",
    description: "Displays the image of a channel or content item; other attributes are copied onto the <img> element",
    schema: SCHEMA,
    accepts_html_attributes: true,
    evaluate,
};

fn evaluate(engine: &Engine<'_>, ctx: &mut RenderContext<'_>) -> Result<TagValue, RenderError> {
    let attrs = engine.parse_attributes(ctx, SCHEMA)?;
    let url = media_url(engine, ctx, &attrs, attrs.text(&SRC), "imageUrl")?;
    if ctx.is_entity() {
        return Ok(TagValue::Text(engine.config().expand_site_url(&url)));
    }
    if url.is_empty() {
        return Ok(TagValue::empty());
    }
    Ok(TagValue::Text(image_html(engine.config(), &url, attrs.extra())))
}
