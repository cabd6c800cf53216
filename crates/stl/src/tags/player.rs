//! `stl:player`: a media element for a channel or content video field.

use html_escape::encode_double_quoted_attribute;
use stl_semantics::{MediaKind, classify_url};

use crate::interpreter::{Engine, RenderContext, RenderError, TagDefinition};
use crate::tags::attrs::{
    CHANNEL_INDEX, CHANNEL_NAME, HEIGHT, IMAGE_URL, IS_AUTO_PLAY, PARENT, PLAY_URL, TOP_LEVEL,
    TYPE, UP_LEVEL, WIDTH,
};
use crate::tags::media::media_url;
use crate::types::{AttrDescriptor, BoolDefault, TagValue};

pub const SCHEMA: &[AttrDescriptor] = &[
    CHANNEL_INDEX,
    CHANNEL_NAME,
    PARENT,
    UP_LEVEL,
    TOP_LEVEL,
    TYPE,
    PLAY_URL,
    IMAGE_URL,
    WIDTH,
    HEIGHT,
    IS_AUTO_PLAY,
];

pub const DEFINITION: TagDefinition = TagDefinition {
    name: "stl:player",
    usage: "Media player",
    description: "Plays the video or audio of a channel or content item",
    schema: SCHEMA,
    accepts_html_attributes: false,
    evaluate,
};

fn evaluate(engine: &Engine<'_>, ctx: &mut RenderContext<'_>) -> Result<TagValue, RenderError> {
    let attrs = engine.parse_attributes(ctx, SCHEMA)?;
    let config = engine.config();
    let url = media_url(engine, ctx, &attrs, attrs.text(&PLAY_URL), "videoUrl")?;
    if ctx.is_entity() {
        return Ok(TagValue::Text(config.expand_site_url(&url)));
    }
    if url.is_empty() {
        return Ok(TagValue::empty());
    }

    let src = encode_double_quoted_attribute(&config.expand_site_url(&url)).into_owned();
    let width =
        encode_double_quoted_attribute(&attrs.string(&WIDTH, &config.player_width)).into_owned();
    let height =
        encode_double_quoted_attribute(&attrs.string(&HEIGHT, &config.player_height)).into_owned();
    let auto_play = attrs.boolean(&IS_AUTO_PLAY, BoolDefault::ON);
    let poster = attrs
        .text(&IMAGE_URL)
        .filter(|p| !p.is_empty())
        .map(|p| {
            format!(
                r#" poster="{}""#,
                encode_double_quoted_attribute(&config.expand_site_url(p))
            )
        })
        .unwrap_or_default();
    let autoplay = if auto_play { " autoplay" } else { "" };

    let html = match classify_url(&url) {
        MediaKind::Video => format!(
            r#"<video src="{src}" width="{width}" height="{height}"{poster} controls{autoplay}></video>"#
        ),
        MediaKind::Audio => format!(r#"<audio src="{src}" controls{autoplay}></audio>"#),
        MediaKind::Image | MediaKind::Flash | MediaKind::Other => format!(
            r#"<embed src="{src}" width="{width}" height="{height}" autostart="{auto_play}" />"#
        ),
    };
    Ok(TagValue::Text(html))
}
