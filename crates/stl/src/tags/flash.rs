//! `stl:flash`: a SWFObject embed, or an image or player when the resolved
//! URL is not a Flash movie.

use html_escape::encode_double_quoted_attribute;
use stl_semantics::{MediaKind, classify_url};

use crate::interpreter::{Engine, RenderContext, RenderError, TagDefinition};
use crate::tags::attrs::{
    ALT_SRC, CHANNEL_INDEX, CHANNEL_NAME, HEIGHT, PARENT, SRC, TOP_LEVEL, TYPE, UP_LEVEL, WIDTH,
};
use crate::tags::media::media_url;
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
    WIDTH,
    HEIGHT,
];

pub const DEFINITION: TagDefinition = TagDefinition {
    name: "stl:flash",
    usage: "Flash",
    description: "Displays the Flash movie of a channel or content item; other attributes become SWFObject parameters",
    schema: SCHEMA,
    accepts_html_attributes: true,
    evaluate,
};

/// Body code key of the SWFObject loader script.
pub const SWFOBJECT_SCRIPT: &str = "swfobject";

fn evaluate(engine: &Engine<'_>, ctx: &mut RenderContext<'_>) -> Result<TagValue, RenderError> {
    let attrs = engine.parse_attributes(ctx, SCHEMA)?;
    let config = engine.config();
    let url = media_url(engine, ctx, &attrs, attrs.text(&SRC), "imageUrl")?;
    if ctx.is_entity() {
        return Ok(TagValue::Text(url));
    }
    if url.is_empty() {
        return Ok(TagValue::empty());
    }

    match classify_url(&url) {
        MediaKind::Image => {
            ctx.attributes_mut().insert(SRC.name, url);
            return engine.delegate(ctx, "stl:image");
        }
        MediaKind::Video | MediaKind::Audio => {
            ctx.attributes_mut().insert("playUrl", url);
            return engine.delegate(ctx, "stl:player");
        }
        MediaKind::Flash | MediaKind::Other => {}
    }

    let loader = format!(
        r#"<script type="text/javascript" src="{}"></script>"#,
        config.expand_site_url("@/sitefiles/assets/swfobject.js")
    );
    ctx.page_mut()
        .add_body_code_if_not_exists(SWFOBJECT_SCRIPT, loader);
    let id = ctx.page_mut().next_unique_id();

    let mut params = attrs.extra().clone();
    for (key, default) in [("quality", "high"), ("wmode", "transparent")] {
        if params.get(key).is_none_or(str::is_empty) {
            params.insert(key, default);
        }
    }
    let mut param_lines = String::new();
    for (key, value) in params.iter() {
        param_lines.push_str(&format!(
            "    so_{id}.addParam(\"{}\", \"{}\");\n",
            js_string(key),
            js_string(value)
        ));
    }

    let src = js_string(&config.expand_site_url(&url));
    let width = js_string(&attrs.string(&WIDTH, &config.flash_width));
    let height = js_string(&attrs.string(&HEIGHT, &config.flash_height));
    let container = encode_double_quoted_attribute(&format!("flashcontent_{id}")).into_owned();
    Ok(TagValue::Text(format!(
        r#"<div id="{container}"></div>
<script type="text/javascript">
    // <![CDATA[
    var so_{id} = new SWFObject("{src}", "flash_{id}", "{width}", "{height}", "7", "");
{param_lines}    so_{id}.write("flashcontent_{id}");
    // ]]>
</script>"#
    )))
}

/// Escape text for a double-quoted JavaScript string literal.
fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\x3C"),
            other => out.push(other),
        }
    }
    out
}
