//! Helpers shared by the field and media tags: URL resolution, markup for
//! media values and user-defined fields.

use chrono::{NaiveDate, NaiveDateTime};
use html_escape::encode_double_quoted_attribute;
use stl_semantics::{DEFAULT_SEPARATOR, InputType};
use tracing::debug;

use crate::config::RenderConfig;
use crate::interpreter::{
    Engine, FieldValue, ParsedAttrs, RenderContext, RenderError, resolve_target,
};
use crate::parser::Attributes;
use crate::tags::attrs::{ALT_SRC, TYPE, channel_address};
use crate::types::{ChannelProjection, EntityRef, StyleTable};

/// Resolve the URL a media tag shows.
///
/// An explicit URL wins. Otherwise the `type` field (default
/// `default_type`) is read from the current content, when no addressing
/// attribute moved the tag away from it, or from the addressed channel.
/// `altSrc` fills in when the result is empty.
pub fn media_url(
    engine: &Engine<'_>,
    ctx: &RenderContext<'_>,
    attrs: &ParsedAttrs,
    explicit: Option<&str>,
    default_type: &str,
) -> Result<String, RenderError> {
    let mut url = explicit.unwrap_or_default().to_string();
    if url.is_empty() {
        let field = attrs
            .text(&TYPE)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(default_type);
        let repository = engine.repository();
        let site_id = ctx.site_id();
        let target = resolve_target(
            repository,
            site_id,
            ctx.channel_id(),
            ctx.content_id(),
            &channel_address(attrs),
        )?;
        url = match target {
            Some(EntityRef::Content { channel_id, id }) => repository
                .get_content(site_id, channel_id, id)?
                .map(|content| content.get_string(field))
                .unwrap_or_default(),
            Some(EntityRef::Channel { id }) => repository
                .get_channel(site_id, id)?
                .map(|channel| channel.get_string(field))
                .unwrap_or_default(),
            None => String::new(),
        };
    }
    if url.is_empty() {
        url = attrs.string(&ALT_SRC, "");
    }
    Ok(url)
}

/// `<img>` element for `url`, forwarding `extra` as HTML attributes.
pub fn image_html(config: &RenderConfig, url: &str, extra: &Attributes) -> String {
    let mut html = format!(
        r#"<img src="{}""#,
        encode_double_quoted_attribute(&config.expand_site_url(url))
    );
    push_html_attributes(&mut html, extra);
    html.push_str(" />");
    html
}

pub fn push_html_attributes(html: &mut String, extra: &Attributes) {
    for (key, value) in extra.iter() {
        html.push_str(&format!(
            r#" {key}="{}""#,
            encode_double_quoted_attribute(value)
        ));
    }
}

/// Expand site-relative links inside editor content.
pub fn decode_editor_content(config: &RenderConfig, content: &str) -> String {
    if !content.contains("@/") {
        return content.to_string();
    }
    let base = config.site_url.trim_end_matches('/');
    content
        .replace("\"@/", &format!("\"{base}/"))
        .replace("'@/", &format!("'{base}/"))
}

/// 1-based position in the enclosing list, shifted by a `+N`/`-N` suffix
/// (`itemIndex+1`).
pub fn item_index(index: usize, field_type: &str) -> i64 {
    let base = i64::try_from(index).unwrap_or(i64::MAX - 1) + 1;
    let suffix = field_type
        .get("itemindex".len()..)
        .unwrap_or_default()
        .trim();
    let offset = if let Some(n) = suffix.strip_prefix('+') {
        n.trim().parse::<i64>().unwrap_or(0)
    } else if let Some(n) = suffix.strip_prefix('-') {
        -n.trim().parse::<i64>().unwrap_or(0)
    } else {
        0
    };
    base.saturating_add(offset)
}

/// Ids a table style may be scoped to: the channel itself, then its
/// ancestors from nearest to root.
pub fn style_scope_ids(channel: &ChannelProjection) -> Vec<i64> {
    let mut ids = vec![channel.id];
    ids.extend(
        channel
            .parents_path
            .split(',')
            .rev()
            .filter_map(|id| id.trim().parse::<i64>().ok()),
    );
    ids
}

/// Value of a user-defined field, shaped by its input type.
///
/// `None` when the field has no value or its style is missing or deleted.
pub fn user_field_value(
    engine: &Engine<'_>,
    table: StyleTable,
    scope: &[i64],
    name: &str,
    raw: Option<&str>,
    attrs: &ParsedAttrs,
    separator: Option<&str>,
) -> Result<Option<FieldValue>, RenderError> {
    let Some(raw) = raw.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let style = engine
        .repository()
        .get_table_style_field(table, name, scope)?;
    let Some(style) = style.filter(|s| s.is_active()) else {
        debug!(field = name, table = table.as_str(), "user field has no active style");
        return Ok(None);
    };
    let config = engine.config();
    let value = match style.input_type {
        input if input.is_multi_value() => {
            let separator = separator.unwrap_or(DEFAULT_SEPARATOR);
            let parts: Vec<&str> = raw
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .collect();
            FieldValue::Text(parts.join(separator))
        }
        InputType::Image => FieldValue::Markup(image_html(config, raw, attrs.extra())),
        InputType::Video | InputType::File => FieldValue::Markup(config.expand_site_url(raw)),
        InputType::Date | InputType::DateTime => match parse_date(raw) {
            Some(date) => FieldValue::Date(date),
            None => FieldValue::Text(raw.to_string()),
        },
        InputType::Number => match raw.trim().parse::<i64>() {
            Ok(n) => FieldValue::Number(n),
            Err(_) => FieldValue::Text(raw.to_string()),
        },
        InputType::TextEditor => FieldValue::RichText(decode_editor_content(config, raw)),
        InputType::Text
        | InputType::TextArea
        | InputType::CheckBox
        | InputType::Radio
        | InputType::SelectOne
        | InputType::SelectMultiple => FieldValue::Text(raw.to_string()),
    };
    Ok(Some(value))
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d", "%Y/%m/%d"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_index_offsets() {
        assert_eq!(item_index(0, "itemindex"), 1);
        assert_eq!(item_index(4, "itemindex+10"), 15);
        assert_eq!(item_index(4, "itemindex-2"), 3);
        assert_eq!(item_index(4, "itemindex+x"), 5);
    }

    #[test]
    fn test_parse_date_accepts_date_only() {
        let date = parse_date("2023-12-31").unwrap();
        assert_eq!(date.to_string(), "2023-12-31 00:00:00");
    }

    #[test]
    fn test_style_scope_nearest_first() {
        let channel = ChannelProjection::builder()
            .id(7)
            .parents_path("1,3")
            .build();
        assert_eq!(style_scope_ids(&channel), vec![7, 3, 1]);
    }
}
