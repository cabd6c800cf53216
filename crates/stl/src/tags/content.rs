//! `stl:content`: displays a field of the content item the page is about.

use stl_semantics::{ContentField, resolve_content_field};
use tracing::debug;

use crate::interpreter::{
    Engine, FieldValue, ListItem, ParsedAttrs, RenderContext, RenderError, TagDefinition,
};
use crate::tags::attrs::{
    ELLIPSIS, FORMAT_STRING, IS_CLEAR_TAGS, IS_LOWER, IS_RETURN_TO_BR, IS_UPPER, LEFT_TEXT,
    LENGTH, REPLACE, RIGHT_TEXT, SEPARATOR, START_INDEX, TO, TYPE, WORD_NUM, decorate,
    text_transform,
};
use crate::tags::media::{
    decode_editor_content, image_html, item_index, style_scope_ids, user_field_value,
};
use crate::types::{AttrDescriptor, ContentProjection, StyleTable, TagValue};

pub const SCHEMA: &[AttrDescriptor] = &[
    TYPE,
    LEFT_TEXT,
    RIGHT_TEXT,
    FORMAT_STRING,
    SEPARATOR,
    START_INDEX,
    LENGTH,
    WORD_NUM,
    ELLIPSIS,
    REPLACE,
    TO,
    IS_CLEAR_TAGS,
    IS_RETURN_TO_BR,
    IS_LOWER,
    IS_UPPER,
];

pub const DEFINITION: TagDefinition = TagDefinition {
    name: "stl:content",
    usage: "Content field",
    description: "Displays a field of the content item being rendered",
    schema: SCHEMA,
    accepts_html_attributes: false,
    evaluate,
};

fn evaluate(engine: &Engine<'_>, ctx: &mut RenderContext<'_>) -> Result<TagValue, RenderError> {
    let attrs = engine.parse_attributes(ctx, SCHEMA)?;
    if ctx.content_id() == 0 {
        debug!("content tag outside a content scope");
        return Ok(TagValue::empty());
    }
    let repository = engine.repository();
    let Some(content) =
        repository.get_content(ctx.site_id(), ctx.channel_id(), ctx.content_id())?
    else {
        debug!(content_id = ctx.content_id(), "content not found");
        return Ok(TagValue::empty());
    };

    let field_type = attrs.enumeration(&TYPE).unwrap_or_default();
    if ctx.is_entity() && field_type.is_empty() {
        return Ok(TagValue::from(content));
    }
    let field_type = if field_type.is_empty() {
        "title"
    } else {
        field_type
    };

    let Some(value) = select(engine, ctx, &attrs, &content, field_type)? else {
        return Ok(TagValue::empty());
    };
    if value.is_empty() {
        return Ok(TagValue::empty());
    }
    let text = text_transform(&attrs, engine.config()).render(&value);
    Ok(TagValue::Text(decorate(&attrs, text)))
}

fn select(
    engine: &Engine<'_>,
    ctx: &RenderContext<'_>,
    attrs: &ParsedAttrs,
    content: &ContentProjection,
    field_type: &str,
) -> Result<Option<FieldValue>, RenderError> {
    let config = engine.config();
    let value = match resolve_content_field(field_type) {
        Some(ContentField::Id) => FieldValue::Number(content.id),
        Some(ContentField::ChannelId) => FieldValue::Number(content.channel_id),
        Some(ContentField::SiteId) => FieldValue::Number(content.site_id),
        Some(ContentField::Title) => FieldValue::Text(content.title.clone()),
        Some(ContentField::SubTitle) => FieldValue::Text(content.sub_title.clone()),
        Some(ContentField::ImageUrl) => {
            if ctx.is_entity() || content.image_url.is_empty() {
                FieldValue::Markup(config.expand_site_url(&content.image_url))
            } else {
                FieldValue::Markup(image_html(config, &content.image_url, attrs.extra()))
            }
        }
        Some(ContentField::VideoUrl) => {
            FieldValue::Markup(config.expand_site_url(&content.video_url))
        }
        Some(ContentField::FileUrl) => FieldValue::Markup(config.expand_site_url(&content.file_url)),
        Some(ContentField::LinkUrl) => FieldValue::Text(content.link_url.clone()),
        Some(ContentField::Summary) => FieldValue::Text(content.summary.clone()),
        Some(ContentField::Author) => FieldValue::Text(content.author.clone()),
        Some(ContentField::Source) => FieldValue::Text(content.source.clone()),
        Some(ContentField::Content) => {
            FieldValue::RichText(decode_editor_content(config, &content.content))
        }
        Some(ContentField::AddDate) => match content.add_date {
            Some(date) => FieldValue::Date(date),
            None => FieldValue::Text(String::new()),
        },
        Some(ContentField::LastEditDate) => match content.last_edit_date {
            Some(date) => FieldValue::Date(date),
            None => FieldValue::Text(String::new()),
        },
        Some(ContentField::Hits) => FieldValue::Number(content.hits),
        Some(ContentField::Tags) => FieldValue::Text(content.tags.clone()),
        Some(ContentField::IsTop) => FieldValue::Boolean(content.is_top),
        Some(ContentField::IsRecommend) => FieldValue::Boolean(content.is_recommend),
        Some(ContentField::IsHot) => FieldValue::Boolean(content.is_hot),
        Some(ContentField::IsColor) => FieldValue::Boolean(content.is_color),
        Some(ContentField::ItemIndex) => match ctx.item() {
            Some(ListItem::Content { index }) => FieldValue::Number(item_index(index, field_type)),
            _ => return user_field(engine, ctx, attrs, content, field_type),
        },
        None => return user_field(engine, ctx, attrs, content, field_type),
    };
    Ok(Some(value))
}

fn user_field(
    engine: &Engine<'_>,
    ctx: &RenderContext<'_>,
    attrs: &ParsedAttrs,
    content: &ContentProjection,
    field_type: &str,
) -> Result<Option<FieldValue>, RenderError> {
    let scope = match engine
        .repository()
        .get_channel(ctx.site_id(), content.channel_id)?
    {
        Some(channel) => style_scope_ids(&channel),
        None => vec![content.channel_id],
    };
    user_field_value(
        engine,
        StyleTable::Content,
        &scope,
        field_type,
        content.additional_value(field_type),
        attrs,
        attrs.text(&SEPARATOR),
    )
}
