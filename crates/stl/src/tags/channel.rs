//! `stl:channel`: displays a field of the current or an addressed channel.

use stl_semantics::{ChannelField, resolve_channel_field};
use tracing::debug;

use crate::interpreter::{
    Engine, FieldValue, ListItem, ParsedAttrs, RenderContext, RenderError, TagDefinition,
    TemplateType, resolve_channel,
};
use crate::tags::attrs::{
    CHANNEL_INDEX, CHANNEL_NAME, ELLIPSIS, FORMAT_STRING, IS_CLEAR_TAGS, IS_LOWER,
    IS_RETURN_TO_BR, IS_UPPER, LEFT_TEXT, LENGTH, PARENT, REPLACE, RIGHT_TEXT, SEPARATOR,
    START_INDEX, TO, TOP_LEVEL, TYPE, UP_LEVEL, WORD_NUM, channel_address, decorate,
    text_transform,
};
use crate::tags::media::{
    decode_editor_content, image_html, item_index, style_scope_ids, user_field_value,
};
use crate::types::{AttrDescriptor, ChannelProjection, StyleTable, TagValue};

pub const SCHEMA: &[AttrDescriptor] = &[
    CHANNEL_INDEX,
    CHANNEL_NAME,
    PARENT,
    UP_LEVEL,
    TOP_LEVEL,
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
    name: "stl:channel",
    usage: "Channel field",
    description: "Displays a field of the current channel or of a channel addressed by level, index or name",
    schema: SCHEMA,
    accepts_html_attributes: false,
    evaluate,
};

/// A field either goes through the pipeline or is returned as is.
enum Selected {
    Value(FieldValue),
    Verbatim(String),
}

fn evaluate(engine: &Engine<'_>, ctx: &mut RenderContext<'_>) -> Result<TagValue, RenderError> {
    let attrs = engine.parse_attributes(ctx, SCHEMA)?;
    let address = channel_address(&attrs);
    let repository = engine.repository();
    let site_id = ctx.site_id();

    let Some(channel_id) = resolve_channel(repository, site_id, ctx.channel_id(), &address)?
    else {
        return Ok(TagValue::empty());
    };
    let Some(channel) = repository.get_channel(site_id, channel_id)? else {
        debug!(channel_id, "channel not found");
        return Ok(TagValue::empty());
    };

    let field_type = attrs.enumeration(&TYPE).unwrap_or_default();
    if ctx.is_entity() && field_type.is_empty() {
        return Ok(TagValue::from(channel));
    }
    let field_type = if field_type.is_empty() {
        "title"
    } else {
        field_type
    };

    let value = match select(engine, ctx, &attrs, &channel, field_type)? {
        Some(Selected::Value(value)) => value,
        Some(Selected::Verbatim(text)) => return Ok(TagValue::Text(text)),
        None => return Ok(TagValue::empty()),
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
    channel: &ChannelProjection,
    field_type: &str,
) -> Result<Option<Selected>, RenderError> {
    let config = engine.config();
    let value = match resolve_channel_field(field_type) {
        Some(ChannelField::Id) => FieldValue::Number(channel.id),
        Some(ChannelField::SiteId) => FieldValue::Number(channel.site_id),
        Some(ChannelField::ContentModelPluginId) => {
            FieldValue::Text(channel.content_model_plugin_id.clone())
        }
        Some(ChannelField::ContentRelatedPluginIds) => {
            FieldValue::Text(channel.content_related_plugin_ids.clone())
        }
        Some(ChannelField::ParentId) => FieldValue::Number(channel.parent_id),
        Some(ChannelField::ParentsPath) => FieldValue::Text(channel.parents_path.clone()),
        Some(ChannelField::ParentsCount) => FieldValue::Number(channel.parents_count),
        Some(ChannelField::ChildrenCount | ChannelField::CountOfChannels) => {
            FieldValue::Number(channel.children_count)
        }
        Some(ChannelField::IsLastNode) => FieldValue::Boolean(channel.is_last_node),
        Some(ChannelField::IndexName) => FieldValue::Text(channel.index_name.clone()),
        Some(ChannelField::GroupNameCollection) => {
            FieldValue::Text(channel.group_name_collection.clone())
        }
        Some(ChannelField::Taxis) => FieldValue::Number(channel.taxis),
        Some(ChannelField::AddDate) => match channel.add_date {
            Some(date) => FieldValue::Date(date),
            None => FieldValue::Text(String::new()),
        },
        Some(ChannelField::ImageUrl) => {
            if ctx.is_entity() {
                return Ok(Some(Selected::Verbatim(
                    config.expand_site_url(&channel.image_url),
                )));
            }
            if channel.image_url.is_empty() {
                FieldValue::Markup(String::new())
            } else {
                FieldValue::Markup(image_html(config, &channel.image_url, attrs.extra()))
            }
        }
        Some(ChannelField::Content) => {
            FieldValue::RichText(decode_editor_content(config, &channel.content))
        }
        Some(ChannelField::ContentNum | ChannelField::CountOfContents) => {
            FieldValue::Number(channel.content_num)
        }
        Some(ChannelField::FilePath) => FieldValue::Text(channel.file_path.clone()),
        Some(ChannelField::ChannelFilePathRule) => {
            FieldValue::Text(channel.channel_file_path_rule.clone())
        }
        Some(ChannelField::ContentFilePathRule) => {
            FieldValue::Text(channel.content_file_path_rule.clone())
        }
        Some(ChannelField::LinkUrl) => FieldValue::Text(channel.link_url.clone()),
        Some(ChannelField::LinkType) => FieldValue::Text(channel.link_type.clone()),
        Some(ChannelField::ChannelTemplateId) => FieldValue::Number(channel.channel_template_id),
        Some(ChannelField::ContentTemplateId) => FieldValue::Number(channel.content_template_id),
        Some(ChannelField::Keywords) => FieldValue::Text(channel.keywords.clone()),
        Some(ChannelField::Description) => FieldValue::Text(channel.description.clone()),
        Some(ChannelField::ExtendValues) => {
            FieldValue::Text(serde_json::to_string(&channel.additional).unwrap_or_default())
        }
        Some(ChannelField::Title) => FieldValue::Text(channel.channel_name.clone()),
        Some(ChannelField::PageContent) => {
            if !ctx.is_inner_element() && ctx.page().template_type() == TemplateType::Channel {
                return Ok(Some(Selected::Verbatim(ctx.outer_html().to_string())));
            }
            FieldValue::RichText(decode_editor_content(config, &channel.content))
        }
        Some(ChannelField::ItemIndex) => match ctx.item() {
            Some(ListItem::Channel { index }) => {
                FieldValue::Number(item_index(index, field_type))
            }
            _ => return user_field(engine, attrs, channel, field_type),
        },
        Some(ChannelField::CountOfImageContents) => FieldValue::Number(
            engine
                .repository()
                .count_image_contents(ctx.site_id(), channel.id)?,
        ),
        None => return user_field(engine, attrs, channel, field_type),
    };
    Ok(Some(Selected::Value(value)))
}

fn user_field(
    engine: &Engine<'_>,
    attrs: &ParsedAttrs,
    channel: &ChannelProjection,
    field_type: &str,
) -> Result<Option<Selected>, RenderError> {
    let value = user_field_value(
        engine,
        StyleTable::Channel,
        &style_scope_ids(channel),
        field_type,
        channel.additional_value(field_type),
        attrs,
        attrs.text(&SEPARATOR),
    )?;
    Ok(value.map(Selected::Value))
}
