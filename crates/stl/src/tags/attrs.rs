//! Attribute descriptors shared across tag schemas, and the coercions built
//! on them.

use crate::config::RenderConfig;
use crate::interpreter::{ChannelAddress, ParsedAttrs, TextTransform, normalize_format_string};
use crate::types::{AttrDescriptor, AttrType, BoolDefault};

pub const CHANNEL_INDEX: AttrDescriptor = AttrDescriptor::string("channelIndex", "Channel index");
pub const CHANNEL_NAME: AttrDescriptor = AttrDescriptor::string("channelName", "Channel name");
pub const PARENT: AttrDescriptor =
    AttrDescriptor::new("parent", "Use the parent channel", AttrType::Boolean);
pub const UP_LEVEL: AttrDescriptor =
    AttrDescriptor::new("upLevel", "Levels above the current channel", AttrType::Integer);
pub const TOP_LEVEL: AttrDescriptor =
    AttrDescriptor::new("topLevel", "Level below the site root", AttrType::Integer);
pub const TYPE: AttrDescriptor = AttrDescriptor::new("type", "Field to display", AttrType::Enum);

pub const LEFT_TEXT: AttrDescriptor = AttrDescriptor::string("leftText", "Text before the value");
pub const RIGHT_TEXT: AttrDescriptor = AttrDescriptor::string("rightText", "Text after the value");
pub const FORMAT_STRING: AttrDescriptor =
    AttrDescriptor::new("formatString", "Display format", AttrType::DateTimeFormat);
pub const SEPARATOR: AttrDescriptor =
    AttrDescriptor::string("separator", "Separator between multiple values");
pub const START_INDEX: AttrDescriptor =
    AttrDescriptor::new("startIndex", "First character shown", AttrType::Integer);
pub const LENGTH: AttrDescriptor =
    AttrDescriptor::new("length", "Number of characters shown", AttrType::Integer);
pub const WORD_NUM: AttrDescriptor =
    AttrDescriptor::new("wordNum", "Maximum characters before the ellipsis", AttrType::Integer);
pub const ELLIPSIS: AttrDescriptor = AttrDescriptor::string("ellipsis", "Text marking a cut");
pub const REPLACE: AttrDescriptor =
    AttrDescriptor::string("replace", "Text to replace, or /regex/");
pub const TO: AttrDescriptor = AttrDescriptor::string("to", "Replacement text");
pub const IS_CLEAR_TAGS: AttrDescriptor =
    AttrDescriptor::new("isClearTags", "Strip HTML tags", AttrType::Boolean);
pub const IS_RETURN_TO_BR: AttrDescriptor =
    AttrDescriptor::new("isReturnToBr", "Convert line breaks to <br />", AttrType::Boolean);
pub const IS_LOWER: AttrDescriptor =
    AttrDescriptor::new("isLower", "Convert to lower case", AttrType::Boolean);
pub const IS_UPPER: AttrDescriptor =
    AttrDescriptor::new("isUpper", "Convert to upper case", AttrType::Boolean);

pub const SRC: AttrDescriptor = AttrDescriptor::string("src", "Explicit URL");
pub const ALT_SRC: AttrDescriptor =
    AttrDescriptor::string("altSrc", "URL used when the field is empty");
pub const WIDTH: AttrDescriptor = AttrDescriptor::string("width", "Width");
pub const HEIGHT: AttrDescriptor = AttrDescriptor::string("height", "Height");
pub const PLAY_URL: AttrDescriptor = AttrDescriptor::string("playUrl", "Explicit media URL");
pub const IMAGE_URL: AttrDescriptor = AttrDescriptor::string("imageUrl", "Poster image URL");
pub const IS_AUTO_PLAY: AttrDescriptor =
    AttrDescriptor::new("isAutoPlay", "Start playing on load", AttrType::Boolean);

/// Addressing attributes. `parent` means one level up unless `upLevel` is
/// written explicitly.
pub fn channel_address(attrs: &ParsedAttrs) -> ChannelAddress {
    let up_level = if attrs.is_present(&UP_LEVEL) {
        attrs.integer(&UP_LEVEL, 0)
    } else if attrs.boolean(&PARENT, BoolDefault::OFF) {
        1
    } else {
        0
    };
    ChannelAddress::builder()
        .up_level(up_level)
        .top_level(attrs.integer(&TOP_LEVEL, -1))
        .channel_index(attrs.string(&CHANNEL_INDEX, ""))
        .channel_name(attrs.string(&CHANNEL_NAME, ""))
        .build()
}

/// Pipeline settings from the display attributes.
pub fn text_transform(attrs: &ParsedAttrs, config: &RenderConfig) -> TextTransform {
    TextTransform::builder()
        .replace(attrs.string(&REPLACE, ""))
        .to(attrs.string(&TO, ""))
        .start_index(attrs.integer(&START_INDEX, 0))
        .length(attrs.integer(&LENGTH, 0))
        .word_num(attrs.integer(&WORD_NUM, 0))
        .ellipsis(attrs.string(&ELLIPSIS, &config.ellipsis))
        .clear_tags(attrs.boolean(&IS_CLEAR_TAGS, BoolDefault::OFF))
        .return_to_br(attrs.boolean(&IS_RETURN_TO_BR, BoolDefault::OFF))
        .lower(attrs.boolean(&IS_LOWER, BoolDefault::PRESENCE))
        .upper(attrs.boolean(&IS_UPPER, BoolDefault::PRESENCE))
        .format_string(normalize_format_string(&attrs.string(&FORMAT_STRING, "")))
        .date_format(config.date_format.as_str())
        .build()
}

/// Wrap non-empty output in `leftText`/`rightText`; empty stays empty.
pub fn decorate(attrs: &ParsedAttrs, text: String) -> String {
    if text.is_empty() {
        return text;
    }
    format!(
        "{}{text}{}",
        attrs.text(&LEFT_TEXT).unwrap_or_default(),
        attrs.text(&RIGHT_TEXT).unwrap_or_default()
    )
}
