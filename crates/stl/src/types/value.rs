use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use super::{ChannelProjection, ContentProjection};

/// Result of evaluating one tag occurrence.
///
/// Display tags always produce [`TagValue::Text`]. In entity mode a tag with
/// no `type` attribute hands back the projection itself so the caller can
/// keep working with it programmatically.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TagValue {
    Text(String),
    Channel(Box<ChannelProjection>),
    Content(Box<ContentProjection>),
}

impl TagValue {
    /// Empty text, the result of every degraded evaluation.
    pub fn empty() -> TagValue {
        TagValue::Text(String::new())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_channel(&self) -> Option<&ChannelProjection> {
        match self {
            TagValue::Channel(channel) => Some(channel),
            _ => None,
        }
    }

    pub fn as_content(&self) -> Option<&ContentProjection> {
        match self {
            TagValue::Content(content) => Some(content),
            _ => None,
        }
    }

    /// Whether this is empty text. Projections are never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, TagValue::Text(text) if text.is_empty())
    }

    /// Collapse into the string spliced into markup.
    pub fn into_text(self) -> String {
        match self {
            TagValue::Text(text) => text,
            other => other.to_string(),
        }
    }
}

/// Projections display as their caption: channel name or content title.
impl Display for TagValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TagValue::Text(text) => write!(f, "{text}"),
            TagValue::Channel(channel) => write!(f, "{}", channel.channel_name),
            TagValue::Content(content) => write!(f, "{}", content.title),
        }
    }
}

impl From<String> for TagValue {
    fn from(text: String) -> Self {
        TagValue::Text(text)
    }
}

impl From<&str> for TagValue {
    fn from(text: &str) -> Self {
        TagValue::Text(text.to_string())
    }
}

impl From<ChannelProjection> for TagValue {
    fn from(channel: ChannelProjection) -> Self {
        TagValue::Channel(Box::new(channel))
    }
}

impl From<ContentProjection> for TagValue {
    fn from(content: ContentProjection) -> Self {
        TagValue::Content(Box::new(content))
    }
}
