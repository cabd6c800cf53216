use std::collections::BTreeMap;

use bon::Builder;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use stl_semantics::{ChannelField, ContentField, resolve_channel_field, resolve_content_field};

/// Read-only view of a channel as returned by the site repository.
///
/// Tree-derived fields (`parents_path`, `parents_count`, `children_count`,
/// `is_last_node`) are maintained by the repository, not by the engine.
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelProjection {
    pub id: i64,
    #[builder(default)]
    pub site_id: i64,
    /// `0` for the site root.
    #[builder(default)]
    pub parent_id: i64,
    /// Comma-separated ancestor ids, root first.
    #[builder(default)]
    pub parents_path: String,
    /// Depth below the root; the root itself has `0`.
    #[builder(default)]
    pub parents_count: i64,
    #[builder(default)]
    pub children_count: i64,
    #[builder(default)]
    pub is_last_node: bool,
    #[builder(default)]
    pub channel_name: String,
    #[builder(default)]
    pub index_name: String,
    #[builder(default)]
    pub group_name_collection: String,
    #[builder(default)]
    pub taxis: i64,
    pub add_date: Option<NaiveDateTime>,
    #[builder(default)]
    pub image_url: String,
    #[builder(default)]
    pub content: String,
    #[builder(default)]
    pub content_num: i64,
    #[builder(default)]
    pub file_path: String,
    #[builder(default)]
    pub channel_file_path_rule: String,
    #[builder(default)]
    pub content_file_path_rule: String,
    #[builder(default)]
    pub link_url: String,
    #[builder(default)]
    pub link_type: String,
    #[builder(default)]
    pub channel_template_id: i64,
    #[builder(default)]
    pub content_template_id: i64,
    #[builder(default)]
    pub keywords: String,
    #[builder(default)]
    pub description: String,
    #[builder(default)]
    pub content_model_plugin_id: String,
    #[builder(default)]
    pub content_related_plugin_ids: String,
    /// User-defined schema fields by attribute name.
    #[builder(default)]
    pub additional: BTreeMap<String, String>,
}

impl ChannelProjection {
    /// Value of a user-defined field, matching the name case-insensitively.
    pub fn additional_value(&self, name: &str) -> Option<&str> {
        lookup_additional(&self.additional, name)
    }

    /// Plain string value of a field addressed by symbolic name.
    ///
    /// Built-in text fields are read from the projection, anything else from
    /// the user-defined fields. Used where a tag needs a URL rather than
    /// formatted output.
    pub fn get_string(&self, name: &str) -> String {
        let value = match resolve_channel_field(name) {
            Some(ChannelField::Title) => Some(self.channel_name.as_str()),
            Some(ChannelField::IndexName) => Some(self.index_name.as_str()),
            Some(ChannelField::ImageUrl) => Some(self.image_url.as_str()),
            Some(ChannelField::LinkUrl) => Some(self.link_url.as_str()),
            Some(ChannelField::FilePath) => Some(self.file_path.as_str()),
            Some(ChannelField::Content) => Some(self.content.as_str()),
            Some(ChannelField::Keywords) => Some(self.keywords.as_str()),
            Some(ChannelField::Description) => Some(self.description.as_str()),
            _ => self.additional_value(name),
        };
        value.unwrap_or_default().to_string()
    }
}

/// Read-only view of a content item as returned by the site repository.
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(default, rename_all = "camelCase")]
pub struct ContentProjection {
    pub id: i64,
    pub channel_id: i64,
    #[builder(default)]
    pub site_id: i64,
    #[builder(default)]
    pub title: String,
    #[builder(default)]
    pub sub_title: String,
    #[builder(default)]
    pub image_url: String,
    #[builder(default)]
    pub video_url: String,
    #[builder(default)]
    pub file_url: String,
    #[builder(default)]
    pub link_url: String,
    #[builder(default)]
    pub summary: String,
    #[builder(default)]
    pub author: String,
    #[builder(default)]
    pub source: String,
    #[builder(default)]
    pub content: String,
    pub add_date: Option<NaiveDateTime>,
    pub last_edit_date: Option<NaiveDateTime>,
    #[builder(default)]
    pub hits: i64,
    #[builder(default)]
    pub tags: String,
    #[builder(default)]
    pub is_top: bool,
    #[builder(default)]
    pub is_recommend: bool,
    #[builder(default)]
    pub is_hot: bool,
    #[builder(default)]
    pub is_color: bool,
    #[builder(default)]
    pub additional: BTreeMap<String, String>,
}

impl ContentProjection {
    /// Value of a user-defined field, matching the name case-insensitively.
    pub fn additional_value(&self, name: &str) -> Option<&str> {
        lookup_additional(&self.additional, name)
    }

    /// Plain string value of a field addressed by symbolic name.
    pub fn get_string(&self, name: &str) -> String {
        let value = match resolve_content_field(name) {
            Some(ContentField::Title) => Some(self.title.as_str()),
            Some(ContentField::SubTitle) => Some(self.sub_title.as_str()),
            Some(ContentField::ImageUrl) => Some(self.image_url.as_str()),
            Some(ContentField::VideoUrl) => Some(self.video_url.as_str()),
            Some(ContentField::FileUrl) => Some(self.file_url.as_str()),
            Some(ContentField::LinkUrl) => Some(self.link_url.as_str()),
            Some(ContentField::Summary) => Some(self.summary.as_str()),
            Some(ContentField::Author) => Some(self.author.as_str()),
            Some(ContentField::Source) => Some(self.source.as_str()),
            Some(ContentField::Content) => Some(self.content.as_str()),
            Some(ContentField::Tags) => Some(self.tags.as_str()),
            _ => self.additional_value(name),
        };
        value.unwrap_or_default().to_string()
    }
}

fn lookup_additional<'a>(additional: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    if let Some(value) = additional.get(name) {
        return Some(value);
    }
    additional
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
