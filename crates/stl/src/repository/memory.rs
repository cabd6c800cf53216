//! In-memory site repository, loaded from TOML fixtures.

use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stl_semantics::InputType;

use crate::interpreter::{ConfigError, RepositoryError};
use crate::repository::SiteRepository;
use crate::types::{ChannelProjection, ContentProjection, FieldDescriptor, StyleTable};

/// A whole site as written in a fixture file.
///
/// ```toml
/// siteId = 1
///
/// [[channels]]
/// id = 1
/// channelName = "Home"
///
/// [[channels]]
/// id = 2
/// parentId = 1
/// channelName = "News"
/// indexName = "news"
///
/// [[styles]]
/// table = "channel"
/// attributeName = "Color"
/// inputType = "text"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteFixture {
    pub site_id: i64,
    pub channels: Vec<ChannelProjection>,
    pub contents: Vec<ContentProjection>,
    pub styles: Vec<StyleFixture>,
}

/// A table style row of a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFixture {
    pub table: StyleTable,
    pub attribute_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default = "default_input_type")]
    pub input_type: String,
    #[serde(default)]
    pub default_value: String,
    /// `0` marks a deleted field.
    #[serde(default = "default_style_id")]
    pub id: i64,
    /// Channels the style applies to; empty means every channel.
    #[serde(default)]
    pub related_ids: Vec<i64>,
}

fn default_input_type() -> String {
    "text".to_string()
}

fn default_style_id() -> i64 {
    1
}

#[derive(Debug, Clone)]
struct Style {
    table: StyleTable,
    related_ids: Vec<i64>,
    descriptor: FieldDescriptor,
}

/// A [`SiteRepository`] over a single site held in memory.
///
/// Tree-derived channel fields are recomputed whenever a channel or content
/// is added, so fixtures only need `id`, `parentId` and the fields under test.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    site_id: i64,
    channels: BTreeMap<i64, ChannelProjection>,
    contents: BTreeMap<i64, ContentProjection>,
    styles: Vec<Style>,
}

impl InMemoryRepository {
    pub fn new(site_id: i64) -> Self {
        Self {
            site_id,
            ..Self::default()
        }
    }

    pub fn site_id(&self) -> i64 {
        self.site_id
    }

    pub fn with_channel(mut self, channel: ChannelProjection) -> Self {
        self.insert_channel(channel);
        self.recompute_tree();
        self
    }

    pub fn with_content(mut self, content: ContentProjection) -> Self {
        self.insert_content(content);
        self.recompute_tree();
        self
    }

    /// Register a user-defined field applying to every channel.
    pub fn with_style(mut self, table: StyleTable, descriptor: FieldDescriptor) -> Self {
        self.styles.push(Style {
            table,
            related_ids: Vec::new(),
            descriptor,
        });
        self
    }

    pub fn from_fixture(fixture: SiteFixture) -> Result<Self, ConfigError> {
        let mut repository = Self::new(fixture.site_id);
        for channel in fixture.channels {
            repository.insert_channel(channel);
        }
        for content in fixture.contents {
            repository.insert_content(content);
        }
        for style in fixture.styles {
            let input_type = style.input_type.parse::<InputType>().map_err(|err| {
                ConfigError::Parse {
                    origin: format!("style '{}'", style.attribute_name),
                    message: err.to_string(),
                }
            })?;
            repository.styles.push(Style {
                table: style.table,
                related_ids: style.related_ids,
                descriptor: FieldDescriptor {
                    id: style.id,
                    attribute_name: style.attribute_name,
                    display_name: style.display_name,
                    input_type,
                    default_value: style.default_value,
                },
            });
        }
        repository.recompute_tree();
        Ok(repository)
    }

    /// Parse a TOML site fixture.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse_fixture(text, "site fixture")
    }

    /// Load a TOML site fixture from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_fixture(&text, &path.display().to_string())
    }

    fn parse_fixture(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let fixture: SiteFixture = toml::from_str(text).map_err(|err| ConfigError::Parse {
            origin: origin.to_string(),
            message: err.to_string(),
        })?;
        Self::from_fixture(fixture)
    }

    fn insert_channel(&mut self, mut channel: ChannelProjection) {
        channel.site_id = self.site_id;
        self.channels.insert(channel.id, channel);
    }

    fn insert_content(&mut self, mut content: ContentProjection) {
        content.site_id = self.site_id;
        self.contents.insert(content.id, content);
    }

    /// Children of `parent_id` in display order.
    fn children(&self, parent_id: i64) -> Vec<i64> {
        let mut children: Vec<&ChannelProjection> = self
            .channels
            .values()
            .filter(|c| c.parent_id == parent_id && c.id != parent_id)
            .collect();
        children.sort_by_key(|c| (c.taxis, c.id));
        children.iter().map(|c| c.id).collect()
    }

    /// Ancestors of `channel_id`, root first. Cycles and dangling parents
    /// end the chain.
    fn ancestors(&self, channel_id: i64) -> Vec<i64> {
        let mut chain = Vec::new();
        let mut current = channel_id;
        while let Some(channel) = self.channels.get(&current) {
            let parent = channel.parent_id;
            if parent == 0 || !self.channels.contains_key(&parent) || chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    fn recompute_tree(&mut self) {
        let ids: Vec<i64> = self.channels.keys().copied().collect();
        for id in ids {
            let ancestors = self.ancestors(id);
            let parent_id = self.channels.get(&id).map_or(0, |c| c.parent_id);
            let siblings = self.children(parent_id);
            let children = self.children(id);
            let content_num = self.contents.values().filter(|c| c.channel_id == id).count();
            let Some(channel) = self.channels.get_mut(&id) else {
                continue;
            };
            channel.parents_path = ancestors
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(",");
            channel.parents_count = i64::try_from(ancestors.len()).unwrap_or_default();
            channel.children_count = i64::try_from(children.len()).unwrap_or_default();
            channel.is_last_node = siblings.last() == Some(&id);
            if content_num > 0 {
                channel.content_num = i64::try_from(content_num).unwrap_or_default();
            }
        }
    }

    fn is_site(&self, site_id: i64) -> bool {
        site_id == self.site_id
    }
}

impl SiteRepository for InMemoryRepository {
    fn get_channel(
        &self,
        site_id: i64,
        channel_id: i64,
    ) -> Result<Option<ChannelProjection>, RepositoryError> {
        if !self.is_site(site_id) {
            return Ok(None);
        }
        Ok(self.channels.get(&channel_id).cloned())
    }

    fn get_content(
        &self,
        site_id: i64,
        channel_id: i64,
        content_id: i64,
    ) -> Result<Option<ContentProjection>, RepositoryError> {
        if !self.is_site(site_id) {
            return Ok(None);
        }
        Ok(self
            .contents
            .get(&content_id)
            .filter(|c| c.channel_id == channel_id)
            .cloned())
    }

    fn find_channel_by_index_or_name(
        &self,
        site_id: i64,
        root_channel_id: i64,
        index: Option<&str>,
        name: Option<&str>,
    ) -> Result<Option<i64>, RepositoryError> {
        if !self.is_site(site_id) || !self.channels.contains_key(&root_channel_id) {
            return Ok(None);
        }
        let mut subtree = Vec::new();
        let mut queue = VecDeque::from([root_channel_id]);
        while let Some(id) = queue.pop_front() {
            if subtree.contains(&id) {
                continue;
            }
            subtree.push(id);
            queue.extend(self.children(id));
        }
        let channels = || subtree.iter().filter_map(|id| self.channels.get(id));
        if let Some(index) = index
            && let Some(found) = channels().find(|c| c.index_name == index)
        {
            return Ok(Some(found.id));
        }
        if let Some(name) = name
            && let Some(found) = channels().find(|c| c.channel_name == name)
        {
            return Ok(Some(found.id));
        }
        Ok(None)
    }

    fn get_ancestor_channel(
        &self,
        _site_id: i64,
        channel_id: i64,
        steps: usize,
    ) -> Result<i64, RepositoryError> {
        let ancestors = self.ancestors(channel_id);
        if steps == 0 {
            return Ok(channel_id);
        }
        if steps >= ancestors.len() {
            return Ok(ancestors.first().copied().unwrap_or(channel_id));
        }
        Ok(ancestors[ancestors.len() - steps])
    }

    fn get_table_style_field(
        &self,
        table: StyleTable,
        field_name: &str,
        scope_ids: &[i64],
    ) -> Result<Option<FieldDescriptor>, RepositoryError> {
        Ok(self
            .styles
            .iter()
            .filter(|s| s.table == table)
            .filter(|s| s.descriptor.attribute_name.eq_ignore_ascii_case(field_name))
            .find(|s| s.related_ids.is_empty() || s.related_ids.iter().any(|id| scope_ids.contains(id)))
            .map(|s| s.descriptor.clone()))
    }

    fn count_image_contents(&self, site_id: i64, channel_id: i64) -> Result<i64, RepositoryError> {
        if !self.is_site(site_id) {
            return Ok(0);
        }
        let count = self
            .contents
            .values()
            .filter(|c| c.channel_id == channel_id && !c.image_url.is_empty())
            .count();
        Ok(i64::try_from(count).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> InMemoryRepository {
        InMemoryRepository::new(1)
            .with_channel(ChannelProjection::builder().id(1).channel_name("Home").build())
            .with_channel(
                ChannelProjection::builder()
                    .id(2)
                    .parent_id(1)
                    .channel_name("News")
                    .build(),
            )
            .with_channel(
                ChannelProjection::builder()
                    .id(3)
                    .parent_id(2)
                    .channel_name("Local")
                    .build(),
            )
    }

    #[test]
    fn test_tree_fields_are_derived() {
        let repo = tree();
        let local = repo.get_channel(1, 3).unwrap().unwrap();
        assert_eq!(local.parents_path, "1,2");
        assert_eq!(local.parents_count, 2);
        assert!(local.is_last_node);
        let home = repo.get_channel(1, 1).unwrap().unwrap();
        assert_eq!(home.children_count, 1);
        assert_eq!(home.parents_count, 0);
    }

    #[test]
    fn test_ancestor_walk_clamps_at_root() {
        let repo = tree();
        assert_eq!(repo.get_ancestor_channel(1, 3, 1).unwrap(), 2);
        assert_eq!(repo.get_ancestor_channel(1, 3, 2).unwrap(), 1);
        assert_eq!(repo.get_ancestor_channel(1, 3, 9).unwrap(), 1);
        assert_eq!(repo.get_ancestor_channel(1, 1, 3).unwrap(), 1);
    }

    #[test]
    fn test_other_site_is_absent() {
        assert!(tree().get_channel(2, 1).unwrap().is_none());
    }
}
