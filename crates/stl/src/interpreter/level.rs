//! Channel addressing: ancestor walk plus symbolic lookup.
//!
//! The walk (`topLevel` from the root down, or `upLevel` from the current
//! channel up) picks a search root; `channelIndex`/`channelName` are then
//! looked up relative to that root, not to the original channel.

use bon::Builder;
use tracing::debug;

use crate::interpreter::RepositoryError;
use crate::repository::SiteRepository;
use crate::types::EntityRef;

/// Addressing attributes of a tag, already coerced.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(on(String, into))]
pub struct ChannelAddress {
    /// Steps up from the current channel; `0` means no movement.
    #[builder(default)]
    pub up_level: i64,
    /// Depth below the root; negative means unset.
    #[builder(default = -1)]
    pub top_level: i64,
    #[builder(default)]
    pub channel_index: String,
    #[builder(default)]
    pub channel_name: String,
}

impl Default for ChannelAddress {
    fn default() -> Self {
        ChannelAddress::builder().build()
    }
}

impl ChannelAddress {
    /// Whether any addressing attribute moves the tag off the current entity.
    pub fn is_explicit(&self) -> bool {
        self.up_level > 0 || self.top_level >= 0 || self.has_symbolic_lookup()
    }

    pub fn has_symbolic_lookup(&self) -> bool {
        !self.channel_index.is_empty() || !self.channel_name.is_empty()
    }
}

/// Apply the ancestor walk to `current`.
pub fn walk_levels(
    repository: &dyn SiteRepository,
    site_id: i64,
    current: i64,
    address: &ChannelAddress,
) -> Result<i64, RepositoryError> {
    if address.top_level >= 0 {
        let Some(channel) = repository.get_channel(site_id, current)? else {
            return Ok(current);
        };
        let depth = channel.parents_count;
        if address.top_level >= depth {
            return Ok(current);
        }
        let steps = usize::try_from(depth - address.top_level).unwrap_or_default();
        return repository.get_ancestor_channel(site_id, current, steps);
    }
    if address.up_level > 0 {
        let steps = usize::try_from(address.up_level).unwrap_or_default();
        return repository.get_ancestor_channel(site_id, current, steps);
    }
    Ok(current)
}

/// Resolve `address` to a channel id, starting from `current`.
///
/// Returns `None` when a symbolic lookup finds no match; the caller treats
/// the target as absent.
pub fn resolve_channel(
    repository: &dyn SiteRepository,
    site_id: i64,
    current: i64,
    address: &ChannelAddress,
) -> Result<Option<i64>, RepositoryError> {
    let root = walk_levels(repository, site_id, current, address)?;
    if !address.has_symbolic_lookup() {
        return Ok(Some(root));
    }
    let found = repository.find_channel_by_index_or_name(
        site_id,
        root,
        non_empty(&address.channel_index),
        non_empty(&address.channel_name),
    )?;
    if found.is_none() {
        debug!(
            root,
            index = %address.channel_index,
            name = %address.channel_name,
            "no channel matches address"
        );
    }
    Ok(found)
}

/// Resolve the entity a tag refers to.
///
/// Without explicit addressing a tag on a content page targets that content
/// item; otherwise it targets the addressed channel.
pub fn resolve_target(
    repository: &dyn SiteRepository,
    site_id: i64,
    channel_id: i64,
    content_id: i64,
    address: &ChannelAddress,
) -> Result<Option<EntityRef>, RepositoryError> {
    if !address.is_explicit() && content_id != 0 {
        return Ok(Some(EntityRef::Content {
            channel_id,
            id: content_id,
        }));
    }
    let channel = resolve_channel(repository, site_id, channel_id, address)?;
    Ok(channel.map(|id| EntityRef::Channel { id }))
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
