//! The read-only site repository the engine queries.

mod memory;

pub use memory::{InMemoryRepository, SiteFixture, StyleFixture};

use crate::interpreter::RepositoryError;
use crate::types::{ChannelProjection, ContentProjection, FieldDescriptor, StyleTable};

/// Read-only lookups over channels, contents and table styles.
///
/// Implementations own whatever caching they need and must tolerate
/// concurrent readers; the engine never writes through this trait. `Ok(None)`
/// means "absent" and degrades to empty output; `Err` aborts the render.
pub trait SiteRepository: Send + Sync {
    fn get_channel(
        &self,
        site_id: i64,
        channel_id: i64,
    ) -> Result<Option<ChannelProjection>, RepositoryError>;

    fn get_content(
        &self,
        site_id: i64,
        channel_id: i64,
        content_id: i64,
    ) -> Result<Option<ContentProjection>, RepositoryError>;

    /// Find a channel in the subtree rooted at `root_channel_id`, root
    /// included. When both are given, `index` is tried before `name`.
    fn find_channel_by_index_or_name(
        &self,
        site_id: i64,
        root_channel_id: i64,
        index: Option<&str>,
        name: Option<&str>,
    ) -> Result<Option<i64>, RepositoryError>;

    /// Walk `steps` parents up from `channel_id`, stopping at the root.
    fn get_ancestor_channel(
        &self,
        site_id: i64,
        channel_id: i64,
        steps: usize,
    ) -> Result<i64, RepositoryError>;

    /// Style metadata for a user-defined field visible from `scope_ids`.
    fn get_table_style_field(
        &self,
        table: StyleTable,
        field_name: &str,
        scope_ids: &[i64],
    ) -> Result<Option<FieldDescriptor>, RepositoryError>;

    /// Number of checked contents with an image in `channel_id`.
    fn count_image_contents(&self, site_id: i64, channel_id: i64) -> Result<i64, RepositoryError>;
}
