use serde::Serialize;

/// The entity a tag queries once addressing has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EntityRef {
    Channel {
        id: i64,
    },
    #[serde(rename_all = "camelCase")]
    Content {
        channel_id: i64,
        id: i64,
    },
}

impl EntityRef {
    /// The channel the entity lives in.
    pub fn channel_id(&self) -> i64 {
        match self {
            EntityRef::Channel { id } => *id,
            EntityRef::Content { channel_id, .. } => *channel_id,
        }
    }
}
