use serde::{Deserialize, Serialize};
use stl_semantics::InputType;

/// Table holding user-defined fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleTable {
    Channel,
    Content,
}

impl StyleTable {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleTable::Channel => "channel",
            StyleTable::Content => "content",
        }
    }
}

/// Metadata of a user-defined field, as stored in the table style registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Style row id; `0` marks a field that has been deleted.
    pub id: i64,
    pub attribute_name: String,
    pub display_name: String,
    pub input_type: InputType,
    pub default_value: String,
}

impl FieldDescriptor {
    /// Deleted fields keep their stored values but are no longer displayed.
    pub fn is_active(&self) -> bool {
        self.id > 0
    }
}
