mod attr;
mod entity_ref;
mod field;
mod projection;
mod value;

pub use attr::{AttrDescriptor, AttrType, BoolDefault};
pub use entity_ref::EntityRef;
pub use field::{FieldDescriptor, StyleTable};
pub use projection::{ChannelProjection, ContentProjection};
pub use value::TagValue;
