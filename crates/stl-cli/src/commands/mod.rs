//! CLI command implementations.

mod check;
mod render;
mod tags;

pub use check::{run_check, CheckArgs};
pub use render::{run_render, RenderArgs};
pub use tags::{run_tags, TagsArgs};
