//! Shared site fixture for the integration tests.
//!
//! ```text
//! 1 Home (root, depth 0)
//! ├── 2 Corporate News Archive (depth 1)
//! │   └── 3 Local (depth 2)          contents 10, 11
//! ├── 4 Sports (depth 1)             imageUrl is a .swf
//! └── 5 Media (depth 1)              imageUrl is a .mp4
//! ```

use stl::{Engine, InMemoryRepository, PageInfo, Scope, TagValue, parse_tag};

pub const SITE_ID: i64 = 1;
pub const HOME: i64 = 1;
pub const NEWS: i64 = 2;
pub const LOCAL: i64 = 3;
pub const SPORTS: i64 = 4;
pub const MEDIA: i64 = 5;
pub const FLOOD: i64 = 10;

pub const SITE_TOML: &str = r#"
siteId = 1

[[channels]]
id = 1
channelName = "Home"
indexName = "home"

[[channels]]
id = 2
parentId = 1
channelName = "Corporate News Archive"
indexName = "news"
taxis = 1
addDate = "2023-04-05T10:30:00"
imageUrl = "@/upload/news.png"
content = "<p>Hello <b>world</b></p><script>track()</script>"
description = "Line one\nLine two"
additional = { Color = "red", Topics = "a, b,c", Banner = "/upload/banner.jpg", Launch = "2021-06-01", Retired = "gone" }

[[channels]]
id = 3
parentId = 2
channelName = "Local"
indexName = "local"
taxis = 1

[[channels]]
id = 4
parentId = 1
channelName = "Sports"
indexName = "sports"
taxis = 2
imageUrl = "/upload/intro.swf"

[[channels]]
id = 5
parentId = 1
channelName = "Media"
taxis = 3
imageUrl = "/upload/clip.mp4"

[[contents]]
id = 10
channelId = 3
title = "Flood warning issued"
imageUrl = "/upload/flood.jpg"
videoUrl = "/media/flood.mp4"
hits = 1234
isTop = true
addDate = "2024-03-07T14:05:09"
additional = { Editor = "Ann" }

[[contents]]
id = 11
channelId = 3
title = "Road closed"

[[styles]]
table = "channel"
attributeName = "Color"

[[styles]]
table = "channel"
attributeName = "Topics"
inputType = "checkbox"

[[styles]]
table = "channel"
attributeName = "Banner"
inputType = "image"

[[styles]]
table = "channel"
attributeName = "Launch"
inputType = "date"

[[styles]]
table = "channel"
attributeName = "Retired"
id = 0

[[styles]]
table = "content"
attributeName = "Editor"
"#;

pub fn site() -> InMemoryRepository {
    InMemoryRepository::from_toml_str(SITE_TOML).unwrap()
}

/// Render `markup` for display on a fresh page.
pub fn render(repository: &InMemoryRepository, markup: &str, scope: Scope) -> String {
    let engine = Engine::new(repository);
    let mut page = PageInfo::new(SITE_ID);
    let tag = parse_tag(markup).unwrap();
    engine.render_tag(&mut page, &tag, scope).unwrap()
}

/// Evaluate `markup` in entity mode on a fresh page.
pub fn resolve(repository: &InMemoryRepository, markup: &str, scope: Scope) -> TagValue {
    let engine = Engine::new(repository);
    let mut page = PageInfo::new(SITE_ID);
    let tag = parse_tag(markup).unwrap();
    engine.resolve_entity(&mut page, &tag, scope).unwrap()
}
