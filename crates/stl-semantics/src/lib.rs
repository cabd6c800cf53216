//! Shared STL symbol tables used by both the rendering engine and the CLI.
//!
//! This crate centralizes field name resolution, field kinds and media
//! classification so the evaluators, the lint pass and the `stl` binary agree
//! on what every symbolic `type` value means.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Text appended by truncation when no `ellipsis` attribute is given.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Date pattern used when a date field has no `formatString`.
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";

/// Separator used to join multi-value user fields.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Prefix of every STL element name.
pub const TAG_PREFIX: &str = "stl:";

/// How a field's raw text is treated by the transform pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Plain text, every pipeline step applies.
    Text,
    /// Editor HTML; tag stripping runs before replace and truncation.
    RichText,
    /// Integer value, may carry a numeric format.
    Number,
    /// `True`/`False` rendering of a flag.
    Boolean,
    /// Date value formatted with a date pattern.
    DateTime,
    /// Generated markup (`<img>`, embeds); only `replace` applies.
    Markup,
}

/// Built-in channel fields addressable through the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelField {
    Id,
    SiteId,
    ContentModelPluginId,
    ContentRelatedPluginIds,
    ParentId,
    ParentsPath,
    ParentsCount,
    ChildrenCount,
    IsLastNode,
    IndexName,
    GroupNameCollection,
    Taxis,
    AddDate,
    ImageUrl,
    Content,
    ContentNum,
    FilePath,
    ChannelFilePathRule,
    ContentFilePathRule,
    LinkUrl,
    LinkType,
    ChannelTemplateId,
    ContentTemplateId,
    Keywords,
    Description,
    ExtendValues,
    Title,
    PageContent,
    ItemIndex,
    CountOfChannels,
    CountOfContents,
    CountOfImageContents,
}

impl ChannelField {
    /// The pipeline treatment of this field's text.
    pub fn kind(self) -> FieldKind {
        match self {
            ChannelField::Id
            | ChannelField::SiteId
            | ChannelField::ParentId
            | ChannelField::ParentsCount
            | ChannelField::ChildrenCount
            | ChannelField::Taxis
            | ChannelField::ContentNum
            | ChannelField::ChannelTemplateId
            | ChannelField::ContentTemplateId
            | ChannelField::ItemIndex
            | ChannelField::CountOfChannels
            | ChannelField::CountOfContents
            | ChannelField::CountOfImageContents => FieldKind::Number,
            ChannelField::IsLastNode => FieldKind::Boolean,
            ChannelField::AddDate => FieldKind::DateTime,
            ChannelField::ImageUrl => FieldKind::Markup,
            ChannelField::Content | ChannelField::PageContent => FieldKind::RichText,
            ChannelField::ContentModelPluginId
            | ChannelField::ContentRelatedPluginIds
            | ChannelField::ParentsPath
            | ChannelField::IndexName
            | ChannelField::GroupNameCollection
            | ChannelField::FilePath
            | ChannelField::ChannelFilePathRule
            | ChannelField::ContentFilePathRule
            | ChannelField::LinkUrl
            | ChannelField::LinkType
            | ChannelField::Keywords
            | ChannelField::Description
            | ChannelField::ExtendValues
            | ChannelField::Title => FieldKind::Text,
        }
    }
}

/// Resolve a channel `type` value to a built-in field.
///
/// Matching is case-insensitive. `channelIndex` is an alias of `indexName`,
/// `channelName` of `title`, and any name starting with `itemIndex` (such as
/// `itemIndex+1`) resolves to [`ChannelField::ItemIndex`].
pub fn resolve_channel_field(name: &str) -> Option<ChannelField> {
    let lower = name.trim().to_ascii_lowercase();
    let field = match lower.as_str() {
        "id" => ChannelField::Id,
        "siteid" => ChannelField::SiteId,
        "contentmodelpluginid" => ChannelField::ContentModelPluginId,
        "contentrelatedpluginids" => ChannelField::ContentRelatedPluginIds,
        "parentid" => ChannelField::ParentId,
        "parentspath" => ChannelField::ParentsPath,
        "parentscount" => ChannelField::ParentsCount,
        "childrencount" => ChannelField::ChildrenCount,
        "islastnode" => ChannelField::IsLastNode,
        "channelindex" | "indexname" => ChannelField::IndexName,
        "groupnamecollection" => ChannelField::GroupNameCollection,
        "taxis" => ChannelField::Taxis,
        "adddate" => ChannelField::AddDate,
        "imageurl" => ChannelField::ImageUrl,
        "content" => ChannelField::Content,
        "contentnum" => ChannelField::ContentNum,
        "filepath" => ChannelField::FilePath,
        "channelfilepathrule" => ChannelField::ChannelFilePathRule,
        "contentfilepathrule" => ChannelField::ContentFilePathRule,
        "linkurl" => ChannelField::LinkUrl,
        "linktype" => ChannelField::LinkType,
        "channeltemplateid" => ChannelField::ChannelTemplateId,
        "contenttemplateid" => ChannelField::ContentTemplateId,
        "keywords" => ChannelField::Keywords,
        "description" => ChannelField::Description,
        "extendvalues" => ChannelField::ExtendValues,
        "title" | "channelname" => ChannelField::Title,
        "pagecontent" => ChannelField::PageContent,
        "countofchannels" => ChannelField::CountOfChannels,
        "countofcontents" => ChannelField::CountOfContents,
        "countofimagecontents" => ChannelField::CountOfImageContents,
        other if other.starts_with("itemindex") => ChannelField::ItemIndex,
        _ => return None,
    };
    Some(field)
}

/// Built-in content fields addressable through the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentField {
    Id,
    ChannelId,
    SiteId,
    Title,
    SubTitle,
    ImageUrl,
    VideoUrl,
    FileUrl,
    LinkUrl,
    Summary,
    Author,
    Source,
    Content,
    AddDate,
    LastEditDate,
    Hits,
    Tags,
    IsTop,
    IsRecommend,
    IsHot,
    IsColor,
    ItemIndex,
}

impl ContentField {
    /// The pipeline treatment of this field's text.
    pub fn kind(self) -> FieldKind {
        match self {
            ContentField::Id
            | ContentField::ChannelId
            | ContentField::SiteId
            | ContentField::Hits
            | ContentField::ItemIndex => FieldKind::Number,
            ContentField::IsTop
            | ContentField::IsRecommend
            | ContentField::IsHot
            | ContentField::IsColor => FieldKind::Boolean,
            ContentField::AddDate | ContentField::LastEditDate => FieldKind::DateTime,
            ContentField::ImageUrl => FieldKind::Markup,
            ContentField::Content => FieldKind::RichText,
            ContentField::Title
            | ContentField::SubTitle
            | ContentField::VideoUrl
            | ContentField::FileUrl
            | ContentField::LinkUrl
            | ContentField::Summary
            | ContentField::Author
            | ContentField::Source
            | ContentField::Tags => FieldKind::Text,
        }
    }
}

/// Resolve a content `type` value to a built-in field (case-insensitive).
pub fn resolve_content_field(name: &str) -> Option<ContentField> {
    let lower = name.trim().to_ascii_lowercase();
    let field = match lower.as_str() {
        "id" => ContentField::Id,
        "channelid" => ContentField::ChannelId,
        "siteid" => ContentField::SiteId,
        "title" => ContentField::Title,
        "subtitle" => ContentField::SubTitle,
        "imageurl" => ContentField::ImageUrl,
        "videourl" => ContentField::VideoUrl,
        "fileurl" => ContentField::FileUrl,
        "linkurl" => ContentField::LinkUrl,
        "summary" => ContentField::Summary,
        "author" => ContentField::Author,
        "source" => ContentField::Source,
        "content" => ContentField::Content,
        "adddate" => ContentField::AddDate,
        "lasteditdate" => ContentField::LastEditDate,
        "hits" => ContentField::Hits,
        "tags" => ContentField::Tags,
        "istop" => ContentField::IsTop,
        "isrecommend" => ContentField::IsRecommend,
        "ishot" => ContentField::IsHot,
        "iscolor" => ContentField::IsColor,
        other if other.starts_with("itemindex") => ContentField::ItemIndex,
        _ => return None,
    };
    Some(field)
}

/// Accepted channel `type` names, used for diagnostics and typo suggestions.
pub const CHANNEL_FIELD_NAMES: &[&str] = &[
    "id",
    "siteId",
    "contentModelPluginId",
    "contentRelatedPluginIds",
    "parentId",
    "parentsPath",
    "parentsCount",
    "childrenCount",
    "isLastNode",
    "channelIndex",
    "indexName",
    "groupNameCollection",
    "taxis",
    "addDate",
    "imageUrl",
    "content",
    "contentNum",
    "filePath",
    "channelFilePathRule",
    "contentFilePathRule",
    "linkUrl",
    "linkType",
    "channelTemplateId",
    "contentTemplateId",
    "keywords",
    "description",
    "extendValues",
    "title",
    "channelName",
    "pageContent",
    "itemIndex",
    "countOfChannels",
    "countOfContents",
    "countOfImageContents",
];

/// Accepted content `type` names, used for diagnostics and typo suggestions.
pub const CONTENT_FIELD_NAMES: &[&str] = &[
    "id",
    "channelId",
    "siteId",
    "title",
    "subTitle",
    "imageUrl",
    "videoUrl",
    "fileUrl",
    "linkUrl",
    "summary",
    "author",
    "source",
    "content",
    "addDate",
    "lastEditDate",
    "hits",
    "tags",
    "isTop",
    "isRecommend",
    "isHot",
    "isColor",
    "itemIndex",
];

/// Input control of a user-defined (table style) field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputType {
    #[default]
    Text,
    TextArea,
    TextEditor,
    CheckBox,
    Radio,
    SelectOne,
    SelectMultiple,
    Date,
    DateTime,
    Image,
    Video,
    File,
    Number,
}

impl InputType {
    /// The pipeline treatment of a user field with this input type.
    pub fn kind(self) -> FieldKind {
        match self {
            InputType::TextEditor => FieldKind::RichText,
            InputType::Date | InputType::DateTime => FieldKind::DateTime,
            InputType::Image | InputType::Video | InputType::File => FieldKind::Markup,
            InputType::Number => FieldKind::Number,
            InputType::Text
            | InputType::TextArea
            | InputType::CheckBox
            | InputType::Radio
            | InputType::SelectOne
            | InputType::SelectMultiple => FieldKind::Text,
        }
    }

    /// Whether stored values hold several comma-separated items.
    pub fn is_multi_value(self) -> bool {
        matches!(self, InputType::CheckBox | InputType::SelectMultiple)
    }
}

/// Error returned when an input type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInputType(pub String);

impl Display for UnknownInputType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "unknown input type '{}'", self.0)
    }
}

impl FromStr for InputType {
    type Err = UnknownInputType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input_type = match s.to_ascii_lowercase().as_str() {
            "text" => InputType::Text,
            "textarea" => InputType::TextArea,
            "texteditor" => InputType::TextEditor,
            "checkbox" => InputType::CheckBox,
            "radio" => InputType::Radio,
            "selectone" => InputType::SelectOne,
            "selectmultiple" => InputType::SelectMultiple,
            "date" => InputType::Date,
            "datetime" => InputType::DateTime,
            "image" => InputType::Image,
            "video" => InputType::Video,
            "file" => InputType::File,
            "number" => InputType::Number,
            _ => return Err(UnknownInputType(s.to_string())),
        };
        Ok(input_type)
    }
}

/// Media family of a URL, decided by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Flash,
    Other,
}

impl MediaKind {
    /// Whether `stl:player` should render this media.
    pub fn is_player(self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Audio)
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "gif", "png", "bmp", "webp", "svg", "ico"];
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "webm", "ogv", "flv", "avi", "wmv", "mov", "m4v", "mpg", "mpeg", "rm", "rmvb",
];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "aac", "wma", "flac"];

/// Extension of a URL or path without the dot, lower-cased.
///
/// Query strings and fragments are ignored. Returns an empty string when the
/// last path segment has no extension.
pub fn url_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    match file.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Classify a URL by its extension.
pub fn classify_url(url: &str) -> MediaKind {
    let ext = url_extension(url);
    let ext = ext.as_str();
    if IMAGE_EXTENSIONS.contains(&ext) {
        MediaKind::Image
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        MediaKind::Video
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        MediaKind::Audio
    } else if ext == "swf" {
        MediaKind::Flash
    } else {
        MediaKind::Other
    }
}

/// Normalize an element name to its registry key: lower-cased, `stl:` prefixed.
pub fn canonical_tag_name(name: &str) -> String {
    let lower = name.trim().to_ascii_lowercase();
    if lower.starts_with(TAG_PREFIX) {
        lower
    } else {
        format!("{TAG_PREFIX}{lower}")
    }
}
