//! Integration tests for the stl:channel tag

mod common;

use common::{HOME, LOCAL, MEDIA, NEWS, SITE_ID, SPORTS, render, resolve, site};
use pretty_assertions::assert_eq;
use stl::interpreter::RepositoryError;
use stl::{
    ChannelProjection, ContentProjection, Engine, FieldDescriptor, InMemoryRepository, ListItem,
    PageInfo, RenderError, Scope, SiteRepository, StyleTable, TagValue, TemplateType, parse_tag,
};

// =============================================================================
// Field selection
// =============================================================================

#[test]
fn test_title_truncated_with_ellipsis() {
    let html = render(
        &site(),
        r#"<stl:channel type="title" wordNum="5" ellipsis="..." />"#,
        Scope::channel(NEWS),
    );
    assert_eq!(html, "Corpo...");
}

#[test]
fn test_missing_type_means_title() {
    assert_eq!(
        render(&site(), "<stl:channel />", Scope::channel(NEWS)),
        "Corporate News Archive"
    );
}

#[test]
fn test_type_and_alias_are_case_insensitive() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel TYPE="ChannelName" />"#, Scope::channel(NEWS)),
        "Corporate News Archive"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel type="channelIndex" />"#, Scope::channel(NEWS)),
        "news"
    );
}

#[test]
fn test_numeric_and_tree_fields() {
    let repo = site();
    assert_eq!(render(&repo, r#"<stl:channel type="id" />"#, Scope::channel(NEWS)), "2");
    assert_eq!(
        render(&repo, r#"<stl:channel type="parentsPath" />"#, Scope::channel(LOCAL)),
        "1,2"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel type="parentsCount" />"#, Scope::channel(LOCAL)),
        "2"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel type="countOfChannels" />"#, Scope::channel(HOME)),
        "3"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel type="isLastNode" />"#, Scope::channel(MEDIA)),
        "True"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel type="isLastNode" />"#, Scope::channel(SPORTS)),
        "False"
    );
}

#[test]
fn test_content_counts() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel type="countOfContents" />"#, Scope::channel(LOCAL)),
        "2"
    );
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel type="countOfImageContents" />"#,
            Scope::channel(LOCAL)
        ),
        "1"
    );
}

#[test]
fn test_unknown_type_renders_empty() {
    assert_eq!(
        render(
            &site(),
            r#"<stl:channel type="noSuchField" leftText="[" rightText="]" />"#,
            Scope::channel(NEWS)
        ),
        ""
    );
}

#[test]
fn test_add_date_formats() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel type="addDate" />"#, Scope::channel(NEWS)),
        "2023-04-05"
    );
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel type="addDate" formatString="yyyy年MM月dd日 HH:mm" />"#,
            Scope::channel(NEWS)
        ),
        "2023年04月05日 10:30"
    );
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel type="addDate" formatString="Since {0:yyyy}" />"#,
            Scope::channel(NEWS)
        ),
        "Since 2023"
    );
}

#[test]
fn test_missing_add_date_is_empty() {
    assert_eq!(
        render(&site(), r#"<stl:channel type="addDate" />"#, Scope::channel(LOCAL)),
        ""
    );
}

#[test]
fn test_image_url_renders_img_with_extra_attributes() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel type="imageUrl" />"#, Scope::channel(NEWS)),
        r#"<img src="/upload/news.png" />"#
    );
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel type="imageUrl" class="logo" />"#,
            Scope::channel(NEWS)
        ),
        r#"<img src="/upload/news.png" class="logo" />"#
    );
}

#[test]
fn test_content_clear_tags_runs_before_truncation() {
    let repo = site();
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel type="content" isClearTags="true" />"#,
            Scope::channel(NEWS)
        ),
        "Hello world"
    );
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel type="content" isClearTags="true" wordNum="5" />"#,
            Scope::channel(NEWS)
        ),
        "Hello..."
    );
}

#[test]
fn test_page_content_on_channel_template_is_deferred() {
    let repo = site();
    let engine = Engine::new(&repo);
    let mut page = PageInfo::builder()
        .site_id(SITE_ID)
        .template_type(TemplateType::Channel)
        .build();
    let tag = parse_tag(r#"<stl:channel type="pageContent" />"#).unwrap();
    let html = engine
        .render_tag(&mut page, &tag, Scope::channel(NEWS))
        .unwrap();
    assert_eq!(html, tag.to_string());

    let inner = Scope::builder().channel_id(NEWS).inner(true).build();
    let html = engine.render_tag(&mut page, &tag, inner).unwrap();
    assert_eq!(html, "<p>Hello <b>world</b></p><script>track()</script>");
}

#[test]
fn test_return_to_br() {
    assert_eq!(
        render(
            &site(),
            r#"<stl:channel type="description" isReturnToBr="true" />"#,
            Scope::channel(NEWS)
        ),
        "Line one<br />Line two"
    );
}

#[test]
fn test_extend_values_is_json() {
    let html = render(
        &site(),
        r#"<stl:channel type="extendValues" />"#,
        Scope::channel(NEWS),
    );
    assert!(html.starts_with('{'));
    assert!(html.contains(r#""Color":"red""#));
}

// =============================================================================
// Transform pipeline through the tag
// =============================================================================

#[test]
fn test_replace_runs_before_truncation() {
    let repo = InMemoryRepository::new(SITE_ID)
        .with_channel(ChannelProjection::builder().id(1).channel_name("AAAbbb").build());
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel replace="A" to="X" wordNum="3" />"#,
            Scope::channel(1)
        ),
        "XXX..."
    );
}

#[test]
fn test_regex_replace() {
    let repo = site();
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel replace="/\s+/" to="-" />"#,
            Scope::channel(NEWS)
        ),
        "Corporate-News-Archive"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel replace="/(/" to="-" />"#, Scope::channel(NEWS)),
        "Corporate News Archive"
    );
}

#[test]
fn test_case_folding() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel isUpper="true" />"#, Scope::channel(NEWS)),
        "CORPORATE NEWS ARCHIVE"
    );
    assert_eq!(
        render(&repo, "<stl:channel isLower />", Scope::channel(NEWS)),
        "corporate news archive"
    );
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel isLower="true" isUpper="true" />"#,
            Scope::channel(NEWS)
        ),
        "CORPORATE NEWS ARCHIVE"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel isUpper="false" />"#, Scope::channel(NEWS)),
        "Corporate News Archive"
    );
}

#[test]
fn test_slice() {
    assert_eq!(
        render(
            &site(),
            r#"<stl:channel startIndex="10" length="4" />"#,
            Scope::channel(NEWS)
        ),
        "News"
    );
}

#[test]
fn test_left_and_right_text_wrap_value() {
    assert_eq!(
        render(
            &site(),
            r#"<stl:channel leftText="&laquo;" rightText="!" />"#,
            Scope::channel(HOME)
        ),
        "&laquo;Home!"
    );
}

#[test]
fn test_malformed_integer_uses_default() {
    assert_eq!(
        render(
            &site(),
            r#"<stl:channel wordNum="five" upLevel="x" />"#,
            Scope::channel(NEWS)
        ),
        "Corporate News Archive"
    );
}

// =============================================================================
// Addressing
// =============================================================================

#[test]
fn test_up_level() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel upLevel="1" />"#, Scope::channel(LOCAL)),
        "Corporate News Archive"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel upLevel="1" />"#, Scope::channel(HOME)),
        "Home"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel upLevel="9" />"#, Scope::channel(LOCAL)),
        "Home"
    );
}

#[test]
fn test_parent_and_explicit_up_level() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel parent="true" />"#, Scope::channel(LOCAL)),
        "Corporate News Archive"
    );
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel parent="true" upLevel="2" />"#,
            Scope::channel(LOCAL)
        ),
        "Home"
    );
}

#[test]
fn test_top_level() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel topLevel="0" />"#, Scope::channel(LOCAL)),
        "Home"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel topLevel="1" />"#, Scope::channel(LOCAL)),
        "Corporate News Archive"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel topLevel="5" />"#, Scope::channel(LOCAL)),
        "Local"
    );
}

#[test]
fn test_symbolic_lookup_is_relative_to_walk() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel channelIndex="local" />"#, Scope::channel(HOME)),
        "Local"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel channelIndex="local" />"#, Scope::channel(SPORTS)),
        ""
    );
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel topLevel="0" channelIndex="local" />"#,
            Scope::channel(SPORTS)
        ),
        "Local"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel channelName="Sports" />"#, Scope::channel(HOME)),
        "Sports"
    );
}

#[test]
fn test_unresolvable_index_suppresses_decorations() {
    assert_eq!(
        render(
            &site(),
            r#"<stl:channel channelIndex="nonexistent" leftText="[" rightText="]" />"#,
            Scope::channel(NEWS)
        ),
        ""
    );
}

// =============================================================================
// List items
// =============================================================================

#[test]
fn test_item_index() {
    let repo = site();
    let scope = Scope::builder()
        .channel_id(NEWS)
        .item(ListItem::Channel { index: 2 })
        .build();
    assert_eq!(render(&repo, r#"<stl:channel type="itemIndex" />"#, scope), "3");
    assert_eq!(render(&repo, r#"<stl:channel type="itemIndex+10" />"#, scope), "13");
    assert_eq!(
        render(&repo, r#"<stl:channel type="itemIndex" formatString="D3" />"#, scope),
        "003"
    );
}

#[test]
fn test_item_index_outside_channel_list_is_empty() {
    assert_eq!(
        render(&site(), r#"<stl:channel type="itemIndex" />"#, Scope::channel(NEWS)),
        ""
    );
}

// =============================================================================
// User-defined fields
// =============================================================================

#[test]
fn test_user_text_field() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel type="Color" />"#, Scope::channel(NEWS)),
        "red"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel type="color" isUpper="true" />"#, Scope::channel(NEWS)),
        "RED"
    );
}

#[test]
fn test_user_multi_value_field_uses_separator() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel type="Topics" />"#, Scope::channel(NEWS)),
        "a,b,c"
    );
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel type="Topics" separator=" | " />"#,
            Scope::channel(NEWS)
        ),
        "a | b | c"
    );
}

#[test]
fn test_user_image_and_date_fields() {
    let repo = site();
    assert_eq!(
        render(&repo, r#"<stl:channel type="Banner" />"#, Scope::channel(NEWS)),
        r#"<img src="/upload/banner.jpg" />"#
    );
    assert_eq!(
        render(
            &repo,
            r#"<stl:channel type="Launch" formatString="yyyy/MM/dd" />"#,
            Scope::channel(NEWS)
        ),
        "2021/06/01"
    );
}

#[test]
fn test_deleted_user_field_is_empty() {
    assert_eq!(
        render(&site(), r#"<stl:channel type="Retired" />"#, Scope::channel(NEWS)),
        ""
    );
}

#[test]
fn test_user_field_without_style_is_empty() {
    let repo = InMemoryRepository::new(SITE_ID).with_channel(
        ChannelProjection::builder()
            .id(1)
            .additional([("Mood".to_string(), "calm".to_string())].into())
            .build(),
    );
    assert_eq!(render(&repo, r#"<stl:channel type="Mood" />"#, Scope::channel(1)), "");

    let repo = repo.with_style(
        StyleTable::Channel,
        FieldDescriptor {
            id: 3,
            attribute_name: "Mood".to_string(),
            display_name: "Mood".to_string(),
            input_type: Default::default(),
            default_value: String::new(),
        },
    );
    assert_eq!(render(&repo, r#"<stl:channel type="Mood" />"#, Scope::channel(1)), "calm");
}

// =============================================================================
// Entity mode and failures
// =============================================================================

#[test]
fn test_entity_mode_returns_projection() {
    let value = resolve(&site(), "<stl:channel upLevel=\"1\" />", Scope::channel(LOCAL));
    let channel = value.as_channel().unwrap();
    assert_eq!(channel.id, NEWS);
    assert_eq!(channel.channel_name, "Corporate News Archive");
}

#[test]
fn test_entity_mode_with_type_returns_text() {
    let value = resolve(&site(), r#"<stl:channel type="indexName" />"#, Scope::channel(NEWS));
    assert_eq!(value, TagValue::Text("news".to_string()));
}

#[test]
fn test_entity_mode_image_url_is_bare_url() {
    let value = resolve(&site(), r#"<stl:channel type="imageUrl" />"#, Scope::channel(NEWS));
    assert_eq!(value.as_text(), Some("/upload/news.png"));
}

struct OfflineRepository;

impl SiteRepository for OfflineRepository {
    fn get_channel(
        &self,
        _site_id: i64,
        _channel_id: i64,
    ) -> Result<Option<ChannelProjection>, RepositoryError> {
        Err(RepositoryError::Unavailable {
            message: "connection refused".to_string(),
        })
    }

    fn get_content(
        &self,
        _site_id: i64,
        _channel_id: i64,
        _content_id: i64,
    ) -> Result<Option<ContentProjection>, RepositoryError> {
        Ok(None)
    }

    fn find_channel_by_index_or_name(
        &self,
        _site_id: i64,
        _root_channel_id: i64,
        _index: Option<&str>,
        _name: Option<&str>,
    ) -> Result<Option<i64>, RepositoryError> {
        Ok(None)
    }

    fn get_ancestor_channel(
        &self,
        _site_id: i64,
        channel_id: i64,
        _steps: usize,
    ) -> Result<i64, RepositoryError> {
        Ok(channel_id)
    }

    fn get_table_style_field(
        &self,
        _table: StyleTable,
        _field_name: &str,
        _scope_ids: &[i64],
    ) -> Result<Option<FieldDescriptor>, RepositoryError> {
        Ok(None)
    }

    fn count_image_contents(&self, _site_id: i64, _channel_id: i64) -> Result<i64, RepositoryError> {
        Ok(0)
    }
}

#[test]
fn test_repository_failure_is_surfaced() {
    let repo = OfflineRepository;
    let engine = Engine::new(&repo);
    let mut page = PageInfo::new(SITE_ID);
    let tag = parse_tag("<stl:channel />").unwrap();
    let err = engine
        .render_tag(&mut page, &tag, Scope::channel(1))
        .unwrap_err();
    assert!(matches!(err, RenderError::Repository(_)));
    assert!(err.to_string().contains("connection refused"));
}
