//! Integration tests for the stl:flash tag and its delegation

mod common;

use common::{FLOOD, LOCAL, MEDIA, SITE_ID, SPORTS, render, resolve, site};
use pretty_assertions::assert_eq;
use stl::{Engine, PageInfo, RenderConfig, Scope, TagValue, parse_tag};

// =============================================================================
// SWFObject embed
// =============================================================================

#[test]
fn test_swf_embed_with_default_params() {
    let repo = site();
    let engine = Engine::new(&repo);
    let mut page = PageInfo::new(SITE_ID);
    let tag = parse_tag("<stl:flash />").unwrap();
    let html = engine
        .render_tag(&mut page, &tag, Scope::channel(SPORTS))
        .unwrap();
    assert_eq!(
        html,
        r#"<div id="flashcontent_1"></div>
<script type="text/javascript">
    // <![CDATA[
    var so_1 = new SWFObject("/upload/intro.swf", "flash_1", "100%", "180", "7", "");
    so_1.addParam("quality", "high");
    so_1.addParam("wmode", "transparent");
    so_1.write("flashcontent_1");
    // ]]>
</script>"#
    );
    let codes: Vec<(&str, &str)> = page.body_codes().collect();
    assert_eq!(codes.len(), 1);
    assert_eq!(codes[0].0, "swfobject");
    assert!(codes[0].1.contains("/sitefiles/assets/swfobject.js"));
}

#[test]
fn test_second_embed_gets_new_id_and_shares_script() {
    let repo = site();
    let engine = Engine::new(&repo);
    let mut page = PageInfo::new(SITE_ID);
    let tag = parse_tag("<stl:flash />").unwrap();
    engine
        .render_tag(&mut page, &tag, Scope::channel(SPORTS))
        .unwrap();
    let second = engine
        .render_tag(&mut page, &tag, Scope::channel(SPORTS))
        .unwrap();
    assert!(second.contains(r#"<div id="flashcontent_2"></div>"#));
    assert!(second.contains("var so_2 = new SWFObject"));
    assert_eq!(page.body_codes().count(), 1);
}

#[test]
fn test_extra_attributes_become_params() {
    let html = render(
        &site(),
        r#"<stl:flash src="/a/movie.swf" wmode="opaque" menu="false" width="300" height="200" />"#,
        Scope::channel(LOCAL),
    );
    assert!(html.contains(r#"new SWFObject("/a/movie.swf", "flash_1", "300", "200", "7", "")"#));
    let params: Vec<&str> = html.lines().filter(|l| l.contains("addParam")).collect();
    assert_eq!(
        params,
        vec![
            r#"    so_1.addParam("wmode", "opaque");"#,
            r#"    so_1.addParam("menu", "false");"#,
            r#"    so_1.addParam("quality", "high");"#,
        ]
    );
}

#[test]
fn test_param_values_are_escaped() {
    let html = render(
        &site(),
        r#"<stl:flash src="/a.swf" flashvars='a="1"' />"#,
        Scope::channel(LOCAL),
    );
    assert!(html.contains(r#"so_1.addParam("flashvars", "a=\"1\"");"#));
}

#[test]
fn test_site_relative_urls_use_site_url() {
    let repo = site();
    let engine = Engine::builder()
        .repository(&repo)
        .config(RenderConfig::builder().site_url("https://example.com/").build())
        .build();
    let mut page = PageInfo::new(SITE_ID);
    let tag = parse_tag(r#"<stl:flash src="@/movies/a.swf" />"#).unwrap();
    let html = engine
        .render_tag(&mut page, &tag, Scope::channel(LOCAL))
        .unwrap();
    assert!(html.contains(r#"new SWFObject("https://example.com/movies/a.swf""#));
    let (_, loader) = page.body_codes().next().unwrap();
    assert_eq!(
        loader,
        r#"<script type="text/javascript" src="https://example.com/sitefiles/assets/swfobject.js"></script>"#
    );
}

#[test]
fn test_alt_src_when_field_empty() {
    let html = render(
        &site(),
        r#"<stl:flash altSrc="/fallback.swf" />"#,
        Scope::channel(LOCAL),
    );
    assert!(html.contains(r#"new SWFObject("/fallback.swf""#));
}

#[test]
fn test_no_url_renders_empty() {
    assert_eq!(render(&site(), "<stl:flash />", Scope::channel(LOCAL)), "");
}

// =============================================================================
// Delegation
// =============================================================================

#[test]
fn test_image_url_delegates_to_image() {
    assert_eq!(
        render(
            &site(),
            r#"<stl:flash src="/upload/photo.jpg" class="hero" />"#,
            Scope::channel(LOCAL)
        ),
        r#"<img src="/upload/photo.jpg" class="hero" />"#
    );
}

#[test]
fn test_video_url_delegates_to_player() {
    assert_eq!(
        render(&site(), "<stl:flash />", Scope::channel(MEDIA)),
        r#"<video src="/upload/clip.mp4" width="450" height="350" controls autoplay></video>"#
    );
}

#[test]
fn test_content_scope_reads_content_field() {
    assert_eq!(
        render(&site(), "<stl:flash />", Scope::content(LOCAL, FLOOD)),
        r#"<img src="/upload/flood.jpg" />"#
    );
}

#[test]
fn test_explicit_addressing_ignores_content() {
    assert_eq!(
        render(
            &site(),
            r#"<stl:flash upLevel="1" />"#,
            Scope::content(LOCAL, FLOOD)
        ),
        r#"<img src="/upload/news.png" />"#
    );
}

// =============================================================================
// Entity mode
// =============================================================================

#[test]
fn test_entity_mode_returns_url() {
    assert_eq!(
        resolve(&site(), "<stl:flash />", Scope::channel(SPORTS)),
        TagValue::Text("/upload/intro.swf".to_string())
    );
}
