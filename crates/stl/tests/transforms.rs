//! Integration tests for the string transform pipeline

mod common;

use chrono::NaiveDate;
use common::{LOCAL, NEWS, render, site};
use pretty_assertions::assert_eq;
use stl::interpreter::{max_length_text, replace_text, slice, strip_tags};
use stl::{FieldValue, Scope, TextTransform, normalize_format_string};

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

// =============================================================================
// Step order
// =============================================================================

#[test]
fn test_replace_runs_before_truncate() {
    let transform = TextTransform::builder()
        .replace("A")
        .to("X")
        .word_num(3)
        .build();
    assert_eq!(transform.render(&text("AAAbbb")), "XXX...");
}

#[test]
fn test_truncate_runs_before_case_fold() {
    let transform = TextTransform::builder()
        .word_num(2)
        .ellipsis("~")
        .upper(true)
        .build();
    assert_eq!(transform.render(&text("abcd")), "AB~");
}

#[test]
fn test_clear_tags_runs_after_truncate_for_plain_text() {
    let transform = TextTransform::builder()
        .word_num(4)
        .clear_tags(true)
        .build();
    assert_eq!(transform.render(&text("<b>bold</b>")), "b...");
}

#[test]
fn test_rich_text_strips_before_truncate() {
    let transform = TextTransform::builder()
        .word_num(4)
        .clear_tags(true)
        .build();
    assert_eq!(
        transform.render(&FieldValue::RichText("<b>bold</b> text".to_string())),
        "bold..."
    );
}

#[test]
fn test_return_to_br_last() {
    let transform = TextTransform::builder()
        .return_to_br(true)
        .replace("one")
        .to("1")
        .build();
    assert_eq!(transform.render(&text("one\r\ntwo\nthree")), "1<br />two<br />three");
}

#[test]
fn test_markup_only_replaced() {
    let transform = TextTransform::builder()
        .word_num(1)
        .upper(true)
        .replace("a.png")
        .to("b.png")
        .build();
    assert_eq!(
        transform.render(&FieldValue::Markup(r#"<img src="a.png" />"#.to_string())),
        r#"<img src="b.png" />"#
    );
}

// =============================================================================
// Individual steps
// =============================================================================

#[test]
fn test_truncation_is_idempotent() {
    let once = max_length_text("Corporate News Archive", 5, "...");
    assert_eq!(once, "Corpo...");
    assert_eq!(max_length_text(&once, 5, "..."), once);
}

#[test]
fn test_regex_replace() {
    assert_eq!(replace_text("a1b22c333", "/[0-9]+/", "#"), "a#b#c#");
    assert_eq!(replace_text("2024-03-07", "/(\\d+)-(\\d+)-(\\d+)/", "$3.$2.$1"), "07.03.2024");
}

#[test]
fn test_invalid_regex_leaves_text() {
    assert_eq!(replace_text("a(b", "/(/", "x"), "a(b");
}

#[test]
fn test_plain_replace_of_slashes() {
    assert_eq!(replace_text("a/b", "/", "-"), "a-b");
}

#[test]
fn test_strip_tags_drops_scripts() {
    assert_eq!(
        strip_tags("<p>Hi</p><script>alert(1)</script><style>p{}</style>!"),
        "Hi!"
    );
}

#[test]
fn test_slice() {
    assert_eq!(slice("abcdef", 2, 3), "cde");
    assert_eq!(slice("abcdef", 4, 0), "ef");
    assert_eq!(slice("abc", 9, 2), "");
}

// =============================================================================
// Formats
// =============================================================================

#[test]
fn test_number_formats() {
    let render_number = |format: &str, n: i64| {
        TextTransform::builder()
            .format_string(normalize_format_string(format))
            .build()
            .render(&FieldValue::Number(n))
    };
    assert_eq!(render_number("D5", 42), "00042");
    assert_eq!(render_number("N0", 1234567), "1,234,567");
    assert_eq!(render_number("Hits: {0:N0}", 1234), "Hits: 1,234");
    assert_eq!(render_number("", 7), "7");
}

#[test]
fn test_date_formats() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(14, 5, 9)
        .unwrap();
    let render_date = |format: &str| {
        TextTransform::builder()
            .format_string(normalize_format_string(format))
            .build()
            .render(&FieldValue::Date(date))
    };
    assert_eq!(render_date("yyyy-MM-dd HH:mm:ss"), "2024-03-07 14:05:09");
    assert_eq!(render_date("Posted {0:M/d}"), "Posted 3/7");
    assert_eq!(render_date(""), "2024-03-07");
}

#[test]
fn test_oversized_precision_falls_back_to_plain() {
    let repo = site();
    let news = Scope::channel(NEWS);
    assert_eq!(
        render(&repo, r#"<stl:channel type="id" formatString="D70000" />"#, news),
        "2"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel type="id" formatString="F999999999999" />"#, news),
        "2"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel type="taxis" formatString="X70000" />"#, news),
        "1"
    );
    assert_eq!(
        render(&repo, r#"<stl:channel type="id" formatString="D99" />"#, news),
        format!("{}2", "0".repeat(98))
    );
}

#[test]
fn test_oversized_date_run_is_capped() {
    let markup = format!(
        r#"<stl:channel type="addDate" formatString="{}" />"#,
        "y".repeat(70_000)
    );
    assert_eq!(
        render(&site(), &markup, Scope::channel(NEWS)),
        format!("{}2023", "0".repeat(95))
    );
}

#[test]
fn test_boolean_text() {
    let transform = TextTransform::default();
    assert_eq!(transform.render(&FieldValue::Boolean(true)), "True");
    assert_eq!(transform.render(&FieldValue::Boolean(false)), "False");
}

// =============================================================================
// Through a tag
// =============================================================================

#[test]
fn test_pipeline_attributes_on_tag() {
    assert_eq!(
        render(
            &site(),
            r#"<stl:channel replace="/[aeiou]/" to="" isUpper="true" wordNum="6" ellipsis="!" />"#,
            Scope::channel(NEWS)
        ),
        "CRPRT !"
    );
}

#[test]
fn test_case_flags_by_presence() {
    assert_eq!(
        render(&site(), "<stl:channel isLower />", Scope::channel(LOCAL)),
        "local"
    );
    assert_eq!(
        render(&site(), r#"<stl:channel isUpper="false" />"#, Scope::channel(LOCAL)),
        "Local"
    );
}
