//! Integration tests for channel addressing

mod common;

use common::{FLOOD, HOME, LOCAL, NEWS, SITE_ID, SPORTS, site};
use pretty_assertions::assert_eq;
use stl::EntityRef;
use stl::interpreter::{ChannelAddress, resolve_channel, resolve_target, walk_levels};

fn walk(current: i64, address: &ChannelAddress) -> i64 {
    walk_levels(&site(), SITE_ID, current, address).unwrap()
}

// =============================================================================
// Ancestor walk
// =============================================================================

#[test]
fn test_no_addressing_stays_put() {
    assert_eq!(walk(LOCAL, &ChannelAddress::default()), LOCAL);
}

#[test]
fn test_up_level() {
    let up_one = ChannelAddress::builder().up_level(1).build();
    assert_eq!(walk(LOCAL, &up_one), NEWS);
    let up_two = ChannelAddress::builder().up_level(2).build();
    assert_eq!(walk(LOCAL, &up_two), HOME);
}

#[test]
fn test_up_level_clamps_at_root() {
    let address = ChannelAddress::builder().up_level(9).build();
    assert_eq!(walk(LOCAL, &address), HOME);
    assert_eq!(walk(HOME, &address), HOME);
}

#[test]
fn test_top_level_counts_from_root() {
    let root = ChannelAddress::builder().top_level(0).build();
    assert_eq!(walk(LOCAL, &root), HOME);
    let first = ChannelAddress::builder().top_level(1).build();
    assert_eq!(walk(LOCAL, &first), NEWS);
}

#[test]
fn test_top_level_at_or_below_current_depth_stays_put() {
    let same = ChannelAddress::builder().top_level(2).build();
    assert_eq!(walk(LOCAL, &same), LOCAL);
    let deeper = ChannelAddress::builder().top_level(7).build();
    assert_eq!(walk(NEWS, &deeper), NEWS);
}

#[test]
fn test_top_level_takes_precedence_over_up_level() {
    let address = ChannelAddress::builder().top_level(1).up_level(2).build();
    assert_eq!(walk(LOCAL, &address), NEWS);
}

// =============================================================================
// Symbolic lookup
// =============================================================================

#[test]
fn test_index_lookup_searches_below_walk_result() {
    let repo = site();
    let address = ChannelAddress::builder().channel_index("sports").build();
    assert_eq!(
        resolve_channel(&repo, SITE_ID, HOME, &address).unwrap(),
        Some(SPORTS)
    );
    assert_eq!(resolve_channel(&repo, SITE_ID, NEWS, &address).unwrap(), None);
}

#[test]
fn test_lookup_is_relative_to_walked_root() {
    let repo = site();
    let address = ChannelAddress::builder()
        .up_level(2)
        .channel_index("sports")
        .build();
    assert_eq!(
        resolve_channel(&repo, SITE_ID, LOCAL, &address).unwrap(),
        Some(SPORTS)
    );
}

#[test]
fn test_name_lookup_after_index_miss() {
    let repo = site();
    let address = ChannelAddress::builder()
        .channel_index("missing")
        .channel_name("Local")
        .build();
    assert_eq!(
        resolve_channel(&repo, SITE_ID, HOME, &address).unwrap(),
        Some(LOCAL)
    );
}

#[test]
fn test_search_root_itself_can_match() {
    let repo = site();
    let address = ChannelAddress::builder().channel_index("news").build();
    assert_eq!(
        resolve_channel(&repo, SITE_ID, NEWS, &address).unwrap(),
        Some(NEWS)
    );
}

// =============================================================================
// Target resolution
// =============================================================================

#[test]
fn test_content_page_targets_content() {
    let target = resolve_target(&site(), SITE_ID, LOCAL, FLOOD, &ChannelAddress::default());
    assert_eq!(
        target.unwrap(),
        Some(EntityRef::Content {
            channel_id: LOCAL,
            id: FLOOD
        })
    );
}

#[test]
fn test_explicit_addressing_targets_channel() {
    let address = ChannelAddress::builder().up_level(1).build();
    let target = resolve_target(&site(), SITE_ID, LOCAL, FLOOD, &address).unwrap();
    assert_eq!(target, Some(EntityRef::Channel { id: NEWS }));
    assert_eq!(target.map(|t| t.channel_id()), Some(NEWS));
}

#[test]
fn test_channel_page_targets_current_channel() {
    let target = resolve_target(&site(), SITE_ID, NEWS, 0, &ChannelAddress::default());
    assert_eq!(target.unwrap(), Some(EntityRef::Channel { id: NEWS }));
}

#[test]
fn test_unmatched_lookup_is_absent() {
    let address = ChannelAddress::builder().channel_name("Nowhere").build();
    let target = resolve_target(&site(), SITE_ID, HOME, 0, &address);
    assert_eq!(target.unwrap(), None);
}
