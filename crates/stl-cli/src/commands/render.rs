//! Implementation of the `stl render` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use stl::{
    parse_tag, Engine, InMemoryRepository, ListItem, PageInfo, RenderConfig, Scope, TagValue,
};
use tracing::debug;

use crate::output::StlDiagnostic;

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Site fixture (.toml) with channels, contents and styles
    #[arg(long)]
    pub site: PathBuf,

    /// Tag markup to render, e.g. '<stl:channel type="title" />'
    #[arg(long)]
    pub tag: String,

    /// Channel the page belongs to
    #[arg(long)]
    pub channel: i64,

    /// Content item the page is about
    #[arg(long, default_value_t = 0)]
    pub content: i64,

    /// Evaluate as an entity reference instead of for display
    #[arg(long)]
    pub entity: bool,

    /// Zero-based position inside an enclosing list
    #[arg(long)]
    pub item_index: Option<usize>,

    /// Engine configuration (.toml)
    #[arg(long, env = "STL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for a display render.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderJson<'a> {
    output: &'a str,
    body_codes: BTreeMap<&'a str, &'a str>,
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> Result<i32> {
    let config = match &args.config {
        Some(path) => RenderConfig::load(path).into_diagnostic()?,
        None => RenderConfig::default(),
    };
    let repository = InMemoryRepository::load(&args.site).into_diagnostic()?;

    let tag = match parse_tag(&args.tag) {
        Ok(tag) => tag,
        Err(e) => return Err(StlDiagnostic::from_parse_error("--tag", &args.tag, &e).into()),
    };

    let item = args.item_index.map(|index| {
        if args.content == 0 {
            ListItem::Channel { index }
        } else {
            ListItem::Content { index }
        }
    });
    let scope = Scope::builder()
        .channel_id(args.channel)
        .content_id(args.content)
        .maybe_item(item)
        .build();
    debug!(?scope, tag = %tag.name, "rendering");

    let engine = Engine::builder()
        .repository(&repository)
        .config(config)
        .build();
    let mut page = PageInfo::new(repository.site_id());

    if args.entity {
        let value = engine
            .resolve_entity(&mut page, &tag, scope)
            .map_err(|e| miette!("render failed: {e}"))?;
        print_entity(&value, args.json)?;
        return Ok(exitcode::OK);
    }

    let output = engine
        .render_tag(&mut page, &tag, scope)
        .map_err(|e| miette!("render failed: {e}"))?;
    if args.json {
        let json = RenderJson {
            output: &output,
            body_codes: page.body_codes().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
    } else {
        println!("{}", output);
        for (key, code) in page.body_codes() {
            eprintln!("{} {}", format!("body code '{key}':").dimmed(), code);
        }
    }
    Ok(exitcode::OK)
}

/// Text values print as they are; projections always print as JSON.
fn print_entity(value: &TagValue, json: bool) -> Result<()> {
    match value {
        TagValue::Text(text) if !json => println!("{}", text),
        TagValue::Text(_) | TagValue::Channel(_) | TagValue::Content(_) => {
            println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
        }
    }
    Ok(())
}
