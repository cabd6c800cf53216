//! Implementation of the `stl tags` command.

use clap::Args;
use miette::Result;
use stl::{compute_suggestions, TagRegistry};
use stl_semantics::canonical_tag_name;

use crate::output::table::{format_schema_table, format_tags_table};

/// Arguments for the tags command.
#[derive(Debug, Args)]
pub struct TagsArgs {
    /// Show the attribute schema of one tag
    #[arg(long)]
    pub tag: Option<String>,
}

/// Run the tags command.
pub fn run_tags(args: TagsArgs) -> Result<i32> {
    let registry = TagRegistry::standard();
    let Some(name) = args.tag else {
        println!("{}", format_tags_table(registry.definitions()));
        return Ok(exitcode::OK);
    };

    match registry.get(&name) {
        Some(definition) => {
            println!("{}: {}", definition.name, definition.description);
            println!("{}", format_schema_table(definition));
            Ok(exitcode::OK)
        }
        None => {
            let names: Vec<&str> = registry.names().collect();
            let suggestions = compute_suggestions(&canonical_tag_name(&name), &names);
            if suggestions.is_empty() {
                eprintln!("unknown tag '{}'", name);
            } else {
                eprintln!(
                    "unknown tag '{}' (did you mean: {}?)",
                    name,
                    suggestions.join(", ")
                );
            }
            Ok(exitcode::DATAERR)
        }
    }
}
