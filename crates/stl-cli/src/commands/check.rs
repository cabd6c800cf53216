//! Implementation of the `stl check` command.

use clap::Args;
use miette::{IntoDiagnostic, Report, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use stl::{lint_tag, parse_tag, TagRegistry, TagWarning};

use crate::output::StlDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Tag markup to check (repeatable)
    #[arg(long = "tag", required = true)]
    pub tags: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked tag.
#[derive(Debug, Serialize)]
struct CheckJson {
    tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    warnings: Vec<WarningJson>,
}

#[derive(Debug, Serialize)]
struct WarningJson {
    kind: &'static str,
    message: String,
    suggestions: Vec<String>,
}

impl From<&TagWarning> for WarningJson {
    fn from(warning: &TagWarning) -> Self {
        let (kind, suggestions) = match warning {
            TagWarning::UnknownTag { suggestions, .. } => ("unknownTag", suggestions.clone()),
            TagWarning::UnknownAttribute { suggestions, .. } => {
                ("unknownAttribute", suggestions.clone())
            }
            TagWarning::MalformedValue { .. } => ("malformedValue", Vec::new()),
            TagWarning::UnknownFieldType { suggestions, .. } => {
                ("unknownFieldType", suggestions.clone())
            }
        };
        WarningJson {
            kind,
            message: warning.to_string(),
            suggestions,
        }
    }
}

/// Run the check command.
///
/// Exits with `DATAERR` when any tag fails to parse or has warnings.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let registry = TagRegistry::standard();
    let mut results = Vec::with_capacity(args.tags.len());
    let mut failed = false;

    for markup in &args.tags {
        match parse_tag(markup) {
            Ok(tag) => {
                let warnings = lint_tag(&tag, registry);
                failed |= !warnings.is_empty();
                results.push(CheckJson {
                    tag: markup.clone(),
                    error: None,
                    warnings: warnings.iter().map(WarningJson::from).collect(),
                });
            }
            Err(e) => {
                failed = true;
                if !args.json {
                    let diagnostic = StlDiagnostic::from_parse_error("--tag", markup, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                results.push(CheckJson {
                    tag: markup.clone(),
                    error: Some(e.to_string()),
                    warnings: Vec::new(),
                });
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results).into_diagnostic()?);
    } else {
        for result in results.iter().filter(|r| r.error.is_none()) {
            if result.warnings.is_empty() {
                println!("{} {}", "ok".green(), result.tag);
            } else {
                println!("{} {}", "warning".yellow().bold(), result.tag);
                for warning in &result.warnings {
                    println!("  - {}", warning.message);
                }
            }
        }
    }

    if failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
