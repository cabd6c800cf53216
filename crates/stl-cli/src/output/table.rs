//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use stl::TagDefinition;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// One row per registered tag.
pub fn format_tags_table<'a>(definitions: impl Iterator<Item = &'a TagDefinition>) -> Table {
    let mut table = new_table(vec!["Tag", "Usage", "Attributes", "HTML attributes"]);
    for definition in definitions {
        table.add_row(vec![
            definition.name.to_string(),
            definition.usage.to_string(),
            definition.schema.len().to_string(),
            if definition.accepts_html_attributes {
                "passed through"
            } else {
                "ignored"
            }
            .to_string(),
        ]);
    }
    table
}

/// One row per attribute of `definition`'s schema.
pub fn format_schema_table(definition: &TagDefinition) -> Table {
    let mut table = new_table(vec!["Attribute", "Type", "Description"]);
    for desc in definition.schema {
        table.add_row(vec![
            desc.name.to_string(),
            desc.attr_type.as_str().to_string(),
            desc.label.to_string(),
        ]);
    }
    table
}
