//! Expansion of entity markers embedded in attribute values.

use tracing::debug;

use crate::interpreter::{Engine, RenderContext, RenderError};
use crate::parser::{Segment, parse_entities};

/// Replace every entity marker in `value` with the text of its evaluation.
///
/// Each marker is evaluated in entity mode one level deeper than `ctx`.
/// Structured results contribute their caption, unknown tags keep the marker
/// text, and a marker past the depth bound contributes nothing. Only
/// repository failures escape.
pub fn substitute_entities(
    engine: &Engine<'_>,
    ctx: &mut RenderContext<'_>,
    value: &str,
) -> Result<String, RenderError> {
    if !value.contains('{') {
        return Ok(value.to_string());
    }
    let mut out = String::with_capacity(value.len());
    for segment in parse_entities(value) {
        let (marker, raw) = match segment {
            Segment::Literal(text) => {
                out.push_str(&text);
                continue;
            }
            Segment::Entity { marker, raw } => (marker, raw),
        };
        let occurrence = marker.to_occurrence();
        let evaluated = ctx
            .nested(&occurrence)
            .and_then(|mut nested| engine.evaluate(&mut nested));
        match evaluated {
            Ok(Some(result)) => out.push_str(&result.to_string()),
            Ok(None) => {
                debug!(marker = %raw, "unknown tag in entity marker, kept as written");
                out.push_str(&raw);
            }
            Err(RenderError::MaxDepthExceeded { max_depth }) => {
                debug!(marker = %raw, max_depth, "entity nesting too deep, substituted empty");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(out)
}
