//! Bridge between the textual `tag_filter` attribute and the REST tree.

use instana_core::cancel::ensure_active;
use instana_core::{CancellationToken, Cell, Diagnostics};
use instana_tagfilter::{map_to_rest, normalize, parse, TagFilter};

pub const ERR_PARSE_TAG_FILTER: &str = "Error parsing tag filter";
pub const ERR_MAP_FILTER_EXPRESSION: &str = "Error mapping filter expression";

/// Parse the configured expression; absent means the empty `AND` expression.
pub fn tag_filter_to_rest(
    cancel: &CancellationToken,
    expression: &Cell<String>,
    path: &str,
) -> Result<TagFilter, Diagnostics> {
    let Some(text) = expression.as_option() else {
        return Ok(TagFilter::empty());
    };
    ensure_active(cancel, "tag filter parsing")?;
    match parse(text) {
        Ok(expr) => Ok(map_to_rest(&expr)),
        Err(e) => {
            let mut diags = Diagnostics::new();
            diags.add_attribute_error(path, ERR_PARSE_TAG_FILTER, e.to_string());
            Err(diags)
        }
    }
}

/// Render a REST tree as canonical text; no tree (or an empty one) is null.
pub fn tag_filter_to_state(filter: Option<&TagFilter>, path: &str) -> Result<Cell<String>, Diagnostics> {
    let Some(filter) = filter else {
        return Ok(Cell::Null);
    };
    match normalize(filter) {
        Ok(text) => Ok(text.into()),
        Err(e) => {
            let mut diags = Diagnostics::new();
            diags.add_attribute_error(
                path,
                ERR_MAP_FILTER_EXPRESSION,
                format!("Failed to map filter expression: {e}"),
            );
            Err(diags)
        }
    }
}
