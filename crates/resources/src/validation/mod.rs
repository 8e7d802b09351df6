//! Attribute validators.
//!
//! Validators are declared on schema attributes (allowed values, length
//! bounds) and enforced here while mapping. Violations are reported as
//! `"Invalid Attribute Value"` diagnostics keyed by the attribute path.
//! Required attributes left null are reported as `"Missing required
//! argument"`.

mod suggest;

use instana_core::schema::{Attribute, Disposition};
use instana_core::Diagnostics;
use serde_json::Value;

pub const INVALID_ATTRIBUTE_VALUE: &str = "Invalid Attribute Value";
pub const MISSING_REQUIRED_ARGUMENT: &str = "Missing required argument";

/// Check `value` against the validators declared on `attribute`.
///
/// `path` is the concrete location reported to the user, e.g.
/// `rules[1].rule.aggregation`.
pub fn check_string(diags: &mut Diagnostics, attribute: &Attribute, path: &str, value: &str) {
    if !attribute.allowed_values.is_empty()
        && !attribute.allowed_values.iter().any(|allowed| allowed == value)
    {
        let candidates: Vec<&str> = attribute.allowed_values.iter().map(String::as_str).collect();
        let mut detail = format!(
            "Attribute {path} value must be one of: [{}], got: \"{value}\"",
            candidates.join(", ")
        );
        if let Some(suggestion) = suggest::closest_match(value, &candidates) {
            detail.push_str(&format!(" (did you mean \"{suggestion}\"?)"));
        }
        diags.add_attribute_error(path, INVALID_ATTRIBUTE_VALUE, detail);
    }

    if let Some(bounds) = attribute.length {
        let len = value.chars().count();
        if len < bounds.min || len > bounds.max {
            diags.add_attribute_error(
                path,
                INVALID_ATTRIBUTE_VALUE,
                format!(
                    "Attribute {path} string length must be between {} and {}, got: {len}",
                    bounds.min, bounds.max
                ),
            );
        }
    }
}

/// Like [`check_string`], skipping absent values.
pub fn check_optional_string(
    diags: &mut Diagnostics,
    attribute: &Attribute,
    path: &str,
    value: Option<&str>,
) {
    if let Some(value) = value {
        check_string(diags, attribute, path, value);
    }
}

/// Report every `Required` attribute of `attributes` that is null or
/// missing in `object`, the serialized form of the block at `prefix`.
///
/// Paths listed in `skip` are left to the caller, which reports them with
/// a more specific diagnostic.
pub fn check_required(
    diags: &mut Diagnostics,
    attributes: &[Attribute],
    object: &Value,
    prefix: &str,
    skip: &[&str],
) {
    for attribute in attributes.iter().filter(|a| a.disposition == Disposition::Required) {
        let path = if prefix.is_empty() {
            attribute.name.clone()
        } else {
            format!("{prefix}.{}", attribute.name)
        };
        if skip.contains(&path.as_str()) {
            continue;
        }
        if object.get(&attribute.name).map_or(true, Value::is_null) {
            diags.add_attribute_error(
                &path,
                MISSING_REQUIRED_ARGUMENT,
                format!("The argument \"{path}\" is required, but no definition was found."),
            );
        }
    }
}

/// Reject a configured integer below `min`.
pub fn check_at_least(diags: &mut Diagnostics, path: &str, value: Option<i64>, min: i64) {
    if let Some(value) = value.filter(|v| *v < min) {
        diags.add_attribute_error(
            path,
            INVALID_ATTRIBUTE_VALUE,
            format!("Attribute {path} must be at least {min}, got: {value}"),
        );
    }
}
