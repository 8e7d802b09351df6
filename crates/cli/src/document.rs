use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Read a YAML or JSON document; JSON parses as YAML.
pub fn load(path: &Path) -> Result<serde_yaml::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_yaml::Value = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(value)
}

/// Decode a document into a resource model. An empty document is an empty model.
pub fn decode<M: DeserializeOwned>(value: &serde_yaml::Value) -> Result<M> {
    let value = if value.is_null() {
        serde_yaml::Value::Mapping(Default::default())
    } else {
        value.clone()
    };
    serde_yaml::from_value(value).context("document does not match the resource model")
}
