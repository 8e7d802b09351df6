use serde::{Deserialize, Serialize};

/// Extra key/value pair attached to alert notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CustomPayloadField {
    #[serde(rename = "staticString")]
    StaticString { key: String, value: String },
    #[serde(rename = "dynamic")]
    Dynamic { key: String, value: DynamicValue },
}

/// Value resolved from a tag at alert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub tag_name: String,
}

impl CustomPayloadField {
    pub fn key(&self) -> &str {
        match self {
            CustomPayloadField::StaticString { key, .. } | CustomPayloadField::Dynamic { key, .. } => key,
        }
    }
}
