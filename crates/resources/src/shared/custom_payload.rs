//! Custom payload fields attached to alert notifications.

use instana_core::schema::{Attribute, AttributeKind};
use instana_core::{cell_to_optional, optional_to_cell, Cell, Diagnostics};
use instana_restapi::{CustomPayloadField, DynamicValue};
use serde::{Deserialize, Serialize};

pub const FIELD_CUSTOM_PAYLOAD_FIELDS: &str = "custom_payload_fields";

pub const ERR_MISSING_VALUE: &str = "custom_payload_field missing value";
pub const ERR_MISSING_TAG_NAME: &str = "custom_payload_field.dynamic_value missing tag_name";

/// Either `value` (static) or `dynamic_value` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomPayloadFieldModel {
    pub key: Cell<String>,
    pub value: Cell<String>,
    pub dynamic_value: Cell<DynamicValueModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicValueModel {
    pub key: Cell<String>,
    pub tag_name: Cell<String>,
}

impl CustomPayloadFieldModel {
    pub fn static_string(key: &str, value: &str) -> Self {
        Self {
            key: Cell::Present(key.to_string()),
            value: Cell::Present(value.to_string()),
            dynamic_value: Cell::Null,
        }
    }
}

pub fn custom_payload_fields_to_rest(
    fields: &Cell<Vec<CustomPayloadFieldModel>>,
    diags: &mut Diagnostics,
) -> Vec<CustomPayloadField> {
    let mut out = Vec::new();
    for (i, field) in fields.as_option().into_iter().flatten().enumerate() {
        let path = format!("{FIELD_CUSTOM_PAYLOAD_FIELDS}[{i}]");
        let key = cell_to_optional(&field.key).unwrap_or_default();

        if let Some(dynamic) = field.dynamic_value.as_option() {
            let Some(tag_name) = cell_to_optional(&dynamic.tag_name) else {
                diags.add_attribute_error(
                    format!("{path}.dynamic_value"),
                    ERR_MISSING_TAG_NAME,
                    format!("dynamic value of custom payload field \"{key}\" has no tag_name"),
                );
                continue;
            };
            out.push(CustomPayloadField::Dynamic {
                key,
                value: DynamicValue {
                    key: cell_to_optional(&dynamic.key),
                    tag_name,
                },
            });
        } else if let Some(value) = cell_to_optional(&field.value) {
            out.push(CustomPayloadField::StaticString { key, value });
        } else {
            diags.add_attribute_error(
                path,
                ERR_MISSING_VALUE,
                format!("custom payload field \"{key}\" needs either value or dynamic_value"),
            );
        }
    }
    out
}

/// An empty list reads back as null.
pub fn custom_payload_fields_to_state(fields: &[CustomPayloadField]) -> Cell<Vec<CustomPayloadFieldModel>> {
    if fields.is_empty() {
        return Cell::Null;
    }
    let models = fields
        .iter()
        .map(|field| match field {
            CustomPayloadField::StaticString { key, value } => CustomPayloadFieldModel::static_string(key, value),
            CustomPayloadField::Dynamic { key, value } => CustomPayloadFieldModel {
                key: Cell::Present(key.clone()),
                value: Cell::Null,
                dynamic_value: Cell::Present(DynamicValueModel {
                    key: optional_to_cell(value.key.clone()),
                    tag_name: Cell::Present(value.tag_name.clone()),
                }),
            },
        })
        .collect();
    Cell::Present(models)
}

pub fn custom_payload_fields_attribute() -> Attribute {
    Attribute::optional(
        FIELD_CUSTOM_PAYLOAD_FIELDS,
        AttributeKind::ObjectList(vec![
            Attribute::required("key", AttributeKind::String, "The key of the custom payload field"),
            Attribute::optional("value", AttributeKind::String, "The static string value of the custom payload field"),
            Attribute::optional(
                "dynamic_value",
                AttributeKind::Object(vec![
                    Attribute::optional("key", AttributeKind::String, "The key of the tag which should be added to the payload"),
                    Attribute::required("tag_name", AttributeKind::String, "The name of the tag which should be added to the payload"),
                ]),
                "The value of a dynamic custom payload field",
            ),
        ]),
        "An optional list of custom payload fields (static key/value pairs or dynamic tag references added to the event)",
    )
}
