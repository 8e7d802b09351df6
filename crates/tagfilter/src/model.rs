//! REST representation of tag filters.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const EXPRESSION_TYPE: &str = "EXPRESSION";
pub const TAG_FILTER_TYPE: &str = "TAG_FILTER";

/// Element discriminant. Unrecognized values are kept so they can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TagFilterType {
    Expression,
    TagFilter,
    Unsupported(String),
}

impl From<String> for TagFilterType {
    fn from(value: String) -> Self {
        match value.as_str() {
            EXPRESSION_TYPE => TagFilterType::Expression,
            TAG_FILTER_TYPE => TagFilterType::TagFilter,
            _ => TagFilterType::Unsupported(value),
        }
    }
}

impl From<TagFilterType> for String {
    fn from(value: TagFilterType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TagFilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilterType::Expression => f.write_str(EXPRESSION_TYPE),
            TagFilterType::TagFilter => f.write_str(TAG_FILTER_TYPE),
            TagFilterType::Unsupported(other) => f.write_str(other),
        }
    }
}

/// A node of the REST tag-filter tree: either a logical `EXPRESSION` holding
/// `elements`, or a `TAG_FILTER` leaf comparing one tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagFilter {
    #[serde(rename = "type")]
    pub element_type: TagFilterType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<TagFilter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl TagFilter {
    fn blank(element_type: TagFilterType) -> Self {
        Self {
            element_type,
            logical_operator: None,
            elements: None,
            name: None,
            string_value: None,
            number_value: None,
            boolean_value: None,
            key: None,
            value: None,
            operator: None,
            entity: None,
        }
    }

    pub fn expression(logical_operator: impl Into<String>, elements: Vec<TagFilter>) -> Self {
        Self {
            logical_operator: Some(logical_operator.into()),
            elements: Some(elements),
            ..Self::blank(TagFilterType::Expression)
        }
    }

    /// The canonical empty filter: an `AND` expression without elements.
    pub fn empty() -> Self {
        Self::expression("AND", Vec::new())
    }

    pub fn tag(name: impl Into<String>, operator: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            operator: Some(operator.into()),
            entity: Some(entity.into()),
            ..Self::blank(TagFilterType::TagFilter)
        }
    }

    pub fn is_empty_expression(&self) -> bool {
        self.element_type == TagFilterType::Expression
            && self.elements.as_ref().map_or(true, Vec::is_empty)
    }
}
