//! Host schema vocabulary.
//!
//! Resource handles declare their attributes with these types; the host (or the
//! CLI harness) renders them. Validators declared here are enforced by the
//! mappers, which report violations as diagnostics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "element")]
pub enum AttributeKind {
    String,
    Bool,
    Int64,
    Float64,
    List(Box<AttributeKind>),
    Set(Box<AttributeKind>),
    Map(Box<AttributeKind>),
    /// A single nested object.
    Object(Vec<Attribute>),
    /// A list of nested objects.
    ObjectList(Vec<Attribute>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Required,
    Optional,
    Computed,
    OptionalComputed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Int64(i64),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
    pub disposition: Disposition,
    pub description: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<LengthBounds>,
}

impl Attribute {
    pub fn new(
        name: impl Into<String>,
        kind: AttributeKind,
        disposition: Disposition,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            disposition,
            description: description.into(),
            sensitive: false,
            default: None,
            allowed_values: Vec::new(),
            length: None,
        }
    }

    pub fn required(name: impl Into<String>, kind: AttributeKind, description: impl Into<String>) -> Self {
        Self::new(name, kind, Disposition::Required, description)
    }

    pub fn optional(name: impl Into<String>, kind: AttributeKind, description: impl Into<String>) -> Self {
        Self::new(name, kind, Disposition::Optional, description)
    }

    pub fn computed(name: impl Into<String>, kind: AttributeKind, description: impl Into<String>) -> Self {
        Self::new(name, kind, Disposition::Computed, description)
    }

    pub fn optional_computed(
        name: impl Into<String>,
        kind: AttributeKind,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, kind, Disposition::OptionalComputed, description)
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn one_of<S: AsRef<str>>(mut self, values: &[S]) -> Self {
        self.allowed_values = values.iter().map(|v| v.as_ref().to_string()).collect();
        self
    }

    pub fn length_between(mut self, min: usize, max: usize) -> Self {
        self.length = Some(LengthBounds { min, max });
        self
    }

    /// Nested attributes of an object-typed attribute.
    pub fn children(&self) -> &[Attribute] {
        match &self.kind {
            AttributeKind::Object(attrs) | AttributeKind::ObjectList(attrs) => attrs,
            _ => &[],
        }
    }

    pub fn child(&self, name: &str) -> Option<&Attribute> {
        self.children().iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Resource type name without the provider prefix, e.g. `alerting_channel`.
    pub type_name: String,
    pub description: String,
    pub version: i64,
    pub attributes: Vec<Attribute>,
}

impl ResourceSchema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Resolve a dotted path such as `time_threshold.violations_in_sequence.time_window`.
    pub fn resolve(&self, path: &str) -> Option<&Attribute> {
        let mut parts = path.split('.');
        let mut current = self.attribute(parts.next()?)?;
        for part in parts {
            current = current.child(part)?;
        }
        Some(current)
    }
}
