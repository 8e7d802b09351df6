//! Automation action payload.
//!
//! Every action type shares one record; type-specific settings travel as a
//! list of named string fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::InstanaDataObject;

pub const AUTOMATION_ACTIONS_PATH: &str = "/api/automation/actions";

// Wire names of the type-specific fields.
pub const SCRIPT_SSH_FIELD: &str = "script_ssh";
pub const SUBTYPE_FIELD: &str = "subtype";
pub const TIMEOUT_FIELD: &str = "timeout";
pub const SCRIPT_SOURCE_FIELD: &str = "source";
pub const HTTP_HOST_FIELD: &str = "host";
pub const HTTP_METHOD_FIELD: &str = "method";
pub const HTTP_BODY_FIELD: &str = "body";
pub const HTTP_HEADERS_FIELD: &str = "headers";
pub const HTTP_IGNORE_CERT_ERRORS_FIELD: &str = "ignoreCertErrors";
pub const HTTP_AUTH_FIELD: &str = "authen";
pub const HTTP_LANGUAGE_FIELD: &str = "language";
pub const HTTP_CONTENT_TYPE_FIELD: &str = "content_type";
pub const MANUAL_CONTENT_FIELD: &str = "content";
pub const DOC_LINK_URL_FIELD: &str = "url";

pub const ENCODING_ASCII: &str = "ascii";
pub const ENCODING_BASE64: &str = "base64";
pub const ENCODING_UTF8: &str = "UTF8";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AutomationActionType {
    Script,
    Http,
    Manual,
    Jira,
    GitHub,
    DocLink,
    GitLab,
    Ansible,
    Unsupported(String),
}

impl AutomationActionType {
    pub fn as_str(&self) -> &str {
        match self {
            AutomationActionType::Script => "SCRIPT",
            AutomationActionType::Http => "HTTP",
            AutomationActionType::Manual => "MANUAL",
            AutomationActionType::Jira => "JIRA",
            AutomationActionType::GitHub => "GITHUB",
            AutomationActionType::DocLink => "DOC_LINK",
            AutomationActionType::GitLab => "GITLAB",
            AutomationActionType::Ansible => "ANSIBLE",
            AutomationActionType::Unsupported(other) => other,
        }
    }
}

impl From<String> for AutomationActionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SCRIPT" => AutomationActionType::Script,
            "HTTP" => AutomationActionType::Http,
            "MANUAL" => AutomationActionType::Manual,
            "JIRA" => AutomationActionType::Jira,
            "GITHUB" => AutomationActionType::GitHub,
            "DOC_LINK" => AutomationActionType::DocLink,
            "GITLAB" => AutomationActionType::GitLab,
            "ANSIBLE" => AutomationActionType::Ansible,
            _ => AutomationActionType::Unsupported(value),
        }
    }
}

impl From<AutomationActionType> for String {
    fn from(value: AutomationActionType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AutomationActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named setting of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionField {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub secured: bool,
}

impl ActionField {
    pub fn new(name: &str, description: &str, value: impl Into<String>, encoding: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            value: value.into(),
            encoding: encoding.to_string(),
            secured: false,
        }
    }
}

/// A value the action asks for when it runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionParameter {
    pub name: String,
    pub label: String,
    pub description: String,
    #[serde(rename = "type")]
    pub parameter_type: String,
    pub value: String,
    pub required: bool,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationAction {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub action_type: AutomationActionType,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub fields: Vec<ActionField>,
    #[serde(default)]
    pub input_parameters: Vec<ActionParameter>,
}

impl AutomationAction {
    /// Value of the field `name`; empty values count as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
            .filter(|v| !v.is_empty())
    }
}

impl InstanaDataObject for AutomationAction {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_response() {
        let action: AutomationAction = serde_json::from_str(
            r#"{
                "id": "a1",
                "name": "restart",
                "description": "",
                "type": "SCRIPT",
                "tags": ["ops"],
                "fields": [
                    {"name": "script_ssh", "description": "Script", "value": "ZWNobw==", "encoding": "base64", "secured": false},
                    {"name": "subtype", "description": "Interpreter", "value": "", "encoding": "ascii", "secured": false}
                ],
                "inputParameters": [
                    {"name": "host", "label": "Host", "description": "", "type": "static", "value": "", "required": true, "hidden": false}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(action.action_type, AutomationActionType::Script);
        assert_eq!(action.field(SCRIPT_SSH_FIELD), Some("ZWNobw=="));
        assert_eq!(action.field(SUBTYPE_FIELD), None);
        assert_eq!(action.input_parameters[0].parameter_type, "static");
        assert!(action.input_parameters[0].required);
    }

    #[test]
    fn unknown_types_are_preserved() {
        let kind = AutomationActionType::from("PAGER".to_string());
        assert_eq!(kind, AutomationActionType::Unsupported("PAGER".into()));
        assert_eq!(String::from(kind), "PAGER");
    }
}
