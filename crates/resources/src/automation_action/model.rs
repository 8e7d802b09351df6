use std::collections::BTreeMap;

use instana_core::Cell;
use serde::{Deserialize, Serialize};

use crate::handle::ResourceModel;

/// Declarative automation action. Exactly one action block is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationActionModel {
    pub id: Cell<String>,
    pub name: Cell<String>,
    pub description: Cell<String>,
    pub tags: Cell<Vec<String>>,
    pub script: Cell<ScriptModel>,
    pub http: Cell<HttpModel>,
    pub manual: Cell<ManualModel>,
    pub jira: Cell<JiraModel>,
    pub github: Cell<GitHubModel>,
    pub doc_link: Cell<DocLinkModel>,
    pub gitlab: Cell<GitLabModel>,
    pub ansible: Cell<AnsibleModel>,
    pub input_parameter: Cell<Vec<ParameterModel>>,
}

impl ResourceModel for AutomationActionModel {
    fn resource_id(&self) -> Option<&str> {
        self.id.as_option().map(String::as_str).filter(|id| !id.is_empty())
    }

    fn set_resource_id(&mut self, id: String) {
        self.id = Cell::Present(id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptModel {
    pub content: Cell<String>,
    pub interpreter: Cell<String>,
    /// Seconds, kept as text like the API does.
    pub timeout: Cell<String>,
    pub source: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpModel {
    pub host: Cell<String>,
    pub method: Cell<String>,
    pub body: Cell<String>,
    pub headers: Cell<BTreeMap<String, String>>,
    pub ignore_certificate_errors: Cell<bool>,
    pub timeout: Cell<String>,
    pub language: Cell<String>,
    pub content_type: Cell<String>,
    pub auth: Cell<HttpAuthModel>,
}

/// At most one scheme is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpAuthModel {
    pub basic_auth: Cell<BasicAuthModel>,
    pub token: Cell<BearerTokenModel>,
    pub api_key: Cell<ApiKeyModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAuthModel {
    pub username: Cell<String>,
    pub password: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BearerTokenModel {
    pub bearer_token: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeyModel {
    pub key: Cell<String>,
    pub value: Cell<String>,
    /// `header` or `query`.
    pub key_location: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualModel {
    pub content: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraModel {
    pub project: Cell<String>,
    pub operation: Cell<String>,
    pub issue_type: Cell<String>,
    pub description: Cell<String>,
    pub assignee: Cell<String>,
    pub title: Cell<String>,
    pub labels: Cell<String>,
    pub comment: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubModel {
    pub owner: Cell<String>,
    pub repo: Cell<String>,
    pub title: Cell<String>,
    pub body: Cell<String>,
    pub operation: Cell<String>,
    pub assignees: Cell<String>,
    pub labels: Cell<String>,
    pub comment: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocLinkModel {
    pub url: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitLabModel {
    pub project_id: Cell<String>,
    pub title: Cell<String>,
    pub description: Cell<String>,
    pub operation: Cell<String>,
    pub labels: Cell<String>,
    pub issue_type: Cell<String>,
    pub comment: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnsibleModel {
    pub workflow_id: Cell<String>,
    pub playbook_id: Cell<String>,
    pub playbook_file_name: Cell<String>,
    pub url: Cell<String>,
    pub host_id: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterModel {
    pub name: Cell<String>,
    pub label: Cell<String>,
    pub description: Cell<String>,
    #[serde(rename = "type")]
    pub parameter_type: Cell<String>,
    pub value: Cell<String>,
    pub required: Cell<bool>,
    pub hidden: Cell<bool>,
}
