//! Declarative model ↔ REST payload for automation actions.
//!
//! Type-specific settings travel as named string fields. Empty wire values
//! read back as null.

use std::collections::BTreeMap;

use instana_core::cell::non_empty_string_cell;
use instana_core::schema::ResourceSchema;
use instana_core::{cell_to_optional, optional_to_cell, Cell, Diagnostics};
use instana_restapi::automation_action::{
    DOC_LINK_URL_FIELD, ENCODING_ASCII, ENCODING_BASE64, ENCODING_UTF8, HTTP_AUTH_FIELD,
    HTTP_BODY_FIELD, HTTP_CONTENT_TYPE_FIELD, HTTP_HEADERS_FIELD, HTTP_HOST_FIELD,
    HTTP_IGNORE_CERT_ERRORS_FIELD, HTTP_LANGUAGE_FIELD, HTTP_METHOD_FIELD, MANUAL_CONTENT_FIELD,
    SCRIPT_SOURCE_FIELD, SCRIPT_SSH_FIELD, SUBTYPE_FIELD, TIMEOUT_FIELD,
};
use instana_restapi::{ActionField, ActionParameter, AutomationAction, AutomationActionType};
use serde_json::{json, Value};

use super::constants::*;
use super::model::*;
use crate::handle::ResourceModel;
use crate::validation::{check_optional_string, check_required};

// Wire name and description of the free-form ticket fields, in model order.
const JIRA_FIELDS: [(&str, &str); 8] = [
    ("project", "jira project"),
    ("ticketActionType", "jira ticket type"),
    ("issue_type", "jira issue type"),
    ("body", "jira issue description"),
    ("assignee", "jira issue assignee"),
    ("summary", "jira issue summary"),
    ("labels", "jira issue labels"),
    ("comment", "jira issue comment"),
];

const GITHUB_FIELDS: [(&str, &str); 8] = [
    ("owner", "github issue owner"),
    ("repo", "github issue repo"),
    ("title", "github issue title"),
    ("body", "github issue body"),
    ("ticketType", "github issue type"),
    ("assignees", "github issue assignees"),
    ("labels", "github issue labels"),
    ("comment", "github issue comment"),
];

const GITLAB_FIELDS: [(&str, &str); 7] = [
    ("projectId", "gitlab projectId"),
    ("title", "gitlab issue title"),
    ("body", "gitlab issue description"),
    ("ticketActionType", "gitlab ticket type"),
    ("labels", "gitlab issue labels"),
    ("issue_type", "gitlab issue type"),
    ("comment", "gitlab issue comment"),
];

const ANSIBLE_FIELDS: [(&str, &str); 5] = [
    ("workflowId", "The workflow ID"),
    ("playbookId", "The playbook ID"),
    ("playbookFileName", "The playbook filename"),
    ("ansibleUrl", "The ansible url"),
    ("hostId", "The host ID from which this action is created"),
];

fn jira_cells(v: &JiraModel) -> [&Cell<String>; 8] {
    [&v.project, &v.operation, &v.issue_type, &v.description, &v.assignee, &v.title, &v.labels, &v.comment]
}

fn jira_cells_mut(v: &mut JiraModel) -> [&mut Cell<String>; 8] {
    [
        &mut v.project,
        &mut v.operation,
        &mut v.issue_type,
        &mut v.description,
        &mut v.assignee,
        &mut v.title,
        &mut v.labels,
        &mut v.comment,
    ]
}

fn github_cells(v: &GitHubModel) -> [&Cell<String>; 8] {
    [&v.owner, &v.repo, &v.title, &v.body, &v.operation, &v.assignees, &v.labels, &v.comment]
}

fn github_cells_mut(v: &mut GitHubModel) -> [&mut Cell<String>; 8] {
    [
        &mut v.owner,
        &mut v.repo,
        &mut v.title,
        &mut v.body,
        &mut v.operation,
        &mut v.assignees,
        &mut v.labels,
        &mut v.comment,
    ]
}

fn gitlab_cells(v: &GitLabModel) -> [&Cell<String>; 7] {
    [&v.project_id, &v.title, &v.description, &v.operation, &v.labels, &v.issue_type, &v.comment]
}

fn gitlab_cells_mut(v: &mut GitLabModel) -> [&mut Cell<String>; 7] {
    [
        &mut v.project_id,
        &mut v.title,
        &mut v.description,
        &mut v.operation,
        &mut v.labels,
        &mut v.issue_type,
        &mut v.comment,
    ]
}

fn ansible_cells(v: &AnsibleModel) -> [&Cell<String>; 5] {
    [&v.workflow_id, &v.playbook_id, &v.playbook_file_name, &v.url, &v.host_id]
}

fn ansible_cells_mut(v: &mut AnsibleModel) -> [&mut Cell<String>; 5] {
    [
        &mut v.workflow_id,
        &mut v.playbook_id,
        &mut v.playbook_file_name,
        &mut v.url,
        &mut v.host_id,
    ]
}

/// The action block a model configures, borrowed from the model.
#[derive(Debug, Clone, Copy)]
pub enum ActionVariant<'a> {
    Script(&'a ScriptModel),
    Http(&'a HttpModel),
    Manual(&'a ManualModel),
    Jira(&'a JiraModel),
    GitHub(&'a GitHubModel),
    DocLink(&'a DocLinkModel),
    GitLab(&'a GitLabModel),
    Ansible(&'a AnsibleModel),
}

impl ActionVariant<'_> {
    pub fn field_name(&self) -> &'static str {
        match self {
            ActionVariant::Script(_) => FIELD_SCRIPT,
            ActionVariant::Http(_) => FIELD_HTTP,
            ActionVariant::Manual(_) => FIELD_MANUAL,
            ActionVariant::Jira(_) => FIELD_JIRA,
            ActionVariant::GitHub(_) => FIELD_GITHUB,
            ActionVariant::DocLink(_) => FIELD_DOC_LINK,
            ActionVariant::GitLab(_) => FIELD_GITLAB,
            ActionVariant::Ansible(_) => FIELD_ANSIBLE,
        }
    }
}

/// Every action block present on `model`, in schema order.
pub fn configured_actions(model: &AutomationActionModel) -> Vec<ActionVariant<'_>> {
    [
        model.script.as_option().map(ActionVariant::Script),
        model.http.as_option().map(ActionVariant::Http),
        model.manual.as_option().map(ActionVariant::Manual),
        model.jira.as_option().map(ActionVariant::Jira),
        model.github.as_option().map(ActionVariant::GitHub),
        model.doc_link.as_option().map(ActionVariant::DocLink),
        model.gitlab.as_option().map(ActionVariant::GitLab),
        model.ansible.as_option().map(ActionVariant::Ansible),
    ]
    .into_iter()
    .flatten()
    .collect()
}

// ── state → REST ────────────────────────────────────────────────────

/// HTTP credentials and header values carried by `model`.
pub fn action_secrets(model: &AutomationActionModel) -> Vec<String> {
    let Some(http) = model.http.as_option() else {
        return Vec::new();
    };
    let auth = http.auth.as_option();
    let sensitive = [
        auth.and_then(|a| a.basic_auth.as_option()).and_then(|b| b.password.as_option()),
        auth.and_then(|a| a.token.as_option()).and_then(|t| t.bearer_token.as_option()),
        auth.and_then(|a| a.api_key.as_option()).and_then(|k| k.value.as_option()),
    ];
    let headers = http.headers.as_option().into_iter().flat_map(|h| h.values());
    sensitive.into_iter().flatten().chain(headers).cloned().collect()
}

fn or_empty(cell: &Cell<String>) -> &str {
    cell.as_option().map(String::as_str).unwrap_or_default()
}

/// Wire fields of one action. Absent values are left out.
#[derive(Default)]
struct FieldList(Vec<ActionField>);

impl FieldList {
    fn push_value(&mut self, name: &str, description: &str, value: String, encoding: &str) {
        self.0.push(ActionField::new(name, description, value, encoding));
    }

    fn push(&mut self, name: &str, description: &str, value: &Cell<String>, encoding: &str) {
        if let Some(value) = value.as_option() {
            self.push_value(name, description, value.clone(), encoding);
        }
    }

    fn push_all<const N: usize>(&mut self, wire: &[(&str, &str); N], cells: [&Cell<String>; N]) {
        for ((name, description), cell) in wire.iter().zip(cells) {
            self.push(name, description, cell, ENCODING_ASCII);
        }
    }
}

/// Report null required attributes of the block at dotted `path`.
fn check_block(diags: &mut Diagnostics, schema: &ResourceSchema, document: &Value, path: &str) {
    let block = path.split('.').try_fold(document, |value, part| value.get(part));
    if let (Some(block), Some(attr)) = (block.filter(|b| !b.is_null()), schema.resolve(path)) {
        check_required(diags, attr.children(), block, path, &[]);
    }
}

fn check_required_fields(
    schema: &ResourceSchema,
    model: &AutomationActionModel,
    variant: ActionVariant<'_>,
    diags: &mut Diagnostics,
) {
    let document = match serde_json::to_value(model) {
        Ok(document) => document,
        Err(err) => {
            diags.add_error(ERR_INVALID_CONFIGURATION, err.to_string());
            return;
        }
    };
    check_required(diags, &schema.attributes, &document, "", &[]);
    check_block(diags, schema, &document, variant.field_name());
    if let ActionVariant::Http(_) = variant {
        for scheme in [FIELD_BASIC_AUTH, FIELD_TOKEN, FIELD_API_KEY] {
            check_block(diags, schema, &document, &format!("{FIELD_HTTP}.{FIELD_AUTH}.{scheme}"));
        }
    }
    if let (Some(Value::Array(entries)), Some(attr)) =
        (document.get(FIELD_INPUT_PARAMETER), schema.attribute(FIELD_INPUT_PARAMETER))
    {
        for (i, entry) in entries.iter().enumerate() {
            check_required(diags, attr.children(), entry, &format!("{FIELD_INPUT_PARAMETER}[{i}]"), &[]);
        }
    }
}

/// Map a model to the payload sent on create and update.
///
/// Exactly one action block must be configured. All problems found are
/// reported together.
pub fn action_to_rest(
    schema: &ResourceSchema,
    model: &AutomationActionModel,
) -> Result<AutomationAction, Diagnostics> {
    let mut diags = Diagnostics::new();
    for secret in action_secrets(model) {
        diags.register_secret(secret);
    }

    let variants = configured_actions(model);
    let variant = match variants.as_slice() {
        [single] => *single,
        [] => {
            diags.add_error(ERR_INVALID_CONFIGURATION, ERR_INVALID_CONFIGURATION_MSG);
            return Err(diags);
        }
        many => {
            let names: Vec<&str> = many.iter().map(ActionVariant::field_name).collect();
            diags.add_error(
                ERR_INVALID_CONFIGURATION,
                format!("{ERR_INVALID_CONFIGURATION_MSG} Found: {}", names.join(", ")),
            );
            return Err(diags);
        }
    };

    check_required_fields(schema, model, variant, &mut diags);
    let (action_type, fields) = variant_to_rest(schema, variant, &mut diags);
    let input_parameters = parameters_to_rest(schema, model, &mut diags);
    let action = AutomationAction {
        id: model.resource_id().unwrap_or_default().to_string(),
        name: or_empty(&model.name).to_string(),
        description: or_empty(&model.description).to_string(),
        action_type,
        tags: cell_to_optional(&model.tags),
        fields: fields.0,
        input_parameters,
    };
    diags.into_result(action)
}

fn variant_to_rest(
    schema: &ResourceSchema,
    variant: ActionVariant<'_>,
    diags: &mut Diagnostics,
) -> (AutomationActionType, FieldList) {
    let mut fields = FieldList::default();
    let action_type = match variant {
        ActionVariant::Script(v) => {
            fields.push(SCRIPT_SSH_FIELD, "Script to execute", &v.content, ENCODING_BASE64);
            fields.push(SUBTYPE_FIELD, "Script interpreter", &v.interpreter, ENCODING_ASCII);
            fields.push(TIMEOUT_FIELD, "Timeout in seconds", &v.timeout, ENCODING_ASCII);
            fields.push(SCRIPT_SOURCE_FIELD, "The source of the script", &v.source, ENCODING_ASCII);
            AutomationActionType::Script
        }
        ActionVariant::Http(v) => {
            http_to_rest(schema, v, &mut fields, diags);
            AutomationActionType::Http
        }
        ActionVariant::Manual(v) => {
            fields.push(MANUAL_CONTENT_FIELD, "Content for manual action", &v.content, ENCODING_ASCII);
            AutomationActionType::Manual
        }
        ActionVariant::Jira(v) => {
            fields.push_all(&JIRA_FIELDS, jira_cells(v));
            AutomationActionType::Jira
        }
        ActionVariant::GitHub(v) => {
            fields.push_all(&GITHUB_FIELDS, github_cells(v));
            AutomationActionType::GitHub
        }
        ActionVariant::DocLink(v) => {
            fields.push(DOC_LINK_URL_FIELD, "URL to remediation documentation", &v.url, ENCODING_UTF8);
            AutomationActionType::DocLink
        }
        ActionVariant::GitLab(v) => {
            fields.push_all(&GITLAB_FIELDS, gitlab_cells(v));
            AutomationActionType::GitLab
        }
        ActionVariant::Ansible(v) => {
            fields.push_all(&ANSIBLE_FIELDS, ansible_cells(v));
            AutomationActionType::Ansible
        }
    };
    (action_type, fields)
}

fn http_to_rest(schema: &ResourceSchema, v: &HttpModel, fields: &mut FieldList, diags: &mut Diagnostics) {
    let method_path = format!("{FIELD_HTTP}.{FIELD_METHOD}");
    if let Some(attr) = schema.resolve(&method_path) {
        check_optional_string(diags, attr, &method_path, v.method.as_option().map(String::as_str));
    }

    fields.push(HTTP_HOST_FIELD, "URL of the HTTP request", &v.host, ENCODING_ASCII);
    fields.push(HTTP_METHOD_FIELD, "HTTP method", &v.method, ENCODING_ASCII);
    fields.push(HTTP_BODY_FIELD, "Body of the HTTP request", &v.body, ENCODING_ASCII);
    if let Some(ignore) = v.ignore_certificate_errors.as_option() {
        fields.push_value(
            HTTP_IGNORE_CERT_ERRORS_FIELD,
            "Ignore certificate errors",
            ignore.to_string(),
            ENCODING_ASCII,
        );
    }
    fields.push(TIMEOUT_FIELD, "Timeout in seconds", &v.timeout, ENCODING_ASCII);
    fields.push(HTTP_LANGUAGE_FIELD, "The language for the HTTP request", &v.language, ENCODING_ASCII);
    fields.push(
        HTTP_CONTENT_TYPE_FIELD,
        "The content type for the HTTP request",
        &v.content_type,
        ENCODING_ASCII,
    );
    fields.push_value(
        HTTP_AUTH_FIELD,
        "Authentication for the HTTPS request",
        auth_to_rest(v.auth.as_option(), diags).to_string(),
        ENCODING_ASCII,
    );
    if let Some(headers) = v.headers.as_option().filter(|h| !h.is_empty()) {
        let object: serde_json::Map<String, Value> = headers
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        fields.push_value(
            HTTP_HEADERS_FIELD,
            "Headers of the HTTP request",
            Value::Object(object).to_string(),
            ENCODING_ASCII,
        );
    }
}

/// The `authen` field; `noAuth` when no scheme is configured.
fn auth_to_rest(auth: Option<&HttpAuthModel>, diags: &mut Diagnostics) -> Value {
    let none = || json!({ "type": AUTH_TYPE_NONE });
    let Some(auth) = auth else {
        return none();
    };
    let schemes = [auth.basic_auth.is_present(), auth.token.is_present(), auth.api_key.is_present()];
    if schemes.into_iter().filter(|set| *set).count() > 1 {
        diags.add_attribute_error(format!("{FIELD_HTTP}.{FIELD_AUTH}"), ERR_INVALID_AUTH, ERR_INVALID_AUTH_MSG);
    }

    if let Some(basic) = auth.basic_auth.as_option() {
        json!({
            "type": AUTH_TYPE_BASIC,
            "username": or_empty(&basic.username),
            "password": or_empty(&basic.password),
        })
    } else if let Some(token) = auth.token.as_option() {
        json!({ "type": AUTH_TYPE_BEARER, "bearerToken": or_empty(&token.bearer_token) })
    } else if let Some(key) = auth.api_key.as_option() {
        json!({
            "type": AUTH_TYPE_API_KEY,
            "apiKey": or_empty(&key.key),
            "apiKeyValue": or_empty(&key.value),
            "apiKeyAddTo": or_empty(&key.key_location),
        })
    } else {
        none()
    }
}

fn parameters_to_rest(
    schema: &ResourceSchema,
    model: &AutomationActionModel,
    diags: &mut Diagnostics,
) -> Vec<ActionParameter> {
    let Some(parameters) = model.input_parameter.as_option() else {
        return Vec::new();
    };
    let type_attr = schema.resolve(&format!("{FIELD_INPUT_PARAMETER}.{FIELD_PARAMETER_TYPE}"));
    parameters
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if let Some(attr) = type_attr {
                let path = format!("{FIELD_INPUT_PARAMETER}[{i}].{FIELD_PARAMETER_TYPE}");
                check_optional_string(diags, attr, &path, p.parameter_type.as_option().map(String::as_str));
            }
            ActionParameter {
                name: or_empty(&p.name).to_string(),
                label: or_empty(&p.label).to_string(),
                description: or_empty(&p.description).to_string(),
                parameter_type: or_empty(&p.parameter_type).to_string(),
                value: or_empty(&p.value).to_string(),
                required: p.required.as_option().copied().unwrap_or(false),
                hidden: p.hidden.as_option().copied().unwrap_or(false),
            }
        })
        .collect()
}

// ── REST → state ────────────────────────────────────────────────────

fn text(payload: &AutomationAction, name: &str) -> Cell<String> {
    non_empty_string_cell(payload.field(name))
}

fn read_strings<const N: usize>(
    payload: &AutomationAction,
    wire: &[(&str, &str); N],
    cells: [&mut Cell<String>; N],
) {
    for ((name, _), cell) in wire.iter().zip(cells) {
        *cell = text(payload, name);
    }
}

/// Map a REST payload to a model.
pub fn action_to_state(payload: &AutomationAction) -> Result<AutomationActionModel, Diagnostics> {
    let mut diags = Diagnostics::new();
    let mut model = AutomationActionModel {
        id: Cell::Present(payload.id.clone()),
        name: Cell::Present(payload.name.clone()),
        description: Cell::Present(payload.description.clone()),
        tags: optional_to_cell(payload.tags.clone()),
        input_parameter: parameters_to_state(&payload.input_parameters),
        ..Default::default()
    };

    match &payload.action_type {
        AutomationActionType::Script => {
            model.script = Cell::Present(ScriptModel {
                content: text(payload, SCRIPT_SSH_FIELD),
                interpreter: text(payload, SUBTYPE_FIELD),
                timeout: text(payload, TIMEOUT_FIELD),
                source: text(payload, SCRIPT_SOURCE_FIELD),
            });
        }
        AutomationActionType::Http => model.http = Cell::Present(http_to_state(payload, &mut diags)),
        AutomationActionType::Manual => {
            model.manual = Cell::Present(ManualModel {
                content: text(payload, MANUAL_CONTENT_FIELD),
            });
        }
        AutomationActionType::Jira => {
            let mut jira = JiraModel::default();
            read_strings(payload, &JIRA_FIELDS, jira_cells_mut(&mut jira));
            model.jira = Cell::Present(jira);
        }
        AutomationActionType::GitHub => {
            let mut github = GitHubModel::default();
            read_strings(payload, &GITHUB_FIELDS, github_cells_mut(&mut github));
            model.github = Cell::Present(github);
        }
        AutomationActionType::DocLink => {
            model.doc_link = Cell::Present(DocLinkModel {
                url: text(payload, DOC_LINK_URL_FIELD),
            });
        }
        AutomationActionType::GitLab => {
            let mut gitlab = GitLabModel::default();
            read_strings(payload, &GITLAB_FIELDS, gitlab_cells_mut(&mut gitlab));
            model.gitlab = Cell::Present(gitlab);
        }
        AutomationActionType::Ansible => {
            let mut ansible = AnsibleModel::default();
            read_strings(payload, &ANSIBLE_FIELDS, ansible_cells_mut(&mut ansible));
            model.ansible = Cell::Present(ansible);
        }
        AutomationActionType::Unsupported(other) => {
            diags.add_error(
                ERR_UNSUPPORTED_TYPE,
                format!("Received unsupported automation action of type {other}"),
            );
        }
    }
    diags.into_result(model)
}

fn http_to_state(payload: &AutomationAction, diags: &mut Diagnostics) -> HttpModel {
    HttpModel {
        host: text(payload, HTTP_HOST_FIELD),
        method: text(payload, HTTP_METHOD_FIELD),
        body: text(payload, HTTP_BODY_FIELD),
        headers: headers_to_state(payload.field(HTTP_HEADERS_FIELD), diags),
        ignore_certificate_errors: optional_to_cell(
            payload
                .field(HTTP_IGNORE_CERT_ERRORS_FIELD)
                .map(|v| v.parse::<bool>().unwrap_or(false)),
        ),
        timeout: text(payload, TIMEOUT_FIELD),
        language: text(payload, HTTP_LANGUAGE_FIELD),
        content_type: text(payload, HTTP_CONTENT_TYPE_FIELD),
        auth: auth_to_state(payload.field(HTTP_AUTH_FIELD)),
    }
}

/// Unreadable auth data and `noAuth` both read back as null.
fn auth_to_state(raw: Option<&str>) -> Cell<HttpAuthModel> {
    let Some(data) = raw.and_then(|raw| serde_json::from_str::<Value>(raw).ok()) else {
        return Cell::Null;
    };
    let get = |key: &str| non_empty_string_cell(data.get(key).and_then(Value::as_str));
    let mut auth = HttpAuthModel::default();
    match data.get("type").and_then(Value::as_str) {
        Some(AUTH_TYPE_BASIC) => {
            auth.basic_auth = Cell::Present(BasicAuthModel {
                username: get("username"),
                password: get("password"),
            });
        }
        Some(AUTH_TYPE_BEARER) => {
            auth.token = Cell::Present(BearerTokenModel {
                bearer_token: get("bearerToken"),
            });
        }
        Some(AUTH_TYPE_API_KEY) => {
            auth.api_key = Cell::Present(ApiKeyModel {
                key: get("apiKey"),
                value: get("apiKeyValue"),
                key_location: get("apiKeyAddTo"),
            });
        }
        _ => return Cell::Null,
    }
    Cell::Present(auth)
}

fn headers_to_state(raw: Option<&str>, diags: &mut Diagnostics) -> Cell<BTreeMap<String, String>> {
    let Some(raw) = raw.filter(|raw| *raw != "{}") else {
        return Cell::Null;
    };
    match serde_json::from_str::<serde_json::Map<String, Value>>(raw) {
        Ok(object) if !object.is_empty() => Cell::Present(
            object
                .into_iter()
                .map(|(k, v)| match v {
                    Value::String(s) => (k, s),
                    other => (k, other.to_string()),
                })
                .collect(),
        ),
        Ok(_) => Cell::Null,
        Err(err) => {
            diags.add_error(ERR_INVALID_HEADERS, format!("Failed to unmarshal HTTP headers: {err}"));
            Cell::Null
        }
    }
}

fn parameters_to_state(parameters: &[ActionParameter]) -> Cell<Vec<ParameterModel>> {
    if parameters.is_empty() {
        return Cell::Null;
    }
    Cell::Present(
        parameters
            .iter()
            .map(|p| ParameterModel {
                name: Cell::Present(p.name.clone()),
                label: Cell::Present(p.label.clone()),
                description: Cell::Present(p.description.clone()),
                parameter_type: Cell::Present(p.parameter_type.clone()),
                value: Cell::Present(p.value.clone()),
                required: Cell::Present(p.required),
                hidden: Cell::Present(p.hidden),
            })
            .collect(),
    )
}
