//! Host schema for `automation_action`.

use instana_core::schema::{Attribute, AttributeKind, ResourceSchema};

use super::constants::*;

pub const SCHEMA_VERSION: i64 = 0;

fn string() -> AttributeKind {
    AttributeKind::String
}

fn block(name: &str, description: &str, children: Vec<Attribute>) -> Attribute {
    Attribute::optional(name, AttributeKind::Object(children), description)
}

/// Optional string attributes described as `"The {what} {item}."`.
fn optional_strings(what: &str, items: &[(&str, &str)]) -> Vec<Attribute> {
    items
        .iter()
        .map(|(name, item)| Attribute::optional(*name, string(), format!("The {what} {item}.")))
        .collect()
}

fn auth_block() -> Attribute {
    block(FIELD_AUTH, "Authentication configuration for the HTTP request.", vec![
        block(FIELD_BASIC_AUTH, "Basic authentication configuration.", vec![
            Attribute::required(FIELD_USERNAME, string(), "The username for basic authentication."),
            Attribute::required(FIELD_PASSWORD, string(), "The password for basic authentication.").sensitive(),
        ]),
        block(FIELD_TOKEN, "Bearer token authentication configuration.", vec![Attribute::required(
            FIELD_BEARER_TOKEN,
            string(),
            "The bearer token for authentication.",
        )
        .sensitive()]),
        block(FIELD_API_KEY, "API key authentication configuration.", vec![
            Attribute::required(FIELD_KEY, string(), "The API key name."),
            Attribute::required(FIELD_VALUE, string(), "The API key value.").sensitive(),
            Attribute::required(FIELD_KEY_LOCATION, string(), "Where to add the API key (header or query)."),
        ]),
    ])
}

fn input_parameter() -> Attribute {
    Attribute::optional(
        FIELD_INPUT_PARAMETER,
        AttributeKind::ObjectList(vec![
            Attribute::required(FIELD_PARAMETER_NAME, string(), "The name of the parameter."),
            Attribute::required(FIELD_PARAMETER_DESCRIPTION, string(), "The description of the parameter."),
            Attribute::required(FIELD_PARAMETER_LABEL, string(), "The label of the parameter."),
            Attribute::required(FIELD_PARAMETER_REQUIRED, AttributeKind::Bool, "Whether the parameter is required."),
            Attribute::required(FIELD_PARAMETER_HIDDEN, AttributeKind::Bool, "Whether the parameter is hidden."),
            Attribute::required(FIELD_PARAMETER_TYPE, string(), "The type of the parameter.").one_of(PARAMETER_TYPES),
            Attribute::required(FIELD_PARAMETER_VALUE, string(), "The value of the parameter."),
        ]),
        "Input parameters for the automation action.",
    )
}

pub fn automation_action_schema() -> ResourceSchema {
    let mut script = vec![Attribute::required(FIELD_CONTENT, string(), "The script content.")];
    script.extend(optional_strings("script", &[
        (FIELD_INTERPRETER, "interpreter"),
        (FIELD_TIMEOUT, "timeout in seconds"),
        (FIELD_SOURCE, "source"),
    ]));

    let mut http = vec![
        Attribute::required(FIELD_HOST, string(), "The URL of the HTTP request."),
        Attribute::required(FIELD_METHOD, string(), "The HTTP method.").one_of(HTTP_METHODS),
        Attribute::optional(FIELD_BODY, string(), "The body of the HTTP request."),
        Attribute::optional(
            FIELD_HEADERS,
            AttributeKind::Map(Box::new(string())),
            "The headers of the HTTP request.",
        ),
        Attribute::optional(
            FIELD_IGNORE_CERTIFICATE_ERRORS,
            AttributeKind::Bool,
            "Whether to ignore certificate errors for the request.",
        ),
    ];
    http.extend(optional_strings("HTTP request", &[
        (FIELD_TIMEOUT, "timeout in seconds"),
        (FIELD_LANGUAGE, "language"),
        (FIELD_CONTENT_TYPE, "content type"),
    ]));
    http.push(auth_block());

    ResourceSchema {
        type_name: RESOURCE_AUTOMATION_ACTION.to_string(),
        description: DESC_RESOURCE.to_string(),
        version: SCHEMA_VERSION,
        attributes: vec![
            Attribute::computed(FIELD_ID, string(), "The ID of the automation action."),
            Attribute::required(FIELD_NAME, string(), "The name of the automation action."),
            Attribute::required(FIELD_DESCRIPTION, string(), "The description of the automation action."),
            Attribute::optional(
                FIELD_TAGS,
                AttributeKind::List(Box::new(string())),
                "The tags of the automation action.",
            ),
            block(FIELD_SCRIPT, "Script configuration for the automation action.", script),
            block(FIELD_HTTP, "HTTP configuration for the automation action.", http),
            block(FIELD_MANUAL, "Manual action configuration.", vec![Attribute::required(
                FIELD_CONTENT,
                string(),
                "The content for the manual action.",
            )]),
            block(FIELD_JIRA, "Jira action configuration.", optional_strings("Jira", &[
                ("project", "project"),
                ("operation", "operation type"),
                ("issue_type", "issue type"),
                ("description", "issue description"),
                ("assignee", "issue assignee"),
                ("title", "issue title"),
                ("labels", "issue labels"),
                ("comment", "issue comment"),
            ])),
            block(FIELD_GITHUB, "GitHub action configuration.", optional_strings("GitHub", &[
                ("owner", "repository owner"),
                ("repo", "repository name"),
                ("title", "issue title"),
                ("body", "issue body"),
                ("operation", "operation type"),
                ("assignees", "issue assignees"),
                ("labels", "issue labels"),
                ("comment", "issue comment"),
            ])),
            block(FIELD_DOC_LINK, "Documentation link action configuration.", vec![Attribute::required(
                FIELD_URL,
                string(),
                "The URL to the documentation.",
            )]),
            block(FIELD_GITLAB, "GitLab action configuration.", optional_strings("GitLab", &[
                ("project_id", "project ID"),
                ("title", "issue title"),
                ("description", "issue description"),
                ("operation", "operation type"),
                ("labels", "issue labels"),
                ("issue_type", "issue type"),
                ("comment", "issue comment"),
            ])),
            block(FIELD_ANSIBLE, "Ansible action configuration.", optional_strings("Ansible", &[
                ("workflow_id", "workflow ID"),
                ("playbook_id", "playbook ID"),
                ("playbook_file_name", "playbook file name"),
                ("url", "URL"),
                ("host_id", "host ID the action is created from"),
            ])),
            input_parameter(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_block_is_an_optional_object() {
        let schema = automation_action_schema();
        for field in ACTION_FIELDS {
            let attr = schema.attribute(field).unwrap();
            assert!(matches!(attr.kind, AttributeKind::Object(_)), "{field}");
        }
    }

    #[test]
    fn credentials_are_sensitive() {
        let schema = automation_action_schema();
        for path in [
            "http.auth.basic_auth.password",
            "http.auth.token.bearer_token",
            "http.auth.api_key.value",
        ] {
            assert!(schema.resolve(path).unwrap().sensitive, "{path}");
        }
        assert!(!schema.resolve("http.auth.basic_auth.username").unwrap().sensitive);
    }
}
