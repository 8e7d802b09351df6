pub const RESOURCE_AUTOMATION_ACTION: &str = "automation_action";

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_TAGS: &str = "tags";
pub const FIELD_INPUT_PARAMETER: &str = "input_parameter";

pub const FIELD_SCRIPT: &str = "script";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_INTERPRETER: &str = "interpreter";
pub const FIELD_TIMEOUT: &str = "timeout";
pub const FIELD_SOURCE: &str = "source";

pub const FIELD_HTTP: &str = "http";
pub const FIELD_HOST: &str = "host";
pub const FIELD_METHOD: &str = "method";
pub const FIELD_BODY: &str = "body";
pub const FIELD_HEADERS: &str = "headers";
pub const FIELD_IGNORE_CERTIFICATE_ERRORS: &str = "ignore_certificate_errors";
pub const FIELD_LANGUAGE: &str = "language";
pub const FIELD_CONTENT_TYPE: &str = "content_type";
pub const FIELD_AUTH: &str = "auth";
pub const FIELD_BASIC_AUTH: &str = "basic_auth";
pub const FIELD_USERNAME: &str = "username";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_TOKEN: &str = "token";
pub const FIELD_BEARER_TOKEN: &str = "bearer_token";
pub const FIELD_API_KEY: &str = "api_key";
pub const FIELD_KEY: &str = "key";
pub const FIELD_VALUE: &str = "value";
pub const FIELD_KEY_LOCATION: &str = "key_location";

pub const FIELD_MANUAL: &str = "manual";
pub const FIELD_JIRA: &str = "jira";
pub const FIELD_GITHUB: &str = "github";
pub const FIELD_DOC_LINK: &str = "doc_link";
pub const FIELD_GITLAB: &str = "gitlab";
pub const FIELD_ANSIBLE: &str = "ansible";
pub const FIELD_URL: &str = "url";

pub const FIELD_PARAMETER_NAME: &str = "name";
pub const FIELD_PARAMETER_LABEL: &str = "label";
pub const FIELD_PARAMETER_DESCRIPTION: &str = "description";
pub const FIELD_PARAMETER_TYPE: &str = "type";
pub const FIELD_PARAMETER_VALUE: &str = "value";
pub const FIELD_PARAMETER_REQUIRED: &str = "required";
pub const FIELD_PARAMETER_HIDDEN: &str = "hidden";

pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];
pub const PARAMETER_TYPES: &[&str] = &["static", "dynamic", "vault"];

/// Every action block, in schema order.
pub const ACTION_FIELDS: &[&str] = &[
    FIELD_SCRIPT,
    FIELD_HTTP,
    FIELD_MANUAL,
    FIELD_JIRA,
    FIELD_GITHUB,
    FIELD_DOC_LINK,
    FIELD_GITLAB,
    FIELD_ANSIBLE,
];

// Values of the wire `authen` field.
pub const AUTH_TYPE_BASIC: &str = "basicAuth";
pub const AUTH_TYPE_BEARER: &str = "bearerToken";
pub const AUTH_TYPE_API_KEY: &str = "apiKey";
pub const AUTH_TYPE_NONE: &str = "noAuth";

// ── diagnostics ─────────────────────────────────────────────────────

pub const ERR_INVALID_CONFIGURATION: &str = "Invalid action configuration";
pub const ERR_INVALID_CONFIGURATION_MSG: &str =
    "Exactly one of script, http, manual, jira, github, doc_link, gitlab or ansible must be configured.";
pub const ERR_INVALID_AUTH: &str = "Invalid auth configuration";
pub const ERR_INVALID_AUTH_MSG: &str = "At most one of basic_auth, token or api_key may be configured.";
pub const ERR_UNSUPPORTED_TYPE: &str = "Unsupported automation action type";
pub const ERR_INVALID_HEADERS: &str = "Error unmarshaling HTTP headers";

// ── descriptions ────────────────────────────────────────────────────

pub const DESC_RESOURCE: &str = "This resource manages automation actions in Instana.";
