pub const RESOURCE_ALERTING_CHANNEL: &str = "alerting_channel";

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_EMAILS: &str = "emails";
pub const FIELD_OPS_GENIE: &str = "ops_genie";
pub const FIELD_API_KEY: &str = "api_key";
pub const FIELD_TAGS: &str = "tags";
pub const FIELD_REGION: &str = "region";
pub const FIELD_PAGER_DUTY: &str = "pager_duty";
pub const FIELD_SERVICE_INTEGRATION_KEY: &str = "service_integration_key";
pub const FIELD_SLACK: &str = "slack";
pub const FIELD_WEBHOOK_URL: &str = "webhook_url";
pub const FIELD_ICON_URL: &str = "icon_url";
pub const FIELD_CHANNEL: &str = "channel";
pub const FIELD_SPLUNK: &str = "splunk";
pub const FIELD_URL: &str = "url";
pub const FIELD_TOKEN: &str = "token";
pub const FIELD_VICTOR_OPS: &str = "victor_ops";
pub const FIELD_ROUTING_KEY: &str = "routing_key";
pub const FIELD_WEBHOOK: &str = "webhook";
pub const FIELD_WEBHOOK_URLS: &str = "webhook_urls";
pub const FIELD_HTTP_HEADERS: &str = "http_headers";
pub const FIELD_OFFICE_365: &str = "office_365";
pub const FIELD_GOOGLE_CHAT: &str = "google_chat";
pub const FIELD_SERVICE_NOW: &str = "service_now";
pub const FIELD_SERVICE_NOW_URL: &str = "service_now_url";
pub const FIELD_USERNAME: &str = "username";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_AUTO_CLOSE_INCIDENTS: &str = "auto_close_incidents";
pub const FIELD_SERVICE_NOW_APPLICATION: &str = "service_now_application";
pub const FIELD_TENANT: &str = "tenant";
pub const FIELD_UNIT: &str = "unit";
pub const FIELD_INSTANA_URL: &str = "instana_url";
pub const FIELD_ENABLE_SEND_INSTANA_NOTES: &str = "enable_send_instana_notes";
pub const FIELD_ENABLE_SEND_SERVICE_NOW_ACTIVITIES: &str = "enable_send_service_now_activities";
pub const FIELD_ENABLE_SEND_SERVICE_NOW_WORK_NOTES: &str = "enable_send_service_now_work_notes";
pub const FIELD_MANUALLY_CLOSED_INCIDENTS: &str = "manually_closed_incidents";
pub const FIELD_RESOLUTION_OF_INCIDENT: &str = "resolution_of_incident";
pub const FIELD_SNOW_STATUS_ON_CLOSE_EVENT: &str = "snow_status_on_close_event";
pub const FIELD_PROMETHEUS_WEBHOOK: &str = "prometheus_webhook";
pub const FIELD_RECEIVER: &str = "receiver";
pub const FIELD_WEBEX_TEAMS_WEBHOOK: &str = "webex_teams_webhook";
pub const FIELD_WATSON_AIOPS_WEBHOOK: &str = "watson_aiops_webhook";
pub const FIELD_SLACK_APP: &str = "slack_app";
pub const FIELD_APP_ID: &str = "app_id";
pub const FIELD_TEAM_ID: &str = "team_id";
pub const FIELD_TEAM_NAME: &str = "team_name";
pub const FIELD_CHANNEL_ID: &str = "channel_id";
pub const FIELD_CHANNEL_NAME: &str = "channel_name";
pub const FIELD_EMOJI_RENDERING: &str = "emoji_rendering";
pub const FIELD_MS_TEAMS_APP: &str = "ms_teams_app";
pub const FIELD_API_TOKEN_ID: &str = "api_token_id";
pub const FIELD_SERVICE_URL: &str = "service_url";
pub const FIELD_TENANT_ID: &str = "tenant_id";
pub const FIELD_TENANT_NAME: &str = "tenant_name";

pub const OPS_GENIE_REGION_EU: &str = "EU";
pub const OPS_GENIE_REGION_US: &str = "US";
pub const OPS_GENIE_REGIONS: &[&str] = &[OPS_GENIE_REGION_EU, OPS_GENIE_REGION_US];

/// Every variant block, in schema order.
pub const VARIANT_FIELDS: &[&str] = &[
    FIELD_EMAIL,
    FIELD_OPS_GENIE,
    FIELD_PAGER_DUTY,
    FIELD_SLACK,
    FIELD_SPLUNK,
    FIELD_VICTOR_OPS,
    FIELD_WEBHOOK,
    FIELD_OFFICE_365,
    FIELD_GOOGLE_CHAT,
    FIELD_SERVICE_NOW,
    FIELD_SERVICE_NOW_APPLICATION,
    FIELD_PROMETHEUS_WEBHOOK,
    FIELD_WEBEX_TEAMS_WEBHOOK,
    FIELD_WATSON_AIOPS_WEBHOOK,
    FIELD_SLACK_APP,
    FIELD_MS_TEAMS_APP,
];

// ── diagnostics ─────────────────────────────────────────────────────

pub const ERR_INVALID_CONFIGURATION: &str = "Invalid Alerting Channel Configuration";
pub const ERR_INVALID_CONFIGURATION_MSG: &str =
    "No valid alerting channel configuration found. Please configure exactly one channel type.";
pub const ERR_UNSUPPORTED_TYPE: &str = "Unsupported alerting channel type";
pub const ERR_MISSING_PASSWORD: &str = "Missing Password";
pub const ERR_MISSING_PASSWORD_MSG: &str = "password must be specified when creating the resource";
pub const ERR_INSTANA_URL_REQUIRED: &str = "InstanaURL is required";
pub const ERR_INSTANA_URL_REQUIRED_MSG: &str = "InstanaURL is required when creating the resource";

// ── descriptions ────────────────────────────────────────────────────

pub const DESC_RESOURCE: &str = "This resource manages alerting channels in Instana.";
pub const DESC_ID: &str = "The ID of the alerting channel.";
pub const DESC_NAME: &str = "Configures the name of the alerting channel";
