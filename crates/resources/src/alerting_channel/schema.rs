//! Host schema for `alerting_channel`.
//!
//! Every variant is an optional nested block; "exactly one" is enforced by
//! the mapper, not by the schema.

use instana_core::schema::{Attribute, AttributeKind, ResourceSchema};

use super::constants::*;

pub const SCHEMA_VERSION: i64 = 1;

fn string() -> AttributeKind {
    AttributeKind::String
}

fn block(name: &str, description: &str, children: Vec<Attribute>) -> Attribute {
    Attribute::optional(name, AttributeKind::Object(children), description)
}

fn webhook_url(channel: &str) -> Attribute {
    Attribute::required(
        FIELD_WEBHOOK_URL,
        string(),
        format!("The webhook URL of the {channel} alerting channel"),
    )
}

fn app_channel_fields(channel: &str) -> Vec<Attribute> {
    vec![
        Attribute::required(FIELD_TEAM_ID, string(), format!("The team ID of the {channel} alerting channel")),
        Attribute::required(FIELD_TEAM_NAME, string(), format!("The team name of the {channel} alerting channel")),
        Attribute::required(FIELD_CHANNEL_ID, string(), format!("The channel ID of the {channel} alerting channel")),
        Attribute::required(FIELD_CHANNEL_NAME, string(), format!("The channel name of the {channel} alerting channel")),
    ]
}

pub fn alerting_channel_schema() -> ResourceSchema {
    let bool_flag = |name: &str, description: &str| Attribute::optional(name, AttributeKind::Bool, description);

    let mut slack_app = vec![Attribute::required(
        FIELD_APP_ID,
        string(),
        "The app ID of the Slack app alerting channel",
    )];
    slack_app.extend(app_channel_fields("Slack app"));
    slack_app.push(bool_flag(FIELD_EMOJI_RENDERING, "Whether emoji rendering is enabled"));

    let mut ms_teams_app = vec![Attribute::required(
        FIELD_API_TOKEN_ID,
        string(),
        "The API token ID of the MS Teams app alerting channel",
    )];
    ms_teams_app.extend(app_channel_fields("MS Teams app"));
    ms_teams_app.extend([
        Attribute::required(FIELD_INSTANA_URL, string(), "The Instana URL linked from MS Teams messages"),
        Attribute::required(FIELD_SERVICE_URL, string(), "The service URL of the MS Teams app alerting channel"),
        Attribute::required(FIELD_TENANT_ID, string(), "The tenant ID of the MS Teams app alerting channel"),
        Attribute::required(FIELD_TENANT_NAME, string(), "The tenant name of the MS Teams app alerting channel"),
    ]);

    let service_now_credentials = |channel: &str| {
        vec![
            Attribute::required(FIELD_SERVICE_NOW_URL, string(), format!("The ServiceNow URL of the {channel} alerting channel")),
            Attribute::required(FIELD_USERNAME, string(), format!("The username of the {channel} alerting channel")),
            Attribute::required(FIELD_PASSWORD, string(), format!("The password of the {channel} alerting channel")).sensitive(),
        ]
    };

    let mut service_now = service_now_credentials("ServiceNow");
    service_now.push(bool_flag(
        FIELD_AUTO_CLOSE_INCIDENTS,
        "Whether to automatically close incidents when alerts are resolved",
    ));

    let mut service_now_application = service_now_credentials("ServiceNow ITSM (Enhanced)");
    service_now_application.extend([
        Attribute::required(FIELD_TENANT, string(), "The tenant of the ServiceNow ITSM (Enhanced) alerting channel"),
        Attribute::required(FIELD_UNIT, string(), "The unit of the ServiceNow ITSM (Enhanced) alerting channel"),
        bool_flag(FIELD_AUTO_CLOSE_INCIDENTS, "Whether to automatically close incidents when alerts are resolved"),
        Attribute::required(FIELD_INSTANA_URL, string(), "The Instana URL of the ServiceNow ITSM (Enhanced) alerting channel"),
        bool_flag(FIELD_ENABLE_SEND_INSTANA_NOTES, "Whether to enable sending Instana notes"),
        bool_flag(FIELD_ENABLE_SEND_SERVICE_NOW_ACTIVITIES, "Whether to enable sending ServiceNow activities"),
        bool_flag(FIELD_ENABLE_SEND_SERVICE_NOW_WORK_NOTES, "Whether to enable sending ServiceNow work notes"),
        bool_flag(FIELD_MANUALLY_CLOSED_INCIDENTS, "Whether incidents are manually closed"),
        bool_flag(FIELD_RESOLUTION_OF_INCIDENT, "The resolution of incident"),
        Attribute::optional(FIELD_SNOW_STATUS_ON_CLOSE_EVENT, AttributeKind::Int64, "The ServiceNow status on close event"),
    ]);

    ResourceSchema {
        type_name: RESOURCE_ALERTING_CHANNEL.to_string(),
        description: DESC_RESOURCE.to_string(),
        version: SCHEMA_VERSION,
        attributes: vec![
            Attribute::computed(FIELD_ID, string(), DESC_ID),
            Attribute::required(FIELD_NAME, string(), DESC_NAME),
            block(FIELD_EMAIL, "The configuration of the Email channel", vec![Attribute::required(
                FIELD_EMAILS,
                AttributeKind::Set(Box::new(string())),
                "The list of emails of the Email alerting channel",
            )]),
            block(FIELD_OPS_GENIE, "The configuration of the Ops Genie channel", vec![
                Attribute::required(FIELD_API_KEY, string(), "The OpsGenie API Key of the OpsGenie alerting channel").sensitive(),
                Attribute::required(FIELD_REGION, string(), "The OpsGenie region of the OpsGenie alerting channel")
                    .one_of(OPS_GENIE_REGIONS),
                Attribute::required(
                    FIELD_TAGS,
                    AttributeKind::List(Box::new(string())),
                    "The OpsGenie tags of the OpsGenie alerting channel",
                ),
            ]),
            block(FIELD_PAGER_DUTY, "The configuration of the Pager Duty channel", vec![Attribute::required(
                FIELD_SERVICE_INTEGRATION_KEY,
                string(),
                "The Service Integration Key of the PagerDuty alerting channel",
            )
            .sensitive()]),
            block(FIELD_SLACK, "The configuration of the Slack channel", vec![
                webhook_url("Slack"),
                Attribute::optional(FIELD_ICON_URL, string(), "The icon URL of the Slack alerting channel"),
                Attribute::optional(FIELD_CHANNEL, string(), "The Slack channel of the Slack alerting channel"),
            ]),
            block(FIELD_SPLUNK, "The configuration of the Splunk channel", vec![
                Attribute::required(FIELD_URL, string(), "The URL of the Splunk alerting channel"),
                Attribute::required(FIELD_TOKEN, string(), "The token of the Splunk alerting channel").sensitive(),
            ]),
            block(FIELD_VICTOR_OPS, "The configuration of the VictorOps channel", vec![
                Attribute::required(FIELD_API_KEY, string(), "The API Key of the VictorOps alerting channel").sensitive(),
                Attribute::required(FIELD_ROUTING_KEY, string(), "The Routing Key of the VictorOps alerting channel"),
            ]),
            block(FIELD_WEBHOOK, "The configuration of the Webhook channel", vec![
                Attribute::required(
                    FIELD_WEBHOOK_URLS,
                    AttributeKind::Set(Box::new(string())),
                    "The list of webhook urls of the Webhook alerting channel",
                ),
                Attribute::optional(
                    FIELD_HTTP_HEADERS,
                    AttributeKind::Map(Box::new(string())),
                    "The optional map of HTTP headers of the Webhook alerting channel",
                ),
            ]),
            block(FIELD_OFFICE_365, "The configuration of the Office 365 channel", vec![webhook_url("Office 365")]),
            block(FIELD_GOOGLE_CHAT, "The configuration of the Google Chat channel", vec![webhook_url("Google Chat")]),
            block(FIELD_SERVICE_NOW, "The configuration of the ServiceNow channel", service_now),
            block(
                FIELD_SERVICE_NOW_APPLICATION,
                "The configuration of the ServiceNow ITSM (Enhanced) channel",
                service_now_application,
            ),
            block(FIELD_PROMETHEUS_WEBHOOK, "The configuration of the Prometheus Webhook channel", vec![
                webhook_url("Prometheus Webhook"),
                Attribute::optional(FIELD_RECEIVER, string(), "The receiver of the Prometheus Webhook alerting channel"),
            ]),
            block(
                FIELD_WEBEX_TEAMS_WEBHOOK,
                "The configuration of the Webex Teams Webhook channel",
                vec![webhook_url("Webex Teams Webhook")],
            ),
            block(FIELD_WATSON_AIOPS_WEBHOOK, "The configuration of the IBM Cloud Pak (Watson AIOps) Webhook channel", vec![
                webhook_url("Watson AIOps Webhook"),
                Attribute::optional(
                    FIELD_HTTP_HEADERS,
                    AttributeKind::List(Box::new(string())),
                    "The list of HTTP headers for the Watson AIOps Webhook alerting channel",
                ),
            ]),
            block(FIELD_SLACK_APP, "The configuration of the bidirectional Slack app channel", slack_app),
            block(FIELD_MS_TEAMS_APP, "The configuration of the bidirectional MS Teams app channel", ms_teams_app),
        ],
    }
}
