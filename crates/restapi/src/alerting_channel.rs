//! Alerting channel payload.
//!
//! The API encodes the channel variant in `kind` and carries every
//! variant-specific attribute as an optional sibling field on one flat record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::InstanaDataObject;

pub const ALERTING_CHANNELS_PATH: &str = "/api/events/settings/alertingChannels";

/// The `kind` discriminant. Unrecognized kinds are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertingChannelKind {
    Email,
    OpsGenie,
    PagerDuty,
    Slack,
    Splunk,
    VictorOps,
    Webhook,
    Office365,
    GoogleChat,
    ServiceNow,
    ServiceNowApplication,
    PrometheusWebhook,
    WebexTeamsWebhook,
    WatsonAiopsWebhook,
    SlackApp,
    MsTeamsApp,
    Unsupported(String),
}

impl AlertingChannelKind {
    pub fn as_str(&self) -> &str {
        match self {
            AlertingChannelKind::Email => "EMAIL",
            AlertingChannelKind::OpsGenie => "OPS_GENIE",
            AlertingChannelKind::PagerDuty => "PAGER_DUTY",
            AlertingChannelKind::Slack => "SLACK",
            AlertingChannelKind::Splunk => "SPLUNK",
            AlertingChannelKind::VictorOps => "VICTOR_OPS",
            AlertingChannelKind::Webhook => "WEB_HOOK",
            AlertingChannelKind::Office365 => "OFFICE_365",
            AlertingChannelKind::GoogleChat => "GOOGLE_CHAT",
            AlertingChannelKind::ServiceNow => "SERVICE_NOW_WEBHOOK",
            AlertingChannelKind::ServiceNowApplication => "SERVICE_NOW_APPLICATION",
            AlertingChannelKind::PrometheusWebhook => "PROMETHEUS_WEBHOOK",
            AlertingChannelKind::WebexTeamsWebhook => "WEBEX_TEAMS_WEBHOOK",
            AlertingChannelKind::WatsonAiopsWebhook => "WATSON_AIOPS_WEBHOOK",
            AlertingChannelKind::SlackApp => "BIDIRECTIONAL_SLACK",
            AlertingChannelKind::MsTeamsApp => "BIDIRECTIONAL_MS_TEAMS",
            AlertingChannelKind::Unsupported(other) => other,
        }
    }
}

impl From<String> for AlertingChannelKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "EMAIL" => AlertingChannelKind::Email,
            "OPS_GENIE" => AlertingChannelKind::OpsGenie,
            "PAGER_DUTY" => AlertingChannelKind::PagerDuty,
            "SLACK" => AlertingChannelKind::Slack,
            "SPLUNK" => AlertingChannelKind::Splunk,
            "VICTOR_OPS" => AlertingChannelKind::VictorOps,
            "WEB_HOOK" => AlertingChannelKind::Webhook,
            "OFFICE_365" => AlertingChannelKind::Office365,
            "GOOGLE_CHAT" => AlertingChannelKind::GoogleChat,
            "SERVICE_NOW_WEBHOOK" => AlertingChannelKind::ServiceNow,
            "SERVICE_NOW_APPLICATION" => AlertingChannelKind::ServiceNowApplication,
            "PROMETHEUS_WEBHOOK" => AlertingChannelKind::PrometheusWebhook,
            "WEBEX_TEAMS_WEBHOOK" => AlertingChannelKind::WebexTeamsWebhook,
            "WATSON_AIOPS_WEBHOOK" => AlertingChannelKind::WatsonAiopsWebhook,
            "BIDIRECTIONAL_SLACK" => AlertingChannelKind::SlackApp,
            "BIDIRECTIONAL_MS_TEAMS" => AlertingChannelKind::MsTeamsApp,
            _ => AlertingChannelKind::Unsupported(value),
        }
    }
}

impl From<AlertingChannelKind> for String {
    fn from(value: AlertingChannelKind) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AlertingChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertingChannel {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub kind: AlertingChannelKind,
    #[serde(flatten)]
    pub fields: ChannelFields,
}

/// Variant-specific attributes; absent ones travel as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelFields {
    pub emails: Option<Vec<String>>,
    pub webhook_url: Option<String>,
    pub api_key: Option<String>,
    /// Comma-separated.
    pub tags: Option<String>,
    pub region: Option<String>,
    pub routing_key: Option<String>,
    pub service_integration_key: Option<String>,
    pub icon_url: Option<String>,
    pub channel: Option<String>,
    pub url: Option<String>,
    pub token: Option<String>,
    pub webhook_urls: Option<Vec<String>>,
    /// `"Key: Value"` entries.
    pub headers: Option<Vec<String>>,

    // ServiceNow
    pub service_now_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub auto_close_incidents: Option<bool>,

    // ServiceNow application (ITSM)
    pub tenant: Option<String>,
    pub unit: Option<String>,
    pub instana_url: Option<String>,
    pub enable_send_instana_notes: Option<bool>,
    pub enable_send_service_now_activities: Option<bool>,
    pub enable_send_service_now_work_notes: Option<bool>,
    pub manually_closed_incidents: Option<bool>,
    pub resolution_of_incident: Option<bool>,
    pub snow_status_on_close_event: Option<i64>,

    // Prometheus
    pub receiver: Option<String>,

    // Bidirectional Slack
    pub app_id: Option<String>,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub channel_id: Option<String>,
    pub channel_name: Option<String>,
    pub emoji_rendering: Option<bool>,

    // Bidirectional MS Teams
    pub api_token_id: Option<String>,
    pub service_url: Option<String>,
    pub tenant_id: Option<String>,
    pub tenant_name: Option<String>,
}

impl AlertingChannel {
    pub fn new(name: impl Into<String>, kind: AlertingChannelKind, fields: ChannelFields) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            kind,
            fields,
        }
    }
}

impl InstanaDataObject for AlertingChannel {
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
    fn kind_round_trips_through_strings() {
        for kind in [
            AlertingChannelKind::Email,
            AlertingChannelKind::Webhook,
            AlertingChannelKind::ServiceNow,
            AlertingChannelKind::SlackApp,
            AlertingChannelKind::MsTeamsApp,
        ] {
            assert_eq!(AlertingChannelKind::from(kind.to_string()), kind);
        }
        assert_eq!(
            AlertingChannelKind::from("CARRIER_PIGEON".to_string()),
            AlertingChannelKind::Unsupported("CARRIER_PIGEON".into())
        );
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let channel = AlertingChannel::new(
            "alerts",
            AlertingChannelKind::Slack,
            ChannelFields {
                webhook_url: Some("https://hooks.slack/x".into()),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&channel).unwrap();
        assert_eq!(json["kind"], "SLACK");
        assert_eq!(json["webhookUrl"], "https://hooks.slack/x");
        assert!(json["iconUrl"].is_null());
        assert!(json["channel"].is_null());
        assert!(json.get("iconUrl").is_some());
    }

    #[test]
    fn read_without_password_deserializes() {
        let channel: AlertingChannel = serde_json::from_str(
            r#"{"id":"c1","name":"snow","kind":"SERVICE_NOW_WEBHOOK","serviceNowUrl":"https://snow","username":"u"}"#,
        )
        .unwrap();
        assert_eq!(channel.kind, AlertingChannelKind::ServiceNow);
        assert_eq!(channel.fields.username.as_deref(), Some("u"));
        assert!(channel.fields.password.is_none());
    }
}
