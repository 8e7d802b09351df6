use std::collections::{BTreeMap, BTreeSet};

use instana_core::Cell;
use serde::{Deserialize, Serialize};

use crate::handle::ResourceModel;

/// Declarative alerting channel. Exactly one variant block is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertingChannelModel {
    pub id: Cell<String>,
    pub name: Cell<String>,
    pub email: Cell<EmailModel>,
    pub ops_genie: Cell<OpsGenieModel>,
    pub pager_duty: Cell<PagerDutyModel>,
    pub slack: Cell<SlackModel>,
    pub splunk: Cell<SplunkModel>,
    pub victor_ops: Cell<VictorOpsModel>,
    pub webhook: Cell<WebhookModel>,
    pub office_365: Cell<WebhookUrlModel>,
    pub google_chat: Cell<WebhookUrlModel>,
    pub service_now: Cell<ServiceNowModel>,
    pub service_now_application: Cell<ServiceNowApplicationModel>,
    pub prometheus_webhook: Cell<PrometheusWebhookModel>,
    pub webex_teams_webhook: Cell<WebhookUrlModel>,
    pub watson_aiops_webhook: Cell<WatsonAiopsWebhookModel>,
    pub slack_app: Cell<SlackAppModel>,
    pub ms_teams_app: Cell<MsTeamsAppModel>,
}

impl AlertingChannelModel {
    pub fn named(name: &str) -> Self {
        Self {
            name: Cell::Present(name.to_string()),
            ..Default::default()
        }
    }
}

impl ResourceModel for AlertingChannelModel {
    fn resource_id(&self) -> Option<&str> {
        self.id.as_option().map(String::as_str).filter(|id| !id.is_empty())
    }

    fn set_resource_id(&mut self, id: String) {
        self.id = Cell::Present(id);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailModel {
    pub emails: Cell<BTreeSet<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsGenieModel {
    pub api_key: Cell<String>,
    pub region: Cell<String>,
    pub tags: Cell<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerDutyModel {
    pub service_integration_key: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackModel {
    pub webhook_url: Cell<String>,
    pub icon_url: Cell<String>,
    pub channel: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplunkModel {
    pub url: Cell<String>,
    pub token: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VictorOpsModel {
    pub api_key: Cell<String>,
    pub routing_key: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookModel {
    pub webhook_urls: Cell<BTreeSet<String>>,
    /// Unordered; travels as `"Key: Value"` strings.
    pub http_headers: Cell<BTreeMap<String, String>>,
}

/// Office 365, Google Chat and Webex Teams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookUrlModel {
    pub webhook_url: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrometheusWebhookModel {
    pub webhook_url: Cell<String>,
    pub receiver: Cell<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatsonAiopsWebhookModel {
    pub webhook_url: Cell<String>,
    /// Passed through verbatim.
    pub http_headers: Cell<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceNowModel {
    pub service_now_url: Cell<String>,
    pub username: Cell<String>,
    pub password: Cell<String>,
    pub auto_close_incidents: Cell<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceNowApplicationModel {
    pub service_now_url: Cell<String>,
    pub username: Cell<String>,
    pub password: Cell<String>,
    pub tenant: Cell<String>,
    pub unit: Cell<String>,
    pub auto_close_incidents: Cell<bool>,
    pub instana_url: Cell<String>,
    pub enable_send_instana_notes: Cell<bool>,
    pub enable_send_service_now_activities: Cell<bool>,
    pub enable_send_service_now_work_notes: Cell<bool>,
    pub manually_closed_incidents: Cell<bool>,
    pub resolution_of_incident: Cell<bool>,
    pub snow_status_on_close_event: Cell<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackAppModel {
    pub app_id: Cell<String>,
    pub team_id: Cell<String>,
    pub team_name: Cell<String>,
    pub channel_id: Cell<String>,
    pub channel_name: Cell<String>,
    pub emoji_rendering: Cell<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsTeamsAppModel {
    pub api_token_id: Cell<String>,
    pub team_id: Cell<String>,
    pub team_name: Cell<String>,
    pub channel_id: Cell<String>,
    pub channel_name: Cell<String>,
    pub instana_url: Cell<String>,
    pub service_url: Cell<String>,
    pub tenant_id: Cell<String>,
    pub tenant_name: Cell<String>,
}
