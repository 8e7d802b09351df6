//! Lookups by name against the in-memory backend.

use std::sync::Arc;

use async_trait::async_trait;

use instana_core::diagnostics::CANCELED_SUMMARY;
use instana_core::{CancellationToken, Cell};
use instana_resources::data_source::{
    ERR_ACTION_NOT_FOUND, ERR_CHANNEL_NOT_FOUND, ERR_READING_CHANNELS,
};
use instana_resources::{lookup_alerting_channel, lookup_automation_action};
use instana_restapi::{
    ActionField, AlertingChannel, AlertingChannelKind, AutomationAction, AutomationActionType,
    ChannelFields, InMemoryApi, InstanaApi, MobileAlertConfig, RestError, RestResource,
};

fn channel(name: &str, kind: AlertingChannelKind, fields: ChannelFields) -> AlertingChannel {
    AlertingChannel::new(name, kind, fields)
}

async fn seeded() -> InMemoryApi {
    let api = InMemoryApi::new();
    let channels = api.alerting_channels();
    channels
        .create(&channel(
            "team-slack",
            AlertingChannelKind::Slack,
            ChannelFields {
                webhook_url: Some("https://hooks.slack/x".into()),
                ..Default::default()
            },
        ))
        .await
        .unwrap();
    channels
        .create(&channel(
            "snow",
            AlertingChannelKind::ServiceNow,
            ChannelFields {
                service_now_url: Some("https://snow.example".into()),
                username: Some("svc".into()),
                password: Some("hunter2".into()),
                ..Default::default()
            },
        ))
        .await
        .unwrap();
    api.automation_actions()
        .create(&AutomationAction {
            id: String::new(),
            name: "runbook".into(),
            description: "open the runbook".into(),
            action_type: AutomationActionType::DocLink,
            tags: None,
            fields: vec![ActionField::new("url", "", "https://runbooks.example", "UTF8")],
            input_parameters: Vec::new(),
        })
        .await
        .unwrap();
    api
}

#[tokio::test]
async fn finds_channel_by_exact_name() {
    let api = seeded().await;
    let model = lookup_alerting_channel(&api, "team-slack", &CancellationToken::new())
        .await
        .unwrap();
    assert!(model.id.is_present());
    assert_eq!(model.name, Cell::Present("team-slack".to_string()));
    let slack = model.slack.as_option().unwrap();
    assert_eq!(slack.webhook_url, Cell::Present("https://hooks.slack/x".to_string()));
    assert!(model.service_now.is_null());
}

#[tokio::test]
async fn looked_up_password_is_null_when_not_returned() {
    let api = seeded().await;
    let model = lookup_alerting_channel(&api, "snow", &CancellationToken::new())
        .await
        .unwrap();
    let snow = model.service_now.as_option().unwrap();
    assert!(snow.password.is_null());
    assert_eq!(snow.username, Cell::Present("svc".to_string()));
}

#[tokio::test]
async fn unknown_channel_name_is_not_found() {
    let api = seeded().await;
    let err = lookup_alerting_channel(&api, "Team-Slack", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.contains_summary(ERR_CHANNEL_NOT_FOUND));
    assert!(err.to_string().contains("No alerting channel found with name: Team-Slack"));
}

#[tokio::test]
async fn finds_action_by_name_and_type_ignoring_case() {
    let api = seeded().await;
    let cancel = CancellationToken::new();
    let model = lookup_automation_action(&api, "runbook", "doc_link", &cancel)
        .await
        .unwrap();
    assert_eq!(
        model.doc_link.as_option().unwrap().url,
        Cell::Present("https://runbooks.example".to_string())
    );

    let err = lookup_automation_action(&api, "runbook", "SCRIPT", &cancel)
        .await
        .unwrap_err();
    assert!(err.contains_summary(ERR_ACTION_NOT_FOUND));
}

#[tokio::test]
async fn canceled_lookup_lists_nothing() {
    let api = seeded().await;
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = lookup_alerting_channel(&api, "snow", &cancel).await.unwrap_err();
    assert!(err.contains_summary(CANCELED_SUMMARY));
}

struct FailingChannels;

#[async_trait]
impl RestResource<AlertingChannel> for FailingChannels {
    async fn get_all(&self) -> Result<Vec<AlertingChannel>, RestError> {
        Err(RestError::Api {
            status: 503,
            body: "unavailable".into(),
        })
    }

    async fn get(&self, _id: &str) -> Result<AlertingChannel, RestError> {
        unreachable!("lookups only list")
    }

    async fn create(&self, _data: &AlertingChannel) -> Result<AlertingChannel, RestError> {
        unreachable!("lookups only list")
    }

    async fn update(&self, _data: &AlertingChannel) -> Result<AlertingChannel, RestError> {
        unreachable!("lookups only list")
    }

    async fn delete(&self, _id: &str) -> Result<(), RestError> {
        unreachable!("lookups only list")
    }
}

struct FailingApi(InMemoryApi);

impl InstanaApi for FailingApi {
    fn alerting_channels(&self) -> Arc<dyn RestResource<AlertingChannel>> {
        Arc::new(FailingChannels)
    }

    fn mobile_alert_configs(&self) -> Arc<dyn RestResource<MobileAlertConfig>> {
        self.0.mobile_alert_configs()
    }

    fn automation_actions(&self) -> Arc<dyn RestResource<AutomationAction>> {
        self.0.automation_actions()
    }
}

#[tokio::test]
async fn listing_failure_is_reported() {
    let api = FailingApi(InMemoryApi::new());
    let err = lookup_alerting_channel(&api, "snow", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.contains_summary(ERR_READING_CHANNELS));
    assert!(err.to_string().contains("Could not read alerting channels"), "{err}");
}
