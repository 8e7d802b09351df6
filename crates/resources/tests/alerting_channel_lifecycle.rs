//! Alerting channel lifecycle against the in-memory backend.
//!
//! Covers the state machine walk, password preservation across reads,
//! transport failures and host cancellation.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use instana_core::diagnostics::CANCELED_SUMMARY;
use instana_core::{CancellationToken, Cell};
use instana_resources::alerting_channel::constants::ERR_INVALID_CONFIGURATION;
use instana_resources::alerting_channel::{ServiceNowModel, SlackModel, WebhookModel};
use instana_resources::lifecycle::MISSING_ID_SUMMARY;
use instana_resources::{
    AlertingChannelModel, AlertingChannelResource, LifecycleState, ResourceDriver, ResourceModel,
};
use instana_restapi::{
    AlertingChannel, AutomationAction, InMemoryApi, InstanaApi, MobileAlertConfig, RestError,
    RestResource,
};

fn s(value: &str) -> Cell<String> {
    Cell::Present(value.to_string())
}

fn slack_plan(channel: Option<&str>) -> AlertingChannelModel {
    AlertingChannelModel {
        slack: Cell::Present(SlackModel {
            webhook_url: s("https://hooks.slack/x"),
            icon_url: Cell::Null,
            channel: channel.map(|c| c.to_string()).into(),
        }),
        ..AlertingChannelModel::named("alerts")
    }
}

fn service_now_plan() -> AlertingChannelModel {
    AlertingChannelModel {
        service_now: Cell::Present(ServiceNowModel {
            service_now_url: s("https://snow.example.com"),
            username: s("svc"),
            password: s("secret"),
            auto_close_incidents: Cell::Present(true),
        }),
        ..AlertingChannelModel::named("snow")
    }
}

#[tokio::test]
async fn slack_channel_walks_the_lifecycle() {
    let api = InMemoryApi::new();
    let cancel = CancellationToken::new();
    let mut driver = ResourceDriver::new(AlertingChannelResource::new());
    assert_eq!(driver.state(), LifecycleState::Absent);

    let created = driver.create(&api, &slack_plan(None), &cancel).await.unwrap();
    assert_eq!(driver.state(), LifecycleState::Present);
    let id = created.resource_id().unwrap().to_string();
    assert_eq!(api.alerting_channels.len().await, 1);
    assert!(created.slack.as_option().unwrap().channel.is_null());

    let read = driver.read(&api, &created, &cancel).await.unwrap().unwrap();
    assert_eq!(read, created);

    let updated = driver
        .update(&api, &created, &slack_plan(Some("#ops")), &cancel)
        .await
        .unwrap();
    assert_eq!(updated.resource_id(), Some(id.as_str()));
    assert_eq!(updated.slack.as_option().unwrap().channel, s("#ops"));
    let stored = api.alerting_channels.raw(&id).await.unwrap();
    assert_eq!(stored.fields.channel.as_deref(), Some("#ops"));

    driver.delete(&api, &updated, &cancel).await.unwrap();
    assert_eq!(driver.state(), LifecycleState::Absent);
    assert!(api.alerting_channels.is_empty().await);
}

#[tokio::test]
async fn password_survives_reads_that_omit_it() {
    let api = InMemoryApi::new();
    let cancel = CancellationToken::new();
    let mut driver = ResourceDriver::new(AlertingChannelResource::new());

    let created = driver.create(&api, &service_now_plan(), &cancel).await.unwrap();
    let id = created.resource_id().unwrap().to_string();
    assert_eq!(
        api.alerting_channels.raw(&id).await.unwrap().fields.password.as_deref(),
        Some("secret")
    );

    let read = driver.read(&api, &created, &cancel).await.unwrap().unwrap();
    assert_eq!(read.service_now.as_option().unwrap().password, s("secret"));
}

#[tokio::test]
async fn out_of_band_delete_reads_as_gone() {
    let api = InMemoryApi::new();
    let cancel = CancellationToken::new();
    let mut driver = ResourceDriver::new(AlertingChannelResource::new());
    let created = driver.create(&api, &slack_plan(None), &cancel).await.unwrap();

    api.alerting_channels
        .delete(created.resource_id().unwrap())
        .await
        .unwrap();

    assert!(driver.read(&api, &created, &cancel).await.unwrap().is_none());
    assert_eq!(driver.state(), LifecycleState::Absent);

    // Deleting what is already gone succeeds.
    let mut again = ResourceDriver::existing(AlertingChannelResource::new());
    again.delete(&api, &created, &cancel).await.unwrap();
    assert_eq!(again.state(), LifecycleState::Absent);
}

#[tokio::test]
async fn invalid_plan_never_reaches_the_api() {
    let api = InMemoryApi::new();
    let cancel = CancellationToken::new();
    let mut driver = ResourceDriver::new(AlertingChannelResource::new());

    let err = driver
        .create(&api, &AlertingChannelModel::named("empty"), &cancel)
        .await
        .unwrap_err();
    assert!(err.contains_summary(ERR_INVALID_CONFIGURATION));
    assert_eq!(driver.state(), LifecycleState::Absent);
    assert!(api.alerting_channels.is_empty().await);
}

#[tokio::test]
async fn read_without_id_is_an_error() {
    let api = InMemoryApi::new();
    let mut driver = ResourceDriver::existing(AlertingChannelResource::new());
    let err = driver
        .read(&api, &slack_plan(None), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.contains_summary(MISSING_ID_SUMMARY));
    assert_eq!(driver.state(), LifecycleState::Present);
}

// ── failing and stalling backends ───────────────────────────────────

enum Behavior {
    Fail,
    /// Reject writes with a body quoting the request.
    Echo,
    Stall,
}

struct ScriptedChannels {
    behavior: Behavior,
}

impl ScriptedChannels {
    async fn respond<T>(&self) -> Result<T, RestError> {
        match self.behavior {
            Behavior::Fail | Behavior::Echo => Err(RestError::Api {
                status: 500,
                body: "internal error".into(),
            }),
            Behavior::Stall => std::future::pending().await,
        }
    }

    async fn write(&self, data: &AlertingChannel) -> Result<AlertingChannel, RestError> {
        match self.behavior {
            Behavior::Echo => Err(RestError::Api {
                status: 400,
                body: format!("rejected {data:?}"),
            }),
            _ => self.respond().await,
        }
    }
}

#[async_trait]
impl RestResource<AlertingChannel> for ScriptedChannels {
    async fn get_all(&self) -> Result<Vec<AlertingChannel>, RestError> {
        self.respond().await
    }

    async fn get(&self, _id: &str) -> Result<AlertingChannel, RestError> {
        self.respond().await
    }

    async fn create(&self, data: &AlertingChannel) -> Result<AlertingChannel, RestError> {
        self.write(data).await
    }

    async fn update(&self, data: &AlertingChannel) -> Result<AlertingChannel, RestError> {
        self.write(data).await
    }

    async fn delete(&self, _id: &str) -> Result<(), RestError> {
        self.respond().await
    }
}

struct ScriptedApi {
    channels: Arc<ScriptedChannels>,
    memory: InMemoryApi,
}

impl ScriptedApi {
    fn new(behavior: Behavior) -> Self {
        Self {
            channels: Arc::new(ScriptedChannels { behavior }),
            memory: InMemoryApi::new(),
        }
    }
}

impl InstanaApi for ScriptedApi {
    fn alerting_channels(&self) -> Arc<dyn RestResource<AlertingChannel>> {
        self.channels.clone()
    }

    fn mobile_alert_configs(&self) -> Arc<dyn RestResource<MobileAlertConfig>> {
        self.memory.mobile_alert_configs()
    }

    fn automation_actions(&self) -> Arc<dyn RestResource<AutomationAction>> {
        self.memory.automation_actions()
    }
}

fn with_id(mut model: AlertingChannelModel) -> AlertingChannelModel {
    model.set_resource_id("c1".into());
    model
}

#[tokio::test]
async fn transport_failure_returns_to_previous_state() {
    let api = ScriptedApi::new(Behavior::Fail);
    let cancel = CancellationToken::new();

    let mut driver = ResourceDriver::new(AlertingChannelResource::new());
    let err = driver.create(&api, &slack_plan(None), &cancel).await.unwrap_err();
    assert!(err.contains_summary("Error creating alerting_channel"), "{err}");
    assert_eq!(driver.state(), LifecycleState::Absent);

    let mut driver = ResourceDriver::existing(AlertingChannelResource::new());
    let state = with_id(slack_plan(None));
    let err = driver
        .update(&api, &state, &slack_plan(Some("#ops")), &cancel)
        .await
        .unwrap_err();
    assert!(err.contains_summary("Error updating alerting_channel"), "{err}");
    assert_eq!(driver.state(), LifecycleState::Present);
}

#[tokio::test]
async fn echoed_request_bodies_are_redacted() {
    let api = ScriptedApi::new(Behavior::Echo);
    let cancel = CancellationToken::new();

    let mut driver = ResourceDriver::new(AlertingChannelResource::new());
    let err = driver.create(&api, &service_now_plan(), &cancel).await.unwrap_err();
    assert!(err.to_string().contains("svc"), "{err}");
    assert!(!err.to_string().contains("secret"), "{err}");

    let webhook = AlertingChannelModel {
        webhook: Cell::Present(WebhookModel {
            webhook_urls: Cell::Present(BTreeSet::from(["https://hook".to_string()])),
            http_headers: Cell::Present(BTreeMap::from([(
                "Authorization".to_string(),
                "Bearer tok-42".to_string(),
            )])),
        }),
        ..AlertingChannelModel::named("hook")
    };
    let mut driver = ResourceDriver::existing(AlertingChannelResource::new());
    let err = driver
        .update(&api, &with_id(service_now_plan()), &with_id(webhook), &cancel)
        .await
        .unwrap_err();
    let text = err.to_string();
    assert!(text.contains("Error updating alerting_channel"), "{text}");
    assert!(!text.contains("tok-42"), "{text}");
}

#[tokio::test]
async fn cancellation_interrupts_a_stalled_request() {
    let api = ScriptedApi::new(Behavior::Stall);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let mut driver = ResourceDriver::existing(AlertingChannelResource::new());
    let state = with_id(slack_plan(None));
    let err = tokio::time::timeout(Duration::from_secs(5), driver.read(&api, &state, &cancel))
        .await
        .expect("cancellation should end the read")
        .unwrap_err();
    assert!(err.contains_summary(CANCELED_SUMMARY));
    assert_eq!(driver.state(), LifecycleState::Present);
}

#[tokio::test]
async fn canceled_token_skips_the_request() {
    let api = InMemoryApi::new();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut driver = ResourceDriver::new(AlertingChannelResource::new());
    let err = driver.create(&api, &slack_plan(None), &cancel).await.unwrap_err();
    assert!(err.contains_summary(CANCELED_SUMMARY));
    assert!(api.alerting_channels.is_empty().await);
}
