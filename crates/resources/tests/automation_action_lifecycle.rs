//! Automation action lifecycle against the in-memory backend.

use instana_core::{CancellationToken, Cell};
use instana_resources::automation_action::{DocLinkModel, ScriptModel};
use instana_resources::{
    AutomationActionModel, AutomationActionResource, LifecycleState, ResourceDriver, ResourceModel,
};
use instana_restapi::{AutomationActionType, InMemoryApi};

fn s(value: &str) -> Cell<String> {
    Cell::Present(value.to_string())
}

fn script_plan(timeout: Option<&str>) -> AutomationActionModel {
    AutomationActionModel {
        name: s("restart service"),
        description: s("restarts the failing unit"),
        tags: Cell::Present(vec!["ops".into()]),
        script: Cell::Present(ScriptModel {
            content: s("c3lzdGVtY3RsIHJlc3RhcnQ="),
            timeout: timeout.map(s).unwrap_or(Cell::Null),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_read_update_delete() {
    let api = InMemoryApi::new();
    let cancel = CancellationToken::new();

    let mut driver = ResourceDriver::new(AutomationActionResource::new());
    let created = driver.create(&api, &script_plan(None), &cancel).await.unwrap();
    assert_eq!(driver.state(), LifecycleState::Present);
    let id = created.resource_id().unwrap().to_string();

    let stored = api.automation_actions.raw(&id).await.unwrap();
    assert_eq!(stored.action_type, AutomationActionType::Script);
    assert_eq!(stored.field("script_ssh"), Some("c3lzdGVtY3RsIHJlc3RhcnQ="));

    let read = driver.read(&api, &created, &cancel).await.unwrap().unwrap();
    assert_eq!(read, created);
    assert!(read.script.as_option().unwrap().timeout.is_null());

    let mut plan = script_plan(Some("30"));
    plan.set_resource_id(id.clone());
    let updated = driver.update(&api, &created, &plan, &cancel).await.unwrap();
    assert_eq!(updated.script.as_option().unwrap().timeout, s("30"));
    assert_eq!(api.automation_actions.len().await, 1);

    driver.delete(&api, &updated, &cancel).await.unwrap();
    assert_eq!(driver.state(), LifecycleState::Absent);
    assert!(api.automation_actions.is_empty().await);
}

#[tokio::test]
async fn switching_action_type_replaces_fields() {
    let api = InMemoryApi::new();
    let cancel = CancellationToken::new();

    let mut driver = ResourceDriver::new(AutomationActionResource::new());
    let created = driver.create(&api, &script_plan(Some("10")), &cancel).await.unwrap();

    let plan = AutomationActionModel {
        id: created.id.clone(),
        script: Cell::Null,
        doc_link: Cell::Present(DocLinkModel {
            url: s("https://runbooks.example/restart"),
        }),
        ..script_plan(None)
    };
    let updated = driver.update(&api, &created, &plan, &cancel).await.unwrap();
    assert!(updated.script.is_null());
    assert_eq!(updated.doc_link.as_option().unwrap().url, s("https://runbooks.example/restart"));

    let stored = api.automation_actions.raw(updated.resource_id().unwrap()).await.unwrap();
    assert_eq!(stored.action_type, AutomationActionType::DocLink);
    assert_eq!(stored.fields.len(), 1);
    assert_eq!(stored.fields[0].encoding, "UTF8");
}

#[tokio::test]
async fn invalid_plan_never_reaches_the_api() {
    let api = InMemoryApi::new();
    let plan = AutomationActionModel {
        script: Cell::Null,
        ..script_plan(None)
    };
    let mut driver = ResourceDriver::new(AutomationActionResource::new());
    let err = driver
        .create(&api, &plan, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.contains_summary("Invalid action configuration"));
    assert_eq!(driver.state(), LifecycleState::Absent);
    assert!(api.automation_actions.is_empty().await);
}
