use instana_restapi::{
    ActionField, AlertingChannel, AlertingChannelKind, AutomationAction, AutomationActionType,
    ChannelFields, InMemoryApi, InstanaApi, RestError,
};

fn service_now() -> AlertingChannel {
    AlertingChannel::new(
        "snow",
        AlertingChannelKind::ServiceNow,
        ChannelFields {
            service_now_url: Some("https://snow.example".into()),
            username: Some("admin".into()),
            password: Some("secret".into()),
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn create_assigns_server_id() {
    let api = InMemoryApi::new();
    let created = api.alerting_channels().create(&service_now()).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(api.alerting_channels.len().await, 1);
}

#[tokio::test]
async fn reads_elide_password_but_store_keeps_it() {
    let api = InMemoryApi::new();
    let binding = api.alerting_channels();
    let created = binding.create(&service_now()).await.unwrap();

    let read = binding.get(&created.id).await.unwrap();
    assert!(read.fields.password.is_none());
    assert_eq!(read.fields.username.as_deref(), Some("admin"));

    let stored = api.alerting_channels.raw(&created.id).await.unwrap();
    assert_eq!(stored.fields.password.as_deref(), Some("secret"));
}

#[tokio::test]
async fn missing_objects_are_not_found() {
    let api = InMemoryApi::new();
    let err = api.mobile_alert_configs().get("nope").await.unwrap_err();
    assert!(err.is_not_found());

    match api.alerting_channels().delete("nope").await.unwrap_err() {
        RestError::NotFound { id, .. } => assert_eq!(id, "nope"),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn update_then_delete() {
    let api = InMemoryApi::new();
    let binding = api.alerting_channels();
    let mut created = binding.create(&service_now()).await.unwrap();

    created.name = "renamed".into();
    let updated = binding.update(&created).await.unwrap();
    assert_eq!(updated.name, "renamed");

    binding.delete(&created.id).await.unwrap();
    assert!(api.alerting_channels.is_empty().await);
}

#[tokio::test]
async fn get_all_lists_projected_objects() {
    let api = InMemoryApi::new();
    let binding = api.alerting_channels();
    assert!(binding.get_all().await.unwrap().is_empty());

    binding.create(&service_now()).await.unwrap();
    let mut second = service_now();
    second.name = "snow-2".into();
    binding.create(&second).await.unwrap();

    let all = binding.get_all().await.unwrap();
    let mut names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
    names.sort();
    assert_eq!(names, ["snow", "snow-2"]);
    assert!(all.iter().all(|c| c.fields.password.is_none()));
}

#[tokio::test]
async fn automation_actions_have_their_own_collection() {
    let api = InMemoryApi::new();
    let action = AutomationAction {
        id: String::new(),
        name: "open docs".into(),
        description: String::new(),
        action_type: AutomationActionType::DocLink,
        tags: None,
        fields: vec![ActionField::new("url", "Doc link", "https://docs.example", "UTF8")],
        input_parameters: Vec::new(),
    };
    let created = api.automation_actions().create(&action).await.unwrap();
    let read = api.automation_actions().get(&created.id).await.unwrap();
    assert_eq!(read.field("url"), Some("https://docs.example"));
    assert_eq!(api.automation_actions.len().await, 1);
    assert!(api.alerting_channels.is_empty().await);
}
