//! Runs one lifecycle operation for one resource document.
//!
//! Every resource type goes through the same generic helpers; models enter
//! as YAML/JSON documents and leave as JSON state.

use anyhow::Result;
use tracing::info;

use instana_core::CancellationToken;
use instana_resources::{
    lookup_alerting_channel, lookup_automation_action, AlertingChannelResource,
    AutomationActionResource, MobileAlertConfigResource, ResourceDriver, ResourceHandle,
    ResourceModel,
};
use instana_restapi::InstanaApi;

use crate::cli::{LookupTarget, ResourceKind};
use crate::document::decode;

type Document = serde_yaml::Value;
type State = serde_json::Value;

// ── Generic helpers ───────────────────────────────────────────

fn render_as<H: ResourceHandle>(handle: H, doc: &Document) -> Result<serde_json::Value> {
    let mut model: H::Model = decode(doc)?;
    handle.set_computed_fields(&mut model)?;
    let payload = handle.map_state_to_rest(&CancellationToken::new(), &model)?;
    Ok(serde_json::to_value(payload)?)
}

async fn apply_as<H: ResourceHandle>(
    handle: H,
    api: &dyn InstanaApi,
    doc: &Document,
    prior: Option<&Document>,
    cancel: &CancellationToken,
) -> Result<State> {
    let plan: H::Model = decode(doc)?;
    let model = match prior {
        Some(prior) => {
            let state: H::Model = decode(prior)?;
            ResourceDriver::existing(handle)
                .update(api, &state, &plan, cancel)
                .await?
        }
        None => ResourceDriver::new(handle).create(api, &plan, cancel).await?,
    };
    info!(id = model.resource_id().unwrap_or("-"), "applied");
    Ok(serde_json::to_value(model)?)
}

async fn read_as<H: ResourceHandle>(
    handle: H,
    api: &dyn InstanaApi,
    prior: &Document,
    cancel: &CancellationToken,
) -> Result<Option<State>> {
    let state: H::Model = decode(prior)?;
    match ResourceDriver::existing(handle).read(api, &state, cancel).await? {
        Some(model) => Ok(Some(serde_json::to_value(model)?)),
        None => Ok(None),
    }
}

async fn destroy_as<H: ResourceHandle>(
    handle: H,
    api: &dyn InstanaApi,
    prior: &Document,
    cancel: &CancellationToken,
) -> Result<()> {
    let state: H::Model = decode(prior)?;
    ResourceDriver::existing(handle).delete(api, &state, cancel).await?;
    info!(id = state.resource_id().unwrap_or("-"), "destroyed");
    Ok(())
}

// ── Dispatch ──────────────────────────────────────────────────

/// Map a document to the payload the API would receive.
pub fn render(kind: ResourceKind, doc: &Document) -> Result<serde_json::Value> {
    match kind {
        ResourceKind::AlertingChannel => render_as(AlertingChannelResource::new(), doc),
        ResourceKind::MobileAlertConfig => render_as(MobileAlertConfigResource::new(), doc),
        ResourceKind::AutomationAction => render_as(AutomationActionResource::new(), doc),
    }
}

/// Create, or update when `prior` state is given. Returns the new state.
pub async fn apply(
    kind: ResourceKind,
    api: &dyn InstanaApi,
    doc: &Document,
    prior: Option<&Document>,
    cancel: &CancellationToken,
) -> Result<State> {
    match kind {
        ResourceKind::AlertingChannel => {
            apply_as(AlertingChannelResource::new(), api, doc, prior, cancel).await
        }
        ResourceKind::MobileAlertConfig => {
            apply_as(MobileAlertConfigResource::new(), api, doc, prior, cancel).await
        }
        ResourceKind::AutomationAction => {
            apply_as(AutomationActionResource::new(), api, doc, prior, cancel).await
        }
    }
}

/// Refreshed state, or `None` when the object no longer exists.
pub async fn read(
    kind: ResourceKind,
    api: &dyn InstanaApi,
    prior: &Document,
    cancel: &CancellationToken,
) -> Result<Option<State>> {
    match kind {
        ResourceKind::AlertingChannel => read_as(AlertingChannelResource::new(), api, prior, cancel).await,
        ResourceKind::MobileAlertConfig => {
            read_as(MobileAlertConfigResource::new(), api, prior, cancel).await
        }
        ResourceKind::AutomationAction => {
            read_as(AutomationActionResource::new(), api, prior, cancel).await
        }
    }
}

pub async fn destroy(
    kind: ResourceKind,
    api: &dyn InstanaApi,
    prior: &Document,
    cancel: &CancellationToken,
) -> Result<()> {
    match kind {
        ResourceKind::AlertingChannel => {
            destroy_as(AlertingChannelResource::new(), api, prior, cancel).await
        }
        ResourceKind::MobileAlertConfig => {
            destroy_as(MobileAlertConfigResource::new(), api, prior, cancel).await
        }
        ResourceKind::AutomationAction => {
            destroy_as(AutomationActionResource::new(), api, prior, cancel).await
        }
    }
}

/// State of an existing object found by name.
pub async fn lookup(
    target: &LookupTarget,
    api: &dyn InstanaApi,
    cancel: &CancellationToken,
) -> Result<State> {
    let state = match target {
        LookupTarget::AlertingChannel { name } => {
            serde_json::to_value(lookup_alerting_channel(api, name, cancel).await?)?
        }
        LookupTarget::AutomationAction { name, action_type } => {
            serde_json::to_value(lookup_automation_action(api, name, action_type, cancel).await?)?
        }
    };
    Ok(state)
}
