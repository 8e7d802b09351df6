//! Read-only lookups of existing objects by name.
//!
//! The whole collection is listed and the first exact name match is mapped
//! the same way a resource read would map it.

use instana_core::cancel::{ensure_active, run_cancellable};
use instana_core::{CancellationToken, Diagnostics};
use instana_restapi::InstanaApi;

use crate::alerting_channel::{channel_to_state, AlertingChannelModel};
use crate::automation_action::{action_to_state, AutomationActionModel};

pub const ERR_READING_CHANNELS: &str = "Error reading alerting channels";
pub const ERR_CHANNEL_NOT_FOUND: &str = "Alerting channel not found";
pub const ERR_READING_ACTIONS: &str = "Error reading automation actions";
pub const ERR_ACTION_NOT_FOUND: &str = "Automation action not found";

/// The alerting channel named exactly `name`.
///
/// Write-only values such as passwords are null unless the API returns them.
pub async fn lookup_alerting_channel(
    api: &dyn InstanaApi,
    name: &str,
    cancel: &CancellationToken,
) -> Result<AlertingChannelModel, Diagnostics> {
    ensure_active(cancel, "lookup")?;
    let channels = run_cancellable(cancel, "lookup", api.alerting_channels().get_all())
        .await?
        .map_err(|err| {
            Diagnostics::error(ERR_READING_CHANNELS, format!("Could not read alerting channels: {err}"))
        })?;
    tracing::debug!(name, candidates = channels.len(), "looking up alerting channel");

    let channel = channels.iter().find(|c| c.name == name).ok_or_else(|| {
        Diagnostics::error(ERR_CHANNEL_NOT_FOUND, format!("No alerting channel found with name: {name}"))
    })?;
    channel_to_state(channel, None)
}

/// The automation action named exactly `name` whose type matches
/// `action_type` ignoring case.
pub async fn lookup_automation_action(
    api: &dyn InstanaApi,
    name: &str,
    action_type: &str,
    cancel: &CancellationToken,
) -> Result<AutomationActionModel, Diagnostics> {
    ensure_active(cancel, "lookup")?;
    let actions = run_cancellable(cancel, "lookup", api.automation_actions().get_all())
        .await?
        .map_err(|err| {
            Diagnostics::error(ERR_READING_ACTIONS, format!("Could not read automation actions: {err}"))
        })?;
    tracing::debug!(name, action_type, candidates = actions.len(), "looking up automation action");

    let action = actions
        .iter()
        .find(|a| a.name == name && a.action_type.as_str().eq_ignore_ascii_case(action_type))
        .ok_or_else(|| {
            Diagnostics::error(
                ERR_ACTION_NOT_FOUND,
                format!("No automation action found with name '{name}' and type '{action_type}'"),
            )
        })?;
    action_to_state(action)
}
