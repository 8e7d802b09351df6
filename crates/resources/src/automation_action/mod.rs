//! `automation_action` resource: remediation steps such as scripts, HTTP
//! calls, tickets or documentation links, one block per action type.

pub mod constants;
mod mapping;
mod model;
mod schema;


use std::sync::Arc;

use instana_core::{CancellationToken, Diagnostics};
use instana_restapi::{AutomationAction, InstanaApi, RestResource};

pub use mapping::{action_secrets, action_to_rest, action_to_state, configured_actions, ActionVariant};
pub use model::*;
pub use schema::automation_action_schema;

use crate::handle::{ResourceHandle, ResourceMetadata};
use constants::RESOURCE_AUTOMATION_ACTION;

pub struct AutomationActionResource {
    metadata: ResourceMetadata,
}

impl AutomationActionResource {
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata {
                type_name: RESOURCE_AUTOMATION_ACTION,
                schema: automation_action_schema(),
            },
        }
    }
}

impl Default for AutomationActionResource {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for AutomationActionResource {
    type Model = AutomationActionModel;
    type Payload = AutomationAction;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_binding(&self, api: &dyn InstanaApi) -> Arc<dyn RestResource<AutomationAction>> {
        api.automation_actions()
    }

    fn secrets(&self, model: &AutomationActionModel) -> Vec<String> {
        action_secrets(model)
    }

    fn map_state_to_rest(
        &self,
        _cancel: &CancellationToken,
        model: &AutomationActionModel,
    ) -> Result<AutomationAction, Diagnostics> {
        action_to_rest(&self.metadata.schema, model)
    }

    fn update_state(
        &self,
        _cancel: &CancellationToken,
        _state: Option<&AutomationActionModel>,
        _plan: Option<&AutomationActionModel>,
        payload: &AutomationAction,
    ) -> Result<AutomationActionModel, Diagnostics> {
        action_to_state(payload)
    }
}
