//! `mobile_alert_config` resource: smart alerts scoped to a mobile app.

pub mod constants;
mod mapping;
mod model;
mod schema;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use instana_core::{CancellationToken, Diagnostics};
use instana_restapi::{InstanaApi, MobileAlertConfig, RestResource};

pub use mapping::{apply_defaults, config_to_rest, config_to_state};
pub use model::*;
pub use schema::mobile_alert_config_schema;

use crate::handle::{ResourceHandle, ResourceMetadata};
use constants::RESOURCE_MOBILE_ALERT_CONFIG;

pub struct MobileAlertConfigResource {
    metadata: ResourceMetadata,
}

impl MobileAlertConfigResource {
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata {
                type_name: RESOURCE_MOBILE_ALERT_CONFIG,
                schema: mobile_alert_config_schema(),
            },
        }
    }
}

impl Default for MobileAlertConfigResource {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for MobileAlertConfigResource {
    type Model = MobileAlertConfigModel;
    type Payload = MobileAlertConfig;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_binding(&self, api: &dyn InstanaApi) -> Arc<dyn RestResource<MobileAlertConfig>> {
        api.mobile_alert_configs()
    }

    fn set_computed_fields(&self, plan: &mut MobileAlertConfigModel) -> Result<(), Diagnostics> {
        apply_defaults(plan);
        Ok(())
    }

    fn map_state_to_rest(
        &self,
        cancel: &CancellationToken,
        model: &MobileAlertConfigModel,
    ) -> Result<MobileAlertConfig, Diagnostics> {
        config_to_rest(cancel, &self.metadata.schema, model)
    }

    fn update_state(
        &self,
        _cancel: &CancellationToken,
        state: Option<&MobileAlertConfigModel>,
        plan: Option<&MobileAlertConfigModel>,
        payload: &MobileAlertConfig,
    ) -> Result<MobileAlertConfigModel, Diagnostics> {
        config_to_state(payload, plan.or(state))
    }
}
