//! `alerting_channel` resource: notification sinks such as email, Slack,
//! OpsGenie or ServiceNow, one variant per channel.

pub mod constants;
mod mapping;
mod model;
mod schema;


use std::sync::Arc;

use instana_core::{CancellationToken, Diagnostics};
use instana_restapi::{AlertingChannel, InstanaApi, RestResource};

pub use mapping::{channel_secrets, channel_to_rest, channel_to_state, configured_variants, ChannelVariant};
pub use model::*;
pub use schema::alerting_channel_schema;

use crate::handle::{ResourceHandle, ResourceMetadata};
use constants::RESOURCE_ALERTING_CHANNEL;

pub struct AlertingChannelResource {
    metadata: ResourceMetadata,
}

impl AlertingChannelResource {
    pub fn new() -> Self {
        Self {
            metadata: ResourceMetadata {
                type_name: RESOURCE_ALERTING_CHANNEL,
                schema: alerting_channel_schema(),
            },
        }
    }
}

impl Default for AlertingChannelResource {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandle for AlertingChannelResource {
    type Model = AlertingChannelModel;
    type Payload = AlertingChannel;

    fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    fn rest_binding(&self, api: &dyn InstanaApi) -> Arc<dyn RestResource<AlertingChannel>> {
        api.alerting_channels()
    }

    fn secrets(&self, model: &AlertingChannelModel) -> Vec<String> {
        channel_secrets(model)
    }

    fn map_state_to_rest(
        &self,
        _cancel: &CancellationToken,
        model: &AlertingChannelModel,
    ) -> Result<AlertingChannel, Diagnostics> {
        channel_to_rest(&self.metadata.schema, model)
    }

    fn update_state(
        &self,
        _cancel: &CancellationToken,
        state: Option<&AlertingChannelModel>,
        plan: Option<&AlertingChannelModel>,
        payload: &AlertingChannel,
    ) -> Result<AlertingChannelModel, Diagnostics> {
        channel_to_state(payload, plan.or(state))
    }
}
