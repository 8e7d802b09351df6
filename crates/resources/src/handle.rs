//! The per-resource contract plugged into the host.

use std::fmt::Debug;
use std::sync::Arc;

use instana_core::schema::ResourceSchema;
use instana_core::{CancellationToken, Diagnostics};
use instana_restapi::{InstanaApi, InstanaDataObject, RestResource};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Static description of a resource type.
#[derive(Debug, Clone)]
pub struct ResourceMetadata {
    /// Type name without provider prefix, e.g. `alerting_channel`.
    pub type_name: &'static str,
    pub schema: ResourceSchema,
}

/// A declarative model carrying the host-computed id.
pub trait ResourceModel: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn resource_id(&self) -> Option<&str>;
    fn set_resource_id(&mut self, id: String);
}

/// Mapping between one declarative model and its REST payload.
///
/// Handles are stateless; every call gets its own inputs.
pub trait ResourceHandle: Send + Sync {
    type Model: ResourceModel;
    type Payload: InstanaDataObject;

    fn metadata(&self) -> &ResourceMetadata;

    fn rest_binding(&self, api: &dyn InstanaApi) -> Arc<dyn RestResource<Self::Payload>>;

    /// Fill host-computed attributes of a plan before it is mapped.
    fn set_computed_fields(&self, _plan: &mut Self::Model) -> Result<(), Diagnostics> {
        Ok(())
    }

    /// Values of `model` that must never appear in diagnostics.
    fn secrets(&self, _model: &Self::Model) -> Vec<String> {
        Vec::new()
    }

    fn map_state_to_rest(
        &self,
        cancel: &CancellationToken,
        model: &Self::Model,
    ) -> Result<Self::Payload, Diagnostics>;

    /// Project a REST response back into a model.
    ///
    /// `plan` (when given) or else `state` is the prior model; attributes the
    /// API does not echo back are taken from it.
    fn update_state(
        &self,
        cancel: &CancellationToken,
        state: Option<&Self::Model>,
        plan: Option<&Self::Model>,
        payload: &Self::Payload,
    ) -> Result<Self::Model, Diagnostics>;
}
