//! Create/read/update/delete driver.
//!
//! One [`ResourceDriver`] tracks one resource instance through
//! `absent → creating → present → (updating | refreshing | deleting)`.
//! A failed operation returns to the state it started from.

use std::fmt;

use instana_core::cancel::{ensure_active, run_cancellable};
use instana_core::{CancellationToken, Diagnostics};
use instana_restapi::{InstanaApi, InstanaDataObject, RestError};

use crate::handle::{ResourceHandle, ResourceModel};

pub const MISSING_ID_SUMMARY: &str = "Missing resource id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Absent,
    Creating,
    Present,
    Updating,
    Refreshing,
    Deleting,
}

impl LifecycleState {
    pub fn is_stable(self) -> bool {
        matches!(self, LifecycleState::Absent | LifecycleState::Present)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Absent => "absent",
            LifecycleState::Creating => "creating",
            LifecycleState::Present => "present",
            LifecycleState::Updating => "updating",
            LifecycleState::Refreshing => "refreshing",
            LifecycleState::Deleting => "deleting",
        };
        f.write_str(name)
    }
}

pub struct ResourceDriver<H> {
    handle: H,
    state: LifecycleState,
}

impl<H: ResourceHandle> ResourceDriver<H> {
    /// Driver for a resource that does not exist yet.
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            state: LifecycleState::Absent,
        }
    }

    /// Driver for a resource already recorded in state.
    pub fn existing(handle: H) -> Self {
        Self {
            handle,
            state: LifecycleState::Present,
        }
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    fn type_name(&self) -> &'static str {
        self.handle.metadata().type_name
    }

    fn transition(&mut self, to: LifecycleState) {
        tracing::debug!(resource = self.type_name(), from = %self.state, to = %to, "lifecycle transition");
        self.state = to;
    }

    fn fail(&mut self, stable: LifecycleState, operation: &str, diags: &Diagnostics) {
        tracing::warn!(resource = self.type_name(), operation, error = %diags, "operation failed");
        self.transition(stable);
    }

    /// API error bodies may echo the request, so the secrets of every
    /// model involved are masked.
    fn transport_error(&self, operation: &str, err: &RestError, models: &[&H::Model]) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for model in models {
            for secret in self.handle.secrets(model) {
                diags.register_secret(secret);
            }
        }
        diags.add_error(format!("Error {operation} {}", self.type_name()), err.to_string());
        diags
    }

    fn require_id(&self, model: &H::Model) -> Result<String, Diagnostics> {
        model.resource_id().map(str::to_string).ok_or_else(|| {
            Diagnostics::error(
                MISSING_ID_SUMMARY,
                format!("{} state has no id", self.type_name()),
            )
        })
    }

    pub async fn create(
        &mut self,
        api: &dyn InstanaApi,
        plan: &H::Model,
        cancel: &CancellationToken,
    ) -> Result<H::Model, Diagnostics> {
        let stable = self.state;
        self.transition(LifecycleState::Creating);
        match self.create_inner(api, plan, cancel).await {
            Ok(model) => {
                self.transition(LifecycleState::Present);
                Ok(model)
            }
            Err(diags) => {
                self.fail(stable, "create", &diags);
                Err(diags)
            }
        }
    }

    async fn create_inner(
        &self,
        api: &dyn InstanaApi,
        plan: &H::Model,
        cancel: &CancellationToken,
    ) -> Result<H::Model, Diagnostics> {
        ensure_active(cancel, "create")?;
        let mut plan = plan.clone();
        self.handle.set_computed_fields(&mut plan)?;
        let payload = self.handle.map_state_to_rest(cancel, &plan)?;

        let binding = self.handle.rest_binding(api);
        let created = run_cancellable(cancel, "create", binding.create(&payload))
            .await?
            .map_err(|e| self.transport_error("creating", &e, &[&plan]))?;
        tracing::info!(resource = self.type_name(), id = %created.id(), "created");

        self.handle.update_state(cancel, None, Some(&plan), &created)
    }

    /// Refresh `state` from the API. `Ok(None)` means the object is gone.
    pub async fn read(
        &mut self,
        api: &dyn InstanaApi,
        state: &H::Model,
        cancel: &CancellationToken,
    ) -> Result<Option<H::Model>, Diagnostics> {
        let stable = self.state;
        self.transition(LifecycleState::Refreshing);
        match self.read_inner(api, state, cancel).await {
            Ok(Some(model)) => {
                self.transition(LifecycleState::Present);
                Ok(Some(model))
            }
            Ok(None) => {
                self.transition(LifecycleState::Absent);
                Ok(None)
            }
            Err(diags) => {
                self.fail(stable, "read", &diags);
                Err(diags)
            }
        }
    }

    async fn read_inner(
        &self,
        api: &dyn InstanaApi,
        state: &H::Model,
        cancel: &CancellationToken,
    ) -> Result<Option<H::Model>, Diagnostics> {
        ensure_active(cancel, "read")?;
        let id = self.require_id(state)?;

        let binding = self.handle.rest_binding(api);
        let payload = match run_cancellable(cancel, "read", binding.get(&id)).await? {
            Ok(payload) => payload,
            Err(e) if e.is_not_found() => {
                tracing::info!(resource = self.type_name(), %id, "object no longer exists");
                return Ok(None);
            }
            Err(e) => return Err(self.transport_error("reading", &e, &[state])),
        };

        self.handle
            .update_state(cancel, Some(state), None, &payload)
            .map(Some)
    }

    pub async fn update(
        &mut self,
        api: &dyn InstanaApi,
        state: &H::Model,
        plan: &H::Model,
        cancel: &CancellationToken,
    ) -> Result<H::Model, Diagnostics> {
        let stable = self.state;
        self.transition(LifecycleState::Updating);
        match self.update_inner(api, state, plan, cancel).await {
            Ok(model) => {
                self.transition(LifecycleState::Present);
                Ok(model)
            }
            Err(diags) => {
                self.fail(stable, "update", &diags);
                Err(diags)
            }
        }
    }

    async fn update_inner(
        &self,
        api: &dyn InstanaApi,
        state: &H::Model,
        plan: &H::Model,
        cancel: &CancellationToken,
    ) -> Result<H::Model, Diagnostics> {
        ensure_active(cancel, "update")?;
        let id = self.require_id(state)?;
        let mut plan = plan.clone();
        plan.set_resource_id(id);
        self.handle.set_computed_fields(&mut plan)?;
        let payload = self.handle.map_state_to_rest(cancel, &plan)?;

        let binding = self.handle.rest_binding(api);
        let updated = run_cancellable(cancel, "update", binding.update(&payload))
            .await?
            .map_err(|e| self.transport_error("updating", &e, &[state, &plan]))?;

        self.handle
            .update_state(cancel, Some(state), Some(&plan), &updated)
    }

    pub async fn delete(
        &mut self,
        api: &dyn InstanaApi,
        state: &H::Model,
        cancel: &CancellationToken,
    ) -> Result<(), Diagnostics> {
        let stable = self.state;
        self.transition(LifecycleState::Deleting);
        match self.delete_inner(api, state, cancel).await {
            Ok(()) => {
                self.transition(LifecycleState::Absent);
                Ok(())
            }
            Err(diags) => {
                self.fail(stable, "delete", &diags);
                Err(diags)
            }
        }
    }

    async fn delete_inner(
        &self,
        api: &dyn InstanaApi,
        state: &H::Model,
        cancel: &CancellationToken,
    ) -> Result<(), Diagnostics> {
        ensure_active(cancel, "delete")?;
        let id = self.require_id(state)?;
        let binding = self.handle.rest_binding(api);
        match run_cancellable(cancel, "delete", binding.delete(&id)).await? {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => {
                tracing::debug!(resource = self.type_name(), %id, "already deleted");
                Ok(())
            }
            Err(e) => Err(self.transport_error("deleting", &e, &[state])),
        }
    }
}
