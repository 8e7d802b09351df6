//! In-process stand-in for the REST API.
//!
//! Objects live in a map keyed by a server-assigned uuid. A read hook can
//! rewrite what `get` returns, e.g. to drop write-only fields the real API
//! never echoes back.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::alerting_channel::{AlertingChannel, ALERTING_CHANNELS_PATH};
use crate::automation_action::{AutomationAction, AUTOMATION_ACTIONS_PATH};
use crate::error::RestError;
use crate::mobile_alert_config::{MobileAlertConfig, MOBILE_ALERT_CONFIGS_PATH};
use crate::resource::{InstanaApi, InstanaDataObject, RestResource};

type ReadHook<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

pub struct InMemoryResource<T> {
    path: &'static str,
    objects: Mutex<BTreeMap<String, T>>,
    read_hook: Option<ReadHook<T>>,
}

impl<T: InstanaDataObject> InMemoryResource<T> {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            objects: Mutex::new(BTreeMap::new()),
            read_hook: None,
        }
    }

    pub fn with_read_hook(mut self, hook: impl Fn(T) -> T + Send + Sync + 'static) -> Self {
        self.read_hook = Some(Arc::new(hook));
        self
    }

    /// Stored object without the read hook applied.
    pub async fn raw(&self, id: &str) -> Option<T> {
        self.objects.lock().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.lock().await.is_empty()
    }

    /// Overwrite an object in place, simulating drift made outside the provider.
    pub async fn put(&self, object: T) {
        self.objects
            .lock()
            .await
            .insert(object.id().to_string(), object);
    }

    fn not_found(&self, id: &str) -> RestError {
        RestError::NotFound {
            path: self.path.to_string(),
            id: id.to_string(),
        }
    }

    fn project(&self, object: T) -> T {
        match &self.read_hook {
            Some(hook) => hook(object),
            None => object,
        }
    }
}

#[async_trait::async_trait]
impl<T: InstanaDataObject> RestResource<T> for InMemoryResource<T> {
    async fn get_all(&self) -> Result<Vec<T>, RestError> {
        let objects = self.objects.lock().await;
        Ok(objects.values().cloned().map(|o| self.project(o)).collect())
    }

    async fn get(&self, id: &str) -> Result<T, RestError> {
        let object = self
            .objects
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| self.not_found(id))?;
        Ok(self.project(object))
    }

    async fn create(&self, data: &T) -> Result<T, RestError> {
        let mut object = data.clone();
        object.set_id(uuid::Uuid::new_v4().to_string());
        tracing::debug!(path = self.path, id = %object.id(), "in-memory create");
        self.objects
            .lock()
            .await
            .insert(object.id().to_string(), object.clone());
        Ok(self.project(object))
    }

    async fn update(&self, data: &T) -> Result<T, RestError> {
        let mut objects = self.objects.lock().await;
        let slot = objects
            .get_mut(data.id())
            .ok_or_else(|| self.not_found(data.id()))?;
        *slot = data.clone();
        Ok(self.project(data.clone()))
    }

    async fn delete(&self, id: &str) -> Result<(), RestError> {
        self.objects
            .lock()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| self.not_found(id))
    }
}

/// Every collection backed by memory. Alerting channel reads drop `password`.
pub struct InMemoryApi {
    pub alerting_channels: Arc<InMemoryResource<AlertingChannel>>,
    pub mobile_alert_configs: Arc<InMemoryResource<MobileAlertConfig>>,
    pub automation_actions: Arc<InMemoryResource<AutomationAction>>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        let channels = InMemoryResource::new(ALERTING_CHANNELS_PATH).with_read_hook(|mut channel: AlertingChannel| {
            channel.fields.password = None;
            channel
        });
        Self {
            alerting_channels: Arc::new(channels),
            mobile_alert_configs: Arc::new(InMemoryResource::new(MOBILE_ALERT_CONFIGS_PATH)),
            automation_actions: Arc::new(InMemoryResource::new(AUTOMATION_ACTIONS_PATH)),
        }
    }
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanaApi for InMemoryApi {
    fn alerting_channels(&self) -> Arc<dyn RestResource<AlertingChannel>> {
        self.alerting_channels.clone()
    }

    fn mobile_alert_configs(&self) -> Arc<dyn RestResource<MobileAlertConfig>> {
        self.mobile_alert_configs.clone()
    }

    fn automation_actions(&self) -> Arc<dyn RestResource<AutomationAction>> {
        self.automation_actions.clone()
    }
}
