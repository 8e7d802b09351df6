use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::alerting_channel::AlertingChannel;
use crate::automation_action::AutomationAction;
use crate::error::RestError;
use crate::mobile_alert_config::MobileAlertConfig;

/// A payload the API stores under a server-assigned id.
pub trait InstanaDataObject: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// CRUD binding for one resource collection.
///
/// `get` reports a missing object as [`RestError::NotFound`].
#[async_trait::async_trait]
pub trait RestResource<T: InstanaDataObject>: Send + Sync {
    /// Every object of the collection.
    async fn get_all(&self) -> Result<Vec<T>, RestError>;
    async fn get(&self, id: &str) -> Result<T, RestError>;
    async fn create(&self, data: &T) -> Result<T, RestError>;
    async fn update(&self, data: &T) -> Result<T, RestError>;
    async fn delete(&self, id: &str) -> Result<(), RestError>;
}

/// Entry point handing out one binding per resource collection.
pub trait InstanaApi: Send + Sync {
    fn alerting_channels(&self) -> Arc<dyn RestResource<AlertingChannel>>;
    fn mobile_alert_configs(&self) -> Arc<dyn RestResource<MobileAlertConfig>>;
    fn automation_actions(&self) -> Arc<dyn RestResource<AutomationAction>>;
}
