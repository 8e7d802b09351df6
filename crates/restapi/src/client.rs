//! reqwest-backed REST bindings.

use std::marker::PhantomData;
use std::sync::Arc;

use instana_core::ProviderConfig;
use reqwest::{Method, StatusCode};

use crate::alerting_channel::{AlertingChannel, ALERTING_CHANNELS_PATH};
use crate::automation_action::{AutomationAction, AUTOMATION_ACTIONS_PATH};
use crate::error::RestError;
use crate::mobile_alert_config::{MobileAlertConfig, MOBILE_ALERT_CONFIGS_PATH};
use crate::resource::{InstanaApi, InstanaDataObject, RestResource};

/// Shared connection state. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct InstanaClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    base_url: String,
    api_token: String,
    http: reqwest::Client,
}

impl InstanaClient {
    pub fn new(base_url: &str, api_token: &str, tls_skip_verify: bool) -> Result<Self, RestError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(tls_skip_verify)
            .build()?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_token: api_token.to_string(),
                http,
            }),
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, RestError> {
        config
            .validate()
            .map_err(|e| RestError::Config(e.to_string()))?;
        let base_url = config
            .base_url()
            .map_err(|e| RestError::Config(e.to_string()))?;
        let token = config.api_token.as_deref().unwrap_or_default();
        Self::new(&base_url, token, config.tls_skip_verify)
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.inner
            .http
            .request(method, self.url(path))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("apiToken {}", self.inner.api_token),
            )
            .header(reqwest::header::ACCEPT, "application/json")
    }

    pub fn endpoint<T: InstanaDataObject>(&self, path: &'static str, update_method: Method) -> RestEndpoint<T> {
        RestEndpoint {
            client: self.clone(),
            path,
            update_method,
            _marker: PhantomData,
        }
    }
}

impl InstanaApi for InstanaClient {
    fn alerting_channels(&self) -> Arc<dyn RestResource<AlertingChannel>> {
        Arc::new(self.endpoint::<AlertingChannel>(ALERTING_CHANNELS_PATH, Method::PUT))
    }

    fn mobile_alert_configs(&self) -> Arc<dyn RestResource<MobileAlertConfig>> {
        Arc::new(self.endpoint::<MobileAlertConfig>(MOBILE_ALERT_CONFIGS_PATH, Method::POST))
    }

    fn automation_actions(&self) -> Arc<dyn RestResource<AutomationAction>> {
        Arc::new(self.endpoint::<AutomationAction>(AUTOMATION_ACTIONS_PATH, Method::PUT))
    }
}

/// One resource collection under `path`.
#[derive(Debug, Clone)]
pub struct RestEndpoint<T> {
    client: InstanaClient,
    path: &'static str,
    update_method: Method,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RestEndpoint<T> {
    pub fn path(&self) -> &str {
        self.path
    }

    pub fn object_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }
}

/// Turn a non-success response into an error, logging the body.
async fn check_status(
    response: reqwest::Response,
    method: &Method,
    path: &str,
    id: Option<&str>,
) -> Result<reqwest::Response, RestError> {
    let status = response.status();
    tracing::debug!(%method, path, %status, "instana api response");
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(RestError::NotFound {
                path: path.to_string(),
                id: id.to_string(),
            });
        }
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%method, path, %status, body = %body, "instana api request failed");
    Err(RestError::Api {
        status: status.as_u16(),
        body,
    })
}

#[async_trait::async_trait]
impl<T: InstanaDataObject> RestResource<T> for RestEndpoint<T> {
    async fn get_all(&self) -> Result<Vec<T>, RestError> {
        let response = self.client.request(Method::GET, self.path).send().await?;
        let response = check_status(response, &Method::GET, self.path, None).await?;
        Ok(response.json().await?)
    }

    async fn get(&self, id: &str) -> Result<T, RestError> {
        let path = self.object_path(id);
        let response = self.client.request(Method::GET, &path).send().await?;
        let response = check_status(response, &Method::GET, self.path, Some(id)).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, data: &T) -> Result<T, RestError> {
        let body = serde_json::to_vec(data)?;
        let response = self
            .client
            .request(Method::POST, self.path)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let response = check_status(response, &Method::POST, self.path, None).await?;
        Ok(response.json().await?)
    }

    async fn update(&self, data: &T) -> Result<T, RestError> {
        let path = self.object_path(data.id());
        let body = serde_json::to_vec(data)?;
        let response = self
            .client
            .request(self.update_method.clone(), &path)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let response =
            check_status(response, &self.update_method, self.path, Some(data.id())).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<(), RestError> {
        let path = self.object_path(id);
        let response = self.client.request(Method::DELETE, &path).send().await?;
        check_status(response, &Method::DELETE, self.path, Some(id)).await?;
        Ok(())
    }
}
