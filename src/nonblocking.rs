//! An async flavor of [`crate::Pager`], built on reqwest's async client

use serde_json::Value;

use crate::{
    config::PagerConfig,
    error::{Error, Result},
    event::{IncidentKey, ResolveRequest, TriggerEvent},
    response::EventResponse,
};

#[derive(Clone, Debug, Default)]
pub struct AsyncPager {
    config: PagerConfig,
    client: reqwest::Client,
}

impl AsyncPager {
    pub fn new(service_key: impl Into<String>) -> Self {
        Self::with_config(PagerConfig::builder().service_key(service_key).build())
    }

    pub fn with_config(config: PagerConfig) -> Self {
        Self {
            config,
            client: Default::default(),
        }
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub async fn trigger(&self, description: impl Into<String>) -> Result<IncidentKey> {
        self.send_trigger(&TriggerEvent::new(description)).await
    }

    pub async fn trigger_incident_key(
        &self,
        description: impl Into<String>,
        key: impl Into<IncidentKey>,
    ) -> Result<IncidentKey> {
        self.send_trigger(&TriggerEvent::new(description).incident_key(key))
            .await
    }

    pub async fn trigger_with_details<K, V>(
        &self,
        description: impl Into<String>,
        details: impl IntoIterator<Item = (K, V)>,
    ) -> Result<IncidentKey>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.send_trigger(&TriggerEvent::new(description).details(details))
            .await
    }

    pub async fn trigger_incident_key_with_details<K, V>(
        &self,
        description: impl Into<String>,
        key: impl Into<IncidentKey>,
        details: impl IntoIterator<Item = (K, V)>,
    ) -> Result<IncidentKey>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.send_trigger(
            &TriggerEvent::new(description)
                .incident_key(key)
                .details(details),
        )
        .await
    }

    pub async fn send_trigger(&self, event: &TriggerEvent) -> Result<IncidentKey> {
        let url = self.config.validate()?;
        event.validate()?;
        log::debug!(
            "Triggering PagerDuty incident {:?} (incident key: {:?})",
            event.get_description(),
            event.get_incident_key()
        );
        let response = self
            .post(url, &event.request(self.config.service_key()))
            .await?;
        crate::response::incident_key_of(response)
    }

    pub async fn resolve(&self, key: impl Into<IncidentKey>) -> Result<EventResponse> {
        let url = self.config.validate()?;
        let key = key.into();
        if key.is_empty() {
            return Err(Error::EmptyIncidentKey);
        }
        log::debug!("Resolving PagerDuty incident {key}");
        self.post(url, &ResolveRequest::new(self.config.service_key(), &key))
            .await
    }

    async fn post(
        &self,
        url: reqwest::Url,
        body: &(impl serde::Serialize + Sync),
    ) -> Result<EventResponse> {
        let mut request = self.client.post(url).json(body);
        if let Some(timeout) = self.config.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(Error::Transport)?;
        let status = response.status();
        crate::response::interpret(
            self.config.accepted_statuses(),
            status,
            response.text().await,
        )
    }
}
