use serde_json::Value;

use crate::{
    config::PagerConfig,
    error::{Error, Result},
    event::{IncidentKey, ResolveRequest, TriggerEvent},
    response::EventResponse,
};

/// A blocking client for PagerDuty's generic events API. Cloning is cheap and clones share the
/// underlying connection pool.
///
/// ```no_run
/// let ops_pager = pager::Pager::new("09D0A4B9B3F54047BCD7B65704A58333");
/// let incident_key = ops_pager.trigger("Server out of memory.")?;
/// ops_pager.resolve(&incident_key)?;
/// # Ok::<(), pager::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pager {
    config: PagerConfig,
    client: reqwest::blocking::Client,
}

impl Pager {
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

    pub(crate) fn config_mut(&mut self) -> &mut PagerConfig {
        &mut self.config
    }

    pub fn trigger(&self, description: impl Into<String>) -> Result<IncidentKey> {
        self.send_trigger(&TriggerEvent::new(description))
    }

    /// Triggers an incident under `key`. Triggering again with the same key refers to the same
    /// incident
    pub fn trigger_incident_key(
        &self,
        description: impl Into<String>,
        key: impl Into<IncidentKey>,
    ) -> Result<IncidentKey> {
        self.send_trigger(&TriggerEvent::new(description).incident_key(key))
    }

    pub fn trigger_with_details<K, V>(
        &self,
        description: impl Into<String>,
        details: impl IntoIterator<Item = (K, V)>,
    ) -> Result<IncidentKey>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.send_trigger(&TriggerEvent::new(description).details(details))
    }

    pub fn trigger_incident_key_with_details<K, V>(
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
    }

    /// Sends a trigger event, returning the key of the incident it opened or updated
    pub fn send_trigger(&self, event: &TriggerEvent) -> Result<IncidentKey> {
        let url = self.config.validate()?;
        event.validate()?;
        log::debug!(
            "Triggering PagerDuty incident {:?} (incident key: {:?})",
            event.get_description(),
            event.get_incident_key()
        );
        let response = self.post(url, &event.request(self.config.service_key()))?;
        crate::response::incident_key_of(response)
    }

    /// Resolves the incident identified by `key`. Whatever PagerDuty reports for unknown or already
    /// resolved incidents is returned as is
    pub fn resolve(&self, key: impl Into<IncidentKey>) -> Result<EventResponse> {
        let url = self.config.validate()?;
        let key = key.into();
        if key.is_empty() {
            return Err(Error::EmptyIncidentKey);
        }
        log::debug!("Resolving PagerDuty incident {key}");
        self.post(url, &ResolveRequest::new(self.config.service_key(), &key))
    }

    fn post(&self, url: reqwest::Url, body: &impl serde::Serialize) -> Result<EventResponse> {
        let mut request = self.client.post(url).json(body);
        if let Some(timeout) = self.config.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().map_err(Error::Transport)?;
        let status = response.status();
        crate::response::interpret(self.config.accepted_statuses(), status, response.text())
    }
}
