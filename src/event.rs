use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Identifies an incident on the PagerDuty side. Either chosen by the caller for deduplication or
/// allocated by PagerDuty on the first trigger
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentKey(String);

impl IncidentKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derives a stable key from arbitrary content, so repeated triggers for the same condition
    /// land on the same incident
    pub fn digest(content: impl AsRef<[u8]>) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(content.as_ref());
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for IncidentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IncidentKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for IncidentKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for IncidentKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<&IncidentKey> for IncidentKey {
    fn from(key: &IncidentKey) -> Self {
        key.clone()
    }
}

impl PartialEq<str> for IncidentKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for IncidentKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A trigger event, before it is bound to a service key.
///
/// ```
/// use pager::TriggerEvent;
///
/// let event = TriggerEvent::new("Server out of memory.")
///     .incident_key("srv-oom")
///     .detail("free_mb", 12)
///     .detail("host", "db-1");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TriggerEvent {
    description: String,
    incident_key: Option<IncidentKey>,
    details: Map<String, Value>,
    invalid_detail: Option<(String, Arc<serde_json::Error>)>,
}

impl TriggerEvent {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Sets the deduplication key. An empty key leaves the event without one, letting PagerDuty
    /// allocate a new incident
    pub fn incident_key(mut self, key: impl Into<IncidentKey>) -> Self {
        let key = key.into();
        self.incident_key = if key.is_empty() { None } else { Some(key) };
        self
    }

    /// Adds a detail. A value that can't be represented as JSON fails the send, before any
    /// request is made
    pub fn detail(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        let name = name.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.details.insert(name, value);
            }
            Err(e) => {
                if self.invalid_detail.is_none() {
                    self.invalid_detail = Some((name, Arc::new(e)));
                }
            }
        }
        self
    }

    pub fn details<K, V, I>(mut self, details: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.details
            .extend(details.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn get_incident_key(&self) -> Option<&IncidentKey> {
        self.incident_key.as_ref()
    }

    pub fn get_details(&self) -> &Map<String, Value> {
        &self.details
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match &self.invalid_detail {
            Some((name, source)) => Err(Error::InvalidDetail {
                name: name.clone(),
                source: source.clone(),
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn request<'a>(&'a self, service_key: &'a str) -> TriggerRequest<'a> {
        TriggerRequest {
            service_key,
            event_type: EventType::Trigger,
            description: &self.description,
            details: &self.details,
            incident_key: self.incident_key.as_ref(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EventType {
    Trigger,
    Resolve,
}

#[derive(Debug, Serialize)]
pub(crate) struct TriggerRequest<'a> {
    service_key: &'a str,
    event_type: EventType,
    description: &'a str,
    details: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    incident_key: Option<&'a IncidentKey>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResolveRequest<'a> {
    service_key: &'a str,
    event_type: EventType,
    incident_key: &'a IncidentKey,
}

impl<'a> ResolveRequest<'a> {
    pub(crate) fn new(service_key: &'a str, incident_key: &'a IncidentKey) -> Self {
        Self {
            service_key,
            event_type: EventType::Resolve,
            incident_key,
        }
    }
}
