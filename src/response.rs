use std::collections::HashMap;

use reqwest::StatusCode;

use crate::{
    config::AcceptedStatuses,
    error::{Error, Result},
    event::IncidentKey,
};

/// The body PagerDuty returns for an accepted event, decoded as a flat mapping of strings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    fields: HashMap<String, String>,
}

impl EventResponse {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn incident_key(&self) -> Option<IncidentKey> {
        self.get("incident_key")
            .filter(|key| !key.is_empty())
            .map(IncidentKey::from)
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status")
    }

    pub fn message(&self) -> Option<&str> {
        self.get("message")
    }

    pub fn is_success(&self) -> bool {
        self.status() == Some("success")
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }
}

/// Turns a received status and the outcome of reading its body into a decoded response or an
/// error. Shared by the blocking and async clients
pub(crate) fn interpret(
    accepted: &AcceptedStatuses,
    status: StatusCode,
    body: std::result::Result<String, reqwest::Error>,
) -> Result<EventResponse> {
    if !accepted.accepts(status) {
        return Err(match body {
            Ok(body) => Error::Server { status, body },
            Err(source) => Error::ServerBodyUnreadable { status, source },
        });
    }

    let body = body.map_err(Error::UnreadableResponse)?;
    log::debug!("PagerDuty response ({status}): {body:?}");

    match serde_json::from_str(&body) {
        Ok(fields) => Ok(EventResponse { fields }),
        Err(source) => Err(Error::MalformedResponse { body, source }),
    }
}

pub(crate) fn incident_key_of(response: EventResponse) -> Result<IncidentKey> {
    response.incident_key().ok_or_else(|| Error::MissingIncidentKey {
        body: serde_json::to_string(&response.fields).unwrap_or_default(),
    })
}
