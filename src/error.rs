use std::sync::Arc;

use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The client is not usable as configured. Raised before any I/O
    Configuration,
    /// The request could not be completed
    Transport,
    /// PagerDuty answered with a status outside the accepted set
    Server,
    /// PagerDuty accepted the request, but its response could not be read
    ResponseFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("PagerDuty service key not set")]
    MissingServiceKey,

    #[error("Invalid PagerDuty endpoint {endpoint:?}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Detail {name:?} cannot be represented as JSON")]
    InvalidDetail {
        name: String,
        #[source]
        source: Arc<serde_json::Error>,
    },

    #[error("Cannot resolve a PagerDuty incident without an incident key")]
    EmptyIncidentKey,

    #[error("Failed sending PagerDuty request")]
    Transport(#[source] reqwest::Error),

    #[error("PagerDuty request failed ({}): {body}", status_line(.status))]
    Server { status: StatusCode, body: String },

    #[error("PagerDuty request failed ({}) and an error occurred while reading the response body", status_line(.status))]
    ServerBodyUnreadable {
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("PagerDuty request was successful but an error occurred while reading the response body")]
    UnreadableResponse(#[source] reqwest::Error),

    #[error("PagerDuty request was successful but the response body is not a JSON object of strings: {body:?}")]
    MalformedResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("PagerDuty request was successful but the response carries no incident_key: {body:?}")]
    MissingIncidentKey { body: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingServiceKey
            | Self::InvalidEndpoint { .. }
            | Self::InvalidDetail { .. }
            | Self::EmptyIncidentKey => ErrorKind::Configuration,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Server { .. } | Self::ServerBodyUnreadable { .. } => ErrorKind::Server,
            Self::UnreadableResponse(_)
            | Self::MalformedResponse { .. }
            | Self::MissingIncidentKey { .. } => ErrorKind::ResponseFormat,
        }
    }

    /// The HTTP status PagerDuty answered with, for server errors
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } | Self::ServerBodyUnreadable { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// The numeric code, followed by the standard reason phrase when the code has one. Reason phrases
/// sent by the server are not available through reqwest
fn status_line(status: &StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}
