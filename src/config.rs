use std::time::Duration;

use reqwest::{StatusCode, Url};

use crate::error::{Error, Result};

/// PagerDuty's generic event creation endpoint
pub const DEFAULT_ENDPOINT: &str =
    "https://events.pagerduty.com/generic/2010-04-15/create_event.json";

/// The set of HTTP statuses treated as an accepted event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AcceptedStatuses {
    /// Any 2xx status
    AnySuccess,
    /// Exactly the listed statuses
    Only(Vec<StatusCode>),
}

impl Default for AcceptedStatuses {
    fn default() -> Self {
        Self::AnySuccess
    }
}

impl AcceptedStatuses {
    /// 200, 201 and 204 only
    pub fn legacy() -> Self {
        Self::Only(vec![
            StatusCode::OK,
            StatusCode::CREATED,
            StatusCode::NO_CONTENT,
        ])
    }

    pub fn accepts(&self, status: StatusCode) -> bool {
        match self {
            Self::AnySuccess => status.is_success(),
            Self::Only(statuses) => statuses.contains(&status),
        }
    }
}

/// Configuration shared by [`crate::Pager`] and [`crate::AsyncPager`].
///
/// ```
/// use pager::PagerConfig;
///
/// let config = PagerConfig::builder()
///     .service_key("3961B1F4AD08424C9DA704DEBCBBF8F3")
///     .timeout(std::time::Duration::from_secs(10))
///     .build();
/// ```
#[derive(Clone, Default, typed_builder::TypedBuilder)]
pub struct PagerConfig {
    #[builder(setter(into))]
    pub(crate) service_key: String,

    #[builder(default = DEFAULT_ENDPOINT.to_owned(), setter(into))]
    pub(crate) endpoint: String,

    #[builder(default)]
    pub(crate) accepted_statuses: AcceptedStatuses,

    #[builder(default, setter(strip_option))]
    pub(crate) timeout: Option<Duration>,
}

impl PagerConfig {
    pub fn service_key(&self) -> &str {
        &self.service_key
    }

    pub fn endpoint(&self) -> &str {
        if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            &self.endpoint
        }
    }

    pub fn accepted_statuses(&self) -> &AcceptedStatuses {
        &self.accepted_statuses
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Checks that requests can be sent with this configuration, returning the endpoint URL
    pub fn validate(&self) -> Result<Url> {
        if self.service_key.is_empty() {
            return Err(Error::MissingServiceKey);
        }
        Url::parse(self.endpoint()).map_err(|source| Error::InvalidEndpoint {
            endpoint: self.endpoint().to_owned(),
            source,
        })
    }
}

impl std::fmt::Debug for PagerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerConfig")
            .field(
                "service_key",
                &if self.service_key.is_empty() {
                    "<unset>"
                } else {
                    "<redacted>"
                },
            )
            .field("endpoint", &self.endpoint())
            .field("accepted_statuses", &self.accepted_statuses)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_statuses() {
        let any = AcceptedStatuses::default();
        assert!(any.accepts(StatusCode::OK));
        assert!(any.accepts(StatusCode::ACCEPTED));
        assert!(!any.accepts(StatusCode::MOVED_PERMANENTLY));
        assert!(!any.accepts(StatusCode::BAD_REQUEST));

        let legacy = AcceptedStatuses::legacy();
        assert!(legacy.accepts(StatusCode::OK));
        assert!(legacy.accepts(StatusCode::NO_CONTENT));
        assert!(!legacy.accepts(StatusCode::ACCEPTED));
    }

    #[test]
    fn test_validate() {
        let config = PagerConfig::default();
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert!(matches!(config.validate(), Err(Error::MissingServiceKey)));

        let config = PagerConfig::builder().service_key("key").build();
        assert_eq!(config.validate().unwrap().as_str(), DEFAULT_ENDPOINT);

        let config = PagerConfig::builder()
            .service_key("key")
            .endpoint("not a url")
            .build();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_debug_hides_service_key() {
        let config = PagerConfig::builder().service_key("SECRET").build();
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("SECRET"));
        assert!(dbg.contains("<redacted>"));
    }
}
