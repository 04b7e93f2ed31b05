//! Triggers and resolves [PagerDuty](https://pagerduty.com) incidents through its generic events API.
//!
//! Global usage:
//!
//! ```no_run
//! pager::set_service_key("3961B1F4AD08424C9DA704DEBCBBF8F3");
//! let incident_key = pager::trigger("Everything is on fire.")?;
//! # Ok::<(), pager::Error>(())
//! ```
//!
//! Individual services:
//!
//! ```no_run
//! let ops_pager = pager::Pager::new("09D0A4B9B3F54047BCD7B65704A58333");
//! let incident_key = ops_pager.trigger("Server out of memory.")?;
//! # Ok::<(), pager::Error>(())
//! ```
//!
//! Including extra details:
//!
//! ```no_run
//! use serde_json::json;
//!
//! pager::trigger_with_details(
//!     "Oh no",
//!     vec![
//!         ("cause", json!("it's a mystery")),
//!         ("responsible", json!("not me!")),
//!     ],
//! )?;
//! # Ok::<(), pager::Error>(())
//! ```
#![deny(warnings)]
#![deny(clippy::dbg_macro)]

pub mod config;
pub mod error;
pub mod event;
pub mod global;
pub mod nonblocking;
mod pager;
mod response;

pub use crate::pager::Pager;
pub use config::{AcceptedStatuses, PagerConfig, DEFAULT_ENDPOINT};
pub use error::{Error, ErrorKind, Result};
pub use event::{IncidentKey, TriggerEvent};
pub use global::{
    configure, configure_thread_local, default_pager, resolve, set_endpoint, set_service_key,
    trigger, trigger_incident_key, trigger_incident_key_with_details, trigger_with_details,
};
pub use nonblocking::AsyncPager;
pub use response::EventResponse;
