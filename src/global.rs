//! The process-wide default [`Pager`], and trigger/resolve functions that go through it.
//!
//! ```no_run
//! pager::set_service_key("3961B1F4AD08424C9DA704DEBCBBF8F3");
//! let incident_key = pager::trigger("Everything is on fire.")?;
//! # Ok::<(), pager::Error>(())
//! ```
//!
//! Every call works on a snapshot of the default pager taken when the call starts. Reconfiguring
//! while other threads are triggering is allowed, but which configuration an in-flight call ends
//! up using is up to the caller to coordinate.

use std::{cell::RefCell, marker::PhantomData, sync::OnceLock};

use parking_lot::RwLock;
use serde_json::Value;

use crate::{error::Result, event::IncidentKey, response::EventResponse, Pager};

static GLOBAL_PAGER: OnceLock<RwLock<Pager>> = OnceLock::new();

thread_local! {
    static TL_PAGER: RefCell<Option<Pager>> = RefCell::new(None);
}

fn global() -> &'static RwLock<Pager> {
    GLOBAL_PAGER.get_or_init(Default::default)
}

/// Returns the pager used by the package-level functions on the current thread
pub fn default_pager() -> Pager {
    TL_PAGER
        .with(|pager| pager.borrow().clone())
        .unwrap_or_else(|| global().read().clone())
}

/// Replaces the process-wide default pager
pub fn configure(pager: Pager) {
    *global().write() = pager;
}

pub fn set_service_key(service_key: impl Into<String>) {
    global().write().config_mut().service_key = service_key.into();
}

pub fn set_endpoint(endpoint: impl Into<String>) {
    global().write().config_mut().endpoint = endpoint.into();
}

/// Overrides the default pager for the current thread only, until the returned guard is dropped
#[must_use = "The thread-local pager is removed as soon as the guard is dropped"]
pub fn configure_thread_local(pager: Pager) -> ThreadLocalGuard {
    let previous = TL_PAGER.with(|tl| tl.borrow_mut().replace(pager));
    ThreadLocalGuard {
        previous,
        _not_send: PhantomData,
    }
}

pub struct ThreadLocalGuard {
    previous: Option<Pager>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ThreadLocalGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        TL_PAGER.with(|tl| *tl.borrow_mut() = previous);
    }
}

pub fn trigger(description: impl Into<String>) -> Result<IncidentKey> {
    default_pager().trigger(description)
}

pub fn trigger_incident_key(
    description: impl Into<String>,
    key: impl Into<IncidentKey>,
) -> Result<IncidentKey> {
    default_pager().trigger_incident_key(description, key)
}

pub fn trigger_with_details<K, V>(
    description: impl Into<String>,
    details: impl IntoIterator<Item = (K, V)>,
) -> Result<IncidentKey>
where
    K: Into<String>,
    V: Into<Value>,
{
    default_pager().trigger_with_details(description, details)
}

pub fn trigger_incident_key_with_details<K, V>(
    description: impl Into<String>,
    key: impl Into<IncidentKey>,
    details: impl IntoIterator<Item = (K, V)>,
) -> Result<IncidentKey>
where
    K: Into<String>,
    V: Into<Value>,
{
    default_pager().trigger_incident_key_with_details(description, key, details)
}

pub fn resolve(key: impl Into<IncidentKey>) -> Result<EventResponse> {
    default_pager().resolve(key)
}
