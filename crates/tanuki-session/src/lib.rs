//! Binding layer between the browser-facing cookie slots and the remote
//! Session/Visit records living at the user service.
//!
//! The tower middleware ([`SlotLayer`]) reads the two cookie slots off every
//! request and exposes them through a [`SlotHandle`] in the request
//! extensions; [`RecordBinding`] resolves recovered identifiers to records
//! over HTTP/JSON and drives the consume-once CSRF challenge cycle.

#[macro_use]
extern crate tracing;

pub use self::{
    binding::RecordBinding,
    client::{HttpRecordStore, RecordStore},
    error::{BoxError, Error},
    future::ResponseFuture,
    handle::SlotHandle,
    layer::SlotLayer,
    policy::CookiePolicy,
    record::{Session, Visit},
    service::SlotService,
};

mod binding;
mod client;
mod error;
mod future;
mod handle;
mod layer;
mod policy;
mod record;
mod service;

/// Name of the short-lived authenticated-session cookie slot
const SESSION_COOKIE_NAME: &str = "short-time";

/// Name of the long-lived anonymous-visit cookie slot
const VISIT_COOKIE_NAME: &str = "long-time";
