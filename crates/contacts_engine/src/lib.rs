//! Contacts engine: REST client and request execution off the UI thread.
mod client;
mod engine;
mod types;

pub use client::{ApiSettings, ContactsApi, ReqwestContactsApi};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{
    ApiError, ContactBody, ContactRecord, EmailBody, EmailRecord, EngineError, EngineEvent,
    FailureKind, ListGeneration, RequestId,
};
