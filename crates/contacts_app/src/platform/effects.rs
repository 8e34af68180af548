use std::sync::{mpsc, Arc};

use contacts_core::{ContactId, ContactPayload, Effect, FetchedContact, Msg};
use contacts_engine::{
    ApiError, ApiSettings, ContactBody, ContactRecord, EmailBody, EngineError, EngineEvent,
    EngineHandle, EventSink,
};
use contacts_logging::{contacts_info, contacts_warn};

use super::app::AppEvent;

/// A delete the user still has to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub id: ContactId,
    pub name: String,
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: &ApiSettings,
        events: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings, Arc::new(MsgSink { tx: events }))?;
        Ok(Self { engine })
    }

    /// Hands network effects to the engine. A confirmation effect is returned
    /// to the caller, which owns the prompt.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Option<ConfirmRequest> {
        let mut confirm = None;
        for effect in effects {
            match effect {
                Effect::FetchContacts { generation } => self.engine.fetch_all(generation),
                Effect::FetchContact { id } => self.engine.fetch_one(id),
                Effect::CreateContact { request, payload } => {
                    contacts_info!(
                        "CreateContact request={} emails={}",
                        request,
                        payload.emails.len()
                    );
                    self.engine.create(request, to_body(payload));
                }
                Effect::UpdateContact {
                    request,
                    id,
                    payload,
                } => {
                    contacts_info!("UpdateContact request={} id={}", request, id);
                    self.engine.update(request, id, to_body(payload));
                }
                Effect::DeleteContact { request, id } => {
                    contacts_info!("DeleteContact request={} id={}", request, id);
                    self.engine.delete(request, id);
                }
                Effect::ConfirmDelete { id, name } => {
                    confirm = Some(ConfirmRequest { id, name });
                }
            }
        }
        confirm
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Msg(map_event(event)));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ContactsFetched {
            generation,
            result: Ok(records),
        } => Msg::ContactsLoaded {
            generation,
            contacts: records.into_iter().map(to_fetched).collect(),
        },
        EngineEvent::ContactsFetched {
            generation,
            result: Err(err),
        } => Msg::ContactsLoadFailed {
            generation,
            message: err.to_string(),
        },
        EngineEvent::ContactFetched {
            result: Ok(record), ..
        } => Msg::ContactFetched(to_fetched(record)),
        EngineEvent::ContactFetched {
            id,
            result: Err(err),
        } => Msg::ContactFetchFailed {
            id,
            message: err.to_string(),
        },
        EngineEvent::ContactSaved {
            request,
            result: Ok(record),
        } => Msg::ContactSaved {
            request,
            contact: to_fetched(record),
        },
        EngineEvent::ContactSaved {
            request,
            result: Err(err),
        } => {
            log_failure("save", request, &err);
            Msg::SaveFailed {
                request,
                message: err.server_message,
            }
        }
        EngineEvent::ContactDeleted {
            request,
            result: Ok(()),
        } => Msg::ContactDeleted { request },
        EngineEvent::ContactDeleted {
            request,
            result: Err(err),
        } => {
            log_failure("delete", request, &err);
            Msg::DeleteFailed {
                request,
                message: err.server_message,
            }
        }
    }
}

fn log_failure(action: &str, request: u64, err: &ApiError) {
    contacts_warn!("{} request {} failed: {}", action, request, err);
}

pub(crate) fn to_body(payload: ContactPayload) -> ContactBody {
    ContactBody {
        id: payload.id,
        first_name: payload.first_name,
        last_name: payload.last_name,
        emails: payload
            .emails
            .into_iter()
            .map(|entry| EmailBody { email: entry.email })
            .collect(),
    }
}

pub(crate) fn to_fetched(record: ContactRecord) -> FetchedContact {
    FetchedContact {
        id: record.id,
        first_name: record.first_name,
        last_name: record.last_name,
        emails: record.emails.into_iter().map(|email| email.email).collect(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
