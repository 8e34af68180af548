use std::sync::{mpsc, Arc};
use std::thread;

use contacts_logging::contacts_debug;

use crate::client::{ApiSettings, ContactsApi, ReqwestContactsApi};
use crate::{ContactBody, EngineError, EngineEvent, ListGeneration, RequestId};

/// Receives completions from the engine's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    FetchAll { generation: ListGeneration },
    FetchOne { id: u64 },
    Create { request: RequestId, body: ContactBody },
    Update {
        request: RequestId,
        id: u64,
        body: ContactBody,
    },
    Delete { request: RequestId, id: u64 },
}

/// Runs API calls on a background tokio runtime. Completions are handed to
/// the sink in the order they finish.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: &ApiSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let api: Arc<dyn ContactsApi> = Arc::new(ReqwestContactsApi::new(settings)?);
        Self::with_api(api, sink)
    }

    pub fn with_api(
        api: Arc<dyn ContactsApi>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    sink.emit(handle_command(api.as_ref(), command).await);
                });
            }
            contacts_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn fetch_all(&self, generation: ListGeneration) {
        let _ = self.cmd_tx.send(EngineCommand::FetchAll { generation });
    }

    pub fn fetch_one(&self, id: u64) {
        let _ = self.cmd_tx.send(EngineCommand::FetchOne { id });
    }

    pub fn create(&self, request: RequestId, body: ContactBody) {
        let _ = self.cmd_tx.send(EngineCommand::Create { request, body });
    }

    pub fn update(&self, request: RequestId, id: u64, body: ContactBody) {
        let _ = self.cmd_tx.send(EngineCommand::Update { request, id, body });
    }

    pub fn delete(&self, request: RequestId, id: u64) {
        let _ = self.cmd_tx.send(EngineCommand::Delete { request, id });
    }
}

async fn handle_command(api: &dyn ContactsApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchAll { generation } => EngineEvent::ContactsFetched {
            generation,
            result: api.list().await,
        },
        EngineCommand::FetchOne { id } => EngineEvent::ContactFetched {
            id,
            result: api.get(id).await,
        },
        EngineCommand::Create { request, body } => EngineEvent::ContactSaved {
            request,
            result: api.create(&body).await,
        },
        EngineCommand::Update { request, id, body } => EngineEvent::ContactSaved {
            request,
            result: api.update(id, &body).await,
        },
        EngineCommand::Delete { request, id } => EngineEvent::ContactDeleted {
            request,
            result: api.delete(id).await,
        },
    }
}
