use crate::{ContactId, ContactPayload, ListGeneration, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the full list and answer with `ContactsLoaded` or `ContactsLoadFailed`,
    /// echoing `generation`.
    FetchContacts { generation: ListGeneration },
    /// Fetch one contact and answer with `ContactFetched` or `ContactFetchFailed`.
    FetchContact { id: ContactId },
    CreateContact {
        request: RequestId,
        payload: ContactPayload,
    },
    UpdateContact {
        request: RequestId,
        id: ContactId,
        payload: ContactPayload,
    },
    DeleteContact {
        request: RequestId,
        id: ContactId,
    },
    /// Ask the user before deleting; answer with `DeleteConfirmed` or `DeleteDeclined`.
    ConfirmDelete { id: ContactId, name: String },
}
