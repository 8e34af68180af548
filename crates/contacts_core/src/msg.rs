use crate::{ContactId, EmailId, FetchedContact, ListGeneration, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for the list to be fetched again (also sent at startup).
    RefreshRequested,
    /// The full contact list arrived for the fetch numbered `generation`.
    ContactsLoaded {
        generation: ListGeneration,
        contacts: Vec<FetchedContact>,
    },
    /// Fetching the list failed; the current list is kept.
    ContactsLoadFailed {
        generation: ListGeneration,
        message: String,
    },
    /// User edited the search box.
    SearchChanged(String),
    /// User picked a contact from the list.
    ContactSelected(ContactId),
    /// The server's current version of one contact.
    ContactFetched(FetchedContact),
    ContactFetchFailed { id: ContactId, message: String },
    /// User clicked "new contact".
    NewContactClicked,
    /// User abandoned the current edit.
    CancelClicked,
    FirstNameChanged(String),
    LastNameChanged(String),
    /// User opened the email input.
    AddEmailClicked,
    /// User typed into the email input (uncommitted).
    PendingEmailChanged(String),
    /// User pressed Enter in the email input.
    PendingEmailSubmitted,
    /// User clicked delete on one email row.
    EmailRemoved(EmailId),
    SaveClicked,
    /// Create or update succeeded with the server's version of the contact.
    ContactSaved {
        request: RequestId,
        contact: FetchedContact,
    },
    /// Create or update failed; `message` is the server's explanation if any.
    SaveFailed {
        request: RequestId,
        message: Option<String>,
    },
    /// User clicked delete on a contact; confirmation is still required.
    DeleteRequested(ContactId),
    DeleteConfirmed,
    DeleteDeclined,
    ContactDeleted { request: RequestId },
    DeleteFailed {
        request: RequestId,
        message: Option<String>,
    },
    /// User acknowledged the current notification.
    NotificationDismissed,
}
