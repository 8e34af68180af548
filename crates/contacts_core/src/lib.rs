//! Contacts core: pure state machine and view-model helpers.
mod changes;
mod draft;
mod effect;
mod filter;
mod model;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use changes::has_changes;
pub use draft::{DraftStore, NameField};
pub use effect::Effect;
pub use filter::{compare_last_names, visible_contacts};
pub use model::{
    Contact, ContactId, ContactPayload, Draft, EmailEntry, EmailId, FetchedContact, Snapshot,
};
pub use msg::Msg;
pub use state::{
    AppState, ListGeneration, Notification, RequestId, Selection, SyncPhase,
    DELETE_FAILED_FALLBACK, SAVE_FAILED_FALLBACK,
};
pub use update::update;
pub use validate::is_valid_email;
pub use view_model::{AppViewModel, ContactRowView, EditorView, EmailRowView};
