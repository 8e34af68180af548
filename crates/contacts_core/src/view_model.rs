use crate::{ContactId, EmailId, Selection, SyncPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Filtered and sorted rows, in display order.
    pub contacts: Vec<ContactRowView>,
    pub total_contacts: usize,
    pub query: String,
    pub selection: Selection,
    pub editor: Option<EditorView>,
    pub phase: SyncPhase,
    pub loading: bool,
    pub notification: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRowView {
    pub id: ContactId,
    pub name: String,
    pub primary_email: Option<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub is_new: bool,
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<EmailRowView>,
    pub pending_email: String,
    pub adding_email: bool,
    pub can_save: bool,
    pub can_delete: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// One committed email; its delete affordance sends `Msg::EmailRemoved(id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRowView {
    pub id: EmailId,
    pub email: String,
}
