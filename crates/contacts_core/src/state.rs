use contacts_logging::contacts_debug;

use crate::view_model::{AppViewModel, ContactRowView, EditorView, EmailRowView};
use crate::{visible_contacts, Contact, ContactId, DraftStore, FetchedContact};

/// Identifies one create, update or delete request so its completion can be
/// matched against what is currently in flight.
pub type RequestId = u64;

/// Numbers list fetches in issue order so an older reply never replaces a
/// newer one.
pub type ListGeneration = u64;

pub const SAVE_FAILED_FALLBACK: &str = "Failed to save contact.";
pub const DELETE_FAILED_FALLBACK: &str = "Failed to delete contact.";

/// What the editor is currently bound to. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    New,
    Existing(ContactId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Saving,
    /// Waiting for the user to confirm deleting this contact.
    ConfirmingDelete(ContactId),
    Deleting,
}

/// A blocking message for the user, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mutation {
    Save,
    Delete(ContactId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub request: RequestId,
    /// Editing session the request was issued from.
    pub session: u64,
    pub mutation: Mutation,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    contacts: Vec<Contact>,
    query: String,
    drafts: DraftStore,
    phase: SyncPhase,
    in_flight: Option<InFlight>,
    session: u64,
    next_request_id: RequestId,
    notification: Option<Notification>,
    /// Newest list fetch issued.
    list_issued: ListGeneration,
    /// Newest list fetch whose reply was applied.
    list_applied: ListGeneration,
    loading: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let selected_id = self.drafts.editing_id();
        let rows = visible_contacts(&self.contacts, &self.query)
            .into_iter()
            .filter_map(|contact| {
                let id = contact.id?;
                Some(ContactRowView {
                    id,
                    name: contact.full_name(),
                    primary_email: contact.emails.first().map(|entry| entry.email.clone()),
                    selected: selected_id == Some(id),
                })
            })
            .collect();

        AppViewModel {
            contacts: rows,
            total_contacts: self.contacts.len(),
            query: self.query.clone(),
            selection: self.drafts.selection(),
            editor: self.editor_view(),
            phase: self.phase,
            loading: self.loading,
            notification: self
                .notification
                .as_ref()
                .map(|notification| notification.message.clone()),
            dirty: self.dirty,
        }
    }

    fn editor_view(&self) -> Option<EditorView> {
        if !self.drafts.is_editing() {
            return None;
        }
        let draft = self.drafts.draft();
        let persisted = self
            .drafts
            .editing_id()
            .and_then(|id| self.contact(id));
        let busy = self.in_flight.is_some();
        Some(EditorView {
            is_new: self.drafts.editing_id().is_none(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            emails: draft
                .emails
                .iter()
                .map(|entry| EmailRowView {
                    id: entry.id,
                    email: entry.email.clone(),
                })
                .collect(),
            pending_email: draft.pending_email.clone(),
            adding_email: draft.adding_email,
            can_save: !busy && self.drafts.has_changes(),
            can_delete: !busy && self.drafts.editing_id().is_some(),
            created_at: persisted.and_then(|contact| contact.created_at.clone()),
            updated_at: persisted.and_then(|contact| contact.updated_at.clone()),
        })
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn drafts(&self) -> &DraftStore {
        &self.drafts
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == Some(id))
    }

    pub(crate) fn drafts_mut(&mut self) -> &mut DraftStore {
        &mut self.drafts
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if self.query != query {
            self.query = query;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_refresh(&mut self) -> ListGeneration {
        self.list_issued += 1;
        self.loading = true;
        self.mark_dirty();
        self.list_issued
    }

    /// Replaces the list wholesale unless a newer fetch was already applied.
    /// The draft and selection are left alone. Returns whether the list was
    /// replaced.
    pub(crate) fn replace_contacts(
        &mut self,
        generation: ListGeneration,
        fetched: Vec<FetchedContact>,
    ) -> bool {
        if generation <= self.list_applied {
            return false;
        }
        let contacts: Vec<Contact> = fetched
            .into_iter()
            .map(|record| self.drafts.tag(record))
            .collect();
        self.contacts = contacts;
        self.list_applied = generation;
        self.loading = generation < self.list_issued;
        self.mark_dirty();
        true
    }

    /// Stops the loading indicator once the newest fetch has failed.
    pub(crate) fn refresh_failed(&mut self, generation: ListGeneration) {
        if generation >= self.list_issued && self.loading {
            self.loading = false;
            self.mark_dirty();
        }
    }

    /// Swaps in the server's version of one listed contact. Returns the
    /// stored contact, or `None` when it is no longer listed.
    pub(crate) fn refresh_contact(&mut self, fetched: FetchedContact) -> Option<Contact> {
        let index = self
            .contacts
            .iter()
            .position(|contact| contact.id == Some(fetched.id))?;
        let contact = self.drafts.tag(fetched);
        self.contacts[index] = contact.clone();
        self.mark_dirty();
        Some(contact)
    }

    /// Rebinds an untouched editor to fresher data for the same contact
    /// without starting a new editing session.
    pub(crate) fn rebind_draft(&mut self, contact: &Contact) {
        self.drafts.start_editing(Some(contact));
        self.mark_dirty();
    }

    /// Starts a new editing session on `contact`, or on a blank contact.
    pub(crate) fn start_editing(&mut self, contact: Option<&Contact>) {
        self.drafts.start_editing(contact);
        self.new_session();
    }

    pub(crate) fn discard_draft(&mut self) {
        self.drafts.discard();
        self.new_session();
    }

    fn new_session(&mut self) {
        self.session += 1;
        if let SyncPhase::ConfirmingDelete(id) = self.phase {
            contacts_debug!("Abandoning delete confirmation for contact {id}");
            self.phase = SyncPhase::Idle;
        }
        self.notification = None;
        self.mark_dirty();
    }

    pub(crate) fn session(&self) -> u64 {
        self.session
    }

    pub(crate) fn in_flight(&self) -> Option<InFlight> {
        self.in_flight
    }

    pub(crate) fn set_phase(&mut self, phase: SyncPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.mark_dirty();
        }
    }

    /// Records a new outstanding mutation and moves into its busy phase.
    pub(crate) fn begin_mutation(&mut self, mutation: Mutation) -> RequestId {
        self.next_request_id += 1;
        let request = self.next_request_id;
        self.in_flight = Some(InFlight {
            request,
            session: self.session,
            mutation,
        });
        self.set_phase(match mutation {
            Mutation::Save => SyncPhase::Saving,
            Mutation::Delete(_) => SyncPhase::Deleting,
        });
        request
    }

    /// Takes the outstanding mutation if `request` is the one in flight.
    pub(crate) fn finish_mutation(&mut self, request: RequestId) -> Option<InFlight> {
        match self.in_flight {
            Some(in_flight) if in_flight.request == request => {
                self.in_flight = None;
                self.set_phase(SyncPhase::Idle);
                Some(in_flight)
            }
            _ => None,
        }
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification {
            message: message.into(),
        });
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            self.mark_dirty();
        }
    }
}
