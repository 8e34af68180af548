use crate::{
    has_changes, is_valid_email, Contact, ContactId, ContactPayload, Draft, EmailEntry, EmailId,
    FetchedContact, Selection, Snapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    First,
    Last,
}

/// Owns the selection, the working copy and the pristine snapshot, and keeps
/// the three consistent with each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStore {
    selection: Selection,
    draft: Draft,
    pristine: Option<Snapshot>,
    next_email_id: EmailId,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self {
            selection: Selection::None,
            draft: Draft::default(),
            pristine: None,
            next_email_id: 1,
        }
    }
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn pristine(&self) -> Option<&Snapshot> {
        self.pristine.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.selection != Selection::None
    }

    /// Begins editing `contact`, or a blank new contact when `None`.
    ///
    /// A contact without a server id is treated as new: its fields are copied
    /// but no snapshot is taken.
    pub fn start_editing(&mut self, contact: Option<&Contact>) {
        match contact {
            Some(contact) => {
                self.draft = Draft {
                    first_name: contact.first_name.clone(),
                    last_name: contact.last_name.clone(),
                    emails: contact.emails.clone(),
                    ..Draft::default()
                };
                match contact.id {
                    Some(id) => {
                        self.selection = Selection::Existing(id);
                        self.pristine = Some(Snapshot::of(contact));
                    }
                    None => {
                        self.selection = Selection::New;
                        self.pristine = None;
                    }
                }
            }
            None => {
                self.selection = Selection::New;
                self.draft = Draft::default();
                self.pristine = None;
            }
        }
    }

    /// Returns `false` when nothing is being edited.
    pub fn set_name(&mut self, field: NameField, value: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        let value = value.into();
        match field {
            NameField::First => self.draft.first_name = value,
            NameField::Last => self.draft.last_name = value,
        }
        true
    }

    /// Appends `email` under a freshly minted id. Invalid addresses are
    /// refused without error.
    pub fn add_email(&mut self, email: impl Into<String>) -> Option<EmailId> {
        let email = email.into();
        if !self.is_editing() || !is_valid_email(&email) {
            return None;
        }
        let id = self.mint_email_id();
        self.draft.emails.push(EmailEntry { id, email });
        Some(id)
    }

    /// Removes the entry with `id`; a missing id is a no-op.
    pub fn remove_email(&mut self, id: EmailId) -> bool {
        let before = self.draft.emails.len();
        self.draft.emails.retain(|entry| entry.id != id);
        self.draft.emails.len() != before
    }

    pub fn set_pending_email_text(&mut self, text: impl Into<String>) -> bool {
        if !self.is_editing() {
            return false;
        }
        self.draft.pending_email = text.into();
        true
    }

    pub fn set_adding_email(&mut self, adding: bool) -> bool {
        if !self.is_editing() || self.draft.adding_email == adding {
            return false;
        }
        self.draft.adding_email = adding;
        true
    }

    /// Moves valid pending text into the email list and leaves adding mode.
    /// Empty or invalid pending text is left in place.
    pub fn commit_pending_email(&mut self) -> Option<EmailId> {
        if self.draft.pending_email.is_empty() {
            return None;
        }
        let pending = self.draft.pending_email.clone();
        let id = self.add_email(pending)?;
        self.draft.pending_email.clear();
        self.draft.adding_email = false;
        Some(id)
    }

    pub fn has_changes(&self) -> bool {
        self.is_editing()
            && has_changes(&self.draft, self.pristine.as_ref(), &self.draft.pending_email)
    }

    /// Builds the submit body from committed values only.
    pub fn to_payload(&self) -> Option<ContactPayload> {
        let id = match self.selection {
            Selection::None => return None,
            Selection::New => None,
            Selection::Existing(id) => Some(id),
        };
        Some(ContactPayload {
            id,
            first_name: self.draft.first_name.trim().to_string(),
            last_name: self.draft.last_name.trim().to_string(),
            emails: self.draft.emails.clone(),
        })
    }

    pub fn discard(&mut self) {
        self.selection = Selection::None;
        self.draft = Draft::default();
        self.pristine = None;
    }

    /// Converts a server record into a list entry, tagging every email with a
    /// new local id.
    pub fn tag(&mut self, fetched: FetchedContact) -> Contact {
        let emails = fetched
            .emails
            .into_iter()
            .map(|email| EmailEntry {
                id: self.mint_email_id(),
                email,
            })
            .collect();
        Contact {
            id: Some(fetched.id),
            first_name: fetched.first_name,
            last_name: fetched.last_name,
            emails,
            created_at: fetched.created_at,
            updated_at: fetched.updated_at,
        }
    }

    pub fn editing_id(&self) -> Option<ContactId> {
        match self.selection {
            Selection::Existing(id) => Some(id),
            Selection::None | Selection::New => None,
        }
    }

    fn mint_email_id(&mut self) -> EmailId {
        let id = self.next_email_id;
        self.next_email_id += 1;
        id
    }
}
