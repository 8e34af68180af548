/// Server-assigned contact identifier.
pub type ContactId = u64;

/// Client-minted key for one email row. Only unique within the running
/// process; never sent to the server.
pub type EmailId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailEntry {
    pub id: EmailId,
    pub email: String,
}

/// A contact as held in the in-memory list, with locally tagged emails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    pub id: Option<ContactId>,
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<EmailEntry>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A contact as reported by the server, before local email ids are minted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchedContact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// The contact-shaped body submitted on create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPayload {
    /// Present only when updating a persisted contact.
    pub id: Option<ContactId>,
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<EmailEntry>,
}

impl ContactPayload {
    pub fn email_addresses(&self) -> Vec<String> {
        self.emails.iter().map(|entry| entry.email.clone()).collect()
    }
}

/// Working copy of the contact being edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<EmailEntry>,
    pub pending_email: String,
    pub adding_email: bool,
}

/// Deep copy of the persisted values taken when editing started.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<EmailEntry>,
}

impl Snapshot {
    pub fn of(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            emails: contact.emails.clone(),
        }
    }
}
