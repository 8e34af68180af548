use crate::{is_valid_email, Draft, Snapshot};

/// Whether the draft differs from what is persisted, which decides if saving
/// is offered at all.
///
/// A new contact (no `pristine`) counts as changed once anything has been
/// entered. An existing one compares trimmed names and the ordered email
/// strings against the snapshot. Pending email text counts in both cases, but
/// only when it would actually be committed on save.
pub fn has_changes(draft: &Draft, pristine: Option<&Snapshot>, pending_email: &str) -> bool {
    let pending_counts = !pending_email.is_empty() && is_valid_email(pending_email);
    let first_name = draft.first_name.trim();
    let last_name = draft.last_name.trim();

    match pristine {
        None => {
            !first_name.is_empty()
                || !last_name.is_empty()
                || !draft.emails.is_empty()
                || pending_counts
        }
        Some(snapshot) => {
            first_name != snapshot.first_name
                || last_name != snapshot.last_name
                || !draft
                    .emails
                    .iter()
                    .map(|entry| entry.email.as_str())
                    .eq(snapshot.emails.iter().map(|entry| entry.email.as_str()))
                || pending_counts
        }
    }
}
