use contacts_logging::{contacts_debug, contacts_info, contacts_warn};

use crate::state::Mutation;
use crate::{
    AppState, Effect, FetchedContact, Msg, NameField, RequestId, SyncPhase,
    DELETE_FAILED_FALLBACK, SAVE_FAILED_FALLBACK,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RefreshRequested => refresh(&mut state),
        Msg::ContactsLoaded {
            generation,
            contacts,
        } => {
            let count = contacts.len();
            if state.replace_contacts(generation, contacts) {
                contacts_debug!("Loaded {count} contacts (fetch {generation})");
            } else {
                contacts_debug!("Ignoring superseded list from fetch {generation}");
            }
            Vec::new()
        }
        Msg::ContactsLoadFailed {
            generation,
            message,
        } => {
            // The rendered list stays as it was.
            contacts_warn!("Refreshing contacts failed (fetch {generation}): {message}");
            state.refresh_failed(generation);
            Vec::new()
        }
        Msg::SearchChanged(query) => {
            state.set_query(query);
            Vec::new()
        }
        Msg::ContactSelected(id) => match state.contact(id).cloned() {
            Some(contact) => {
                state.start_editing(Some(&contact));
                vec![Effect::FetchContact { id }]
            }
            None => {
                contacts_debug!("Ignoring selection of unknown contact {id}");
                Vec::new()
            }
        },
        Msg::ContactFetched(fetched) => {
            contact_fetched(&mut state, fetched);
            Vec::new()
        }
        Msg::ContactFetchFailed { id, message } => {
            contacts_warn!("Fetching contact {id} failed: {message}");
            Vec::new()
        }
        Msg::NewContactClicked => {
            state.start_editing(None);
            Vec::new()
        }
        Msg::CancelClicked => {
            if state.drafts().is_editing() {
                state.discard_draft();
            }
            Vec::new()
        }
        Msg::FirstNameChanged(value) => {
            edit(&mut state, |drafts| drafts.set_name(NameField::First, value));
            Vec::new()
        }
        Msg::LastNameChanged(value) => {
            edit(&mut state, |drafts| drafts.set_name(NameField::Last, value));
            Vec::new()
        }
        Msg::AddEmailClicked => {
            edit(&mut state, |drafts| drafts.set_adding_email(true));
            Vec::new()
        }
        Msg::PendingEmailChanged(text) => {
            edit(&mut state, |drafts| drafts.set_pending_email_text(text));
            Vec::new()
        }
        Msg::PendingEmailSubmitted => {
            edit(&mut state, |drafts| drafts.commit_pending_email().is_some());
            Vec::new()
        }
        Msg::EmailRemoved(id) => {
            edit(&mut state, |drafts| drafts.remove_email(id));
            Vec::new()
        }
        Msg::SaveClicked => save(&mut state),
        Msg::ContactSaved { request, contact } => saved(&mut state, request, contact),
        Msg::SaveFailed { request, message } => {
            if state.finish_mutation(request).is_some() {
                let message = message.unwrap_or_else(|| SAVE_FAILED_FALLBACK.to_string());
                contacts_warn!("Saving contact failed: {}", message);
                state.notify(message);
            } else {
                contacts_debug!("Ignoring failure of unknown save request {request}");
            }
            Vec::new()
        }
        Msg::DeleteRequested(id) => request_delete(&mut state, id),
        Msg::DeleteDeclined => {
            if let SyncPhase::ConfirmingDelete(id) = state.phase() {
                contacts_debug!("Delete of contact {id} declined");
                state.set_phase(SyncPhase::Idle);
            }
            Vec::new()
        }
        Msg::DeleteConfirmed => match state.phase() {
            SyncPhase::ConfirmingDelete(id) => {
                let request = state.begin_mutation(Mutation::Delete(id));
                vec![Effect::DeleteContact { request, id }]
            }
            _ => Vec::new(),
        },
        Msg::ContactDeleted { request } => deleted(&mut state, request),
        Msg::DeleteFailed { request, message } => {
            if state.finish_mutation(request).is_some() {
                let message = message.unwrap_or_else(|| DELETE_FAILED_FALLBACK.to_string());
                contacts_warn!("Deleting contact failed: {}", message);
                state.notify(message);
            } else {
                contacts_debug!("Ignoring failure of unknown delete request {request}");
            }
            Vec::new()
        }
        Msg::NotificationDismissed => {
            state.dismiss_notification();
            Vec::new()
        }
    };

    (state, effects)
}

fn edit(state: &mut AppState, change: impl FnOnce(&mut crate::DraftStore) -> bool) {
    if change(state.drafts_mut()) {
        state.mark_dirty();
    }
}

fn refresh(state: &mut AppState) -> Vec<Effect> {
    let generation = state.begin_refresh();
    vec![Effect::FetchContacts { generation }]
}

/// Updates the listed copy, and the editor too while the user has not
/// touched it and nothing is in flight.
fn contact_fetched(state: &mut AppState, fetched: FetchedContact) {
    let id = fetched.id;
    let Some(contact) = state.refresh_contact(fetched) else {
        contacts_debug!("Ignoring fetched contact {id}; it is no longer listed");
        return;
    };
    let untouched = state.drafts().editing_id() == Some(id)
        && state.in_flight().is_none()
        && state.phase() == SyncPhase::Idle
        && !state.drafts().has_changes()
        && state.drafts().draft().pending_email.is_empty();
    if untouched {
        state.rebind_draft(&contact);
    }
}

fn save(state: &mut AppState) -> Vec<Effect> {
    if let Some(in_flight) = state.in_flight() {
        contacts_debug!(
            "Save ignored while request {} is outstanding",
            in_flight.request
        );
        return Vec::new();
    }
    if !state.drafts().has_changes() {
        return Vec::new();
    }

    // Typed-but-uncommitted email text becomes real data only here.
    if state.drafts_mut().commit_pending_email().is_some() {
        state.mark_dirty();
    }
    let Some(payload) = state.drafts().to_payload() else {
        return Vec::new();
    };

    let request = state.begin_mutation(Mutation::Save);
    match payload.id {
        Some(id) => {
            contacts_info!("Updating contact {id} (request {request})");
            vec![Effect::UpdateContact {
                request,
                id,
                payload,
            }]
        }
        None => {
            contacts_info!("Creating contact (request {request})");
            vec![Effect::CreateContact { request, payload }]
        }
    }
}

fn saved(state: &mut AppState, request: RequestId, contact: FetchedContact) -> Vec<Effect> {
    let Some(in_flight) = state.finish_mutation(request) else {
        contacts_debug!("Ignoring response to unknown save request {request}");
        return Vec::new();
    };

    if in_flight.session == state.session() {
        let saved = state.drafts_mut().tag(contact);
        state.start_editing(Some(&saved));
    } else {
        contacts_debug!(
            "Save request {request} completed after its editing session ended; keeping current draft"
        );
    }

    refresh(state)
}

fn request_delete(state: &mut AppState, id: crate::ContactId) -> Vec<Effect> {
    if state.in_flight().is_some() || state.phase() != SyncPhase::Idle {
        contacts_debug!("Delete of contact {id} ignored while busy");
        return Vec::new();
    }
    let name = match state.contact(id) {
        Some(contact) => contact.full_name(),
        None if state.drafts().editing_id() == Some(id) => {
            let draft = state.drafts().draft();
            format!("{} {}", draft.first_name, draft.last_name)
        }
        None => {
            contacts_debug!("Ignoring delete of unknown contact {id}");
            return Vec::new();
        }
    };
    state.set_phase(SyncPhase::ConfirmingDelete(id));
    vec![Effect::ConfirmDelete { id, name }]
}

fn deleted(state: &mut AppState, request: RequestId) -> Vec<Effect> {
    let Some(in_flight) = state.finish_mutation(request) else {
        contacts_debug!("Ignoring response to unknown delete request {request}");
        return Vec::new();
    };

    let deleted_id = match in_flight.mutation {
        Mutation::Delete(id) => Some(id),
        Mutation::Save => None,
    };
    let still_editing_it = in_flight.session == state.session()
        && deleted_id.is_some()
        && state.drafts().editing_id() == deleted_id;
    if still_editing_it {
        state.discard_draft();
    }

    refresh(state)
}
