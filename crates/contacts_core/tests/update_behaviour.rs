use std::sync::Once;

use contacts_core::{update, AppState, Effect, FetchedContact, Msg, Selection};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(contacts_logging::initialize_for_tests);
}

fn fetched(id: u64, first: &str, last: &str, emails: &[&str]) -> FetchedContact {
    FetchedContact {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        emails: emails.iter().map(|e| e.to_string()).collect(),
        created_at: Some("2024-05-01T10:00:00+00:00".to_string()),
        updated_at: Some("2024-05-02T11:30:00+00:00".to_string()),
    }
}

fn loaded(contacts: Vec<FetchedContact>) -> AppState {
    let (state, effects) = update(AppState::new(), Msg::RefreshRequested);
    assert_eq!(effects, vec![Effect::FetchContacts { generation: 1 }]);
    let (state, _) = update(
        state,
        Msg::ContactsLoaded {
            generation: 1,
            contacts,
        },
    );
    state
}

fn apply(state: AppState, msgs: Vec<Msg>) -> AppState {
    msgs.into_iter()
        .fold(state, |state, msg| update(state, msg).0)
}

fn names(state: &AppState) -> Vec<String> {
    state.view().contacts.into_iter().map(|row| row.name).collect()
}

#[test]
fn loaded_list_is_sorted_and_searchable() {
    init_logging();
    let mut state = loaded(vec![
        fetched(1, "Zoe", "Zed", &["zoe@zed.io"]),
        fetched(2, "Al", "Adams", &["al@adams.org"]),
    ]);
    assert!(state.consume_dirty());
    assert_eq!(names(&state), ["Al Adams", "Zoe Zed"]);
    assert_eq!(state.view().total_contacts, 2);
    assert!(!state.view().loading);

    let (state, effects) = update(state, Msg::SearchChanged("zed".to_string()));
    assert!(effects.is_empty());
    assert_eq!(names(&state), ["Zoe Zed"]);
    assert_eq!(state.view().total_contacts, 2);

    let (state, _) = update(state, Msg::SearchChanged("ADAMS.ORG".to_string()));
    assert_eq!(names(&state), ["Al Adams"]);

    let (state, _) = update(state, Msg::SearchChanged(String::new()));
    assert_eq!(names(&state), ["Al Adams", "Zoe Zed"]);
}

#[test]
fn selecting_a_contact_fills_the_editor() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &["ann@x.com", "lee@y.org"])]);

    let (state, effects) = update(state, Msg::ContactSelected(3));
    assert_eq!(effects, vec![Effect::FetchContact { id: 3 }]);

    let view = state.view();
    assert_eq!(view.selection, Selection::Existing(3));
    assert!(view.contacts[0].selected);
    let editor = view.editor.expect("editor open");
    assert!(!editor.is_new);
    assert_eq!(editor.first_name, "Ann");
    assert_eq!(
        editor.emails.iter().map(|e| e.email.as_str()).collect::<Vec<_>>(),
        ["ann@x.com", "lee@y.org"]
    );
    assert!(!editor.can_save);
    assert!(editor.can_delete);
    assert_eq!(
        editor.updated_at.as_deref(),
        Some("2024-05-02T11:30:00+00:00")
    );
}

#[test]
fn selecting_an_unknown_contact_changes_nothing() {
    init_logging();
    let mut state = loaded(vec![fetched(3, "Ann", "Lee", &[])]);
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::ContactSelected(99));
    assert_eq!(state.view().selection, Selection::None);
    assert!(!state.consume_dirty());
}

#[test]
fn editing_and_reverting_disables_save_again() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &["ann@x.com"])]);
    let state = apply(state, vec![Msg::ContactSelected(3)]);

    let state = apply(
        state,
        vec![
            Msg::FirstNameChanged("Annie".to_string()),
            Msg::LastNameChanged("Leigh".to_string()),
        ],
    );
    assert!(state.view().editor.unwrap().can_save);

    let state = apply(
        state,
        vec![
            Msg::FirstNameChanged("Ann ".to_string()),
            Msg::LastNameChanged("Lee".to_string()),
        ],
    );
    assert!(!state.view().editor.unwrap().can_save);
}

#[test]
fn removing_and_re_adding_an_email_reverts() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &["ann@x.com"])]);
    let state = apply(state, vec![Msg::ContactSelected(3)]);
    let original_id = state.view().editor.unwrap().emails[0].id;

    let state = apply(state, vec![Msg::EmailRemoved(original_id)]);
    let editor = state.view().editor.unwrap();
    assert!(editor.emails.is_empty());
    assert!(editor.can_save);

    let state = apply(
        state,
        vec![
            Msg::AddEmailClicked,
            Msg::PendingEmailChanged("ann@x.com".to_string()),
            Msg::PendingEmailSubmitted,
        ],
    );
    let editor = state.view().editor.unwrap();
    assert_eq!(editor.emails.len(), 1);
    assert_ne!(editor.emails[0].id, original_id);
    assert!(!editor.adding_email);
    assert!(!editor.can_save);
}

#[test]
fn pending_email_affects_save_but_not_the_list() {
    init_logging();
    let state = apply(AppState::new(), vec![Msg::NewContactClicked]);
    assert!(!state.view().editor.unwrap().can_save);

    let state = apply(
        state,
        vec![
            Msg::AddEmailClicked,
            Msg::PendingEmailChanged("ann@x".to_string()),
        ],
    );
    let editor = state.view().editor.unwrap();
    assert!(editor.adding_email);
    assert!(!editor.can_save);

    let state = apply(state, vec![Msg::PendingEmailChanged("ann@x.com".to_string())]);
    let editor = state.view().editor.unwrap();
    assert!(editor.can_save);
    assert!(editor.emails.is_empty());
    assert_eq!(editor.pending_email, "ann@x.com");
}

#[test]
fn invalid_pending_email_is_not_committed_on_enter() {
    init_logging();
    let state = apply(
        AppState::new(),
        vec![
            Msg::NewContactClicked,
            Msg::AddEmailClicked,
            Msg::PendingEmailChanged("a b@c.d".to_string()),
            Msg::PendingEmailSubmitted,
        ],
    );
    let editor = state.view().editor.unwrap();
    assert!(editor.emails.is_empty());
    assert_eq!(editor.pending_email, "a b@c.d");
    assert!(editor.adding_email);
}

#[test]
fn cancel_discards_the_draft() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &[])]);
    let state = apply(
        state,
        vec![
            Msg::ContactSelected(3),
            Msg::FirstNameChanged("Changed".to_string()),
            Msg::CancelClicked,
        ],
    );
    let view = state.view();
    assert_eq!(view.selection, Selection::None);
    assert_eq!(view.editor, None);
    assert!(!view.contacts[0].selected);
    assert_eq!(state.contact(3).unwrap().first_name, "Ann");
}

#[test]
fn refresh_keeps_the_draft_in_progress() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &[])]);
    let state = apply(
        state,
        vec![
            Msg::ContactSelected(3),
            Msg::FirstNameChanged("Annie".to_string()),
            Msg::RefreshRequested,
        ],
    );
    assert!(state.view().loading);

    let state = apply(
        state,
        vec![Msg::ContactsLoaded {
            generation: 2,
            contacts: vec![fetched(3, "Ann", "Lee", &[]), fetched(4, "Bo", "Ray", &[])],
        }],
    );
    let view = state.view();
    assert_eq!(view.selection, Selection::Existing(3));
    let editor = view.editor.unwrap();
    assert_eq!(editor.first_name, "Annie");
    assert!(editor.can_save);
    assert_eq!(view.total_contacts, 2);
}

#[test]
fn failed_refresh_keeps_the_current_list() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &[])]);
    let state = apply(
        state,
        vec![
            Msg::RefreshRequested,
            Msg::ContactsLoadFailed {
                generation: 2,
                message: "network error".to_string(),
            },
        ],
    );
    let view = state.view();
    assert_eq!(names(&state), ["Ann Lee"]);
    assert!(!view.loading);
    assert_eq!(view.notification, None);
}

#[test]
fn edits_without_a_selection_are_ignored() {
    let state = AppState::new();
    let (next, _) = update(state, Msg::FirstNameChanged("X".to_string()));
    let (next, _) = update(next, Msg::PendingEmailChanged("a@b.co".to_string()));
    let (mut next, effects) = update(next, Msg::SaveClicked);

    assert!(effects.is_empty());
    assert_eq!(next.view().editor, None);
    assert!(!next.consume_dirty());
}

#[test]
fn fetched_contact_refreshes_an_untouched_editor() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &["ann@x.com"])]);
    let state = apply(state, vec![Msg::ContactSelected(3)]);

    let mut newer = fetched(3, "Ann", "Leigh", &["ann@x.com", "ann@y.org"]);
    newer.updated_at = Some("2024-06-01T09:00:00+00:00".to_string());
    let (state, effects) = update(state, Msg::ContactFetched(newer));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(names(&state), ["Ann Leigh"]);
    assert_eq!(view.selection, Selection::Existing(3));
    let editor = view.editor.unwrap();
    assert_eq!(editor.last_name, "Leigh");
    assert_eq!(editor.emails.len(), 2);
    assert_eq!(
        editor.updated_at.as_deref(),
        Some("2024-06-01T09:00:00+00:00")
    );
    assert!(!editor.can_save);
}

#[test]
fn fetched_contact_leaves_local_edits_alone() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &[])]);
    let state = apply(
        state,
        vec![
            Msg::ContactSelected(3),
            Msg::FirstNameChanged("Annie".to_string()),
            Msg::ContactFetched(fetched(3, "Ann", "Leigh", &[])),
        ],
    );

    assert_eq!(names(&state), ["Ann Leigh"]);
    let editor = state.view().editor.unwrap();
    assert_eq!(editor.first_name, "Annie");
    assert_eq!(editor.last_name, "Lee");
    assert!(editor.can_save);
}

#[test]
fn fetched_contact_that_is_no_longer_listed_is_ignored() {
    init_logging();
    let mut state = loaded(vec![fetched(3, "Ann", "Lee", &[])]);
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::ContactFetched(fetched(8, "Cy", "Fox", &[])));
    assert!(effects.is_empty());
    assert_eq!(names(&state), ["Ann Lee"]);
    assert!(!state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::ContactFetchFailed {
            id: 3,
            message: "server rejected the request (404)".to_string(),
        },
    );
    assert_eq!(names(&state), ["Ann Lee"]);
    assert!(!state.consume_dirty());
}
