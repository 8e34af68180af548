use contacts_core::{
    update, AppState, ContactPayload, Effect, FetchedContact, Msg, Selection, SyncPhase,
    DELETE_FAILED_FALLBACK, SAVE_FAILED_FALLBACK,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    contacts_logging::initialize_for_tests();
}

fn fetched(id: u64, first: &str, last: &str, emails: &[&str]) -> FetchedContact {
    FetchedContact {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        emails: emails.iter().map(|e| e.to_string()).collect(),
        ..FetchedContact::default()
    }
}

fn apply(state: AppState, msgs: Vec<Msg>) -> AppState {
    msgs.into_iter()
        .fold(state, |state, msg| update(state, msg).0)
}

fn loaded(contacts: Vec<FetchedContact>) -> AppState {
    apply(
        AppState::new(),
        vec![
            Msg::RefreshRequested,
            Msg::ContactsLoaded {
                generation: 1,
                contacts,
            },
        ],
    )
}

fn single_effect(effects: Vec<Effect>) -> Effect {
    assert_eq!(effects.len(), 1, "expected one effect, got {effects:?}");
    effects.into_iter().next().unwrap()
}

fn create_payload(effect: Effect) -> (u64, ContactPayload) {
    match effect {
        Effect::CreateContact { request, payload } => (request, payload),
        other => panic!("expected CreateContact, got {other:?}"),
    }
}

#[test]
fn new_contact_save_round_trip() {
    init_logging();
    let state = apply(
        AppState::new(),
        vec![
            Msg::NewContactClicked,
            Msg::FirstNameChanged("Ann".to_string()),
            Msg::LastNameChanged("Lee".to_string()),
            Msg::AddEmailClicked,
            Msg::PendingEmailChanged("ann@x.com".to_string()),
            Msg::PendingEmailSubmitted,
        ],
    );

    let (state, effects) = update(state, Msg::SaveClicked);
    let (request, payload) = create_payload(single_effect(effects));
    assert_eq!(payload.id, None);
    assert_eq!(payload.first_name, "Ann");
    assert_eq!(payload.last_name, "Lee");
    assert_eq!(payload.email_addresses(), vec!["ann@x.com".to_string()]);
    assert_eq!(state.view().phase, SyncPhase::Saving);
    assert!(!state.view().editor.unwrap().can_save);

    let (state, effects) = update(
        state,
        Msg::ContactSaved {
            request,
            contact: fetched(7, "Ann", "Lee", &["ann@x.com"]),
        },
    );
    assert_eq!(effects, vec![Effect::FetchContacts { generation: 1 }]);
    let view = state.view();
    assert_eq!(view.phase, SyncPhase::Idle);
    assert_eq!(view.selection, Selection::Existing(7));
    assert!(!view.editor.as_ref().unwrap().can_save);
    assert!(!state.drafts().has_changes());

    let state = apply(
        state,
        vec![Msg::ContactsLoaded {
            generation: 1,
            contacts: vec![fetched(7, "Ann", "Lee", &["ann@x.com"])],
        }],
    );
    let view = state.view();
    assert_eq!(view.selection, Selection::Existing(7));
    assert!(view.contacts[0].selected);
    assert!(!view.editor.unwrap().can_save);
}

#[test]
fn save_commits_valid_pending_email_first() {
    init_logging();
    let state = loaded(vec![fetched(5, "Bo", "Ray", &["bo@ray.io"])]);
    let state = apply(
        state,
        vec![
            Msg::ContactSelected(5),
            Msg::AddEmailClicked,
            Msg::PendingEmailChanged("bo@work.io".to_string()),
        ],
    );

    let (state, effects) = update(state, Msg::SaveClicked);
    match single_effect(effects) {
        Effect::UpdateContact { id, payload, .. } => {
            assert_eq!(id, 5);
            assert_eq!(payload.id, Some(5));
            assert_eq!(
                payload.email_addresses(),
                vec!["bo@ray.io".to_string(), "bo@work.io".to_string()]
            );
        }
        other => panic!("expected UpdateContact, got {other:?}"),
    }
    let editor = state.view().editor.unwrap();
    assert_eq!(editor.pending_email, "");
    assert_eq!(editor.emails.len(), 2);
}

#[test]
fn save_leaves_invalid_pending_text_alone() {
    init_logging();
    let state = loaded(vec![fetched(5, "Bo", "Ray", &[])]);
    let state = apply(
        state,
        vec![
            Msg::ContactSelected(5),
            Msg::LastNameChanged("Rae".to_string()),
            Msg::PendingEmailChanged("bo@".to_string()),
        ],
    );

    let (state, effects) = update(state, Msg::SaveClicked);
    match single_effect(effects) {
        Effect::UpdateContact { payload, .. } => assert!(payload.emails.is_empty()),
        other => panic!("expected UpdateContact, got {other:?}"),
    }
    assert_eq!(state.view().editor.unwrap().pending_email, "bo@");
}

#[test]
fn save_without_changes_does_nothing() {
    init_logging();
    let state = loaded(vec![fetched(5, "Bo", "Ray", &[])]);
    let state = apply(state, vec![Msg::ContactSelected(5)]);

    let (state, effects) = update(state, Msg::SaveClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().phase, SyncPhase::Idle);
}

#[test]
fn failed_save_keeps_draft_and_reports() {
    init_logging();
    let state = apply(
        AppState::new(),
        vec![
            Msg::NewContactClicked,
            Msg::FirstNameChanged("Ann".to_string()),
        ],
    );
    let (state, effects) = update(state, Msg::SaveClicked);
    let (request, _) = create_payload(single_effect(effects));

    let (state, effects) = update(
        state,
        Msg::SaveFailed {
            request,
            message: Some("First name and last name are required".to_string()),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(
        view.notification.as_deref(),
        Some("First name and last name are required")
    );
    assert_eq!(view.phase, SyncPhase::Idle);
    assert_eq!(view.selection, Selection::New);
    let editor = view.editor.unwrap();
    assert_eq!(editor.first_name, "Ann");
    assert!(editor.can_save);

    // Retry, this time with no server message.
    let (state, effects) = update(state, Msg::SaveClicked);
    let (request, _) = create_payload(single_effect(effects));
    let state = apply(
        state,
        vec![Msg::SaveFailed {
            request,
            message: None,
        }],
    );
    assert_eq!(state.view().notification.as_deref(), Some(SAVE_FAILED_FALLBACK));

    let state = apply(state, vec![Msg::NotificationDismissed]);
    assert_eq!(state.view().notification, None);
}

#[test]
fn second_save_while_saving_is_ignored() {
    init_logging();
    let state = apply(
        AppState::new(),
        vec![
            Msg::NewContactClicked,
            Msg::FirstNameChanged("Ann".to_string()),
        ],
    );
    let (state, first) = update(state, Msg::SaveClicked);
    assert_eq!(first.len(), 1);

    let (state, second) = update(state, Msg::SaveClicked);
    assert!(second.is_empty());
    assert_eq!(state.view().phase, SyncPhase::Saving);
}

#[test]
fn stale_save_response_does_not_overwrite_newer_draft() {
    init_logging();
    let state = loaded(vec![
        fetched(1, "Ann", "Lee", &[]),
        fetched(2, "Bo", "Ray", &[]),
    ]);
    let state = apply(
        state,
        vec![
            Msg::ContactSelected(1),
            Msg::FirstNameChanged("Annie".to_string()),
        ],
    );
    let (state, effects) = update(state, Msg::SaveClicked);
    let request = match single_effect(effects) {
        Effect::UpdateContact { request, .. } => request,
        other => panic!("expected UpdateContact, got {other:?}"),
    };

    // User moves on before the response arrives.
    let state = apply(
        state,
        vec![
            Msg::ContactSelected(2),
            Msg::LastNameChanged("Rae".to_string()),
        ],
    );
    let (state, effects) = update(
        state,
        Msg::ContactSaved {
            request,
            contact: fetched(1, "Annie", "Lee", &[]),
        },
    );

    assert_eq!(effects, vec![Effect::FetchContacts { generation: 2 }]);
    let view = state.view();
    assert_eq!(view.selection, Selection::Existing(2));
    let editor = view.editor.unwrap();
    assert_eq!(editor.last_name, "Rae");
    assert!(editor.can_save);
}

#[test]
fn unknown_request_ids_are_ignored() {
    init_logging();
    let state = apply(
        AppState::new(),
        vec![
            Msg::NewContactClicked,
            Msg::FirstNameChanged("Ann".to_string()),
        ],
    );
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::ContactSaved {
            request: 42,
            contact: fetched(9, "Zed", "Zed", &[]),
        },
    );
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::ContactDeleted { request: 42 });
    assert!(effects.is_empty());
    assert_eq!(state.view(), before.view());
}

#[test]
fn declining_delete_changes_nothing() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &[])]);
    let state = apply(state, vec![Msg::ContactSelected(3)]);
    let before = state.view();

    let (state, effects) = update(state, Msg::DeleteRequested(3));
    assert_eq!(
        effects,
        vec![Effect::ConfirmDelete {
            id: 3,
            name: "Ann Lee".to_string(),
        }]
    );
    assert_eq!(state.view().phase, SyncPhase::ConfirmingDelete(3));

    let (state, effects) = update(state, Msg::DeleteDeclined);
    assert!(effects.is_empty());
    let after = state.view();
    assert_eq!(after.phase, SyncPhase::Idle);
    assert_eq!(after.contacts, before.contacts);
    assert_eq!(after.selection, before.selection);
    assert_eq!(after.editor, before.editor);
}

#[test]
fn confirmed_delete_clears_selection_and_refreshes() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &[]), fetched(4, "Bo", "Ray", &[])]);
    let state = apply(state, vec![Msg::ContactSelected(3), Msg::DeleteRequested(3)]);

    let (state, effects) = update(state, Msg::DeleteConfirmed);
    let request = match single_effect(effects) {
        Effect::DeleteContact { request, id } => {
            assert_eq!(id, 3);
            request
        }
        other => panic!("expected DeleteContact, got {other:?}"),
    };
    assert_eq!(state.view().phase, SyncPhase::Deleting);

    let (state, effects) = update(state, Msg::ContactDeleted { request });
    assert_eq!(effects, vec![Effect::FetchContacts { generation: 2 }]);
    let view = state.view();
    assert_eq!(view.selection, Selection::None);
    assert_eq!(view.editor, None);
    assert_eq!(view.phase, SyncPhase::Idle);

    let state = apply(
        state,
        vec![Msg::ContactsLoaded {
            generation: 2,
            contacts: vec![fetched(4, "Bo", "Ray", &[])],
        }],
    );
    assert_eq!(state.view().total_contacts, 1);
}

#[test]
fn failed_delete_keeps_selection_and_reports() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &[])]);
    let state = apply(
        state,
        vec![
            Msg::ContactSelected(3),
            Msg::FirstNameChanged("Annie".to_string()),
            Msg::DeleteRequested(3),
        ],
    );
    let (state, effects) = update(state, Msg::DeleteConfirmed);
    let request = match single_effect(effects) {
        Effect::DeleteContact { request, .. } => request,
        other => panic!("expected DeleteContact, got {other:?}"),
    };

    let (state, effects) = update(
        state,
        Msg::DeleteFailed {
            request,
            message: None,
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.notification.as_deref(), Some(DELETE_FAILED_FALLBACK));
    assert_eq!(view.selection, Selection::Existing(3));
    assert_eq!(view.editor.unwrap().first_name, "Annie");
    assert_eq!(view.total_contacts, 1);
}

#[test]
fn switching_contacts_abandons_a_pending_confirmation() {
    init_logging();
    let state = loaded(vec![fetched(3, "Ann", "Lee", &[]), fetched(4, "Bo", "Ray", &[])]);
    let state = apply(
        state,
        vec![
            Msg::ContactSelected(3),
            Msg::DeleteRequested(3),
            Msg::ContactSelected(4),
        ],
    );
    assert_eq!(state.view().phase, SyncPhase::Idle);

    let (_state, effects) = update(state, Msg::DeleteConfirmed);
    assert!(effects.is_empty());
}

#[test]
fn older_list_reply_does_not_undo_the_post_save_refresh() {
    init_logging();
    let state = loaded(vec![fetched(1, "Bo", "Ray", &[])]);
    let (state, effects) = update(state, Msg::RefreshRequested);
    assert_eq!(effects, vec![Effect::FetchContacts { generation: 2 }]);

    let state = apply(
        state,
        vec![
            Msg::NewContactClicked,
            Msg::FirstNameChanged("Ann".to_string()),
            Msg::LastNameChanged("Lee".to_string()),
        ],
    );
    let (state, effects) = update(state, Msg::SaveClicked);
    let (request, _) = create_payload(single_effect(effects));
    let (state, effects) = update(
        state,
        Msg::ContactSaved {
            request,
            contact: fetched(7, "Ann", "Lee", &[]),
        },
    );
    assert_eq!(effects, vec![Effect::FetchContacts { generation: 3 }]);

    let state = apply(
        state,
        vec![Msg::ContactsLoaded {
            generation: 3,
            contacts: vec![fetched(1, "Bo", "Ray", &[]), fetched(7, "Ann", "Lee", &[])],
        }],
    );
    assert!(!state.view().loading);

    // The refresh issued before the save answers last.
    let state = apply(
        state,
        vec![Msg::ContactsLoaded {
            generation: 2,
            contacts: vec![fetched(1, "Bo", "Ray", &[])],
        }],
    );
    let view = state.view();
    assert_eq!(view.total_contacts, 2);
    assert_eq!(view.selection, Selection::Existing(7));
    assert!(view.contacts.iter().any(|row| row.id == 7 && row.selected));
    assert!(!view.loading);
}

#[test]
fn loading_lasts_until_the_newest_fetch_answers() {
    init_logging();
    let state = apply(
        AppState::new(),
        vec![Msg::RefreshRequested, Msg::RefreshRequested],
    );

    let state = apply(
        state,
        vec![Msg::ContactsLoaded {
            generation: 1,
            contacts: vec![fetched(1, "Bo", "Ray", &[])],
        }],
    );
    let view = state.view();
    assert_eq!(view.total_contacts, 1);
    assert!(view.loading);

    let state = apply(
        state,
        vec![Msg::ContactsLoadFailed {
            generation: 2,
            message: "network error".to_string(),
        }],
    );
    let view = state.view();
    assert_eq!(view.total_contacts, 1);
    assert!(!view.loading);
}
