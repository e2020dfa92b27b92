use crate::key;
use crossterm::event::KeyCode;
use tourdesk::api::{LookupData, LookupRequest, Submission, SubmissionOutcome};
use tourdesk::constants::ERROR_CLIENT_NAME_REQUIRED;
use tourdesk::forms::{FormKind, Lookup, LookupSlot, LookupTicket};
use tourdesk::models::{City, ClientCard, Country};
use tourdesk::session::Section;
use tourdesk::ui::components::DialogComponent;
use tourdesk::ui::core::{Action, Component, DialogType};

fn type_text(dialog: &mut DialogComponent, text: &str) {
    for c in text.chars() {
        dialog.handle_key_events(key(KeyCode::Char(c)));
    }
}

/// Open a new-client form and fill in both names
fn filled_client_form() -> DialogComponent {
    let mut dialog = DialogComponent::new(1);
    let action = dialog.update(Action::ShowDialog(DialogType::Form(FormKind::NewClient)));
    assert!(matches!(action, Action::None));
    assert!(dialog.is_visible());

    type_text(&mut dialog, "Lee");
    dialog.handle_key_events(key(KeyCode::Tab));
    type_text(&mut dialog, "Ann");
    dialog
}

fn submit_id(action: Action) -> u64 {
    match action {
        Action::Submit { id, .. } => id,
        other => panic!("expected a submission, got {:?}", other),
    }
}

#[test]
fn test_submission_ids_increase() {
    let mut dialog = filled_client_form();
    let action = dialog.handle_key_events(key(KeyCode::Enter));
    assert!(matches!(
        &action,
        Action::Submit { submission: Submission::CreateClient(client), .. } if client.last_name == "Lee"
    ));
    let first = submit_id(action);
    assert_eq!(dialog.awaiting(), Some(first));

    // A second Enter while saving is ignored
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));

    dialog.update(Action::SubmissionFailed {
        id: first,
        message: "❌ Failed to create client".to_string(),
    });
    dialog.handle_key_events(key(KeyCode::Esc));

    let second = submit_id(dialog.handle_key_events(key(KeyCode::Enter)));
    assert!(second > first);
}

#[test]
fn test_matching_outcome_closes_form() {
    let mut dialog = filled_client_form();
    let id = submit_id(dialog.handle_key_events(key(KeyCode::Enter)));

    let outcome = SubmissionOutcome::ClientCreated(ClientCard::default());
    let passed = dialog.update(Action::SubmissionCompleted { id, outcome });
    assert!(matches!(passed, Action::SubmissionCompleted { .. }));
    assert!(!dialog.is_visible());
    assert_eq!(dialog.awaiting(), None);
}

#[test]
fn test_stale_outcome_leaves_form_open() {
    let mut dialog = filled_client_form();
    let id = submit_id(dialog.handle_key_events(key(KeyCode::Enter)));

    let outcome = SubmissionOutcome::ClientCreated(ClientCard::default());
    let passed = dialog.update(Action::SubmissionCompleted { id: id + 10, outcome });
    assert!(matches!(passed, Action::SubmissionCompleted { .. }));
    assert!(dialog.is_visible());
    assert_eq!(dialog.awaiting(), Some(id));

    dialog.update(Action::SubmissionFailed {
        id: id + 10,
        message: "late".to_string(),
    });
    assert_eq!(dialog.alert(), None);
}

#[test]
fn test_failure_raises_alert_over_form() {
    let mut dialog = filled_client_form();
    let id = submit_id(dialog.handle_key_events(key(KeyCode::Enter)));

    dialog.update(Action::SubmissionFailed {
        id,
        message: "❌ Failed to create client: timeout".to_string(),
    });
    assert_eq!(dialog.alert(), Some("❌ Failed to create client: timeout"));
    assert!(dialog.is_visible());

    // Any key dismisses the alert without reaching the form
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::None));
    assert_eq!(dialog.alert(), None);
    assert!(dialog.is_visible());
}

#[test]
fn test_invalid_form_shows_alert() {
    let mut dialog = DialogComponent::new(1);
    dialog.update(Action::ShowDialog(DialogType::Form(FormKind::NewClient)));

    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::None));
    assert_eq!(dialog.alert(), Some(ERROR_CLIENT_NAME_REQUIRED));
    assert_eq!(dialog.awaiting(), None);
}

#[test]
fn test_form_with_lookups_asks_for_them() {
    let mut dialog = DialogComponent::new(1);
    let action = dialog.update(Action::ShowDialog(DialogType::Form(FormKind::NewOffer)));
    assert!(matches!(action, Action::RunLookups { ref lookups, .. } if lookups.len() == 1));

    assert!(matches!(dialog.handle_key_events(key(KeyCode::Esc)), Action::HideDialog));
    dialog.update(Action::HideDialog);
    assert!(!dialog.is_visible());

    // Answers for a closed form are dropped
    let late = dialog.update(Action::LookupLoaded {
        form: dialog.form_seq(),
        ticket: LookupTicket {
            slot: LookupSlot::Countries,
            generation: 1,
        },
        result: Ok(LookupData::Countries(Vec::new())),
    });
    assert!(matches!(late, Action::None));
}

#[test]
fn test_search_box_reports_each_change() {
    let mut dialog = DialogComponent::new(1);
    dialog.update(Action::ShowDialog(DialogType::Search {
        section: Section::ClientInfo,
        term: "le".to_string(),
    }));
    assert_eq!(dialog.search_text(), "le");

    let action = dialog.handle_key_events(key(KeyCode::Char('e')));
    assert!(matches!(
        action,
        Action::SearchChanged { section: Section::ClientInfo, ref term } if term == "lee"
    ));
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Left)), Action::None));
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Enter)), Action::HideDialog));

    dialog.update(Action::HideDialog);
    assert_eq!(dialog.search_text(), "");
}

#[test]
fn test_text_dialogs_close_on_other_keys() {
    let mut dialog = DialogComponent::new(1);
    dialog.update(Action::ShowDialog(DialogType::Info("Saved".to_string())));
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Down)), Action::None));
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Char('x'))), Action::HideDialog));

    dialog.update(Action::ShowDialog(DialogType::Help));
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Char('x'))), Action::None));
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Char('?'))), Action::HideDialog));

    dialog.update(Action::ShowDialog(DialogType::Logs));
    assert!(matches!(dialog.handle_key_events(key(KeyCode::Char('G'))), Action::HideDialog));
}

fn lookups_of(action: Action) -> (u64, Vec<Lookup>) {
    match action {
        Action::RunLookups { form, lookups } => (form, lookups),
        other => panic!("expected lookups, got {:?}", other),
    }
}

fn answer(dialog: &mut DialogComponent, form: u64, lookup: &Lookup, data: LookupData) -> Action {
    dialog.update(Action::LookupLoaded {
        form,
        ticket: lookup.ticket,
        result: Ok(data),
    })
}

fn countries() -> LookupData {
    LookupData::Countries(vec![
        Country {
            country_id: 1,
            name: "France".to_string(),
        },
        Country {
            country_id: 2,
            name: "Italy".to_string(),
        },
    ])
}

fn city(name: &str) -> LookupData {
    LookupData::Cities(vec![City {
        city_id: 10,
        name: name.to_string(),
    }])
}

#[test]
fn test_lookup_for_closed_form_skips_next_form() {
    let mut dialog = DialogComponent::new(1);

    // First offer form asks for French cities, then closes
    let (first, initial) = lookups_of(dialog.update(Action::ShowDialog(DialogType::Form(FormKind::NewOffer))));
    answer(&mut dialog, first, &initial[0], countries());
    let (_, france) = lookups_of(dialog.handle_key_events(key(KeyCode::Right)));
    assert_eq!(france[0].request, LookupRequest::Cities { country_id: 1 });
    dialog.update(Action::HideDialog);

    // Second form picks Italy and receives its cities first
    let (second, initial) = lookups_of(dialog.update(Action::ShowDialog(DialogType::Form(FormKind::NewOffer))));
    assert!(second > first);
    answer(&mut dialog, second, &initial[0], countries());
    let (_, italy) = lookups_of(dialog.handle_key_events(key(KeyCode::Left)));
    assert_eq!(italy[0].request, LookupRequest::Cities { country_id: 2 });
    assert_eq!(italy[0].ticket, france[0].ticket);

    answer(&mut dialog, second, &italy[0], city("Rome"));
    let late = answer(&mut dialog, first, &france[0], city("Paris"));
    assert!(matches!(late, Action::None));

    dialog.handle_key_events(key(KeyCode::Tab));
    dialog.handle_key_events(key(KeyCode::Right));
    let action = dialog.handle_key_events(key(KeyCode::Enter));
    assert!(matches!(
        &action,
        Action::Submit { submission: Submission::CreateOffer(offer), .. }
            if offer.country == "Italy" && offer.city == "Rome"
    ));
}
