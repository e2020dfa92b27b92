use crate::{ctrl, key, press, type_text};
use crossterm::event::KeyCode;
use tourdesk::api::{LookupData, LookupRequest, Submission, SubmissionOutcome};
use tourdesk::constants::ERROR_CLIENT_NAME_REQUIRED;
use tourdesk::forms::client_form::{EditClientField, NewPurchaseField, PurchaseField};
use tourdesk::forms::{EditClientForm, Form, FormOutcome, NewClientForm};
use tourdesk::models::{ClientCard, Country, NewPurchase, Purchase, PurchaseStatus};

fn purchase(id: i64, number: &str, status_id: i64) -> Purchase {
    Purchase {
        tour_purchase_id: id,
        purchase_number: number.to_string(),
        purchase_date: "2025-03-01T10:00:00".to_string(),
        status_id,
        price: 100.0,
        ..Purchase::default()
    }
}

fn client() -> ClientCard {
    ClientCard {
        client_id: 7,
        last_name: "Lee".to_string(),
        first_name: "Ann".to_string(),
        phone_number: "+100".to_string(),
        purchases: vec![purchase(1, "P-1", 1), purchase(2, "P-2", 2)],
        ..ClientCard::default()
    }
}

fn statuses() -> LookupData {
    LookupData::PurchaseStatuses(vec![
        PurchaseStatus {
            status_id: 1,
            status_name: "Paid".to_string(),
        },
        PurchaseStatus {
            status_id: 2,
            status_name: "Cancelled".to_string(),
        },
    ])
}

/// Open the edit form and answer every initial lookup
fn open_edit() -> EditClientForm {
    let mut form = EditClientForm::new(client());
    let lookups = form.initial_lookups();
    assert_eq!(lookups.len(), 6);
    for lookup in lookups {
        let data = match lookup.request {
            LookupRequest::PurchaseStatuses => statuses(),
            LookupRequest::Countries => LookupData::Countries(vec![Country {
                country_id: 3,
                name: "Peru".to_string(),
            }]),
            LookupRequest::Durations => LookupData::Durations(vec![7, 14]),
            LookupRequest::Activities => LookupData::Activities(vec!["Hiking".to_string()]),
            LookupRequest::InsuranceTypes => LookupData::InsuranceTypes(vec!["Medical".to_string()]),
            LookupRequest::InsuranceCompanies => LookupData::InsuranceCompanies(Vec::new()),
            other => panic!("unexpected lookup {:?}", other),
        };
        form.apply_lookup(lookup.ticket, Ok(data));
    }
    form
}

#[test]
fn test_new_client_requires_names() {
    let mut form = NewClientForm::new();
    type_text(&mut form, "Lee");
    assert_eq!(
        press(&mut form, KeyCode::Enter),
        FormOutcome::Invalid(ERROR_CLIENT_NAME_REQUIRED.to_string())
    );

    press(&mut form, KeyCode::Tab);
    type_text(&mut form, " Ann ");
    press(&mut form, KeyCode::Tab);
    press(&mut form, KeyCode::Tab);
    type_text(&mut form, "+371 2000");

    let FormOutcome::Submit(Submission::CreateClient(new_client)) = press(&mut form, KeyCode::Enter) else {
        panic!("expected a create submission");
    };
    assert_eq!(new_client.last_name, "Lee");
    assert_eq!(new_client.first_name, "Ann");
    assert_eq!(new_client.middle_name, "");
    assert_eq!(new_client.phone_number, "+371 2000");
}

#[test]
fn test_new_client_escape_cancels() {
    let mut form = NewClientForm::new();
    assert_eq!(press(&mut form, KeyCode::Esc), FormOutcome::Cancel);
}

#[test]
fn test_edit_client_prefills_purchases() {
    let form = open_edit();
    let fields = form.fields();
    assert_eq!(fields.text(EditClientField::LastName), "Lee");
    assert_eq!(fields.text(EditClientField::Purchase(1, PurchaseField::Date)), "2025-03-01");
    assert_eq!(fields.text(EditClientField::Purchase(2, PurchaseField::Price)), "100");

    let purchases = form.purchases();
    assert_eq!(purchases.len(), 2);
    assert_eq!(purchases[0].status, "Paid");
    assert_eq!(purchases[1].status, "Cancelled");
}

#[test]
fn test_update_client_sends_edited_card() {
    let mut form = open_edit();
    press(&mut form, KeyCode::Tab);
    press(&mut form, KeyCode::End);
    type_text(&mut form, "-Marie");

    let FormOutcome::Submit(Submission::UpdateClient(updated)) = press(&mut form, KeyCode::Enter) else {
        panic!("expected an update submission");
    };
    assert_eq!(updated.client_id, 7);
    assert_eq!(updated.first_name, "Ann-Marie");
    assert_eq!(updated.middle_name, None);
    assert_eq!(updated.purchases.len(), 2);
    assert_eq!(updated.purchases[0].purchase_date, "2025-03-01");
}

#[test]
fn test_edit_client_requires_names() {
    let mut form = open_edit();
    for _ in 0..3 {
        press(&mut form, KeyCode::Backspace);
    }
    assert_eq!(
        press(&mut form, KeyCode::Enter),
        FormOutcome::Invalid(ERROR_CLIENT_NAME_REQUIRED.to_string())
    );
}

#[test]
fn test_remove_focused_purchase() {
    let mut form = open_edit();
    for _ in 0..5 {
        press(&mut form, KeyCode::Tab);
    }
    assert_eq!(
        form.fields().focused(),
        Some(EditClientField::Purchase(1, PurchaseField::Number))
    );

    form.handle_key(ctrl('d'));
    let purchases = form.purchases();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].purchase_number, "P-2");
    assert!(!form.fields().contains(EditClientField::Purchase(1, PurchaseField::Number)));
}

#[test]
fn test_add_purchase_section() {
    let mut form = open_edit();
    assert!(!form.is_adding());

    form.handle_key(ctrl('n'));
    assert!(form.is_adding());
    assert_eq!(
        form.fields().focused(),
        Some(EditClientField::NewPurchase(NewPurchaseField::Number))
    );

    type_text(&mut form, "P-9");
    press(&mut form, KeyCode::Tab);
    press(&mut form, KeyCode::Tab);
    press(&mut form, KeyCode::Right);
    press(&mut form, KeyCode::Tab);

    let FormOutcome::Lookups(lookups) = press(&mut form, KeyCode::Right) else {
        panic!("country change should load cities");
    };
    assert_eq!(lookups[0].request, LookupRequest::Cities { country_id: 3 });

    let outcome = press(&mut form, KeyCode::Enter);
    assert_eq!(
        outcome,
        FormOutcome::Submit(Submission::AddPurchase {
            client_id: 7,
            purchase: NewPurchase {
                purchase_number: Some("P-9".to_string()),
                status: Some("Paid".to_string()),
                country_id: Some(3),
                ..NewPurchase::default()
            },
        })
    );
}

#[test]
fn test_escape_closes_add_section_first() {
    let mut form = open_edit();
    form.handle_key(ctrl('n'));

    assert_eq!(form.handle_key(key(KeyCode::Esc)), FormOutcome::None);
    assert!(!form.is_adding());
    assert!(!form.fields().contains(EditClientField::NewPurchase(NewPurchaseField::Number)));

    assert_eq!(form.handle_key(key(KeyCode::Esc)), FormOutcome::Cancel);
}

#[test]
fn test_added_purchase_appears_in_form() {
    let mut form = open_edit();
    form.handle_key(ctrl('n'));

    let other_client = SubmissionOutcome::PurchaseAdded {
        client_id: 99,
        purchase: purchase(5, "P-5", 1),
    };
    assert!(!form.apply_outcome(&other_client));
    assert!(form.is_adding());

    let added = SubmissionOutcome::PurchaseAdded {
        client_id: 7,
        purchase: purchase(900, "P-9", 1),
    };
    assert!(form.apply_outcome(&added));
    assert!(!form.is_adding());

    let purchases = form.purchases();
    assert_eq!(purchases.len(), 3);
    assert_eq!(purchases[2].tour_purchase_id, 900);
    assert_eq!(purchases[2].status, "Paid");
}

#[test]
fn test_other_outcomes_close_the_form() {
    let mut form = open_edit();
    assert!(!form.apply_outcome(&SubmissionOutcome::ClientUpdated(client())));
}
