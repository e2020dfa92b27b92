use crate::{key, press, type_text};
use crossterm::event::KeyCode;
use tourdesk::api::{LookupData, LookupRequest, Submission};
use tourdesk::constants::ERROR_OFFER_FIELDS_REQUIRED;
use tourdesk::forms::offer_form::OfferField;
use tourdesk::forms::{Form, FormOutcome, LookupSlot, OfferForm};
use tourdesk::models::{City, Country, TourOffer};

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

fn cities(names: &[&str]) -> LookupData {
    LookupData::Cities(
        names
            .iter()
            .enumerate()
            .map(|(index, name)| City {
                city_id: index as i64 + 10,
                name: name.to_string(),
            })
            .collect(),
    )
}

/// Open a new offer form with countries loaded
fn open_new() -> OfferForm {
    let mut form = OfferForm::new();
    let lookups = form.initial_lookups();
    assert_eq!(lookups.len(), 1);
    assert_eq!(lookups[0].request, LookupRequest::Countries);
    form.apply_lookup(lookups[0].ticket, Ok(countries()));
    form
}

#[test]
fn test_submit_requires_country_and_city() {
    let mut form = open_new();
    assert_eq!(
        press(&mut form, KeyCode::Enter),
        FormOutcome::Invalid(ERROR_OFFER_FIELDS_REQUIRED.to_string())
    );

    // Country alone is not enough
    form.handle_key(key(KeyCode::Right));
    assert_eq!(
        press(&mut form, KeyCode::Enter),
        FormOutcome::Invalid(ERROR_OFFER_FIELDS_REQUIRED.to_string())
    );
}

#[test]
fn test_create_offer_flow() {
    let mut form = open_new();

    let FormOutcome::Lookups(lookups) = press(&mut form, KeyCode::Right) else {
        panic!("country change should load cities");
    };
    assert_eq!(lookups[0].request, LookupRequest::Cities { country_id: 1 });
    form.apply_lookup(lookups[0].ticket, Ok(cities(&["Paris", "Lyon"])));

    press(&mut form, KeyCode::Tab);
    press(&mut form, KeyCode::Right);
    press(&mut form, KeyCode::Right);
    assert_eq!(form.fields().select_value(OfferField::City), Some("Lyon".to_string()));

    // Duration 0 is clamped to one day
    press(&mut form, KeyCode::Tab);
    press(&mut form, KeyCode::Backspace);
    type_text(&mut form, "0");
    press(&mut form, KeyCode::Tab);
    type_text(&mut form, "250.5");
    press(&mut form, KeyCode::Tab);
    type_text(&mut form, "  Wine tasting ");

    let outcome = press(&mut form, KeyCode::Enter);
    let FormOutcome::Submit(Submission::CreateOffer(offer)) = outcome else {
        panic!("expected a create submission, got {:?}", outcome);
    };
    assert_eq!(offer.country_id, 1);
    assert_eq!(offer.country, "France");
    assert_eq!(offer.city, "Lyon");
    assert_eq!(offer.duration, 1);
    assert_eq!(offer.price, 250.5);
    assert_eq!(offer.description, "Wine tasting");
}

#[test]
fn test_stale_cities_are_ignored() {
    let mut form = open_new();

    let FormOutcome::Lookups(first) = press(&mut form, KeyCode::Right) else {
        panic!("expected cities lookup");
    };
    let FormOutcome::Lookups(second) = press(&mut form, KeyCode::Right) else {
        panic!("expected cities lookup");
    };
    assert_eq!(second[0].request, LookupRequest::Cities { country_id: 2 });

    form.apply_lookup(second[0].ticket, Ok(cities(&["Rome"])));
    form.apply_lookup(first[0].ticket, Ok(cities(&["Paris"])));

    let options = form.fields().select(OfferField::City).unwrap().options();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].label, "Rome");
}

#[test]
fn test_clearing_country_clears_city() {
    let mut form = open_new();
    let FormOutcome::Lookups(lookups) = press(&mut form, KeyCode::Right) else {
        panic!("expected cities lookup");
    };

    // Back to the placeholder before the answer arrives
    assert_eq!(press(&mut form, KeyCode::Left), FormOutcome::None);
    form.apply_lookup(lookups[0].ticket, Ok(cities(&["Paris"])));
    assert!(form.fields().select(OfferField::City).unwrap().options().is_empty());
}

#[test]
fn test_edit_offer_prefills_and_updates() {
    let offer = TourOffer {
        base_tour_id: 42,
        country_id: 2,
        country: "Italy".to_string(),
        city: "Rome".to_string(),
        duration: 5,
        price: 300.0,
        description: "Colosseum".to_string(),
    };
    let mut form = OfferForm::edit(offer);
    assert_eq!(form.fields().text(OfferField::Price), "300");

    let lookups = form.initial_lookups();
    assert_eq!(lookups.len(), 2);
    assert_eq!(lookups[1].request, LookupRequest::Cities { country_id: 2 });
    form.apply_lookup(lookups[0].ticket, Ok(countries()));
    form.apply_lookup(lookups[1].ticket, Ok(cities(&["Milan", "Rome"])));

    let FormOutcome::Submit(Submission::UpdateOffer(updated)) = press(&mut form, KeyCode::Enter) else {
        panic!("expected an update submission");
    };
    assert_eq!(updated.base_tour_id, 42);
    assert_eq!(updated.country, "Italy");
    assert_eq!(updated.city, "Rome");
    assert_eq!(updated.duration, 5);
}

#[test]
fn test_failed_cities_lookup_clears_city() {
    let offer = TourOffer {
        base_tour_id: 1,
        country_id: 1,
        city: "Paris".to_string(),
        ..TourOffer::default()
    };
    let mut form = OfferForm::edit(offer);
    let lookups = form.initial_lookups();
    let cities_lookup = lookups
        .iter()
        .find(|lookup| lookup.ticket.slot == LookupSlot::Cities)
        .unwrap();

    form.apply_lookup(cities_lookup.ticket, Err("timeout".to_string()));
    let city = form.fields().select(OfferField::City).unwrap();
    assert_eq!(city.effective_value(), None);
}
