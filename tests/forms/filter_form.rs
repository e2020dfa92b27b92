use crate::{press, type_text};
use crossterm::event::KeyCode;
use tourdesk::api::{
    ClientFilter, ClientQuery, LookupData, LookupRequest, OfferFilter, OfferQuery, Submission, TourFilter, TourTimeline,
};
use tourdesk::forms::filter_form::{OfferFilterField, TourFilterField};
use tourdesk::forms::{ClientFilterForm, Form, FormOutcome, OfferFilterForm, TourFilterForm};
use tourdesk::models::{City, Country, PurchaseStatus};

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

#[test]
fn test_client_filter_keeps_search_term() {
    let query = ClientQuery {
        search_term: "lee".to_string(),
        filter: ClientFilter {
            status: Some("Paid".to_string()),
            purchases_count_from: Some(2),
            ..ClientFilter::default()
        },
    };
    let mut form = ClientFilterForm::new(query);
    let lookups = form.initial_lookups();
    assert_eq!(lookups.len(), 1);
    assert_eq!(lookups[0].request, LookupRequest::PurchaseStatuses);
    form.apply_lookup(
        lookups[0].ticket,
        Ok(LookupData::PurchaseStatuses(vec![PurchaseStatus {
            status_id: 1,
            status_name: "Paid".to_string(),
        }])),
    );

    type_text(&mut form, "Ann");
    let outcome = press(&mut form, KeyCode::Enter);
    assert_eq!(
        outcome,
        FormOutcome::Submit(Submission::FilterClients(ClientQuery {
            search_term: "lee".to_string(),
            filter: ClientFilter {
                status: Some("Paid".to_string()),
                purchases_count_from: Some(2),
                first_name: Some("Ann".to_string()),
                ..ClientFilter::default()
            },
        }))
    );
}

#[test]
fn test_blank_client_filter_is_empty() {
    let form = ClientFilterForm::new(ClientQuery::search("kim"));
    assert!(form.filter().is_empty());
}

#[test]
fn test_offer_filter_prefills_country_and_city() {
    let query = OfferQuery {
        search_term: String::new(),
        filter: OfferFilter {
            country_id: Some(2),
            city_name: Some("Rome".to_string()),
            price_to: Some(900.0),
            ..OfferFilter::default()
        },
    };
    let mut form = OfferFilterForm::new(query.clone());
    assert_eq!(form.fields().text(OfferFilterField::PriceTo), "900");

    let lookups = form.initial_lookups();
    assert_eq!(lookups.len(), 2);
    assert_eq!(lookups[1].request, LookupRequest::Cities { country_id: 2 });
    form.apply_lookup(lookups[0].ticket, Ok(countries()));
    form.apply_lookup(
        lookups[1].ticket,
        Ok(LookupData::Cities(vec![City {
            city_id: 5,
            name: "Rome".to_string(),
        }])),
    );

    assert_eq!(form.filter(), query.filter);
    assert_eq!(press(&mut form, KeyCode::Enter), FormOutcome::Submit(Submission::FilterOffers(query)));
}

#[test]
fn test_offer_filter_country_change_clears_city() {
    let query = OfferQuery {
        search_term: String::new(),
        filter: OfferFilter {
            country_id: Some(2),
            city_name: Some("Rome".to_string()),
            ..OfferFilter::default()
        },
    };
    let mut form = OfferFilterForm::new(query);
    let lookups = form.initial_lookups();
    form.apply_lookup(lookups[0].ticket, Ok(countries()));

    // Italy is the last country, so Right goes back to the placeholder
    assert_eq!(press(&mut form, KeyCode::Right), FormOutcome::None);
    assert_eq!(form.filter().city_name, None);

    // The cities answer for Italy arrives too late
    form.apply_lookup(
        lookups[1].ticket,
        Ok(LookupData::Cities(vec![City {
            city_id: 5,
            name: "Rome".to_string(),
        }])),
    );
    assert_eq!(form.filter(), OfferFilter::default());

    let FormOutcome::Lookups(cities) = press(&mut form, KeyCode::Right) else {
        panic!("choosing a country should load cities");
    };
    assert_eq!(cities[0].request, LookupRequest::Cities { country_id: 1 });
}

#[test]
fn test_tour_filter_lookups() {
    let mut form = TourFilterForm::new(TourFilter::default());
    let requests: Vec<LookupRequest> = form.initial_lookups().into_iter().map(|l| l.request).collect();
    assert_eq!(requests, vec![LookupRequest::Countries, LookupRequest::Activities]);

    let mut form = TourFilterForm::new(TourFilter {
        country_id: Some(1),
        city_id: Some(10),
        ..TourFilter::default()
    });
    let lookups = form.initial_lookups();
    assert_eq!(lookups.len(), 3);
    assert_eq!(lookups[2].request, LookupRequest::Cities { country_id: 1 });
}

#[test]
fn test_tour_filter_toggles_timeline() {
    let mut form = TourFilterForm::new(TourFilter::default());
    let lookups = form.initial_lookups();
    form.apply_lookup(lookups[1].ticket, Ok(LookupData::Activities(vec!["Diving".to_string()])));

    press(&mut form, KeyCode::Tab);
    press(&mut form, KeyCode::Tab);
    press(&mut form, KeyCode::Right);
    press(&mut form, KeyCode::Tab);
    type_text(&mut form, "2025-06-01");

    while form.fields().focused() != Some(TourFilterField::Ongoing) {
        press(&mut form, KeyCode::Tab);
    }
    press(&mut form, KeyCode::Char(' '));
    press(&mut form, KeyCode::Tab);
    press(&mut form, KeyCode::Tab);
    press(&mut form, KeyCode::Char(' '));

    let expected = TourFilter {
        activity_name: Some("Diving".to_string()),
        start_date_from: Some("2025-06-01".to_string()),
        timeline: TourTimeline {
            ongoing: true,
            completed: false,
            upcoming: true,
        },
        ..TourFilter::default()
    };
    assert_eq!(
        press(&mut form, KeyCode::Enter),
        FormOutcome::Submit(Submission::FilterTours(expected))
    );
}
