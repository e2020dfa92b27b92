use crate::key;
use crossterm::event::KeyCode;
use tourdesk::config::DisplayConfig;
use tourdesk::constants::INFO_INSURANCE_READ_ONLY;
use tourdesk::forms::FormKind;
use tourdesk::listing::{InsuranceRecord, InsuranceSort, ListModel, OfferSort};
use tourdesk::models::{ClientCard, Purchase, TourOffer};
use tourdesk::session::Section;
use tourdesk::ui::components::EntityListComponent;
use tourdesk::ui::core::{Action, Component, DialogType};

fn offer(id: i64) -> TourOffer {
    TourOffer {
        base_tour_id: id,
        city: format!("City {}", id),
        ..TourOffer::default()
    }
}

fn offers_list() -> EntityListComponent<TourOffer> {
    let mut model = ListModel::new(OfferSort::Price).with_page_size(2);
    model.replace(vec![offer(1), offer(2), offer(3)]);
    EntityListComponent::new(Section::TourOffers, model, DisplayConfig::default())
}

#[test]
fn test_keys_map_to_list_actions() {
    let mut list = offers_list();
    let press = |list: &mut EntityListComponent<TourOffer>, code| list.handle_key_events(key(code));

    assert!(matches!(press(&mut list, KeyCode::Char('j')), Action::NextItem));
    assert!(matches!(press(&mut list, KeyCode::Up), Action::PreviousItem));
    assert!(matches!(press(&mut list, KeyCode::Enter), Action::ToggleExpand));
    assert!(matches!(press(&mut list, KeyCode::Char(']')), Action::NextPage));
    assert!(matches!(press(&mut list, KeyCode::Left), Action::PreviousPage));
    assert!(matches!(press(&mut list, KeyCode::Char('s')), Action::CycleSortField));
    assert!(matches!(press(&mut list, KeyCode::Char('o')), Action::ToggleSortOrder));
    assert!(matches!(press(&mut list, KeyCode::Char('f')), Action::OpenFilters));
    assert!(matches!(press(&mut list, KeyCode::Char('r')), Action::ReloadList));
    assert!(matches!(press(&mut list, KeyCode::Char('x')), Action::None));
}

#[test]
fn test_search_key_carries_current_term() {
    let mut list = offers_list();
    list.model_mut().set_search_term("nice");
    let action = list.handle_key_events(key(KeyCode::Char('/')));
    assert!(matches!(
        action,
        Action::ShowDialog(DialogType::Search { section: Section::TourOffers, ref term }) if term == "nice"
    ));
}

#[test]
fn test_add_and_edit_open_forms() {
    let mut list = offers_list();
    assert!(matches!(
        list.handle_key_events(key(KeyCode::Char('a'))),
        Action::ShowDialog(DialogType::Form(FormKind::NewOffer))
    ));
    assert!(matches!(
        list.handle_key_events(key(KeyCode::Char('e'))),
        Action::ShowDialog(DialogType::Form(FormKind::EditOffer(ref offer))) if offer.base_tour_id == 1
    ));

    let mut empty = EntityListComponent::new(
        Section::TourOffers,
        ListModel::<TourOffer>::new(OfferSort::Price),
        DisplayConfig::default(),
    );
    assert!(matches!(empty.handle_key_events(key(KeyCode::Char('e'))), Action::None));
}

#[test]
fn test_insurance_list_is_read_only() {
    let client = ClientCard {
        client_id: 1,
        purchases: vec![Purchase {
            tour_purchase_id: 4,
            insurance_id: 8,
            insurance_type: "Medical".to_string(),
            ..Purchase::default()
        }],
        ..ClientCard::default()
    };
    let mut model = ListModel::new(InsuranceSort::Client);
    model.replace(InsuranceRecord::from_clients(&[client]));
    let mut list = EntityListComponent::new(Section::Insurance, model, DisplayConfig::default());

    for code in [KeyCode::Char('a'), KeyCode::Char('e')] {
        assert!(matches!(
            list.handle_key_events(key(code)),
            Action::ShowDialog(DialogType::Info(ref message)) if message == INFO_INSURANCE_READ_ONLY
        ));
    }
}

#[test]
fn test_update_moves_selection_and_pages() {
    let mut list = offers_list();

    assert!(matches!(list.update(Action::NextItem), Action::None));
    assert_eq!(list.model().selected().map(|o| o.base_tour_id), Some(2));

    list.update(Action::NextPage);
    assert_eq!(list.model().page(), 2);
    assert_eq!(list.model().selected().map(|o| o.base_tour_id), Some(3));

    list.update(Action::ToggleExpand);
    assert!(list.model().is_expanded(&3));

    // Actions the list does not own pass through
    assert!(matches!(list.update(Action::ReloadList), Action::ReloadList));
}
