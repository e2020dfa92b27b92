use crate::key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tourdesk::session::{Role, Section, UserSession};
use tourdesk::ui::components::SidebarComponent;
use tourdesk::ui::core::{Action, Component};

fn target(action: Action) -> Option<Section> {
    match action {
        Action::NavigateToSection(section) => Some(section),
        _ => None,
    }
}

#[test]
fn test_sidebar_lists_role_sections() {
    let sidebar = SidebarComponent::new(UserSession::new("olga", Role::TourManager));
    assert_eq!(sidebar.sections(), &[Section::Tours, Section::TourOffers]);
    assert_eq!(sidebar.selection, Section::Tours);

    let sidebar = SidebarComponent::new(UserSession::new("ivan", Role::InsuranceManager));
    assert_eq!(sidebar.selection, Section::Insurance);
}

#[test]
fn test_sidebar_cycles_sections() {
    let mut sidebar = SidebarComponent::new(UserSession::new("olga", Role::TourManager));
    assert_eq!(target(sidebar.handle_key_events(key(KeyCode::Char('J')))), Some(Section::TourOffers));
    assert_eq!(target(sidebar.handle_key_events(key(KeyCode::Char('K')))), Some(Section::TourOffers));
    assert_eq!(
        target(sidebar.handle_key_events(KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT))),
        Some(Section::TourOffers)
    );
    assert_eq!(target(sidebar.handle_key_events(key(KeyCode::Down))), None);
}

#[test]
fn test_number_keys_address_every_section() {
    let mut sidebar = SidebarComponent::new(UserSession::new("olga", Role::TourManager));
    assert_eq!(target(sidebar.handle_key_events(key(KeyCode::Char('3')))), Some(Section::ClientInfo));
    assert_eq!(target(sidebar.handle_key_events(key(KeyCode::Char('4')))), Some(Section::Insurance));
    assert_eq!(target(sidebar.handle_key_events(key(KeyCode::Char('5')))), None);
}

#[test]
fn test_sidebar_only_selects_allowed_sections() {
    let mut sidebar = SidebarComponent::new(UserSession::new("olga", Role::TourManager));

    let passed = sidebar.update(Action::NavigateToSection(Section::ClientInfo));
    assert_eq!(target(passed), Some(Section::ClientInfo));
    assert_eq!(sidebar.selection, Section::Tours);

    let passed = sidebar.update(Action::NavigateToSection(Section::TourOffers));
    assert_eq!(target(passed), Some(Section::TourOffers));
    assert_eq!(sidebar.selection, Section::TourOffers);
}
