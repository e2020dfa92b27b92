use crate::fake_api::FakeApi;
use crate::key;
use crossterm::event::KeyCode;
use std::path::PathBuf;
use std::sync::Arc;
use tourdesk::config::Config;
use tourdesk::constants::{ERROR_SECTION_FORBIDDEN, INFO_INSURANCE_READ_ONLY, INFO_NO_FILTERS, SUCCESS_CLIENT_CREATED};
use tourdesk::logger::Logger;
use tourdesk::models::{ClientCard, Purchase, TourCard};
use tourdesk::session::{Role, Section, SessionStore, UserSession};
use tourdesk::ui::app_component::AppComponent;
use tourdesk::ui::components::StatusKind;
use tourdesk::ui::core::{DialogType, EventType};

fn client(id: i64, last_name: &str) -> ClientCard {
    ClientCard {
        client_id: id,
        last_name: last_name.to_string(),
        first_name: "Test".to_string(),
        ..ClientCard::default()
    }
}

fn session_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("tourdesk-app-{}-{}", std::process::id(), name))
        .join("session.json")
}

fn app_for(role: Role, api: Arc<FakeApi>, name: &str) -> AppComponent {
    let store = SessionStore::new(session_path(name));
    AppComponent::new(
        &Config::default(),
        UserSession::new("olga", role),
        store,
        api,
        Logger::new(),
    )
}

/// Let spawned requests finish and feed their results back
async fn settle(app: &mut AppComponent) {
    for _ in 0..50 {
        tokio::task::yield_now().await;
        app.process_background_actions();
        if !app.is_busy() {
            break;
        }
    }
    app.process_background_actions();
}

fn press(app: &mut AppComponent, code: KeyCode) {
    app.handle_event(EventType::Key(key(code)));
}

fn type_text(app: &mut AppComponent, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[tokio::test]
async fn test_start_loads_first_allowed_section() {
    let api = Arc::new(FakeApi {
        clients: vec![client(1, "Lee"), client(2, "Kim")],
        ..FakeApi::default()
    });
    let mut app = app_for(Role::ClientManager, api.clone(), "start");
    assert_eq!(app.active_section(), Section::ClientInfo);

    app.start();
    assert!(app.clients().is_loading());
    settle(&mut app).await;

    assert!(!app.clients().is_loading());
    assert_eq!(app.clients().len(), 2);
    assert_eq!(api.calls(), vec!["clients ''".to_string()]);
}

#[tokio::test]
async fn test_forbidden_section_reports_error() {
    let api = Arc::new(FakeApi::new());
    let mut app = app_for(Role::ClientManager, api.clone(), "forbidden");

    // "1" addresses the tours section
    press(&mut app, KeyCode::Char('1'));
    assert_eq!(app.active_section(), Section::ClientInfo);
    assert_eq!(
        app.status().message(),
        Some((ERROR_SECTION_FORBIDDEN, &StatusKind::Error))
    );
    settle(&mut app).await;
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_navigation_loads_section() {
    let api = Arc::new(FakeApi::new());
    let mut app = app_for(Role::TourManager, api.clone(), "navigate");
    assert_eq!(app.active_section(), Section::Tours);

    press(&mut app, KeyCode::Char('J'));
    assert_eq!(app.active_section(), Section::TourOffers);
    settle(&mut app).await;
    assert_eq!(api.calls(), vec!["offers ''".to_string()]);
}

#[tokio::test]
async fn test_search_reloads_with_term() {
    let api = Arc::new(FakeApi {
        clients: vec![client(1, "Lee")],
        ..FakeApi::default()
    });
    let mut app = app_for(Role::ClientManager, api.clone(), "search");

    press(&mut app, KeyCode::Char('/'));
    assert!(matches!(app.dialog().dialog_type, Some(DialogType::Search { .. })));
    type_text(&mut app, "le");
    press(&mut app, KeyCode::Enter);
    assert!(!app.dialog().is_visible());
    settle(&mut app).await;

    let calls = api.calls();
    assert_eq!(calls, vec!["clients 'l'".to_string(), "clients 'le'".to_string()]);
    assert_eq!(app.queries().clients.search_term, "le");
    assert_eq!(app.clients().search_term(), "le");
    assert_eq!(app.clients().len(), 1);
}

#[tokio::test]
async fn test_create_client_prepends_card() {
    let api = Arc::new(FakeApi {
        clients: vec![client(1, "Lee")],
        ..FakeApi::default()
    });
    let mut app = app_for(Role::ClientManager, api.clone(), "create");
    app.start();
    settle(&mut app).await;

    press(&mut app, KeyCode::Char('a'));
    assert!(app.dialog().is_visible());
    type_text(&mut app, "Novak");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Eva");
    press(&mut app, KeyCode::Enter);
    assert!(app.dialog().awaiting().is_some());
    settle(&mut app).await;

    assert!(!app.dialog().is_visible());
    assert_eq!(app.clients().len(), 2);
    assert_eq!(app.clients().items()[0].client_id, 100);
    assert_eq!(
        app.status().message(),
        Some((SUCCESS_CLIENT_CREATED, &StatusKind::Success))
    );
    assert!(api.calls().contains(&"create client Novak".to_string()));
}

#[tokio::test]
async fn test_filter_and_search_replace_each_other_for_tours() {
    let api = Arc::new(FakeApi {
        tours: vec![TourCard {
            tour_id: 3,
            start_date: "2000-01-01".to_string(),
            end_date: "2099-01-01".to_string(),
            ..TourCard::default()
        }],
        ..FakeApi::default()
    });
    let mut app = app_for(Role::TourManager, api.clone(), "tours");

    press(&mut app, KeyCode::Char('f'));
    settle(&mut app).await;
    assert!(matches!(app.dialog().dialog_type, Some(DialogType::Form(_))));

    // Tick "Ongoing", the tenth field
    for _ in 0..9 {
        press(&mut app, KeyCode::Tab);
    }
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Enter);
    settle(&mut app).await;

    assert!(!app.dialog().is_visible());
    assert!(app.queries().tours.timeline.ongoing);
    assert_eq!(app.tours().len(), 1);
    assert!(api.calls().contains(&"tours filtered".to_string()));

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "x");
    press(&mut app, KeyCode::Esc);
    settle(&mut app).await;

    assert!(app.queries().tours.is_empty());
    assert!(api.calls().contains(&"tours 'x'".to_string()));
}

#[tokio::test]
async fn test_insurance_section_is_derived_from_clients() {
    let insured = ClientCard {
        purchases: vec![Purchase {
            tour_purchase_id: 4,
            insurance_id: 8,
            insurance_type: "Medical".to_string(),
            ..Purchase::default()
        }],
        ..client(1, "Lee")
    };
    let api = Arc::new(FakeApi {
        clients: vec![insured, client(2, "Kim")],
        ..FakeApi::default()
    });
    let mut app = app_for(Role::InsuranceManager, api.clone(), "insurance");
    app.start();
    settle(&mut app).await;

    assert_eq!(app.insurance().len(), 1);
    assert_eq!(app.insurance().items()[0].insurance_type, "Medical");

    press(&mut app, KeyCode::Char('a'));
    assert!(matches!(
        app.dialog().dialog_type,
        Some(DialogType::Info(ref message)) if message == INFO_INSURANCE_READ_ONLY
    ));
    press(&mut app, KeyCode::Char('x'));

    press(&mut app, KeyCode::Char('f'));
    assert!(matches!(
        app.dialog().dialog_type,
        Some(DialogType::Info(ref message)) if message == INFO_NO_FILTERS
    ));
}

#[tokio::test]
async fn test_failed_load_reports_error() {
    let api = Arc::new(FakeApi {
        fail_lists: true,
        ..FakeApi::default()
    });
    let mut app = app_for(Role::ClientManager, api, "failed");
    app.start();
    settle(&mut app).await;

    assert!(!app.clients().is_loading());
    let (message, kind) = app.status().message().unwrap();
    assert!(message.starts_with("❌ Failed to load clients"));
    assert_eq!(kind, &StatusKind::Error);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let path = session_path("logout");
    let store = SessionStore::new(&path);
    let session = UserSession::new("olga", Role::ClientManager);
    store.save(&session).unwrap();

    let api = Arc::new(FakeApi::new());
    let mut app = AppComponent::new(&Config::default(), session, store, api, Logger::new());
    press(&mut app, KeyCode::Char('L'));

    assert!(app.should_quit());
    assert!(!path.exists());
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn test_quit_keys() {
    let mut app = app_for(Role::ClientManager, Arc::new(FakeApi::new()), "quit");
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}
