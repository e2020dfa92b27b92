use crate::key;
use crossterm::event::KeyCode;
use tourdesk::ui::components::dialogs::form_dialog::scroll_offset;
use tourdesk::ui::components::dialogs::ScrollState;
use tourdesk::ui::components::highlight::split_matches;
use tourdesk::ui::components::{StatusBar, StatusKind};

fn runs(items: &[(&str, bool)]) -> Vec<(String, bool)> {
    items.iter().map(|(text, hit)| (text.to_string(), *hit)).collect()
}

#[test]
fn test_split_matches_ignores_case() {
    assert_eq!(
        split_matches("Paris Parade", "par"),
        runs(&[("Par", true), ("is ", false), ("Par", true), ("ade", false)])
    );
    assert_eq!(split_matches("ROME", "rome"), runs(&[("ROME", true)]));
    assert_eq!(split_matches("Škoda", "ŠK"), runs(&[("Šk", true), ("oda", false)]));
}

#[test]
fn test_split_matches_without_term() {
    assert_eq!(split_matches("Oslo", ""), runs(&[("Oslo", false)]));
    assert_eq!(split_matches("Oslo", "   "), runs(&[("Oslo", false)]));
    assert_eq!(split_matches("Oslo", "Bergen"), runs(&[("Oslo", false)]));
}

#[test]
fn test_status_bar_keeps_latest_message() {
    let mut status = StatusBar::new();
    assert!(status.message().is_none());

    status.success("✅ Saved");
    assert_eq!(status.message(), Some(("✅ Saved", &StatusKind::Success)));

    status.error("❌ Failed");
    assert_eq!(status.message(), Some(("❌ Failed", &StatusKind::Error)));
}

#[test]
fn test_scroll_state_keys() {
    let mut scroll = ScrollState::default();
    for _ in 0..3 {
        assert!(scroll.handle_key(&key(KeyCode::Down)));
    }
    assert_eq!(scroll.offset, 3);
    assert_eq!(scroll.clamp(10, 8), 2);

    assert!(scroll.handle_key(&key(KeyCode::End)));
    assert_eq!(scroll.clamp(30, 10), 20);

    assert!(scroll.handle_key(&key(KeyCode::PageUp)));
    assert_eq!(scroll.offset, 10);
    assert!(scroll.handle_key(&key(KeyCode::Home)));
    assert_eq!(scroll.offset, 0);
    assert!(scroll.handle_key(&key(KeyCode::Char('k'))));
    assert_eq!(scroll.offset, 0);

    assert!(!scroll.handle_key(&key(KeyCode::Char('x'))));
}

#[test]
fn test_form_scroll_keeps_focus_visible() {
    assert_eq!(scroll_offset(0, 5, 10), 0);
    assert_eq!(scroll_offset(3, 40, 0), 0);
    assert_eq!(scroll_offset(4, 40, 10), 0);
    assert_eq!(scroll_offset(15, 40, 10), 10);
    assert_eq!(scroll_offset(39, 40, 10), 30);
}
