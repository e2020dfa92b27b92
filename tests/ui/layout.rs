use ratatui::layout::Rect;
use tourdesk::ui::LayoutManager;

#[test]
fn test_sidebar_width_is_clamped() {
    assert_eq!(LayoutManager::sidebar_width(30, 100), 30);
    assert_eq!(LayoutManager::sidebar_width(5, 100), 15);
    assert_eq!(LayoutManager::sidebar_width(80, 200), 50);
    // The main pane keeps its minimum width on narrow screens
    assert_eq!(LayoutManager::sidebar_width(30, 40), 20);
    assert_eq!(LayoutManager::sidebar_width(30, 10), 0);
}

#[test]
fn test_main_layout_reserves_status_line() {
    let (top, status) = LayoutManager::main_layout(Rect::new(0, 0, 80, 24));
    assert_eq!(top, Rect::new(0, 0, 80, 23));
    assert_eq!(status, Rect::new(0, 23, 80, 1));
}

#[test]
fn test_top_pane_layout() {
    let (sidebar, main) = LayoutManager::top_pane_layout(Rect::new(0, 0, 100, 23), 26);
    assert_eq!(sidebar.width, 26);
    assert_eq!(main.x, 26);
    assert_eq!(main.width, 74);
}

#[test]
fn test_centered_rect_lines() {
    let area = LayoutManager::centered_rect_lines(50, 10, Rect::new(0, 0, 100, 40));
    assert_eq!(area.width, 50);
    assert_eq!(area.x, 25);
    assert_eq!(area.height, 10);

    // Taller than the screen is cut to the screen
    let area = LayoutManager::centered_rect_lines(50, 60, Rect::new(0, 0, 100, 40));
    assert_eq!(area.height, 40);
}

#[test]
fn test_centered_rect() {
    let area = LayoutManager::centered_rect(60, 50, Rect::new(0, 0, 100, 40));
    assert_eq!(area.width, 60);
    assert_eq!(area.x, 20);
    assert_eq!(area.height, 20);
}
