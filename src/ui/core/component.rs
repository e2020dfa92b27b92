use super::actions::Action;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// A piece of the screen that reacts to keys and actions
///
/// Keys become actions in `handle_key_events`. Actions then flow through
/// `update` on every component in turn, and whatever comes out of the last
/// one is handled by the app.
pub trait Component {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action;

    fn update(&mut self, action: Action) -> Action {
        // Unhandled actions travel on to the next component
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect);
}
