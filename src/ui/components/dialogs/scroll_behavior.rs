use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ScrollbarState;

const PAGE: usize = 10;

/// Scroll position of a text dialog
///
/// The offset may run past the content; rendering clamps it once the
/// viewport height is known.
#[derive(Debug, Default)]
pub struct ScrollState {
    pub offset: usize,
    pub scrollbar: ScrollbarState,
}

impl ScrollState {
    pub fn reset(&mut self) {
        self.offset = 0;
        self.scrollbar = ScrollbarState::default();
    }

    pub fn scroll_up(&mut self) {
        self.set(self.offset.saturating_sub(1));
    }

    pub fn scroll_down(&mut self) {
        self.set(self.offset.saturating_add(1));
    }

    pub fn page_up(&mut self) {
        self.set(self.offset.saturating_sub(PAGE));
    }

    pub fn page_down(&mut self) {
        self.set(self.offset.saturating_add(PAGE));
    }

    pub fn scroll_to_top(&mut self) {
        self.set(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.set(usize::MAX);
    }

    /// Apply a scrolling key; false when the key does not scroll
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),
            _ => return false,
        }
        true
    }

    /// Clamp to the content and sync the scrollbar; returns the offset to draw from
    pub fn clamp(&mut self, total_lines: usize, visible_height: usize) -> usize {
        let max_scroll = total_lines.saturating_sub(visible_height);
        self.offset = self.offset.min(max_scroll);
        self.scrollbar = self
            .scrollbar
            .content_length(total_lines)
            .viewport_content_length(visible_height)
            .position(self.offset);
        self.offset
    }

    fn set(&mut self, offset: usize) {
        self.offset = offset;
        self.scrollbar = self.scrollbar.position(offset);
    }
}
