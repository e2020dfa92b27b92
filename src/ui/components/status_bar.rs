//! Status bar component

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::{Duration, Instant};

/// How long a result message replaces the shortcuts
const MESSAGE_TTL: Duration = Duration::from_secs(6);

const SHORTCUTS: &str = "a: add • e: edit • /: search • f: filters • s/o: sort • r: reload • ?: help • q: quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct StatusBar {
    message: Option<StatusMessage>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.set(text.into(), StatusKind::Success);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set(text.into(), StatusKind::Error);
    }

    /// Current message, if it has not expired
    pub fn message(&self) -> Option<(&str, &StatusKind)> {
        self.message
            .as_ref()
            .filter(|message| message.shown_at.elapsed() < MESSAGE_TTL)
            .map(|message| (message.text.as_str(), &message.kind))
    }

    fn set(&mut self, text: String, kind: StatusKind) {
        self.message = Some(StatusMessage {
            text,
            kind,
            shown_at: Instant::now(),
        });
    }

    /// Render the status bar
    pub fn render(&self, f: &mut Frame, area: Rect, pending_requests: usize) {
        let (text, color) = match self.message() {
            Some((text, StatusKind::Success)) => (text.to_string(), Color::Green),
            Some((text, StatusKind::Error)) => (text.to_string(), Color::Red),
            None => (SHORTCUTS.to_string(), Color::Gray),
        };

        let mut spans = Vec::new();
        if pending_requests > 0 {
            spans.push(Span::styled(
                format!("⏳ {} request(s) • ", pending_requests),
                Style::default().fg(Color::Yellow),
            ));
        }
        spans.push(Span::styled(text, Style::default().fg(color)));

        let status_bar = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        f.render_widget(status_bar, area);
    }
}
