//! Card rendering for the entity lists.
//!
//! A card is a few lines of text describing one record; expanding it adds
//! the nested details (purchases, transport legs, descriptions).

mod client_card;
mod insurance_card;
mod offer_card;
mod tour_card;

use crate::config::DisplayConfig;
use crate::forms::FormKind;
use crate::listing::Listable;
use crate::utils::datetime::{format_display_date, format_display_datetime};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Shared formatting state for one render pass
pub struct CardContext<'a> {
    pub display: &'a DisplayConfig,
    /// Current search term; matches are highlighted where a card supports it
    pub search_term: &'a str,
}

impl<'a> CardContext<'a> {
    pub fn new(display: &'a DisplayConfig, search_term: &'a str) -> Self {
        Self { display, search_term }
    }

    pub fn date(&self, value: &str) -> String {
        format_display_date(value, &self.display.date_format)
    }

    pub fn datetime(&self, value: &str) -> String {
        format_display_datetime(value, &self.display.datetime_format)
    }

    pub fn period(&self, start: &str, end: &str) -> String {
        format!("{} – {}", self.date(start), self.date(end))
    }

    pub fn money(&self, amount: f64) -> String {
        format!("{:.2} {}", amount, self.display.currency_symbol)
    }
}

/// A record that can be listed as a card
pub trait CardView: Listable {
    /// What the list holds, used in titles and empty states
    const NOUN: &'static str;

    fn card_lines(&self, expanded: bool, ctx: &CardContext) -> Vec<Line<'static>>;

    /// Form opened by "add"; `None` for read-only lists
    fn add_form() -> Option<FormKind>;

    /// Form opened by "edit" on this record
    fn edit_form(&self) -> Option<FormKind>;
}

// Line builders shared by the cards

pub(crate) fn title_line(icon: &str, spans: Vec<Span<'static>>) -> Line<'static> {
    let mut line = vec![Span::raw(format!("{} ", icon))];
    line.extend(spans);
    Line::from(line)
}

pub(crate) fn title_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub(crate) fn detail_line(indent: usize, text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}{}", " ".repeat(indent), text.into()),
        Style::default().fg(Color::Gray),
    ))
}

pub(crate) fn accent_line(indent: usize, text: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}{}", " ".repeat(indent), text.into()),
        Style::default().fg(color),
    ))
}

/// "-" for blank values
pub(crate) fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
