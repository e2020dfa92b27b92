//! One list screen: cards of a single entity type with paging, sorting and
//! expandable details.

use super::cards::{CardContext, CardView};
use crate::config::DisplayConfig;
use crate::constants::INFO_INSURANCE_READ_ONLY;
use crate::listing::{page_window, ListModel, PageMarker, SortField};
use crate::session::Section;
use crate::ui::core::{
    actions::{Action, DialogType},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{block::BorderType, Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct EntityListComponent<T: CardView> {
    section: Section,
    model: ListModel<T>,
    display: DisplayConfig,
    list_state: ListState,
}

impl<T: CardView> EntityListComponent<T> {
    pub fn new(section: Section, model: ListModel<T>, display: DisplayConfig) -> Self {
        Self {
            section,
            model,
            display,
            list_state: ListState::default(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn model(&self) -> &ListModel<T> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ListModel<T> {
        &mut self.model
    }

    fn edit_selected(&self) -> Action {
        match self.model.selected() {
            Some(item) => match item.edit_form() {
                Some(kind) => Action::ShowDialog(DialogType::Form(kind)),
                None => Action::ShowDialog(DialogType::Info(INFO_INSURANCE_READ_ONLY.to_string())),
            },
            None => Action::None,
        }
    }

    fn add_new(&self) -> Action {
        match T::add_form() {
            Some(kind) => Action::ShowDialog(DialogType::Form(kind)),
            None => Action::ShowDialog(DialogType::Info(INFO_INSURANCE_READ_ONLY.to_string())),
        }
    }

    fn title(&self) -> Line<'static> {
        Line::from(vec![
            Span::raw(format!(" {} {} ", self.section.icon(), self.section.title())),
            Span::styled(format!("({}) ", self.model.len()), Style::default().fg(Color::DarkGray)),
        ])
    }

    fn sort_title(&self) -> Line<'static> {
        let mut spans = Vec::new();
        if !self.model.search_term().is_empty() {
            spans.push(Span::styled(
                format!(" 🔎 \"{}\" ", self.model.search_term()),
                Style::default().fg(Color::Yellow),
            ));
        }
        spans.push(Span::styled(
            format!(
                " sort: {} {} ",
                self.model.sort_field().label(),
                self.model.sort_order().arrow()
            ),
            Style::default().fg(Color::Cyan),
        ));
        Line::from(spans).right_aligned()
    }

    fn pager_line(&self) -> Line<'static> {
        let current = self.model.page();
        let mut spans = vec![Span::styled("‹ ", Style::default().fg(Color::DarkGray))];
        for marker in page_window(current, self.model.total_pages()) {
            let span = match marker {
                PageMarker::Page(page) if page == current => Span::styled(
                    format!("[{}]", page),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                PageMarker::Page(page) => Span::styled(page.to_string(), Style::default().fg(Color::Gray)),
                PageMarker::Ellipsis => Span::styled("…", Style::default().fg(Color::DarkGray)),
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("›", Style::default().fg(Color::DarkGray)));
        Line::from(spans).alignment(Alignment::Center)
    }

    fn empty_message(&self) -> String {
        if self.model.is_loading() {
            format!("Loading {}…", T::NOUN)
        } else if T::add_form().is_some() {
            format!("No {} found. Press 'a' to add or 'r' to reload.", T::NOUN)
        } else {
            format!("No {} found. Press 'r' to reload.", T::NOUN)
        }
    }
}

impl<T: CardView> Component for EntityListComponent<T> {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Action::PreviousItem,
            KeyCode::Down | KeyCode::Char('j') => Action::NextItem,
            KeyCode::Enter | KeyCode::Char(' ') => Action::ToggleExpand,
            KeyCode::Left | KeyCode::Char('[') => Action::PreviousPage,
            KeyCode::Right | KeyCode::Char(']') => Action::NextPage,
            KeyCode::Char('s') => Action::CycleSortField,
            KeyCode::Char('o') => Action::ToggleSortOrder,
            KeyCode::Char('/') => Action::ShowDialog(DialogType::Search {
                section: self.section,
                term: self.model.search_term().to_string(),
            }),
            KeyCode::Char('f') => Action::OpenFilters,
            KeyCode::Char('a') => self.add_new(),
            KeyCode::Char('e') => self.edit_selected(),
            KeyCode::Char('r') => Action::ReloadList,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::NextItem => self.model.select_next(),
            Action::PreviousItem => self.model.select_previous(),
            Action::NextPage => self.model.next_page(),
            Action::PreviousPage => self.model.prev_page(),
            Action::ToggleExpand => self.model.toggle_selected(),
            Action::CycleSortField => {
                self.model.cycle_sort_field();
                log::debug!("{}: sorting by {}", self.section.title(), self.model.sort_field().label());
            }
            Action::ToggleSortOrder => self.model.toggle_sort_order(),
            _ => return action,
        }
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(self.title())
            .title(self.sort_title())
            .title_style(Style::default().fg(Color::White))
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let [list_area, pager_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        let visible = self.model.visible();
        if visible.is_empty() {
            self.list_state.select(None);
            let message = Paragraph::new(self.empty_message())
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(message, list_area);
            return;
        }

        let ctx = CardContext::new(&self.display, self.model.search_term());
        let items: Vec<ListItem> = visible
            .iter()
            .map(|item| {
                let mut lines = item.card_lines(self.model.is_expanded(&item.key()), &ctx);
                lines.push(Line::from(Span::styled(
                    "─".repeat(list_area.width.saturating_sub(2) as usize),
                    Style::default().fg(Color::Rgb(60, 60, 60)),
                )));
                ListItem::new(Text::from(lines))
            })
            .collect();

        self.list_state.select(Some(self.model.selected_index()));
        let list = List::new(items).highlight_style(Style::default().bg(Color::Rgb(40, 40, 48)));
        f.render_stateful_widget(list, list_area, &mut self.list_state);
        f.render_widget(Paragraph::new(self.pager_line()), pager_area);
    }
}
