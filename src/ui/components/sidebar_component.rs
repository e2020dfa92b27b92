//! Section navigation and the signed-in user's profile.
//!
//! Only the sections the role may open are listed. Number keys address
//! every section so that a refused navigation can be reported.

use crate::session::{Section, UserSession};
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct SidebarComponent {
    pub selection: Section,
    session: UserSession,
    list_state: ListState,
}

impl SidebarComponent {
    pub fn new(session: UserSession) -> Self {
        let selection = session.role.sections().first().copied().unwrap_or(Section::Tours);
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selection,
            session,
            list_state,
        }
    }

    pub fn sections(&self) -> &'static [Section] {
        self.session.role.sections()
    }

    fn selected_position(&self) -> usize {
        self.sections()
            .iter()
            .position(|section| *section == self.selection)
            .unwrap_or(0)
    }

    fn next_section(&self) -> Section {
        let sections = self.sections();
        sections[(self.selected_position() + 1) % sections.len()]
    }

    fn previous_section(&self) -> Section {
        let sections = self.sections();
        sections[(self.selected_position() + sections.len() - 1) % sections.len()]
    }
}

impl Component for SidebarComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('J') => Action::NavigateToSection(self.next_section()),
            KeyCode::Down if shift => Action::NavigateToSection(self.next_section()),
            KeyCode::Char('K') => Action::NavigateToSection(self.previous_section()),
            KeyCode::Up if shift => Action::NavigateToSection(self.previous_section()),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                Action::NavigateToSection(Section::ALL[index])
            }
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::NavigateToSection(section) if self.session.role.can_access(section) => {
                self.selection = section;
                self.list_state.select(Some(self.selected_position()));
                // The app loads the section's list
                Action::NavigateToSection(section)
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let [nav_area, profile_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(4)]).areas(rect);

        let items: Vec<ListItem> = self
            .sections()
            .iter()
            .map(|section| {
                let number = Section::ALL.iter().position(|s| s == section).unwrap_or(0) + 1;
                let style = if *section == self.selection {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", number), Style::default().fg(Color::DarkGray)),
                    Span::styled(format!("{} {}", section.icon(), section.title()), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Navigation")
                    .title_style(Style::default().fg(Color::White))
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(Style::default().bg(Color::Rgb(40, 40, 48)));
        f.render_stateful_widget(list, nav_area, &mut self.list_state);

        let profile = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("👤 {}", self.session.username),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("   {}", self.session.role),
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(profile, profile_area);
    }
}
