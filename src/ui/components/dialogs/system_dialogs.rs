use super::common::{create_dialog_block, create_instructions_paragraph, render_scrollbar, shortcuts};
use super::scroll_behavior::ScrollState;
use crate::constants::DIALOG_TITLE_LOGS;
use crate::logger::Logger;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const HELP_CONTENT: &str = r"
TOURDESK - Travel agency back office
====================================

SECTIONS
--------
1-4         Open Tours, Tour offers, Clients or Insurance
J/K         Next/previous section (Shift+↓/↑ also works)
            Sections outside your role are not shown

LISTS
-----
j/k ↓/↑     Move between cards
Enter/Space Expand or collapse the selected card
←/→ [ ]     Previous/next page
s           Cycle the sort field
o           Toggle ascending/descending order
/           Search the current list
f           Filters for the current section
r           Reload from the server

RECORDS
-------
a           Add a client, offer or tour
e           Edit the selected card

FORMS
-----
Tab/↓       Next field
Shift+Tab/↑ Previous field
←/→         Choose an option or toggle a checkbox
Enter       Save (or apply filters)
Esc         Cancel
Ctrl+N      Add a row (transport booking, purchase)
Ctrl+D      Remove the focused row

GENERAL
-------
?           Toggle this help
G           Show logs
L           Log out
q, Ctrl+C   Quit

Press 'Esc' or '?' to close this help panel
";

/// Message box for info and error dialogs
pub fn render_message_dialog(f: &mut Frame, area: Rect, title: String, color: Color, message: &str, scroll: &mut ScrollState) {
    let dialog_area = LayoutManager::centered_rect_lines(64, 12, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(title, color);
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let [content_area, instructions_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let lines: Vec<&str> = message.lines().collect();
    let visible_height = content_area.height as usize;
    let offset = scroll.clamp(lines.len(), visible_height);
    let text = lines.iter().skip(offset).take(visible_height).copied().collect::<Vec<_>>().join("\n");

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, content_area);
    f.render_widget(
        create_instructions_paragraph(&[shortcuts::ENTER_CLOSE, shortcuts::SCROLL]),
        instructions_area,
    );

    if lines.len() > visible_height {
        render_scrollbar(f, content_area, &mut scroll.scrollbar);
    }
}

pub fn render_help_dialog(f: &mut Frame, area: Rect, scroll: &mut ScrollState) {
    render_text_panel(
        f,
        area,
        HELP_CONTENT,
        "📖 Help - Press 'Esc' or '?' to close",
        scroll,
    );
}

pub fn render_logs_dialog(f: &mut Frame, area: Rect, logger: Option<&Logger>, scroll: &mut ScrollState) {
    let logs = logger.map(Logger::get_logs).unwrap_or_default();
    let content = if logs.is_empty() {
        "No logs yet".to_string()
    } else {
        logs.join("\n")
    };
    render_text_panel(f, area, &content, DIALOG_TITLE_LOGS, scroll);
}

/// Alert drawn over an open form; the form stays intact underneath
pub fn render_alert(f: &mut Frame, area: Rect, message: &str) {
    let height = message.lines().count().max(1) as u16 + 3;
    let alert_area = LayoutManager::centered_rect_lines(56, height, area);
    f.render_widget(Clear, alert_area);

    let block = create_dialog_block(" ⚠ Cannot save ".to_string(), Color::Red);
    let inner = block.inner(alert_area);
    f.render_widget(block, alert_area);

    let [message_area, instructions_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(message.to_string())
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        message_area,
    );
    f.render_widget(
        Paragraph::new("Press any key to return to the form")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        instructions_area,
    );
}

fn render_text_panel(f: &mut Frame, area: Rect, content: &str, title: &str, scroll: &mut ScrollState) {
    let panel_area = LayoutManager::centered_rect(90, 90, area);
    f.render_widget(Clear, panel_area);

    let margin_x = 2;
    let margin_y = 1;
    let content_area = Rect::new(
        panel_area.x + margin_x,
        panel_area.y + margin_y,
        panel_area.width.saturating_sub(margin_x * 2),
        panel_area.height.saturating_sub(margin_y * 2),
    );

    let lines: Vec<&str> = content.lines().collect();
    let visible_height = content_area.height.saturating_sub(2) as usize;
    let offset = scroll.clamp(lines.len(), visible_height);
    let text = lines.iter().skip(offset).take(visible_height).copied().collect::<Vec<_>>().join("\n");

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .title_alignment(Alignment::Center),
        )
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, content_area);

    if lines.len() > visible_height {
        render_scrollbar(f, content_area, &mut scroll.scrollbar);
    }
}
