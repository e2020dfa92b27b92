use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Creates a styled main dialog block
pub fn create_dialog_block(title: String, theme_color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_style(Style::default().fg(theme_color).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(theme_color))
}

/// Creates an input field block with a visual cursor at a character position
pub fn create_input_paragraph(value: &str, cursor: usize, field_title: &str) -> Paragraph<'static> {
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(Color::White))
        .border_style(Style::default().fg(Color::Gray));

    Paragraph::new(Line::from(cursor_spans(value, cursor, Style::default().fg(Color::White))))
        .block(input_block)
}

/// Text split around a block cursor
pub fn cursor_spans(value: &str, cursor: usize, style: Style) -> Vec<Span<'static>> {
    let before: String = value.chars().take(cursor).collect();
    let at: Option<char> = value.chars().nth(cursor);
    let after: String = value.chars().skip(cursor + 1).collect();
    let cursor_style = Style::default().fg(Color::Black).bg(Color::White);

    vec![
        Span::styled(before, style),
        Span::styled(at.map_or_else(|| " ".to_string(), |c| c.to_string()), cursor_style),
        Span::styled(after, style),
    ]
}

/// Instruction shortcut definition: (key, color, description)
pub type InstructionShortcut = (&'static str, Color, &'static str);

/// Creates a paragraph with color-coded instruction shortcuts
pub fn create_instructions_paragraph(instructions: &[InstructionShortcut]) -> Paragraph<'static> {
    let mut instruction_text = Vec::new();
    for (index, (key, color, desc)) in instructions.iter().enumerate() {
        if index > 0 {
            instruction_text.push(Span::styled(" • ", Style::default().fg(Color::Gray)));
        }
        instruction_text.push(Span::styled(
            *key,
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
        instruction_text.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
    }

    Paragraph::new(Line::from(instruction_text)).alignment(Alignment::Center)
}

/// Colour a shortcut key by what it does
pub fn shortcut_color(key: &str) -> Color {
    match key {
        "Esc" => Color::Red,
        "Enter" => Color::Green,
        _ => Color::Cyan,
    }
}

pub fn render_scrollbar(f: &mut Frame, area: Rect, state: &mut ScrollbarState) {
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .track_symbol(Some("│"))
        .thumb_symbol("▐")
        .style(Style::default().fg(Color::Gray))
        .thumb_style(Style::default().fg(Color::White));

    f.render_stateful_widget(scrollbar, area, state);
}

/// Common instruction shortcuts used across dialogs
pub mod shortcuts {
    use super::*;

    pub const ESC_CANCEL: InstructionShortcut = ("Esc", Color::Red, "Cancel");
    pub const ENTER_CLOSE: InstructionShortcut = ("Enter", Color::Green, "Close");
    pub const SCROLL: InstructionShortcut = ("j/k", Color::Cyan, "Scroll");
}
