use super::common::{create_dialog_block, create_instructions_paragraph, cursor_spans, shortcut_color, InstructionShortcut};
use crate::forms::{FieldLine, FormView, LineKind};
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

const LABEL_WIDTH: usize = 22;

pub fn render_form_dialog(f: &mut Frame, area: Rect, view: &FormView) {
    let dialog_area = LayoutManager::centered_rect(80, 85, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(format!(" {} ", view.title), Color::Cyan);
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let [fields_area, instructions_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let lines: Vec<Line> = view.lines.iter().map(field_line).collect();
    let focused = view.lines.iter().position(|line| line.focused).unwrap_or(0);
    let offset = scroll_offset(focused, lines.len(), fields_area.height as usize);
    f.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), fields_area);

    let shortcuts: Vec<InstructionShortcut> = view
        .shortcuts
        .iter()
        .map(|(key, description)| (*key, shortcut_color(key), *description))
        .collect();
    f.render_widget(create_instructions_paragraph(&shortcuts), instructions_area);
}

/// First line to draw so the focused line stays in view
pub fn scroll_offset(focused: usize, total: usize, height: usize) -> usize {
    if height == 0 || total <= height {
        return 0;
    }
    let max_offset = total - height;
    focused.saturating_sub(height / 2).min(max_offset)
}

fn field_line(line: &FieldLine) -> Line<'static> {
    let marker = if line.focused { "▶ " } else { "  " };
    let label_style = match (line.focused, line.enabled) {
        (_, false) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::Gray),
    };
    let value_style = if line.enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    if line.kind == LineKind::Heading {
        return Line::from(Span::styled(
            format!("── {} ──", line.label),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:<width$}", line.label, width = LABEL_WIDTH), label_style),
    ];

    match line.kind {
        LineKind::Text { cursor, hint } => {
            if line.focused && line.enabled {
                spans.extend(cursor_spans(&line.value, cursor, value_style));
            } else {
                spans.push(Span::styled(line.value.clone(), value_style));
            }
            if let Some(hint) = hint {
                if line.value.is_empty() || line.focused {
                    spans.push(Span::styled(format!("  {}", hint), Style::default().fg(Color::DarkGray)));
                }
            }
        }
        LineKind::Select { count } => {
            let arrows = if line.focused && line.enabled { ("◀ ", " ▶") } else { ("  ", "  ") };
            spans.push(Span::styled(arrows.0, Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(line.value.clone(), value_style));
            spans.push(Span::styled(arrows.1, Style::default().fg(Color::Cyan)));
            if count == 0 && line.enabled {
                spans.push(Span::styled("  (loading…)", Style::default().fg(Color::DarkGray)));
            }
        }
        LineKind::Toggle => spans.push(Span::styled(line.value.clone(), value_style)),
        LineKind::Info => spans.push(Span::styled(
            line.value.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        LineKind::Heading => {}
    }
    Line::from(spans)
}
