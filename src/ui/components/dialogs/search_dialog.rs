use super::common::{create_dialog_block, create_input_paragraph, create_instructions_paragraph, shortcuts};
use crate::forms::TextInput;
use crate::session::Section;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Color,
    widgets::Clear,
    Frame,
};

/// Search box; the list behind it filters as the user types
pub fn render_search_dialog(f: &mut Frame, area: Rect, section: Section, input: &TextInput) {
    let dialog_area = LayoutManager::centered_rect_lines(60, 6, area);
    f.render_widget(Clear, dialog_area);

    let block = create_dialog_block(format!(" 🔎 Search {} ", section.title()), Color::Yellow);
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let [input_area, instructions_area] = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(inner);
    f.render_widget(create_input_paragraph(input.value(), input.cursor(), "Search"), input_area);
    f.render_widget(
        create_instructions_paragraph(&[("Enter", Color::Green, "Done"), shortcuts::ESC_CANCEL]),
        instructions_area,
    );
}
