use super::{detail_line, or_dash, title_line, title_style, CardContext, CardView};
use crate::forms::FormKind;
use crate::models::TourOffer;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

impl CardView for TourOffer {
    const NOUN: &'static str = "offers";

    fn card_lines(&self, expanded: bool, ctx: &CardContext) -> Vec<Line<'static>> {
        let mut lines = vec![
            title_line(
                "🏷",
                vec![
                    Span::styled(or_dash(&self.city).to_string(), title_style()),
                    Span::styled(format!(", {}", or_dash(&self.country)), Style::default().fg(Color::Cyan)),
                ],
            ),
            detail_line(3, format!("{} days • {}", self.duration, ctx.money(self.price))),
        ];

        if expanded {
            if self.description.trim().is_empty() {
                lines.push(detail_line(5, "No description"));
            } else {
                lines.extend(self.description.lines().map(|line| detail_line(5, line)));
            }
        }
        lines
    }

    fn add_form() -> Option<FormKind> {
        Some(FormKind::NewOffer)
    }

    fn edit_form(&self) -> Option<FormKind> {
        Some(FormKind::EditOffer(self.clone()))
    }
}
