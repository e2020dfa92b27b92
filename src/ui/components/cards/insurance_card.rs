use super::{detail_line, or_dash, title_line, title_style, CardContext, CardView};
use crate::forms::FormKind;
use crate::listing::InsuranceRecord;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

impl CardView for InsuranceRecord {
    const NOUN: &'static str = "insurance records";

    fn card_lines(&self, expanded: bool, ctx: &CardContext) -> Vec<Line<'static>> {
        let mut lines = vec![
            title_line(
                "🛡",
                vec![
                    Span::styled(or_dash(&self.insurance_type).to_string(), title_style()),
                    Span::styled(format!(" • {}", or_dash(&self.company)), Style::default().fg(Color::Cyan)),
                ],
            ),
            detail_line(
                3,
                format!("👤 {} • purchase #{}", or_dash(&self.client_name), or_dash(&self.purchase_number)),
            ),
            detail_line(
                3,
                format!(
                    "Paid {} • covers {}",
                    ctx.money(self.payment_amount),
                    ctx.money(self.coverage_amount)
                ),
            ),
        ];

        if expanded {
            lines.push(detail_line(
                5,
                format!(
                    "📍 {}, {} • {}",
                    or_dash(&self.city),
                    or_dash(&self.country),
                    ctx.period(&self.start_date, &self.end_date)
                ),
            ));
            let risks = if self.covered_risks.is_empty() {
                "-".to_string()
            } else {
                self.covered_risks.join(", ")
            };
            lines.push(detail_line(5, format!("Risks: {}", risks)));
            lines.push(detail_line(5, format!("Insurance id {}", self.insurance_id)));
        }
        lines
    }

    fn add_form() -> Option<FormKind> {
        None
    }

    fn edit_form(&self) -> Option<FormKind> {
        None
    }
}
