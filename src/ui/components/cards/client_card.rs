use super::{accent_line, detail_line, or_dash, title_line, title_style, CardContext, CardView};
use crate::forms::FormKind;
use crate::models::{ClientCard, Purchase};
use ratatui::style::Color;
use ratatui::text::{Line, Span};

impl CardView for ClientCard {
    const NOUN: &'static str = "clients";

    fn card_lines(&self, expanded: bool, ctx: &CardContext) -> Vec<Line<'static>> {
        let mut name = self.display_name();
        if let Some(middle) = self.middle_name.as_deref().filter(|m| !m.trim().is_empty()) {
            name = format!("{} {}", name, middle);
        }

        let mut lines = vec![
            title_line("👤", vec![Span::styled(name, title_style())]),
            detail_line(3, format!("📞 {} • ✉ {}", or_dash(&self.phone_number), or_dash(&self.email))),
        ];

        lines.push(match self.last_purchase() {
            Some(last) => detail_line(
                3,
                format!(
                    "Purchases: {} • last #{} {} ({})",
                    self.purchases.len(),
                    or_dash(&last.purchase_number),
                    ctx.date(&last.purchase_date),
                    or_dash(&last.status)
                ),
            ),
            None => detail_line(3, "No purchases"),
        });

        if expanded {
            for purchase in &self.purchases {
                lines.extend(purchase_lines(purchase, ctx));
            }
        }
        lines
    }

    fn add_form() -> Option<FormKind> {
        Some(FormKind::NewClient)
    }

    fn edit_form(&self) -> Option<FormKind> {
        Some(FormKind::EditClient(self.clone()))
    }
}

fn purchase_lines(purchase: &Purchase, ctx: &CardContext) -> Vec<Line<'static>> {
    let mut lines = vec![
        accent_line(
            5,
            format!(
                "#{} • {} • {} • {}",
                or_dash(&purchase.purchase_number),
                ctx.date(&purchase.purchase_date),
                or_dash(&purchase.status),
                ctx.money(purchase.price)
            ),
            Color::Cyan,
        ),
        detail_line(
            7,
            format!(
                "📍 {}, {} • {}",
                or_dash(&purchase.city),
                or_dash(&purchase.country),
                ctx.period(&purchase.start_date, &purchase.end_date)
            ),
        ),
    ];

    if purchase.has_insurance() {
        lines.push(detail_line(
            7,
            format!(
                "🛡 {} • {} • paid {} • covers {}",
                or_dash(&purchase.insurance_type),
                or_dash(&purchase.insurance_company_name),
                ctx.money(purchase.payment_amount),
                ctx.money(purchase.coverage_amount)
            ),
        ));
        if !purchase.covered_risks.is_empty() {
            lines.push(detail_line(9, format!("Risks: {}", purchase.covered_risks.join(", "))));
        }
    }
    lines
}
