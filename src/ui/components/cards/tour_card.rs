use super::{accent_line, detail_line, or_dash, title_line, title_style, CardContext, CardView};
use crate::forms::FormKind;
use crate::models::{TourCard, TransportBooking};
use crate::ui::components::highlight::highlight_spans;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

impl CardView for TourCard {
    const NOUN: &'static str = "tours";

    fn card_lines(&self, expanded: bool, ctx: &CardContext) -> Vec<Line<'static>> {
        let term = ctx.search_term;
        let gray = Style::default().fg(Color::Gray);

        let mut place = vec![Span::styled("   📍 ", gray)];
        place.extend(highlight_spans(or_dash(&self.city), term, gray));
        place.push(Span::styled(", ", gray));
        place.extend(highlight_spans(or_dash(&self.country), term, gray));

        let mut activity = vec![Span::styled("   🎯 ", gray)];
        activity.extend(highlight_spans(or_dash(&self.activity_name), term, gray));
        activity.push(Span::styled(format!(" • total {}", ctx.money(self.total_cost)), gray));

        let mut lines = vec![
            title_line(
                "🧳",
                vec![Span::styled(ctx.period(&self.start_date, &self.end_date), title_style())],
            ),
            Line::from(place),
            Line::from(activity),
        ];

        if expanded {
            let mut hotel = vec![Span::styled("     🏨 ", gray)];
            hotel.extend(highlight_spans(or_dash(&self.hotel.hotel_name), term, gray));
            hotel.push(Span::styled(
                format!(
                    ", {} • room {}",
                    or_dash(&self.hotel.hotel_address),
                    or_dash(&self.hotel_room_number)
                ),
                gray,
            ));
            lines.push(Line::from(hotel));
            lines.push(detail_line(
                5,
                format!(
                    "Base tour {} • hotel booking {} • check-in {}",
                    ctx.money(self.base_tour_price),
                    ctx.money(self.hotel_booking_price),
                    ctx.date(&self.check_in_date)
                ),
            ));

            if self.transport_bookings.is_empty() {
                lines.push(detail_line(5, "No transport bookings"));
            } else {
                lines.push(accent_line(5, "Transport:", Color::Cyan));
                for booking in &self.transport_bookings {
                    lines.push(booking_line(booking, ctx));
                }
            }
        }
        lines
    }

    fn add_form() -> Option<FormKind> {
        Some(FormKind::NewTour)
    }

    fn edit_form(&self) -> Option<FormKind> {
        Some(FormKind::EditTour(self.clone()))
    }
}

fn booking_line(booking: &TransportBooking, ctx: &CardContext) -> Line<'static> {
    detail_line(
        7,
        format!(
            "{}: {} → {} • {} – {} • {}",
            or_dash(&booking.transport_type),
            or_dash(&booking.departure_point_name),
            or_dash(&booking.arrival_point_name),
            ctx.datetime(&booking.departure_date),
            ctx.datetime(&booking.arrival_date),
            ctx.money(booking.price)
        ),
    )
}
