//! Create or edit a booked tour.
//!
//! The form cascades country → city → base tours and hotels, prices the
//! tour from the base tour and the chosen activity, and carries any number
//! of transport booking rows, each with its own departure and arrival
//! cascades.

use super::{
    amount, city_options, country_options, form_key, log_lookup_error, plain_options, Field, FieldEvent, FieldSet,
    Form, FormKey, FormOutcome, FormView, Lookup, LookupSlot, LookupTicket, LookupTracker, SelectOption, TextKind,
};
use crate::api::{LookupData, LookupRequest, Submission};
use crate::constants::{ERROR_FILL_ALL_FIELDS, ERROR_INVALID_START_DATE};
use crate::models::{BaseTour, Hotel, HotelShort, TourCard, TransportBooking, TransportPoint};
use crate::utils::datetime::{add_days, date_input_value, datetime_input_value};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourField {
    Country,
    City,
    BaseTour,
    StartDate,
    Activity,
    TotalCost,
    Hotel,
    RoomNumber,
    HotelPrice,
    BookingsHeading,
    Booking(u64, BookingField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    Heading,
    DepartureCountry,
    DepartureCity,
    ArrivalCountry,
    ArrivalCity,
    TransportType,
    DeparturePoint,
    ArrivalPoint,
    DepartureDate,
    ArrivalDate,
    Price,
}

/// Which end of a transport leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Departure,
    Arrival,
}

impl End {
    fn country(self) -> BookingField {
        match self {
            End::Departure => BookingField::DepartureCountry,
            End::Arrival => BookingField::ArrivalCountry,
        }
    }

    fn city(self) -> BookingField {
        match self {
            End::Departure => BookingField::DepartureCity,
            End::Arrival => BookingField::ArrivalCity,
        }
    }

    fn point(self) -> BookingField {
        match self {
            End::Departure => BookingField::DeparturePoint,
            End::Arrival => BookingField::ArrivalPoint,
        }
    }

    fn cities_slot(self, row: u64) -> LookupSlot {
        match self {
            End::Departure => LookupSlot::DepartureCities(row),
            End::Arrival => LookupSlot::ArrivalCities(row),
        }
    }

    fn points_slot(self, row: u64) -> LookupSlot {
        match self {
            End::Departure => LookupSlot::DeparturePoints(row),
            End::Arrival => LookupSlot::ArrivalPoints(row),
        }
    }
}

/// Transport points loaded for one booking row
#[derive(Debug, Clone, Default)]
struct BookingRow {
    id: u64,
    departure_points: Vec<TransportPoint>,
    arrival_points: Vec<TransportPoint>,
    /// Names sent when the point options have not loaded yet
    departure_point_name: String,
    arrival_point_name: String,
}

pub struct TourForm {
    original: Option<TourCard>,
    employee_id: i64,
    fields: FieldSet<TourField>,
    tracker: LookupTracker,
    countries: Vec<SelectOption>,
    base_tours: Vec<BaseTour>,
    base_tour: Option<BaseTour>,
    hotels: Vec<Hotel>,
    activity_cost: f64,
    rows: Vec<BookingRow>,
    next_row: u64,
}

impl TourForm {
    pub fn new(employee_id: i64) -> Self {
        Self {
            original: None,
            employee_id,
            fields: FieldSet::new(vec![
                Field::select(TourField::Country, "Country"),
                Field::select(TourField::City, "City"),
                Field::select(TourField::BaseTour, "Duration"),
                Field::text(TourField::StartDate, "Start date", TextKind::Date),
                Field::select(TourField::Activity, "Activity"),
                Field::text_with(TourField::TotalCost, "Total cost", TextKind::Number, "0"),
                Field::select(TourField::Hotel, "Hotel"),
                Field::text(TourField::RoomNumber, "Room number", TextKind::Plain),
                Field::text_with(TourField::HotelPrice, "Hotel booking price", TextKind::Number, "0"),
                Field::heading(TourField::BookingsHeading, "Transport bookings"),
            ]),
            tracker: LookupTracker::new(),
            countries: Vec::new(),
            base_tours: Vec::new(),
            base_tour: None,
            hotels: Vec::new(),
            activity_cost: 0.0,
            rows: Vec::new(),
            next_row: 1,
        }
    }

    /// Pre-fill from an existing tour; country and city come from its base tour
    pub fn edit(tour: TourCard) -> Self {
        let mut form = Self::new(tour.employee_id);
        form.fields
            .set_text(TourField::StartDate, date_input_value(&tour.start_date));
        form.fields.set_text(TourField::TotalCost, amount(tour.total_cost));
        form.fields.set_text(TourField::RoomNumber, &tour.hotel_room_number);
        form.fields
            .set_text(TourField::HotelPrice, amount(tour.hotel_booking_price));
        if !tour.activity_name.is_empty() {
            if let Some(select) = form.fields.select_mut(TourField::Activity) {
                select.set_value(&tour.activity_name);
            }
        }
        if tour.hotel.hotel_id > 0 {
            if let Some(select) = form.fields.select_mut(TourField::Hotel) {
                select.set_value(tour.hotel.hotel_id.to_string());
            }
        }
        for booking in &tour.transport_bookings {
            form.push_row(Some(booking));
        }
        form.fields.focus(TourField::Country);
        form.original = Some(tour);
        form
    }

    pub fn fields(&self) -> &FieldSet<TourField> {
        &self.fields
    }

    pub fn base_tour(&self) -> Option<&BaseTour> {
        self.base_tour.as_ref()
    }

    pub fn activity_cost(&self) -> f64 {
        self.activity_cost
    }

    /// Row ids of the transport bookings, in display order
    pub fn booking_rows(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row.id).collect()
    }

    fn clear_select(&mut self, field: TourField) {
        if let Some(select) = self.fields.select_mut(field) {
            select.clear();
        }
    }

    fn recompute_total(&mut self) {
        let base_price = self.base_tour.as_ref().map(|tour| tour.price).unwrap_or(0.0);
        let total = self.activity_cost + base_price;
        self.fields.set_text(TourField::TotalCost, amount(total));
    }

    // Main cascade

    fn on_country_change(&mut self) -> Vec<Lookup> {
        for field in [TourField::City, TourField::BaseTour, TourField::Hotel] {
            self.clear_select(field);
        }
        self.base_tours.clear();
        self.hotels.clear();
        self.tracker.invalidate(LookupSlot::BaseTours);
        self.tracker.invalidate(LookupSlot::Hotels);
        self.tracker.invalidate(LookupSlot::BaseTour);
        if self.base_tour.take().is_some() {
            self.recompute_total();
        }
        match self.fields.select_i64(TourField::Country) {
            Some(country_id) => vec![self
                .tracker
                .issue(LookupSlot::Cities, LookupRequest::Cities { country_id })],
            None => {
                self.tracker.invalidate(LookupSlot::Cities);
                Vec::new()
            }
        }
    }

    fn on_city_change(&mut self) -> Vec<Lookup> {
        self.tracker.invalidate(LookupSlot::BaseTour);
        self.clear_select(TourField::BaseTour);
        self.clear_select(TourField::Hotel);
        self.base_tours.clear();
        self.hotels.clear();
        if self.base_tour.take().is_some() {
            self.recompute_total();
        }
        match self.fields.select_i64(TourField::City) {
            Some(city_id) => self.city_lookups(city_id),
            None => {
                self.tracker.invalidate(LookupSlot::BaseTours);
                self.tracker.invalidate(LookupSlot::Hotels);
                Vec::new()
            }
        }
    }

    fn city_lookups(&mut self, city_id: i64) -> Vec<Lookup> {
        vec![
            self.tracker
                .issue(LookupSlot::BaseTours, LookupRequest::BaseTours { city_id }),
            self.tracker.issue(LookupSlot::Hotels, LookupRequest::Hotels { city_id }),
        ]
    }

    fn on_base_tour_change(&mut self) {
        self.tracker.invalidate(LookupSlot::BaseTour);
        let id = self.fields.select_i64(TourField::BaseTour);
        self.base_tour = id.and_then(|id| self.base_tours.iter().find(|tour| tour.base_tour_id == id).cloned());
        self.recompute_total();
    }

    fn on_activity_change(&mut self) -> Vec<Lookup> {
        match self.fields.select_value(TourField::Activity) {
            Some(activity) => vec![self
                .tracker
                .issue(LookupSlot::ActivityCost, LookupRequest::ActivityCost { activity })],
            None => {
                self.tracker.invalidate(LookupSlot::ActivityCost);
                self.activity_cost = 0.0;
                self.recompute_total();
                Vec::new()
            }
        }
    }

    /// Restore country, city and base tour from the tour being edited
    fn hydrate_base_tour(&mut self, base_tour: BaseTour) -> Vec<Lookup> {
        if let Some(select) = self.fields.select_mut(TourField::Country) {
            select.set_value(base_tour.country_id.to_string());
        }
        if let Some(select) = self.fields.select_mut(TourField::City) {
            select.set_value(base_tour.city_id.to_string());
        }
        if let Some(select) = self.fields.select_mut(TourField::BaseTour) {
            select.set_value(base_tour.base_tour_id.to_string());
        }
        let country_id = base_tour.country_id;
        let city_id = base_tour.city_id;
        self.base_tour = Some(base_tour);

        let mut lookups = vec![self
            .tracker
            .issue(LookupSlot::Cities, LookupRequest::Cities { country_id })];
        lookups.extend(self.city_lookups(city_id));
        lookups
    }

    // Transport bookings

    fn push_row(&mut self, booking: Option<&TransportBooking>) -> u64 {
        let id = self.next_row;
        self.next_row += 1;
        let field = |f| TourField::Booking(id, f);

        let mut fields = vec![
            Field::heading(field(BookingField::Heading), booking_heading(self.rows.len() + 1)),
            Field::select(field(BookingField::DepartureCountry), "Departure country"),
            Field::select(field(BookingField::DepartureCity), "Departure city"),
            Field::select(field(BookingField::ArrivalCountry), "Arrival country"),
            Field::select(field(BookingField::ArrivalCity), "Arrival city"),
            Field::select(field(BookingField::TransportType), "Transport type"),
            Field::select(field(BookingField::DeparturePoint), "Departure point"),
            Field::select(field(BookingField::ArrivalPoint), "Arrival point"),
            Field::text(field(BookingField::DepartureDate), "Departure", TextKind::DateTime),
            Field::text(field(BookingField::ArrivalDate), "Arrival", TextKind::DateTime),
            Field::text_with(field(BookingField::Price), "Price", TextKind::Number, "0"),
        ];

        let mut row = BookingRow {
            id,
            ..BookingRow::default()
        };
        if let Some(booking) = booking {
            let pending = [
                (BookingField::DepartureCountry, booking.departure_country),
                (BookingField::DepartureCity, booking.departure_city),
                (BookingField::DeparturePoint, booking.departure_point),
                (BookingField::ArrivalCountry, booking.arrival_country),
                (BookingField::ArrivalCity, booking.arrival_city),
                (BookingField::ArrivalPoint, booking.arrival_point),
            ];
            for item in fields.iter_mut() {
                let TourField::Booking(_, which) = item.id else {
                    continue;
                };
                let super::Widget::Select(select) = &mut item.widget else {
                    continue;
                };
                if let Some((_, value)) = pending.iter().find(|(f, value)| *f == which && *value > 0) {
                    select.set_value(value.to_string());
                }
                if which == BookingField::TransportType && !booking.transport_type.is_empty() {
                    select.set_value(&booking.transport_type);
                }
            }
            for item in fields.iter_mut() {
                let super::Widget::Text(input) = &mut item.widget else {
                    continue;
                };
                match item.id {
                    TourField::Booking(_, BookingField::DepartureDate) => {
                        input.set_value(datetime_input_value(&booking.departure_date))
                    }
                    TourField::Booking(_, BookingField::ArrivalDate) => {
                        input.set_value(datetime_input_value(&booking.arrival_date))
                    }
                    TourField::Booking(_, BookingField::Price) => input.set_value(amount(booking.price)),
                    _ => {}
                }
            }
            row.departure_point_name = booking.departure_point_name.clone();
            row.arrival_point_name = booking.arrival_point_name.clone();
        }

        self.fields.extend(fields);
        if !self.countries.is_empty() {
            for end in [End::Departure, End::Arrival] {
                self.fields
                    .set_options(TourField::Booking(id, end.country()), self.countries.clone());
            }
        }
        self.rows.push(row);
        id
    }

    /// Lookups that restore a pre-filled booking row
    fn row_lookups(&mut self, id: u64) -> Vec<Lookup> {
        let mut lookups = Vec::new();
        for end in [End::Departure, End::Arrival] {
            let country = self.fields.select_effective(TourField::Booking(id, end.country()));
            if let Some(country_id) = country.and_then(|value| value.parse().ok()) {
                lookups.push(
                    self.tracker
                        .issue(end.cities_slot(id), LookupRequest::Cities { country_id }),
                );
            }
            let city = self.fields.select_effective(TourField::Booking(id, end.city()));
            if let Some(city_id) = city.and_then(|value| value.parse().ok()) {
                lookups.push(
                    self.tracker
                        .issue(end.points_slot(id), LookupRequest::TransportPoints { city_id }),
                );
            }
        }
        lookups
    }

    fn remove_focused_row(&mut self) {
        let Some(TourField::Booking(id, _)) = self.fields.focused() else {
            return;
        };
        self.rows.retain(|row| row.id != id);
        self.fields
            .retain(|field| !matches!(field, TourField::Booking(row, _) if *row == id));
        for end in [End::Departure, End::Arrival] {
            self.tracker.invalidate(end.cities_slot(id));
            self.tracker.invalidate(end.points_slot(id));
        }
        self.renumber_rows();
        log::debug!("Removed transport booking row {}", id);
    }

    /// Headings follow row order
    fn renumber_rows(&mut self) {
        let ids: Vec<u64> = self.rows.iter().map(|row| row.id).collect();
        for (index, id) in ids.into_iter().enumerate() {
            if let Some(heading) = self.fields.get_mut(TourField::Booking(id, BookingField::Heading)) {
                heading.label = booking_heading(index + 1);
            }
        }
    }

    fn row_mut(&mut self, id: u64) -> Option<&mut BookingRow> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    fn on_row_country_change(&mut self, id: u64, end: End) -> Vec<Lookup> {
        self.clear_select(TourField::Booking(id, end.city()));
        self.clear_select(TourField::Booking(id, end.point()));
        self.set_points(id, end, Vec::new());
        self.tracker.invalidate(end.points_slot(id));
        match self.fields.select_i64(TourField::Booking(id, end.country())) {
            Some(country_id) => vec![self
                .tracker
                .issue(end.cities_slot(id), LookupRequest::Cities { country_id })],
            None => {
                self.tracker.invalidate(end.cities_slot(id));
                Vec::new()
            }
        }
    }

    fn on_row_city_change(&mut self, id: u64, end: End) -> Vec<Lookup> {
        self.clear_select(TourField::Booking(id, end.point()));
        self.set_points(id, end, Vec::new());
        match self.fields.select_i64(TourField::Booking(id, end.city())) {
            Some(city_id) => vec![self
                .tracker
                .issue(end.points_slot(id), LookupRequest::TransportPoints { city_id })],
            None => {
                self.tracker.invalidate(end.points_slot(id));
                Vec::new()
            }
        }
    }

    fn set_points(&mut self, id: u64, end: End, points: Vec<TransportPoint>) {
        if let Some(row) = self.row_mut(id) {
            match end {
                End::Departure => row.departure_points = points,
                End::Arrival => row.arrival_points = points,
            }
        }
        self.refresh_transport(id);
    }

    /// Offer the transport types served at both ends, then the matching points
    fn refresh_transport(&mut self, id: u64) {
        let Some(row) = self.rows.iter().find(|row| row.id == id) else {
            return;
        };
        let types = transport_types(&row.departure_points, &row.arrival_points);
        let departure = row.departure_points.clone();
        let arrival = row.arrival_points.clone();
        self.fields
            .set_options(TourField::Booking(id, BookingField::TransportType), plain_options(&types));
        self.refresh_points(id, &departure, &arrival);
    }

    fn refresh_points(&mut self, id: u64, departure: &[TransportPoint], arrival: &[TransportPoint]) {
        let transport_type = self
            .fields
            .select_value(TourField::Booking(id, BookingField::TransportType));
        for (end, points) in [(End::Departure, departure), (End::Arrival, arrival)] {
            let options = points_of_type(points, transport_type.as_deref());
            self.fields.set_options(TourField::Booking(id, end.point()), options);
        }
    }

    fn bookings(&self) -> Vec<TransportBooking> {
        self.rows
            .iter()
            .map(|row| {
                let field = |f| TourField::Booking(row.id, f);
                let id_of = |f| {
                    self.fields
                        .select_effective(field(f))
                        .and_then(|value| value.parse().ok())
                        .unwrap_or(0)
                };
                let point_name = |f, fallback: &str| {
                    self.fields
                        .select_label(field(f))
                        .unwrap_or_else(|| fallback.to_string())
                };
                TransportBooking {
                    departure_country: id_of(BookingField::DepartureCountry),
                    departure_city: id_of(BookingField::DepartureCity),
                    departure_point: id_of(BookingField::DeparturePoint),
                    departure_point_name: point_name(BookingField::DeparturePoint, &row.departure_point_name),
                    arrival_country: id_of(BookingField::ArrivalCountry),
                    arrival_city: id_of(BookingField::ArrivalCity),
                    arrival_point: id_of(BookingField::ArrivalPoint),
                    arrival_point_name: point_name(BookingField::ArrivalPoint, &row.arrival_point_name),
                    transport_type: self
                        .fields
                        .select_effective(field(BookingField::TransportType))
                        .unwrap_or_default(),
                    departure_date: self.fields.text(field(BookingField::DepartureDate)).trim().to_string(),
                    arrival_date: self.fields.text(field(BookingField::ArrivalDate)).trim().to_string(),
                    price: self
                        .fields
                        .input(field(BookingField::Price))
                        .and_then(|input| input.number())
                        .unwrap_or(0.0),
                }
            })
            .collect()
    }

    fn hotel(&self) -> HotelShort {
        let city_name = self
            .fields
            .select_label(TourField::City)
            .unwrap_or_default();
        if let Some(id) = self.fields.select_i64(TourField::Hotel) {
            if let Some(hotel) = self.hotels.iter().find(|hotel| hotel.hotel_id == id) {
                return HotelShort {
                    hotel_id: hotel.hotel_id,
                    hotel_name: hotel.name.clone(),
                    hotel_address: hotel.address.clone(),
                    hotel_city: city_name,
                };
            }
        }
        // Hotel options not loaded yet: keep what the tour had
        match (&self.original, self.fields.select(TourField::Hotel).and_then(|s| s.pending())) {
            (Some(tour), Some(pending)) if pending == tour.hotel.hotel_id.to_string() => tour.hotel.clone(),
            _ => HotelShort {
                hotel_city: city_name,
                ..HotelShort::default()
            },
        }
    }

    fn submit(&self) -> FormOutcome {
        let start_date = self.fields.text(TourField::StartDate).trim().to_string();
        let activity = self.fields.select_effective(TourField::Activity);
        let (Some(base_tour), false, Some(activity_name)) = (&self.base_tour, start_date.is_empty(), activity) else {
            return FormOutcome::Invalid(ERROR_FILL_ALL_FIELDS.to_string());
        };
        let Some(end_date) = add_days(&start_date, base_tour.duration) else {
            return FormOutcome::Invalid(ERROR_INVALID_START_DATE.to_string());
        };

        let original = self.original.clone().unwrap_or_default();
        let tour = TourCard {
            tour_id: original.tour_id,
            start_date: start_date.clone(),
            end_date,
            country: base_tour.country.clone(),
            city: base_tour.city.clone(),
            base_tour_id: base_tour.base_tour_id,
            base_tour_price: base_tour.price,
            activity_name,
            total_cost: self
                .fields
                .input(TourField::TotalCost)
                .and_then(|input| input.number())
                .unwrap_or(0.0),
            hotel: self.hotel(),
            hotel_booking_id: original.hotel_booking_id,
            hotel_room_number: self.fields.text(TourField::RoomNumber).trim().to_string(),
            hotel_booking_price: self
                .fields
                .input(TourField::HotelPrice)
                .and_then(|input| input.number())
                .unwrap_or(0.0),
            check_in_date: start_date,
            duration: base_tour.duration,
            employee_id: if self.original.is_some() {
                original.employee_id
            } else {
                self.employee_id
            },
            transport_bookings: self.bookings(),
        };

        if self.original.is_some() {
            FormOutcome::Submit(Submission::UpdateTour(tour))
        } else {
            FormOutcome::Submit(Submission::CreateTour(tour))
        }
    }

    fn on_change(&mut self, field: TourField) -> Vec<Lookup> {
        match field {
            TourField::Country => self.on_country_change(),
            TourField::City => self.on_city_change(),
            TourField::BaseTour => {
                self.on_base_tour_change();
                Vec::new()
            }
            TourField::Activity => self.on_activity_change(),
            TourField::Booking(id, BookingField::DepartureCountry) => self.on_row_country_change(id, End::Departure),
            TourField::Booking(id, BookingField::ArrivalCountry) => self.on_row_country_change(id, End::Arrival),
            TourField::Booking(id, BookingField::DepartureCity) => self.on_row_city_change(id, End::Departure),
            TourField::Booking(id, BookingField::ArrivalCity) => self.on_row_city_change(id, End::Arrival),
            TourField::Booking(id, BookingField::TransportType) => {
                if let Some(row) = self.rows.iter().find(|row| row.id == id) {
                    let departure = row.departure_points.clone();
                    let arrival = row.arrival_points.clone();
                    self.refresh_points(id, &departure, &arrival);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}

/// Departure transport types that the arrival city also serves
fn transport_types(departure: &[TransportPoint], arrival: &[TransportPoint]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for point in departure {
        let kind = &point.transport_type;
        if !types.contains(kind) && arrival.iter().any(|other| &other.transport_type == kind) {
            types.push(kind.clone());
        }
    }
    types
}

fn points_of_type(points: &[TransportPoint], transport_type: Option<&str>) -> Vec<SelectOption> {
    points
        .iter()
        .filter(|point| transport_type.map_or(true, |kind| point.transport_type == kind))
        .map(|point| SelectOption::new(point.transport_point_id.to_string(), &point.name))
        .collect()
}

impl Form for TourForm {
    fn view(&self) -> FormView {
        let title = match &self.original {
            Some(tour) => format!("🧳 Edit tour {}, {}", tour.city, tour.country),
            None => "🧳 New tour".to_string(),
        };
        FormView {
            title,
            lines: self.fields.lines(),
            shortcuts: vec![
                ("Enter", "Save"),
                ("Ctrl+N", "Add booking"),
                ("Ctrl+D", "Remove booking"),
                ("Esc", "Cancel"),
            ],
        }
    }

    fn initial_lookups(&mut self) -> Vec<Lookup> {
        let mut lookups = vec![
            self.tracker.issue(LookupSlot::Countries, LookupRequest::Countries),
            self.tracker.issue(LookupSlot::Activities, LookupRequest::Activities),
        ];
        if let Some(base_tour_id) = self
            .original
            .as_ref()
            .map(|tour| tour.base_tour_id)
            .filter(|id| *id > 0)
        {
            lookups.push(
                self.tracker
                    .issue(LookupSlot::BaseTour, LookupRequest::BaseTour { base_tour_id }),
            );
        }
        for id in self.booking_rows() {
            lookups.extend(self.row_lookups(id));
        }
        lookups
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match form_key(&key) {
            FormKey::Submit => self.submit(),
            FormKey::Cancel => FormOutcome::Cancel,
            FormKey::AddRow => {
                let id = self.push_row(None);
                self.fields
                    .focus(TourField::Booking(id, BookingField::DepartureCountry));
                FormOutcome::None
            }
            FormKey::RemoveRow => {
                self.remove_focused_row();
                FormOutcome::None
            }
            FormKey::Field => match self.fields.handle_key(key) {
                FieldEvent::Changed(field) => FormOutcome::lookups(self.on_change(field)),
                FieldEvent::Moved | FieldEvent::Ignored => FormOutcome::None,
            },
        }
    }

    fn apply_lookup(&mut self, ticket: LookupTicket, result: Result<LookupData, String>) -> Vec<Lookup> {
        if !self.tracker.accept(&ticket) {
            return Vec::new();
        }
        let data = match result {
            Ok(data) => data,
            Err(e) => {
                log_lookup_error("Tour form", &ticket, &e);
                return Vec::new();
            }
        };

        match (ticket.slot, data) {
            (LookupSlot::Countries, LookupData::Countries(countries)) => {
                self.countries = country_options(&countries);
                self.fields.set_options(TourField::Country, self.countries.clone());
                for id in self.booking_rows() {
                    for end in [End::Departure, End::Arrival] {
                        self.fields
                            .set_options(TourField::Booking(id, end.country()), self.countries.clone());
                    }
                }
            }
            (LookupSlot::Cities, LookupData::Cities(cities)) => {
                self.fields.set_options(TourField::City, city_options(&cities));
            }
            (LookupSlot::BaseTours, LookupData::BaseTours(base_tours)) => {
                let options = base_tours
                    .iter()
                    .map(|tour| SelectOption::new(tour.base_tour_id.to_string(), format!("{} days", tour.duration)))
                    .collect();
                self.base_tours = base_tours;
                self.fields.set_options(TourField::BaseTour, options);
                // A hydrated base tour keeps its own record until the user picks another
                if self.base_tour.is_none() && self.fields.select_i64(TourField::BaseTour).is_some() {
                    self.on_base_tour_change();
                }
            }
            (LookupSlot::BaseTour, LookupData::BaseTour(base_tour)) => {
                return self.hydrate_base_tour(base_tour);
            }
            (LookupSlot::Hotels, LookupData::Hotels(hotels)) => {
                let options = hotels
                    .iter()
                    .map(|hotel| SelectOption::new(hotel.hotel_id.to_string(), &hotel.name))
                    .collect();
                self.hotels = hotels;
                self.fields.set_options(TourField::Hotel, options);
            }
            (LookupSlot::Activities, LookupData::Activities(activities)) => {
                self.fields.set_options(TourField::Activity, plain_options(&activities));
            }
            (LookupSlot::ActivityCost, LookupData::ActivityCost(cost)) => {
                self.activity_cost = cost;
                self.recompute_total();
            }
            (LookupSlot::DepartureCities(id), LookupData::Cities(cities)) => {
                self.fields
                    .set_options(TourField::Booking(id, BookingField::DepartureCity), city_options(&cities));
            }
            (LookupSlot::ArrivalCities(id), LookupData::Cities(cities)) => {
                self.fields
                    .set_options(TourField::Booking(id, BookingField::ArrivalCity), city_options(&cities));
            }
            (LookupSlot::DeparturePoints(id), LookupData::TransportPoints(points)) => {
                self.set_points(id, End::Departure, points);
            }
            (LookupSlot::ArrivalPoints(id), LookupData::TransportPoints(points)) => {
                self.set_points(id, End::Arrival, points);
            }
            (slot, other) => log::warn!("Tour form: unexpected lookup data for {:?}: {:?}", slot, other),
        }
        Vec::new()
    }
}

fn booking_heading(number: usize) -> String {
    format!("Booking {}", number)
}
