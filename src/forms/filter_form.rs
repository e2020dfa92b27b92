//! Filter panels for the clients, offers and tours lists.
//!
//! Blank inputs mean "no filter" for that parameter. Submitting a panel with
//! every input blank clears the filters.

use super::{
    amount, city_options, country_options, form_key, log_lookup_error, non_empty, plain_options, Field, FieldEvent,
    FieldSet, Form, FormKey, FormOutcome, FormView, Lookup, LookupSlot, LookupTicket, LookupTracker, SelectOption,
    TextKind, Widget,
};
use crate::api::{ClientFilter, ClientQuery, LookupData, LookupRequest, OfferFilter, OfferQuery, Submission, TourFilter, TourTimeline};
use crossterm::event::KeyEvent;

const FILTER_SHORTCUTS: [(&str, &str); 3] = [("Enter", "Apply"), ("Tab", "Next field"), ("Esc", "Cancel")];

fn integer_text(value: Option<i64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn amount_text(value: Option<f64>) -> String {
    value.map(amount).unwrap_or_default()
}

fn prefilled_select<F>(id: F, label: &str, value: Option<String>) -> Field<F> {
    let mut field = Field::select(id, label);
    if let (Widget::Select(select), Some(value)) = (&mut field.widget, value) {
        select.set_value(value);
    }
    field
}

fn prefilled_toggle<F>(id: F, label: &str, on: bool) -> Field<F> {
    Field::new(id, label, Widget::Toggle(on))
}

fn integer<F: Copy + PartialEq>(fields: &FieldSet<F>, id: F) -> Option<i64> {
    fields.input(id).and_then(|input| input.integer())
}

fn number<F: Copy + PartialEq>(fields: &FieldSet<F>, id: F) -> Option<f64> {
    fields.input(id).and_then(|input| input.number())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientFilterField {
    FirstName,
    LastName,
    Email,
    Phone,
    Status,
    DateFrom,
    DateTo,
    PurchasesFrom,
    PurchasesTo,
    SpentFrom,
    SpentTo,
}

pub struct ClientFilterForm {
    search_term: String,
    fields: FieldSet<ClientFilterField>,
    tracker: LookupTracker,
}

impl ClientFilterForm {
    pub fn new(query: ClientQuery) -> Self {
        use ClientFilterField as C;
        let filter = query.filter;
        let text = |id, label, kind, value: Option<String>| Field::text_with(id, label, kind, value.unwrap_or_default());
        Self {
            search_term: query.search_term,
            fields: FieldSet::new(vec![
                text(C::FirstName, "First name", TextKind::Plain, filter.first_name),
                text(C::LastName, "Last name", TextKind::Plain, filter.last_name),
                text(C::Email, "Email", TextKind::Plain, filter.email),
                text(C::Phone, "Phone", TextKind::Plain, filter.phone_number),
                prefilled_select(C::Status, "Last purchase status", filter.status),
                text(C::DateFrom, "Purchased from", TextKind::Date, filter.date_from),
                text(C::DateTo, "Purchased to", TextKind::Date, filter.date_to),
                text(C::PurchasesFrom, "Purchases from", TextKind::Number, Some(integer_text(filter.purchases_count_from))),
                text(C::PurchasesTo, "Purchases to", TextKind::Number, Some(integer_text(filter.purchases_count_to))),
                text(C::SpentFrom, "Total spent from", TextKind::Number, Some(amount_text(filter.total_spent_from))),
                text(C::SpentTo, "Total spent to", TextKind::Number, Some(amount_text(filter.total_spent_to))),
            ]),
            tracker: LookupTracker::new(),
        }
    }

    pub fn fields(&self) -> &FieldSet<ClientFilterField> {
        &self.fields
    }

    pub fn filter(&self) -> ClientFilter {
        use ClientFilterField as C;
        let text = |id| non_empty(self.fields.text(id));
        ClientFilter {
            status: self.fields.select_value(C::Status),
            date_from: text(C::DateFrom),
            date_to: text(C::DateTo),
            purchases_count_from: integer(&self.fields, C::PurchasesFrom),
            purchases_count_to: integer(&self.fields, C::PurchasesTo),
            total_spent_from: number(&self.fields, C::SpentFrom),
            total_spent_to: number(&self.fields, C::SpentTo),
            first_name: text(C::FirstName),
            last_name: text(C::LastName),
            email: text(C::Email),
            phone_number: text(C::Phone),
        }
    }
}

impl Form for ClientFilterForm {
    fn view(&self) -> FormView {
        FormView {
            title: "🔎 Filter clients".to_string(),
            lines: self.fields.lines(),
            shortcuts: FILTER_SHORTCUTS.to_vec(),
        }
    }

    fn initial_lookups(&mut self) -> Vec<Lookup> {
        vec![self
            .tracker
            .issue(LookupSlot::PurchaseStatuses, LookupRequest::PurchaseStatuses)]
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match form_key(&key) {
            FormKey::Submit => FormOutcome::Submit(Submission::FilterClients(ClientQuery {
                search_term: self.search_term.clone(),
                filter: self.filter(),
            })),
            FormKey::Cancel => FormOutcome::Cancel,
            FormKey::AddRow | FormKey::RemoveRow => FormOutcome::None,
            FormKey::Field => {
                self.fields.handle_key(key);
                FormOutcome::None
            }
        }
    }

    fn apply_lookup(&mut self, ticket: LookupTicket, result: Result<LookupData, String>) -> Vec<Lookup> {
        if !self.tracker.accept(&ticket) {
            return Vec::new();
        }
        match result {
            Ok(LookupData::PurchaseStatuses(statuses)) => {
                let options = statuses
                    .iter()
                    .map(|status| SelectOption::plain(&status.status_name))
                    .collect();
                self.fields.set_options(ClientFilterField::Status, options);
            }
            Ok(other) => log::warn!("Client filter: unexpected lookup data {:?}", other),
            Err(e) => log_lookup_error("Client filter", &ticket, &e),
        }
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferFilterField {
    Country,
    City,
    DurationFrom,
    DurationTo,
    PriceFrom,
    PriceTo,
}

pub struct OfferFilterForm {
    search_term: String,
    country_id: Option<i64>,
    fields: FieldSet<OfferFilterField>,
    tracker: LookupTracker,
}

impl OfferFilterForm {
    pub fn new(query: OfferQuery) -> Self {
        use OfferFilterField as O;
        let filter = query.filter;
        Self {
            search_term: query.search_term,
            country_id: filter.country_id,
            fields: FieldSet::new(vec![
                prefilled_select(O::Country, "Country", filter.country_id.map(|id| id.to_string())),
                prefilled_select(O::City, "City", filter.city_name),
                Field::text_with(O::DurationFrom, "Duration from", TextKind::Number, integer_text(filter.duration_from)),
                Field::text_with(O::DurationTo, "Duration to", TextKind::Number, integer_text(filter.duration_to)),
                Field::text_with(O::PriceFrom, "Price from", TextKind::Number, amount_text(filter.price_from)),
                Field::text_with(O::PriceTo, "Price to", TextKind::Number, amount_text(filter.price_to)),
            ]),
            tracker: LookupTracker::new(),
        }
    }

    pub fn fields(&self) -> &FieldSet<OfferFilterField> {
        &self.fields
    }

    pub fn filter(&self) -> OfferFilter {
        use OfferFilterField as O;
        OfferFilter {
            country_id: self.fields.select_i64(O::Country),
            city_name: self.fields.select_value(O::City),
            duration_from: integer(&self.fields, O::DurationFrom),
            duration_to: integer(&self.fields, O::DurationTo),
            price_from: number(&self.fields, O::PriceFrom),
            price_to: number(&self.fields, O::PriceTo),
        }
    }
}

impl Form for OfferFilterForm {
    fn view(&self) -> FormView {
        FormView {
            title: "🔎 Filter offers".to_string(),
            lines: self.fields.lines(),
            shortcuts: FILTER_SHORTCUTS.to_vec(),
        }
    }

    fn initial_lookups(&mut self) -> Vec<Lookup> {
        let mut lookups = vec![self.tracker.issue(LookupSlot::Countries, LookupRequest::Countries)];
        if let Some(country_id) = self.country_id {
            lookups.push(
                self.tracker
                    .issue(LookupSlot::Cities, LookupRequest::Cities { country_id }),
            );
        }
        lookups
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match form_key(&key) {
            FormKey::Submit => FormOutcome::Submit(Submission::FilterOffers(OfferQuery {
                search_term: self.search_term.clone(),
                filter: self.filter(),
            })),
            FormKey::Cancel => FormOutcome::Cancel,
            FormKey::AddRow | FormKey::RemoveRow => FormOutcome::None,
            FormKey::Field => match self.fields.handle_key(key) {
                FieldEvent::Changed(OfferFilterField::Country) => {
                    if let Some(select) = self.fields.select_mut(OfferFilterField::City) {
                        select.clear();
                    }
                    self.country_id = self.fields.select_i64(OfferFilterField::Country);
                    match self.country_id {
                        Some(country_id) => FormOutcome::lookups(vec![self
                            .tracker
                            .issue(LookupSlot::Cities, LookupRequest::Cities { country_id })]),
                        None => {
                            self.tracker.invalidate(LookupSlot::Cities);
                            FormOutcome::None
                        }
                    }
                }
                _ => FormOutcome::None,
            },
        }
    }

    fn apply_lookup(&mut self, ticket: LookupTicket, result: Result<LookupData, String>) -> Vec<Lookup> {
        if !self.tracker.accept(&ticket) {
            return Vec::new();
        }
        match result {
            Ok(LookupData::Countries(countries)) => {
                self.fields
                    .set_options(OfferFilterField::Country, country_options(&countries));
            }
            Ok(LookupData::Cities(cities)) => {
                let names: Vec<String> = cities.into_iter().map(|city| city.name).collect();
                self.fields.set_options(OfferFilterField::City, plain_options(&names));
            }
            Ok(other) => log::warn!("Offer filter: unexpected lookup data {:?}", other),
            Err(e) => log_lookup_error("Offer filter", &ticket, &e),
        }
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourFilterField {
    Country,
    City,
    Activity,
    StartFrom,
    StartTo,
    EndFrom,
    EndTo,
    PriceFrom,
    PriceTo,
    Ongoing,
    Completed,
    Upcoming,
}

pub struct TourFilterForm {
    country_id: Option<i64>,
    fields: FieldSet<TourFilterField>,
    tracker: LookupTracker,
}

impl TourFilterForm {
    pub fn new(filter: TourFilter) -> Self {
        use TourFilterField as T;
        let date = |id, label, value: Option<String>| Field::text_with(id, label, TextKind::Date, value.unwrap_or_default());
        Self {
            country_id: filter.country_id,
            fields: FieldSet::new(vec![
                prefilled_select(T::Country, "Country", filter.country_id.map(|id| id.to_string())),
                prefilled_select(T::City, "City", filter.city_id.map(|id| id.to_string())),
                prefilled_select(T::Activity, "Activity", filter.activity_name),
                date(T::StartFrom, "Start from", filter.start_date_from),
                date(T::StartTo, "Start to", filter.start_date_to),
                date(T::EndFrom, "End from", filter.end_date_from),
                date(T::EndTo, "End to", filter.end_date_to),
                Field::text_with(T::PriceFrom, "Price from", TextKind::Number, amount_text(filter.price_from)),
                Field::text_with(T::PriceTo, "Price to", TextKind::Number, amount_text(filter.price_to)),
                prefilled_toggle(T::Ongoing, "Ongoing", filter.timeline.ongoing),
                prefilled_toggle(T::Completed, "Completed", filter.timeline.completed),
                prefilled_toggle(T::Upcoming, "Upcoming", filter.timeline.upcoming),
            ]),
            tracker: LookupTracker::new(),
        }
    }

    pub fn fields(&self) -> &FieldSet<TourFilterField> {
        &self.fields
    }

    pub fn filter(&self) -> TourFilter {
        use TourFilterField as T;
        let text = |id| non_empty(self.fields.text(id));
        TourFilter {
            country_id: self.fields.select_i64(T::Country),
            city_id: self.fields.select_i64(T::City),
            activity_name: self.fields.select_value(T::Activity),
            start_date_from: text(T::StartFrom),
            start_date_to: text(T::StartTo),
            end_date_from: text(T::EndFrom),
            end_date_to: text(T::EndTo),
            price_from: number(&self.fields, T::PriceFrom),
            price_to: number(&self.fields, T::PriceTo),
            timeline: TourTimeline {
                ongoing: self.fields.toggled(T::Ongoing),
                completed: self.fields.toggled(T::Completed),
                upcoming: self.fields.toggled(T::Upcoming),
            },
        }
    }
}

impl Form for TourFilterForm {
    fn view(&self) -> FormView {
        FormView {
            title: "🔎 Filter tours".to_string(),
            lines: self.fields.lines(),
            shortcuts: FILTER_SHORTCUTS.to_vec(),
        }
    }

    fn initial_lookups(&mut self) -> Vec<Lookup> {
        let mut lookups = vec![
            self.tracker.issue(LookupSlot::Countries, LookupRequest::Countries),
            self.tracker.issue(LookupSlot::Activities, LookupRequest::Activities),
        ];
        if let Some(country_id) = self.country_id {
            lookups.push(
                self.tracker
                    .issue(LookupSlot::Cities, LookupRequest::Cities { country_id }),
            );
        }
        lookups
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match form_key(&key) {
            FormKey::Submit => FormOutcome::Submit(Submission::FilterTours(self.filter())),
            FormKey::Cancel => FormOutcome::Cancel,
            FormKey::AddRow | FormKey::RemoveRow => FormOutcome::None,
            FormKey::Field => match self.fields.handle_key(key) {
                FieldEvent::Changed(TourFilterField::Country) => {
                    if let Some(select) = self.fields.select_mut(TourFilterField::City) {
                        select.clear();
                    }
                    self.country_id = self.fields.select_i64(TourFilterField::Country);
                    match self.country_id {
                        Some(country_id) => FormOutcome::lookups(vec![self
                            .tracker
                            .issue(LookupSlot::Cities, LookupRequest::Cities { country_id })]),
                        None => {
                            self.tracker.invalidate(LookupSlot::Cities);
                            FormOutcome::None
                        }
                    }
                }
                _ => FormOutcome::None,
            },
        }
    }

    fn apply_lookup(&mut self, ticket: LookupTicket, result: Result<LookupData, String>) -> Vec<Lookup> {
        if !self.tracker.accept(&ticket) {
            return Vec::new();
        }
        match result {
            Ok(LookupData::Countries(countries)) => {
                self.fields
                    .set_options(TourFilterField::Country, country_options(&countries));
            }
            Ok(LookupData::Cities(cities)) => {
                self.fields.set_options(TourFilterField::City, city_options(&cities));
            }
            Ok(LookupData::Activities(activities)) => {
                self.fields
                    .set_options(TourFilterField::Activity, plain_options(&activities));
            }
            Ok(other) => log::warn!("Tour filter: unexpected lookup data {:?}", other),
            Err(e) => log_lookup_error("Tour filter", &ticket, &e),
        }
        Vec::new()
    }
}
