//! Modal forms: create and edit records, and pick list filters.
//!
//! A form owns its field values and the classifier options it has loaded.
//! It never talks to the network itself: key handling returns a
//! [`FormOutcome`] naming the lookups to run or the submission to send, and
//! the dialog hosting the form feeds the answers back through
//! [`Form::apply_lookup`] and [`Form::apply_outcome`].

pub mod client_form;
pub mod field;
pub mod filter_form;
pub mod lookup;
pub mod offer_form;
pub mod tour_form;

pub use client_form::{EditClientForm, NewClientForm};
pub use field::{Field, FieldEvent, FieldSet, SelectInput, SelectOption, TextInput, TextKind, Widget};
pub use filter_form::{ClientFilterForm, OfferFilterForm, TourFilterForm};
pub use lookup::{Lookup, LookupSlot, LookupTicket, LookupTracker};
pub use offer_form::OfferForm;
pub use tour_form::TourForm;

use crate::api::{ClientQuery, LookupData, OfferQuery, Submission, SubmissionOutcome, TourFilter};
use crate::models::{City, ClientCard, Country, TourCard, TourOffer};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the host should do after a key press
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    None,
    Lookups(Vec<Lookup>),
    Submit(Submission),
    /// Validation failed; show the message and keep the form open
    Invalid(String),
    Cancel,
}

impl FormOutcome {
    pub(crate) fn lookups(lookups: Vec<Lookup>) -> Self {
        if lookups.is_empty() {
            FormOutcome::None
        } else {
            FormOutcome::Lookups(lookups)
        }
    }
}

/// How a line of the form is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Text { cursor: usize, hint: Option<&'static str> },
    Select { count: usize },
    Toggle,
    Info,
    Heading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldLine {
    pub label: String,
    pub value: String,
    pub kind: LineKind,
    pub focused: bool,
    pub enabled: bool,
}

/// Everything the dialog needs to draw a form
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub title: String,
    pub lines: Vec<FieldLine>,
    pub shortcuts: Vec<(&'static str, &'static str)>,
}

pub trait Form {
    fn view(&self) -> FormView;

    /// Classifier fetches to run when the form opens
    fn initial_lookups(&mut self) -> Vec<Lookup> {
        Vec::new()
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormOutcome;

    /// Apply a classifier response; may ask for further lookups
    fn apply_lookup(&mut self, ticket: LookupTicket, result: Result<LookupData, String>) -> Vec<Lookup>;

    /// Returns true when the form keeps itself open after this outcome
    fn apply_outcome(&mut self, _outcome: &SubmissionOutcome) -> bool {
        false
    }
}

/// Which form to open
#[derive(Debug, Clone, PartialEq)]
pub enum FormKind {
    NewClient,
    EditClient(ClientCard),
    NewOffer,
    EditOffer(TourOffer),
    NewTour,
    EditTour(TourCard),
    ClientFilter(ClientQuery),
    OfferFilter(OfferQuery),
    TourFilter(TourFilter),
}

impl FormKind {
    pub fn build(self, employee_id: i64) -> Box<dyn Form> {
        match self {
            FormKind::NewClient => Box::new(NewClientForm::new()),
            FormKind::EditClient(client) => Box::new(EditClientForm::new(client)),
            FormKind::NewOffer => Box::new(OfferForm::new()),
            FormKind::EditOffer(offer) => Box::new(OfferForm::edit(offer)),
            FormKind::NewTour => Box::new(TourForm::new(employee_id)),
            FormKind::EditTour(tour) => Box::new(TourForm::edit(tour)),
            FormKind::ClientFilter(query) => Box::new(ClientFilterForm::new(query)),
            FormKind::OfferFilter(query) => Box::new(OfferFilterForm::new(query)),
            FormKind::TourFilter(filter) => Box::new(TourFilterForm::new(filter)),
        }
    }
}

/// Keys every form treats the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormKey {
    Submit,
    Cancel,
    AddRow,
    RemoveRow,
    Field,
}

pub(crate) fn form_key(key: &KeyEvent) -> FormKey {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => FormKey::Submit,
        KeyCode::Esc => FormKey::Cancel,
        KeyCode::Char('n') if ctrl => FormKey::AddRow,
        KeyCode::Char('d') if ctrl => FormKey::RemoveRow,
        _ => FormKey::Field,
    }
}

pub(crate) const SUBMIT_SHORTCUTS: [(&str, &str); 3] = [("Enter", "Save"), ("Tab", "Next field"), ("Esc", "Cancel")];

// Option builders

pub(crate) fn country_options(countries: &[Country]) -> Vec<SelectOption> {
    countries
        .iter()
        .map(|country| SelectOption::new(country.country_id.to_string(), &country.name))
        .collect()
}

pub(crate) fn city_options(cities: &[City]) -> Vec<SelectOption> {
    cities
        .iter()
        .map(|city| SelectOption::new(city.city_id.to_string(), &city.name))
        .collect()
}

pub(crate) fn plain_options<S: AsRef<str>>(values: &[S]) -> Vec<SelectOption> {
    values.iter().map(|value| SelectOption::plain(value.as_ref())).collect()
}

/// Trimmed text, or `None` when blank
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Amount as typed into number inputs
pub(crate) fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

pub(crate) fn log_lookup_error(form: &str, ticket: &LookupTicket, error: &str) {
    log::error!("{}: failed to load {:?}: {}", form, ticket.slot, error);
}
