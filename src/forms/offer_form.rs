//! Create or edit a tour offer.

use super::{
    amount, city_options, country_options, form_key, log_lookup_error, Field, FieldEvent, FieldSet, Form, FormKey,
    FormOutcome, FormView, Lookup, LookupSlot, LookupTicket, LookupTracker, SelectOption, TextKind, SUBMIT_SHORTCUTS,
};
use crate::api::{LookupData, LookupRequest, Submission};
use crate::constants::ERROR_OFFER_FIELDS_REQUIRED;
use crate::models::TourOffer;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferField {
    Country,
    City,
    Duration,
    Price,
    Description,
}

pub struct OfferForm {
    original: Option<TourOffer>,
    fields: FieldSet<OfferField>,
    tracker: LookupTracker,
}

impl OfferForm {
    pub fn new() -> Self {
        Self::build(None, &TourOffer::default())
    }

    pub fn edit(offer: TourOffer) -> Self {
        let mut form = Self::build(Some(offer.clone()), &offer);
        if offer.country_id > 0 {
            if let Some(select) = form.fields.select_mut(OfferField::Country) {
                select.set_value(offer.country_id.to_string());
            }
            if let Some(select) = form.fields.select_mut(OfferField::City) {
                select.set_value(offer.city.clone());
            }
        }
        form
    }

    fn build(original: Option<TourOffer>, offer: &TourOffer) -> Self {
        Self {
            original,
            fields: FieldSet::new(vec![
                Field::select(OfferField::Country, "Country"),
                Field::select(OfferField::City, "City"),
                Field::text_with(OfferField::Duration, "Duration (days)", TextKind::Number, offer.duration.to_string()),
                Field::text_with(OfferField::Price, "Price", TextKind::Number, amount(offer.price)),
                Field::text_with(OfferField::Description, "Description", TextKind::Plain, &offer.description),
            ]),
            tracker: LookupTracker::new(),
        }
    }

    pub fn fields(&self) -> &FieldSet<OfferField> {
        &self.fields
    }

    fn submit(&self) -> FormOutcome {
        let (Some(country_id), Some(city)) = (
            self.fields.select_i64(OfferField::Country),
            self.fields.select_value(OfferField::City),
        ) else {
            return FormOutcome::Invalid(ERROR_OFFER_FIELDS_REQUIRED.to_string());
        };

        let base = self.original.clone().unwrap_or_default();
        let offer = TourOffer {
            base_tour_id: base.base_tour_id,
            country_id,
            country: self.fields.select_label(OfferField::Country).unwrap_or_default(),
            city,
            description: self.fields.text(OfferField::Description).trim().to_string(),
            duration: self
                .fields
                .input(OfferField::Duration)
                .and_then(|input| input.integer())
                .unwrap_or(1)
                .max(1),
            price: self
                .fields
                .input(OfferField::Price)
                .and_then(|input| input.number())
                .unwrap_or(0.0)
                .max(0.0),
        };

        if self.original.is_some() {
            FormOutcome::Submit(Submission::UpdateOffer(offer))
        } else {
            FormOutcome::Submit(Submission::CreateOffer(offer))
        }
    }

    /// A new country reloads the cities; the city survives if still listed
    fn on_country_change(&mut self) -> FormOutcome {
        match self.fields.select_i64(OfferField::Country) {
            Some(country_id) => FormOutcome::lookups(vec![self
                .tracker
                .issue(LookupSlot::Cities, LookupRequest::Cities { country_id })]),
            None => {
                self.tracker.invalidate(LookupSlot::Cities);
                if let Some(select) = self.fields.select_mut(OfferField::City) {
                    select.clear();
                }
                FormOutcome::None
            }
        }
    }
}

impl Default for OfferForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for OfferForm {
    fn view(&self) -> FormView {
        let title = match &self.original {
            Some(offer) => format!("🏷 Edit offer {}, {}", offer.city, offer.country),
            None => "🏷 New offer".to_string(),
        };
        FormView {
            title,
            lines: self.fields.lines(),
            shortcuts: SUBMIT_SHORTCUTS.to_vec(),
        }
    }

    fn initial_lookups(&mut self) -> Vec<Lookup> {
        let mut lookups = vec![self.tracker.issue(LookupSlot::Countries, LookupRequest::Countries)];
        if let Some(country_id) = self.original.as_ref().map(|offer| offer.country_id).filter(|id| *id > 0) {
            lookups.push(
                self.tracker
                    .issue(LookupSlot::Cities, LookupRequest::Cities { country_id }),
            );
        }
        lookups
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match form_key(&key) {
            FormKey::Submit => self.submit(),
            FormKey::Cancel => FormOutcome::Cancel,
            FormKey::AddRow | FormKey::RemoveRow => FormOutcome::None,
            FormKey::Field => match self.fields.handle_key(key) {
                FieldEvent::Changed(OfferField::Country) => self.on_country_change(),
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
                self.fields.set_options(OfferField::Country, country_options(&countries));
            }
            Ok(LookupData::Cities(cities)) => {
                // Offers store the city by name
                let options: Vec<SelectOption> = city_options(&cities)
                    .into_iter()
                    .map(|option| SelectOption::plain(option.label))
                    .collect();
                self.fields.set_options(OfferField::City, options);
            }
            Ok(other) => log::warn!("Offer form: unexpected lookup data {:?}", other),
            Err(e) => {
                log_lookup_error("Offer form", &ticket, &e);
                if ticket.slot == LookupSlot::Cities {
                    if let Some(select) = self.fields.select_mut(OfferField::City) {
                        select.clear();
                    }
                }
            }
        }
        Vec::new()
    }
}
