//! New-client and edit-client forms.

use super::{
    country_options, city_options, form_key, log_lookup_error, non_empty, plain_options, amount, Field, FieldEvent,
    FieldSet, Form, FormKey, FormOutcome, FormView, Lookup, LookupSlot, LookupTicket, LookupTracker, SelectOption,
    TextKind, SUBMIT_SHORTCUTS,
};
use crate::api::{LookupData, LookupRequest, Submission, SubmissionOutcome};
use crate::constants::ERROR_CLIENT_NAME_REQUIRED;
use crate::models::{ClientCard, NewClient, NewPurchase, Purchase, PurchaseStatus};
use crate::utils::datetime::date_input_value;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewClientField {
    LastName,
    FirstName,
    MiddleName,
    Phone,
    Email,
}

pub struct NewClientForm {
    fields: FieldSet<NewClientField>,
}

impl NewClientForm {
    pub fn new() -> Self {
        Self {
            fields: FieldSet::new(vec![
                Field::text(NewClientField::LastName, "Last name", TextKind::Plain),
                Field::text(NewClientField::FirstName, "First name", TextKind::Plain),
                Field::text(NewClientField::MiddleName, "Middle name", TextKind::Plain),
                Field::text(NewClientField::Phone, "Phone", TextKind::Plain),
                Field::text(NewClientField::Email, "Email", TextKind::Plain),
            ]),
        }
    }

    pub fn fields(&self) -> &FieldSet<NewClientField> {
        &self.fields
    }

    fn submit(&self) -> FormOutcome {
        let client = NewClient {
            last_name: self.fields.text(NewClientField::LastName).trim().to_string(),
            first_name: self.fields.text(NewClientField::FirstName).trim().to_string(),
            middle_name: self.fields.text(NewClientField::MiddleName).trim().to_string(),
            phone_number: self.fields.text(NewClientField::Phone).trim().to_string(),
            email: self.fields.text(NewClientField::Email).trim().to_string(),
        };
        if client.last_name.is_empty() || client.first_name.is_empty() {
            return FormOutcome::Invalid(ERROR_CLIENT_NAME_REQUIRED.to_string());
        }
        FormOutcome::Submit(Submission::CreateClient(client))
    }
}

impl Default for NewClientForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for NewClientForm {
    fn view(&self) -> FormView {
        FormView {
            title: "👤 New client".to_string(),
            lines: self.fields.lines(),
            shortcuts: SUBMIT_SHORTCUTS.to_vec(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match form_key(&key) {
            FormKey::Submit => self.submit(),
            FormKey::Cancel => FormOutcome::Cancel,
            FormKey::AddRow | FormKey::RemoveRow => FormOutcome::None,
            FormKey::Field => {
                self.fields.handle_key(key);
                FormOutcome::None
            }
        }
    }

    fn apply_lookup(&mut self, _ticket: LookupTicket, _result: Result<LookupData, String>) -> Vec<Lookup> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditClientField {
    LastName,
    FirstName,
    MiddleName,
    Phone,
    Email,
    PurchasesHeading,
    Purchase(u64, PurchaseField),
    NewPurchase(NewPurchaseField),
}

/// Lines of an existing purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseField {
    Heading,
    Number,
    Date,
    Price,
    Status,
    Trip,
    Insurance,
}

/// Lines of the add-purchase section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewPurchaseField {
    Heading,
    Number,
    Date,
    Status,
    Country,
    City,
    Duration,
    Activity,
    InsuranceType,
    InsuranceCompany,
}

/// Classifier options kept so the add-purchase section can be reopened
#[derive(Debug, Clone, Default)]
struct Options {
    countries: Vec<SelectOption>,
    durations: Vec<SelectOption>,
    activities: Vec<SelectOption>,
    insurance_types: Vec<SelectOption>,
    insurance_companies: Vec<SelectOption>,
}

/// Edit a client, its purchases, and add new purchases
pub struct EditClientForm {
    client: ClientCard,
    rows: Vec<(u64, Purchase)>,
    next_row: u64,
    fields: FieldSet<EditClientField>,
    adding: bool,
    tracker: LookupTracker,
    statuses: Vec<PurchaseStatus>,
    options: Options,
}

impl EditClientForm {
    pub fn new(client: ClientCard) -> Self {
        let mut fields = FieldSet::new(vec![
            Field::text_with(EditClientField::LastName, "Last name", TextKind::Plain, &client.last_name),
            Field::text_with(EditClientField::FirstName, "First name", TextKind::Plain, &client.first_name),
            Field::text_with(
                EditClientField::MiddleName,
                "Middle name",
                TextKind::Plain,
                client.middle_name.clone().unwrap_or_default(),
            ),
            Field::text_with(EditClientField::Phone, "Phone", TextKind::Plain, &client.phone_number),
            Field::text_with(EditClientField::Email, "Email", TextKind::Plain, &client.email),
            Field::heading(EditClientField::PurchasesHeading, "Purchases"),
        ]);

        let mut rows = Vec::new();
        for (index, purchase) in client.purchases.iter().enumerate() {
            let row = index as u64 + 1;
            fields.extend(purchase_fields(row, purchase));
            rows.push((row, purchase.clone()));
        }

        Self {
            next_row: rows.len() as u64 + 1,
            rows,
            client,
            fields,
            adding: false,
            tracker: LookupTracker::new(),
            statuses: Vec::new(),
            options: Options::default(),
        }
    }

    pub fn fields(&self) -> &FieldSet<EditClientField> {
        &self.fields
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }

    /// Purchases as they will be saved
    pub fn purchases(&self) -> Vec<Purchase> {
        self.rows
            .iter()
            .map(|(row, purchase)| {
                let row = *row;
                let mut purchase = purchase.clone();
                purchase.purchase_number = self
                    .fields
                    .text(EditClientField::Purchase(row, PurchaseField::Number))
                    .trim()
                    .to_string();
                purchase.purchase_date = self
                    .fields
                    .text(EditClientField::Purchase(row, PurchaseField::Date))
                    .trim()
                    .to_string();
                if let Some(price) = self
                    .fields
                    .input(EditClientField::Purchase(row, PurchaseField::Price))
                    .and_then(|input| input.number())
                {
                    purchase.price = price;
                }
                let status = EditClientField::Purchase(row, PurchaseField::Status);
                if let (Some(id), Some(name)) = (self.fields.select_i64(status), self.fields.select_label(status)) {
                    purchase.status_id = id;
                    purchase.status = name;
                }
                purchase
            })
            .collect()
    }

    fn edited_client(&self) -> ClientCard {
        ClientCard {
            client_id: self.client.client_id,
            last_name: self.fields.text(EditClientField::LastName).trim().to_string(),
            first_name: self.fields.text(EditClientField::FirstName).trim().to_string(),
            middle_name: non_empty(self.fields.text(EditClientField::MiddleName)),
            phone_number: self.fields.text(EditClientField::Phone).trim().to_string(),
            email: self.fields.text(EditClientField::Email).trim().to_string(),
            purchases: self.purchases(),
        }
    }

    fn new_purchase(&self) -> NewPurchase {
        let text = |field| non_empty(self.fields.text(EditClientField::NewPurchase(field)));
        let select = |field| self.fields.select_value(EditClientField::NewPurchase(field));
        let select_id = |field| self.fields.select_i64(EditClientField::NewPurchase(field));
        NewPurchase {
            purchase_number: text(NewPurchaseField::Number),
            purchase_date: text(NewPurchaseField::Date),
            status: select(NewPurchaseField::Status),
            country_id: select_id(NewPurchaseField::Country),
            city_id: select_id(NewPurchaseField::City),
            duration: select_id(NewPurchaseField::Duration),
            activity: select(NewPurchaseField::Activity),
            insurance_type: select(NewPurchaseField::InsuranceType),
            insurance_company_id: select_id(NewPurchaseField::InsuranceCompany),
        }
    }

    fn status_options_by_id(&self) -> Vec<SelectOption> {
        self.statuses
            .iter()
            .map(|status| SelectOption::new(status.status_id.to_string(), &status.status_name))
            .collect()
    }

    fn status_options_by_name(&self) -> Vec<SelectOption> {
        self.statuses
            .iter()
            .map(|status| SelectOption::plain(&status.status_name))
            .collect()
    }

    fn open_add_section(&mut self) {
        if self.adding {
            return;
        }
        self.adding = true;
        use NewPurchaseField as N;
        let new = EditClientField::NewPurchase;
        self.fields.extend([
            Field::heading(new(N::Heading), "New purchase"),
            Field::text(new(N::Number), "Number", TextKind::Plain),
            Field::text(new(N::Date), "Date", TextKind::Date),
            Field::select(new(N::Status), "Status"),
            Field::select(new(N::Country), "Country"),
            Field::select(new(N::City), "City"),
            Field::select(new(N::Duration), "Duration (days)"),
            Field::select(new(N::Activity), "Activity"),
            Field::select(new(N::InsuranceType), "Insurance type"),
            Field::select(new(N::InsuranceCompany), "Insurance company"),
        ]);
        let statuses = self.status_options_by_name();
        self.fields.set_options(new(N::Status), statuses);
        self.fields.set_options(new(N::Country), self.options.countries.clone());
        self.fields.set_options(new(N::Duration), self.options.durations.clone());
        self.fields.set_options(new(N::Activity), self.options.activities.clone());
        self.fields
            .set_options(new(N::InsuranceType), self.options.insurance_types.clone());
        self.fields
            .set_options(new(N::InsuranceCompany), self.options.insurance_companies.clone());
        self.fields.focus(new(N::Number));
    }

    fn close_add_section(&mut self) {
        self.adding = false;
        self.tracker.invalidate(LookupSlot::Cities);
        self.fields
            .retain(|id| !matches!(id, EditClientField::NewPurchase(_)));
    }

    fn remove_focused_purchase(&mut self) {
        let Some(EditClientField::Purchase(row, _)) = self.fields.focused() else {
            return;
        };
        self.rows.retain(|(id, _)| *id != row);
        self.fields
            .retain(|id| !matches!(id, EditClientField::Purchase(r, _) if *r == row));
        log::debug!("Removed purchase row {} from the edit form", row);
    }

    fn on_change(&mut self, field: EditClientField) -> FormOutcome {
        if field != EditClientField::NewPurchase(NewPurchaseField::Country) {
            return FormOutcome::None;
        }
        let city = EditClientField::NewPurchase(NewPurchaseField::City);
        if let Some(select) = self.fields.select_mut(city) {
            select.clear();
        }
        match self.fields.select_i64(field) {
            Some(country_id) => FormOutcome::lookups(vec![self
                .tracker
                .issue(LookupSlot::Cities, LookupRequest::Cities { country_id })]),
            None => {
                self.tracker.invalidate(LookupSlot::Cities);
                FormOutcome::None
            }
        }
    }

    fn in_add_section(&self) -> bool {
        matches!(self.fields.focused(), Some(EditClientField::NewPurchase(_)))
    }
}

fn purchase_fields(row: u64, purchase: &Purchase) -> Vec<Field<EditClientField>> {
    let id = |field| EditClientField::Purchase(row, field);
    let title = if purchase.purchase_number.is_empty() {
        format!("Purchase #{}", purchase.tour_purchase_id)
    } else {
        format!("Purchase {}", purchase.purchase_number)
    };
    let mut status = Field::select(id(PurchaseField::Status), "Status");
    if let super::Widget::Select(select) = &mut status.widget {
        select.set_value(purchase.status_id.to_string());
    }
    vec![
        Field::heading(id(PurchaseField::Heading), title),
        Field::text_with(id(PurchaseField::Number), "Number", TextKind::Plain, &purchase.purchase_number),
        Field::text_with(
            id(PurchaseField::Date),
            "Date",
            TextKind::Date,
            date_input_value(&purchase.purchase_date),
        ),
        Field::text_with(id(PurchaseField::Price), "Price", TextKind::Number, amount(purchase.price)),
        status,
        Field::info(id(PurchaseField::Trip), "Trip", trip_summary(purchase)),
        Field::info(id(PurchaseField::Insurance), "Insurance", insurance_summary(purchase)),
    ]
}

fn trip_summary(purchase: &Purchase) -> String {
    format!(
        "{}, {} • {} – {}",
        purchase.city,
        purchase.country,
        date_input_value(&purchase.start_date),
        date_input_value(&purchase.end_date)
    )
}

fn insurance_summary(purchase: &Purchase) -> String {
    if !purchase.has_insurance() {
        return "none".to_string();
    }
    let mut summary = format!(
        "{} • {} • paid {} • covers {}",
        purchase.insurance_type,
        purchase.insurance_company_name,
        amount(purchase.payment_amount),
        amount(purchase.coverage_amount)
    );
    if !purchase.covered_risks.is_empty() {
        summary.push_str(" • ");
        summary.push_str(&purchase.covered_risks.join(", "));
    }
    summary
}

impl Form for EditClientForm {
    fn view(&self) -> FormView {
        FormView {
            title: format!("👤 Edit client {}", self.client.display_name()),
            lines: self.fields.lines(),
            shortcuts: vec![
                ("Enter", if self.in_add_section() { "Add purchase" } else { "Save" }),
                ("Ctrl+N", "New purchase"),
                ("Ctrl+D", "Remove purchase"),
                ("Esc", "Cancel"),
            ],
        }
    }

    fn initial_lookups(&mut self) -> Vec<Lookup> {
        vec![
            self.tracker
                .issue(LookupSlot::PurchaseStatuses, LookupRequest::PurchaseStatuses),
            self.tracker.issue(LookupSlot::Durations, LookupRequest::Durations),
            self.tracker.issue(LookupSlot::Countries, LookupRequest::Countries),
            self.tracker.issue(LookupSlot::Activities, LookupRequest::Activities),
            self.tracker
                .issue(LookupSlot::InsuranceTypes, LookupRequest::InsuranceTypes),
            self.tracker
                .issue(LookupSlot::InsuranceCompanies, LookupRequest::InsuranceCompanies),
        ]
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match form_key(&key) {
            FormKey::Submit if self.in_add_section() => FormOutcome::Submit(Submission::AddPurchase {
                client_id: self.client.client_id,
                purchase: self.new_purchase(),
            }),
            FormKey::Submit => {
                let client = self.edited_client();
                if client.last_name.is_empty() || client.first_name.is_empty() {
                    return FormOutcome::Invalid(ERROR_CLIENT_NAME_REQUIRED.to_string());
                }
                FormOutcome::Submit(Submission::UpdateClient(client))
            }
            FormKey::Cancel if self.in_add_section() => {
                self.close_add_section();
                FormOutcome::None
            }
            FormKey::Cancel => FormOutcome::Cancel,
            FormKey::AddRow => {
                self.open_add_section();
                FormOutcome::None
            }
            FormKey::RemoveRow => {
                self.remove_focused_purchase();
                FormOutcome::None
            }
            FormKey::Field => match self.fields.handle_key(key) {
                FieldEvent::Changed(field) => self.on_change(field),
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
                log_lookup_error("Edit client", &ticket, &e);
                return Vec::new();
            }
        };

        let new = EditClientField::NewPurchase;
        match data {
            LookupData::PurchaseStatuses(statuses) => {
                self.statuses = statuses;
                let by_id = self.status_options_by_id();
                for (row, _) in &self.rows {
                    self.fields
                        .set_options(EditClientField::Purchase(*row, PurchaseField::Status), by_id.clone());
                }
                let by_name = self.status_options_by_name();
                self.fields.set_options(new(NewPurchaseField::Status), by_name);
            }
            LookupData::Countries(countries) => {
                self.options.countries = country_options(&countries);
                self.fields
                    .set_options(new(NewPurchaseField::Country), self.options.countries.clone());
            }
            LookupData::Cities(cities) => {
                self.fields
                    .set_options(new(NewPurchaseField::City), city_options(&cities));
            }
            LookupData::Durations(durations) => {
                self.options.durations = durations
                    .iter()
                    .map(|days| SelectOption::new(days.to_string(), format!("{} days", days)))
                    .collect();
                self.fields
                    .set_options(new(NewPurchaseField::Duration), self.options.durations.clone());
            }
            LookupData::Activities(activities) => {
                self.options.activities = plain_options(&activities);
                self.fields
                    .set_options(new(NewPurchaseField::Activity), self.options.activities.clone());
            }
            LookupData::InsuranceTypes(types) => {
                self.options.insurance_types = plain_options(&types);
                self.fields
                    .set_options(new(NewPurchaseField::InsuranceType), self.options.insurance_types.clone());
            }
            LookupData::InsuranceCompanies(companies) => {
                self.options.insurance_companies = companies
                    .iter()
                    .map(|company| SelectOption::new(company.insurance_company_id.to_string(), &company.name))
                    .collect();
                self.fields.set_options(
                    new(NewPurchaseField::InsuranceCompany),
                    self.options.insurance_companies.clone(),
                );
            }
            other => log::warn!("Edit client: unexpected lookup data {:?}", other),
        }
        Vec::new()
    }

    fn apply_outcome(&mut self, outcome: &SubmissionOutcome) -> bool {
        let SubmissionOutcome::PurchaseAdded { client_id, purchase } = outcome else {
            return false;
        };
        if *client_id != self.client.client_id {
            return false;
        }

        self.close_add_section();
        let row = self.next_row;
        self.next_row += 1;
        let by_id = self.status_options_by_id();
        let fields = purchase_fields(row, purchase);
        self.fields.insert_after(
            |id| matches!(id, EditClientField::PurchasesHeading | EditClientField::Purchase(..)),
            fields,
        );
        self.fields
            .set_options(EditClientField::Purchase(row, PurchaseField::Status), by_id);
        self.rows.push((row, purchase.clone()));
        true
    }
}
