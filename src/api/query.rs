//! Query parameters for the list endpoints.
//!
//! Only parameters that carry a value are sent. List endpoints always send
//! `searchTerm`, even when empty, because the server treats its absence and
//! an empty term the same way.

use crate::models::TourCard;
use crate::utils::datetime::parse_api_date;
use chrono::NaiveDate;
use std::fmt::Display;

pub type QueryParams = Vec<(&'static str, String)>;

fn push_text(params: &mut QueryParams, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        let value = value.trim();
        if !value.is_empty() {
            params.push((key, value.to_string()));
        }
    }
}

fn push_value<T: Display>(params: &mut QueryParams, key: &'static str, value: &Option<T>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

/// Server-side filters of the clients list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFilter {
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub purchases_count_from: Option<i64>,
    pub purchases_count_to: Option<i64>,
    pub total_spent_from: Option<f64>,
    pub total_spent_to: Option<f64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl ClientFilter {
    pub fn is_empty(&self) -> bool {
        let mut params = QueryParams::new();
        self.append_to(&mut params);
        params.is_empty()
    }

    fn append_to(&self, params: &mut QueryParams) {
        push_text(params, "status", &self.status);
        push_text(params, "dateFrom", &self.date_from);
        push_text(params, "dateTo", &self.date_to);
        push_value(params, "purchasesCountFrom", &self.purchases_count_from);
        push_value(params, "purchasesCountTo", &self.purchases_count_to);
        push_value(params, "totalSpentFrom", &self.total_spent_from);
        push_value(params, "totalSpentTo", &self.total_spent_to);
        push_text(params, "firstName", &self.first_name);
        push_text(params, "lastName", &self.last_name);
        push_text(params, "email", &self.email);
        push_text(params, "phoneNumber", &self.phone_number);
    }
}

/// `GET clients` parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientQuery {
    pub search_term: String,
    pub filter: ClientFilter,
}

impl ClientQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            filter: ClientFilter::default(),
        }
    }

    pub fn params(&self) -> QueryParams {
        let mut params = vec![("searchTerm", self.search_term.clone())];
        self.filter.append_to(&mut params);
        params
    }
}

/// Server-side filters of the offers list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferFilter {
    pub country_id: Option<i64>,
    pub city_name: Option<String>,
    pub duration_from: Option<i64>,
    pub duration_to: Option<i64>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
}

impl OfferFilter {
    pub fn is_empty(&self) -> bool {
        let mut params = QueryParams::new();
        self.append_to(&mut params);
        params.is_empty()
    }

    fn append_to(&self, params: &mut QueryParams) {
        push_value(params, "countryId", &self.country_id);
        push_text(params, "cityName", &self.city_name);
        push_value(params, "durationFrom", &self.duration_from);
        push_value(params, "durationTo", &self.duration_to);
        push_value(params, "priceFrom", &self.price_from);
        push_value(params, "priceTo", &self.price_to);
    }
}

/// `GET tour-manager/offers` parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferQuery {
    pub search_term: String,
    pub filter: OfferFilter,
}

impl OfferQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            filter: OfferFilter::default(),
        }
    }

    pub fn params(&self) -> QueryParams {
        let mut params = vec![("searchTerm", self.search_term.clone())];
        self.filter.append_to(&mut params);
        params
    }
}

/// `GET tour-manager/tours-with-filters` parameters plus client-side status flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourFilter {
    pub country_id: Option<i64>,
    pub city_id: Option<i64>,
    pub activity_name: Option<String>,
    pub start_date_from: Option<String>,
    pub start_date_to: Option<String>,
    pub end_date_from: Option<String>,
    pub end_date_to: Option<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub timeline: TourTimeline,
}

impl TourFilter {
    /// Parameters sent to the server; the timeline is applied locally
    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_value(&mut params, "countryId", &self.country_id);
        push_value(&mut params, "cityId", &self.city_id);
        push_text(&mut params, "activityName", &self.activity_name);
        push_text(&mut params, "startDateFrom", &self.start_date_from);
        push_text(&mut params, "startDateTo", &self.start_date_to);
        push_text(&mut params, "endDateFrom", &self.end_date_from);
        push_text(&mut params, "endDateTo", &self.end_date_to);
        push_value(&mut params, "priceFrom", &self.price_from);
        push_value(&mut params, "priceTo", &self.price_to);
        params
    }

    pub fn is_empty(&self) -> bool {
        self.params().is_empty() && self.timeline.is_empty()
    }
}

/// Where a tour sits relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl TourStatus {
    /// Classify a tour; `None` when its dates do not parse
    pub fn of(tour: &TourCard, today: NaiveDate) -> Option<Self> {
        let start = parse_api_date(&tour.start_date)?;
        let end = parse_api_date(&tour.end_date)?;
        if start > today {
            Some(TourStatus::Upcoming)
        } else if end < today {
            Some(TourStatus::Completed)
        } else {
            Some(TourStatus::Ongoing)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TourStatus::Upcoming => "upcoming",
            TourStatus::Ongoing => "ongoing",
            TourStatus::Completed => "completed",
        }
    }
}

/// Status checkboxes of the tour filter
///
/// No flag set lets every tour through. Each flag set narrows the list
/// further, so a tour must satisfy all of them; since a tour has exactly one
/// status, two flags together leave nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TourTimeline {
    pub ongoing: bool,
    pub completed: bool,
    pub upcoming: bool,
}

impl TourTimeline {
    pub fn is_empty(&self) -> bool {
        !self.ongoing && !self.completed && !self.upcoming
    }

    pub fn matches(&self, tour: &TourCard, today: NaiveDate) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(status) = TourStatus::of(tour, today) else {
            return false;
        };
        (!self.ongoing || status == TourStatus::Ongoing)
            && (!self.completed || status == TourStatus::Completed)
            && (!self.upcoming || status == TourStatus::Upcoming)
    }

    pub fn apply(&self, tours: Vec<TourCard>, today: NaiveDate) -> Vec<TourCard> {
        tours.into_iter().filter(|tour| self.matches(tour, today)).collect()
    }
}
