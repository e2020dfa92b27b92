//! Saves and filter applications requested by forms.

use super::query::{ClientQuery, OfferQuery, TourFilter};
use super::{AgencyApi, ApiError};
use crate::constants::{
    ERROR_CLIENT_CREATE_FAILED, ERROR_CLIENT_SAVE_FAILED, ERROR_FILTER_FAILED, ERROR_OFFER_CREATE_FAILED,
    ERROR_OFFER_SAVE_FAILED, ERROR_PURCHASE_ADD_FAILED, ERROR_TOUR_CREATE_FAILED, ERROR_TOUR_SAVE_FAILED,
    SUCCESS_CLIENT_CREATED, SUCCESS_CLIENT_UPDATED, SUCCESS_FILTER_APPLIED, SUCCESS_OFFER_CREATED,
    SUCCESS_OFFER_UPDATED, SUCCESS_PURCHASE_ADDED, SUCCESS_TOUR_CREATED, SUCCESS_TOUR_UPDATED,
};
use crate::models::{ClientCard, NewClient, NewPurchase, Purchase, TourCard, TourOffer};
use chrono::NaiveDate;

/// A write or filter request produced by a form
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    CreateClient(NewClient),
    UpdateClient(ClientCard),
    AddPurchase { client_id: i64, purchase: NewPurchase },
    CreateOffer(TourOffer),
    UpdateOffer(TourOffer),
    CreateTour(TourCard),
    UpdateTour(TourCard),
    FilterClients(ClientQuery),
    FilterOffers(OfferQuery),
    FilterTours(TourFilter),
}

impl Submission {
    /// Short label used for background task descriptions and logs
    pub fn description(&self) -> String {
        match self {
            Submission::CreateClient(client) => format!("Create client {} {}", client.last_name, client.first_name),
            Submission::UpdateClient(client) => format!("Update client {}", client.client_id),
            Submission::AddPurchase { client_id, .. } => format!("Add purchase to client {}", client_id),
            Submission::CreateOffer(offer) => format!("Create offer {}, {}", offer.city, offer.country),
            Submission::UpdateOffer(offer) => format!("Update offer {}", offer.base_tour_id),
            Submission::CreateTour(tour) => format!("Create tour starting {}", tour.start_date),
            Submission::UpdateTour(tour) => format!("Update tour {}", tour.tour_id),
            Submission::FilterClients(_) => "Filter clients".to_string(),
            Submission::FilterOffers(_) => "Filter offers".to_string(),
            Submission::FilterTours(_) => "Filter tours".to_string(),
        }
    }

    /// Alert text shown when the request fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Submission::CreateClient(_) => ERROR_CLIENT_CREATE_FAILED,
            Submission::UpdateClient(_) => ERROR_CLIENT_SAVE_FAILED,
            Submission::AddPurchase { .. } => ERROR_PURCHASE_ADD_FAILED,
            Submission::CreateOffer(_) => ERROR_OFFER_CREATE_FAILED,
            Submission::UpdateOffer(_) => ERROR_OFFER_SAVE_FAILED,
            Submission::CreateTour(_) => ERROR_TOUR_CREATE_FAILED,
            Submission::UpdateTour(_) => ERROR_TOUR_SAVE_FAILED,
            Submission::FilterClients(_) | Submission::FilterOffers(_) | Submission::FilterTours(_) => {
                ERROR_FILTER_FAILED
            }
        }
    }
}

/// What the server answered to a [`Submission`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    ClientCreated(ClientCard),
    ClientUpdated(ClientCard),
    PurchaseAdded { client_id: i64, purchase: Purchase },
    OfferCreated(TourOffer),
    OfferUpdated(TourOffer),
    TourCreated(TourCard),
    TourUpdated(TourCard),
    ClientsFiltered { query: ClientQuery, clients: Vec<ClientCard> },
    OffersFiltered { query: OfferQuery, offers: Vec<TourOffer> },
    ToursFiltered { filter: TourFilter, tours: Vec<TourCard> },
}

impl SubmissionOutcome {
    pub fn success_message(&self) -> &'static str {
        match self {
            SubmissionOutcome::ClientCreated(_) => SUCCESS_CLIENT_CREATED,
            SubmissionOutcome::ClientUpdated(_) => SUCCESS_CLIENT_UPDATED,
            SubmissionOutcome::PurchaseAdded { .. } => SUCCESS_PURCHASE_ADDED,
            SubmissionOutcome::OfferCreated(_) => SUCCESS_OFFER_CREATED,
            SubmissionOutcome::OfferUpdated(_) => SUCCESS_OFFER_UPDATED,
            SubmissionOutcome::TourCreated(_) => SUCCESS_TOUR_CREATED,
            SubmissionOutcome::TourUpdated(_) => SUCCESS_TOUR_UPDATED,
            SubmissionOutcome::ClientsFiltered { .. }
            | SubmissionOutcome::OffersFiltered { .. }
            | SubmissionOutcome::ToursFiltered { .. } => SUCCESS_FILTER_APPLIED,
        }
    }
}

/// Send a submission to the API
///
/// Filtered tours are narrowed by the timeline flags against `today`.
pub async fn execute_submission(
    api: &dyn AgencyApi,
    submission: Submission,
    today: NaiveDate,
) -> Result<SubmissionOutcome, ApiError> {
    log::info!("{}", submission.description());
    let outcome = match submission {
        Submission::CreateClient(client) => SubmissionOutcome::ClientCreated(api.create_client(&client).await?),
        Submission::UpdateClient(client) => {
            api.update_client(&client).await?;
            SubmissionOutcome::ClientUpdated(client)
        }
        Submission::AddPurchase { client_id, purchase } => SubmissionOutcome::PurchaseAdded {
            client_id,
            purchase: api.add_purchase(client_id, &purchase).await?,
        },
        Submission::CreateOffer(offer) => SubmissionOutcome::OfferCreated(api.create_offer(&offer).await?),
        Submission::UpdateOffer(offer) => SubmissionOutcome::OfferUpdated(api.update_offer(&offer).await?),
        Submission::CreateTour(tour) => SubmissionOutcome::TourCreated(api.create_tour(&tour).await?),
        Submission::UpdateTour(tour) => SubmissionOutcome::TourUpdated(api.update_tour(&tour).await?),
        Submission::FilterClients(query) => {
            let clients = api.list_clients(&query).await?;
            SubmissionOutcome::ClientsFiltered { query, clients }
        }
        Submission::FilterOffers(query) => {
            let offers = api.list_offers(&query).await?;
            SubmissionOutcome::OffersFiltered { query, offers }
        }
        Submission::FilterTours(filter) => {
            let tours = api.list_tours_filtered(&filter).await?;
            let tours = filter.timeline.apply(tours, today);
            SubmissionOutcome::ToursFiltered { filter, tours }
        }
    };
    Ok(outcome)
}
