//! Remote agency API.
//!
//! [`AgencyApi`] is the seam between the UI and the HTTP service: the
//! terminal talks to [`HttpApi`] in production and tests substitute their
//! own implementation. Query builders, lookup dispatch and submission
//! dispatch live next to it.

use crate::models::{
    BaseTour, City, ClientCard, Country, Hotel, InsuranceCompany, NewClient, NewPurchase, Purchase, PurchaseStatus,
    RegisterRequest, TourCard, TourOffer, TransportPoint,
};
use crate::session::UserSession;
use async_trait::async_trait;

pub mod http;
pub mod lookup;
pub mod query;
pub mod submit;

pub use http::HttpApi;
pub use lookup::{fetch_lookup, LookupData, LookupRequest};
pub use query::{ClientFilter, ClientQuery, OfferFilter, OfferQuery, TourFilter, TourTimeline};
pub use submit::{execute_submission, Submission, SubmissionOutcome};

/// Common error types for API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("API error: {0}")]
    Other(String),
}

/// Every call the back office makes to the agency service.
#[async_trait]
pub trait AgencyApi: Send + Sync {
    // Auth
    async fn login(&self, username: &str, password: &str) -> Result<UserSession, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    // Clients
    async fn list_clients(&self, query: &ClientQuery) -> Result<Vec<ClientCard>, ApiError>;
    async fn purchase_statuses(&self) -> Result<Vec<PurchaseStatus>, ApiError>;
    async fn create_client(&self, client: &NewClient) -> Result<ClientCard, ApiError>;
    async fn update_client(&self, client: &ClientCard) -> Result<(), ApiError>;
    async fn add_purchase(&self, client_id: i64, purchase: &NewPurchase) -> Result<Purchase, ApiError>;

    // Tour offers
    async fn list_offers(&self, query: &OfferQuery) -> Result<Vec<TourOffer>, ApiError>;
    async fn create_offer(&self, offer: &TourOffer) -> Result<TourOffer, ApiError>;
    async fn update_offer(&self, offer: &TourOffer) -> Result<TourOffer, ApiError>;

    // Tours
    async fn list_tours(&self, search_term: &str) -> Result<Vec<TourCard>, ApiError>;
    async fn list_tours_filtered(&self, filter: &TourFilter) -> Result<Vec<TourCard>, ApiError>;
    async fn create_tour(&self, tour: &TourCard) -> Result<TourCard, ApiError>;
    async fn update_tour(&self, tour: &TourCard) -> Result<TourCard, ApiError>;

    // Classifiers
    async fn countries(&self) -> Result<Vec<Country>, ApiError>;
    async fn cities(&self, country_id: i64) -> Result<Vec<City>, ApiError>;
    async fn activities(&self) -> Result<Vec<String>, ApiError>;
    async fn activity_cost(&self, activity: &str) -> Result<f64, ApiError>;
    async fn durations(&self) -> Result<Vec<i64>, ApiError>;
    async fn base_tours(&self, city_id: i64) -> Result<Vec<BaseTour>, ApiError>;
    async fn base_tour(&self, base_tour_id: i64) -> Result<BaseTour, ApiError>;
    async fn hotels(&self, city_id: i64) -> Result<Vec<Hotel>, ApiError>;
    async fn transport_points(&self, city_id: i64) -> Result<Vec<TransportPoint>, ApiError>;
    async fn insurance_types(&self) -> Result<Vec<String>, ApiError>;
    async fn insurance_companies(&self) -> Result<Vec<InsuranceCompany>, ApiError>;
}
