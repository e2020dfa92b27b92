//! HTTP implementation of [`AgencyApi`] on top of a blocking `ureq` agent.
//!
//! Each call runs on tokio's blocking pool so the UI loop never waits on the
//! network.

use super::query::{ClientQuery, OfferQuery, QueryParams, TourFilter};
use super::{AgencyApi, ApiError};
use crate::config::ApiConfig;
use crate::models::{
    BaseTour, City, ClientCard, Country, Hotel, InsuranceCompany, LoginRequest, NewClient, NewPurchase, Purchase,
    PurchaseStatus, RegisterRequest, TourCard, TourOffer, TransportPoint,
};
use crate::session::UserSession;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use ureq::tls::TlsConfig;
use ureq::Agent;

#[derive(Debug, Clone, Copy)]
enum Method {
    Post,
    Put,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Put => "PUT",
        }
    }
}

/// Agency API client over HTTPS
#[derive(Clone)]
pub struct HttpApi {
    agent: Agent,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Self {
        let mut builder = Agent::config_builder().timeout_global(Some(Duration::from_secs(config.timeout_secs)));
        if config.accept_invalid_certs {
            builder = builder.tls_config(TlsConfig::builder().disable_verification(true).build());
        }
        let agent: Agent = builder.build().into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T>(&self, path: &str, params: QueryParams) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let url = self.url(path);

        tokio::task::spawn_blocking(move || {
            log::debug!("GET {} {:?}", url, params);
            let mut request = agent.get(url.as_str());
            for (key, value) in &params {
                request = request.query(*key, value);
            }
            let mut response = request.call().map_err(|e| map_error(&url, e))?;
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Network(format!("{}: {}", url, e)))?;
            decode(&url, &body)
        })
        .await
        .map_err(|e| ApiError::Other(format!("Request task failed: {}", e)))?
    }

    /// Send a JSON body; `None` when the server answers without content
    async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<Option<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Send + 'static,
    {
        let payload =
            serde_json::to_string(body).map_err(|e| ApiError::InvalidData(format!("Failed to encode body: {}", e)))?;
        let agent = self.agent.clone();
        let url = self.url(path);

        tokio::task::spawn_blocking(move || {
            log::debug!("{} {} {}", method.as_str(), url, payload);
            let request = match method {
                Method::Post => agent.post(url.as_str()),
                Method::Put => agent.put(url.as_str()),
            };
            let mut response = request
                .header("Content-Type", "application/json")
                .send(payload.as_bytes())
                .map_err(|e| map_error(&url, e))?;
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Network(format!("{}: {}", url, e)))?;
            if body.trim().is_empty() {
                Ok(None)
            } else {
                decode(&url, &body).map(Some)
            }
        })
        .await
        .map_err(|e| ApiError::Other(format!("Request task failed: {}", e)))?
    }

    async fn send_expecting<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Send + 'static,
    {
        self.send(method, path, body)
            .await?
            .ok_or_else(|| ApiError::InvalidData(format!("{} {} returned an empty body", method.as_str(), path)))
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to decode response from {}: {}", url, e);
        ApiError::InvalidData(format!("{}: {}", url, e))
    })
}

fn map_error(url: &str, error: ureq::Error) -> ApiError {
    log::error!("Request to {} failed: {}", url, error);
    match error {
        ureq::Error::StatusCode(code @ (401 | 403)) => ApiError::Auth(format!("{} returned HTTP {}", url, code)),
        ureq::Error::StatusCode(404) => ApiError::NotFound(url.to_string()),
        ureq::Error::StatusCode(code) => ApiError::Other(format!("{} returned HTTP {}", url, code)),
        other => ApiError::Network(format!("{}: {}", url, other)),
    }
}

#[async_trait]
impl AgencyApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<UserSession, ApiError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.send_expecting(Method::Post, "Auth/login", &request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.send::<_, serde_json::Value>(Method::Post, "Auth/register", request)
            .await
            .map(|_| ())
    }

    async fn list_clients(&self, query: &ClientQuery) -> Result<Vec<ClientCard>, ApiError> {
        self.get("clients", query.params()).await
    }

    async fn purchase_statuses(&self) -> Result<Vec<PurchaseStatus>, ApiError> {
        self.get("clients/purchase-statuses", QueryParams::new()).await
    }

    async fn create_client(&self, client: &NewClient) -> Result<ClientCard, ApiError> {
        self.send_expecting(Method::Post, "clients", client).await
    }

    async fn update_client(&self, client: &ClientCard) -> Result<(), ApiError> {
        let path = format!("clients/{}", client.client_id);
        self.send::<_, serde_json::Value>(Method::Put, &path, client)
            .await
            .map(|_| ())
    }

    async fn add_purchase(&self, client_id: i64, purchase: &NewPurchase) -> Result<Purchase, ApiError> {
        let path = format!("clients/{}/purchases", client_id);
        self.send_expecting(Method::Post, &path, purchase).await
    }

    async fn list_offers(&self, query: &OfferQuery) -> Result<Vec<TourOffer>, ApiError> {
        self.get("tour-manager/offers", query.params()).await
    }

    async fn create_offer(&self, offer: &TourOffer) -> Result<TourOffer, ApiError> {
        self.send_expecting(Method::Post, "tour-manager/offers", offer).await
    }

    async fn update_offer(&self, offer: &TourOffer) -> Result<TourOffer, ApiError> {
        let path = format!("tour-manager/offers/{}", offer.base_tour_id);
        let updated = self.send(Method::Put, &path, offer).await?;
        Ok(updated.unwrap_or_else(|| offer.clone()))
    }

    async fn list_tours(&self, search_term: &str) -> Result<Vec<TourCard>, ApiError> {
        self.get("tour-manager/tours", vec![("searchTerm", search_term.to_string())])
            .await
    }

    async fn list_tours_filtered(&self, filter: &TourFilter) -> Result<Vec<TourCard>, ApiError> {
        self.get("tour-manager/tours-with-filters", filter.params()).await
    }

    async fn create_tour(&self, tour: &TourCard) -> Result<TourCard, ApiError> {
        let created = self.send(Method::Post, "tour-manager/create-tour", tour).await?;
        Ok(created.unwrap_or_else(|| tour.clone()))
    }

    async fn update_tour(&self, tour: &TourCard) -> Result<TourCard, ApiError> {
        let updated = self.send(Method::Put, "tour-manager/update-tour", tour).await?;
        Ok(updated.unwrap_or_else(|| tour.clone()))
    }

    async fn countries(&self) -> Result<Vec<Country>, ApiError> {
        self.get("tour-classifiers/countries", QueryParams::new()).await
    }

    async fn cities(&self, country_id: i64) -> Result<Vec<City>, ApiError> {
        self.get("tour-classifiers/cities", vec![("countryId", country_id.to_string())])
            .await
    }

    async fn activities(&self) -> Result<Vec<String>, ApiError> {
        self.get("tour-classifiers/activities", QueryParams::new()).await
    }

    async fn activity_cost(&self, activity: &str) -> Result<f64, ApiError> {
        self.get(
            "tour-classifiers/activity-cost",
            vec![("activityName", activity.to_string())],
        )
        .await
    }

    async fn durations(&self) -> Result<Vec<i64>, ApiError> {
        self.get("tour-classifiers/durations", QueryParams::new()).await
    }

    async fn base_tours(&self, city_id: i64) -> Result<Vec<BaseTour>, ApiError> {
        self.get("tour-classifiers/base-tours", vec![("cityId", city_id.to_string())])
            .await
    }

    async fn base_tour(&self, base_tour_id: i64) -> Result<BaseTour, ApiError> {
        let path = format!("tour-classifiers/base-tours/{}", base_tour_id);
        self.get(&path, QueryParams::new()).await
    }

    async fn hotels(&self, city_id: i64) -> Result<Vec<Hotel>, ApiError> {
        self.get("tour-classifiers/hotels", vec![("cityId", city_id.to_string())])
            .await
    }

    async fn transport_points(&self, city_id: i64) -> Result<Vec<TransportPoint>, ApiError> {
        self.get("tour-classifiers/transport-points", vec![("cityId", city_id.to_string())])
            .await
    }

    async fn insurance_types(&self) -> Result<Vec<String>, ApiError> {
        self.get("tour-classifiers/insurance-types", QueryParams::new()).await
    }

    async fn insurance_companies(&self) -> Result<Vec<InsuranceCompany>, ApiError> {
        self.get("tour-classifiers/insurance-companies", QueryParams::new()).await
    }
}
