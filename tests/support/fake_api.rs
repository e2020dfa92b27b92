#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use tourdesk::api::{AgencyApi, ApiError, ClientQuery, OfferQuery, TourFilter};
use tourdesk::models::{
    BaseTour, City, ClientCard, Country, Hotel, InsuranceCompany, NewClient, NewPurchase, Purchase, PurchaseStatus,
    RegisterRequest, TourCard, TourOffer, TransportPoint,
};
use tourdesk::session::{Role, UserSession};

/// In-memory agency API that records every call it receives
#[derive(Default)]
pub struct FakeApi {
    pub clients: Vec<ClientCard>,
    pub offers: Vec<TourOffer>,
    pub tours: Vec<TourCard>,
    pub countries: Vec<Country>,
    pub cities: Vec<City>,
    pub fail_activity_cost: bool,
    pub fail_lists: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: impl Into<String>) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.into());
        }
    }

    fn list_result<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, ApiError> {
        if self.fail_lists {
            Err(ApiError::Network("connection refused".to_string()))
        } else {
            Ok(items.to_vec())
        }
    }
}

#[async_trait]
impl AgencyApi for FakeApi {
    async fn login(&self, username: &str, _password: &str) -> Result<UserSession, ApiError> {
        self.record(format!("login {}", username));
        Ok(UserSession::new(username, Role::ClientManager))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.record(format!("register {}", request.username));
        Ok(())
    }

    async fn list_clients(&self, query: &ClientQuery) -> Result<Vec<ClientCard>, ApiError> {
        self.record(format!("clients '{}'", query.search_term));
        self.list_result(&self.clients)
    }

    async fn purchase_statuses(&self) -> Result<Vec<PurchaseStatus>, ApiError> {
        self.record("purchase statuses");
        Ok(vec![
            PurchaseStatus {
                status_id: 1,
                status_name: "Paid".to_string(),
            },
            PurchaseStatus {
                status_id: 2,
                status_name: "Cancelled".to_string(),
            },
        ])
    }

    async fn create_client(&self, client: &NewClient) -> Result<ClientCard, ApiError> {
        self.record(format!("create client {}", client.last_name));
        Ok(ClientCard {
            client_id: 100,
            last_name: client.last_name.clone(),
            first_name: client.first_name.clone(),
            phone_number: client.phone_number.clone(),
            email: client.email.clone(),
            ..ClientCard::default()
        })
    }

    async fn update_client(&self, client: &ClientCard) -> Result<(), ApiError> {
        self.record(format!("update client {}", client.client_id));
        Ok(())
    }

    async fn add_purchase(&self, client_id: i64, purchase: &NewPurchase) -> Result<Purchase, ApiError> {
        self.record(format!("add purchase {}", client_id));
        Ok(Purchase {
            tour_purchase_id: 900,
            purchase_number: purchase.purchase_number.clone().unwrap_or_default(),
            ..Purchase::default()
        })
    }

    async fn list_offers(&self, query: &OfferQuery) -> Result<Vec<TourOffer>, ApiError> {
        self.record(format!("offers '{}'", query.search_term));
        self.list_result(&self.offers)
    }

    async fn create_offer(&self, offer: &TourOffer) -> Result<TourOffer, ApiError> {
        self.record(format!("create offer {}", offer.city));
        Ok(TourOffer {
            base_tour_id: 500,
            ..offer.clone()
        })
    }

    async fn update_offer(&self, offer: &TourOffer) -> Result<TourOffer, ApiError> {
        self.record(format!("update offer {}", offer.base_tour_id));
        Ok(offer.clone())
    }

    async fn list_tours(&self, search_term: &str) -> Result<Vec<TourCard>, ApiError> {
        self.record(format!("tours '{}'", search_term));
        self.list_result(&self.tours)
    }

    async fn list_tours_filtered(&self, _filter: &TourFilter) -> Result<Vec<TourCard>, ApiError> {
        self.record("tours filtered");
        self.list_result(&self.tours)
    }

    async fn create_tour(&self, tour: &TourCard) -> Result<TourCard, ApiError> {
        self.record(format!("create tour {}", tour.start_date));
        Ok(TourCard {
            tour_id: 700,
            ..tour.clone()
        })
    }

    async fn update_tour(&self, tour: &TourCard) -> Result<TourCard, ApiError> {
        self.record(format!("update tour {}", tour.tour_id));
        Ok(tour.clone())
    }

    async fn countries(&self) -> Result<Vec<Country>, ApiError> {
        self.record("countries");
        Ok(self.countries.clone())
    }

    async fn cities(&self, country_id: i64) -> Result<Vec<City>, ApiError> {
        self.record(format!("cities {}", country_id));
        Ok(self.cities.clone())
    }

    async fn activities(&self) -> Result<Vec<String>, ApiError> {
        self.record("activities");
        Ok(vec!["Hiking".to_string(), "Diving".to_string()])
    }

    async fn activity_cost(&self, activity: &str) -> Result<f64, ApiError> {
        self.record(format!("activity cost {}", activity));
        if self.fail_activity_cost {
            Err(ApiError::NotFound(activity.to_string()))
        } else {
            Ok(120.0)
        }
    }

    async fn durations(&self) -> Result<Vec<i64>, ApiError> {
        self.record("durations");
        Ok(vec![7, 14])
    }

    async fn base_tours(&self, city_id: i64) -> Result<Vec<BaseTour>, ApiError> {
        self.record(format!("base tours {}", city_id));
        Ok(Vec::new())
    }

    async fn base_tour(&self, base_tour_id: i64) -> Result<BaseTour, ApiError> {
        self.record(format!("base tour {}", base_tour_id));
        Ok(BaseTour {
            base_tour_id,
            ..BaseTour::default()
        })
    }

    async fn hotels(&self, city_id: i64) -> Result<Vec<Hotel>, ApiError> {
        self.record(format!("hotels {}", city_id));
        Ok(Vec::new())
    }

    async fn transport_points(&self, city_id: i64) -> Result<Vec<TransportPoint>, ApiError> {
        self.record(format!("transport points {}", city_id));
        Ok(Vec::new())
    }

    async fn insurance_types(&self) -> Result<Vec<String>, ApiError> {
        self.record("insurance types");
        Ok(vec!["Medical".to_string()])
    }

    async fn insurance_companies(&self) -> Result<Vec<InsuranceCompany>, ApiError> {
        self.record("insurance companies");
        Ok(Vec::new())
    }
}
