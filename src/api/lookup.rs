//! Classifier lookups requested by forms.

use super::{AgencyApi, ApiError};
use crate::models::{BaseTour, City, Country, Hotel, InsuranceCompany, PurchaseStatus, TransportPoint};

/// A classifier fetch a form needs
#[derive(Debug, Clone, PartialEq)]
pub enum LookupRequest {
    Countries,
    Cities { country_id: i64 },
    Activities,
    ActivityCost { activity: String },
    Durations,
    BaseTours { city_id: i64 },
    BaseTour { base_tour_id: i64 },
    Hotels { city_id: i64 },
    TransportPoints { city_id: i64 },
    PurchaseStatuses,
    InsuranceTypes,
    InsuranceCompanies,
}

/// The answer to a [`LookupRequest`]
#[derive(Debug, Clone, PartialEq)]
pub enum LookupData {
    Countries(Vec<Country>),
    Cities(Vec<City>),
    Activities(Vec<String>),
    ActivityCost(f64),
    Durations(Vec<i64>),
    BaseTours(Vec<BaseTour>),
    BaseTour(BaseTour),
    Hotels(Vec<Hotel>),
    TransportPoints(Vec<TransportPoint>),
    PurchaseStatuses(Vec<PurchaseStatus>),
    InsuranceTypes(Vec<String>),
    InsuranceCompanies(Vec<InsuranceCompany>),
}

/// Run a lookup against the API
///
/// A failed activity-cost lookup counts as a cost of zero.
pub async fn fetch_lookup(api: &dyn AgencyApi, request: &LookupRequest) -> Result<LookupData, ApiError> {
    let data = match request {
        LookupRequest::Countries => LookupData::Countries(api.countries().await?),
        LookupRequest::Cities { country_id } => LookupData::Cities(api.cities(*country_id).await?),
        LookupRequest::Activities => LookupData::Activities(api.activities().await?),
        LookupRequest::ActivityCost { activity } => match api.activity_cost(activity).await {
            Ok(cost) => LookupData::ActivityCost(cost),
            Err(e) => {
                log::error!("Failed to load cost of activity '{}': {}", activity, e);
                LookupData::ActivityCost(0.0)
            }
        },
        LookupRequest::Durations => LookupData::Durations(api.durations().await?),
        LookupRequest::BaseTours { city_id } => LookupData::BaseTours(api.base_tours(*city_id).await?),
        LookupRequest::BaseTour { base_tour_id } => LookupData::BaseTour(api.base_tour(*base_tour_id).await?),
        LookupRequest::Hotels { city_id } => LookupData::Hotels(api.hotels(*city_id).await?),
        LookupRequest::TransportPoints { city_id } => {
            LookupData::TransportPoints(api.transport_points(*city_id).await?)
        }
        LookupRequest::PurchaseStatuses => LookupData::PurchaseStatuses(api.purchase_statuses().await?),
        LookupRequest::InsuranceTypes => LookupData::InsuranceTypes(api.insurance_types().await?),
        LookupRequest::InsuranceCompanies => LookupData::InsuranceCompanies(api.insurance_companies().await?),
    };
    Ok(data)
}
