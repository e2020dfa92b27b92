use super::null_as_default;
use serde::{Deserialize, Serialize};

/// A base tour as sold to clients: place, length, price and a description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TourOffer {
    pub base_tour_id: i64,
    pub country_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub duration: i64,
    pub price: f64,
}

impl Default for TourOffer {
    fn default() -> Self {
        Self {
            base_tour_id: 0,
            country_id: 0,
            country: String::new(),
            city: String::new(),
            description: String::new(),
            duration: 1,
            price: 0.0,
        }
    }
}
