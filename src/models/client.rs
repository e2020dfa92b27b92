use super::null_as_default;
use serde::{Deserialize, Serialize};

/// A client with the purchases made so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientCard {
    pub client_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub purchases: Vec<Purchase>,
}

impl ClientCard {
    /// "Last First" as shown on cards
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name).trim().to_string()
    }

    /// The most recent purchase is the last one in the list
    pub fn last_purchase(&self) -> Option<&Purchase> {
        self.purchases.last()
    }
}

/// A tour purchase with its nested insurance details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Purchase {
    pub tour_purchase_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_date: String,
    pub status_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    pub tour_id: i64,
    pub insurance_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub insurance_type: String,
    pub payment_amount: f64,
    pub coverage_amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub insurance_company_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub covered_risks: Vec<String>,
}

impl Purchase {
    pub fn has_insurance(&self) -> bool {
        self.insurance_id != 0 || !self.insurance_type.is_empty()
    }
}

/// Body of `POST clients`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone_number: String,
    pub email: String,
}

/// Body of `POST clients/{id}/purchases`; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    /// Status name, not id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// The server reads the activity name from this key
    #[serde(rename = "activityTypeId", skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_company_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseStatus {
    pub status_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status_name: String,
}
