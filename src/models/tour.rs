use super::null_as_default;
use serde::{Deserialize, Serialize};

/// A booked tour with its hotel stay and transport legs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TourCard {
    pub tour_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    pub base_tour_id: i64,
    pub base_tour_price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub activity_name: String,
    pub total_cost: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub hotel: HotelShort,
    pub hotel_booking_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hotel_room_number: String,
    pub hotel_booking_price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub check_in_date: String,
    pub duration: i64,
    pub employee_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub transport_bookings: Vec<TransportBooking>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelShort {
    pub hotel_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hotel_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hotel_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hotel_city: String,
}

/// One transport leg; countries, cities and points are classifier ids
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportBooking {
    pub departure_country: i64,
    pub departure_city: i64,
    pub departure_point: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub departure_point_name: String,
    pub arrival_country: i64,
    pub arrival_city: i64,
    pub arrival_point: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub arrival_point_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transport_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub departure_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub arrival_date: String,
    pub price: f64,
}
