//! Data transfer objects exchanged with the agency API.
//!
//! Every struct mirrors the server's JSON shape (camelCase keys). Fields the
//! server omits or sends as null fall back to their defaults so that partially
//! populated records still render.

pub mod auth;
pub mod classifier;
pub mod client;
pub mod offer;
pub mod tour;

pub use auth::{LoginRequest, RegisterRequest};
pub use classifier::{BaseTour, City, Country, Hotel, InsuranceCompany, TransportPoint};
pub use client::{ClientCard, NewClient, NewPurchase, Purchase, PurchaseStatus};
pub use offer::TourOffer;
pub use tour::{HotelShort, TourCard, TransportBooking};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
