use super::{text, Listable, SortField, SortKey};
use crate::models::TourOffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferSort {
    Country,
    City,
    Duration,
    Price,
}

impl SortField for OfferSort {
    const ALL: &'static [Self] = &[OfferSort::Country, OfferSort::City, OfferSort::Duration, OfferSort::Price];

    fn label(self) -> &'static str {
        match self {
            OfferSort::Country => "country",
            OfferSort::City => "city",
            OfferSort::Duration => "duration",
            OfferSort::Price => "price",
        }
    }
}

impl Listable for TourOffer {
    type Key = i64;
    type Field = OfferSort;

    fn key(&self) -> i64 {
        self.base_tour_id
    }

    fn sort_key(&self, field: OfferSort) -> SortKey {
        match field {
            OfferSort::Country => text(&self.country),
            OfferSort::City => text(&self.city),
            OfferSort::Duration => SortKey::Number(self.duration as f64),
            OfferSort::Price => SortKey::Number(self.price),
        }
    }
}
