use super::{date, text, Listable, SortField, SortKey};
use crate::models::TourCard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourSort {
    StartDate,
    EndDate,
    Country,
    City,
    ActivityName,
    TotalCost,
    HotelName,
}

impl SortField for TourSort {
    const ALL: &'static [Self] = &[
        TourSort::StartDate,
        TourSort::EndDate,
        TourSort::Country,
        TourSort::City,
        TourSort::ActivityName,
        TourSort::TotalCost,
        TourSort::HotelName,
    ];

    fn label(self) -> &'static str {
        match self {
            TourSort::StartDate => "start date",
            TourSort::EndDate => "end date",
            TourSort::Country => "country",
            TourSort::City => "city",
            TourSort::ActivityName => "activity",
            TourSort::TotalCost => "total cost",
            TourSort::HotelName => "hotel",
        }
    }
}

impl Listable for TourCard {
    type Key = i64;
    type Field = TourSort;

    fn key(&self) -> i64 {
        self.tour_id
    }

    fn sort_key(&self, field: TourSort) -> SortKey {
        match field {
            TourSort::StartDate => date(&self.start_date),
            TourSort::EndDate => date(&self.end_date),
            TourSort::Country => text(&self.country),
            TourSort::City => text(&self.city),
            TourSort::ActivityName => text(&self.activity_name),
            TourSort::TotalCost => SortKey::Number(self.total_cost),
            TourSort::HotelName => text(&self.hotel.hotel_name),
        }
    }
}
