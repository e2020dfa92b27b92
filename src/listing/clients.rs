use super::{date, text, Listable, SortField, SortKey};
use crate::models::ClientCard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientSort {
    LastName,
    FirstName,
    PhoneNumber,
    PurchasesCount,
    LastPurchaseNumber,
    LastPurchaseDate,
    LastPurchaseStatus,
}

impl SortField for ClientSort {
    const ALL: &'static [Self] = &[
        ClientSort::LastName,
        ClientSort::FirstName,
        ClientSort::PhoneNumber,
        ClientSort::PurchasesCount,
        ClientSort::LastPurchaseNumber,
        ClientSort::LastPurchaseDate,
        ClientSort::LastPurchaseStatus,
    ];

    fn label(self) -> &'static str {
        match self {
            ClientSort::LastName => "last name",
            ClientSort::FirstName => "first name",
            ClientSort::PhoneNumber => "phone",
            ClientSort::PurchasesCount => "purchases",
            ClientSort::LastPurchaseNumber => "last purchase no.",
            ClientSort::LastPurchaseDate => "last purchase date",
            ClientSort::LastPurchaseStatus => "last purchase status",
        }
    }
}

impl Listable for ClientCard {
    type Key = i64;
    type Field = ClientSort;

    fn key(&self) -> i64 {
        self.client_id
    }

    fn sort_key(&self, field: ClientSort) -> SortKey {
        let last = self.last_purchase();
        match field {
            ClientSort::LastName => text(&self.last_name),
            ClientSort::FirstName => text(&self.first_name),
            ClientSort::PhoneNumber => text(&self.phone_number),
            ClientSort::PurchasesCount => SortKey::Number(self.purchases.len() as f64),
            ClientSort::LastPurchaseNumber => text(last.map(|p| p.purchase_number.as_str()).unwrap_or_default()),
            ClientSort::LastPurchaseDate => date(last.map(|p| p.purchase_date.as_str()).unwrap_or_default()),
            ClientSort::LastPurchaseStatus => text(last.map(|p| p.status.as_str()).unwrap_or_default()),
        }
    }
}
