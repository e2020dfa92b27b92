//! Insurance records, read off the purchases of each client.

use super::{text, Listable, SortField, SortKey};
use crate::models::ClientCard;

/// One insured purchase
#[derive(Debug, Clone, PartialEq)]
pub struct InsuranceRecord {
    pub client_id: i64,
    pub client_name: String,
    pub tour_purchase_id: i64,
    pub purchase_number: String,
    pub insurance_id: i64,
    pub insurance_type: String,
    pub company: String,
    pub payment_amount: f64,
    pub coverage_amount: f64,
    pub covered_risks: Vec<String>,
    pub country: String,
    pub city: String,
    pub start_date: String,
    pub end_date: String,
}

impl InsuranceRecord {
    /// Records for every insured purchase, in client then purchase order
    pub fn from_clients(clients: &[ClientCard]) -> Vec<InsuranceRecord> {
        clients
            .iter()
            .flat_map(|client| {
                client
                    .purchases
                    .iter()
                    .filter(|purchase| purchase.has_insurance())
                    .map(move |purchase| InsuranceRecord {
                        client_id: client.client_id,
                        client_name: client.display_name(),
                        tour_purchase_id: purchase.tour_purchase_id,
                        purchase_number: purchase.purchase_number.clone(),
                        insurance_id: purchase.insurance_id,
                        insurance_type: purchase.insurance_type.clone(),
                        company: purchase.insurance_company_name.clone(),
                        payment_amount: purchase.payment_amount,
                        coverage_amount: purchase.coverage_amount,
                        covered_risks: purchase.covered_risks.clone(),
                        country: purchase.country.clone(),
                        city: purchase.city.clone(),
                        start_date: purchase.start_date.clone(),
                        end_date: purchase.end_date.clone(),
                    })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsuranceSort {
    Client,
    InsuranceType,
    Company,
    Payment,
    Coverage,
}

impl SortField for InsuranceSort {
    const ALL: &'static [Self] = &[
        InsuranceSort::Client,
        InsuranceSort::InsuranceType,
        InsuranceSort::Company,
        InsuranceSort::Payment,
        InsuranceSort::Coverage,
    ];

    fn label(self) -> &'static str {
        match self {
            InsuranceSort::Client => "client",
            InsuranceSort::InsuranceType => "type",
            InsuranceSort::Company => "company",
            InsuranceSort::Payment => "payment",
            InsuranceSort::Coverage => "coverage",
        }
    }
}

impl Listable for InsuranceRecord {
    type Key = (i64, i64);
    type Field = InsuranceSort;

    fn key(&self) -> (i64, i64) {
        (self.client_id, self.tour_purchase_id)
    }

    fn sort_key(&self, field: InsuranceSort) -> SortKey {
        match field {
            InsuranceSort::Client => text(&self.client_name),
            InsuranceSort::InsuranceType => text(&self.insurance_type),
            InsuranceSort::Company => text(&self.company),
            InsuranceSort::Payment => SortKey::Number(self.payment_amount),
            InsuranceSort::Coverage => SortKey::Number(self.coverage_amount),
        }
    }
}
