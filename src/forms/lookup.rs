//! Tickets that let forms drop classifier responses which arrive late.
//!
//! Every dependent fetch is issued for a slot (the select it fills). Issuing
//! again for the same slot, or invalidating it because a parent selection
//! changed, makes every earlier ticket for that slot stale.

use crate::api::LookupRequest;
use std::collections::HashMap;

/// The select a lookup fills
///
/// Per-row slots carry the row id of a transport booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupSlot {
    Countries,
    Cities,
    Activities,
    ActivityCost,
    Durations,
    BaseTours,
    BaseTour,
    Hotels,
    PurchaseStatuses,
    InsuranceTypes,
    InsuranceCompanies,
    DepartureCities(u64),
    ArrivalCities(u64),
    DeparturePoints(u64),
    ArrivalPoints(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    pub slot: LookupSlot,
    pub generation: u64,
}

/// A request to run, stamped with its ticket
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub ticket: LookupTicket,
    pub request: LookupRequest,
}

#[derive(Debug, Clone, Default)]
pub struct LookupTracker {
    latest: HashMap<LookupSlot, u64>,
    counter: u64,
}

impl LookupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a request; earlier tickets for the slot become stale
    pub fn issue(&mut self, slot: LookupSlot, request: LookupRequest) -> Lookup {
        self.counter += 1;
        self.latest.insert(slot, self.counter);
        Lookup {
            ticket: LookupTicket {
                slot,
                generation: self.counter,
            },
            request,
        }
    }

    /// Make every outstanding ticket for the slot stale
    pub fn invalidate(&mut self, slot: LookupSlot) {
        self.counter += 1;
        self.latest.insert(slot, self.counter);
    }

    /// Whether a response for this ticket should be applied
    pub fn accept(&self, ticket: &LookupTicket) -> bool {
        let current = self.latest.get(&ticket.slot) == Some(&ticket.generation);
        if !current {
            log::debug!("Dropping stale lookup for {:?}", ticket.slot);
        }
        current
    }
}
