use crate::api::{ClientQuery, LookupData, OfferQuery, Submission, SubmissionOutcome, TourFilter};
use crate::forms::{FormKind, Lookup, LookupTicket};
use crate::models::{ClientCard, TourCard, TourOffer};
use crate::session::Section;

/// What a list load asks the server for
#[derive(Debug, Clone, PartialEq)]
pub enum ListRequest {
    Clients(ClientQuery),
    Offers(OfferQuery),
    Tours(String),
    ToursFiltered(TourFilter),
}

/// Items returned by a list load
#[derive(Debug, Clone, PartialEq)]
pub enum ListPayload {
    Clients(Vec<ClientCard>),
    Offers(Vec<TourOffer>),
    Tours(Vec<TourCard>),
}

impl ListPayload {
    pub fn len(&self) -> usize {
        match self {
            ListPayload::Clients(items) => items.len(),
            ListPayload::Offers(items) => items.len(),
            ListPayload::Tours(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateToSection(Section),

    // Active list
    NextItem,
    PreviousItem,
    NextPage,
    PreviousPage,
    ToggleExpand,
    CycleSortField,
    ToggleSortOrder,
    ReloadList,
    OpenFilters,
    SearchChanged {
        section: Section,
        term: String,
    },
    ListLoaded {
        section: Section,
        generation: u64,
        result: Result<ListPayload, String>,
    },

    // Forms
    /// Lookups for the form opened as `form` by the dialog
    RunLookups {
        form: u64,
        lookups: Vec<Lookup>,
    },
    LookupLoaded {
        form: u64,
        ticket: LookupTicket,
        result: Result<LookupData, String>,
    },
    Submit {
        id: u64,
        submission: Submission,
    },
    SubmissionCompleted {
        id: u64,
        outcome: SubmissionOutcome,
    },
    SubmissionFailed {
        id: u64,
        message: String,
    },

    // UI operations
    ShowDialog(DialogType),
    HideDialog,

    // App control
    Logout,
    Quit,
    None,
}

#[derive(Debug, Clone)]
pub enum DialogType {
    Form(FormKind),
    Search { section: Section, term: String },
    Error(String),
    Info(String),
    Help,
    Logs,
}
