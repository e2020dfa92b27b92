//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Remote API
pub const DEFAULT_API_BASE_URL: &str = "https://localhost:7181/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 15;
/// Employee id attached to newly created tours
pub const DEFAULT_EMPLOYEE_ID: i64 = 1;

// Success Messages
pub const SUCCESS_CLIENT_CREATED: &str = "✅ Client created";
pub const SUCCESS_CLIENT_UPDATED: &str = "✅ Client updated";
pub const SUCCESS_PURCHASE_ADDED: &str = "✅ Purchase added";
pub const SUCCESS_OFFER_CREATED: &str = "✅ Offer created";
pub const SUCCESS_OFFER_UPDATED: &str = "✅ Offer updated";
pub const SUCCESS_TOUR_CREATED: &str = "✅ Tour created";
pub const SUCCESS_TOUR_UPDATED: &str = "✅ Tour updated";
pub const SUCCESS_FILTER_APPLIED: &str = "✅ Filters applied";

// Error Messages
pub const ERROR_CLIENT_CREATE_FAILED: &str = "❌ Failed to create client";
pub const ERROR_CLIENT_SAVE_FAILED: &str = "❌ Failed to save client";
pub const ERROR_PURCHASE_ADD_FAILED: &str = "❌ Failed to add purchase";
pub const ERROR_OFFER_CREATE_FAILED: &str = "❌ Failed to create offer";
pub const ERROR_OFFER_SAVE_FAILED: &str = "❌ Failed to save offer";
pub const ERROR_TOUR_CREATE_FAILED: &str = "❌ Failed to create tour";
pub const ERROR_TOUR_SAVE_FAILED: &str = "❌ Failed to save tour";
pub const ERROR_FILTER_FAILED: &str = "❌ Failed to apply filters";
pub const ERROR_SECTION_FORBIDDEN: &str = "❌ This section is not available for your role";

// Validation Error Messages
pub const ERROR_FILL_ALL_FIELDS: &str = "Please fill in all fields.";
pub const ERROR_INVALID_START_DATE: &str = "Start date must be in YYYY-MM-DD format.";
pub const ERROR_CLIENT_NAME_REQUIRED: &str = "Last name and first name are required.";
pub const ERROR_OFFER_FIELDS_REQUIRED: &str = "Country and city are required.";

// Info Messages
pub const INFO_INSURANCE_READ_ONLY: &str =
    "Insurance records are created together with client purchases.\nAsk a client manager to add or change them.";
pub const INFO_NO_FILTERS: &str = "This section has no filters.";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_NO_SESSION: &str = "❌ Error: no saved session found";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - Press 'Esc', 'G' or 'q' to close";
pub const SELECT_PLACEHOLDER: &str = "–";

// Listing
/// Number of cards shown per page
pub const DEFAULT_PAGE_SIZE: usize = 15;

// UI Layout Constants
/// Minimum sidebar width in columns
pub const SIDEBAR_MIN_WIDTH: u16 = 15;
/// Maximum sidebar width in columns
pub const SIDEBAR_MAX_WIDTH: u16 = 50;
/// Default sidebar width in columns
pub const SIDEBAR_DEFAULT_WIDTH: u16 = 26;
/// Minimum main area width to preserve usability
pub const MAIN_AREA_MIN_WIDTH: u16 = 20;
