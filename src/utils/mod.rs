//! Utility modules for tourdesk.
//!
//! - [`datetime`] - parsing and formatting of the API's ISO date strings

pub mod datetime;
