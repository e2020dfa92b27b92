//! Dialog rendering helpers

pub mod common;
pub mod form_dialog;
pub mod scroll_behavior;
pub mod search_dialog;
pub mod system_dialogs;

pub use scroll_behavior::ScrollState;
