//! Terminal user interface.
//!
//! [`run_app`] sets up the terminal and drives [`app_component::AppComponent`],
//! which composes the sidebar, one list per section, the dialog layer and the
//! status bar.

pub mod app_component;
pub mod components;
pub mod core;
pub mod layout;
pub mod renderer;

pub use layout::LayoutManager;
pub use renderer::run_app;
