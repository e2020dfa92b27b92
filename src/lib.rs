//! tourdesk - a terminal back office for tour agencies
//!
//! Role-gated screens for clients, purchases, insurance records, tour offers
//! and booked tours, backed by the agency's HTTP API.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`session`] - Roles, sections and the saved user session
//! * [`api`] - The agency API seam and its HTTP implementation
//! * [`listing`] - Sorting, paging and selection of the entity lists
//! * [`forms`] - Create, edit and filter forms
//! * [`ui`] - Terminal user interface components and rendering
//! * [`utils`] - Utility functions and helpers

/// Agency API client, queries and request dispatch
pub mod api;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Modal forms and their input widgets
pub mod forms;

/// List state shared by every screen
pub mod listing;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Data transfer objects exchanged with the API
pub mod models;

/// Roles, access rules and session persistence
pub mod session;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling and other helpers
pub mod utils;
