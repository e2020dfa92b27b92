//! Core UI building blocks.
//!
//! Components implement [`Component`] and talk to each other through
//! [`Action`]s. Network calls run on the [`TaskManager`], which posts its
//! results back as actions; the [`EventHandler`] interleaves terminal input
//! with ticks so those results are picked up promptly.

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, DialogType, ListPayload, ListRequest};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};
