#[path = "utils/datetime.rs"]
mod datetime;
