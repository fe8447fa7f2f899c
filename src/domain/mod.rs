//! Domain aggregates exposed by the dashboard service layer.

pub mod filters;
pub mod section;
pub mod types;
pub mod vehicle;
