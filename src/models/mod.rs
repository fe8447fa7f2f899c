//! Backend wire models and server configuration.

pub mod config;
pub mod vehicle;
