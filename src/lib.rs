//! Service wiring: configuration loading and the HTTP surface.

pub mod config;
pub mod server;
