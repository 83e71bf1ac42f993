//! Domain layer for the role flavor plugin.

pub mod client;
pub mod service;

pub use service::Service;
