//! Domain layer for the vanilla flavor plugin.

pub mod client;
pub mod service;

pub use service::Service;
