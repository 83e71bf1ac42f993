//! Domain layer for the combo flavor plugin.

pub mod client;
pub mod service;

pub use service::Service;
