//! Domain layer for the flavor gateway.

pub mod error;
pub mod local_client;
pub mod service;

pub use error::DomainError;
pub use local_client::FlavorGwLocalClient;
pub use service::Service;
