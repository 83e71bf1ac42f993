//! Flavor Gateway
//!
//! Holds the registry of flavor plugins known to this process and routes
//! group controller calls to them by flavor name.
//!
//! The gateway provides the `FlavorGatewayClient` trait for consumption by
//! group controllers, and enforces the caller-side rules of the contract:
//! every call is bounded by a configured ceiling, a `healthy` call that
//! exceeds it reports `Unknown`, and drain failures are non-fatal.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;
pub mod registry;

pub use config::FlavorGwConfig;
pub use domain::{DomainError, FlavorGwLocalClient, Service};
pub use module::FlavorGateway;
pub use registry::FlavorRegistry;
