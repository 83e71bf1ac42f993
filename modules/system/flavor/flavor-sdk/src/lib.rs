//! Flavor SDK
//!
//! This crate defines the Flavor service provider interface: the boundary
//! across which a group orchestrator lets pluggable policy modules decide
//! what runs on an instance and how to tell whether it is working.
//!
//! - [`FlavorPluginClient`] - Plugin API trait for flavor implementations
//! - [`FlavorGatewayClient`] - Public API trait for callers (group controllers)
//! - [`Health`] - Three-valued health verdict
//! - [`FlavorProperties`] - Opaque, tagged per-flavor configuration
//! - [`AllocationMethod`], [`InstanceSpec`], [`InstanceDescription`] - Values
//!   owned by neighbouring contracts and passed through unchanged
//! - [`FlavorError`] - Error types
//! - [`INTERFACE_SPEC`] - Name and version of this contract revision
//!
//! ## Usage
//!
//! ```ignore
//! use flavor_sdk::{AllocationMethod, FlavorPluginClient, Health};
//!
//! plugin.validate(&props, &allocation).await?;
//! let spec = plugin.prepare(&props, spec, &allocation).await?;
//!
//! // later, once the instance is live
//! if plugin.healthy(&props, &description).await? == Health::Unhealthy {
//!     plugin.drain(&props, &description).await?;
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod health;
pub mod interface;
pub mod lookup;
pub mod models;
pub mod plugin_api;
pub mod properties;

// Re-export main types at crate root
pub use api::FlavorGatewayClient;
pub use error::{FlavorError, FlavorErrorKind};
pub use health::Health;
pub use interface::{INTERFACE_SPEC, InterfaceSpec};
pub use lookup::FlavorLookup;
pub use models::{
    AllocationMethod, Attachment, InstanceDescription, InstanceId, InstanceSpec, LogicalId, Tags,
};
pub use plugin_api::FlavorPluginClient;
pub use properties::FlavorProperties;
