//! Role Flavor Plugin
//!
//! Assigns a cluster role to instances, pins members to logical IDs, and
//! renders health verdicts from instance status tags and a network probe.
//!
//! ## Properties
//!
//! ```yaml
//! role: worker
//! logical_ids: ["10.0.0.1", "10.0.0.2", "10.0.0.3"]   # optional
//! health:                                             # optional
//!   endpoint_tag: address        # tag holding "host:port" on the instance
//!   endpoint: "10.0.0.1:2375"    # fallback when the tag is absent
//!   timeout_ms: 1000
//! ```
//!
//! ## Behavior
//!
//! - `validate`: Rejects an empty descriptor, blank roles, duplicate logical
//!   IDs, and logical IDs paired with a size-only allocation
//! - `prepare`: Adds the `role` tag; requires the instance's logical ID to be
//!   one of the configured IDs when any are configured
//! - `healthy`: A failed status tag is `Unhealthy`; otherwise the probe
//!   decides, and any probe failure or missing endpoint is `Unknown`
//! - `drain`: Delegates to the inspector, which treats repeats as success
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod inspector;
pub mod properties;

pub use config::RoleFlavorPluginConfig;
pub use domain::Service as RoleFlavor;
pub use inspector::{Inspection, InspectionError, InstanceInspector, TcpInspector};
pub use properties::{HealthCheckProperties, RoleProperties};

/// Flavor name under which this plugin is conventionally registered.
pub const PLUGIN_NAME: &str = "role";

/// Tag carrying the assigned role on prepared instances.
pub const ROLE_TAG: &str = "role";
