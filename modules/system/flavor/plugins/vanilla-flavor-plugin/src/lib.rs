//! Vanilla Flavor Plugin
//!
//! Decorates instances with operator-supplied tags, init lines, and
//! attachments. Performs no inspection.
//!
//! ## Properties
//!
//! ```yaml
//! init:
//!   - "apt-get install -y nginx"
//!   - "systemctl start nginx"
//! tags:
//!   tier: web
//! attachments:
//!   - id: vol-1
//!     type: volume
//! ```
//!
//! ## Behavior
//!
//! - `validate`: Properties must decode; any allocation is accepted
//! - `prepare`: Appends init lines after the existing init, merges tags
//!   (flavor values win), appends attachments not already present
//! - `healthy`: Always `Healthy`
//! - `drain`: No-op
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod domain;
pub mod properties;

pub use domain::Service as VanillaFlavor;
pub use properties::VanillaProperties;

/// Flavor name under which this plugin is conventionally registered.
pub const PLUGIN_NAME: &str = "vanilla";
