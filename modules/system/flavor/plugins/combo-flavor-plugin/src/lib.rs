//! Combo Flavor Plugin
//!
//! Composes flavors registered elsewhere into a single flavor. Children are
//! resolved by name through a [`flavor_sdk::FlavorLookup`].
//!
//! ## Properties
//!
//! ```yaml
//! flavors:
//!   - plugin: vanilla
//!     properties:
//!       payload: { tags: { tier: web } }
//!   - plugin: role
//!     properties:
//!       payload: { role: worker }
//! ```
//!
//! ## Behavior
//!
//! - `validate`: Every child must resolve and validate
//! - `prepare`: Feeds the instance spec through each child in order
//! - `healthy`: Worst verdict across children
//! - `drain`: Drains every child, then reports the first failure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod domain;
pub mod properties;

pub use domain::Service as ComboFlavor;
pub use properties::{ComboProperties, FlavorRef};

/// Flavor name under which this plugin is conventionally registered.
pub const PLUGIN_NAME: &str = "combo";
