//! Name-based resolution of flavor plugins.

use std::sync::Arc;

use crate::plugin_api::FlavorPluginClient;

/// Resolves flavor plugins by name.
///
/// Implemented by the gateway's registry. Composite flavors hold a lookup to
/// reach the flavors they delegate to.
pub trait FlavorLookup: Send + Sync {
    /// Returns the plugin registered under `name`, if any.
    fn lookup(&self, name: &str) -> Option<Arc<dyn FlavorPluginClient>>;
}
