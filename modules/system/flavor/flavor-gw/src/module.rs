//! Flavor gateway wiring.

use std::sync::Arc;

use flavor_sdk::{FlavorGatewayClient, FlavorLookup, FlavorPluginClient, InterfaceSpec};
use tracing::info;

use crate::config::FlavorGwConfig;
use crate::domain::{DomainError, FlavorGwLocalClient, Service};
use crate::registry::FlavorRegistry;

/// Flavor gateway.
///
/// Owns the plugin registry and the service, and hands out the
/// `FlavorGatewayClient` consumed by group controllers.
pub struct FlavorGateway {
    registry: Arc<FlavorRegistry>,
    client: Arc<dyn FlavorGatewayClient>,
}

impl FlavorGateway {
    #[tracing::instrument(skip_all)]
    #[must_use]
    pub fn init(cfg: FlavorGwConfig) -> Self {
        info!(
            call_timeout_ms = cfg.call_timeout_ms,
            healthy_timeout_ms = cfg.healthy_timeout_ms,
            drain_timeout_ms = cfg.drain_timeout_ms,
            "Initializing flavor gateway"
        );

        let registry = Arc::new(FlavorRegistry::new());
        let svc = Arc::new(Service::new(registry.clone(), cfg));
        let client: Arc<dyn FlavorGatewayClient> = Arc::new(FlavorGwLocalClient::new(svc));

        Self { registry, client }
    }

    /// Registers a plugin under `name`.
    ///
    /// # Errors
    ///
    /// Returns `InterfaceMismatch` if the plugin implements another revision.
    pub fn register(
        &self,
        name: impl Into<String>,
        implements: &InterfaceSpec,
        plugin: Arc<dyn FlavorPluginClient>,
    ) -> Result<(), DomainError> {
        self.registry.register(name, implements, plugin)
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<FlavorRegistry> {
        &self.registry
    }

    /// A weak lookup handle for composite flavors registered in this gateway.
    ///
    /// Weak so that a composite flavor held by the registry does not keep the
    /// registry alive.
    #[must_use]
    pub fn lookup(&self) -> std::sync::Weak<dyn FlavorLookup> {
        let registry: Arc<dyn FlavorLookup> = self.registry.clone();
        Arc::downgrade(&registry)
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn FlavorGatewayClient> {
        self.client.clone()
    }
}
