//! In-process registry of flavor plugins.
//!
//! Design goals:
//! - Plugins are registered once under a flavor name, with the interface
//!   revision they implement.
//! - Callers resolve plugins by name without knowing their concrete type.
//! - Plugins built for another contract revision are rejected at
//!   registration, before any call reaches them.
//!
//! Notes:
//! - Re-registering a name overwrites the previous plugin; `Arc`s already
//!   handed out remain valid.
//! - The registry is read-mostly: lookups take a shared lock and never await.

use std::collections::HashMap;
use std::sync::Arc;

use flavor_sdk::{FlavorLookup, FlavorPluginClient, INTERFACE_SPEC, InterfaceSpec};
use parking_lot::RwLock;
use tracing::info;

use crate::domain::DomainError;

type PluginMap = HashMap<String, Arc<dyn FlavorPluginClient>>;

/// Registry of flavor plugins keyed by flavor name.
#[derive(Default)]
pub struct FlavorRegistry {
    plugins: RwLock<PluginMap>,
}

impl FlavorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `plugin` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `InterfaceMismatch` if `implements` is not the current
    /// Flavor interface revision.
    pub fn register(
        &self,
        name: impl Into<String>,
        implements: &InterfaceSpec,
        plugin: Arc<dyn FlavorPluginClient>,
    ) -> Result<(), DomainError> {
        let name = name.into();
        if !INTERFACE_SPEC.is_compatible_with(implements) {
            return Err(DomainError::InterfaceMismatch {
                name,
                expected: INTERFACE_SPEC.to_string(),
                actual: implements.to_string(),
            });
        }

        info!(flavor = %name, interface = %implements, "Registered flavor plugin");
        self.plugins.write().insert(name, plugin);
        Ok(())
    }

    /// Fetches the plugin registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `PluginNotFound` if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn FlavorPluginClient>, DomainError> {
        self.lookup(name)
            .ok_or_else(|| DomainError::PluginNotFound {
                name: name.to_owned(),
            })
    }

    /// Removes a plugin; returns it if it was present.
    pub fn remove(&self, name: &str) -> Option<Arc<dyn FlavorPluginClient>> {
        self.plugins.write().remove(name)
    }

    /// Registered flavor names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.plugins.read().keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.read().is_empty()
    }
}

impl FlavorLookup for FlavorRegistry {
    fn lookup(&self, name: &str) -> Option<Arc<dyn FlavorPluginClient>> {
        self.plugins.read().get(name).cloned()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flavor_sdk::{
        AllocationMethod, FlavorError, FlavorProperties, Health, InstanceDescription,
        InstanceSpec,
    };

    struct FixedHealth(Health);

    #[async_trait]
    impl FlavorPluginClient for FixedHealth {
        async fn validate(
            &self,
            _properties: &FlavorProperties,
            _allocation: &AllocationMethod,
        ) -> Result<(), FlavorError> {
            Ok(())
        }

        async fn prepare(
            &self,
            _properties: &FlavorProperties,
            spec: InstanceSpec,
            _allocation: &AllocationMethod,
        ) -> Result<InstanceSpec, FlavorError> {
            Ok(spec)
        }

        async fn healthy(
            &self,
            _properties: &FlavorProperties,
            _instance: &InstanceDescription,
        ) -> Result<Health, FlavorError> {
            Ok(self.0)
        }

        async fn drain(
            &self,
            _properties: &FlavorProperties,
            _instance: &InstanceDescription,
        ) -> Result<(), FlavorError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn register_and_get_by_name() {
        let registry = FlavorRegistry::new();
        registry
            .register("a", &INTERFACE_SPEC, Arc::new(FixedHealth(Health::Healthy)))
            .unwrap();

        let plugin = registry.get("a").unwrap();
        let health = plugin
            .healthy(&FlavorProperties::default(), &InstanceDescription::new("i-1"))
            .await
            .unwrap();
        assert_eq!(health, Health::Healthy);
        assert_eq!(registry.names(), vec!["a".to_owned()]);
    }

    #[test]
    fn mismatched_interface_is_rejected() {
        let registry = FlavorRegistry::new();
        let result = registry.register(
            "old",
            &InterfaceSpec::new("Flavor", "0.0.9"),
            Arc::new(FixedHealth(Health::Healthy)),
        );

        match result {
            Err(DomainError::InterfaceMismatch {
                name,
                expected,
                actual,
            }) => {
                assert_eq!(name, "old");
                assert_eq!(expected, "Flavor/0.1.0");
                assert_eq!(actual, "Flavor/0.0.9");
            }
            other => panic!("expected InterfaceMismatch, got {other:?}"),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn unknown_name_is_plugin_not_found() {
        let registry = FlavorRegistry::new();
        assert!(matches!(
            registry.get("missing"),
            Err(DomainError::PluginNotFound { name }) if name == "missing"
        ));
    }

    #[tokio::test]
    async fn re_registering_overwrites_but_keeps_old_arcs_valid() {
        let registry = FlavorRegistry::new();
        registry
            .register("a", &INTERFACE_SPEC, Arc::new(FixedHealth(Health::Healthy)))
            .unwrap();
        let old = registry.get("a").unwrap();

        registry
            .register("a", &INTERFACE_SPEC, Arc::new(FixedHealth(Health::Unhealthy)))
            .unwrap();
        let new = registry.get("a").unwrap();

        let props = FlavorProperties::default();
        let desc = InstanceDescription::new("i-1");
        assert_eq!(old.healthy(&props, &desc).await.unwrap(), Health::Healthy);
        assert_eq!(new.healthy(&props, &desc).await.unwrap(), Health::Unhealthy);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_makes_plugin_unavailable() {
        let registry = FlavorRegistry::new();
        registry
            .register("a", &INTERFACE_SPEC, Arc::new(FixedHealth(Health::Unknown)))
            .unwrap();

        assert!(registry.remove("a").is_some());
        assert!(registry.lookup("a").is_none());
        assert!(registry.remove("a").is_none());
    }
}
