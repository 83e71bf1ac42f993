//! Domain service for the flavor gateway.
//!
//! Resolves the plugin for a flavor name and applies the caller-side rules
//! of the contract around each call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use flavor_sdk::{
    AllocationMethod, FlavorError, FlavorProperties, Health, InstanceDescription, InstanceSpec,
};
use tracing::{debug, warn};

use super::error::DomainError;
use crate::config::FlavorGwConfig;
use crate::registry::FlavorRegistry;

/// Flavor gateway service.
pub struct Service {
    registry: Arc<FlavorRegistry>,
    cfg: FlavorGwConfig,
}

impl Service {
    #[must_use]
    pub fn new(registry: Arc<FlavorRegistry>, cfg: FlavorGwConfig) -> Self {
        Self { registry, cfg }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<FlavorRegistry> {
        &self.registry
    }

    /// Validates properties against an allocation.
    ///
    /// # Errors
    ///
    /// - `PluginNotFound` if `flavor` is not registered
    /// - `Timeout` if the plugin exceeds the call ceiling
    /// - `Plugin` for errors returned by the plugin
    #[tracing::instrument(skip_all, fields(flavor = %flavor))]
    pub async fn validate(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        allocation: &AllocationMethod,
    ) -> Result<(), DomainError> {
        let plugin = self.registry.get(flavor)?;
        bounded(
            flavor,
            "validate",
            self.cfg.call_timeout(),
            plugin.validate(properties, allocation),
        )
        .await
    }

    /// Prepares an instance spec.
    ///
    /// # Errors
    ///
    /// - `PluginNotFound` if `flavor` is not registered
    /// - `Timeout` if the plugin exceeds the call ceiling
    /// - `Plugin` for errors returned by the plugin
    #[tracing::instrument(skip_all, fields(flavor = %flavor))]
    pub async fn prepare(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        spec: InstanceSpec,
        allocation: &AllocationMethod,
    ) -> Result<InstanceSpec, DomainError> {
        let plugin = self.registry.get(flavor)?;
        bounded(
            flavor,
            "prepare",
            self.cfg.call_timeout(),
            plugin.prepare(properties, spec, allocation),
        )
        .await
    }

    /// Queries instance health.
    ///
    /// A plugin that exceeds the health ceiling is treated as a transient
    /// inspection failure and yields `Unknown`.
    ///
    /// # Errors
    ///
    /// - `PluginNotFound` if `flavor` is not registered
    /// - `Plugin` for contract-level errors returned by the plugin
    #[tracing::instrument(skip_all, fields(flavor = %flavor, instance.id = %instance.id))]
    pub async fn healthy(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<Health, DomainError> {
        let plugin = self.registry.get(flavor)?;
        match bounded(
            flavor,
            "healthy",
            self.cfg.healthy_timeout(),
            plugin.healthy(properties, instance),
        )
        .await
        {
            Ok(health) => {
                debug!(health = %health, "Flavor health verdict");
                Ok(health)
            }
            Err(DomainError::Timeout { timeout_ms, .. }) => {
                warn!(timeout_ms, "Health check timed out, reporting unknown");
                Ok(Health::Unknown)
            }
            Err(e) => Err(e),
        }
    }

    /// Drains an instance before destruction.
    ///
    /// # Errors
    ///
    /// - `PluginNotFound` if `flavor` is not registered
    /// - `DrainTimeout` if the plugin exceeds the drain ceiling
    /// - `Plugin` carrying the plugin's drain failure
    #[tracing::instrument(skip_all, fields(flavor = %flavor, instance.id = %instance.id))]
    pub async fn drain(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<(), DomainError> {
        let plugin = self.registry.get(flavor)?;
        let result = bounded(
            flavor,
            "drain",
            self.cfg.drain_timeout(),
            plugin.drain(properties, instance),
        )
        .await;

        match result {
            Ok(()) => Ok(()),
            Err(DomainError::Timeout { timeout_ms, .. }) => {
                warn!(timeout_ms, "Drain timed out");
                Err(DomainError::DrainTimeout {
                    instance: instance.id.clone(),
                    timeout_ms,
                })
            }
            Err(e) => {
                warn!(error = %e, "Drain could not be confirmed");
                Err(e)
            }
        }
    }
}

/// Runs a plugin call under `ceiling`.
async fn bounded<T>(
    flavor: &str,
    operation: &'static str,
    ceiling: Duration,
    call: impl Future<Output = Result<T, FlavorError>>,
) -> Result<T, DomainError> {
    match tokio::time::timeout(ceiling, call).await {
        Ok(result) => result.map_err(DomainError::from),
        Err(_) => Err(DomainError::Timeout {
            name: flavor.to_owned(),
            operation,
            timeout_ms: u64::try_from(ceiling.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use flavor_sdk::{FlavorErrorKind, FlavorPluginClient, INTERFACE_SPEC, InstanceId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Plugin whose calls never finish within the test ceilings.
    struct Stalled;

    #[async_trait]
    impl FlavorPluginClient for Stalled {
        async fn validate(
            &self,
            _properties: &FlavorProperties,
            _allocation: &AllocationMethod,
        ) -> Result<(), FlavorError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }

        async fn prepare(
            &self,
            _properties: &FlavorProperties,
            spec: InstanceSpec,
            _allocation: &AllocationMethod,
        ) -> Result<InstanceSpec, FlavorError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(spec)
        }

        async fn healthy(
            &self,
            _properties: &FlavorProperties,
            _instance: &InstanceDescription,
        ) -> Result<Health, FlavorError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Health::Healthy)
        }

        async fn drain(
            &self,
            _properties: &FlavorProperties,
            _instance: &InstanceDescription,
        ) -> Result<(), FlavorError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }
    }

    /// Plugin that fails drain and reports a fixed verdict.
    struct Faulty {
        drains: AtomicUsize,
    }

    #[async_trait]
    impl FlavorPluginClient for Faulty {
        async fn validate(
            &self,
            _properties: &FlavorProperties,
            _allocation: &AllocationMethod,
        ) -> Result<(), FlavorError> {
            Err(FlavorError::malformed("flavor descriptor is empty"))
        }

        async fn prepare(
            &self,
            _properties: &FlavorProperties,
            _spec: InstanceSpec,
            _allocation: &AllocationMethod,
        ) -> Result<InstanceSpec, FlavorError> {
            Err(FlavorError::preparation("image missing"))
        }

        async fn healthy(
            &self,
            _properties: &FlavorProperties,
            _instance: &InstanceDescription,
        ) -> Result<Health, FlavorError> {
            Err(FlavorError::contract_violation("health code 7"))
        }

        async fn drain(
            &self,
            _properties: &FlavorProperties,
            instance: &InstanceDescription,
        ) -> Result<(), FlavorError> {
            self.drains.fetch_add(1, Ordering::SeqCst);
            Err(FlavorError::drain(instance.id.clone(), "lb unreachable"))
        }
    }

    fn short_ceilings() -> FlavorGwConfig {
        FlavorGwConfig {
            call_timeout_ms: 20,
            healthy_timeout_ms: 20,
            drain_timeout_ms: 20,
        }
    }

    fn service_with(name: &str, plugin: Arc<dyn FlavorPluginClient>) -> Service {
        let registry = Arc::new(FlavorRegistry::new());
        registry.register(name, &INTERFACE_SPEC, plugin).unwrap();
        Service::new(registry, short_ceilings())
    }

    #[tokio::test]
    async fn unknown_flavor_is_plugin_not_found() {
        let svc = Service::new(Arc::new(FlavorRegistry::new()), short_ceilings());
        let result = svc
            .validate("nope", &FlavorProperties::default(), &AllocationMethod::size(1))
            .await;
        assert!(matches!(result, Err(DomainError::PluginNotFound { .. })));
    }

    #[tokio::test]
    async fn slow_healthy_reports_unknown() {
        let svc = service_with("slow", Arc::new(Stalled));
        let health = svc
            .healthy("slow", &FlavorProperties::default(), &InstanceDescription::new("i-42"))
            .await
            .unwrap();
        assert_eq!(health, Health::Unknown);
    }

    #[tokio::test]
    async fn slow_validate_and_prepare_time_out() {
        let svc = service_with("slow", Arc::new(Stalled));
        let props = FlavorProperties::default();
        let alloc = AllocationMethod::size(1);

        let err = svc.validate("slow", &props, &alloc).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Timeout { operation: "validate", timeout_ms: 20, .. }
        ));

        let err = svc
            .prepare("slow", &props, InstanceSpec::default(), &alloc)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Timeout { operation: "prepare", .. }));
    }

    #[tokio::test]
    async fn slow_drain_is_a_drain_timeout() {
        let svc = service_with("slow", Arc::new(Stalled));
        let err = svc
            .drain("slow", &FlavorProperties::default(), &InstanceDescription::new("i-42"))
            .await
            .unwrap_err();

        match err {
            DomainError::DrainTimeout { instance, .. } => {
                assert_eq!(instance, InstanceId::from("i-42"));
            }
            other => panic!("expected DrainTimeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn plugin_errors_are_surfaced() {
        let faulty = Arc::new(Faulty {
            drains: AtomicUsize::new(0),
        });
        let svc = service_with("faulty", faulty.clone());
        let props = FlavorProperties::default();
        let desc = InstanceDescription::new("i-42");

        let err: FlavorError = svc
            .validate("faulty", &props, &AllocationMethod::size(3))
            .await
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), FlavorErrorKind::MalformedProperties);

        let err: FlavorError = svc.healthy("faulty", &props, &desc).await.unwrap_err().into();
        assert!(err.is_fatal());

        let err: FlavorError = svc.drain("faulty", &props, &desc).await.unwrap_err().into();
        assert_eq!(err.kind(), FlavorErrorKind::DrainFailure);
        assert_eq!(faulty.drains.load(Ordering::SeqCst), 1);
    }
}
