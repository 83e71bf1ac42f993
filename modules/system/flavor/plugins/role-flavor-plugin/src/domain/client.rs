//! Client implementation for the role flavor plugin.
//!
//! Implements `FlavorPluginClient` using the domain service.

use async_trait::async_trait;
use flavor_sdk::{
    AllocationMethod, FlavorError, FlavorPluginClient, FlavorProperties, Health,
    InstanceDescription, InstanceSpec,
};
use tracing::{debug, warn};

use super::service::Service;

#[async_trait]
impl FlavorPluginClient for Service {
    #[tracing::instrument(skip_all, fields(allocation.size = allocation.size))]
    async fn validate(
        &self,
        properties: &FlavorProperties,
        allocation: &AllocationMethod,
    ) -> Result<(), FlavorError> {
        let props = Self::decode(properties)?;
        Self::check_allocation(&props, allocation)
    }

    #[tracing::instrument(skip_all, fields(logical_id = ?spec.logical_id))]
    async fn prepare(
        &self,
        properties: &FlavorProperties,
        spec: InstanceSpec,
        allocation: &AllocationMethod,
    ) -> Result<InstanceSpec, FlavorError> {
        let props = Self::decode(properties)?;
        Self::check_allocation(&props, allocation)?;
        let spec = Self::assign(&props, spec)?;
        debug!(role = ?props.role, "Prepared instance spec");
        Ok(spec)
    }

    #[tracing::instrument(skip_all, fields(instance.id = %instance.id))]
    async fn healthy(
        &self,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<Health, FlavorError> {
        let props = Self::decode(properties)?;
        Ok(self.inspect(&props, instance).await)
    }

    #[tracing::instrument(skip_all, fields(instance.id = %instance.id))]
    async fn drain(
        &self,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<(), FlavorError> {
        Self::decode(properties)?;

        let timeout = self.cfg.drain_timeout();
        match tokio::time::timeout(timeout, self.inspector.drain(instance)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                warn!(error = %e, "Drain failed");
                Err(FlavorError::drain(instance.id.clone(), e.to_string()))
            }
            Err(_) => Err(FlavorError::drain(
                instance.id.clone(),
                format!("drain did not finish within {}ms", self.cfg.drain_timeout_ms),
            )),
        }
    }
}
