//! Client implementation for the combo flavor plugin.
//!
//! Implements `FlavorPluginClient` by delegating to each child flavor.

use async_trait::async_trait;
use flavor_sdk::{
    AllocationMethod, FlavorError, FlavorPluginClient, FlavorProperties, Health,
    InstanceDescription, InstanceSpec,
};
use tracing::{debug, warn};

use super::service::Service;

#[async_trait]
impl FlavorPluginClient for Service {
    #[tracing::instrument(skip_all)]
    async fn validate(
        &self,
        properties: &FlavorProperties,
        allocation: &AllocationMethod,
    ) -> Result<(), FlavorError> {
        let props = Self::decode(properties)?;
        for child in &props.flavors {
            let Some(plugin) = self.resolve(child)? else {
                return Err(FlavorError::malformed(format!(
                    "child flavor {} is not registered",
                    child.plugin
                )));
            };
            plugin.validate(&child.properties, allocation).await?;
        }
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn prepare(
        &self,
        properties: &FlavorProperties,
        spec: InstanceSpec,
        allocation: &AllocationMethod,
    ) -> Result<InstanceSpec, FlavorError> {
        let props = Self::decode(properties)?;
        let mut spec = spec;
        for child in &props.flavors {
            let Some(plugin) = self.resolve(child)? else {
                return Err(FlavorError::preparation(format!(
                    "child flavor {} is not registered",
                    child.plugin
                )));
            };
            spec = plugin.prepare(&child.properties, spec, allocation).await?;
            debug!(child = %child.plugin, "Child flavor prepared spec");
        }
        Ok(spec)
    }

    #[tracing::instrument(skip_all, fields(instance.id = %instance.id))]
    async fn healthy(
        &self,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<Health, FlavorError> {
        let props = Self::decode(properties)?;
        let mut verdict = Health::Healthy;
        for child in &props.flavors {
            let health = match self.resolve(child)? {
                Some(plugin) => plugin.healthy(&child.properties, instance).await?,
                None => {
                    warn!(child = %child.plugin, "Child flavor is not registered, verdict unknown");
                    Health::Unknown
                }
            };
            verdict = verdict.combine(health);
        }
        Ok(verdict)
    }

    #[tracing::instrument(skip_all, fields(instance.id = %instance.id))]
    async fn drain(
        &self,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<(), FlavorError> {
        let props = Self::decode(properties)?;
        let mut first_failure = None;
        for child in &props.flavors {
            let outcome = match self.resolve(child)? {
                Some(plugin) => plugin.drain(&child.properties, instance).await,
                None => Err(FlavorError::drain(
                    instance.id.clone(),
                    format!("child flavor {} is not registered", child.plugin),
                )),
            };
            if let Err(e) = outcome {
                warn!(child = %child.plugin, error = %e, "Child flavor drain failed");
                first_failure.get_or_insert(e);
            }
        }
        first_failure.map_or(Ok(()), Err)
    }
}
