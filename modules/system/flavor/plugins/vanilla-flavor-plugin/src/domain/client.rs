//! Client implementation for the vanilla flavor plugin.
//!
//! Implements `FlavorPluginClient` using the domain service.

use async_trait::async_trait;
use flavor_sdk::{
    AllocationMethod, FlavorError, FlavorPluginClient, FlavorProperties, Health,
    InstanceDescription, InstanceSpec,
};

use super::service::Service;

#[async_trait]
impl FlavorPluginClient for Service {
    async fn validate(
        &self,
        properties: &FlavorProperties,
        _allocation: &AllocationMethod,
    ) -> Result<(), FlavorError> {
        Self::decode(properties).map(|_| ())
    }

    async fn prepare(
        &self,
        properties: &FlavorProperties,
        spec: InstanceSpec,
        _allocation: &AllocationMethod,
    ) -> Result<InstanceSpec, FlavorError> {
        let props = Self::decode(properties)?;
        Ok(Self::decorate(&props, spec))
    }

    async fn healthy(
        &self,
        properties: &FlavorProperties,
        _instance: &InstanceDescription,
    ) -> Result<Health, FlavorError> {
        Self::decode(properties)?;
        Ok(Health::Healthy)
    }

    async fn drain(
        &self,
        _properties: &FlavorProperties,
        _instance: &InstanceDescription,
    ) -> Result<(), FlavorError> {
        Ok(())
    }
}
