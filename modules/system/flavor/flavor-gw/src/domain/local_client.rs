//! Local (in-process) client for the flavor gateway.

use std::sync::Arc;

use async_trait::async_trait;
use flavor_sdk::{
    AllocationMethod, FlavorError, FlavorGatewayClient, FlavorProperties, Health,
    InstanceDescription, InstanceSpec,
};

use super::{DomainError, Service};

/// Local client wrapping the gateway service.
///
/// Handed to group controllers by [`crate::FlavorGateway::client`].
pub struct FlavorGwLocalClient {
    svc: Arc<Service>,
}

impl FlavorGwLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, flavor: &str, e: DomainError) -> FlavorError {
    let err: FlavorError = e.into();
    if err.is_fatal() {
        tracing::error!(
            operation = op,
            flavor,
            error = %err,
            "flavor plugin violated the contract"
        );
    } else {
        tracing::warn!(operation = op, flavor, error = %err, "flavor call failed");
    }
    err
}

#[async_trait]
impl FlavorGatewayClient for FlavorGwLocalClient {
    async fn validate(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        allocation: &AllocationMethod,
    ) -> Result<(), FlavorError> {
        self.svc
            .validate(flavor, properties, allocation)
            .await
            .map_err(|e| log_and_convert("validate", flavor, e))
    }

    async fn prepare(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        spec: InstanceSpec,
        allocation: &AllocationMethod,
    ) -> Result<InstanceSpec, FlavorError> {
        self.svc
            .prepare(flavor, properties, spec, allocation)
            .await
            .map_err(|e| log_and_convert("prepare", flavor, e))
    }

    async fn healthy(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<Health, FlavorError> {
        self.svc
            .healthy(flavor, properties, instance)
            .await
            .map_err(|e| log_and_convert("healthy", flavor, e))
    }

    async fn drain(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<(), FlavorError> {
        self.svc
            .drain(flavor, properties, instance)
            .await
            .map_err(|e| log_and_convert("drain", flavor, e))
    }
}
