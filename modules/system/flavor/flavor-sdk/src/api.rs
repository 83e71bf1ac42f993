//! Public API trait for the flavor gateway.
//!
//! Group controllers use this trait to drive flavors by name. The gateway
//! implements it and delegates to the registered plugin.

use async_trait::async_trait;

use crate::error::FlavorError;
use crate::health::Health;
use crate::models::{AllocationMethod, InstanceDescription, InstanceSpec};
use crate::properties::FlavorProperties;

/// Public API trait for the flavor gateway.
///
/// ```ignore
/// let flavors: Arc<dyn FlavorGatewayClient> = gateway.client();
///
/// flavors.validate("role", &props, &allocation).await?;
/// let spec = flavors.prepare("role", &props, spec, &allocation).await?;
/// let health = flavors.healthy("role", &props, &description).await?;
/// flavors.drain("role", &props, &description).await?;
/// ```
///
/// The gateway bounds every call by a configured ceiling. A `healthy` call
/// that exceeds it yields [`Health::Unknown`].
#[async_trait]
pub trait FlavorGatewayClient: Send + Sync {
    /// Validates `properties` against `allocation` using the named flavor.
    ///
    /// # Errors
    ///
    /// - `NoPluginAvailable` if no plugin is registered under `flavor`
    /// - `Timeout` if the plugin exceeds the call ceiling
    /// - Any error returned by the plugin
    async fn validate(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        allocation: &AllocationMethod,
    ) -> Result<(), FlavorError>;

    /// Prepares an instance spec using the named flavor.
    ///
    /// # Errors
    ///
    /// - `NoPluginAvailable` if no plugin is registered under `flavor`
    /// - `Timeout` if the plugin exceeds the call ceiling
    /// - Any error returned by the plugin
    async fn prepare(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        spec: InstanceSpec,
        allocation: &AllocationMethod,
    ) -> Result<InstanceSpec, FlavorError>;

    /// Queries the health of an instance using the named flavor.
    ///
    /// # Errors
    ///
    /// - `NoPluginAvailable` if no plugin is registered under `flavor`
    /// - Contract-level errors returned by the plugin
    async fn healthy(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<Health, FlavorError>;

    /// Drains an instance using the named flavor.
    ///
    /// # Errors
    ///
    /// - `NoPluginAvailable` if no plugin is registered under `flavor`
    /// - `DrainFailure` if cleanup could not be confirmed or timed out
    async fn drain(
        &self,
        flavor: &str,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<(), FlavorError>;
}
