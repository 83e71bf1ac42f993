//! Plugin API trait for flavor implementations.
//!
//! Plugins implement this trait to customise how instances are provisioned,
//! checked, and drained. Callers reach plugins through the gateway, which
//! resolves them by flavor name and delegates these calls.

use async_trait::async_trait;

use crate::error::FlavorError;
use crate::health::Health;
use crate::models::{AllocationMethod, InstanceDescription, InstanceSpec};
use crate::properties::FlavorProperties;

/// Plugin API trait for flavor implementations.
///
/// Every operation takes the flavor's [`FlavorProperties`] first. The same
/// properties value is shared by all calls for one flavor and must be
/// treated as read-only.
///
/// # Concurrency
///
/// Callers may invoke operations concurrently for different instances, and
/// may run `healthy` and `drain` for distinct instances in parallel. For a
/// single instance the order is `prepare`, then any number of `healthy`,
/// then `drain` last. `validate` may be called at any time.
///
/// Operations may block on network I/O. Cancellation is not part of this
/// revision; implementations must bound their own work.
#[async_trait]
pub trait FlavorPluginClient: Send + Sync {
    /// Checks whether the plugin can support a configuration.
    ///
    /// Side-effect free and deterministic in its arguments. Once it succeeds
    /// for a `(properties, allocation)` pair, later calls with the same
    /// properties fail only for per-instance runtime conditions.
    ///
    /// # Errors
    ///
    /// - `MalformedProperties` if the properties cannot be decoded or lack
    ///   required fields
    /// - `IncompatibleAllocation` if the properties assume a different
    ///   allocation policy
    async fn validate(
        &self,
        properties: &FlavorProperties,
        allocation: &AllocationMethod,
    ) -> Result<(), FlavorError>;

    /// Modifies the provisioning instructions for an instance.
    ///
    /// May add tags, wrap the init payload, set logical IDs or attachments.
    /// Fields it does not intentionally modify are returned verbatim, and the
    /// result is a pure function of the inputs.
    ///
    /// # Errors
    ///
    /// - `PreparationFailure` if the properties cannot be satisfied for `spec`
    ///   or a resource they reference is missing
    async fn prepare(
        &self,
        properties: &FlavorProperties,
        spec: InstanceSpec,
        allocation: &AllocationMethod,
    ) -> Result<InstanceSpec, FlavorError>;

    /// Determines the health of this flavor on a live instance.
    ///
    /// Each call is a fresh query. A transient inspection failure (endpoint
    /// unreachable, probe timed out, insufficient signal) is reported as
    /// [`Health::Unknown`], never as an error.
    ///
    /// # Errors
    ///
    /// Reserved for contract-level problems such as malformed properties.
    async fn healthy(
        &self,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<Health, FlavorError>;

    /// Performs a best-effort cleanup before the instance is destroyed.
    ///
    /// May be called more than once for the same instance; a call on an
    /// already-drained instance succeeds.
    ///
    /// # Errors
    ///
    /// - `DrainFailure` if cleanup could not be confirmed. The caller may log
    ///   it and proceed with destruction.
    async fn drain(
        &self,
        properties: &FlavorProperties,
        instance: &InstanceDescription,
    ) -> Result<(), FlavorError>;
}
