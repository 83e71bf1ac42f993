//! Domain service for the role flavor plugin.

use std::collections::BTreeSet;
use std::sync::Arc;

use flavor_sdk::{
    AllocationMethod, FlavorError, FlavorProperties, Health, InstanceDescription, InstanceSpec,
};
use tracing::debug;

use crate::ROLE_TAG;
use crate::config::RoleFlavorPluginConfig;
use crate::inspector::{Inspection, InstanceInspector, TcpInspector};
use crate::properties::RoleProperties;

/// Role flavor service.
///
/// Holds no per-instance state; the inspector owns any drain bookkeeping.
pub struct Service {
    pub(super) cfg: RoleFlavorPluginConfig,
    pub(super) inspector: Arc<dyn InstanceInspector>,
}

impl Service {
    /// Creates a service probing instances over TCP.
    #[must_use]
    pub fn from_config(cfg: RoleFlavorPluginConfig) -> Self {
        Self::with_inspector(cfg, Arc::new(TcpInspector))
    }

    #[must_use]
    pub fn with_inspector(
        cfg: RoleFlavorPluginConfig,
        inspector: Arc<dyn InstanceInspector>,
    ) -> Self {
        Self { cfg, inspector }
    }

    /// Decodes properties and checks the allocation-independent rules.
    pub(super) fn decode(properties: &FlavorProperties) -> Result<RoleProperties, FlavorError> {
        let props: RoleProperties = properties.decode()?;

        if props.role.is_none() && props.logical_ids.is_empty() {
            return Err(FlavorError::malformed(
                "flavor descriptor is empty: set role or logical_ids",
            ));
        }
        if let Some(role) = &props.role
            && role.trim().is_empty()
        {
            return Err(FlavorError::malformed("role must not be blank"));
        }

        let mut seen = BTreeSet::new();
        for id in &props.logical_ids {
            if !seen.insert(id) {
                return Err(FlavorError::malformed(format!("duplicate logical ID {id}")));
            }
        }

        if let Some(check) = &props.health {
            if check.endpoint.is_none() && check.endpoint_tag.is_none() {
                return Err(FlavorError::malformed(
                    "health requires endpoint or endpoint_tag",
                ));
            }
            if check.timeout_ms == Some(0) {
                return Err(FlavorError::malformed(
                    "health.timeout_ms must be greater than zero",
                ));
            }
        }

        Ok(props)
    }

    /// Checks that the properties fit the group's allocation policy.
    pub(super) fn check_allocation(
        props: &RoleProperties,
        allocation: &AllocationMethod,
    ) -> Result<(), FlavorError> {
        if props.logical_ids.is_empty() {
            return Ok(());
        }
        if allocation.is_size_based() {
            return Err(FlavorError::incompatible_allocation(
                "properties assign logical IDs but the allocation is size-based",
            ));
        }
        if let Some(missing) = allocation
            .logical_ids
            .iter()
            .find(|id| !props.logical_ids.contains(id))
        {
            return Err(FlavorError::incompatible_allocation(format!(
                "allocation logical ID {missing} is not listed in the properties"
            )));
        }
        Ok(())
    }

    /// Applies the role to `spec`. Fields other than the role tag are untouched.
    pub(super) fn assign(
        props: &RoleProperties,
        mut spec: InstanceSpec,
    ) -> Result<InstanceSpec, FlavorError> {
        if !props.logical_ids.is_empty() {
            match &spec.logical_id {
                None => {
                    return Err(FlavorError::preparation(
                        "instance spec has no logical ID but the flavor pins logical IDs",
                    ));
                }
                Some(id) if !props.logical_ids.contains(id) => {
                    return Err(FlavorError::preparation(format!(
                        "logical ID {id} is not one of the flavor's logical IDs"
                    )));
                }
                Some(_) => {}
            }
        }

        if let Some(role) = &props.role {
            if let Some(existing) = spec.tags.get(ROLE_TAG)
                && existing != role
            {
                return Err(FlavorError::preparation(format!(
                    "instance is tagged {ROLE_TAG}={existing} but the flavor assigns {role}"
                )));
            }
            spec.tags.insert(ROLE_TAG.to_owned(), role.clone());
        }

        Ok(spec)
    }

    /// Renders a verdict for a live instance.
    pub(super) async fn inspect(
        &self,
        props: &RoleProperties,
        instance: &InstanceDescription,
    ) -> Health {
        if let Some(status) = instance.tag(&self.cfg.status_tag)
            && self.cfg.is_failed_status(status)
        {
            debug!(status, "Instance status reports failure");
            return Health::Unhealthy;
        }

        let Some(check) = &props.health else {
            return Health::Unknown;
        };
        let Some(endpoint) = check.resolve_endpoint(instance) else {
            debug!("No endpoint to probe");
            return Health::Unknown;
        };

        let timeout = self.cfg.probe_timeout(check.timeout_ms);
        match tokio::time::timeout(timeout, self.inspector.inspect(endpoint)).await {
            Ok(Ok(Inspection::Up)) => Health::Healthy,
            Ok(Ok(Inspection::Down)) => Health::Unhealthy,
            Ok(Err(e)) => {
                debug!(endpoint, error = %e, "Inspection failed, reporting unknown");
                Health::Unknown
            }
            Err(_) => {
                debug!(endpoint, timeout = ?timeout, "Inspection timed out, reporting unknown");
                Health::Unknown
            }
        }
    }
}
