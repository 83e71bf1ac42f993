//! Properties accepted by the role flavor.

use flavor_sdk::{InstanceDescription, LogicalId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Role flavor properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RoleProperties {
    /// Role assigned to every instance, exposed as the `role` tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Logical IDs members are pinned to. Requires a logical-ID allocation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logical_ids: Vec<LogicalId>,

    /// How to probe a live instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthCheckProperties>,
}

/// Health probe settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct HealthCheckProperties {
    /// Static `host:port` to probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Instance tag holding the `host:port` to probe. Takes precedence over `endpoint`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_tag: Option<String>,

    /// Probe timeout override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl HealthCheckProperties {
    /// Resolves the endpoint to probe for `instance`, if any.
    #[must_use]
    pub fn resolve_endpoint<'a>(&'a self, instance: &'a InstanceDescription) -> Option<&'a str> {
        self.endpoint_tag
            .as_deref()
            .and_then(|tag| instance.tag(tag))
            .or(self.endpoint.as_deref())
            .filter(|endpoint| !endpoint.is_empty())
    }
}

impl RoleProperties {
    /// JSON schema describing these properties, for operator tooling.
    #[must_use]
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(RoleProperties)
    }
}
