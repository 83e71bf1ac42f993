//! Configuration for the role flavor plugin.

use std::time::Duration;

use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoleFlavorPluginConfig {
    /// Probe timeout used when the properties do not set one.
    pub probe_timeout_ms: u64,

    /// Upper bound on any probe timeout, including ones set in properties.
    pub max_probe_timeout_ms: u64,

    /// Upper bound on a drain call.
    pub drain_timeout_ms: u64,

    /// Instance tag inspected for a status reported by the provisioning engine.
    pub status_tag: String,

    /// Status values that are positive evidence of failure.
    pub failed_statuses: Vec<String>,
}

impl Default for RoleFlavorPluginConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: 2_000,
            max_probe_timeout_ms: 10_000,
            drain_timeout_ms: 30_000,
            status_tag: "status".to_owned(),
            failed_statuses: vec!["failed".to_owned(), "terminated".to_owned()],
        }
    }
}

impl RoleFlavorPluginConfig {
    /// Effective probe timeout for an optional per-flavor override.
    #[must_use]
    pub fn probe_timeout(&self, requested_ms: Option<u64>) -> Duration {
        let ms = requested_ms
            .unwrap_or(self.probe_timeout_ms)
            .min(self.max_probe_timeout_ms);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }

    /// Returns `true` if `status` is one of the configured failed statuses.
    #[must_use]
    pub fn is_failed_status(&self, status: &str) -> bool {
        self.failed_statuses.iter().any(|s| s == status)
    }
}
