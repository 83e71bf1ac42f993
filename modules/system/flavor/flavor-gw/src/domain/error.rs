//! Domain errors for the flavor gateway.

use flavor_sdk::{FlavorError, InstanceId};
use thiserror::Error;

/// Domain-level errors for flavor gateway operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No plugin is registered under the flavor name.
    #[error("flavor plugin not found: {name}")]
    PluginNotFound { name: String },

    /// The plugin implements a different interface revision.
    #[error("flavor plugin {name} implements {actual}, expected {expected}")]
    InterfaceMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// The plugin did not answer within the configured ceiling.
    #[error("{operation} on flavor {name} timed out after {timeout_ms}ms")]
    Timeout {
        name: String,
        operation: &'static str,
        timeout_ms: u64,
    },

    /// Drain did not finish within the configured ceiling.
    #[error("drain of instance {instance} timed out after {timeout_ms}ms")]
    DrainTimeout { instance: InstanceId, timeout_ms: u64 },

    /// Error returned by the plugin.
    #[error("plugin error: {0}")]
    Plugin(#[from] FlavorError),
}

/// Convert domain errors to SDK errors for the API boundary.
impl From<DomainError> for FlavorError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::PluginNotFound { name } => FlavorError::NoPluginAvailable { name },
            DomainError::InterfaceMismatch {
                name,
                expected,
                actual,
            } => FlavorError::Internal(format!(
                "flavor plugin {name} implements {actual}, expected {expected}"
            )),
            DomainError::Timeout {
                operation,
                timeout_ms,
                ..
            } => FlavorError::Timeout {
                operation,
                timeout_ms,
            },
            DomainError::DrainTimeout {
                instance,
                timeout_ms,
            } => FlavorError::drain(instance, format!("timed out after {timeout_ms}ms")),
            DomainError::Plugin(err) => err,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use flavor_sdk::FlavorErrorKind;

    #[test]
    fn not_found_maps_to_no_plugin_available() {
        let err: FlavorError = DomainError::PluginNotFound {
            name: "role".to_owned(),
        }
        .into();
        assert_eq!(err.kind(), FlavorErrorKind::NoPluginAvailable);
    }

    #[test]
    fn drain_timeout_is_a_non_fatal_drain_failure() {
        let err: FlavorError = DomainError::DrainTimeout {
            instance: InstanceId::from("i-42"),
            timeout_ms: 10,
        }
        .into();
        assert_eq!(err.kind(), FlavorErrorKind::DrainFailure);
        assert!(!err.is_fatal());
    }

    #[test]
    fn plugin_errors_pass_through_unchanged() {
        let err: FlavorError =
            DomainError::Plugin(FlavorError::incompatible_allocation("size-only")).into();
        assert_eq!(err.kind(), FlavorErrorKind::IncompatibleAllocation);
    }
}
