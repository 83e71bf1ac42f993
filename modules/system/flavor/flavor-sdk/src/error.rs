//! Error types for the flavor SPI.

use thiserror::Error;

use crate::models::InstanceId;

/// Errors that can occur when invoking a flavor plugin.
///
/// Transient inspection problems inside `healthy` are never reported through
/// this type; they are expressed as [`crate::Health::Unknown`].
#[derive(Debug, Error)]
pub enum FlavorError {
    /// The flavor properties cannot be decoded or fail schema checks.
    #[error("malformed flavor properties: {reason}")]
    MalformedProperties {
        /// Why the properties were rejected.
        reason: String,
        /// Underlying decode error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The properties assume an allocation policy different from the one supplied.
    #[error("incompatible allocation: {reason}")]
    IncompatibleAllocation {
        /// Why the allocation does not fit the properties.
        reason: String,
    },

    /// Preconditions for provisioning cannot be established.
    #[error("preparation failed: {reason}")]
    PreparationFailure {
        /// Why the instance spec could not be prepared.
        reason: String,
    },

    /// Cleanup before destruction could not be confirmed. Non-fatal to the caller.
    #[error("drain of instance {instance} failed: {reason}")]
    DrainFailure {
        /// The instance being drained.
        instance: InstanceId,
        /// Why the drain could not be confirmed.
        reason: String,
    },

    /// A result outside the contract was produced. Indicates a plugin bug.
    #[error("contract violation: {reason}")]
    ContractViolation {
        /// What part of the contract was violated.
        reason: String,
    },

    /// No plugin is registered under the requested flavor name.
    #[error("no flavor plugin available: {name}")]
    NoPluginAvailable {
        /// The flavor name that could not be resolved.
        name: String,
    },

    /// The call did not complete within the configured ceiling.
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        /// The operation that timed out.
        operation: &'static str,
        /// The ceiling that was applied.
        timeout_ms: u64,
    },

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error kind without payload, for caller-side policy decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlavorErrorKind {
    MalformedProperties,
    IncompatibleAllocation,
    PreparationFailure,
    DrainFailure,
    ContractViolation,
    NoPluginAvailable,
    Timeout,
    Internal,
}

impl FlavorError {
    /// Create a malformed-properties error with a reason only.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedProperties {
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a malformed-properties error with a source error.
    #[must_use]
    pub fn malformed_with_source(
        reason: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::MalformedProperties {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an incompatible-allocation error.
    #[must_use]
    pub fn incompatible_allocation(reason: impl Into<String>) -> Self {
        Self::IncompatibleAllocation {
            reason: reason.into(),
        }
    }

    /// Create a preparation-failure error.
    #[must_use]
    pub fn preparation(reason: impl Into<String>) -> Self {
        Self::PreparationFailure {
            reason: reason.into(),
        }
    }

    /// Create a drain-failure error for the given instance.
    #[must_use]
    pub fn drain(instance: InstanceId, reason: impl Into<String>) -> Self {
        Self::DrainFailure {
            instance,
            reason: reason.into(),
        }
    }

    /// Create a contract-violation error.
    #[must_use]
    pub fn contract_violation(reason: impl Into<String>) -> Self {
        Self::ContractViolation {
            reason: reason.into(),
        }
    }

    /// Returns the payload-free kind of this error.
    #[must_use]
    pub fn kind(&self) -> FlavorErrorKind {
        match self {
            Self::MalformedProperties { .. } => FlavorErrorKind::MalformedProperties,
            Self::IncompatibleAllocation { .. } => FlavorErrorKind::IncompatibleAllocation,
            Self::PreparationFailure { .. } => FlavorErrorKind::PreparationFailure,
            Self::DrainFailure { .. } => FlavorErrorKind::DrainFailure,
            Self::ContractViolation { .. } => FlavorErrorKind::ContractViolation,
            Self::NoPluginAvailable { .. } => FlavorErrorKind::NoPluginAvailable,
            Self::Timeout { .. } => FlavorErrorKind::Timeout,
            Self::Internal(_) => FlavorErrorKind::Internal,
        }
    }

    /// Returns `true` if the error signals a plugin bug rather than a
    /// configuration or runtime condition.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ContractViolation { .. })
    }
}
