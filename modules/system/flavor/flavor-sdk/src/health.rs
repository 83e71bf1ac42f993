//! Health verdict rendered by a flavor for one running instance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FlavorError;

/// An indication of whether the flavor is functioning properly on an instance.
///
/// Serialized as its integer code. `Unknown` is the zero value and the
/// default; decoding any code outside `0..=2` is a contract violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
#[repr(u8)]
pub enum Health {
    /// Health cannot currently be confirmed. Carries no new information and
    /// must not trigger destructive action.
    #[default]
    Unknown = 0,

    /// The flavor is confirmed to be functioning.
    Healthy = 1,

    /// The flavor is confirmed to not be functioning properly.
    Unhealthy = 2,
}

impl Health {
    /// Aggregates two verdicts: `Unhealthy` dominates, then `Unknown`.
    #[must_use]
    pub fn combine(self, other: Health) -> Health {
        match (self, other) {
            (Health::Unhealthy, _) | (_, Health::Unhealthy) => Health::Unhealthy,
            (Health::Unknown, _) | (_, Health::Unknown) => Health::Unknown,
            (Health::Healthy, Health::Healthy) => Health::Healthy,
        }
    }

    /// Returns the stable string name of this verdict.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Health::Unknown => "unknown",
            Health::Healthy => "healthy",
            Health::Unhealthy => "unhealthy",
        }
    }
}

impl From<Health> for u8 {
    fn from(health: Health) -> Self {
        health as u8
    }
}

impl TryFrom<i64> for Health {
    type Error = FlavorError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Health::Unknown),
            1 => Ok(Health::Healthy),
            2 => Ok(Health::Unhealthy),
            other => Err(FlavorError::contract_violation(format!(
                "health code {other} is outside the contract"
            ))),
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::error::FlavorErrorKind;

    const ALL: [Health; 3] = [Health::Unknown, Health::Healthy, Health::Unhealthy];

    #[test]
    fn unknown_is_default_and_zero() {
        assert_eq!(Health::default(), Health::Unknown);
        assert_eq!(u8::from(Health::default()), 0);
        assert_eq!(serde_json::to_string(&Health::Unknown).unwrap(), "0");
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(u8::from(Health::Healthy), 1);
        assert_eq!(u8::from(Health::Unhealthy), 2);
    }

    #[test]
    fn every_value_round_trips() {
        for health in ALL {
            let encoded = serde_json::to_string(&health).unwrap();
            let decoded: Health = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, health);
            assert_eq!(Health::try_from(i64::from(u8::from(health))).unwrap(), health);
        }
    }

    #[test]
    fn out_of_range_codes_are_contract_violations() {
        for code in [-1_i64, 3, 255] {
            let err = Health::try_from(code).unwrap_err();
            assert_eq!(err.kind(), FlavorErrorKind::ContractViolation);
        }
        assert!(serde_json::from_str::<Health>("3").is_err());
        assert!(serde_json::from_str::<Health>("\"healthy\"").is_err());
    }

    #[test]
    fn combine_prefers_unhealthy_then_unknown() {
        use Health::{Healthy, Unhealthy, Unknown};

        assert_eq!(Healthy.combine(Healthy), Healthy);
        assert_eq!(Healthy.combine(Unknown), Unknown);
        assert_eq!(Unknown.combine(Healthy), Unknown);
        assert_eq!(Unknown.combine(Unhealthy), Unhealthy);
        assert_eq!(Healthy.combine(Unhealthy), Unhealthy);
    }

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(Health::Unhealthy.to_string(), "unhealthy");
    }
}
