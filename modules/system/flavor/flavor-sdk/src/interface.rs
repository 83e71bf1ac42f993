//! Identity of the Flavor contract revision.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name and version pair identifying an SPI revision.
///
/// Discovery and RPC dispatch bind a plugin to this contract by comparing
/// the pair a plugin declares against [`INTERFACE_SPEC`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceSpec {
    /// Human-readable contract name.
    pub name: Cow<'static, str>,
    /// Semantic version of the contract.
    pub version: Cow<'static, str>,
}

/// The current name and version of the Flavor API.
///
/// Bumped on any breaking change to an operation signature or semantics.
pub const INTERFACE_SPEC: InterfaceSpec = InterfaceSpec {
    name: Cow::Borrowed("Flavor"),
    version: Cow::Borrowed("0.1.0"),
};

impl InterfaceSpec {
    /// Creates an interface spec from owned or borrowed parts.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, version: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Returns `true` if `other` names the same contract at the same version.
    ///
    /// Versions are compared as exact strings down to the patch level.
    #[must_use]
    pub fn is_compatible_with(&self, other: &InterfaceSpec) -> bool {
        self.name == other.name && self.version == other.version
    }
}

impl fmt::Display for InterfaceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}
