//! Value types exchanged across the flavor boundary.
//!
//! These shapes are owned by neighbouring contracts (group allocation and
//! instance provisioning). The flavor contract only promises that they are
//! passed through unchanged.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Instance tags. Ordered so that prepared specs are deterministic.
pub type Tags = BTreeMap<String, String>;

/// Stable identifier of a provisioned instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct InstanceId(String);

/// Logical identifier assigned to a group member (e.g. a fixed IP or name).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct LogicalId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(InstanceId);
string_id!(LogicalId);

/// Policy describing how a group sizes and identifies its members.
///
/// Size-based when `logical_ids` is empty; otherwise the group has exactly
/// one member per logical ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AllocationMethod {
    /// Target number of members for size-based groups.
    #[serde(skip_serializing_if = "is_zero")]
    pub size: u32,
    /// Named members for logical-ID groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logical_ids: Vec<LogicalId>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl AllocationMethod {
    /// Size-based allocation with `size` members.
    #[must_use]
    pub fn size(size: u32) -> Self {
        Self {
            size,
            logical_ids: Vec::new(),
        }
    }

    /// Allocation with one member per logical ID.
    #[must_use]
    pub fn logical_ids<I, L>(ids: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LogicalId>,
    {
        Self {
            size: 0,
            logical_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` when the group is sized by count rather than by logical IDs.
    #[must_use]
    pub fn is_size_based(&self) -> bool {
        self.logical_ids.is_empty()
    }

    /// Number of members the allocation asks for.
    #[must_use]
    pub fn member_count(&self) -> usize {
        if self.is_size_based() {
            self.size as usize
        } else {
            self.logical_ids.len()
        }
    }
}

/// A logical resource attached to an instance at provisioning time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Attachment {
    /// Identifier of the attached resource.
    pub id: String,
    /// Kind of resource (e.g. `volume`, `nic`).
    #[serde(rename = "type")]
    pub kind: String,
}

/// Provisioning instructions for one instance.
///
/// Constructed by the caller, handed to `prepare` by value, and returned
/// (possibly modified) to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InstanceSpec {
    /// Instance-plugin properties. Opaque to flavors.
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub properties: serde_json::Value,
    /// Tags placed on the instance.
    pub tags: Tags,
    /// Init payload (e.g. a shell script) run on first boot.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub init: String,
    /// Logical ID of the member this instance fulfils, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_id: Option<LogicalId>,
    /// Logical resources to attach.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl InstanceSpec {
    /// Adds a tag, replacing any previous value for `key`.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Replaces the init payload.
    #[must_use]
    pub fn with_init(mut self, init: impl Into<String>) -> Self {
        self.init = init.into();
        self
    }

    /// Sets the logical ID.
    #[must_use]
    pub fn with_logical_id(mut self, id: impl Into<LogicalId>) -> Self {
        self.logical_id = Some(id.into());
        self
    }
}

/// Snapshot of a live instance, produced by the provisioning engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InstanceDescription {
    /// Stable identifier.
    pub id: InstanceId,
    /// Logical ID the instance fulfils, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_id: Option<LogicalId>,
    /// Tags currently on the instance.
    #[serde(default)]
    pub tags: Tags,
    /// Inspection data reported by the instance plugin.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub properties: serde_json::Value,
}

impl InstanceDescription {
    /// Description carrying only an identifier.
    #[must_use]
    pub fn new(id: impl Into<InstanceId>) -> Self {
        Self {
            id: id.into(),
            logical_id: None,
            tags: Tags::new(),
            properties: serde_json::Value::Null,
        }
    }

    /// Adds a tag, replacing any previous value for `key`.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Returns the value of tag `key`, if present.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}
