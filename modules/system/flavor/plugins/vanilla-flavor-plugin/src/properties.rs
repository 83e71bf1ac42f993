//! Properties accepted by the vanilla flavor.

use flavor_sdk::{Attachment, Tags};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Vanilla flavor properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct VanillaProperties {
    /// Lines appended to the instance init payload, in order.
    pub init: Vec<String>,

    /// Tags placed on every instance.
    pub tags: Tags,

    /// Attachments added to every instance.
    pub attachments: Vec<Attachment>,
}

impl VanillaProperties {
    /// JSON schema describing these properties, for operator tooling.
    #[must_use]
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(VanillaProperties)
    }
}
