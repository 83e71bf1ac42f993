//! Properties accepted by the combo flavor.

use flavor_sdk::FlavorProperties;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Combo flavor properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ComboProperties {
    /// Child flavors, applied in order.
    pub flavors: Vec<FlavorRef>,
}

/// One child flavor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FlavorRef {
    /// Name the child flavor is registered under.
    pub plugin: String,

    /// Properties handed to the child verbatim.
    #[serde(default)]
    pub properties: FlavorProperties,
}

impl ComboProperties {
    /// JSON schema describing these properties, for operator tooling.
    #[must_use]
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ComboProperties)
    }
}
