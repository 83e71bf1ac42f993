//! Opaque per-flavor configuration.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FlavorError;

/// Operator-authored configuration for one flavor.
///
/// Carries an optional type tag and a structured payload. The caller never
/// interprets it and passes the same value to every operation for a flavor;
/// only the plugin decodes it, lazily, via [`FlavorProperties::decode`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FlavorProperties {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    type_tag: Option<String>,
    #[serde(default)]
    payload: Value,
}

impl FlavorProperties {
    /// Untagged properties wrapping `payload` verbatim.
    #[must_use]
    pub fn new(payload: Value) -> Self {
        Self {
            type_tag: None,
            payload,
        }
    }

    /// Properties carrying a type tag alongside the payload.
    #[must_use]
    pub fn tagged(type_tag: impl Into<String>, payload: Value) -> Self {
        Self {
            type_tag: Some(type_tag.into()),
            payload,
        }
    }

    /// Encodes a typed value into untagged properties.
    ///
    /// # Errors
    ///
    /// Returns `MalformedProperties` if `value` cannot be represented as JSON.
    pub fn encode<T: Serialize>(value: &T) -> Result<Self, FlavorError> {
        serde_json::to_value(value)
            .map(Self::new)
            .map_err(|e| FlavorError::malformed_with_source("cannot encode properties", e))
    }

    /// Decodes the payload into the plugin's own schema.
    ///
    /// # Errors
    ///
    /// Returns `MalformedProperties` if the payload does not match `T`.
    ///
    /// A null payload decodes as an empty object.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, FlavorError> {
        let empty = Value::Object(serde_json::Map::new());
        let payload = if self.payload.is_null() {
            &empty
        } else {
            &self.payload
        };
        T::deserialize(payload).map_err(|e| {
            FlavorError::malformed_with_source(format!("cannot decode properties: {e}"), e)
        })
    }

    /// The type tag, if the author supplied one.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }

    /// The raw payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Returns `true` for a null payload or an empty object or array.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.payload {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl From<Value> for FlavorProperties {
    fn from(payload: Value) -> Self {
        Self::new(payload)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::error::FlavorErrorKind;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Sample {
        role: String,
    }

    #[test]
    fn decode_is_deferred_to_the_plugin_schema() {
        let props = FlavorProperties::new(json!({"role": "worker"}));
        let sample: Sample = props.decode().unwrap();
        assert_eq!(sample.role, "worker");
    }

    #[test]
    fn decode_failure_is_malformed_properties() {
        let props = FlavorProperties::new(json!({"role": 7}));
        let err = props.decode::<Sample>().unwrap_err();
        assert_eq!(err.kind(), FlavorErrorKind::MalformedProperties);
    }

    #[test]
    fn null_payload_decodes_like_an_empty_object() {
        #[derive(Debug, Default, Deserialize, PartialEq)]
        #[serde(default)]
        struct Optional {
            role: Option<String>,
        }

        let decoded: Optional = FlavorProperties::default().decode().unwrap();
        assert_eq!(decoded, Optional::default());
        assert!(FlavorProperties::default().decode::<Sample>().is_err());
    }

    #[test]
    fn envelope_without_payload_wrapper_is_rejected() {
        let bare = json!({"tags": {"tier": "web"}});
        assert!(serde_json::from_value::<FlavorProperties>(bare).is_err());

        let wrapped = json!({"payload": {"tags": {"tier": "web"}}});
        let props: FlavorProperties = serde_json::from_value(wrapped).unwrap();
        assert_eq!(props.payload(), &json!({"tags": {"tier": "web"}}));
    }

    #[test]
    fn emptiness() {
        assert!(FlavorProperties::default().is_empty());
        assert!(FlavorProperties::new(json!({})).is_empty());
        assert!(FlavorProperties::new(json!([])).is_empty());
        assert!(!FlavorProperties::new(json!({"role": "worker"})).is_empty());
        assert!(!FlavorProperties::new(json!("inline")).is_empty());
    }

    #[test]
    fn arbitrary_payloads_round_trip_verbatim() {
        let payload = json!({
            "list": [1, "two", null, {"deep": [true, 3.5]}],
            "empty": {},
            "text": "x"
        });
        let props = FlavorProperties::tagged("swarm/worker", payload.clone());

        let encoded = serde_json::to_string(&props).unwrap();
        let decoded: FlavorProperties = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, props);
        assert_eq!(decoded.type_tag(), Some("swarm/worker"));
        assert_eq!(decoded.payload(), &payload);
    }

    #[test]
    fn untagged_form_omits_type() {
        let props = FlavorProperties::new(json!({"a": 1}));
        assert_eq!(
            serde_json::to_value(&props).unwrap(),
            json!({"payload": {"a": 1}})
        );
    }
}
