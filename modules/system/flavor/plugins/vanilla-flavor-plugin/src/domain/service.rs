//! Domain service for the vanilla flavor plugin.

use flavor_sdk::{FlavorError, FlavorProperties, InstanceSpec};
use tracing::debug;

use crate::properties::VanillaProperties;

/// Vanilla flavor service.
///
/// Stateless; everything it does is derived from the properties.
#[derive(Debug, Default, Clone, Copy)]
pub struct Service;

impl Service {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(super) fn decode(properties: &FlavorProperties) -> Result<VanillaProperties, FlavorError> {
        properties.decode()
    }

    /// Applies the flavor decoration to `spec`.
    pub(super) fn decorate(props: &VanillaProperties, mut spec: InstanceSpec) -> InstanceSpec {
        if !props.init.is_empty() {
            let mut lines: Vec<&str> = Vec::with_capacity(props.init.len() + 1);
            if !spec.init.is_empty() {
                lines.push(spec.init.trim_end_matches('\n'));
            }
            lines.extend(props.init.iter().map(String::as_str));
            spec.init = lines.join("\n");
        }

        for (key, value) in &props.tags {
            if let Some(previous) = spec.tags.insert(key.clone(), value.clone())
                && previous != *value
            {
                debug!(tag = %key, %previous, "Flavor tag overrides instance tag");
            }
        }

        for attachment in &props.attachments {
            if !spec.attachments.contains(attachment) {
                spec.attachments.push(attachment.clone());
            }
        }

        spec
    }
}
