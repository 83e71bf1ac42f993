//! Domain service for the combo flavor plugin.

use std::sync::{Arc, Weak};

use flavor_sdk::{FlavorError, FlavorLookup, FlavorPluginClient, FlavorProperties};

use crate::PLUGIN_NAME;
use crate::properties::{ComboProperties, FlavorRef};

/// Combo flavor service.
///
/// Holds a weak handle on the lookup it is usually registered into, so the
/// registry and this plugin do not keep each other alive.
pub struct Service {
    lookup: Weak<dyn FlavorLookup>,
}

impl Service {
    #[must_use]
    pub fn new(lookup: Weak<dyn FlavorLookup>) -> Self {
        Self { lookup }
    }

    pub(super) fn decode(properties: &FlavorProperties) -> Result<ComboProperties, FlavorError> {
        let props: ComboProperties = properties.decode()?;
        if props.flavors.is_empty() {
            return Err(FlavorError::malformed("combo flavor lists no child flavors"));
        }
        Ok(props)
    }

    /// Resolves a child flavor.
    ///
    /// `Ok(None)` means the lookup is alive but has nothing under that name.
    pub(super) fn resolve(
        &self,
        child: &FlavorRef,
    ) -> Result<Option<Arc<dyn FlavorPluginClient>>, FlavorError> {
        let lookup = self.lookup.upgrade().ok_or_else(|| FlavorError::NoPluginAvailable {
            name: PLUGIN_NAME.to_owned(),
        })?;
        Ok(lookup.lookup(&child.plugin))
    }
}
