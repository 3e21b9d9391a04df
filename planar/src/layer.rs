//! Layer identifiers and the named-layer registry.

use arcstr::ArcStr;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An opaque layer identifier: a GDS-style (layer, datatype) pair.
#[derive(
    Debug, Default, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Layer {
    /// The layer number.
    pub layer: u16,
    /// The datatype number.
    pub datatype: u16,
}

impl Layer {
    /// Creates a new layer identifier.
    pub const fn new(layer: u16, datatype: u16) -> Self {
        Self { layer, datatype }
    }
}

impl From<(u16, u16)> for Layer {
    fn from(value: (u16, u16)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// An explicit mapping from layer names to layer identifiers.
///
/// Passed into operations that accept named layers; a lookup failure is a
/// typed error, never a silent default.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LayerRegistry {
    layers: IndexMap<ArcStr, Layer>,
}

impl LayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `layer` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<ArcStr>, layer: Layer) {
        self.layers.insert(name.into(), layer);
    }

    /// Looks up the layer registered under `name`.
    pub fn get(&self, name: &str) -> Result<Layer> {
        self.layers
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownLayer {
                name: ArcStr::from(name),
            })
    }

    /// Iterates over `(name, layer)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArcStr, &Layer)> {
        self.layers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_failures_are_typed() {
        let mut reg = LayerRegistry::new();
        reg.insert("WG", Layer::new(1, 0));
        assert_eq!(reg.get("WG").unwrap(), Layer::new(1, 0));
        assert!(matches!(
            reg.get("M1"),
            Err(Error::UnknownLayer { name }) if name == "M1"
        ));
    }
}
