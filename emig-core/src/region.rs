//! Map regions: opaque geometry plus the properties the views need.

use crate::attribute::{AttributeName, AttributeValues};
use serde::Serialize;
use serde_json::{Map, Value};

/// A geographic region as read from the regions GeoJSON.
///
/// The geometry is carried untouched for the projection layer. `attributes`
/// stays `None` until a record with the same `region_key` is joined in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionFeature {
    pub region_key: String,
    pub group_name: String,
    pub display_name: String,
    pub geometry: Value,
    /// Remaining feature properties, kept for the rendering layer.
    pub properties: Map<String, Value>,
    pub attributes: Option<AttributeValues>,
}

impl RegionFeature {
    pub fn new(
        region_key: impl Into<String>,
        group_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            region_key: region_key.into(),
            group_name: group_name.into(),
            display_name: display_name.into(),
            geometry: Value::Null,
            properties: Map::new(),
            attributes: None,
        }
    }

    pub fn with_geometry(mut self, geometry: Value) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn is_joined(&self) -> bool {
        self.attributes.is_some()
    }

    /// Value of `attr`, `None` both for unmatched regions and missing cells.
    pub fn value(&self, attr: AttributeName) -> Option<f64> {
        self.attributes.and_then(|values| values.get(attr))
    }
}
