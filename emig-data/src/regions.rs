//! GeoJSON loading for map regions.
//!
//! Input is a `FeatureCollection` (converted from TopoJSON ahead of time).
//! Geometry is kept as raw JSON for the projection layer; only the
//! configured properties are read.

use anyhow::Context;
use emig_core::config::FeatureSchema;
use emig_core::RegionFeature;
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Value,
}

/// Parse a GeoJSON feature collection into regions, in file order.
///
/// Features without a key are kept (they will not join and are drawn as no
/// data). A missing group name falls back to the display name, then the key.
pub fn load_regions(geojson: &str, schema: &FeatureSchema) -> anyhow::Result<Vec<RegionFeature>> {
    let collection: FeatureCollection =
        serde_json::from_str(geojson).context("Failed to parse regions GeoJSON")?;

    let mut keyless = 0u32;
    let regions: Vec<RegionFeature> = collection
        .features
        .into_iter()
        .map(|feature| {
            let mut properties = feature.properties.unwrap_or_default();
            let key = take_text(&mut properties, &schema.key_property).unwrap_or_default();
            if key.is_empty() {
                keyless += 1;
            }
            let display = take_text(&mut properties, &schema.name_property);
            let group = take_text(&mut properties, &schema.group_property)
                .or_else(|| display.clone())
                .unwrap_or_else(|| key.clone());
            let display = display.unwrap_or_else(|| group.clone());

            let mut region = RegionFeature::new(key, group, display).with_geometry(feature.geometry);
            region.properties = properties;
            region
        })
        .collect();

    log::info!(
        "[EMIG] regions: Loaded {} regions, {} without a {:?} property",
        regions.len(),
        keyless,
        schema.key_property
    );
    Ok(regions)
}

/// Back to a feature collection for the projection layer.
///
/// Each feature carries `key` and `group` so paths can be matched with
/// regions by index or key.
pub fn to_feature_collection(regions: &[RegionFeature]) -> Value {
    let features: Vec<Value> = regions
        .iter()
        .map(|region| {
            json!({
                "type": "Feature",
                "properties": {
                    "key": region.region_key,
                    "group": region.group_name,
                },
                "geometry": region.geometry,
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

/// Parse the world countries layer drawn underneath the regions.
///
/// Only geometry is kept; the layer is never joined or highlighted. Blank
/// input (the build placeholder for a missing file) yields `None`.
pub fn load_background(geojson: &str) -> anyhow::Result<Option<Value>> {
    if geojson.trim().is_empty() {
        log::warn!("[EMIG] regions: no background countries, drawing regions only");
        return Ok(None);
    }
    let collection: FeatureCollection =
        serde_json::from_str(geojson).context("Failed to parse background GeoJSON")?;
    let features: Vec<Value> = collection
        .features
        .into_iter()
        .filter(|feature| !feature.geometry.is_null())
        .map(|feature| json!({ "type": "Feature", "properties": {}, "geometry": feature.geometry }))
        .collect();
    log::info!("[EMIG] regions: Loaded {} background countries", features.len());
    Ok(Some(json!({ "type": "FeatureCollection", "features": features })))
}

/// Remove a property and render it as text; numbers are accepted for keys.
fn take_text(properties: &mut Map<String, Value>, name: &str) -> Option<String> {
    match properties.remove(name)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature",
             "properties": {"CC": "PL", "sovereignt": "Poland", "name": "Poland", "pop_est": 38476269},
             "geometry": {"type": "Polygon", "coordinates": [[[14.1, 49.0], [24.1, 49.0], [24.1, 54.8], [14.1, 54.8], [14.1, 49.0]]]}},
            {"type": "Feature",
             "properties": {"sovereignt": "Kosovo"},
             "geometry": null},
            {"type": "Feature",
             "properties": {"CC": "RO", "name": "Romania"},
             "geometry": {"type": "Point", "coordinates": [25.0, 45.9]}}
        ]
    }"#;

    #[test]
    fn reads_configured_properties() {
        let regions = load_regions(GEOJSON, &FeatureSchema::default()).unwrap();
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0].region_key, "PL");
        assert_eq!(regions[0].group_name, "Poland");
        assert_eq!(regions[0].properties["pop_est"], 38476269);
        assert!(regions[0].geometry.is_object());
        assert!(!regions[0].is_joined());
    }

    #[test]
    fn keyless_features_are_kept() {
        let regions = load_regions(GEOJSON, &FeatureSchema::default()).unwrap();
        assert_eq!(regions[1].region_key, "");
        assert_eq!(regions[1].group_name, "Kosovo");
        assert!(regions[1].geometry.is_null());
    }

    #[test]
    fn group_falls_back_to_display_name() {
        let regions = load_regions(GEOJSON, &FeatureSchema::default()).unwrap();
        assert_eq!(regions[2].group_name, "Romania");
        assert_eq!(regions[2].display_name, "Romania");
    }

    #[test]
    fn rejects_non_collections() {
        assert!(load_regions(r#"{"type": "Feature"}"#, &FeatureSchema::default()).is_err());
    }

    #[test]
    fn background_keeps_geometry_only() {
        let background = load_background(GEOJSON).unwrap().unwrap();
        let features = background["features"].as_array().unwrap();
        assert_eq!(features.len(), 2, "features without geometry are dropped");
        assert_eq!(features[0]["properties"], json!({}));
        assert_eq!(features[1]["geometry"]["type"], "Point");
    }

    #[test]
    fn blank_background_is_optional() {
        assert_eq!(load_background("").unwrap(), None);
        assert_eq!(load_background("  \n").unwrap(), None);
        assert!(load_background(r#"{"type": "Feature"}"#).is_err());
    }

    #[test]
    fn feature_collection_keeps_order_and_geometry() {
        let regions = load_regions(GEOJSON, &FeatureSchema::default()).unwrap();
        let fc = to_feature_collection(&regions);
        assert_eq!(fc["features"].as_array().unwrap().len(), 3);
        assert_eq!(fc["features"][2]["properties"]["key"], "RO");
        assert_eq!(fc["features"][0]["geometry"], regions[0].geometry);
    }
}
