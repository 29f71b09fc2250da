//! Map, chart and interaction settings.
//!
//! Every field has a default matching the published page, so a config file
//! only needs the keys it overrides.

use crate::highlight::StrokeStyle;
use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// One color per class, lightest first. The class count is its length.
    pub class_colors: Vec<String>,
    pub no_data_color: String,
    pub map: MapFrame,
    pub projection: ProjectionConfig,
    pub chart: ChartFrame,
    /// Fixed value domain of the bar chart's linear scale (thousands of people).
    pub bar_domain: [f64; 2],
    pub transition: TransitionConfig,
    pub region_stroke: StrokeStyle,
    pub bar_stroke: StrokeStyle,
    pub highlight_stroke: StrokeStyle,
    pub label: LabelOffsets,
    pub records: RecordSchema,
    pub features: FeatureSchema,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            class_colors: ["#D4B9DA", "#C994C7", "#DF65B0", "#DD1C77", "#980043"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            no_data_color: "#CCC".to_string(),
            map: MapFrame::default(),
            projection: ProjectionConfig::default(),
            chart: ChartFrame::default(),
            bar_domain: [0.0, 3500.0],
            transition: TransitionConfig::default(),
            region_stroke: StrokeStyle::new("#FFF", 0.5),
            bar_stroke: StrokeStyle::new("none", 0.0),
            highlight_stroke: StrokeStyle::new("blue", 2.0),
            label: LabelOffsets::default(),
            records: RecordSchema::default(),
            features: FeatureSchema::default(),
        }
    }
}

impl MapConfig {
    /// Parse a JSON config; missing keys take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: MapConfig =
            serde_json::from_str(json).context("Failed to parse map config JSON")?;
        if config.class_colors.is_empty() {
            anyhow::bail!("Map config must list at least one class color");
        }
        Ok(config)
    }

    pub fn class_count(&self) -> usize {
        self.class_colors.len()
    }
}

/// Pixel size of the map SVG.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapFrame {
    pub width: f64,
    pub height: f64,
}

impl Default for MapFrame {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 460.0,
        }
    }
}

/// Albers equal-area conic centered on Europe, handed to D3 as is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub center: [f64; 2],
    pub rotate: [f64; 3],
    pub parallels: [f64; 2],
    pub scale: f64,
    /// Graticule spacing in degrees (longitude, latitude).
    pub graticule_step: [f64; 2],
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            center: [15.57, 49.91],
            rotate: [-20.48, 0.0, 0.0],
            parallels: [43.09, 25.0],
            scale: 650.0,
            graticule_step: [10.0, 10.0],
        }
    }
}

/// Pixel frame of the bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub left_padding: f64,
    pub right_padding: f64,
    pub top_bottom_padding: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self {
            width: 550.0,
            height: 460.0,
            left_padding: 25.0,
            right_padding: 2.0,
            top_bottom_padding: 5.0,
        }
    }
}

impl ChartFrame {
    pub fn inner_width(&self) -> f64 {
        (self.width - self.left_padding - self.right_padding).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.top_bottom_padding * 2.0).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub duration_ms: u32,
    /// Extra delay per bar rank, so bars settle left to right.
    pub stagger_ms: u32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            stagger_ms: 20,
        }
    }
}

/// Offsets of the info label relative to the cursor, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOffsets {
    pub gap: f64,
    pub above: f64,
    pub below: f64,
    /// Minimum distance kept from the right edge of the viewport.
    pub edge_margin: f64,
}

impl Default for LabelOffsets {
    fn default() -> Self {
        Self {
            gap: 10.0,
            above: 75.0,
            below: 25.0,
            edge_margin: 20.0,
        }
    }
}

/// CSV column names for the records table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSchema {
    pub key_column: String,
    pub name_column: String,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            key_column: "CountryCode".to_string(),
            name_column: "Country".to_string(),
        }
    }
}

/// GeoJSON property names for the regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSchema {
    pub key_property: String,
    pub group_property: String,
    pub name_property: String,
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self {
            key_property: "CC".to_string(),
            group_property: "sovereignt".to_string(),
            name_property: "name".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MapConfig::from_json(r##"{"no_data_color": "#EEE", "chart": {"width": 400}}"##).unwrap();
        assert_eq!(config.no_data_color, "#EEE");
        assert_eq!(config.chart.width, 400.0);
        assert_eq!(config.chart.height, 460.0);
        assert_eq!(config.class_count(), 5);
    }

    #[test]
    fn rejects_empty_palette() {
        assert!(MapConfig::from_json(r#"{"class_colors": []}"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(MapConfig::from_json("{not json").is_err());
    }

    #[test]
    fn inner_frame_subtracts_padding() {
        let frame = ChartFrame::default();
        assert_eq!(frame.inner_width(), 523.0);
        assert_eq!(frame.inner_height(), 450.0);
    }
}
